//! Customer-facing catalog: category filter, category labels, item detail.

use std::fmt;
use std::str::FromStr;

use menu_shared::constants::{ALL_CATEGORIES, UNCATEGORIZED_LABEL};
use serde::Serialize;

use crate::domain::{Category, MenuItem};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Category(String),
}

impl CategoryFilter {
    pub fn from_query(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") => CategoryFilter::All,
            Some(v) if v == ALL_CATEGORIES => CategoryFilter::All,
            Some(v) => CategoryFilter::Category(v.to_string()),
        }
    }

    /// Items without a category never match a specific filter.
    pub fn matches(&self, item: &MenuItem) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Category(id) => !item.category_id.is_empty() && &item.category_id == id,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_query(Some(s)))
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str(ALL_CATEGORIES),
            CategoryFilter::Category(id) => f.write_str(id),
        }
    }
}

/// Keeps display order.
pub fn filter_items<'a>(items: &'a [MenuItem], filter: &CategoryFilter) -> Vec<&'a MenuItem> {
    items.iter().filter(|item| filter.matches(item)).collect()
}

/// Category name, or the "Uncategorized" label for dangling references.
pub fn category_name<'a>(categories: &'a [Category], category_id: &str) -> &'a str {
    categories
        .iter()
        .find(|c| c.id == category_id)
        .map(|c| c.name.as_str())
        .unwrap_or(UNCATEGORIZED_LABEL)
}

/// Item with its resolved category label, as shown in the detail drawer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDetail {
    #[serde(flatten)]
    pub item: MenuItem,
    pub category_name: String,
}

impl ItemDetail {
    pub fn new(item: MenuItem, categories: &[Category]) -> Self {
        let category_name = category_name(categories, &item.category_id).to_string();
        Self { item, category_name }
    }
}

/// One rendering of the menu page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogView {
    pub categories: Vec<Category>,
    pub active_category: String,
    pub items: Vec<ItemDetail>,
}

impl CatalogView {
    /// `items` must already be in display order.
    pub fn build(categories: Vec<Category>, items: &[MenuItem], filter: &CategoryFilter) -> Self {
        let items = filter_items(items, filter)
            .into_iter()
            .map(|item| ItemDetail::new(item.clone(), &categories))
            .collect();

        Self {
            categories,
            active_category: filter.to_string(),
            items,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, category_id: &str, order: u32) -> MenuItem {
        MenuItem {
            id: id.to_string(),
            name: id.to_uppercase(),
            description: None,
            price: 10.0,
            rating: 4.5,
            image: None,
            category_id: category_id.to_string(),
            order: Some(order),
        }
    }

    fn categories() -> Vec<Category> {
        vec![
            Category { id: "burgers".into(), name: "Burgers".into() },
            Category { id: "drinks".into(), name: "Drinks".into() },
        ]
    }

    #[test]
    fn test_filter_from_query() {
        assert_eq!(CategoryFilter::from_query(None), CategoryFilter::All);
        assert_eq!(CategoryFilter::from_query(Some("All")), CategoryFilter::All);
        assert_eq!(
            CategoryFilter::from_query(Some("drinks")),
            CategoryFilter::Category("drinks".into())
        );
    }

    #[test]
    fn test_filter_keeps_display_order_and_skips_uncategorized() {
        let items = vec![item("a", "drinks", 0), item("b", "", 1), item("c", "burgers", 2), item("d", "drinks", 3)];

        let drinks = filter_items(&items, &CategoryFilter::Category("drinks".into()));
        assert_eq!(drinks.iter().map(|i| i.id.as_str()).collect::<Vec<_>>(), vec!["a", "d"]);

        let empty_category = filter_items(&items, &CategoryFilter::Category(String::new()));
        assert!(empty_category.is_empty());

        assert_eq!(filter_items(&items, &CategoryFilter::All).len(), 4);
    }

    #[test]
    fn test_dangling_category_reads_uncategorized() {
        let categories = categories();
        assert_eq!(category_name(&categories, "drinks"), "Drinks");
        assert_eq!(category_name(&categories, "deleted"), "Uncategorized");
    }

    #[test]
    fn test_catalog_view() {
        let items = vec![item("a", "drinks", 0), item("b", "gone", 1)];
        let view = CatalogView::build(categories(), &items, &CategoryFilter::All);

        assert_eq!(view.active_category, "All");
        assert_eq!(view.items[0].category_name, "Drinks");
        assert_eq!(view.items[1].category_name, "Uncategorized");

        let json = serde_json::to_value(&view.items[0]).unwrap();
        assert_eq!(json["categoryName"], "Drinks");
        assert_eq!(json["categoryId"], "drinks");
    }
}
