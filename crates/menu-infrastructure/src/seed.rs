//! Demo menu for local development.

use std::sync::Arc;

use tracing::info;

use menu_core::domain::MenuItemDraft;
use menu_core::error::DomainError;
use menu_core::repositories::DocumentStore;
use menu_core::services::{CategoryService, MenuItemService};

const DEMO_CATEGORIES: [&str; 5] = ["Burgers", "Pizza", "Pasta", "Drinks", "Desserts"];

// (category, name, description, price, rating)
const DEMO_ITEMS: [(&str, &str, &str, f64, f64); 8] = [
    ("Burgers", "Classic Cheeseburger", "Juicy beef patty, cheddar cheese, lettuce, tomato, and house sauce on a brioche bun.", 12.99, 4.8),
    ("Burgers", "Double Bacon Smash", "Two smashed patties, crispy bacon, american cheese, pickles, and onion.", 15.99, 4.9),
    ("Pizza", "Margherita Pizza", "San Marzano tomato sauce, fresh mozzarella, basil, and extra virgin olive oil.", 14.50, 4.7),
    ("Pizza", "Pepperoni Feast", "Loaded with spicy pepperoni, mozzarella cheese, and tomato sauce.", 16.00, 4.6),
    ("Pasta", "Truffle Carbonara", "Spaghetti, guanciale, pecorino romano, egg yolk, and black truffle shavings.", 18.99, 4.9),
    ("Drinks", "Berry Mojito", "Fresh mint, lime juice, mixed berries, rum, and soda water.", 8.50, 4.5),
    ("Drinks", "Iced Latte", "Espresso shot poured over ice and cold milk.", 5.00, 4.7),
    ("Desserts", "Chocolate Lava Cake", "Warm chocolate cake with a molten center, served with vanilla ice cream.", 9.99, 4.9),
];

/// Fills an empty store with the demo categories and items.
/// Returns the number of items created, 0 when the store already has data.
pub async fn seed_demo_menu<S: DocumentStore>(store: Arc<S>) -> Result<usize, DomainError> {
    let categories = CategoryService::new(store.clone());
    let items = MenuItemService::new(store);

    if !categories.list().await?.is_empty() || !items.list().await?.is_empty() {
        info!("Store already populated, skipping demo seed");
        return Ok(0);
    }

    let mut created = Vec::with_capacity(DEMO_CATEGORIES.len());
    for name in DEMO_CATEGORIES {
        created.push(categories.create(name).await?);
    }

    for (category, name, description, price, rating) in DEMO_ITEMS {
        let category_id = created
            .iter()
            .find(|c| c.name == category)
            .map(|c| c.id.as_str())
            .unwrap_or_default();

        let mut draft = MenuItemDraft::new(name, price, category_id);
        draft.description = Some(description.to_string());
        draft.rating = rating;
        items.add(draft).await?;
    }

    info!(
        "Seeded demo menu: {} categories, {} items",
        created.len(),
        DEMO_ITEMS.len()
    );
    Ok(DEMO_ITEMS.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryDocumentStore;

    #[tokio::test]
    async fn test_seed_assigns_dense_orders_once() {
        let store = Arc::new(InMemoryDocumentStore::new());

        assert_eq!(seed_demo_menu(store.clone()).await.unwrap(), 8);
        assert_eq!(seed_demo_menu(store.clone()).await.unwrap(), 0);

        let items = MenuItemService::new(store).list().await.unwrap();
        let orders: Vec<Option<u32>> = items.iter().map(|i| i.order).collect();
        assert_eq!(orders, (0..8).map(Some).collect::<Vec<_>>());
        assert_eq!(items[0].name, "Classic Cheeseburger");
    }
}
