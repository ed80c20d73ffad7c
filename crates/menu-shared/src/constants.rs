//! Application-wide constants

/// Document namespace holding menu items.
pub const MENU_ITEMS_KIND: &str = "menu";
/// Document namespace holding categories.
pub const CATEGORIES_KIND: &str = "categories";

/// Label shown for an item whose category cannot be resolved.
pub const UNCATEGORIZED_LABEL: &str = "Uncategorized";
/// Filter token selecting every category.
pub const ALL_CATEGORIES: &str = "All";

pub const DEFAULT_UPLOAD_PREFIX: &str = "menu-items";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
pub const DEFAULT_RATING: f64 = 5.0;
