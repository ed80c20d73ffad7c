//! Common types

use uuid::Uuid;

/// Opaque identifier assigned by a document store.
pub type DocumentId = String;

/// New store-assigned id. UUIDv7 keeps lexical id order aligned with creation order.
pub fn new_document_id() -> DocumentId {
    Uuid::now_v7().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_ids_sort_by_creation() {
        let first = new_document_id();
        let second = new_document_id();
        assert!(first < second);
        assert!(Uuid::parse_str(&first).is_ok());
    }
}
