//! Storage traits (ports)

pub mod document_store;
pub mod object_storage;

pub use document_store::{Document, DocumentStore, Fields};
pub use object_storage::ObjectStorage;

#[cfg(test)]
pub use document_store::MockDocumentStore;
#[cfg(test)]
pub use object_storage::MockObjectStorage;
