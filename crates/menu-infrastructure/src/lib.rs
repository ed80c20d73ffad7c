//! # Menu Infrastructure
//! 
//! Document store and object storage implementations (adapters).

pub mod backend;
pub mod database;
pub mod memory;
pub mod storage;
pub mod seed;

pub use backend::DocumentBackend;
pub use database::{create_pool, PgDocumentStore};
pub use memory::InMemoryDocumentStore;
pub use storage::LocalObjectStorage;
pub use seed::seed_demo_menu;
