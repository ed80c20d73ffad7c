//! # Menu Core
//! 
//! Domain entities, services, and storage ports for the menu application.

pub mod domain;
pub mod services;
pub mod repositories;
pub mod error;

// Re-export domain entities
pub use domain::*;
pub use error::{DomainError, StoreError};
