//! # Menu API
//! 
//! HTTP handlers, response envelope, error mapping and routing.

pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
