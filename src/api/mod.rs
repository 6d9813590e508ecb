//! HTTP API for the study assistant backend.

pub mod error;
pub mod handlers;

pub use error::ApiError;
pub use handlers::AppState;
