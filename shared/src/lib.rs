//! Shared types for the store locator
//!
//! Store models, the unified error system and small utilities used by the
//! locator server and its tests.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, ErrorCategory, ErrorCode};
pub use models::{Store, StoreRecord};
