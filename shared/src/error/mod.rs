//! Unified error system for the store locator
//!
//! - [`ErrorCode`]: Standardized error codes
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Error type with code, message and optional cause
//! - [`ErrorBody`] / [`MessageBody`]: the two JSON shapes the HTTP surface returns
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Ingestion errors
//! - 2xxx: Query errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode};
//!
//! let err = AppError::new(ErrorCode::StoreNotFound);
//! assert_eq!(err.http_status(), shared::http::StatusCode::NOT_FOUND);
//!
//! let err = AppError::with_message(ErrorCode::DatabaseError, "Database error.")
//!     .with_cause("duplicate key value violates unique constraint");
//! assert!(err.cause.is_some());
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{AppError, ErrorBody, MessageBody};
