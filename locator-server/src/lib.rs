//! locator-server: retail store directory service
//!
//! Ingests store lists uploaded as CSV into PostgreSQL and answers
//! bounding-box, recently-updated and full-listing queries over HTTP.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod ingest;
pub mod query;
pub mod state;

pub use config::Config;
pub use state::AppState;
