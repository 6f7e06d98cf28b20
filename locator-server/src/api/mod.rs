//! API routes for locator-server
//!
//! | Path | Method | |
//! |------|--------|---|
//! | /health | GET | liveness |
//! | /api/v1/upload | POST | multipart CSV upload, field `file` |
//! | /api/v1/findStore | GET | bounding-box search |
//! | /api/v1/recentStores | GET | stores updated in the last 5 minutes |
//! | /api/v1/allStoreDetails | GET | every store |

pub mod health;
pub mod stores;
pub mod upload;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use shared::error::{AppError, ErrorCode};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Create the combined router
pub fn create_router(state: AppState) -> Router {
    let v1 = Router::new()
        .route("/v1/upload", post(upload::upload_stores))
        .route("/v1/findStore", get(stores::find_store))
        .route("/v1/recentStores", get(stores::recent_stores))
        .route("/v1/allStoreDetails", get(stores::all_store_details));

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", v1)
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(state.max_upload_bytes))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn not_found() -> AppError {
    AppError::new(ErrorCode::NotFound)
}
