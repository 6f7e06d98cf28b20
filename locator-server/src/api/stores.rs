//! Store query handlers
//!
//! Failures render as `{"error": "..."}`.

use axum::Json;
use axum::extract::{Query, State};
use chrono::Utc;
use shared::models::Store;

use crate::db::BoundingBox;
use crate::error::ServiceResult;
use crate::query::{self, RangeParams};
use crate::state::AppState;

/// GET /api/v1/findStore?minLat=&maxLat=&minLong=&maxLong=
pub async fn find_store(
    State(state): State<AppState>,
    Query(params): Query<RangeParams>,
) -> ServiceResult<Json<Vec<Store>>> {
    let bbox = BoundingBox::from_params(&params)?;
    let stores = query::find_in_box(state.stores.as_ref(), &bbox).await?;
    tracing::debug!(count = stores.len(), ?bbox, "findStore");
    Ok(Json(stores))
}

/// GET /api/v1/recentStores
pub async fn recent_stores(State(state): State<AppState>) -> ServiceResult<Json<Vec<Store>>> {
    let stores = query::recent(state.stores.as_ref(), Utc::now()).await?;
    Ok(Json(stores))
}

/// GET /api/v1/allStoreDetails
pub async fn all_store_details(State(state): State<AppState>) -> ServiceResult<Json<Vec<Store>>> {
    let stores = query::all(state.stores.as_ref()).await?;
    Ok(Json(stores))
}
