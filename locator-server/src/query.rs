//! Store query service
//!
//! Three read-only lookups over the repository:
//! - bounding box (empty result is a not-found error)
//! - recently updated (empty result is an empty list)
//! - everything

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use shared::error::{AppError, ErrorCode};
use shared::models::Store;
use shared::util::lenient_f64;

use crate::db::{BoundingBox, StoreRepository};
use crate::error::ServiceResult;

/// Window for the "recent stores" lookup
pub const RECENT_WINDOW_SECS: i64 = 5 * 60;

/// Raw bounding-box query string
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeParams {
    pub min_lat: Option<String>,
    pub max_lat: Option<String>,
    pub min_long: Option<String>,
    pub max_long: Option<String>,
}

impl BoundingBox {
    /// All four bounds are required; an empty value counts as missing.
    ///
    /// Values that are not numeric become NaN rather than an error.
    pub fn from_params(params: &RangeParams) -> Result<Self, AppError> {
        fn present(v: &Option<String>) -> Option<&str> {
            v.as_deref().filter(|s| !s.is_empty())
        }

        let (Some(min_lat), Some(max_lat), Some(min_long), Some(max_long)) = (
            present(&params.min_lat),
            present(&params.max_lat),
            present(&params.min_long),
            present(&params.max_long),
        ) else {
            return Err(AppError::new(ErrorCode::RangeRequired));
        };

        Ok(Self {
            min_lat: lenient_f64(Some(min_lat)),
            max_lat: lenient_f64(Some(max_lat)),
            min_long: lenient_f64(Some(min_long)),
            max_long: lenient_f64(Some(max_long)),
        })
    }
}

/// Stores inside the box; `StoreNotFound` when nothing matches
pub async fn find_in_box(
    repo: &dyn StoreRepository,
    bbox: &BoundingBox,
) -> ServiceResult<Vec<Store>> {
    // NaN never satisfies a range comparison, so skip the round-trip
    let stores = if bbox.is_searchable() {
        repo.find_in_box(bbox).await?
    } else {
        Vec::new()
    };

    if stores.is_empty() {
        return Err(AppError::new(ErrorCode::StoreNotFound).into());
    }
    Ok(stores)
}

/// Stores updated within [`RECENT_WINDOW_SECS`] of `now`
pub async fn recent(repo: &dyn StoreRepository, now: DateTime<Utc>) -> ServiceResult<Vec<Store>> {
    let cutoff = now - Duration::seconds(RECENT_WINDOW_SECS);
    Ok(repo.updated_since(cutoff).await?)
}

pub async fn all(repo: &dyn StoreRepository) -> ServiceResult<Vec<Store>> {
    Ok(repo.list_all().await?)
}
