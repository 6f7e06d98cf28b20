//! Store Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One retail location as parsed from an upload (no timestamp yet)
///
/// `name` is the natural key; every other text column is copied verbatim and
/// is `None` when the uploaded file had no such column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct StoreRecord {
    pub name: String,
    pub display_name: Option<String>,
    /// Serialized with the historical `Address` casing
    #[serde(rename = "Address")]
    pub address: Option<String>,
    /// Degrees; `NaN` when the source value was not numeric
    pub latitude: f64,
    /// Degrees; `NaN` when the source value was not numeric
    pub longitude: f64,
    pub fax: Option<String>,
    pub email: Option<String>,
    pub sun_facing_amt: Option<String>,
    pub optical_facing_amt: Option<String>,
    pub phone_number: Option<String>,
    pub monday_time: Option<String>,
    pub tuesday_time: Option<String>,
    pub wednesday_time: Option<String>,
    pub thursday_time: Option<String>,
    pub friday_time: Option<String>,
    pub saturday_time: Option<String>,
    pub sunday_time: Option<String>,
}

impl StoreRecord {
    /// A record with only the key and coordinates set
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            display_name: None,
            address: None,
            latitude,
            longitude,
            fax: None,
            email: None,
            sun_facing_amt: None,
            optical_facing_amt: None,
            phone_number: None,
            monday_time: None,
            tuesday_time: None,
            wednesday_time: None,
            thursday_time: None,
            friday_time: None,
            saturday_time: None,
            sunday_time: None,
        }
    }

    /// Stamp the record with its write time
    pub fn into_store(self, updated_at: DateTime<Utc>) -> Store {
        Store {
            record: self,
            updated_at,
        }
    }
}

/// Persisted store row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Store {
    #[serde(flatten)]
    #[cfg_attr(feature = "db", sqlx(flatten))]
    pub record: StoreRecord,
    /// Refreshed on every upsert
    pub updated_at: DateTime<Utc>,
}

impl Store {
    pub fn name(&self) -> &str {
        &self.record.name
    }

    /// Inclusive containment; `NaN` coordinates are never contained
    pub fn within(&self, min_lat: f64, max_lat: f64, min_long: f64, max_long: f64) -> bool {
        let (lat, long) = (self.record.latitude, self.record.longitude);
        lat >= min_lat && lat <= max_lat && long >= min_long && long <= max_long
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_serializes_flat_with_address_casing() {
        let mut record = StoreRecord::new("S1", 12.5, 77.5);
        record.address = Some("1 Main St".into());
        let store = record.into_store(DateTime::from_timestamp(0, 0).unwrap());

        let json = serde_json::to_value(&store).unwrap();
        assert_eq!(json["name"], "S1");
        assert_eq!(json["Address"], "1 Main St");
        assert!(json.get("address").is_none());
        assert!(json.get("record").is_none());
        assert_eq!(json["latitude"], 12.5);
        assert_eq!(json["updated_at"], "1970-01-01T00:00:00Z");
    }

    #[test]
    fn test_nan_coordinates_serialize_as_null() {
        let store = StoreRecord::new("S2", f64::NAN, 77.0).into_store(Utc::now());
        let json = serde_json::to_value(&store).unwrap();
        assert!(json["latitude"].is_null());
        assert_eq!(json["longitude"], 77.0);
    }

    #[test]
    fn test_within_is_inclusive() {
        let store = StoreRecord::new("S1", 12.0, 78.0).into_store(Utc::now());
        assert!(store.within(12.0, 13.0, 77.0, 78.0));
        assert!(!store.within(12.5, 13.0, 77.0, 78.0));
        assert!(!store.within(12.0, 13.0, 77.0, 77.9));
    }

    #[test]
    fn test_within_excludes_nan() {
        let store = StoreRecord::new("S1", f64::NAN, 78.0).into_store(Utc::now());
        assert!(!store.within(f64::NEG_INFINITY, f64::INFINITY, 0.0, 100.0));
    }
}
