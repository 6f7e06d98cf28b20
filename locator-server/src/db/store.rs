//! PostgreSQL-backed store repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::models::{Store, StoreRecord};
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::{BoundingBox, BoxError, StoreRepository};

const STORE_COLUMNS: &str = "name, display_name, address, latitude, longitude, fax, email, \
    sun_facing_amt, optical_facing_amt, phone_number, monday_time, tuesday_time, \
    wednesday_time, thursday_time, friday_time, saturday_time, sunday_time, updated_at";

/// Every column except the conflict key
const UPDATE_COLUMNS: &[&str] = &[
    "display_name",
    "address",
    "latitude",
    "longitude",
    "fax",
    "email",
    "sun_facing_amt",
    "optical_facing_amt",
    "phone_number",
    "monday_time",
    "tuesday_time",
    "wednesday_time",
    "thursday_time",
    "friday_time",
    "saturday_time",
    "sunday_time",
    "updated_at",
];

/// Binds per row in the upsert statement
const BINDS_PER_ROW: usize = 18;

/// PostgreSQL accepts at most 65535 bind parameters per statement
const UPSERT_CHUNK_ROWS: usize = u16::MAX as usize / BINDS_PER_ROW;

pub struct PgStoreRepository {
    pool: PgPool,
}

impl PgStoreRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn upsert_suffix() -> String {
    let assignments: Vec<String> = UPDATE_COLUMNS
        .iter()
        .map(|col| format!("{col} = EXCLUDED.{col}"))
        .collect();
    format!(" ON CONFLICT (name) DO UPDATE SET {}", assignments.join(", "))
}

#[async_trait]
impl StoreRepository for PgStoreRepository {
    async fn upsert_many(
        &self,
        records: &[StoreRecord],
        updated_at: DateTime<Utc>,
    ) -> Result<u64, BoxError> {
        let suffix = upsert_suffix();
        let mut affected = 0;
        let mut tx = self.pool.begin().await?;

        for chunk in records.chunks(UPSERT_CHUNK_ROWS) {
            let mut qb: QueryBuilder<Postgres> =
                QueryBuilder::new(format!("INSERT INTO store ({STORE_COLUMNS}) "));
            qb.push_values(chunk, |mut row, s| {
                row.push_bind(s.name.clone())
                    .push_bind(s.display_name.clone())
                    .push_bind(s.address.clone())
                    .push_bind(s.latitude)
                    .push_bind(s.longitude)
                    .push_bind(s.fax.clone())
                    .push_bind(s.email.clone())
                    .push_bind(s.sun_facing_amt.clone())
                    .push_bind(s.optical_facing_amt.clone())
                    .push_bind(s.phone_number.clone())
                    .push_bind(s.monday_time.clone())
                    .push_bind(s.tuesday_time.clone())
                    .push_bind(s.wednesday_time.clone())
                    .push_bind(s.thursday_time.clone())
                    .push_bind(s.friday_time.clone())
                    .push_bind(s.saturday_time.clone())
                    .push_bind(s.sunday_time.clone())
                    .push_bind(updated_at);
            });
            qb.push(&suffix);

            affected += qb.build().execute(&mut *tx).await?.rows_affected();
        }

        tx.commit().await?;
        Ok(affected)
    }

    async fn find_in_box(&self, bbox: &BoundingBox) -> Result<Vec<Store>, BoxError> {
        let rows = sqlx::query_as::<_, Store>(&format!(
            "SELECT {STORE_COLUMNS} FROM store
            WHERE latitude BETWEEN $1 AND $2
              AND longitude BETWEEN $3 AND $4
            ORDER BY name"
        ))
        .bind(bbox.min_lat)
        .bind(bbox.max_lat)
        .bind(bbox.min_long)
        .bind(bbox.max_long)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn updated_since(&self, cutoff: DateTime<Utc>) -> Result<Vec<Store>, BoxError> {
        let rows = sqlx::query_as::<_, Store>(&format!(
            "SELECT {STORE_COLUMNS} FROM store WHERE updated_at >= $1 ORDER BY name"
        ))
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn list_all(&self) -> Result<Vec<Store>, BoxError> {
        let rows =
            sqlx::query_as::<_, Store>(&format!("SELECT {STORE_COLUMNS} FROM store ORDER BY name"))
                .fetch_all(&self.pool)
                .await?;
        Ok(rows)
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
