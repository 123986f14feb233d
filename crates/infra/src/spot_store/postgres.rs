//! Postgres-backed spot store.
//!
//! Expects the persisted shape of the spot record:
//!
//! ```sql
//! CREATE TABLE parking_spots (
//!     id        INT PRIMARY KEY,
//!     type      TEXT NOT NULL,
//!     available BOOLEAN NOT NULL
//! );
//! ```
//!
//! The `SpotStore` trait is synchronous while sqlx is async; operations are
//! bridged with `tokio::runtime::Handle`, so this store must be called from
//! within a tokio runtime (the axum handlers are).

use std::sync::Arc;

use sqlx::PgPool;
use tracing::instrument;

use parklot_core::{SpotId, VehicleType};

use super::r#trait::{SpotStore, SpotStoreError};

#[derive(Debug, Clone)]
pub struct PostgresSpotStore {
    pool: Arc<PgPool>,
}

impl PostgresSpotStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    #[instrument(skip(self), err)]
    async fn find_next_available_async(
        &self,
        vehicle_type: VehicleType,
    ) -> Result<Option<SpotId>, SpotStoreError> {
        let id: Option<i32> = sqlx::query_scalar(
            r#"
            SELECT id
            FROM parking_spots
            WHERE type = $1 AND available
            ORDER BY id ASC
            LIMIT 1
            "#,
        )
        .bind(vehicle_type.as_str())
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_next_available", &e))?;

        Ok(id.map(SpotId::new))
    }

    #[instrument(skip(self), err)]
    async fn set_availability_async(
        &self,
        spot_id: SpotId,
        available: bool,
    ) -> Result<(), SpotStoreError> {
        let result = sqlx::query(
            r#"
            UPDATE parking_spots
            SET available = $2
            WHERE id = $1
            "#,
        )
        .bind(spot_id.get())
        .bind(available)
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("set_availability", &e))?;

        if result.rows_affected() == 0 {
            return Err(SpotStoreError::UnknownSpot(spot_id));
        }
        Ok(())
    }
}

impl SpotStore for PostgresSpotStore {
    fn find_next_available(
        &self,
        vehicle_type: VehicleType,
    ) -> Result<Option<SpotId>, SpotStoreError> {
        runtime_handle()?.block_on(self.find_next_available_async(vehicle_type))
    }

    fn set_availability(&self, spot_id: SpotId, available: bool) -> Result<(), SpotStoreError> {
        runtime_handle()?.block_on(self.set_availability_async(spot_id, available))
    }
}

fn runtime_handle() -> Result<tokio::runtime::Handle, SpotStoreError> {
    tokio::runtime::Handle::try_current().map_err(|_| {
        SpotStoreError::Backend(
            "PostgresSpotStore requires a tokio runtime context".to_string(),
        )
    })
}

fn map_sqlx_error(operation: &str, error: &sqlx::Error) -> SpotStoreError {
    SpotStoreError::Backend(format!("{operation}: {error}"))
}
