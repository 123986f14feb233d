//! Postgres-backed ticket store.
//!
//! Expects the persisted shape of the ticket record:
//!
//! ```sql
//! CREATE TABLE tickets (
//!     id                 SERIAL PRIMARY KEY,
//!     spot_id            INT NOT NULL REFERENCES parking_spots (id),
//!     vehicle_reg_number TEXT NOT NULL,
//!     price              DOUBLE PRECISION NOT NULL DEFAULT 0,
//!     in_time            TIMESTAMPTZ NOT NULL,
//!     out_time           TIMESTAMPTZ
//! );
//! ```
//!
//! Same sync-over-async bridging as the spot store: must be called from
//! within a tokio runtime.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};
use tracing::instrument;

use parklot_core::{SpotId, TicketId, VehicleType};
use parklot_lot::{ParkingSpot, Ticket};

use super::r#trait::{TicketStore, TicketStoreError};

#[derive(Debug, Clone)]
pub struct PostgresTicketStore {
    pool: Arc<PgPool>,
}

impl PostgresTicketStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    #[instrument(skip(self, ticket), err)]
    async fn save_async(&self, ticket: Ticket) -> Result<TicketId, TicketStoreError> {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO tickets (spot_id, vehicle_reg_number, price, in_time, out_time)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(ticket.spot.id.get())
        .bind(&ticket.vehicle_reg_number)
        .bind(ticket.price)
        .bind(ticket.in_time)
        .bind(ticket.out_time)
        .fetch_one(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("save", &e))?;

        Ok(TicketId::new(id))
    }

    #[instrument(skip(self), err)]
    async fn get_open_ticket_async(
        &self,
        reg_number: &str,
    ) -> Result<Option<Ticket>, TicketStoreError> {
        let row = sqlx::query(
            r#"
            SELECT t.id, t.spot_id, s.type AS spot_type, s.available,
                   t.vehicle_reg_number, t.price, t.in_time, t.out_time
            FROM tickets t
            JOIN parking_spots s ON s.id = t.spot_id
            WHERE t.vehicle_reg_number = $1 AND t.out_time IS NULL
            ORDER BY t.id DESC
            LIMIT 1
            "#,
        )
        .bind(reg_number)
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("get_open_ticket", &e))?;

        row.map(ticket_from_row).transpose()
    }

    #[instrument(skip(self, ticket), fields(ticket_id = %ticket.id), err)]
    async fn update_async(&self, ticket: &Ticket) -> Result<(), TicketStoreError> {
        let result = sqlx::query(
            r#"
            UPDATE tickets
            SET price = $2, out_time = $3
            WHERE id = $1
            "#,
        )
        .bind(ticket.id.get())
        .bind(ticket.price)
        .bind(ticket.out_time)
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("update", &e))?;

        if result.rows_affected() == 0 {
            return Err(TicketStoreError::UnknownTicket(ticket.id));
        }
        Ok(())
    }

    #[instrument(skip(self), err)]
    async fn count_completed_async(&self, reg_number: &str) -> Result<u64, TicketStoreError> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM tickets
            WHERE vehicle_reg_number = $1 AND out_time IS NOT NULL
            "#,
        )
        .bind(reg_number)
        .fetch_one(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("count_completed", &e))?;

        Ok(count.max(0) as u64)
    }
}

impl TicketStore for PostgresTicketStore {
    fn save(&self, ticket: Ticket) -> Result<TicketId, TicketStoreError> {
        runtime_handle()?.block_on(self.save_async(ticket))
    }

    fn get_open_ticket(&self, reg_number: &str) -> Result<Option<Ticket>, TicketStoreError> {
        runtime_handle()?.block_on(self.get_open_ticket_async(reg_number))
    }

    fn update(&self, ticket: &Ticket) -> Result<(), TicketStoreError> {
        runtime_handle()?.block_on(self.update_async(ticket))
    }

    fn count_completed(&self, reg_number: &str) -> Result<u64, TicketStoreError> {
        runtime_handle()?.block_on(self.count_completed_async(reg_number))
    }
}

fn ticket_from_row(row: sqlx::postgres::PgRow) -> Result<Ticket, TicketStoreError> {
    let read = |e: sqlx::Error| TicketStoreError::Backend(format!("ticket row: {e}"));

    let spot_type: String = row.try_get("spot_type").map_err(read)?;
    let vehicle_type: VehicleType = spot_type
        .parse()
        .map_err(|e| TicketStoreError::Backend(format!("ticket row: {e}")))?;

    let spot = ParkingSpot::new(
        SpotId::new(row.try_get::<i32, _>("spot_id").map_err(read)?),
        vehicle_type,
        row.try_get("available").map_err(read)?,
    );

    Ok(Ticket {
        id: TicketId::new(row.try_get::<i32, _>("id").map_err(read)?),
        spot,
        vehicle_reg_number: row.try_get("vehicle_reg_number").map_err(read)?,
        price: row.try_get("price").map_err(read)?,
        in_time: row.try_get::<DateTime<Utc>, _>("in_time").map_err(read)?,
        out_time: row
            .try_get::<Option<DateTime<Utc>>, _>("out_time")
            .map_err(read)?,
    })
}

fn runtime_handle() -> Result<tokio::runtime::Handle, TicketStoreError> {
    tokio::runtime::Handle::try_current().map_err(|_| {
        TicketStoreError::Backend(
            "PostgresTicketStore requires a tokio runtime context".to_string(),
        )
    })
}

fn map_sqlx_error(operation: &str, error: &sqlx::Error) -> TicketStoreError {
    TicketStoreError::Backend(format!("{operation}: {error}"))
}
