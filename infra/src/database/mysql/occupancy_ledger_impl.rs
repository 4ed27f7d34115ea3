//! MySQL implementation of the OccupancyLedger trait.
//!
//! The ledger is a read-only view derived from the `reservation` and `stay`
//! tables; writes go through the reservation lifecycle and the front desk.

use async_trait::async_trait;
use std::collections::HashSet;

use chrono::{DateTime, Utc};
use sqlx::{MySql, MySqlPool, QueryBuilder, Row};

use hb_core::domain::entities::enums::ReservationStatus;
use hb_core::domain::value_objects::occupancy::Occupancy;
use hb_core::errors::{DomainError, DomainResult};
use hb_core::repositories::OccupancyLedger;

/// MySQL implementation of OccupancyLedger
pub struct MySqlOccupancyLedger {
    pool: MySqlPool,
}

impl MySqlOccupancyLedger {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OccupancyLedger for MySqlOccupancyLedger {
    async fn active_occupancies(&self, room_id: i64) -> DomainResult<Vec<Occupancy>> {
        let mut occupancies = Vec::new();

        let rows = sqlx::query(
            "SELECT start_date, end_date FROM reservation WHERE room_id = ? AND status <> ?",
        )
        .bind(room_id)
        .bind(ReservationStatus::Cancelled as i32)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("load_reservation_occupancies", e.to_string()))?;
        for row in rows {
            let start: DateTime<Utc> = row.try_get("start_date").map_err(|e| {
                DomainError::database("load_reservation_occupancies", e.to_string())
            })?;
            let end: DateTime<Utc> = row.try_get("end_date").map_err(|e| {
                DomainError::database("load_reservation_occupancies", e.to_string())
            })?;
            occupancies.push(Occupancy::reservation(room_id, start, end));
        }

        let rows = sqlx::query("SELECT arrival_date, departure_date FROM stay WHERE room_id = ?")
            .bind(room_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database("load_stay_occupancies", e.to_string()))?;
        for row in rows {
            let arrival: DateTime<Utc> = row
                .try_get("arrival_date")
                .map_err(|e| DomainError::database("load_stay_occupancies", e.to_string()))?;
            let departure: Option<DateTime<Utc>> = row
                .try_get("departure_date")
                .map_err(|e| DomainError::database("load_stay_occupancies", e.to_string()))?;
            occupancies.push(Occupancy::stay(room_id, arrival, departure));
        }

        Ok(occupancies)
    }

    async fn has_overlap(
        &self,
        room_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> DomainResult<bool> {
        let row = sqlx::query(
            r#"
            SELECT (
                EXISTS (
                    SELECT 1 FROM reservation
                    WHERE room_id = ? AND status <> ?
                      AND start_date < ? AND end_date > ?
                )
                OR EXISTS (
                    SELECT 1 FROM stay
                    WHERE room_id = ?
                      AND arrival_date < ?
                      AND (departure_date IS NULL OR departure_date > ?)
                )
            ) AS occupied
            "#,
        )
        .bind(room_id)
        .bind(ReservationStatus::Cancelled as i32)
        .bind(end)
        .bind(start)
        .bind(room_id)
        .bind(end)
        .bind(start)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::database("check_occupancy_overlap", e.to_string()))?;

        let occupied: i64 = row
            .try_get("occupied")
            .map_err(|e| DomainError::database("check_occupancy_overlap", e.to_string()))?;
        Ok(occupied != 0)
    }

    async fn occupied_rooms(
        &self,
        room_ids: &[i64],
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> DomainResult<HashSet<i64>> {
        if room_ids.is_empty() {
            return Ok(HashSet::new());
        }

        let mut builder: QueryBuilder<MySql> =
            QueryBuilder::new("SELECT room_id FROM reservation WHERE status <> ");
        builder.push_bind(ReservationStatus::Cancelled as i32);
        builder.push(" AND start_date < ").push_bind(end);
        builder.push(" AND end_date > ").push_bind(start);
        builder.push(" AND room_id IN (");
        {
            let mut separated = builder.separated(", ");
            for id in room_ids {
                separated.push_bind(*id);
            }
        }
        builder.push(") UNION SELECT room_id FROM stay WHERE arrival_date < ");
        builder.push_bind(end);
        builder.push(" AND (departure_date IS NULL OR departure_date > ");
        builder.push_bind(start);
        builder.push(") AND room_id IN (");
        {
            let mut separated = builder.separated(", ");
            for id in room_ids {
                separated.push_bind(*id);
            }
        }
        builder.push(")");

        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database("batch_occupancy_check", e.to_string()))?;

        let mut occupied = HashSet::new();
        for row in rows {
            let room_id: i64 = row
                .try_get("room_id")
                .map_err(|e| DomainError::database("batch_occupancy_check", e.to_string()))?;
            occupied.insert(room_id);
        }
        Ok(occupied)
    }
}
