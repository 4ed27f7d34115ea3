//! MySQL implementation of the ReportingRepository trait.

use async_trait::async_trait;
use std::collections::HashMap;

use chrono::Utc;
use sqlx::{MySqlPool, Row};

use hb_core::domain::entities::enums::ReservationStatus;
use hb_core::errors::{DomainError, DomainResult};
use hb_core::repositories::ReportingRepository;

/// MySQL implementation of ReportingRepository
pub struct MySqlReportingRepository {
    pool: MySqlPool,
}

impl MySqlReportingRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReportingRepository for MySqlReportingRepository {
    async fn available_rooms_by_zone(&self) -> DomainResult<HashMap<String, i64>> {
        // A room counts as available when nothing occupies it right now
        let now = Utc::now();
        let rows = sqlx::query(
            r#"
            SELECT h.city AS zone, COUNT(*) AS available
            FROM room r
            JOIN hotel h ON h.id = r.hotel_id
            WHERE NOT EXISTS (
                SELECT 1 FROM reservation res
                WHERE res.room_id = r.id AND res.status <> ?
                  AND res.start_date <= ? AND res.end_date > ?
            )
            AND NOT EXISTS (
                SELECT 1 FROM stay s
                WHERE s.room_id = r.id
                  AND s.arrival_date <= ?
                  AND (s.departure_date IS NULL OR s.departure_date > ?)
            )
            GROUP BY h.city
            "#,
        )
        .bind(ReservationStatus::Cancelled as i32)
        .bind(now)
        .bind(now)
        .bind(now)
        .bind(now)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("available_rooms_by_zone", e.to_string()))?;

        let mut zones = HashMap::with_capacity(rows.len());
        for row in rows {
            let zone: String = row
                .try_get("zone")
                .map_err(|e| DomainError::database("available_rooms_by_zone", e.to_string()))?;
            let available: i64 = row
                .try_get("available")
                .map_err(|e| DomainError::database("available_rooms_by_zone", e.to_string()))?;
            zones.insert(zone, available);
        }
        Ok(zones)
    }

    async fn hotel_room_capacity(&self, hotel_id: i64) -> DomainResult<i64> {
        let hotel = sqlx::query("SELECT id FROM hotel WHERE id = ?")
            .bind(hotel_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("hotel_room_capacity", e.to_string()))?;
        if hotel.is_none() {
            return Err(DomainError::not_found("Hotel", hotel_id));
        }

        let row = sqlx::query(
            "SELECT CAST(COALESCE(SUM(capacity), 0) AS SIGNED) AS total FROM room WHERE hotel_id = ?",
        )
        .bind(hotel_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::database("hotel_room_capacity", e.to_string()))?;

        let total: i64 = row
            .try_get("total")
            .map_err(|e| DomainError::database("hotel_room_capacity", e.to_string()))?;
        Ok(total)
    }
}
