//! MySQL implementation of the ReservationRepository trait.
//!
//! The insert runs in a transaction that re-checks for an overlapping
//! occupancy with `SELECT ... FOR UPDATE` on the room's reservation and stay
//! rows. Two racing bookings serialize on those row locks; the loser sees
//! the winner's row and gets a Conflict.

use async_trait::async_trait;

use chrono::{DateTime, Utc};
use sqlx::{MySql, MySqlPool, Row, Transaction};
use tracing::warn;

use hb_core::domain::entities::enums::ReservationStatus;
use hb_core::domain::entities::reservation::Reservation;
use hb_core::errors::{DomainError, DomainResult};
use hb_core::repositories::ReservationRepository;

/// MySQL implementation of ReservationRepository
pub struct MySqlReservationRepository {
    pool: MySqlPool,
}

impl MySqlReservationRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_reservation(row: &sqlx::mysql::MySqlRow) -> DomainResult<Reservation> {
        let status_raw: i32 = row
            .try_get("status")
            .map_err(|e| DomainError::database("load_reservation", format!("status: {e}")))?;
        let status = ReservationStatus::from_i32(status_raw).ok_or_else(|| {
            DomainError::database("load_reservation", format!("unknown status {status_raw}"))
        })?;

        Ok(Reservation {
            id: row
                .try_get("id")
                .map_err(|e| DomainError::database("load_reservation", format!("id: {e}")))?,
            client_id: row.try_get("client_id").map_err(|e| {
                DomainError::database("load_reservation", format!("client_id: {e}"))
            })?,
            hotel_id: row.try_get("hotel_id").map_err(|e| {
                DomainError::database("load_reservation", format!("hotel_id: {e}"))
            })?,
            room_id: row
                .try_get("room_id")
                .map_err(|e| DomainError::database("load_reservation", format!("room_id: {e}")))?,
            start_date: row.try_get("start_date").map_err(|e| {
                DomainError::database("load_reservation", format!("start_date: {e}"))
            })?,
            end_date: row.try_get("end_date").map_err(|e| {
                DomainError::database("load_reservation", format!("end_date: {e}"))
            })?,
            total_price: row.try_get("total_price").map_err(|e| {
                DomainError::database("load_reservation", format!("total_price: {e}"))
            })?,
            reservation_date: row.try_get("reservation_date").map_err(|e| {
                DomainError::database("load_reservation", format!("reservation_date: {e}"))
            })?,
            status,
        })
    }

    /// Lock and count active occupancies of the room overlapping
    /// `[start, end)`. Row locks serialize racing inserts.
    async fn overlapping_locked(
        tx: &mut Transaction<'_, MySql>,
        room_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> DomainResult<bool> {
        let reservation = sqlx::query(
            r#"
            SELECT id FROM reservation
            WHERE room_id = ? AND status <> ?
              AND start_date < ? AND end_date > ?
            LIMIT 1
            FOR UPDATE
            "#,
        )
        .bind(room_id)
        .bind(ReservationStatus::Cancelled as i32)
        .bind(end)
        .bind(start)
        .fetch_optional(&mut **tx)
        .await
        .map_err(|e| DomainError::database("check_reservation_overlap", e.to_string()))?;
        if reservation.is_some() {
            return Ok(true);
        }

        // Open stays (departure_date NULL) block every future interval
        let stay = sqlx::query(
            r#"
            SELECT id FROM stay
            WHERE room_id = ?
              AND arrival_date < ?
              AND (departure_date IS NULL OR departure_date > ?)
            LIMIT 1
            FOR UPDATE
            "#,
        )
        .bind(room_id)
        .bind(end)
        .bind(start)
        .fetch_optional(&mut **tx)
        .await
        .map_err(|e| DomainError::database("check_stay_overlap", e.to_string()))?;
        Ok(stay.is_some())
    }
}

#[async_trait]
impl ReservationRepository for MySqlReservationRepository {
    async fn save(&self, mut reservation: Reservation) -> DomainResult<Reservation> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database("save_reservation", e.to_string()))?;

        if Self::overlapping_locked(
            &mut tx,
            reservation.room_id,
            reservation.start_date,
            reservation.end_date,
        )
        .await?
        {
            warn!(
                room_id = reservation.room_id,
                client_id = reservation.client_id,
                "booking lost the race for the room"
            );
            return Err(DomainError::conflict(format!(
                "Room {} is already occupied over the requested dates",
                reservation.room_id
            )));
        }

        let result = sqlx::query(
            r#"
            INSERT INTO reservation
                (client_id, hotel_id, room_id, start_date, end_date,
                 total_price, reservation_date, status)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(reservation.client_id)
        .bind(reservation.hotel_id)
        .bind(reservation.room_id)
        .bind(reservation.start_date)
        .bind(reservation.end_date)
        .bind(reservation.total_price)
        .bind(reservation.reservation_date)
        .bind(reservation.status as i32)
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::database("save_reservation", e.to_string()))?;

        reservation.id = result.last_insert_id() as i64;
        tx.commit()
            .await
            .map_err(|e| DomainError::database("save_reservation", e.to_string()))?;
        Ok(reservation)
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Reservation>> {
        let row = sqlx::query("SELECT * FROM reservation WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("find_reservation", e.to_string()))?;

        row.map(|row| Self::row_to_reservation(&row)).transpose()
    }

    async fn find_by_client(&self, client_id: i64) -> DomainResult<Vec<Reservation>> {
        let rows = sqlx::query(
            "SELECT * FROM reservation WHERE client_id = ? ORDER BY reservation_date DESC, id DESC",
        )
        .bind(client_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("find_reservations_by_client", e.to_string()))?;

        rows.iter().map(Self::row_to_reservation).collect()
    }

    async fn update(&self, reservation: Reservation) -> DomainResult<Reservation> {
        let result = sqlx::query(
            r#"
            UPDATE reservation
            SET client_id = ?, hotel_id = ?, room_id = ?, start_date = ?,
                end_date = ?, total_price = ?, status = ?
            WHERE id = ?
            "#,
        )
        .bind(reservation.client_id)
        .bind(reservation.hotel_id)
        .bind(reservation.room_id)
        .bind(reservation.start_date)
        .bind(reservation.end_date)
        .bind(reservation.total_price)
        .bind(reservation.status as i32)
        .bind(reservation.id)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("update_reservation", e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("Reservation", reservation.id));
        }
        Ok(reservation)
    }

    async fn delete(&self, id: i64) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM reservation WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("delete_reservation", e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("Reservation", id));
        }
        Ok(())
    }
}
