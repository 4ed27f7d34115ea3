//! MySQL implementation of the StayRepository trait.

use async_trait::async_trait;

use sqlx::{MySqlPool, Row};

use hb_core::domain::entities::stay::Stay;
use hb_core::errors::{DomainError, DomainResult};
use hb_core::repositories::StayRepository;

/// MySQL implementation of StayRepository
pub struct MySqlStayRepository {
    pool: MySqlPool,
}

impl MySqlStayRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_stay(row: &sqlx::mysql::MySqlRow) -> DomainResult<Stay> {
        Ok(Stay {
            id: row
                .try_get("id")
                .map_err(|e| DomainError::database("load_stay", format!("id: {e}")))?,
            client_id: row
                .try_get("client_id")
                .map_err(|e| DomainError::database("load_stay", format!("client_id: {e}")))?,
            room_id: row
                .try_get("room_id")
                .map_err(|e| DomainError::database("load_stay", format!("room_id: {e}")))?,
            reservation_id: row.try_get("reservation_id").map_err(|e| {
                DomainError::database("load_stay", format!("reservation_id: {e}"))
            })?,
            arrival_date: row
                .try_get("arrival_date")
                .map_err(|e| DomainError::database("load_stay", format!("arrival_date: {e}")))?,
            departure_date: row.try_get("departure_date").map_err(|e| {
                DomainError::database("load_stay", format!("departure_date: {e}"))
            })?,
            final_price: row
                .try_get("final_price")
                .map_err(|e| DomainError::database("load_stay", format!("final_price: {e}")))?,
            payment_method: row.try_get("payment_method").map_err(|e| {
                DomainError::database("load_stay", format!("payment_method: {e}"))
            })?,
            check_in_employee_id: row.try_get("check_in_employee_id").map_err(|e| {
                DomainError::database("load_stay", format!("check_in_employee_id: {e}"))
            })?,
            check_out_employee_id: row.try_get("check_out_employee_id").map_err(|e| {
                DomainError::database("load_stay", format!("check_out_employee_id: {e}"))
            })?,
            comments: row
                .try_get("comments")
                .map_err(|e| DomainError::database("load_stay", format!("comments: {e}")))?,
        })
    }
}

#[async_trait]
impl StayRepository for MySqlStayRepository {
    async fn save(&self, mut stay: Stay) -> DomainResult<Stay> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database("save_stay", e.to_string()))?;

        // Lock any stay still holding the room so racing check-ins serialize
        let occupied = sqlx::query(
            r#"
            SELECT id FROM stay
            WHERE room_id = ?
              AND (departure_date IS NULL OR departure_date > ?)
            LIMIT 1
            FOR UPDATE
            "#,
        )
        .bind(stay.room_id)
        .bind(stay.arrival_date)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| DomainError::database("save_stay", e.to_string()))?;

        if occupied.is_some() {
            return Err(DomainError::conflict(format!(
                "Room {} already has a stay in progress",
                stay.room_id
            )));
        }

        let result = sqlx::query(
            r#"
            INSERT INTO stay
                (client_id, room_id, reservation_id, arrival_date, departure_date,
                 final_price, payment_method, check_in_employee_id,
                 check_out_employee_id, comments)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(stay.client_id)
        .bind(stay.room_id)
        .bind(stay.reservation_id)
        .bind(stay.arrival_date)
        .bind(stay.departure_date)
        .bind(stay.final_price)
        .bind(&stay.payment_method)
        .bind(stay.check_in_employee_id)
        .bind(stay.check_out_employee_id)
        .bind(&stay.comments)
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::database("save_stay", e.to_string()))?;

        stay.id = result.last_insert_id() as i64;

        tx.commit()
            .await
            .map_err(|e| DomainError::database("save_stay", e.to_string()))?;
        Ok(stay)
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Stay>> {
        let row = sqlx::query("SELECT * FROM stay WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("find_stay", e.to_string()))?;

        row.map(|row| Self::row_to_stay(&row)).transpose()
    }

    async fn find_by_client(&self, client_id: i64) -> DomainResult<Vec<Stay>> {
        let rows = sqlx::query(
            "SELECT * FROM stay WHERE client_id = ? ORDER BY arrival_date DESC, id DESC",
        )
        .bind(client_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("find_stays_by_client", e.to_string()))?;

        rows.iter().map(Self::row_to_stay).collect()
    }

    async fn update(&self, stay: Stay) -> DomainResult<Stay> {
        // The close transition is guarded in SQL: writing a departure date
        // only lands on a still-open row, so a double checkout loses even
        // across processes.
        let result = if stay.departure_date.is_some() {
            sqlx::query(
                r#"
                UPDATE stay
                SET client_id = ?, room_id = ?, reservation_id = ?, arrival_date = ?,
                    departure_date = ?, final_price = ?, payment_method = ?,
                    check_in_employee_id = ?, check_out_employee_id = ?, comments = ?
                WHERE id = ? AND departure_date IS NULL
                "#,
            )
            .bind(stay.client_id)
            .bind(stay.room_id)
            .bind(stay.reservation_id)
            .bind(stay.arrival_date)
            .bind(stay.departure_date)
            .bind(stay.final_price)
            .bind(&stay.payment_method)
            .bind(stay.check_in_employee_id)
            .bind(stay.check_out_employee_id)
            .bind(&stay.comments)
            .bind(stay.id)
            .execute(&self.pool)
            .await
        } else {
            sqlx::query(
                r#"
                UPDATE stay
                SET client_id = ?, room_id = ?, reservation_id = ?, arrival_date = ?,
                    departure_date = NULL, final_price = ?, payment_method = ?,
                    check_in_employee_id = ?, check_out_employee_id = ?, comments = ?
                WHERE id = ?
                "#,
            )
            .bind(stay.client_id)
            .bind(stay.room_id)
            .bind(stay.reservation_id)
            .bind(stay.arrival_date)
            .bind(stay.final_price)
            .bind(&stay.payment_method)
            .bind(stay.check_in_employee_id)
            .bind(stay.check_out_employee_id)
            .bind(&stay.comments)
            .bind(stay.id)
            .execute(&self.pool)
            .await
        }
        .map_err(|e| DomainError::database("update_stay", e.to_string()))?;

        if result.rows_affected() == 0 {
            // Distinguish a missing row from a lost close race
            let existing = self.find_by_id(stay.id).await?;
            return match existing {
                Some(current) if stay.departure_date.is_some() && !current.is_open() => {
                    Err(DomainError::conflict(format!("Stay {} already ended", stay.id)))
                }
                Some(_) => Ok(stay),
                None => Err(DomainError::not_found("Stay", stay.id)),
            };
        }
        Ok(stay)
    }
}
