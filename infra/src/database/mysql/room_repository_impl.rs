//! MySQL implementation of the RoomRepository trait.
//!
//! A room row spans four tables: `room` itself plus the dependent
//! `room_view_type`, `room_amenity` and `problem` tables. Saves and updates
//! run in one transaction and replace the dependent rows wholesale, so the
//! persisted sets always equal the entity's sets.

use async_trait::async_trait;
use std::collections::HashSet;

use sqlx::{MySql, MySqlPool, QueryBuilder, Row, Transaction};

use hb_core::domain::entities::enums::{Amenity, ProblemSeverity, RoomType, ViewType};
use hb_core::domain::entities::problem::Problem;
use hb_core::domain::entities::room::Room;
use hb_core::domain::value_objects::room_search::RoomSearchFilters;
use hb_core::errors::{DomainError, DomainResult};
use hb_core::repositories::RoomRepository;

/// MySQL implementation of RoomRepository
pub struct MySqlRoomRepository {
    pool: MySqlPool,
}

impl MySqlRoomRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_room(row: &sqlx::mysql::MySqlRow) -> DomainResult<Room> {
        let room_type_raw: i32 = row
            .try_get("room_type")
            .map_err(|e| DomainError::database("load_room", format!("room_type: {e}")))?;
        let room_type = RoomType::from_i32(room_type_raw).ok_or_else(|| {
            DomainError::database("load_room", format!("unknown room_type {room_type_raw}"))
        })?;

        Ok(Room {
            id: row
                .try_get("id")
                .map_err(|e| DomainError::database("load_room", format!("id: {e}")))?,
            hotel_id: row
                .try_get("hotel_id")
                .map_err(|e| DomainError::database("load_room", format!("hotel_id: {e}")))?,
            number: row
                .try_get("number")
                .map_err(|e| DomainError::database("load_room", format!("number: {e}")))?,
            floor: row
                .try_get("floor")
                .map_err(|e| DomainError::database("load_room", format!("floor: {e}")))?,
            capacity: row
                .try_get("capacity")
                .map_err(|e| DomainError::database("load_room", format!("capacity: {e}")))?,
            surface_area: row
                .try_get("surface_area")
                .map_err(|e| DomainError::database("load_room", format!("surface_area: {e}")))?,
            price: row
                .try_get("price")
                .map_err(|e| DomainError::database("load_room", format!("price: {e}")))?,
            telephone: row
                .try_get("telephone")
                .map_err(|e| DomainError::database("load_room", format!("telephone: {e}")))?,
            room_type,
            is_extensible: row
                .try_get("is_extensible")
                .map_err(|e| DomainError::database("load_room", format!("is_extensible: {e}")))?,
            view_types: HashSet::new(),
            amenities: HashSet::new(),
            problems: Vec::new(),
        })
    }

    /// Load the dependent sets of one room
    async fn hydrate(&self, room: &mut Room) -> DomainResult<()> {
        let rows = sqlx::query("SELECT view_type FROM room_view_type WHERE room_id = ?")
            .bind(room.id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database("load_room_view_types", e.to_string()))?;
        for row in rows {
            let raw: i32 = row
                .try_get("view_type")
                .map_err(|e| DomainError::database("load_room_view_types", e.to_string()))?;
            let view_type = ViewType::from_i32(raw).ok_or_else(|| {
                DomainError::database("load_room_view_types", format!("unknown view_type {raw}"))
            })?;
            room.view_types.insert(view_type);
        }

        let rows = sqlx::query("SELECT amenity FROM room_amenity WHERE room_id = ?")
            .bind(room.id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database("load_room_amenities", e.to_string()))?;
        for row in rows {
            let raw: i32 = row
                .try_get("amenity")
                .map_err(|e| DomainError::database("load_room_amenities", e.to_string()))?;
            let amenity = Amenity::from_i32(raw).ok_or_else(|| {
                DomainError::database("load_room_amenities", format!("unknown amenity {raw}"))
            })?;
            room.amenities.insert(amenity);
        }

        let rows = sqlx::query(
            r#"
            SELECT id, severity, description, signaled_when, is_resolved, resolution_date
            FROM problem
            WHERE room_id = ?
            ORDER BY id
            "#,
        )
        .bind(room.id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("load_room_problems", e.to_string()))?;
        for row in rows {
            let severity_raw: i32 = row
                .try_get("severity")
                .map_err(|e| DomainError::database("load_room_problems", e.to_string()))?;
            let severity = ProblemSeverity::from_i32(severity_raw).ok_or_else(|| {
                DomainError::database(
                    "load_room_problems",
                    format!("unknown severity {severity_raw}"),
                )
            })?;
            room.problems.push(Problem {
                id: row
                    .try_get("id")
                    .map_err(|e| DomainError::database("load_room_problems", e.to_string()))?,
                severity,
                description: row
                    .try_get("description")
                    .map_err(|e| DomainError::database("load_room_problems", e.to_string()))?,
                signaled_when: row
                    .try_get("signaled_when")
                    .map_err(|e| DomainError::database("load_room_problems", e.to_string()))?,
                is_resolved: row
                    .try_get("is_resolved")
                    .map_err(|e| DomainError::database("load_room_problems", e.to_string()))?,
                resolution_date: row
                    .try_get("resolution_date")
                    .map_err(|e| DomainError::database("load_room_problems", e.to_string()))?,
            });
        }

        Ok(())
    }

    /// Insert the dependent rows of a room within a transaction
    async fn insert_dependents(
        tx: &mut Transaction<'_, MySql>,
        room: &Room,
    ) -> DomainResult<()> {
        for view_type in &room.view_types {
            sqlx::query("INSERT INTO room_view_type (room_id, view_type) VALUES (?, ?)")
                .bind(room.id)
                .bind(*view_type as i32)
                .execute(&mut **tx)
                .await
                .map_err(|e| DomainError::database("save_room_view_types", e.to_string()))?;
        }
        for amenity in &room.amenities {
            sqlx::query("INSERT INTO room_amenity (room_id, amenity) VALUES (?, ?)")
                .bind(room.id)
                .bind(*amenity as i32)
                .execute(&mut **tx)
                .await
                .map_err(|e| DomainError::database("save_room_amenities", e.to_string()))?;
        }
        for problem in &room.problems {
            sqlx::query(
                r#"
                INSERT INTO problem
                    (room_id, severity, description, signaled_when, is_resolved, resolution_date)
                VALUES (?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(room.id)
            .bind(problem.severity as i32)
            .bind(&problem.description)
            .bind(problem.signaled_when)
            .bind(problem.is_resolved)
            .bind(problem.resolution_date)
            .execute(&mut **tx)
            .await
            .map_err(|e| DomainError::database("save_room_problems", e.to_string()))?;
        }
        Ok(())
    }

    async fn delete_dependents(
        tx: &mut Transaction<'_, MySql>,
        room_id: i64,
    ) -> DomainResult<()> {
        for (query, operation) in [
            ("DELETE FROM room_view_type WHERE room_id = ?", "clear_room_view_types"),
            ("DELETE FROM room_amenity WHERE room_id = ?", "clear_room_amenities"),
            ("DELETE FROM problem WHERE room_id = ?", "clear_room_problems"),
        ] {
            sqlx::query(query)
                .bind(room_id)
                .execute(&mut **tx)
                .await
                .map_err(|e| DomainError::database(operation, e.to_string()))?;
        }
        Ok(())
    }
}

#[async_trait]
impl RoomRepository for MySqlRoomRepository {
    async fn save(&self, mut room: Room) -> DomainResult<Room> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database("save_room", e.to_string()))?;

        let duplicate = sqlx::query("SELECT id FROM room WHERE hotel_id = ? AND number = ?")
            .bind(room.hotel_id)
            .bind(&room.number)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| DomainError::database("save_room", e.to_string()))?;
        if duplicate.is_some() {
            return Err(DomainError::conflict(format!(
                "Room number {} already exists in hotel {}",
                room.number, room.hotel_id
            )));
        }

        let result = sqlx::query(
            r#"
            INSERT INTO room
                (hotel_id, number, floor, capacity, surface_area, price,
                 telephone, room_type, is_extensible)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(room.hotel_id)
        .bind(&room.number)
        .bind(&room.floor)
        .bind(room.capacity)
        .bind(room.surface_area)
        .bind(room.price)
        .bind(&room.telephone)
        .bind(room.room_type as i32)
        .bind(room.is_extensible)
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::database("save_room", e.to_string()))?;

        room.id = result.last_insert_id() as i64;
        Self::insert_dependents(&mut tx, &room).await?;

        tx.commit()
            .await
            .map_err(|e| DomainError::database("save_room", e.to_string()))?;
        Ok(room)
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Room>> {
        let row = sqlx::query("SELECT * FROM room WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("find_room", e.to_string()))?;

        match row {
            Some(row) => {
                let mut room = Self::row_to_room(&row)?;
                self.hydrate(&mut room).await?;
                Ok(Some(room))
            }
            None => Ok(None),
        }
    }

    async fn find_by_hotel(&self, hotel_id: i64) -> DomainResult<Vec<Room>> {
        let rows = sqlx::query("SELECT * FROM room WHERE hotel_id = ? ORDER BY id")
            .bind(hotel_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database("find_rooms_by_hotel", e.to_string()))?;

        let mut rooms = Vec::with_capacity(rows.len());
        for row in &rows {
            let mut room = Self::row_to_room(row)?;
            self.hydrate(&mut room).await?;
            rooms.push(room);
        }
        Ok(rooms)
    }

    async fn search_by_attributes(&self, filters: &RoomSearchFilters) -> DomainResult<Vec<Room>> {
        let mut builder: QueryBuilder<MySql> = QueryBuilder::new(
            "SELECT r.* FROM room r JOIN hotel h ON h.id = r.hotel_id WHERE 1 = 1",
        );
        if let Some(capacity) = filters.min_capacity {
            builder.push(" AND r.capacity >= ").push_bind(capacity);
        }
        if let Some(min) = filters.price_min {
            builder.push(" AND r.price >= ").push_bind(min);
        }
        if let Some(max) = filters.price_max {
            builder.push(" AND r.price <= ").push_bind(max);
        }
        if let Some(chain_id) = filters.hotel_chain_id {
            builder.push(" AND h.chain_id = ").push_bind(chain_id);
        }
        if let Some(room_type) = filters.room_type {
            builder.push(" AND r.room_type = ").push_bind(room_type as i32);
        }
        builder.push(" ORDER BY r.price, r.id");

        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database("search_rooms", e.to_string()))?;

        let mut rooms = Vec::with_capacity(rows.len());
        for row in &rows {
            let mut room = Self::row_to_room(row)?;
            self.hydrate(&mut room).await?;
            rooms.push(room);
        }
        Ok(rooms)
    }

    async fn update(&self, room: Room) -> DomainResult<Room> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database("update_room", e.to_string()))?;

        let duplicate =
            sqlx::query("SELECT id FROM room WHERE hotel_id = ? AND number = ? AND id <> ?")
                .bind(room.hotel_id)
                .bind(&room.number)
                .bind(room.id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| DomainError::database("update_room", e.to_string()))?;
        if duplicate.is_some() {
            return Err(DomainError::conflict(format!(
                "Room number {} already exists in hotel {}",
                room.number, room.hotel_id
            )));
        }

        let result = sqlx::query(
            r#"
            UPDATE room
            SET hotel_id = ?, number = ?, floor = ?, capacity = ?, surface_area = ?,
                price = ?, telephone = ?, room_type = ?, is_extensible = ?
            WHERE id = ?
            "#,
        )
        .bind(room.hotel_id)
        .bind(&room.number)
        .bind(&room.floor)
        .bind(room.capacity)
        .bind(room.surface_area)
        .bind(room.price)
        .bind(&room.telephone)
        .bind(room.room_type as i32)
        .bind(room.is_extensible)
        .bind(room.id)
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::database("update_room", e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("Room", room.id));
        }

        Self::delete_dependents(&mut tx, room.id).await?;
        Self::insert_dependents(&mut tx, &room).await?;

        tx.commit()
            .await
            .map_err(|e| DomainError::database("update_room", e.to_string()))?;
        Ok(room)
    }

    async fn delete(&self, id: i64) -> DomainResult<()> {
        // Dependent rows go with the room via ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM room WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("delete_room", e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("Room", id));
        }
        Ok(())
    }
}
