//! In-memory implementation of RoomRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::hotel::Hotel;
use crate::domain::entities::room::Room;
use crate::domain::value_objects::room_search::RoomSearchFilters;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::SharedMap;

use super::trait_::RoomRepository;

/// Mock room repository backed by in-memory maps.
///
/// Holds hotels alongside rooms so the chain filter can be resolved, and
/// optionally shares the reservation/stay maps of the other mocks so a room
/// delete cascades the way the database schema does.
pub struct MockRoomRepository {
    rooms: SharedMap<Room>,
    hotels: SharedMap<Hotel>,
    cascade: Option<(
        SharedMap<crate::domain::entities::reservation::Reservation>,
        SharedMap<crate::domain::entities::stay::Stay>,
    )>,
}

impl MockRoomRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            rooms: Arc::new(RwLock::new(HashMap::new())),
            hotels: Arc::new(RwLock::new(HashMap::new())),
            cascade: None,
        }
    }

    /// Wire in the reservation/stay maps so `delete` cascades like the
    /// database's `ON DELETE CASCADE`
    pub fn with_cascade(
        mut self,
        reservations: SharedMap<crate::domain::entities::reservation::Reservation>,
        stays: SharedMap<crate::domain::entities::stay::Stay>,
    ) -> Self {
        self.cascade = Some((reservations, stays));
        self
    }

    /// Seed a hotel for chain-filter resolution
    pub async fn insert_hotel(&self, hotel: Hotel) {
        self.hotels.write().await.insert(hotel.id, hotel);
    }

    async fn chain_of(&self, hotel_id: i64) -> Option<i64> {
        self.hotels.read().await.get(&hotel_id).map(|h| h.chain_id)
    }
}

impl Default for MockRoomRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RoomRepository for MockRoomRepository {
    async fn save(&self, mut room: Room) -> DomainResult<Room> {
        let mut rooms = self.rooms.write().await;

        if rooms
            .values()
            .any(|r| r.hotel_id == room.hotel_id && r.number == room.number)
        {
            return Err(DomainError::conflict(format!(
                "Room number {} already exists in hotel {}",
                room.number, room.hotel_id
            )));
        }

        if room.id == 0 {
            room.id = rooms.keys().max().copied().unwrap_or(0) + 1;
        }
        rooms.insert(room.id, room.clone());
        Ok(room)
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Room>> {
        Ok(self.rooms.read().await.get(&id).cloned())
    }

    async fn find_by_hotel(&self, hotel_id: i64) -> DomainResult<Vec<Room>> {
        let rooms = self.rooms.read().await;
        let mut result: Vec<Room> = rooms
            .values()
            .filter(|r| r.hotel_id == hotel_id)
            .cloned()
            .collect();
        result.sort_by_key(|r| r.id);
        Ok(result)
    }

    async fn search_by_attributes(&self, filters: &RoomSearchFilters) -> DomainResult<Vec<Room>> {
        let rooms = self.rooms.read().await;
        let mut result = Vec::new();
        for room in rooms.values() {
            if filters.min_capacity.is_some_and(|c| room.capacity < c) {
                continue;
            }
            if filters.price_min.is_some_and(|min| room.price < min) {
                continue;
            }
            if filters.price_max.is_some_and(|max| room.price > max) {
                continue;
            }
            if filters.room_type.is_some_and(|rt| room.room_type != rt) {
                continue;
            }
            if let Some(chain_id) = filters.hotel_chain_id {
                if self.chain_of(room.hotel_id).await != Some(chain_id) {
                    continue;
                }
            }
            result.push(room.clone());
        }
        result.sort_by(|a, b| a.price.total_cmp(&b.price).then(a.id.cmp(&b.id)));
        Ok(result)
    }

    async fn update(&self, room: Room) -> DomainResult<Room> {
        let mut rooms = self.rooms.write().await;
        if !rooms.contains_key(&room.id) {
            return Err(DomainError::not_found("Room", room.id));
        }
        if rooms
            .values()
            .any(|r| r.id != room.id && r.hotel_id == room.hotel_id && r.number == room.number)
        {
            return Err(DomainError::conflict(format!(
                "Room number {} already exists in hotel {}",
                room.number, room.hotel_id
            )));
        }
        rooms.insert(room.id, room.clone());
        Ok(room)
    }

    async fn delete(&self, id: i64) -> DomainResult<()> {
        let mut rooms = self.rooms.write().await;
        if rooms.remove(&id).is_none() {
            return Err(DomainError::not_found("Room", id));
        }
        drop(rooms);

        if let Some((reservations, stays)) = &self.cascade {
            reservations.write().await.retain(|_, r| r.room_id != id);
            stays.write().await.retain(|_, s| s.room_id != id);
        }
        Ok(())
    }
}
