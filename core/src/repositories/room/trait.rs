//! Room repository trait defining the interface for room catalog persistence.

use async_trait::async_trait;

use crate::domain::entities::room::Room;
use crate::domain::value_objects::room_search::RoomSearchFilters;
use crate::errors::DomainResult;

/// Repository contract for the room catalog.
///
/// Implementations must persist a room and its dependent sets (view types,
/// amenities, problems) atomically: a partial write can never leave a room
/// with inconsistent dependent rows. Deleting a room cascades to its
/// reservations and stays at the storage layer.
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Persist a new room, returning it with its database-assigned id.
    /// Fails with Conflict when the room number is already taken within
    /// the hotel.
    async fn save(&self, room: Room) -> DomainResult<Room>;

    /// Find a room by id
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Room>>;

    /// All rooms of a hotel, ordered by room id
    async fn find_by_hotel(&self, hotel_id: i64) -> DomainResult<Vec<Room>>;

    /// Rooms matching the static attribute filters (capacity, price range,
    /// room type, hotel chain), ordered by ascending price then room id.
    ///
    /// The `stay_period` filter is NOT applied here; date-based exclusion is
    /// the availability engine's job, driven by the occupancy ledger.
    async fn search_by_attributes(&self, filters: &RoomSearchFilters) -> DomainResult<Vec<Room>>;

    /// Replace an existing room (full replace of dependent sets).
    /// Fails with NotFound if the room does not exist, and with Conflict
    /// when the new number is already taken by another room in the hotel.
    async fn update(&self, room: Room) -> DomainResult<Room>;

    /// Delete a room and cascade to dependent reservations and stays.
    /// Fails with NotFound if the room does not exist.
    async fn delete(&self, id: i64) -> DomainResult<()>;
}
