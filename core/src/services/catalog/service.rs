//! Room catalog service implementation.

use std::sync::Arc;

use crate::domain::entities::room::{Room, RoomAttributes};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::RoomRepository;

/// Admin-facing CRUD over the room catalog.
///
/// Validation happens in the `Room` constructor; persistence of the room row
/// and its dependent sets is one atomic operation in the repository.
pub struct RoomCatalogService<R>
where
    R: RoomRepository,
{
    room_repository: Arc<R>,
}

impl<R> RoomCatalogService<R>
where
    R: RoomRepository,
{
    pub fn new(room_repository: Arc<R>) -> Self {
        Self { room_repository }
    }

    /// Add a room to the catalog
    pub async fn add_room(&self, attributes: RoomAttributes) -> DomainResult<Room> {
        let room = Room::new(0, attributes)?;
        self.room_repository.save(room).await
    }

    /// Replace a room's attributes. View types, amenities and problems are
    /// replaced wholesale, not merged.
    pub async fn update_room(&self, id: i64, attributes: RoomAttributes) -> DomainResult<Room> {
        if id <= 0 {
            return Err(DomainError::validation("Invalid room id for update"));
        }
        if self.room_repository.find_by_id(id).await?.is_none() {
            return Err(DomainError::not_found("Room", id));
        }
        let room = Room::new(id, attributes)?;
        self.room_repository.update(room).await
    }

    /// Delete a room; dependents are cascaded by the storage layer
    pub async fn delete_room(&self, id: i64) -> DomainResult<()> {
        if id <= 0 {
            return Err(DomainError::validation("Invalid room id for deletion"));
        }
        self.room_repository.delete(id).await
    }
}
