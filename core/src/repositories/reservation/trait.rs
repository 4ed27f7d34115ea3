//! Reservation repository trait.

use async_trait::async_trait;

use crate::domain::entities::reservation::Reservation;
use crate::errors::DomainResult;

/// Repository contract for reservations.
///
/// `save` is the storage layer's last line of defense against
/// double-booking: implementations must reject a reservation whose interval
/// overlaps an active occupancy of the same room with a Conflict error, even
/// when the caller already consulted the availability engine. The SQL
/// implementation performs this check inside the insert transaction so at
/// most one of two racing requests succeeds.
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Persist a new reservation, returning it with its database-assigned id
    async fn save(&self, reservation: Reservation) -> DomainResult<Reservation>;

    /// Find a reservation by id
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Reservation>>;

    /// All reservations owned by a client, most recent first
    async fn find_by_client(&self, client_id: i64) -> DomainResult<Vec<Reservation>>;

    /// Replace an existing reservation. Fails with NotFound if absent.
    async fn update(&self, reservation: Reservation) -> DomainResult<Reservation>;

    /// Hard-delete a reservation (admin/cascade only)
    async fn delete(&self, id: i64) -> DomainResult<()>;
}
