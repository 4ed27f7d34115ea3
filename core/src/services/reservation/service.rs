//! Reservation lifecycle implementation.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::domain::entities::reservation::{Reservation, ReservationDraft};
use crate::domain::value_objects::occupancy::OccupancySource;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{OccupancyLedger, ReservationRepository};

/// Booking, editing and cancellation of reservations.
///
/// Double-booking is rejected twice: this service consults the occupancy
/// ledger before persisting, and the repository re-checks inside its insert
/// transaction so a racing loser still gets a Conflict.
pub struct ReservationService<Res, L>
where
    Res: ReservationRepository,
    L: OccupancyLedger,
{
    reservation_repository: Arc<Res>,
    ledger: Arc<L>,
}

impl<Res, L> ReservationService<Res, L>
where
    Res: ReservationRepository,
    L: OccupancyLedger,
{
    pub fn new(reservation_repository: Arc<Res>, ledger: Arc<L>) -> Self {
        Self {
            reservation_repository,
            ledger,
        }
    }

    /// Book a room. Fails with Conflict when the requested interval overlaps
    /// an active occupancy of the room.
    pub async fn create_reservation(&self, draft: ReservationDraft) -> DomainResult<Reservation> {
        let reservation = Reservation::new(0, draft, Utc::now())?;

        if self
            .ledger
            .has_overlap(
                reservation.room_id,
                reservation.start_date,
                reservation.end_date,
            )
            .await?
        {
            return Err(DomainError::conflict(format!(
                "Room {} is already occupied over the requested dates",
                reservation.room_id
            )));
        }

        let saved = self.reservation_repository.save(reservation).await?;
        info!(
            reservation_id = saved.id,
            room_id = saved.room_id,
            client_id = saved.client_id,
            "reservation created"
        );
        Ok(saved)
    }

    /// Replace a reservation's attributes. The original booking timestamp is
    /// preserved; status changes must follow the allowed transitions, and
    /// moving the reservation to other dates or another room is re-checked
    /// against the ledger like a fresh booking.
    pub async fn update_reservation(
        &self,
        id: i64,
        draft: ReservationDraft,
    ) -> DomainResult<Reservation> {
        let existing = self
            .reservation_repository
            .find_by_id(id)
            .await?
            .ok_or(DomainError::not_found("Reservation", id))?;

        if draft.status != existing.status && !existing.status.can_transition_to(draft.status) {
            return Err(DomainError::conflict(format!(
                "Reservation {} cannot move from {} to {}",
                id, existing.status, draft.status
            )));
        }

        let updated = Reservation::new(id, draft, existing.reservation_date)?;

        if updated.is_active() && self.moved_onto_held_interval(&existing, &updated).await? {
            return Err(DomainError::conflict(format!(
                "Room {} is already occupied over the requested dates",
                updated.room_id
            )));
        }

        self.reservation_repository.update(updated).await
    }

    /// Whether the updated interval collides with an occupancy other than the
    /// one the reservation itself holds.
    ///
    /// The ledger carries no reservation ids, but an active reservation is
    /// the only possible source of a reservation occupancy with exactly its
    /// room and dates (two identical active holds cannot coexist), so that
    /// one interval is excluded from the check.
    async fn moved_onto_held_interval(
        &self,
        existing: &Reservation,
        updated: &Reservation,
    ) -> DomainResult<bool> {
        let occupancies = self.ledger.active_occupancies(updated.room_id).await?;
        Ok(occupancies.iter().any(|occ| {
            occ.overlaps(updated.start_date, updated.end_date)
                && !(existing.is_active()
                    && existing.room_id == updated.room_id
                    && occ.source == OccupancySource::Reservation
                    && occ.start == existing.start_date
                    && occ.end == Some(existing.end_date))
        }))
    }

    /// Cancel a reservation. Cancelling an already-cancelled reservation is
    /// a no-op reported as success.
    pub async fn cancel_reservation(&self, id: i64) -> DomainResult<Reservation> {
        let mut reservation = self
            .reservation_repository
            .find_by_id(id)
            .await?
            .ok_or(DomainError::not_found("Reservation", id))?;

        if reservation.cancel() {
            reservation = self.reservation_repository.update(reservation).await?;
            info!(reservation_id = id, "reservation cancelled");
        }
        Ok(reservation)
    }

    /// Client-facing cancellation: only the owner may cancel.
    pub async fn cancel_reservation_for_user(
        &self,
        id: i64,
        client_id: i64,
    ) -> DomainResult<Reservation> {
        let reservation = self
            .reservation_repository
            .find_by_id(id)
            .await?
            .ok_or(DomainError::not_found("Reservation", id))?;

        if reservation.client_id != client_id {
            return Err(DomainError::Forbidden {
                message: format!("Reservation {id} does not belong to client {client_id}"),
            });
        }
        self.cancel_reservation(id).await
    }

    /// All reservations of a client, most recent first
    pub async fn reservations_by_client(&self, client_id: i64) -> DomainResult<Vec<Reservation>> {
        if client_id <= 0 {
            return Err(DomainError::validation("Invalid client id"));
        }
        self.reservation_repository.find_by_client(client_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone};

    use crate::domain::entities::enums::ReservationStatus;
    use crate::repositories::{
        MockOccupancyLedger, MockReservationRepository, MockStayRepository,
    };

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, d, 0, 0, 0).unwrap()
    }

    fn draft(room_id: i64, client_id: i64, start: u32, end: u32) -> ReservationDraft {
        ReservationDraft {
            client_id,
            hotel_id: 1,
            room_id,
            start_date: day(start),
            end_date: day(end),
            total_price: 100.0,
            status: ReservationStatus::Confirmed,
        }
    }

    fn service() -> ReservationService<MockReservationRepository, MockOccupancyLedger> {
        let reservations = Arc::new(MockReservationRepository::new());
        let stays = Arc::new(MockStayRepository::new());
        let ledger = Arc::new(MockOccupancyLedger::derived_from(&reservations, &stays));
        ReservationService::new(reservations, ledger)
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_booking_date() {
        let service = service();
        let reservation = service
            .create_reservation(draft(101, 10, 1, 5))
            .await
            .unwrap();
        assert!(reservation.id > 0);
        assert_eq!(reservation.status, ReservationStatus::Confirmed);
    }

    #[tokio::test]
    async fn test_overlapping_booking_is_conflict() {
        let service = service();
        service
            .create_reservation(draft(101, 10, 1, 5))
            .await
            .unwrap();

        let err = service
            .create_reservation(draft(101, 11, 3, 7))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_adjacent_bookings_are_allowed() {
        // Half-open intervals: checkout day and arrival day may coincide
        let service = service();
        service
            .create_reservation(draft(101, 10, 1, 5))
            .await
            .unwrap();
        service
            .create_reservation(draft(101, 11, 5, 9))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_other_room_is_unaffected() {
        let service = service();
        service
            .create_reservation(draft(101, 10, 1, 5))
            .await
            .unwrap();
        service
            .create_reservation(draft(102, 11, 1, 5))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_cancelled_reservation_frees_the_room() {
        let service = service();
        let reservation = service
            .create_reservation(draft(101, 10, 1, 5))
            .await
            .unwrap();
        service.cancel_reservation(reservation.id).await.unwrap();

        service
            .create_reservation(draft(101, 11, 2, 4))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_cancel_is_idempotent() {
        let service = service();
        let reservation = service
            .create_reservation(draft(101, 10, 1, 5))
            .await
            .unwrap();

        let first = service.cancel_reservation(reservation.id).await.unwrap();
        assert_eq!(first.status, ReservationStatus::Cancelled);
        let second = service.cancel_reservation(reservation.id).await.unwrap();
        assert_eq!(second.status, ReservationStatus::Cancelled);
    }

    #[tokio::test]
    async fn test_cancel_missing_reservation_is_not_found() {
        let service = service();
        let err = service.cancel_reservation(99).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_cancel_for_user_checks_ownership() {
        let service = service();
        let reservation = service
            .create_reservation(draft(101, 10, 1, 5))
            .await
            .unwrap();

        let err = service
            .cancel_reservation_for_user(reservation.id, 999)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden { .. }));

        let cancelled = service
            .cancel_reservation_for_user(reservation.id, 10)
            .await
            .unwrap();
        assert_eq!(cancelled.status, ReservationStatus::Cancelled);
    }

    #[tokio::test]
    async fn test_update_preserves_booking_date() {
        let service = service();
        let reservation = service
            .create_reservation(draft(101, 10, 1, 5))
            .await
            .unwrap();

        let mut edit = draft(101, 10, 2, 6);
        edit.total_price = 150.0;
        let updated = service
            .update_reservation(reservation.id, edit)
            .await
            .unwrap();

        assert_eq!(updated.reservation_date, reservation.reservation_date);
        assert_eq!(updated.total_price, 150.0);
        assert_eq!(updated.start_date, day(2));
    }

    #[tokio::test]
    async fn test_update_onto_held_interval_is_conflict() {
        let service = service();
        service
            .create_reservation(draft(101, 10, 1, 5))
            .await
            .unwrap();
        let other = service
            .create_reservation(draft(102, 11, 2, 4))
            .await
            .unwrap();

        // Moving the second booking onto room 101 lands inside the first hold
        let err = service
            .update_reservation(other.id, draft(101, 11, 2, 4))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict { .. }));

        // The room it vacates is a different matter: shifting dates on its
        // own room is fine
        service
            .update_reservation(other.id, draft(102, 11, 3, 6))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_update_rejects_illegal_status_transition() {
        let service = service();
        let reservation = service
            .create_reservation(draft(101, 10, 1, 5))
            .await
            .unwrap();
        service.cancel_reservation(reservation.id).await.unwrap();

        let mut edit = draft(101, 10, 1, 5);
        edit.status = ReservationStatus::Confirmed;
        let err = service
            .update_reservation(reservation.id, edit)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_reservations_by_client() {
        let service = service();
        service
            .create_reservation(draft(101, 10, 1, 5))
            .await
            .unwrap();
        service
            .create_reservation(draft(102, 10, 3, 7))
            .await
            .unwrap();
        service
            .create_reservation(draft(103, 20, 1, 2))
            .await
            .unwrap();

        let mine = service.reservations_by_client(10).await.unwrap();
        assert_eq!(mine.len(), 2);
        assert!(mine.iter().all(|r| r.client_id == 10));

        assert!(service.reservations_by_client(0).await.is_err());
    }
}
