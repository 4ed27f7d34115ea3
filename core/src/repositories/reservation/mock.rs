//! In-memory implementation of ReservationRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::reservation::Reservation;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::SharedMap;

use super::trait_::ReservationRepository;

/// Mock reservation repository.
///
/// `save` mirrors the database's overlap guard: an insert whose interval
/// overlaps an active reservation of the same room is rejected with a
/// Conflict, so the "storage as last line of defense" path is exercisable
/// in tests.
pub struct MockReservationRepository {
    reservations: SharedMap<Reservation>,
}

impl MockReservationRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            reservations: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Shared handle onto the backing map, for wiring up the mock ledger
    pub fn store(&self) -> SharedMap<Reservation> {
        Arc::clone(&self.reservations)
    }
}

impl Default for MockReservationRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReservationRepository for MockReservationRepository {
    async fn save(&self, mut reservation: Reservation) -> DomainResult<Reservation> {
        let mut reservations = self.reservations.write().await;

        let conflict = reservations.values().any(|existing| {
            existing.room_id == reservation.room_id
                && existing.is_active()
                && existing.start_date < reservation.end_date
                && existing.end_date > reservation.start_date
        });
        if conflict {
            return Err(DomainError::conflict(format!(
                "Room {} already booked over the requested interval",
                reservation.room_id
            )));
        }

        if reservation.id == 0 {
            reservation.id = reservations.keys().max().copied().unwrap_or(0) + 1;
        }
        reservations.insert(reservation.id, reservation.clone());
        Ok(reservation)
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Reservation>> {
        Ok(self.reservations.read().await.get(&id).cloned())
    }

    async fn find_by_client(&self, client_id: i64) -> DomainResult<Vec<Reservation>> {
        let reservations = self.reservations.read().await;
        let mut result: Vec<Reservation> = reservations
            .values()
            .filter(|r| r.client_id == client_id)
            .cloned()
            .collect();
        result.sort_by(|a, b| b.reservation_date.cmp(&a.reservation_date));
        Ok(result)
    }

    async fn update(&self, reservation: Reservation) -> DomainResult<Reservation> {
        let mut reservations = self.reservations.write().await;
        if !reservations.contains_key(&reservation.id) {
            return Err(DomainError::not_found("Reservation", reservation.id));
        }
        reservations.insert(reservation.id, reservation.clone());
        Ok(reservation)
    }

    async fn delete(&self, id: i64) -> DomainResult<()> {
        let mut reservations = self.reservations.write().await;
        if reservations.remove(&id).is_none() {
            return Err(DomainError::not_found("Reservation", id));
        }
        Ok(())
    }
}
