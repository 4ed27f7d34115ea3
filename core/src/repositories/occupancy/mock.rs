//! In-memory occupancy ledger for testing.
//!
//! Derives its intervals from shared handles onto the mock reservation and
//! stay maps, so tests can never drift out of sync with the repositories
//! that actually hold the data.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashSet;

use crate::domain::entities::reservation::Reservation;
use crate::domain::entities::stay::Stay;
use crate::domain::value_objects::occupancy::Occupancy;
use crate::errors::DomainResult;
use crate::repositories::reservation::MockReservationRepository;
use crate::repositories::stay::MockStayRepository;
use crate::repositories::SharedMap;

use super::trait_::OccupancyLedger;

/// Mock ledger deriving occupancies from the mock repositories' maps
pub struct MockOccupancyLedger {
    reservations: SharedMap<Reservation>,
    stays: SharedMap<Stay>,
}

impl MockOccupancyLedger {
    /// Build a ledger over the maps backing the given mock repositories
    pub fn derived_from(
        reservations: &MockReservationRepository,
        stays: &MockStayRepository,
    ) -> Self {
        Self {
            reservations: reservations.store(),
            stays: stays.store(),
        }
    }

    async fn collect(&self, room_id: i64) -> Vec<Occupancy> {
        let mut occupancies = Vec::new();

        let reservations = self.reservations.read().await;
        for res in reservations.values() {
            if res.room_id == room_id && res.is_active() {
                occupancies.push(Occupancy::reservation(
                    res.room_id,
                    res.start_date,
                    res.end_date,
                ));
            }
        }
        drop(reservations);

        let stays = self.stays.read().await;
        for stay in stays.values() {
            if stay.room_id == room_id {
                occupancies.push(Occupancy::stay(
                    stay.room_id,
                    stay.arrival_date,
                    stay.departure_date,
                ));
            }
        }

        occupancies
    }
}

#[async_trait]
impl OccupancyLedger for MockOccupancyLedger {
    async fn active_occupancies(&self, room_id: i64) -> DomainResult<Vec<Occupancy>> {
        Ok(self.collect(room_id).await)
    }

    async fn has_overlap(
        &self,
        room_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> DomainResult<bool> {
        Ok(self
            .collect(room_id)
            .await
            .iter()
            .any(|occ| occ.overlaps(start, end)))
    }

    async fn occupied_rooms(
        &self,
        room_ids: &[i64],
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> DomainResult<HashSet<i64>> {
        let mut occupied = HashSet::new();
        for &room_id in room_ids {
            if self.has_overlap(room_id, start, end).await? {
                occupied.insert(room_id);
            }
        }
        Ok(occupied)
    }
}
