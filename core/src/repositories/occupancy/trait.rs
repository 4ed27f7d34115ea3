//! Occupancy ledger: the derived, read-only view behind availability.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashSet;

use crate::domain::value_objects::occupancy::Occupancy;
use crate::errors::DomainResult;

/// Read-only view over what counts as "room occupied" for a given interval.
///
/// Entries are derived on read from non-cancelled reservations and from all
/// stays; there is no mutation API here. The write side is the reservation
/// lifecycle and the check-in/checkout paths.
#[async_trait]
pub trait OccupancyLedger: Send + Sync {
    /// Every active occupancy interval recorded against a room
    async fn active_occupancies(&self, room_id: i64) -> DomainResult<Vec<Occupancy>>;

    /// True iff any active occupancy of the room overlaps `[start, end)`
    async fn has_overlap(
        &self,
        room_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> DomainResult<bool>;

    /// Batch form: the subset of `room_ids` with an overlapping active
    /// occupancy in `[start, end)`. Used by the availability engine to avoid
    /// one query per room.
    async fn occupied_rooms(
        &self,
        room_ids: &[i64],
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> DomainResult<HashSet<i64>>;
}
