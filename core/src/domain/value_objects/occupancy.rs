//! Occupancy intervals: the derived read-model behind availability.
//!
//! An occupancy is a date interval during which a room is considered
//! unavailable, drawn from non-cancelled reservations and from stays. It is
//! never stored as its own table; the ledger derives it on read so the three
//! sources of truth cannot drift.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where an occupancy interval came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OccupancySource {
    Reservation,
    Stay,
}

/// A half-open interval `[start, end)` during which a room is unavailable.
///
/// `end` is None for an open stay: the guest has arrived and not checked
/// out, so the room is blocked for every future interval until the stay is
/// closed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Occupancy {
    pub room_id: i64,
    pub start: DateTime<Utc>,
    pub end: Option<DateTime<Utc>>,
    pub source: OccupancySource,
}

impl Occupancy {
    pub fn reservation(room_id: i64, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            room_id,
            start,
            end: Some(end),
            source: OccupancySource::Reservation,
        }
    }

    pub fn stay(room_id: i64, start: DateTime<Utc>, end: Option<DateTime<Utc>>) -> Self {
        Self {
            room_id,
            start,
            end,
            source: OccupancySource::Stay,
        }
    }

    /// Overlap test against a candidate `[start, end)`:
    /// `existing.start < candidate.end AND existing.end > candidate.start`.
    /// An open-ended occupancy overlaps everything after its start.
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.start < end && self.end.map_or(true, |existing_end| existing_end > start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_overlapping_intervals() {
        let occ = Occupancy::reservation(1, day(1), day(5));
        assert!(occ.overlaps(day(3), day(4))); // contained
        assert!(occ.overlaps(day(4), day(8))); // straddles the end
        assert!(occ.overlaps(day(1), day(5))); // identical
    }

    #[test]
    fn test_adjacent_intervals_do_not_overlap() {
        // Half-open semantics: checkout day can be someone else's check-in day
        let occ = Occupancy::reservation(1, day(1), day(5));
        assert!(!occ.overlaps(day(5), day(8)));
        assert!(!occ.overlaps(day(6), day(8)));
        let occ = Occupancy::reservation(1, day(6), day(8));
        assert!(!occ.overlaps(day(1), day(6)));
    }

    #[test]
    fn test_open_stay_blocks_every_future_interval() {
        let occ = Occupancy::stay(1, day(1), None);
        assert!(occ.overlaps(day(2), day(3)));
        assert!(occ.overlaps(day(20), day(25)));
        // But not intervals that end before the stay began
        let late_stay = Occupancy::stay(1, day(10), None);
        assert!(!late_stay.overlaps(day(1), day(5)));
    }

    #[test]
    fn test_closed_stay_behaves_like_reservation() {
        let occ = Occupancy::stay(1, day(1), Some(day(5)));
        assert!(occ.overlaps(day(4), day(6)));
        assert!(!occ.overlaps(day(5), day(7)));
    }
}
