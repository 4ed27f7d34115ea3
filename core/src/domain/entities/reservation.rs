//! Reservation entity: a future-dated hold on a room.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::ReservationStatus;
use crate::errors::{DomainError, DomainResult};

/// Attributes of a reservation as supplied by the booking path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservationDraft {
    pub client_id: i64,
    pub hotel_id: i64,
    pub room_id: i64,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub total_price: f64,
    pub status: ReservationStatus,
}

/// A client's hold on a room for a half-open interval `[start_date, end_date)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    /// Database id; 0 before first persistence
    pub id: i64,
    pub client_id: i64,
    pub hotel_id: i64,
    pub room_id: i64,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub total_price: f64,
    pub reservation_date: DateTime<Utc>,
    pub status: ReservationStatus,
}

impl Reservation {
    /// Create a validated reservation
    pub fn new(
        id: i64,
        draft: ReservationDraft,
        reservation_date: DateTime<Utc>,
    ) -> DomainResult<Self> {
        if id < 0 {
            return Err(DomainError::validation("Reservation id cannot be negative"));
        }
        if draft.client_id < 0 {
            return Err(DomainError::validation("Client id cannot be negative"));
        }
        if draft.hotel_id < 0 {
            return Err(DomainError::validation("Hotel id cannot be negative"));
        }
        if draft.room_id < 0 {
            return Err(DomainError::validation("Room id cannot be negative"));
        }
        if draft.end_date <= draft.start_date {
            return Err(DomainError::validation(
                "Reservation end date must be after its start date",
            ));
        }
        if draft.total_price < 0.0 {
            return Err(DomainError::validation("Total price cannot be negative"));
        }

        Ok(Self {
            id,
            client_id: draft.client_id,
            hotel_id: draft.hotel_id,
            room_id: draft.room_id,
            start_date: draft.start_date,
            end_date: draft.end_date,
            total_price: draft.total_price,
            reservation_date,
            status: draft.status,
        })
    }

    /// Whether this reservation still holds its room (not cancelled)
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Whether `at` falls within the reserved interval (inclusive of both
    /// bounds: a guest may check in on the last reserved day)
    pub fn covers(&self, at: DateTime<Utc>) -> bool {
        at >= self.start_date && at <= self.end_date
    }

    /// Move to Cancelled. Idempotent: cancelling an already-cancelled
    /// reservation reports whether anything changed.
    pub fn cancel(&mut self) -> bool {
        if self.status == ReservationStatus::Cancelled {
            return false;
        }
        self.status = ReservationStatus::Cancelled;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    pub(crate) fn draft() -> ReservationDraft {
        ReservationDraft {
            client_id: 10,
            hotel_id: 1,
            room_id: 101,
            start_date: Utc.with_ymd_and_hms(2025, 6, 1, 14, 0, 0).unwrap(),
            end_date: Utc.with_ymd_and_hms(2025, 6, 5, 11, 0, 0).unwrap(),
            total_price: 400.0,
            status: ReservationStatus::Confirmed,
        }
    }

    #[test]
    fn test_valid_reservation() {
        let res = Reservation::new(1, draft(), Utc::now()).unwrap();
        assert!(res.is_active());
        assert_eq!(res.room_id, 101);
    }

    #[test]
    fn test_end_must_follow_start() {
        let mut d = draft();
        d.end_date = d.start_date;
        assert!(Reservation::new(0, d.clone(), Utc::now()).is_err());

        d.end_date = d.start_date - chrono::Duration::days(1);
        assert!(Reservation::new(0, d, Utc::now()).is_err());
    }

    #[test]
    fn test_negative_fields_rejected() {
        let mut d = draft();
        d.total_price = -0.01;
        assert!(Reservation::new(0, d, Utc::now()).is_err());

        let mut d = draft();
        d.client_id = -1;
        assert!(Reservation::new(0, d, Utc::now()).is_err());
    }

    #[test]
    fn test_covers_is_inclusive_of_bounds() {
        let res = Reservation::new(1, draft(), Utc::now()).unwrap();
        assert!(res.covers(res.start_date));
        assert!(res.covers(res.end_date));
        assert!(!res.covers(res.start_date - chrono::Duration::minutes(1)));
        assert!(!res.covers(res.end_date + chrono::Duration::minutes(1)));
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut res = Reservation::new(1, draft(), Utc::now()).unwrap();
        assert!(res.cancel());
        assert_eq!(res.status, ReservationStatus::Cancelled);
        assert!(!res.cancel());
        assert_eq!(res.status, ReservationStatus::Cancelled);
        assert!(!res.is_active());
    }
}
