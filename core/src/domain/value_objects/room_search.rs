//! Search filters for the room catalog.
//!
//! Every filter is optional and `None` means "no constraint". Numeric
//! filters are never encoded as sentinel zeros, so "price at most 0" and
//! "no price ceiling" stay distinguishable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use hb_shared::DateRange;

use crate::domain::entities::enums::RoomType;
use crate::errors::{DomainError, DomainResult};

/// Optional filters narrowing a room search
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoomSearchFilters {
    /// Restrict to rooms free over this interval; both bounds or neither
    pub stay_period: Option<DateRange>,
    /// `room.capacity >= min_capacity`
    pub min_capacity: Option<i32>,
    /// `room.price >= price_min`
    pub price_min: Option<f64>,
    /// `room.price <= price_max`
    pub price_max: Option<f64>,
    /// Restrict to hotels of one chain
    pub hotel_chain_id: Option<i64>,
    /// Exact room type match
    pub room_type: Option<RoomType>,
}

impl RoomSearchFilters {
    /// Filters matching everything
    pub fn any() -> Self {
        Self::default()
    }

    pub fn with_stay_period(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.stay_period = Some(DateRange::new(start, end));
        self
    }

    pub fn with_min_capacity(mut self, capacity: i32) -> Self {
        self.min_capacity = Some(capacity);
        self
    }

    pub fn with_price_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.price_min = min;
        self.price_max = max;
        self
    }

    pub fn with_hotel_chain(mut self, chain_id: i64) -> Self {
        self.hotel_chain_id = Some(chain_id);
        self
    }

    pub fn with_room_type(mut self, room_type: RoomType) -> Self {
        self.room_type = Some(room_type);
        self
    }

    /// Reject internally inconsistent filter combinations
    pub fn validate(&self) -> DomainResult<()> {
        if let Some(period) = &self.stay_period {
            if !period.is_valid() {
                return Err(DomainError::validation(
                    "Search period end date must be after its start date",
                ));
            }
        }
        if let (Some(min), Some(max)) = (self.price_min, self.price_max) {
            if min > max {
                return Err(DomainError::validation(
                    "Minimum price cannot exceed maximum price",
                ));
            }
        }
        if self.price_min.is_some_and(|p| p < 0.0) || self.price_max.is_some_and(|p| p < 0.0) {
            return Err(DomainError::validation("Price filters cannot be negative"));
        }
        if self.min_capacity.is_some_and(|c| c < 1) {
            return Err(DomainError::validation(
                "Capacity filter must be at least 1",
            ));
        }
        if self.hotel_chain_id.is_some_and(|id| id <= 0) {
            return Err(DomainError::validation("Chain id filter must be positive"));
        }
        Ok(())
    }
}
