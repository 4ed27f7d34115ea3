//! Stay entity: the ground truth of physical occupancy.
//!
//! A stay is opened at check-in (from a reservation or as a walk-in) and
//! closed exactly once at checkout. While open it occupies its room for
//! every future interval.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{DomainError, DomainResult};

/// A record of actual room occupancy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stay {
    /// Database id; 0 before first persistence
    pub id: i64,
    pub client_id: i64,
    pub room_id: i64,
    /// None for walk-ins
    pub reservation_id: Option<i64>,
    pub arrival_date: DateTime<Utc>,
    /// None while the stay is open
    pub departure_date: Option<DateTime<Utc>>,
    pub final_price: Option<f64>,
    pub payment_method: Option<String>,
    pub check_in_employee_id: i64,
    pub check_out_employee_id: Option<i64>,
    pub comments: String,
}

impl Stay {
    /// Open a new stay at check-in
    pub fn check_in(
        id: i64,
        client_id: i64,
        room_id: i64,
        reservation_id: Option<i64>,
        arrival_date: DateTime<Utc>,
        check_in_employee_id: i64,
        comments: impl Into<String>,
    ) -> DomainResult<Self> {
        if id < 0 {
            return Err(DomainError::validation("Stay id cannot be negative"));
        }
        if client_id < 0 {
            return Err(DomainError::validation("Client id cannot be negative"));
        }
        if room_id <= 0 {
            return Err(DomainError::validation("Stay requires a valid room id"));
        }
        if check_in_employee_id < 0 {
            return Err(DomainError::validation("Employee id cannot be negative"));
        }
        if let Some(res_id) = reservation_id {
            if res_id <= 0 {
                return Err(DomainError::validation(
                    "Linked reservation id must be positive",
                ));
            }
        }

        Ok(Self {
            id,
            client_id,
            room_id,
            reservation_id,
            arrival_date,
            departure_date: None,
            final_price: None,
            payment_method: None,
            check_in_employee_id,
            check_out_employee_id: None,
            comments: comments.into(),
        })
    }

    /// Whether the guest is still in the room
    pub fn is_open(&self) -> bool {
        self.departure_date.is_none()
    }

    /// Close the stay at checkout. Fails if the stay was already ended or
    /// the closing data is malformed.
    pub fn close(
        &mut self,
        departure_date: DateTime<Utc>,
        check_out_employee_id: i64,
        final_price: f64,
        payment_method: impl Into<String>,
    ) -> DomainResult<()> {
        if !self.is_open() {
            return Err(DomainError::conflict(format!(
                "Stay {} already ended",
                self.id
            )));
        }
        if departure_date < self.arrival_date {
            return Err(DomainError::validation(
                "Departure date cannot precede arrival date",
            ));
        }
        if final_price < 0.0 {
            return Err(DomainError::validation("Final price cannot be negative"));
        }
        let payment_method = payment_method.into();
        if payment_method.trim().is_empty() {
            return Err(DomainError::validation("Payment method cannot be empty"));
        }
        if check_out_employee_id < 0 {
            return Err(DomainError::validation("Employee id cannot be negative"));
        }

        self.departure_date = Some(departure_date);
        self.check_out_employee_id = Some(check_out_employee_id);
        self.final_price = Some(final_price);
        self.payment_method = Some(payment_method);
        Ok(())
    }
}
