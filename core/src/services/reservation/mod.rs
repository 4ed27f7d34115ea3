//! Reservation lifecycle: booking, editing and cancelling holds on rooms.

mod service;

pub use service::ReservationService;
