//! Availability engine: which rooms are free for a date interval, and
//! filtered room search.

mod service;

pub use service::AvailabilityService;
