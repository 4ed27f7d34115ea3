//! Stay management: the employee-facing surface over occupancy records.

mod service;

pub use service::StayService;
