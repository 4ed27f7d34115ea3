//! # HotelBook Infrastructure
//!
//! MySQL implementations of the `hb_core` repository traits, plus the
//! connection pool they run on. Nothing in this crate contains business
//! rules; it persists and hydrates what the core layer decides.

pub mod database;

pub use database::connection::{DatabasePool, PoolStatistics};
pub use database::mysql::{
    MySqlOccupancyLedger, MySqlReportingRepository, MySqlReservationRepository,
    MySqlRoomRepository, MySqlStayRepository,
};
