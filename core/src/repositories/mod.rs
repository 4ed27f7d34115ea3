//! Repository interfaces (and in-memory mocks) for the persistence seams.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

pub mod occupancy;
pub mod reporting;
pub mod reservation;
pub mod room;
pub mod stay;

pub use occupancy::{MockOccupancyLedger, OccupancyLedger};
pub use reporting::{MockReportingRepository, ReportingRepository};
pub use reservation::{MockReservationRepository, ReservationRepository};
pub use room::{MockRoomRepository, RoomRepository};
pub use stay::{MockStayRepository, StayRepository};

/// Shared in-memory table used by the mock repositories, keyed by entity id
pub type SharedMap<T> = Arc<RwLock<HashMap<i64, T>>>;
