//! MySQL implementations of the repository traits.

pub mod occupancy_ledger_impl;
pub mod reporting_repository_impl;
pub mod reservation_repository_impl;
pub mod room_repository_impl;
pub mod stay_repository_impl;

pub use occupancy_ledger_impl::MySqlOccupancyLedger;
pub use reporting_repository_impl::MySqlReportingRepository;
pub use reservation_repository_impl::MySqlReservationRepository;
pub use room_repository_impl::MySqlRoomRepository;
pub use stay_repository_impl::MySqlStayRepository;
