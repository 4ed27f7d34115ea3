//! Domain value objects: immutable values with no identity of their own.

pub mod occupancy;
pub mod room_search;

pub use occupancy::{Occupancy, OccupancySource};
pub use room_search::RoomSearchFilters;
