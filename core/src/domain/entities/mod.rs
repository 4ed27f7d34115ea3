//! Domain entities representing core business objects.

pub mod enums;
pub mod hotel;
pub mod problem;
pub mod reservation;
pub mod room;
pub mod stay;

// Re-export commonly used types
pub use enums::{Amenity, ProblemSeverity, ReservationStatus, RoomType, ViewType};
pub use hotel::Hotel;
pub use problem::Problem;
pub use reservation::{Reservation, ReservationDraft};
pub use room::{Room, RoomAttributes};
pub use stay::Stay;
