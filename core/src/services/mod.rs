//! Domain services: the business flows over the repository seams.

pub mod availability;
pub mod catalog;
pub mod front_desk;
pub mod payment;
pub mod reporting;
pub mod reservation;
pub mod stay;

pub use availability::AvailabilityService;
pub use catalog::RoomCatalogService;
pub use front_desk::{CheckInRequest, CheckoutRequest, FrontDeskService};
pub use payment::{MockPaymentService, PaymentService, RecordedPayment};
pub use reporting::ReportingService;
pub use reservation::ReservationService;
pub use stay::StayService;
