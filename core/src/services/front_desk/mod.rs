//! Front desk: check-in and checkout flows.

mod service;

pub use service::{CheckInRequest, CheckoutRequest, FrontDeskService};
