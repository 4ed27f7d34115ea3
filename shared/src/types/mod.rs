//! Common type definitions shared across server layers.

pub mod response;

pub use response::{ApiResponse, DateRange};
