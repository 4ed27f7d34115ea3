//! Shared utilities and common types for the HotelBook server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Response structures consumed by the presentation layer

pub mod config;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{DatabaseConfig, ServerConfig};
pub use types::{ApiResponse, DateRange};
