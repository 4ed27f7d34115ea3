//! Configuration module
//!
//! Configuration is organized per concern:
//! - `database` - Database connection and pool configuration
//! - `server` - HTTP server configuration

pub mod database;
pub mod server;

pub use database::DatabaseConfig;
pub use server::ServerConfig;
