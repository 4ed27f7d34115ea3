//! Database access: the connection pool and the MySQL repositories.

pub mod connection;
pub mod mysql;
