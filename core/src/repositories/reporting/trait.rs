//! Reporting repository: aggregate queries for the public dashboard.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::errors::DomainResult;

/// Aggregate read-only queries over the catalog
#[async_trait]
pub trait ReportingRepository: Send + Sync {
    /// Room counts grouped by the city of the owning hotel
    async fn available_rooms_by_zone(&self) -> DomainResult<HashMap<String, i64>>;

    /// Total number of rooms in a hotel. Fails with NotFound for an unknown
    /// hotel (a hotel cannot exist with zero rooms).
    async fn hotel_room_capacity(&self, hotel_id: i64) -> DomainResult<i64>;
}
