//! In-memory implementation of ReportingRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::errors::{DomainError, DomainResult};

use super::trait_::ReportingRepository;

/// Mock reporting repository seeded with precomputed aggregates
pub struct MockReportingRepository {
    by_zone: Arc<RwLock<HashMap<String, i64>>>,
    capacities: Arc<RwLock<HashMap<i64, i64>>>,
}

impl MockReportingRepository {
    pub fn new() -> Self {
        Self {
            by_zone: Arc::new(RwLock::new(HashMap::new())),
            capacities: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn set_zone(&self, zone: impl Into<String>, count: i64) {
        self.by_zone.write().await.insert(zone.into(), count);
    }

    pub async fn set_capacity(&self, hotel_id: i64, count: i64) {
        self.capacities.write().await.insert(hotel_id, count);
    }
}

impl Default for MockReportingRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReportingRepository for MockReportingRepository {
    async fn available_rooms_by_zone(&self) -> DomainResult<HashMap<String, i64>> {
        Ok(self.by_zone.read().await.clone())
    }

    async fn hotel_room_capacity(&self, hotel_id: i64) -> DomainResult<i64> {
        self.capacities
            .read()
            .await
            .get(&hotel_id)
            .copied()
            .ok_or(DomainError::not_found("Hotel", hotel_id))
    }
}
