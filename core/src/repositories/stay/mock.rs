//! In-memory implementation of StayRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::stay::Stay;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::SharedMap;

use super::trait_::StayRepository;

/// Mock stay repository
pub struct MockStayRepository {
    stays: SharedMap<Stay>,
}

impl MockStayRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            stays: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Shared handle onto the backing map, for wiring up the mock ledger
    pub fn store(&self) -> SharedMap<Stay> {
        Arc::clone(&self.stays)
    }
}

impl Default for MockStayRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StayRepository for MockStayRepository {
    async fn save(&self, mut stay: Stay) -> DomainResult<Stay> {
        let mut stays = self.stays.write().await;
        let occupied = stays.values().any(|existing| {
            existing.room_id == stay.room_id
                && existing
                    .departure_date
                    .map_or(true, |departure| departure > stay.arrival_date)
        });
        if occupied {
            return Err(DomainError::conflict(format!(
                "Room {} already has a stay in progress",
                stay.room_id
            )));
        }
        if stay.id == 0 {
            stay.id = stays.keys().max().copied().unwrap_or(0) + 1;
        }
        stays.insert(stay.id, stay.clone());
        Ok(stay)
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Stay>> {
        Ok(self.stays.read().await.get(&id).cloned())
    }

    async fn find_by_client(&self, client_id: i64) -> DomainResult<Vec<Stay>> {
        let stays = self.stays.read().await;
        let mut result: Vec<Stay> = stays
            .values()
            .filter(|s| s.client_id == client_id)
            .cloned()
            .collect();
        result.sort_by(|a, b| b.arrival_date.cmp(&a.arrival_date));
        Ok(result)
    }

    async fn update(&self, stay: Stay) -> DomainResult<Stay> {
        let mut stays = self.stays.write().await;
        match stays.get(&stay.id) {
            None => Err(DomainError::not_found("Stay", stay.id)),
            Some(existing)
                if existing.departure_date.is_some() && stay.departure_date.is_some() =>
            {
                Err(DomainError::conflict(format!(
                    "Stay {} already ended",
                    stay.id
                )))
            }
            Some(_) => {
                stays.insert(stay.id, stay.clone());
                Ok(stay)
            }
        }
    }
}
