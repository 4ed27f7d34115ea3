//! Reporting queries over the aggregate views.

use std::collections::HashMap;
use std::sync::Arc;

use crate::errors::{DomainError, DomainResult};
use crate::repositories::ReportingRepository;

/// Thin service over the reporting repository
pub struct ReportingService<Q>
where
    Q: ReportingRepository,
{
    reporting_repository: Arc<Q>,
}

impl<Q> ReportingService<Q>
where
    Q: ReportingRepository,
{
    pub fn new(reporting_repository: Arc<Q>) -> Self {
        Self {
            reporting_repository,
        }
    }

    /// Count of currently available rooms, grouped by zone
    pub async fn available_rooms_by_zone(&self) -> DomainResult<HashMap<String, i64>> {
        self.reporting_repository.available_rooms_by_zone().await
    }

    /// Total guest capacity of one hotel
    pub async fn hotel_room_capacity(&self, hotel_id: i64) -> DomainResult<i64> {
        if hotel_id <= 0 {
            return Err(DomainError::validation("Invalid hotel id"));
        }
        self.reporting_repository.hotel_room_capacity(hotel_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MockReportingRepository;

    #[tokio::test]
    async fn test_zone_counts_pass_through() {
        let repository = Arc::new(MockReportingRepository::new());
        repository.set_zone("Montreal", 12).await;
        repository.set_zone("Laval", 3).await;

        let service = ReportingService::new(repository);
        let zones = service.available_rooms_by_zone().await.unwrap();
        assert_eq!(zones.get("Montreal"), Some(&12));
        assert_eq!(zones.len(), 2);
    }

    #[tokio::test]
    async fn test_capacity_validates_hotel_id() {
        let repository = Arc::new(MockReportingRepository::new());
        repository.set_capacity(1, 48).await;

        let service = ReportingService::new(repository);
        assert_eq!(service.hotel_room_capacity(1).await.unwrap(), 48);
        assert!(service.hotel_room_capacity(0).await.is_err());
        assert!(matches!(
            service.hotel_room_capacity(9).await.unwrap_err(),
            DomainError::NotFound { .. }
        ));
    }
}
