//! Stay management implementation.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::entities::stay::Stay;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::StayRepository;

/// Direct management of stay records.
///
/// The usual way a stay is opened and closed is the front desk's
/// check-in/checkout flow; this service covers the remaining employee
/// surface: record imports, corrections, and the close transition itself.
pub struct StayService<S>
where
    S: StayRepository,
{
    stay_repository: Arc<S>,
}

impl<S> StayService<S>
where
    S: StayRepository,
{
    pub fn new(stay_repository: Arc<S>) -> Self {
        Self { stay_repository }
    }

    /// Persist a stay built elsewhere (imports, manual entry)
    pub async fn register_stay(&self, stay: Stay) -> DomainResult<Stay> {
        self.stay_repository.save(stay).await
    }

    /// Full-replace edit of an existing stay record
    pub async fn update_stay(&self, stay: Stay) -> DomainResult<Stay> {
        if self.stay_repository.find_by_id(stay.id).await?.is_none() {
            return Err(DomainError::not_found("Stay", stay.id));
        }
        self.stay_repository.update(stay).await
    }

    /// Close an open stay in place. The record survives with its departure
    /// data filled in; closing twice fails with Conflict.
    pub async fn end_stay(
        &self,
        stay_id: i64,
        departure_date: DateTime<Utc>,
        check_out_employee_id: i64,
        final_price: f64,
        payment_method: &str,
    ) -> DomainResult<Stay> {
        let mut stay = self
            .stay_repository
            .find_by_id(stay_id)
            .await?
            .ok_or(DomainError::not_found("Stay", stay_id))?;

        stay.close(
            departure_date,
            check_out_employee_id,
            final_price,
            payment_method,
        )?;
        self.stay_repository.update(stay).await
    }

    /// All stays of a client, most recent arrival first
    pub async fn stays_by_client(&self, client_id: i64) -> DomainResult<Vec<Stay>> {
        if client_id <= 0 {
            return Err(DomainError::validation("Invalid client id"));
        }
        self.stay_repository.find_by_client(client_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    use crate::repositories::MockStayRepository;

    fn arrival() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 15, 0, 0).unwrap()
    }

    fn service() -> StayService<MockStayRepository> {
        StayService::new(Arc::new(MockStayRepository::new()))
    }

    #[tokio::test]
    async fn test_register_and_list() {
        let service = service();
        let stay = Stay::check_in(0, 10, 101, None, arrival(), 7, "").unwrap();
        let saved = service.register_stay(stay).await.unwrap();
        assert!(saved.id > 0);

        let stays = service.stays_by_client(10).await.unwrap();
        assert_eq!(stays.len(), 1);
    }

    #[tokio::test]
    async fn test_register_into_occupied_room_is_conflict() {
        let service = service();
        service
            .register_stay(Stay::check_in(0, 10, 101, None, arrival(), 7, "").unwrap())
            .await
            .unwrap();

        // The open stay holds the room, so a second one cannot be opened
        let later = arrival() + chrono::Duration::days(1);
        let err = service
            .register_stay(Stay::check_in(0, 11, 101, None, later, 7, "").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict { .. }));

        // Another room is unaffected
        service
            .register_stay(Stay::check_in(0, 11, 102, None, later, 7, "").unwrap())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_update_missing_stay_is_not_found() {
        let service = service();
        let mut stay = Stay::check_in(42, 10, 101, None, arrival(), 7, "").unwrap();
        stay.comments = "late arrival".to_string();
        let err = service.update_stay(stay).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_end_stay_closes_in_place() {
        let service = service();
        let stay = Stay::check_in(0, 10, 101, None, arrival(), 7, "").unwrap();
        let saved = service.register_stay(stay).await.unwrap();
        let departure = arrival() + chrono::Duration::days(3);

        let closed = service
            .end_stay(saved.id, departure, 8, 300.0, "card")
            .await
            .unwrap();
        assert!(!closed.is_open());
        assert_eq!(closed.final_price, Some(300.0));
        assert_eq!(closed.check_out_employee_id, Some(8));

        // The record stays queryable after closing
        let stays = service.stays_by_client(10).await.unwrap();
        assert_eq!(stays.len(), 1);
        assert!(!stays[0].is_open());
    }

    #[tokio::test]
    async fn test_double_end_is_conflict() {
        let service = service();
        let saved = service
            .register_stay(Stay::check_in(0, 10, 101, None, arrival(), 7, "").unwrap())
            .await
            .unwrap();
        let departure = arrival() + chrono::Duration::days(1);

        service
            .end_stay(saved.id, departure, 8, 100.0, "cash")
            .await
            .unwrap();
        let err = service
            .end_stay(saved.id, departure, 8, 100.0, "cash")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict { .. }));
        assert!(err.to_string().contains("already ended"));
    }

    #[tokio::test]
    async fn test_end_missing_stay_is_not_found() {
        let service = service();
        let err = service
            .end_stay(99, arrival(), 8, 100.0, "cash")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }
}
