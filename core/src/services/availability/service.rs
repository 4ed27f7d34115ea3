//! Availability engine implementation.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::entities::room::Room;
use crate::domain::value_objects::room_search::RoomSearchFilters;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{OccupancyLedger, RoomRepository};

/// Computes room availability from the catalog and the occupancy ledger.
///
/// Emptiness is not an error on the query path (`find_available_rooms`,
/// `search_rooms`); the check-in assignment path uses `assign_room`, which
/// turns an empty result into an explicit domain error.
pub struct AvailabilityService<R, L>
where
    R: RoomRepository,
    L: OccupancyLedger,
{
    room_repository: Arc<R>,
    ledger: Arc<L>,
}

impl<R, L> AvailabilityService<R, L>
where
    R: RoomRepository,
    L: OccupancyLedger,
{
    pub fn new(room_repository: Arc<R>, ledger: Arc<L>) -> Self {
        Self {
            room_repository,
            ledger,
        }
    }

    /// Rooms of a hotel with no active occupancy overlapping `[start, end)`,
    /// ordered by room id. An empty result is a valid answer.
    pub async fn find_available_rooms(
        &self,
        hotel_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> DomainResult<Vec<Room>> {
        if hotel_id <= 0 {
            return Err(DomainError::validation("Invalid hotel id"));
        }
        if end <= start {
            return Err(DomainError::validation(
                "End date must be after start date",
            ));
        }

        let rooms = self.room_repository.find_by_hotel(hotel_id).await?;
        let room_ids: Vec<i64> = rooms.iter().map(|r| r.id).collect();
        let occupied = self.ledger.occupied_rooms(&room_ids, start, end).await?;

        Ok(rooms
            .into_iter()
            .filter(|room| !occupied.contains(&room.id))
            .collect())
    }

    /// Pick a room for automatic assignment at check-in. Surfaces emptiness
    /// as an error, unlike the query path.
    pub async fn assign_room(
        &self,
        hotel_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> DomainResult<Room> {
        let mut rooms = self.find_available_rooms(hotel_id, start, end).await?;
        if rooms.is_empty() {
            return Err(DomainError::conflict(format!(
                "No available rooms in hotel {hotel_id} for the requested interval"
            )));
        }
        Ok(rooms.remove(0))
    }

    /// Search the catalog by static attributes, excluding rooms occupied
    /// over the requested stay period when one is given. Results are ordered
    /// by ascending price, then room id.
    pub async fn search_rooms(&self, filters: &RoomSearchFilters) -> DomainResult<Vec<Room>> {
        filters.validate()?;

        let rooms = self.room_repository.search_by_attributes(filters).await?;

        let Some(period) = &filters.stay_period else {
            return Ok(rooms);
        };

        let room_ids: Vec<i64> = rooms.iter().map(|r| r.id).collect();
        let occupied = self
            .ledger
            .occupied_rooms(&room_ids, period.start, period.end)
            .await?;

        Ok(rooms
            .into_iter()
            .filter(|room| !occupied.contains(&room.id))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::HashSet;

    use crate::domain::entities::enums::{ReservationStatus, RoomType};
    use crate::domain::entities::hotel::Hotel;
    use crate::domain::entities::reservation::{Reservation, ReservationDraft};
    use crate::domain::entities::room::{Room, RoomAttributes};
    use crate::repositories::{
        MockOccupancyLedger, MockReservationRepository, MockRoomRepository, MockStayRepository,
        ReservationRepository, RoomRepository,
    };

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, d, 0, 0, 0).unwrap()
    }

    fn room(id: i64, hotel_id: i64, price: f64, capacity: i32, room_type: RoomType) -> Room {
        Room::new(
            id,
            RoomAttributes {
                hotel_id,
                number: format!("R{id}"),
                floor: "1".to_string(),
                capacity,
                surface_area: 20.0,
                price,
                telephone: "555-0100".to_string(),
                room_type,
                is_extensible: false,
                view_types: HashSet::new(),
                amenities: HashSet::new(),
                problems: Vec::new(),
            },
        )
        .unwrap()
    }

    struct Fixture {
        rooms: Arc<MockRoomRepository>,
        reservations: Arc<MockReservationRepository>,
        service: AvailabilityService<MockRoomRepository, MockOccupancyLedger>,
    }

    fn fixture() -> Fixture {
        let reservations = Arc::new(MockReservationRepository::new());
        let stays = Arc::new(MockStayRepository::new());
        let rooms = Arc::new(MockRoomRepository::new());
        let ledger = Arc::new(MockOccupancyLedger::derived_from(&reservations, &stays));
        let service = AvailabilityService::new(Arc::clone(&rooms), ledger);
        Fixture {
            rooms,
            reservations,
            service,
        }
    }

    async fn reserve(fixture: &Fixture, room_id: i64, start: u32, end: u32) {
        let reservation = Reservation::new(
            0,
            ReservationDraft {
                client_id: 1,
                hotel_id: 1,
                room_id,
                start_date: day(start),
                end_date: day(end),
                total_price: 100.0,
                status: ReservationStatus::Confirmed,
            },
            Utc::now(),
        )
        .unwrap();
        fixture.reservations.save(reservation).await.unwrap();
    }

    #[tokio::test]
    async fn test_reserved_room_is_excluded_inside_its_interval() {
        let f = fixture();
        f.rooms
            .save(room(101, 1, 100.0, 2, RoomType::Double))
            .await
            .unwrap();
        reserve(&f, 101, 1, 5).await;

        let available = f.service.find_available_rooms(1, day(3), day(4)).await.unwrap();
        assert!(available.is_empty());

        let available = f.service.find_available_rooms(1, day(6), day(8)).await.unwrap();
        assert_eq!(available.len(), 1);
        assert_eq!(available[0].id, 101);
    }

    #[tokio::test]
    async fn test_cancelled_reservation_does_not_block() {
        let f = fixture();
        f.rooms
            .save(room(101, 1, 100.0, 2, RoomType::Double))
            .await
            .unwrap();
        reserve(&f, 101, 1, 5).await;

        let mut reservation = f.reservations.find_by_id(1).await.unwrap().unwrap();
        reservation.cancel();
        f.reservations.update(reservation).await.unwrap();

        let available = f.service.find_available_rooms(1, day(2), day(4)).await.unwrap();
        assert_eq!(available.len(), 1);
    }

    #[tokio::test]
    async fn test_available_rooms_never_overlap_ledger() {
        let f = fixture();
        for id in 1..=4 {
            f.rooms
                .save(room(id, 1, 100.0, 2, RoomType::Double))
                .await
                .unwrap();
        }
        reserve(&f, 1, 1, 10).await;
        reserve(&f, 3, 4, 6).await;

        let available = f.service.find_available_rooms(1, day(5), day(7)).await.unwrap();
        let ids: Vec<i64> = available.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 4]);
    }

    #[tokio::test]
    async fn test_invalid_interval_rejected() {
        let f = fixture();
        let err = f
            .service
            .find_available_rooms(1, day(5), day(5))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation { .. }));

        let err = f
            .service
            .find_available_rooms(0, day(1), day(5))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_empty_result_is_ok_but_assignment_errors() {
        let f = fixture();
        // Hotel with no rooms at all
        let available = f.service.find_available_rooms(7, day(1), day(2)).await.unwrap();
        assert!(available.is_empty());

        let err = f.service.assign_room(7, day(1), day(2)).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict { .. }));
        assert!(err.to_string().contains("No available rooms"));
    }

    #[tokio::test]
    async fn test_assign_room_picks_first_free() {
        let f = fixture();
        f.rooms.save(room(1, 1, 100.0, 2, RoomType::Double)).await.unwrap();
        f.rooms.save(room(2, 1, 100.0, 2, RoomType::Double)).await.unwrap();
        reserve(&f, 1, 1, 5).await;

        let assigned = f.service.assign_room(1, day(2), day(4)).await.unwrap();
        assert_eq!(assigned.id, 2);
    }

    #[tokio::test]
    async fn test_search_price_and_capacity_filters() {
        let f = fixture();
        f.rooms.save(room(1, 1, 80.0, 2, RoomType::Double)).await.unwrap();
        f.rooms.save(room(2, 1, 120.0, 2, RoomType::Queen)).await.unwrap();
        f.rooms.save(room(3, 1, 200.0, 2, RoomType::King)).await.unwrap();

        let filters = RoomSearchFilters::any()
            .with_price_range(Some(50.0), Some(150.0))
            .with_min_capacity(2);
        let results = f.service.search_rooms(&filters).await.unwrap();

        let prices: Vec<f64> = results.iter().map(|r| r.price).collect();
        assert_eq!(prices, vec![80.0, 120.0]);
    }

    #[tokio::test]
    async fn test_search_orders_by_price_then_id() {
        let f = fixture();
        f.rooms.save(room(2, 1, 100.0, 2, RoomType::Double)).await.unwrap();
        f.rooms.save(room(1, 1, 100.0, 2, RoomType::Double)).await.unwrap();
        f.rooms.save(room(3, 1, 90.0, 2, RoomType::Double)).await.unwrap();

        let results = f.service.search_rooms(&RoomSearchFilters::any()).await.unwrap();
        let ids: Vec<i64> = results.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[tokio::test]
    async fn test_search_with_period_excludes_occupied() {
        let f = fixture();
        f.rooms.save(room(1, 1, 80.0, 2, RoomType::Double)).await.unwrap();
        f.rooms.save(room(2, 1, 90.0, 2, RoomType::Double)).await.unwrap();
        reserve(&f, 1, 1, 5).await;

        let filters = RoomSearchFilters::any().with_stay_period(day(2), day(4));
        let results = f.service.search_rooms(&filters).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, 2);
    }

    #[tokio::test]
    async fn test_search_by_chain_and_type() {
        let f = fixture();
        f.rooms
            .insert_hotel(Hotel::new(1, 10, "Grand Plaza", "Montreal").unwrap())
            .await;
        f.rooms
            .insert_hotel(Hotel::new(2, 20, "Budget Inn", "Laval").unwrap())
            .await;
        f.rooms.save(room(1, 1, 80.0, 2, RoomType::Double)).await.unwrap();
        f.rooms.save(room(2, 2, 90.0, 2, RoomType::Double)).await.unwrap();
        f.rooms.save(room(3, 1, 150.0, 4, RoomType::JuniorSuite)).await.unwrap();

        let filters = RoomSearchFilters::any().with_hotel_chain(10);
        let results = f.service.search_rooms(&filters).await.unwrap();
        let ids: Vec<i64> = results.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 3]);

        let filters = RoomSearchFilters::any().with_room_type(RoomType::JuniorSuite);
        let results = f.service.search_rooms(&filters).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, 3);
    }

    #[tokio::test]
    async fn test_search_rejects_inconsistent_filters() {
        let f = fixture();
        let filters = RoomSearchFilters::any().with_price_range(Some(200.0), Some(100.0));
        assert!(f.service.search_rooms(&filters).await.is_err());
    }
}
