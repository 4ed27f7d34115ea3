//! Integration tests against a real MySQL instance.
//!
//! Ignored by default; set DATABASE_URL (or a .env file) and run with
//! `cargo test -- --ignored` against a schema-loaded database.

use std::collections::HashSet;

use chrono::{Duration, Utc};

use hb_core::domain::entities::enums::{Amenity, ReservationStatus, RoomType, ViewType};
use hb_core::domain::entities::reservation::{Reservation, ReservationDraft};
use hb_core::domain::entities::room::{Room, RoomAttributes};
use hb_core::errors::DomainError;
use hb_core::repositories::{OccupancyLedger, ReservationRepository, RoomRepository};
use hb_infra::{DatabasePool, MySqlOccupancyLedger, MySqlReservationRepository, MySqlRoomRepository};
use hb_shared::DatabaseConfig;

async fn pool() -> DatabasePool {
    dotenvy::dotenv().ok();
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    DatabasePool::new(DatabaseConfig::from_env())
        .await
        .expect("database must be reachable for integration tests")
}

fn attributes(number: &str) -> RoomAttributes {
    RoomAttributes {
        hotel_id: 1,
        number: number.to_string(),
        floor: "2".to_string(),
        capacity: 2,
        surface_area: 24.0,
        price: 110.0,
        telephone: "555-0199".to_string(),
        room_type: RoomType::Double,
        is_extensible: false,
        view_types: HashSet::from([ViewType::City, ViewType::Park]),
        amenities: HashSet::from([Amenity::Wifi, Amenity::Safe]),
        problems: Vec::new(),
    }
}

#[tokio::test]
#[ignore]
async fn test_room_round_trip_with_dependent_sets() {
    let pool = pool().await;
    let repository = MySqlRoomRepository::new(pool.get_pool().clone());

    let number = format!("it-{}", Utc::now().timestamp_nanos_opt().unwrap_or_default());
    let room = Room::new(0, attributes(&number)).unwrap();
    let saved = repository.save(room).await.unwrap();
    assert!(saved.id > 0);

    let loaded = repository.find_by_id(saved.id).await.unwrap().unwrap();
    assert_eq!(loaded.view_types, saved.view_types);
    assert_eq!(loaded.amenities, saved.amenities);

    repository.delete(saved.id).await.unwrap();
    assert!(repository.find_by_id(saved.id).await.unwrap().is_none());
}

#[tokio::test]
#[ignore]
async fn test_overlapping_insert_loses_in_storage() {
    let pool = pool().await;
    let rooms = MySqlRoomRepository::new(pool.get_pool().clone());
    let reservations = MySqlReservationRepository::new(pool.get_pool().clone());
    let ledger = MySqlOccupancyLedger::new(pool.get_pool().clone());

    let number = format!("it-{}", Utc::now().timestamp_nanos_opt().unwrap_or_default());
    let room = rooms.save(Room::new(0, attributes(&number)).unwrap()).await.unwrap();

    let start = Utc::now() + Duration::days(30);
    let end = start + Duration::days(4);
    let draft = |client_id| ReservationDraft {
        client_id,
        hotel_id: 1,
        room_id: room.id,
        start_date: start,
        end_date: end,
        total_price: 440.0,
        status: ReservationStatus::Confirmed,
    };

    let winner = reservations
        .save(Reservation::new(0, draft(1), Utc::now()).unwrap())
        .await
        .unwrap();
    assert!(ledger.has_overlap(room.id, start, end).await.unwrap());

    let err = reservations
        .save(Reservation::new(0, draft(2), Utc::now()).unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Conflict { .. }));

    reservations.delete(winner.id).await.unwrap();
    rooms.delete(room.id).await.unwrap();
}
