//! Check-in and checkout implementation.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::domain::entities::enums::ReservationStatus;
use crate::domain::entities::stay::Stay;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{
    OccupancyLedger, ReservationRepository, RoomRepository, StayRepository,
};
use crate::services::availability::AvailabilityService;
use crate::services::payment::PaymentService;

/// What the desk knows when a guest arrives.
///
/// Either `reservation_id` is set (reserved guest; client and room come from
/// the reservation) or it is not (walk-in; `client_id` is required and the
/// room is either given explicitly or auto-assigned from `hotel_id` and
/// `expected_departure`).
#[derive(Debug, Clone)]
pub struct CheckInRequest {
    pub reservation_id: Option<i64>,
    pub client_id: Option<i64>,
    pub room_id: Option<i64>,
    pub hotel_id: Option<i64>,
    pub expected_departure: Option<DateTime<Utc>>,
    pub employee_id: i64,
    pub check_in_time: DateTime<Utc>,
    pub comments: String,
}

impl CheckInRequest {
    /// Arrival of a guest holding a reservation
    pub fn from_reservation(
        reservation_id: i64,
        employee_id: i64,
        check_in_time: DateTime<Utc>,
    ) -> Self {
        Self {
            reservation_id: Some(reservation_id),
            client_id: None,
            room_id: None,
            hotel_id: None,
            expected_departure: None,
            employee_id,
            check_in_time,
            comments: String::new(),
        }
    }

    /// Arrival of a guest without a reservation
    pub fn walk_in(client_id: i64, employee_id: i64, check_in_time: DateTime<Utc>) -> Self {
        Self {
            reservation_id: None,
            client_id: Some(client_id),
            room_id: None,
            hotel_id: None,
            expected_departure: None,
            employee_id,
            check_in_time,
            comments: String::new(),
        }
    }
}

/// What the desk collects when a guest leaves
#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    pub stay_id: i64,
    pub employee_id: i64,
    pub final_price: f64,
    pub payment_method: String,
    pub checkout_time: DateTime<Utc>,
}

/// The check-in/checkout flows at the reception desk.
///
/// Checkout charges the guest before closing the stay, so a stay that was
/// already ended is never charged twice.
pub struct FrontDeskService<Res, S, R, L, P>
where
    Res: ReservationRepository,
    S: StayRepository,
    R: RoomRepository,
    L: OccupancyLedger,
    P: PaymentService,
{
    reservation_repository: Arc<Res>,
    stay_repository: Arc<S>,
    availability: AvailabilityService<R, L>,
    ledger: Arc<L>,
    payment: Arc<P>,
}

impl<Res, S, R, L, P> FrontDeskService<Res, S, R, L, P>
where
    Res: ReservationRepository,
    S: StayRepository,
    R: RoomRepository,
    L: OccupancyLedger,
    P: PaymentService,
{
    pub fn new(
        reservation_repository: Arc<Res>,
        stay_repository: Arc<S>,
        room_repository: Arc<R>,
        ledger: Arc<L>,
        payment: Arc<P>,
    ) -> Self {
        Self {
            reservation_repository,
            stay_repository,
            availability: AvailabilityService::new(room_repository, Arc::clone(&ledger)),
            ledger,
            payment,
        }
    }

    /// Open a stay for an arriving guest
    pub async fn check_in(&self, request: CheckInRequest) -> DomainResult<Stay> {
        match request.reservation_id {
            Some(reservation_id) => self.check_in_reserved(reservation_id, request).await,
            None => self.check_in_walk_in(request).await,
        }
    }

    async fn check_in_reserved(
        &self,
        reservation_id: i64,
        request: CheckInRequest,
    ) -> DomainResult<Stay> {
        let mut reservation = self
            .reservation_repository
            .find_by_id(reservation_id)
            .await?
            .ok_or(DomainError::not_found("Reservation", reservation_id))?;

        if !reservation.is_active() {
            return Err(DomainError::conflict(format!(
                "Reservation {reservation_id} was cancelled"
            )));
        }
        if reservation.status == ReservationStatus::Finished {
            return Err(DomainError::conflict(format!(
                "Reservation {reservation_id} was already checked in"
            )));
        }
        if let Some(client_id) = request.client_id {
            if client_id != reservation.client_id {
                return Err(DomainError::Forbidden {
                    message: format!(
                        "Reservation {reservation_id} does not belong to client {client_id}"
                    ),
                });
            }
        }
        if request.check_in_time < reservation.start_date {
            return Err(DomainError::validation(
                "Check-in is before the reserved period starts",
            ));
        }
        if request.check_in_time > reservation.end_date {
            return Err(DomainError::validation(
                "Check-in is after the reserved period ended",
            ));
        }

        // A reservation booked without a concrete room gets one on arrival
        let room_id = if reservation.room_id == 0 {
            self.availability
                .assign_room(
                    reservation.hotel_id,
                    reservation.start_date,
                    reservation.end_date,
                )
                .await?
                .id
        } else {
            reservation.room_id
        };

        let stay = Stay::check_in(
            0,
            reservation.client_id,
            room_id,
            Some(reservation.id),
            request.check_in_time,
            request.employee_id,
            request.comments,
        )?;
        let saved = self.stay_repository.save(stay).await?;

        // The reservation is consumed by the arrival; a late room assignment
        // is persisted with it
        let mut dirty = reservation.room_id != room_id;
        reservation.room_id = room_id;
        if reservation
            .status
            .can_transition_to(ReservationStatus::Finished)
        {
            reservation.status = ReservationStatus::Finished;
            dirty = true;
        }
        if dirty {
            self.reservation_repository.update(reservation).await?;
        }

        Ok(saved)
    }

    async fn check_in_walk_in(&self, request: CheckInRequest) -> DomainResult<Stay> {
        let client_id = request.client_id.ok_or(DomainError::validation(
            "Walk-in check-in requires a client id",
        ))?;

        let room_id = match request.room_id {
            Some(room_id) => {
                if self.room_occupied_at(room_id, request.check_in_time).await? {
                    return Err(DomainError::conflict(format!(
                        "Room {room_id} is occupied"
                    )));
                }
                room_id
            }
            None => {
                let (hotel_id, departure) =
                    match (request.hotel_id, request.expected_departure) {
                        (Some(hotel_id), Some(departure)) => (hotel_id, departure),
                        _ => {
                            return Err(DomainError::validation(
                                "Walk-in check-in requires a room, or a hotel and an expected departure for auto-assignment",
                            ))
                        }
                    };
                self.availability
                    .assign_room(hotel_id, request.check_in_time, departure)
                    .await?
                    .id
            }
        };

        info!(client_id, room_id, "walk-in check-in");

        let stay = Stay::check_in(
            0,
            client_id,
            room_id,
            None,
            request.check_in_time,
            request.employee_id,
            request.comments,
        )?;
        self.stay_repository.save(stay).await
    }

    /// Whether any active occupancy covers the instant `at`
    async fn room_occupied_at(&self, room_id: i64, at: DateTime<Utc>) -> DomainResult<bool> {
        let occupancies = self.ledger.active_occupancies(room_id).await?;
        Ok(occupancies
            .iter()
            .any(|occ| occ.start <= at && occ.end.map_or(true, |end| end > at)))
    }

    /// Charge the guest and close the stay
    pub async fn checkout(&self, request: CheckoutRequest) -> DomainResult<Stay> {
        if request.stay_id <= 0 {
            return Err(DomainError::validation("Invalid stay id"));
        }
        if request.final_price < 0.0 {
            return Err(DomainError::validation("Final price cannot be negative"));
        }
        if request.payment_method.trim().is_empty() {
            return Err(DomainError::validation("Payment method cannot be empty"));
        }

        let stay = self
            .stay_repository
            .find_by_id(request.stay_id)
            .await?
            .ok_or(DomainError::not_found("Stay", request.stay_id))?;

        if !stay.is_open() {
            return Err(DomainError::conflict(format!(
                "Stay {} already ended",
                stay.id
            )));
        }

        // Close first on a copy: every closing-data rejection must happen
        // before any money moves
        let mut closed = stay.clone();
        closed.close(
            request.checkout_time,
            request.employee_id,
            request.final_price,
            request.payment_method.clone(),
        )?;

        self.payment
            .process_payment(closed.id, request.final_price, &request.payment_method)
            .await?;

        let closed = self.stay_repository.update(closed).await?;
        info!(stay_id = closed.id, "checkout complete");
        Ok(closed)
    }
}
