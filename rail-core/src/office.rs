use crate::decider::{Decision, ReservationDecider};
use crate::provider::{BookingReferenceGenerator, TrainDataProvider};
use crate::{ReservationError, ReservationOutcome};
use rail_shared::{ReservationRequest, ReservationResult, SeatsReservedEvent};
use std::sync::Arc;

/// Takes reservation requests and turns them into booked seats
pub struct TicketOffice {
    train_data: Arc<dyn TrainDataProvider>,
    references: Arc<dyn BookingReferenceGenerator>,
    decider: ReservationDecider,
}

impl TicketOffice {
    pub fn new(
        train_data: Arc<dyn TrainDataProvider>,
        references: Arc<dyn BookingReferenceGenerator>,
    ) -> Self {
        Self::with_decider(train_data, references, ReservationDecider::new())
    }

    pub fn with_decider(
        train_data: Arc<dyn TrainDataProvider>,
        references: Arc<dyn BookingReferenceGenerator>,
        decider: ReservationDecider,
    ) -> Self {
        Self {
            train_data,
            references,
            decider,
        }
    }

    pub fn decider(&self) -> &ReservationDecider {
        &self.decider
    }

    pub async fn submit(&self, request: &ReservationRequest) -> ReservationOutcome<ReservationResult> {
        self.make_reservation(&request.train_id, request.seat_count).await
    }

    /// Reserve `seat_count` seats on `train_id` if the rules allow it.
    ///
    /// A declined request is `Ok` with no seats. Only collaborator failures
    /// are errors.
    pub async fn make_reservation(
        &self,
        train_id: &str,
        seat_count: usize,
    ) -> ReservationOutcome<ReservationResult> {
        let seat_map = self
            .train_data
            .train(train_id)
            .await
            .map_err(|source| ReservationError::DataUnavailable {
                train_id: train_id.to_string(),
                source,
            })?;

        let seats = match self.decider.evaluate(&seat_map, seat_count) {
            Decision::Reserve(seats) => seats,
            Decision::Reject(reason) => {
                tracing::debug!(train_id, seat_count, ?reason, "Reservation declined");
                return Ok(ReservationResult::declined(train_id));
            }
        };

        let booking_reference = self
            .references
            .reservation_number()
            .await
            .map_err(ReservationError::ReferenceUnavailable)?;

        self.train_data.reserve(train_id, &seats, &booking_reference).await;

        let event = SeatsReservedEvent::now(train_id, &seats, &booking_reference);
        tracing::info!(
            train_id = %event.train_id,
            seats = ?event.seats,
            booking_reference = %event.booking_reference,
            reserved_at = event.reserved_at,
            "Seats reserved"
        );

        Ok(ReservationResult::confirmed(train_id, seats, booking_reference))
    }
}
