pub mod decider;
pub mod office;
pub mod provider;

pub use decider::{Decision, RejectReason, ReservationDecider};
pub use office::TicketOffice;
pub use provider::{BookingReferenceGenerator, BoxError, TrainDataProvider};

#[derive(Debug, thiserror::Error)]
pub enum ReservationError {
    #[error("Seat data unavailable for train {train_id}: {source}")]
    DataUnavailable {
        train_id: String,
        #[source]
        source: BoxError,
    },
    #[error("Booking reference unavailable: {0}")]
    ReferenceUnavailable(#[source] BoxError),
}

pub type ReservationOutcome<T> = Result<T, ReservationError>;
