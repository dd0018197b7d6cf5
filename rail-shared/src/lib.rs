pub mod models;

pub use models::seat::{Seat, SeatMap, SeatMapError};
pub use models::reservation::{ReservationRequest, ReservationResult};
pub use models::events::SeatsReservedEvent;
