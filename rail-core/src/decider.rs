use rail_shared::{Seat, SeatMap};
use serde::{Deserialize, Serialize};

/// Default occupancy cap in percent
pub const DEFAULT_MAX_OCCUPANCY_PERCENT: u8 = 70;

/// Why a request was turned down
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "reason", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RejectReason {
    /// The seat map has no seats at all
    EmptyTrain,
    NothingRequested,
    /// Occupancy already at or above the cap
    TrainFull { occupancy_percent: u32 },
    /// Granting the request would push occupancy above the cap
    OverCapacity { projected_percent: u32 },
    NotEnoughFreeSeats { free: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Reserve(Vec<String>),
    Reject(RejectReason),
}

impl Decision {
    pub fn into_seats(self) -> Vec<String> {
        match self {
            Decision::Reserve(seats) => seats,
            Decision::Reject(_) => Vec::new(),
        }
    }
}

/// Decides which seats, if any, to reserve on a train.
///
/// Pure: the seat map is only read, and the same input always yields the
/// same selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReservationDecider {
    max_occupancy_percent: u8,
}

impl Default for ReservationDecider {
    fn default() -> Self {
        Self::new()
    }
}

impl ReservationDecider {
    pub fn new() -> Self {
        Self {
            max_occupancy_percent: DEFAULT_MAX_OCCUPANCY_PERCENT,
        }
    }

    pub fn with_max_occupancy_percent(percent: u8) -> Self {
        Self {
            max_occupancy_percent: percent.min(100),
        }
    }

    pub fn max_occupancy_percent(&self) -> u8 {
        self.max_occupancy_percent
    }

    /// Seat identifiers to reserve; empty when nothing should be reserved
    pub fn decide(&self, seat_map: &SeatMap, requested: usize) -> Vec<String> {
        self.evaluate(seat_map, requested).into_seats()
    }

    pub fn evaluate(&self, seat_map: &SeatMap, requested: usize) -> Decision {
        let total = seat_map.len();
        if total == 0 {
            return Decision::Reject(RejectReason::EmptyTrain);
        }
        if requested == 0 {
            return Decision::Reject(RejectReason::NothingRequested);
        }

        let reserved = seat_map.reserved_count();
        let cap = u128::from(self.max_occupancy_percent);

        // Two separate checks: at exactly the cap before the request is a
        // rejection, at exactly the cap after granting is allowed.
        if reserved as u128 * 100 >= cap * total as u128 {
            return Decision::Reject(RejectReason::TrainFull {
                occupancy_percent: percent_of(reserved, total),
            });
        }
        let projected = reserved as u128 + requested as u128;
        if projected * 100 > cap * total as u128 {
            return Decision::Reject(RejectReason::OverCapacity {
                projected_percent: percent_of(reserved.saturating_add(requested), total),
            });
        }

        let free = seat_map.free_count();
        if free < requested {
            return Decision::Reject(RejectReason::NotEnoughFreeSeats { free });
        }

        let seats = same_coach_selection(seat_map, requested)
            .unwrap_or_else(|| first_free_seats(seat_map, requested));
        Decision::Reserve(seats)
    }
}

/// First coach, in map order, holding enough free seats for the whole party
fn same_coach_selection(seat_map: &SeatMap, requested: usize) -> Option<Vec<String>> {
    seat_map.coaches().into_iter().find_map(|coach| {
        let mut free: Vec<&Seat> = seat_map
            .iter()
            .filter(|seat| seat.coach == coach && seat.is_free())
            .collect();
        if free.len() < requested {
            return None;
        }
        // Stable, so unnumbered seats keep map order after the numbered ones
        free.sort_by_key(|seat| (seat.number_key().is_none(), seat.number_key()));
        Some(free.into_iter().take(requested).map(|seat| seat.id.clone()).collect())
    })
}

fn first_free_seats(seat_map: &SeatMap, requested: usize) -> Vec<String> {
    seat_map
        .iter()
        .filter(|seat| seat.is_free())
        .take(requested)
        .map(|seat| seat.id.clone())
        .collect()
}

fn percent_of(count: usize, total: usize) -> u32 {
    ((count as u128 * 100) / total as u128).min(u128::from(u32::MAX)) as u32
}
