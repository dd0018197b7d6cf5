use serde::{Deserialize, Serialize};

/// A request to reserve `seat_count` seats on one train
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReservationRequest {
    pub train_id: String,
    pub seat_count: usize,
}

impl ReservationRequest {
    pub fn new(train_id: impl Into<String>, seat_count: usize) -> Self {
        Self {
            train_id: train_id.into(),
            seat_count,
        }
    }
}

/// Outcome of a reservation attempt.
///
/// An empty `seats` list means no reservation was made; that is a normal
/// outcome, not a failure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReservationResult {
    pub train_id: String,
    pub seats: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_reference: Option<String>,
}

impl ReservationResult {
    pub fn confirmed(train_id: impl Into<String>, seats: Vec<String>, booking_reference: String) -> Self {
        Self {
            train_id: train_id.into(),
            seats,
            booking_reference: Some(booking_reference),
        }
    }

    pub fn declined(train_id: impl Into<String>) -> Self {
        Self {
            train_id: train_id.into(),
            seats: Vec::new(),
            booking_reference: None,
        }
    }

    pub fn is_confirmed(&self) -> bool {
        !self.seats.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declined_result_omits_reference() {
        let result = ReservationResult::declined("express_2000");
        assert!(!result.is_confirmed());

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json, serde_json::json!({ "train_id": "express_2000", "seats": [] }));
    }

    #[test]
    fn test_confirmed_result() {
        let result = ReservationResult::confirmed(
            "express_2000",
            vec!["1A".to_string(), "2A".to_string()],
            "75bcd15".to_string(),
        );
        assert!(result.is_confirmed());
        assert_eq!(result.booking_reference.as_deref(), Some("75bcd15"));
    }
}
