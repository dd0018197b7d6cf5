#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
pub struct SeatsReservedEvent {
    pub train_id: String,
    pub seats: Vec<String>,
    pub booking_reference: String,
    pub reserved_at: i64,
}

impl SeatsReservedEvent {
    pub fn now(train_id: &str, seats: &[String], booking_reference: &str) -> Self {
        Self {
            train_id: train_id.to_string(),
            seats: seats.to_vec(),
            booking_reference: booking_reference.to_string(),
            reserved_at: chrono::Utc::now().timestamp(),
        }
    }
}
