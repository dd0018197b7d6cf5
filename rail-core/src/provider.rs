use async_trait::async_trait;
use rail_shared::SeatMap;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Source of truth for a train's seats
#[async_trait]
pub trait TrainDataProvider: Send + Sync {
    /// Fetch the current seat map of a train
    async fn train(&self, train_id: &str) -> Result<SeatMap, BoxError>;

    /// Command the provider to book seats under a reference.
    ///
    /// Fire-and-forget: the outcome is the provider's concern.
    async fn reserve(&self, train_id: &str, seats: &[String], booking_reference: &str);
}

/// Issues booking references
#[async_trait]
pub trait BookingReferenceGenerator: Send + Sync {
    async fn reservation_number(&self) -> Result<String, BoxError>;
}
