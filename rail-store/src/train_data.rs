use async_trait::async_trait;
use rail_core::{BoxError, TrainDataProvider};
use rail_shared::SeatMap;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tokio::sync::RwLock;
use tracing::{info, warn};

#[derive(Debug, thiserror::Error)]
pub enum TrainDataError {
    #[error("Unknown train: {0}")]
    UnknownTrain(String),

    #[error("Seat not found on train {train_id}: {seat}")]
    UnknownSeat { train_id: String, seat: String },

    #[error("Seat {seat} on train {train_id} is already booked with reference {booking_reference}")]
    AlreadyBooked {
        train_id: String,
        seat: String,
        booking_reference: String,
    },

    #[error("Failed to read train fixture: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid train fixture: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct TrainFixture {
    seats: SeatMap,
}

/// Train data service holding every train's seat map in memory
#[derive(Debug, Default)]
pub struct InMemoryTrainData {
    trains: RwLock<HashMap<String, SeatMap>>,
}

impl InMemoryTrainData {
    pub fn from_trains(trains: HashMap<String, SeatMap>) -> Self {
        Self {
            trains: RwLock::new(trains),
        }
    }

    /// Parse `{"<train id>": {"seats": {...}}, ...}`
    pub fn from_json_str(json: &str) -> Result<Self, TrainDataError> {
        let fixtures: HashMap<String, TrainFixture> = serde_json::from_str(json)?;
        let trains = fixtures
            .into_iter()
            .map(|(train_id, fixture)| (train_id, fixture.seats))
            .collect();
        Ok(Self::from_trains(trains))
    }

    pub fn from_fixture_file(path: impl AsRef<Path>) -> Result<Self, TrainDataError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let data = Self::from_json_str(&json)?;
        info!("Loaded train fixture from {}", path.as_ref().display());
        Ok(data)
    }

    pub async fn train_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.trains.read().await.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub async fn data_for_train(&self, train_id: &str) -> Result<SeatMap, TrainDataError> {
        self.trains
            .read()
            .await
            .get(train_id)
            .cloned()
            .ok_or_else(|| TrainDataError::UnknownTrain(train_id.to_string()))
    }

    /// Book every listed seat under `booking_reference`, or none of them.
    ///
    /// Booking a seat again under the reference it already holds is accepted.
    pub async fn try_reserve(
        &self,
        train_id: &str,
        seats: &[String],
        booking_reference: &str,
    ) -> Result<(), TrainDataError> {
        let mut trains = self.trains.write().await;
        let seat_map = trains
            .get_mut(train_id)
            .ok_or_else(|| TrainDataError::UnknownTrain(train_id.to_string()))?;

        for id in seats {
            let seat = seat_map.get(id).ok_or_else(|| TrainDataError::UnknownSeat {
                train_id: train_id.to_string(),
                seat: id.clone(),
            })?;
            if !seat.is_free() && seat.booking_reference != booking_reference {
                return Err(TrainDataError::AlreadyBooked {
                    train_id: train_id.to_string(),
                    seat: id.clone(),
                    booking_reference: seat.booking_reference.clone(),
                });
            }
        }

        for id in seats {
            seat_map.set_booking_reference(id, booking_reference);
        }
        Ok(())
    }

    /// Clear every booking on a train
    pub async fn reset(&self, train_id: &str) -> Result<(), TrainDataError> {
        let mut trains = self.trains.write().await;
        let seat_map = trains
            .get_mut(train_id)
            .ok_or_else(|| TrainDataError::UnknownTrain(train_id.to_string()))?;
        seat_map.clear_bookings();
        info!("Reset bookings on train {}", train_id);
        Ok(())
    }
}

#[async_trait]
impl TrainDataProvider for InMemoryTrainData {
    async fn train(&self, train_id: &str) -> Result<SeatMap, BoxError> {
        Ok(self.data_for_train(train_id).await?)
    }

    async fn reserve(&self, train_id: &str, seats: &[String], booking_reference: &str) {
        if let Err(e) = self.try_reserve(train_id, seats, booking_reference).await {
            warn!("Reservation {} on train {} not recorded: {}", booking_reference, train_id, e);
        }
    }
}
