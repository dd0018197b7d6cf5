use crate::reference::{SequentialReferenceGenerator, UuidReferenceGenerator, DEFAULT_REFERENCE_START};
use crate::train_data::{InMemoryTrainData, TrainDataError};
use rail_core::decider::DEFAULT_MAX_OCCUPANCY_PERCENT;
use rail_core::{BookingReferenceGenerator, ReservationDecider, TicketOffice};
use serde::Deserialize;
use std::env;
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub business_rules: BusinessRules,
    pub trains: TrainsConfig,
    #[serde(default)]
    pub booking_reference: BookingReferenceConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BusinessRules {
    #[serde(default = "default_max_occupancy")]
    pub max_occupancy_percent: u8,
}

impl Default for BusinessRules {
    fn default() -> Self {
        Self {
            max_occupancy_percent: default_max_occupancy(),
        }
    }
}

fn default_max_occupancy() -> u8 { DEFAULT_MAX_OCCUPANCY_PERCENT }

#[derive(Debug, Deserialize, Clone)]
pub struct TrainsConfig {
    /// JSON file with the seat maps served by the in-memory train data service
    pub fixture_path: String,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceKind {
    #[default]
    Sequential,
    Uuid,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BookingReferenceConfig {
    #[serde(default)]
    pub kind: ReferenceKind,
    #[serde(default = "default_reference_start")]
    pub start: u64,
}

impl Default for BookingReferenceConfig {
    fn default() -> Self {
        Self {
            kind: ReferenceKind::default(),
            start: default_reference_start(),
        }
    }
}

fn default_reference_start() -> u64 { DEFAULT_REFERENCE_START }

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(Path::new("config"))
    }

    /// Layered load: `default`, then `{RUN_MODE}` and `local` when present,
    /// then `RAIL__*` environment variables.
    pub fn load_from(dir: &Path) -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        let layer = |name: &str| dir.join(name).to_string_lossy().into_owned();

        let s = config::Config::builder()
            .add_source(config::File::with_name(&layer("default")))
            .add_source(config::File::with_name(&layer(&run_mode)).required(false))
            // Not checked in
            .add_source(config::File::with_name(&layer("local")).required(false))
            // e.g. RAIL__BUSINESS_RULES__MAX_OCCUPANCY_PERCENT=80
            .add_source(config::Environment::with_prefix("RAIL").separator("__"))
            .build()?;

        s.try_deserialize()
    }

    pub fn decider(&self) -> ReservationDecider {
        ReservationDecider::with_max_occupancy_percent(self.business_rules.max_occupancy_percent)
    }

    pub fn reference_generator(&self) -> Arc<dyn BookingReferenceGenerator> {
        match self.booking_reference.kind {
            ReferenceKind::Sequential => {
                Arc::new(SequentialReferenceGenerator::starting_at(self.booking_reference.start))
            }
            ReferenceKind::Uuid => Arc::new(UuidReferenceGenerator),
        }
    }

    /// Wire a ticket office to the configured collaborators.
    ///
    /// `base_dir` anchors a relative fixture path.
    pub fn ticket_office(
        &self,
        base_dir: &Path,
    ) -> Result<(TicketOffice, Arc<InMemoryTrainData>), TrainDataError> {
        let train_data = Arc::new(InMemoryTrainData::from_fixture_file(
            base_dir.join(&self.trains.fixture_path),
        )?);
        let office = TicketOffice::with_decider(
            train_data.clone(),
            self.reference_generator(),
            self.decider(),
        );
        Ok((office, train_data))
    }
}
