pub mod app_config;
pub mod reference;
pub mod train_data;

pub use app_config::AppConfig;
pub use reference::{SequentialReferenceGenerator, UuidReferenceGenerator};
pub use train_data::{InMemoryTrainData, TrainDataError};
