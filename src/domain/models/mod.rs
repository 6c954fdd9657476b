pub mod config;
pub mod pod;
pub mod progress;

pub use config::{CacheConfig, Config, LoggingConfig, ProgressConfig};
pub use pod::{PodPhase, PodRef};
pub use progress::{ProgressItem, ProgressState};
