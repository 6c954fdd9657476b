pub mod log_service;
pub mod prettify;
pub mod progress;

pub use log_service::LogService;
pub use prettify::{prettify_logs, prettify_logs_async};
pub use progress::{extract_progress, ProgressExtractor, ProgressOptions};
