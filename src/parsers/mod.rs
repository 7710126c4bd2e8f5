//! Input loaders for the settings document and the executor log

mod executors;
mod settings;

pub use executors::{parse_executors_logs, read_executors_logs};
pub use settings::read_settings;
