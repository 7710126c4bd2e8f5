//! Type definitions for executors-report

mod error;
mod record;
mod settings;
mod summary;

pub use error::*;
pub use record::*;
pub use settings::*;
pub use summary::*;
