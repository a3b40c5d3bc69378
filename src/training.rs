/// Training configuration and its defaults
pub mod config;
/// Per-epoch metrics and the report of a finished run
pub mod metric;
/// The cancellable training loop
pub mod trainer;

pub use config::*;
pub use metric::*;
pub use trainer::*;
