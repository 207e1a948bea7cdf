//! CLI command implementations.

mod apod;
mod ask;
mod config;
mod doctor;

pub use apod::run_apod;
pub use ask::run_ask;
pub use config::run_config;
pub use doctor::run_doctor;
