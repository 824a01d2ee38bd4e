// Library exports for the rotator binary

pub mod app;
pub mod config;
pub mod telemetry;
pub mod walkthrough;

pub use app::{run, run_with, RotatorError};
pub use config::{ConfigError, RotatorConfig};
pub use walkthrough::WalkthroughReport;
