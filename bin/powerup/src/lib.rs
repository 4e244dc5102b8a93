mod config;
mod outcome;
mod registry;
mod service;
mod status;
mod web_service;

#[cfg(test)]
mod mocks;

mod error;
pub use error::Error;

pub use config::Config;
pub use outcome::{PowerState, WakeOutcome};
pub use registry::{Device, Registry};
pub use service::PowerService;
pub use status::{DeviceStatus, StatusMap};
pub use web_service::router;

pub type ErasedError = Box<dyn std::error::Error + Send + Sync>;
pub type Result<T> = std::result::Result<T, Error>;
