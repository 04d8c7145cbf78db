mod app_config;
mod config;
pub mod platform;
pub mod tracking;

pub use app_config::{
    AppConfig, Environment, DEFAULT_LSA_BASE_URL, DEFAULT_REQUEST_TIMEOUT_SECS,
    DEFAULT_SEVEN_ELEVEN_MAX_ATTEMPTS, DEFAULT_TESSERACT_BIN, DEFAULT_USER_AGENT,
};
pub use config::{load_app_config, load_app_config_from_env};
pub use platform::Platform;
pub use tracking::{TrackingInfo, TrackingSummary};

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// The identifier is not one of the supported platform strings.
    /// Matching is exact and case-sensitive.
    #[error("invalid platform: {0}")]
    InvalidPlatform(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
