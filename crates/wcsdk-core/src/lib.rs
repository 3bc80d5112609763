//! Domain models, the `WooResult` envelope and application configuration
//! shared by every `wcsdk` crate.

pub mod app_config;
pub mod config;
pub mod error;
pub mod leaderboards;
pub mod shipping_labels;
pub mod site;
pub mod system_status;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::{GenericErrorType, WooError, WooErrorType, WooResult};
pub use leaderboards::{DateRange, StatsGranularity, TopPerformerProduct};
pub use shipping_labels::{
    AddressType, AddressVerificationResult, ShippingLabel, ShippingLabelAddress,
};
pub use site::Site;
pub use system_status::SiteSystemStatus;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid granularity: {0}")]
    InvalidGranularity(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
