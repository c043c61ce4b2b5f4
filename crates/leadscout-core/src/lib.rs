pub mod app_config;
pub mod config;
pub mod fleet;
pub mod records;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use fleet::{load_fleet, FleetFile, ProxyScheme, ProxySpec};
pub use records::{BusinessRecord, ContactRecord, LeadRecord};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read proxy fleet file {path}: {source}")]
    FleetFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse proxy fleet file: {0}")]
    FleetFileParse(#[from] serde_yaml::Error),

    #[error("configuration validation failed: {0}")]
    Validation(String),
}
