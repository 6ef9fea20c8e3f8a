//! Shared configuration for the yysk media utilities.
//!
//! Holds the environment-driven [`AppConfig`], the explicit
//! [`HeaderImageOptions`] consumed by the header-image builder, and named
//! option presets loaded from YAML.

pub mod app_config;
pub mod config;
pub mod options;
pub mod presets;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use options::HeaderImageOptions;
pub use presets::{load_presets, Preset, PresetsFile};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read presets file {path}: {source}")]
    PresetsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse presets file: {0}")]
    PresetsFileParse(#[source] serde_yaml::Error),

    #[error("config validation failed: {0}")]
    Validation(String),
}
