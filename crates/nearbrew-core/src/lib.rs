//! Shared domain types and configuration for the nearbrew workspace.
//!
//! Everything here is backend-agnostic: coordinates, search origins,
//! raw candidates and ranked places, plus the environment-driven
//! [`AppConfig`] the binaries load at startup.

mod app_config;
mod config;
mod types;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use types::{
    AddressParts, Candidate, Coordinate, CoordinateError, OriginSource, RankedPlace, SearchOrigin,
};

use thiserror::Error;

/// Errors raised while loading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable was present but could not be used.
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
