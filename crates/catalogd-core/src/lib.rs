use thiserror::Error;

pub mod app_config;
pub mod catalog;
pub mod config;
pub mod filter;

pub use app_config::{AppConfig, Environment};
pub use catalog::{Category, NewCategory, Product, Variant};
pub use config::{load_app_config, load_app_config_from_env};
pub use filter::{Filter, FilterOp};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
