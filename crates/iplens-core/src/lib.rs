pub mod app_config;
mod config;
pub mod record;
pub mod subject;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{
    load_app_config, load_app_config_from_env, DEFAULT_PROVIDER_BASE_URL, DEFAULT_PROXY_URL,
};
pub use record::{CloudflareCheckResult, IpRecord};
pub use subject::{Subject, SubjectKind, OWN_ADDRESS_SENTINEL};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
