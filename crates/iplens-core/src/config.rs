use std::path::PathBuf;

use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

pub const DEFAULT_PROVIDER_BASE_URL: &str = "https://ipapi.co";
pub const DEFAULT_PROXY_URL: &str = "https://api.allorigins.win/get";
const SESSION_FILE_NAME: &str = "iplens-session.json";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can feed a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let non_empty = |var: &str, default: &str| -> Result<String, ConfigError> {
        let raw = or_default(var, default);
        if raw.trim().is_empty() {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(raw)
    };

    let env = parse_environment(&or_default("IPLENS_ENV", "development"))?;
    let log_level = or_default("IPLENS_LOG_LEVEL", "warn");
    let provider_base_url = non_empty("IPLENS_PROVIDER_BASE_URL", DEFAULT_PROVIDER_BASE_URL)?;
    let proxy_url = non_empty("IPLENS_PROXY_URL", DEFAULT_PROXY_URL)?;
    let positive_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let value = parse_u64(var, default)?;
        if value == 0 {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(value)
    };

    let request_timeout_secs = positive_u64("IPLENS_REQUEST_TIMEOUT_SECS", "15")?;
    let user_agent = or_default("IPLENS_USER_AGENT", "iplens/0.1 (ip-lookup)");
    let session_file = lookup("IPLENS_SESSION_FILE").map_or_else(
        |_| std::env::temp_dir().join(SESSION_FILE_NAME),
        PathBuf::from,
    );
    let session_ttl_secs = positive_u64("IPLENS_SESSION_TTL_SECS", "1800")?;

    Ok(AppConfig {
        env,
        log_level,
        provider_base_url,
        proxy_url,
        request_timeout_secs,
        user_agent,
        session_file,
        session_ttl_secs,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "IPLENS_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
