use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Runtime settings for the lookup tool, read from `IPLENS_*` variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Root of the geolocation provider; the subject and `/json/` are appended.
    pub provider_base_url: String,
    /// Header inspection relay; the target is passed as the `url` query param.
    pub proxy_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Single-slot file backing the session cache.
    pub session_file: PathBuf,
    /// Seconds a cached lookup stays usable; older entries are refetched.
    pub session_ttl_secs: u64,
}
