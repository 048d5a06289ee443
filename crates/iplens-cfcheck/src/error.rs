use thiserror::Error;

/// Message shown when no domain was entered.
pub const EMPTY_DOMAIN_MESSAGE: &str = "Please enter a domain";

/// Message shown for any failure to fetch the target's headers.
pub const CHECK_FAILED_MESSAGE: &str = "Failed to check domain. Make sure it is accessible.";

/// Errors from fetching a site's headers through the inspection relay.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("no domain given")]
    EmptyDomain,

    #[error("invalid target \"{input}\": {reason}")]
    InvalidTarget { input: String, reason: String },

    #[error("invalid proxy URL '{url}': {reason}")]
    InvalidProxyUrl { url: String, reason: String },

    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from proxy")]
    UnexpectedStatus { status: u16 },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

impl CheckError {
    /// Human-readable message suitable for showing next to the input.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::EmptyDomain => EMPTY_DOMAIN_MESSAGE,
            _ => CHECK_FAILED_MESSAGE,
        }
    }
}
