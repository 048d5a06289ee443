use thiserror::Error;

/// Reason used when the provider flags an error without explaining it.
pub const GENERIC_PROVIDER_REASON: &str = "Invalid IP or domain";

/// Reason shown for any failure to complete the request itself.
pub const TRANSPORT_REASON: &str = "Failed to fetch IP data";

/// Reason shown when a successful response lacks a required field.
pub const MALFORMED_REASON: &str = "malformed provider response";

/// Broad failure category of a [`LookupError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupErrorKind {
    /// The provider answered and reported a failure.
    Provider,
    /// The request could not complete or the body was unreadable.
    Transport,
    /// The provider answered successfully but broke its response contract.
    ContractViolation,
}

/// Errors returned by the geolocation lookup client.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The provider returned `{"error": true, ...}`.
    #[error("provider error: {reason}")]
    Provider { reason: String },

    /// Network, TLS or timeout failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx status with no provider error object in the body.
    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The response body was not valid JSON.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The configured provider base URL cannot carry a path.
    #[error("invalid provider base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// A field the provider always sends on success was missing.
    #[error("malformed provider response: missing `{field}`")]
    ContractViolation { field: &'static str },
}

impl LookupError {
    #[must_use]
    pub fn kind(&self) -> LookupErrorKind {
        match self {
            Self::Provider { .. } => LookupErrorKind::Provider,
            Self::ContractViolation { .. } => LookupErrorKind::ContractViolation,
            Self::Http(_)
            | Self::UnexpectedStatus { .. }
            | Self::Deserialize { .. }
            | Self::InvalidBaseUrl { .. } => LookupErrorKind::Transport,
        }
    }

    /// Human-readable message suitable for showing next to the input.
    #[must_use]
    pub fn reason(&self) -> String {
        match self {
            Self::Provider { reason } => reason.clone(),
            Self::ContractViolation { .. } => MALFORMED_REASON.to_string(),
            _ => TRANSPORT_REASON.to_string(),
        }
    }
}
