//! HTTP client for the ipapi.co-style geolocation API.
//!
//! Every lookup is a single `GET <base>/{subject}/json/` with no retry. The
//! response is decoded into [`ProviderResponse`] and normalized, so callers
//! always get back either an [`IpRecord`] or a [`LookupError`].

use std::time::Duration;

use iplens_core::{IpRecord, Subject, DEFAULT_PROVIDER_BASE_URL};
use reqwest::{Client, Url};

use crate::error::LookupError;
use crate::normalize::{normalize_response, provider_error};
use crate::types::ProviderResponse;

/// Client for the geolocation provider.
///
/// Use [`IpLookupClient::new`] for the public provider or
/// [`IpLookupClient::with_base_url`] to point at a mock server in tests.
pub struct IpLookupClient {
    client: Client,
    base_url: Url,
}

impl IpLookupClient {
    /// Creates a client pointed at the public provider.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, LookupError> {
        Self::with_base_url(timeout_secs, user_agent, DEFAULT_PROVIDER_BASE_URL)
    }

    /// Creates a client with a custom base URL.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`LookupError::InvalidBaseUrl`] if
    /// `base_url` is not an absolute URL that can carry a path.
    pub fn with_base_url(
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, LookupError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Trailing slash so subject segments are appended under the base path
        // instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| LookupError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(LookupError::InvalidBaseUrl {
                url: base_url.to_owned(),
                reason: "URL cannot carry a path".to_string(),
            });
        }

        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    /// Parses `input` as a [`Subject`] and looks it up.
    ///
    /// Blank input and `me` look up the caller's own address.
    ///
    /// # Errors
    ///
    /// See [`Self::lookup`].
    pub async fn lookup_str(&self, input: &str) -> Result<IpRecord, LookupError> {
        self.lookup(&Subject::parse(input)).await
    }

    /// Fetches geolocation metadata for `subject`.
    ///
    /// Issues exactly one request. A provider error object is reported even
    /// when it arrives with a non-2xx status (e.g. rate limiting).
    ///
    /// # Errors
    ///
    /// - [`LookupError::Provider`] if the provider reports a failure.
    /// - [`LookupError::Http`] on network failure or timeout.
    /// - [`LookupError::UnexpectedStatus`] on a non-2xx status without an
    ///   error object in the body.
    /// - [`LookupError::Deserialize`] if a 2xx body is not the expected JSON.
    /// - [`LookupError::ContractViolation`] if a required field is missing.
    pub async fn lookup(&self, subject: &Subject) -> Result<IpRecord, LookupError> {
        let url = self.build_url(subject)?;
        tracing::debug!(%url, subject = %subject, "requesting geolocation data");

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(Self::error_from_failed_body(&body, status.as_u16(), &url));
        }

        let raw: ProviderResponse =
            serde_json::from_str(&body).map_err(|e| LookupError::Deserialize {
                context: format!("lookup({subject})"),
                source: e,
            })?;

        normalize_response(raw).inspect_err(|e| {
            tracing::warn!(subject = %subject, error = %e, "geolocation lookup rejected");
        })
    }

    /// Builds `<base>/{subject}/json/`, or `<base>/json/` for the caller's
    /// own address. The subject is percent-encoded as a single path segment.
    fn build_url(&self, subject: &Subject) -> Result<Url, LookupError> {
        let mut url = self.base_url.clone();
        {
            let mut segments =
                url.path_segments_mut()
                    .map_err(|()| LookupError::InvalidBaseUrl {
                        url: self.base_url.to_string(),
                        reason: "URL cannot carry a path".to_string(),
                    })?;
            segments.pop_if_empty();
            if let Some(target) = subject.target() {
                segments.push(target);
            }
            segments.push("json");
            segments.push("");
        }
        Ok(url)
    }

    /// Classifies a non-2xx response: a body flagged as an error, or one that
    /// carries a non-blank `reason`, is a provider error. Anything else is an
    /// unexpected status.
    fn error_from_failed_body(body: &str, status: u16, url: &Url) -> LookupError {
        match serde_json::from_str::<ProviderResponse>(body) {
            Ok(raw) if raw.is_error() || raw.has_reason() => {
                let err = provider_error(raw.reason);
                tracing::warn!(status, error = %err, "provider returned error status");
                err
            }
            _ => LookupError::UnexpectedStatus {
                status,
                url: url.to_string(),
            },
        }
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
