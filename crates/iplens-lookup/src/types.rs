//! Geolocation provider response types.
//!
//! Models the ipapi.co-style JSON object. Every field is optional on the wire:
//! error responses carry only `error`/`reason`, and successful responses omit
//! fields the provider has no data for. Required-field checks happen in
//! [`crate::normalize`].

use serde::Deserialize;

/// Raw JSON object returned by `GET <base>/{subject}/json/`.
#[derive(Debug, Default, Deserialize)]
pub struct ProviderResponse {
    /// `true` when the provider rejected the request.
    #[serde(default)]
    pub error: Option<bool>,
    #[serde(default)]
    pub reason: Option<String>,

    #[serde(default)]
    pub ip: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub country_name: Option<String>,
    /// ISP / organization name.
    #[serde(default)]
    pub org: Option<String>,
    /// Autonomous system, e.g. `"AS15169"`.
    #[serde(default)]
    pub asn: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub postal: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl ProviderResponse {
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.error == Some(true)
    }

    /// Whether the payload carries a non-blank `reason`.
    #[must_use]
    pub fn has_reason(&self) -> bool {
        self.reason.as_deref().is_some_and(|r| !r.trim().is_empty())
    }
}
