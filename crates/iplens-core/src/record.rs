//! Normalized results handed to the presentation layer.
//!
//! Both records are built once and never mutated; a newer lookup or check
//! replaces the previous value wholesale.

use serde::{Deserialize, Serialize};

/// Placeholder shown for optional fields the provider did not supply.
pub const NOT_AVAILABLE: &str = "N/A";

/// Geolocation and network metadata for a single address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IpRecord {
    pub ip: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub country_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    /// Passed through as received; no range check.
    pub latitude: f64,
    pub longitude: f64,
}

impl IpRecord {
    /// `"city, region, country"`, skipping parts the provider left empty.
    #[must_use]
    pub fn location_line(&self) -> String {
        let parts: Vec<&str> = [&self.city, &self.region, &self.country_name]
            .into_iter()
            .map(String::as_str)
            .filter(|s| !s.is_empty())
            .collect();
        if parts.is_empty() {
            NOT_AVAILABLE.to_string()
        } else {
            parts.join(", ")
        }
    }

    #[must_use]
    pub fn organization_or_na(&self) -> &str {
        self.organization.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    #[must_use]
    pub fn asn_or_na(&self) -> &str {
        self.asn.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    #[must_use]
    pub fn timezone_or_na(&self) -> &str {
        self.timezone.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    #[must_use]
    pub fn postal_code_or_na(&self) -> &str {
        self.postal_code.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    /// OpenStreetMap link centred on the record's coordinates at street zoom.
    #[must_use]
    pub fn map_url(&self) -> String {
        format!(
            "https://www.openstreetmap.org/?mlat={lat}&mlon={lon}#map=13/{lat}/{lon}",
            lat = self.latitude,
            lon = self.longitude
        )
    }
}

/// Outcome of inspecting a site's response headers for Cloudflare signatures.
///
/// Each optional field is present only when its signal triggered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloudflareCheckResult {
    pub using_cloudflare: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ray_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_header: Option<String>,
}
