//! Conversion of provider responses into [`IpRecord`]s.

use iplens_core::IpRecord;

use crate::error::{LookupError, GENERIC_PROVIDER_REASON};
use crate::types::ProviderResponse;

/// Maps a provider payload to either a record or a [`LookupError`].
///
/// An `error: true` payload becomes [`LookupError::Provider`]. Otherwise `ip`,
/// `latitude` and `longitude` must be present; location names default to an
/// empty string, and optional strings that are blank are treated as absent.
///
/// # Errors
///
/// - [`LookupError::Provider`] if the payload flags an error.
/// - [`LookupError::ContractViolation`] if a required field is missing.
pub fn normalize_response(raw: ProviderResponse) -> Result<IpRecord, LookupError> {
    if raw.is_error() {
        return Err(provider_error(raw.reason));
    }

    let ip = raw
        .ip
        .filter(|s| !s.trim().is_empty())
        .ok_or(LookupError::ContractViolation { field: "ip" })?;
    let latitude = raw
        .latitude
        .ok_or(LookupError::ContractViolation { field: "latitude" })?;
    let longitude = raw
        .longitude
        .ok_or(LookupError::ContractViolation { field: "longitude" })?;

    Ok(IpRecord {
        ip,
        city: raw.city.unwrap_or_default(),
        region: raw.region.unwrap_or_default(),
        country_name: raw.country_name.unwrap_or_default(),
        organization: non_blank(raw.org),
        asn: non_blank(raw.asn),
        timezone: non_blank(raw.timezone),
        postal_code: non_blank(raw.postal),
        latitude,
        longitude,
    })
}

/// Builds a provider error, falling back to the generic reason.
pub(crate) fn provider_error(reason: Option<String>) -> LookupError {
    let reason = non_blank(reason).unwrap_or_else(|| GENERIC_PROVIDER_REASON.to_string());
    LookupError::Provider { reason }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
