//! Cloudflare signature heuristic over a response's headers.

use std::collections::HashMap;

use iplens_core::CloudflareCheckResult;

/// Substring of the `server` header that identifies Cloudflare's edge.
pub const CLOUDFLARE_SERVER_SIGNATURE: &str = "cloudflare";

/// Decides whether a site is fronted by Cloudflare from its response headers.
///
/// Header names are matched case-insensitively. The site counts as using
/// Cloudflare if any of these hold:
///
/// 1. `cf-ray` is present (value reported as `ray_id`);
/// 2. `cf-cache-status` is present (value reported as `cache_status`);
/// 3. `server` is present and contains `cloudflare`, ignoring case (value
///    reported as `server_header`; a non-matching `server` is not reported).
///
/// No signal yields a negative result with every field absent. Pure: the same
/// headers always give the same result.
#[must_use]
pub fn detect<I, K, V>(headers: I) -> CloudflareCheckResult
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let headers: HashMap<String, String> = headers
        .into_iter()
        .map(|(k, v)| (k.as_ref().to_ascii_lowercase(), v.as_ref().to_owned()))
        .collect();

    let ray_id = headers.get("cf-ray").cloned();
    let cache_status = headers.get("cf-cache-status").cloned();
    let server_header = headers
        .get("server")
        .filter(|v| v.to_lowercase().contains(CLOUDFLARE_SERVER_SIGNATURE))
        .cloned();

    CloudflareCheckResult {
        using_cloudflare: ray_id.is_some() || cache_status.is_some() || server_header.is_some(),
        ray_id,
        cache_status,
        server_header,
    }
}
