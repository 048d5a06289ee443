//! Cloudflare check command handler.

use iplens_cfcheck::HeaderProxyClient;
use iplens_core::AppConfig;

use crate::render::{print_json, render_check};

/// Fetch `domain`'s headers through the relay and report Cloudflare signals.
///
/// # Errors
///
/// Returns an error with the user-facing message if the domain is empty or
/// its headers cannot be fetched.
pub(crate) async fn run_check(config: &AppConfig, domain: &str, json: bool) -> anyhow::Result<()> {
    let client = HeaderProxyClient::with_proxy_url(
        config.request_timeout_secs,
        &config.user_agent,
        &config.proxy_url,
    )
    .map_err(|e| anyhow::anyhow!("failed to build proxy client: {e}"))?;

    let result = client.check(domain).await.map_err(|e| {
        tracing::debug!(domain, error = %e, "cloudflare check failed");
        anyhow::anyhow!(e.user_message())
    })?;

    if json {
        return print_json(&result);
    }
    print!("{}", render_check(domain.trim(), &result));
    Ok(())
}
