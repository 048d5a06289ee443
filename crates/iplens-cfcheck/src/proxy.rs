//! Client for the CORS-bypass relay that reports a URL's response headers.

use std::collections::HashMap;
use std::time::Duration;

use iplens_core::{CloudflareCheckResult, DEFAULT_PROXY_URL};
use reqwest::{Client, Url};

use crate::detect::detect;
use crate::error::CheckError;
use crate::types::ProxyEnvelope;

/// Normalizes user input into an absolute target URL.
///
/// Input is trimmed and lowercased; `https://` is prepended when no
/// `http://` or `https://` scheme is given.
///
/// # Errors
///
/// - [`CheckError::EmptyDomain`] if the input is blank.
/// - [`CheckError::InvalidTarget`] if the result is not a valid URL.
pub fn format_target_url(input: &str) -> Result<Url, CheckError> {
    let trimmed = input.trim().to_lowercase();
    if trimmed.is_empty() {
        return Err(CheckError::EmptyDomain);
    }

    let with_scheme = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed
    } else {
        format!("https://{trimmed}")
    };

    let url = Url::parse(&with_scheme).map_err(|e| CheckError::InvalidTarget {
        input: input.to_owned(),
        reason: e.to_string(),
    })?;
    if url.host_str().is_none_or(str::is_empty) {
        return Err(CheckError::InvalidTarget {
            input: input.to_owned(),
            reason: "missing host".to_string(),
        });
    }
    Ok(url)
}

/// Fetches a target's response headers through the inspection relay.
pub struct HeaderProxyClient {
    client: Client,
    proxy_url: Url,
}

impl HeaderProxyClient {
    /// Creates a client pointed at the public relay.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, CheckError> {
        Self::with_proxy_url(timeout_secs, user_agent, DEFAULT_PROXY_URL)
    }

    /// Creates a client with a custom relay endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`CheckError::InvalidProxyUrl`] if
    /// `proxy_url` does not parse.
    pub fn with_proxy_url(
        timeout_secs: u64,
        user_agent: &str,
        proxy_url: &str,
    ) -> Result<Self, CheckError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        let proxy_url = Url::parse(proxy_url).map_err(|e| CheckError::InvalidProxyUrl {
            url: proxy_url.to_owned(),
            reason: e.to_string(),
        })?;
        Ok(Self { client, proxy_url })
    }

    /// Checks whether `domain` is fronted by Cloudflare.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`format_target_url`] and
    /// [`Self::fetch_headers`].
    pub async fn check(&self, domain: &str) -> Result<CloudflareCheckResult, CheckError> {
        let target = format_target_url(domain)?;
        let headers = self.fetch_headers(&target).await?;
        let result = detect(&headers);
        tracing::debug!(
            target = %target,
            using_cloudflare = result.using_cloudflare,
            header_count = headers.len(),
            "cloudflare check complete"
        );
        Ok(result)
    }

    /// Returns the target's response headers with lowercased names.
    ///
    /// A relay response without `status.headers` yields an empty map.
    ///
    /// # Errors
    ///
    /// - [`CheckError::Http`] on network failure or timeout.
    /// - [`CheckError::UnexpectedStatus`] if the relay answers non-2xx.
    /// - [`CheckError::Deserialize`] if the relay body is not the envelope.
    pub async fn fetch_headers(&self, target: &Url) -> Result<HashMap<String, String>, CheckError> {
        let url = self.build_url(target);
        tracing::debug!(%url, "requesting headers through proxy");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CheckError::UnexpectedStatus {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let envelope: ProxyEnvelope =
            serde_json::from_str(&body).map_err(|e| CheckError::Deserialize {
                context: format!("proxy response for {target}"),
                source: e,
            })?;

        if envelope.status.as_ref().and_then(|s| s.headers.as_ref()).is_none() {
            tracing::warn!(%target, "proxy response carried no headers");
        }
        Ok(envelope.into_headers())
    }

    /// Appends the percent-encoded target as the `url` query parameter.
    fn build_url(&self, target: &Url) -> Url {
        let mut url = self.proxy_url.clone();
        url.query_pairs_mut().append_pair("url", target.as_str());
        url
    }
}
