//! Response envelope of the allorigins-style header inspection relay.

use std::collections::HashMap;

use serde::Deserialize;

/// Top-level JSON returned by `GET <proxy>?url=<target>`.
///
/// Only `status.headers` is read; the relayed body in `contents` and the
/// other status fields are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct ProxyEnvelope {
    #[serde(default)]
    pub status: Option<ProxyStatus>,
}

/// Metadata about the relayed request.
#[derive(Debug, Default, Deserialize)]
pub struct ProxyStatus {
    /// Target response headers. Values are usually strings; anything else is
    /// dropped when the map is flattened.
    #[serde(default)]
    pub headers: Option<HashMap<String, serde_json::Value>>,
}

impl ProxyEnvelope {
    /// Flattens `status.headers` to lowercase-name → string-value pairs.
    #[must_use]
    pub fn into_headers(self) -> HashMap<String, String> {
        self.status
            .and_then(|s| s.headers)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|(k, v)| match v {
                serde_json::Value::String(s) => Some((k.to_ascii_lowercase(), s)),
                _ => None,
            })
            .collect()
    }
}
