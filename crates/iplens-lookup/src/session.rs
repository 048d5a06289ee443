//! Single-slot session cache and the cache-then-fetch decision.
//!
//! The cache holds at most one [`CachedLookup`]. A new successful lookup
//! replaces it wholesale; a failed lookup leaves it untouched. An entry older
//! than the store's maximum age is treated as absent, which bounds a session.
//! There is no staleness token, so two overlapping lookups sharing one store
//! resolve as last write wins.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use iplens_core::{IpRecord, Subject};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::client::IpLookupClient;
use crate::error::LookupError;

/// How long a cached entry stays usable when the store is not told otherwise.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(30 * 60);

static TMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Errors writing or clearing the session cache.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("session cache I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize session cache entry: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// The record most recently fetched in this session, with the subject it
/// was fetched for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedLookup {
    pub subject: String,
    pub record: IpRecord,
    pub cached_at: DateTime<Utc>,
}

impl CachedLookup {
    #[must_use]
    pub fn new(subject: &Subject, record: IpRecord) -> Self {
        Self {
            subject: subject.cache_key().to_owned(),
            record,
            cached_at: Utc::now(),
        }
    }

    /// Whether this entry answers a lookup for `subject`.
    ///
    /// A target also matches when it equals the cached record's address, so
    /// looking up the address returned by a domain lookup is a cache hit.
    #[must_use]
    pub fn matches(&self, subject: &Subject) -> bool {
        if self.subject == subject.cache_key() {
            return true;
        }
        subject.target().is_some_and(|t| t == self.record.ip)
    }

    /// Whether the entry was cached more than `max_age` ago.
    ///
    /// An entry stamped in the future (clock skew) is not expired.
    #[must_use]
    pub fn is_expired(&self, max_age: Duration) -> bool {
        let age = Utc::now().signed_duration_since(self.cached_at);
        chrono::Duration::from_std(max_age).is_ok_and(|max| age > max)
    }
}

fn unexpired(entry: CachedLookup, max_age: Duration) -> Option<CachedLookup> {
    if entry.is_expired(max_age) {
        tracing::debug!(
            subject = %entry.subject,
            cached_at = %entry.cached_at,
            "session cache entry expired"
        );
        return None;
    }
    Some(entry)
}

/// A single-slot store for the last successful lookup.
pub trait SessionStore {
    /// Returns the cached entry, if any. Unreadable or expired state counts
    /// as empty.
    fn load(&self) -> Option<CachedLookup>;

    /// Replaces the cached entry.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] if the entry cannot be persisted.
    fn save(&mut self, entry: &CachedLookup) -> Result<(), CacheError>;

    /// Empties the slot.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] if the backing state cannot be removed.
    fn clear(&mut self) -> Result<(), CacheError>;
}

/// In-process store; lives as long as the value does.
#[derive(Debug)]
pub struct MemoryStore {
    slot: Option<CachedLookup>,
    max_age: Duration,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self {
            slot: None,
            max_age: DEFAULT_SESSION_TTL,
        }
    }
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = max_age;
        self
    }
}

impl SessionStore for MemoryStore {
    fn load(&self) -> Option<CachedLookup> {
        unexpired(self.slot.clone()?, self.max_age)
    }

    fn save(&mut self, entry: &CachedLookup) -> Result<(), CacheError> {
        self.slot = Some(entry.clone());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), CacheError> {
        self.slot = None;
        Ok(())
    }
}

/// Store backed by one JSON file, shared by every invocation until it is
/// cleared or its entry ages out.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    max_age: Duration,
}

impl FileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            max_age: DEFAULT_SESSION_TTL,
        }
    }

    #[must_use]
    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = max_age;
        self
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Temp path unique to this process and write.
    fn tmp_path(&self) -> PathBuf {
        let seq = TMP_COUNTER.fetch_add(1, Ordering::Relaxed);
        self.path
            .with_extension(format!("json.{}.{seq}.tmp", std::process::id()))
    }

    fn io_error(&self, source: std::io::Error) -> CacheError {
        CacheError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl SessionStore for FileStore {
    fn load(&self) -> Option<CachedLookup> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "cannot read session cache");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(entry) => unexpired(entry, self.max_age),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "ignoring corrupt session cache"
                );
                None
            }
        }
    }

    fn save(&mut self, entry: &CachedLookup) -> Result<(), CacheError> {
        let json = serde_json::to_string(entry)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        // Readers never observe a partially written file.
        let tmp = self.tmp_path();
        if let Err(e) = fs::write(&tmp, json) {
            let _ = fs::remove_file(&tmp);
            return Err(self.io_error(e));
        }
        fs::rename(&tmp, &self.path).map_err(|e| {
            let _ = fs::remove_file(&tmp);
            self.io_error(e)
        })
    }

    fn clear(&mut self) -> Result<(), CacheError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }
}

/// Where a resolved record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupSource {
    Cache,
    Provider,
}

/// A record together with its origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    pub record: IpRecord,
    pub source: LookupSource,
}

/// Returns the cached record for `subject`, or fetches and caches a new one.
///
/// The provider is consulted when the slot is empty or expired, when it holds
/// a record for a different subject, or when `refresh` is set. A successful fetch
/// overwrites the slot; a failed save is logged and does not fail the lookup.
///
/// # Errors
///
/// Propagates the [`LookupError`] from [`IpLookupClient::lookup`]; the cache
/// is left as it was.
pub async fn resolve<S: SessionStore>(
    store: &mut S,
    client: &IpLookupClient,
    subject: &Subject,
    refresh: bool,
) -> Result<Resolved, LookupError> {
    if !refresh {
        if let Some(cached) = store.load().filter(|c| c.matches(subject)) {
            tracing::debug!(subject = %subject, cached_at = %cached.cached_at, "session cache hit");
            return Ok(Resolved {
                record: cached.record,
                source: LookupSource::Cache,
            });
        }
    }

    let record = client.lookup(subject).await?;
    if let Err(e) = store.save(&CachedLookup::new(subject, record.clone())) {
        tracing::warn!(error = %e, "failed to update session cache");
    }

    Ok(Resolved {
        record,
        source: LookupSource::Provider,
    })
}
