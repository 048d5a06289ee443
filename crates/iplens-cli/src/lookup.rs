//! Lookup command handlers.
//!
//! `lookup` goes through the session cache; `me` always asks the provider and
//! leaves the cache alone. Provider and transport failures are reported with
//! their short reason and a non-zero exit.

use std::time::Duration;

use iplens_core::{AppConfig, Subject};
use iplens_lookup::{resolve, FileStore, IpLookupClient, LookupError, LookupSource, SessionStore};

use crate::render::{print_json, render_heading, render_record};

fn build_client(config: &AppConfig) -> anyhow::Result<IpLookupClient> {
    IpLookupClient::with_base_url(
        config.request_timeout_secs,
        &config.user_agent,
        &config.provider_base_url,
    )
    .map_err(|e| anyhow::anyhow!("failed to build lookup client: {e}"))
}

/// Turns a lookup failure into the message shown to the user.
fn report(subject: &Subject, err: &LookupError) -> anyhow::Error {
    tracing::debug!(subject = %subject, kind = ?err.kind(), error = %err, "lookup failed");
    anyhow::anyhow!(err.reason())
}

/// Look up `input`, serving a cached record when it matches.
///
/// # Errors
///
/// Returns an error carrying the lookup's user-facing reason, or if the
/// client cannot be built.
pub(crate) async fn run_lookup(
    config: &AppConfig,
    input: &str,
    refresh: bool,
    json: bool,
) -> anyhow::Result<()> {
    let client = build_client(config)?;
    let mut store = FileStore::new(&config.session_file)
        .with_max_age(Duration::from_secs(config.session_ttl_secs));
    let subject = Subject::parse(input);

    let resolved = resolve(&mut store, &client, &subject, refresh)
        .await
        .map_err(|e| report(&subject, &e))?;

    if json {
        return print_json(&resolved.record);
    }

    let cached = resolved.source == LookupSource::Cache;
    println!("{}", render_heading(&subject, &resolved.record, cached));
    println!();
    print!("{}", render_record(&resolved.record));
    Ok(())
}

/// Show the caller's own address without touching the session cache.
///
/// # Errors
///
/// Returns an error carrying the lookup's user-facing reason, or if the
/// client cannot be built.
pub(crate) async fn run_me(config: &AppConfig, json: bool) -> anyhow::Result<()> {
    let client = build_client(config)?;
    let record = client
        .lookup(&Subject::Own)
        .await
        .map_err(|e| report(&Subject::Own, &e))?;

    if json {
        return print_json(&record);
    }

    println!("My IP Information");
    println!();
    print!("{}", render_record(&record));
    Ok(())
}

/// Clear the session cache.
///
/// # Errors
///
/// Returns an error if the cache file exists but cannot be removed.
pub(crate) fn run_clear(config: &AppConfig) -> anyhow::Result<()> {
    let mut store = FileStore::new(&config.session_file);
    store.clear()?;
    println!("cleared cached lookup");
    Ok(())
}
