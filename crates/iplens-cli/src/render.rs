//! Plain-text rendering of lookup and check results.

use std::fmt::Write;

use iplens_core::{CloudflareCheckResult, IpRecord, Subject, SubjectKind};

const LABEL_WIDTH: usize = 13;

fn row(out: &mut String, label: &str, value: &str) {
    let _ = writeln!(out, "{label:<LABEL_WIDTH$}{value}");
}

/// The line shown above a lookup result, naming what was looked up.
///
/// A domain lookup also shows the address it resolved to.
pub(crate) fn render_heading(subject: &Subject, record: &IpRecord, cached: bool) -> String {
    let kind = subject.kind();
    let mut out = match (kind, subject.target()) {
        (SubjectKind::Domain, Some(domain)) => {
            format!("Displaying information for {kind} {domain} ({})", record.ip)
        }
        _ => format!("Displaying information for {kind} {}", record.ip),
    };
    if cached {
        out.push_str(" (cached)");
    }
    out
}

/// Renders a record as a two-column table, `N/A` for absent fields.
pub(crate) fn render_record(record: &IpRecord) -> String {
    let mut out = String::new();
    row(&mut out, "IP Address", &record.ip);
    row(&mut out, "Location", &record.location_line());
    row(&mut out, "ISP", record.organization_or_na());
    row(&mut out, "ASN", record.asn_or_na());
    row(&mut out, "Timezone", record.timezone_or_na());
    row(&mut out, "Postal Code", record.postal_code_or_na());
    row(
        &mut out,
        "Coordinates",
        &format!("{}, {}", record.latitude, record.longitude),
    );
    row(&mut out, "Map", &record.map_url());
    out
}

/// Renders a check verdict followed by the indicators that triggered it.
pub(crate) fn render_check(domain: &str, result: &CloudflareCheckResult) -> String {
    let mut out = String::new();
    if !result.using_cloudflare {
        let _ = writeln!(out, "{domain}: No Cloudflare detected");
        return out;
    }

    let _ = writeln!(out, "{domain}: This website is using Cloudflare");
    let _ = writeln!(out);
    let _ = writeln!(out, "Detected Cloudflare indicators:");
    let indicators = [
        ("CF-Ray", &result.ray_id),
        ("CF-Cache-Status", &result.cache_status),
        ("Server", &result.server_header),
    ];
    for (label, value) in indicators {
        if let Some(value) = value {
            let _ = writeln!(out, "  {label:<17}{value}");
        }
    }
    out
}

/// Prints any serializable result as pretty JSON on stdout.
pub(crate) fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
