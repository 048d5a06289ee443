use iplens_core::{CloudflareCheckResult, IpRecord, Subject};

use super::*;
use crate::render::{render_check, render_heading, render_record};

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["iplens"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_lookup_with_subject() {
    let cli = Cli::try_parse_from(["iplens", "lookup", "8.8.8.8"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Lookup {
            subject: Some(ref s),
            refresh: false,
            json: false
        }) if s == "8.8.8.8"
    ));
}

#[test]
fn parses_lookup_without_subject() {
    let cli = Cli::try_parse_from(["iplens", "lookup"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Lookup { subject: None, .. })
    ));
}

#[test]
fn parses_lookup_flags() {
    let cli = Cli::try_parse_from(["iplens", "lookup", "example.com", "--refresh", "--json"])
        .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Lookup {
            refresh: true,
            json: true,
            ..
        })
    ));
}

#[test]
fn parses_me_and_clear() {
    let me = Cli::try_parse_from(["iplens", "me"]).unwrap();
    assert!(matches!(me.command, Some(Commands::Me { json: false })));

    let clear = Cli::try_parse_from(["iplens", "clear"]).unwrap();
    assert!(matches!(clear.command, Some(Commands::Clear)));
}

#[test]
fn cloudflare_requires_domain() {
    assert!(Cli::try_parse_from(["iplens", "cloudflare"]).is_err());

    let cli = Cli::try_parse_from(["iplens", "cloudflare", "example.com"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Cloudflare { ref domain, json: false }) if domain == "example.com"
    ));
}

fn google_dns() -> IpRecord {
    IpRecord {
        ip: "8.8.8.8".to_string(),
        city: "Mountain View".to_string(),
        region: "California".to_string(),
        country_name: "United States".to_string(),
        organization: Some("GOOGLE".to_string()),
        asn: None,
        timezone: None,
        postal_code: None,
        latitude: 37.4,
        longitude: -122.08,
    }
}

#[test]
fn render_record_shows_na_for_absent_fields() {
    let out = render_record(&google_dns());
    assert!(out.contains("IP Address   8.8.8.8\n"), "got:\n{out}");
    assert!(out.contains("Location     Mountain View, California, United States\n"));
    assert!(out.contains("ISP          GOOGLE\n"));
    assert!(out.contains("ASN          N/A\n"));
    assert!(out.contains("Timezone     N/A\n"));
    assert!(out.contains("Postal Code  N/A\n"));
    assert!(out.contains("Coordinates  37.4, -122.08\n"));
    assert!(out.contains("mlat=37.4&mlon=-122.08"));
}

#[test]
fn render_check_negative() {
    let out = render_check("example.com", &CloudflareCheckResult::default());
    assert_eq!(out, "example.com: No Cloudflare detected\n");
}

#[test]
fn render_check_lists_only_triggered_indicators() {
    let result = CloudflareCheckResult {
        using_cloudflare: true,
        ray_id: Some("abc123".to_string()),
        cache_status: None,
        server_header: Some("cloudflare".to_string()),
    };
    let out = render_check("example.com", &result);
    assert!(out.starts_with("example.com: This website is using Cloudflare\n"));
    assert!(out.contains("CF-Ray           abc123"));
    assert!(out.contains("Server           cloudflare"));
    assert!(!out.contains("CF-Cache-Status"));
}

#[test]
fn render_heading_names_the_subject_kind() {
    let record = google_dns();
    assert_eq!(
        render_heading(&Subject::parse("8.8.8.8"), &record, false),
        "Displaying information for IPv4 address 8.8.8.8"
    );
    assert_eq!(
        render_heading(&Subject::Own, &record, true),
        "Displaying information for your address 8.8.8.8 (cached)"
    );
}

#[test]
fn render_heading_shows_resolved_address_for_domain() {
    let out = render_heading(&Subject::parse("dns.google"), &google_dns(), false);
    assert_eq!(out, "Displaying information for domain dns.google (8.8.8.8)");
}

#[test]
fn render_heading_for_ipv6_target() {
    let mut record = google_dns();
    record.ip = "2001:4860:4860::8888".to_string();
    let out = render_heading(&Subject::parse("2001:4860:4860::8888"), &record, false);
    assert_eq!(
        out,
        "Displaying information for IPv6 address 2001:4860:4860::8888"
    );
}
