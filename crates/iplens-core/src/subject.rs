//! What a lookup is performed against.

use std::net::IpAddr;

/// Input token that stands for "the caller's own address".
pub const OWN_ADDRESS_SENTINEL: &str = "me";

/// The address, domain, or self reference a lookup targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Subject {
    /// The caller's own public address.
    Own,
    /// An IP literal or domain name, trimmed.
    Target(String),
}

/// Coarse classification of a [`Subject::Target`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubjectKind {
    Own,
    Ipv4,
    Ipv6,
    Domain,
}

impl std::fmt::Display for SubjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Own => write!(f, "your address"),
            Self::Ipv4 => write!(f, "IPv4 address"),
            Self::Ipv6 => write!(f, "IPv6 address"),
            Self::Domain => write!(f, "domain"),
        }
    }
}

impl Subject {
    /// Parses raw user input. Blank input and `me` both mean [`Subject::Own`].
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(OWN_ADDRESS_SENTINEL) {
            Self::Own
        } else {
            Self::Target(trimmed.to_string())
        }
    }

    /// The target text, or `None` for the caller's own address.
    #[must_use]
    pub fn target(&self) -> Option<&str> {
        match self {
            Self::Own => None,
            Self::Target(t) => Some(t.as_str()),
        }
    }

    /// Classifies the subject; anything that is not an IP literal is a domain.
    #[must_use]
    pub fn kind(&self) -> SubjectKind {
        match self {
            Self::Own => SubjectKind::Own,
            Self::Target(t) => match t.parse::<IpAddr>() {
                Ok(IpAddr::V4(_)) => SubjectKind::Ipv4,
                Ok(IpAddr::V6(_)) => SubjectKind::Ipv6,
                Err(_) => SubjectKind::Domain,
            },
        }
    }

    /// Key the session cache stores this subject under.
    #[must_use]
    pub fn cache_key(&self) -> &str {
        self.target().unwrap_or(OWN_ADDRESS_SENTINEL)
    }
}

impl std::fmt::Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Own => write!(f, "your address"),
            Self::Target(t) => write!(f, "{t}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_sentinel_mean_own_address() {
        assert_eq!(Subject::parse(""), Subject::Own);
        assert_eq!(Subject::parse("   "), Subject::Own);
        assert_eq!(Subject::parse("me"), Subject::Own);
        assert_eq!(Subject::parse(" ME "), Subject::Own);
    }

    #[test]
    fn target_is_trimmed() {
        assert_eq!(
            Subject::parse("  8.8.8.8 "),
            Subject::Target("8.8.8.8".to_string())
        );
    }

    #[test]
    fn kind_classifies_targets() {
        assert_eq!(Subject::parse("8.8.8.8").kind(), SubjectKind::Ipv4);
        assert_eq!(Subject::parse("2001:4860:4860::8888").kind(), SubjectKind::Ipv6);
        assert_eq!(Subject::parse("example.com").kind(), SubjectKind::Domain);
        assert_eq!(Subject::parse("me").kind(), SubjectKind::Own);
    }

    #[test]
    fn kind_display_names_the_subject_type() {
        assert_eq!(SubjectKind::Ipv4.to_string(), "IPv4 address");
        assert_eq!(SubjectKind::Ipv6.to_string(), "IPv6 address");
        assert_eq!(SubjectKind::Domain.to_string(), "domain");
        assert_eq!(SubjectKind::Own.to_string(), "your address");
    }

    #[test]
    fn cache_key_uses_sentinel_for_own_address() {
        assert_eq!(Subject::Own.cache_key(), "me");
        assert_eq!(Subject::parse("1.1.1.1").cache_key(), "1.1.1.1");
    }
}
