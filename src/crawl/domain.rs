// src/crawl/domain.rs
// =============================================================================
// Decides which site a URL belongs to.
//
// The rule: take the host, lower-case it, drop a leading "www." and keep the
// last two labels. So www.example.com, blog.example.com and example.com are
// all "example.com". Two-part public suffixes (example.co.uk) collapse to
// "co.uk"; we accept that.
// =============================================================================

use url::{Host, Url};

/// The registrable domain of a URL, or None if it has no host
///
/// Examples:
///   "https://www.example.com/a"  -> Some("example.com")
///   "http://docs.rs.example.org" -> Some("example.org")
///   "http://127.0.0.1:8080/"     -> Some("127.0.0.1")
///   "mailto:someone@example.com" -> None
pub fn registrable_domain(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;

    match parsed.host()? {
        Host::Domain(domain) => {
            let domain = domain.trim_end_matches('.').to_ascii_lowercase();
            let domain = domain.strip_prefix("www.").unwrap_or(&domain);

            let labels: Vec<&str> = domain.split('.').collect();
            let start = labels.len().saturating_sub(2);
            Some(labels[start..].join("."))
        }
        // IP addresses have no labels to strip
        Host::Ipv4(ip) => Some(ip.to_string()),
        Host::Ipv6(ip) => Some(ip.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn same_site(a: &str, b: &str) -> bool {
        registrable_domain(a).is_some() && registrable_domain(a) == registrable_domain(b)
    }

    #[test]
    fn test_last_two_labels() {
        assert_eq!(registrable_domain("https://blog.example.com/post"), Some("example.com".to_string()));
        assert_eq!(registrable_domain("https://example.com"), Some("example.com".to_string()));
    }

    #[test]
    fn test_www_is_ignored() {
        assert_eq!(registrable_domain("https://www.example.com/"), Some("example.com".to_string()));
        assert!(same_site("https://www.example.com/", "https://example.com/about"));
    }

    #[test]
    fn test_case_and_trailing_dot() {
        assert_eq!(registrable_domain("https://WWW.Example.COM./"), Some("example.com".to_string()));
    }

    #[test]
    fn test_single_label_host() {
        assert_eq!(registrable_domain("http://localhost:3000/"), Some("localhost".to_string()));
    }

    #[test]
    fn test_ip_hosts_kept_whole() {
        assert_eq!(registrable_domain("http://127.0.0.1:1234/a"), Some("127.0.0.1".to_string()));
        assert!(same_site("http://127.0.0.1:1234/a", "http://127.0.0.1:1234/b"));
        assert!(!same_site("http://127.0.0.1/", "http://10.0.0.1/"));
    }

    #[test]
    fn test_different_sites() {
        assert!(!same_site("https://example.com/", "https://example.org/"));
        assert!(!same_site("https://example.com/", "not a url"));
    }
}
