// Domain module tests.

use super::*;
use std::net::{Ipv4Addr, Ipv6Addr};

#[test]
fn test_dedup_domains_preserves_first_occurrence_order() {
    let input = ["b.example", "a.example", "b.example", "c.example", "a.example"];
    assert_eq!(
        dedup_domains(&input),
        vec!["b.example", "a.example", "c.example"]
    );
}

#[test]
fn test_dedup_domains_is_case_sensitive() {
    let input = ["Example.com", "example.com", "Example.com"];
    assert_eq!(dedup_domains(&input), vec!["Example.com", "example.com"]);
}

#[test]
fn test_dedup_domains_idempotent() {
    let input = vec![
        "x.example".to_string(),
        "10.0.0.1".to_string(),
        "x.example".to_string(),
        "y.example".to_string(),
    ];
    let once = dedup_domains(&input);
    let twice = dedup_domains(&once);
    assert_eq!(once, twice);
}

#[test]
fn test_dedup_domains_empty() {
    let input: [&str; 0] = [];
    assert!(dedup_domains(&input).is_empty());
}

#[test]
fn test_parse_ip_literal_v4() {
    assert_eq!(
        parse_ip_literal("10.0.0.1"),
        Some(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)))
    );
}

#[test]
fn test_parse_ip_literal_v6() {
    assert_eq!(
        parse_ip_literal("::1"),
        Some(IpAddr::V6(Ipv6Addr::LOCALHOST))
    );
}

#[test]
fn test_parse_ip_literal_rejects_names() {
    assert_eq!(parse_ip_literal("example.com"), None);
    assert_eq!(parse_ip_literal("10.0.0.1.example.com"), None);
    assert_eq!(parse_ip_literal("10.0.0.256"), None);
    assert_eq!(parse_ip_literal(""), None);
}

#[test]
fn test_domain_target_constructors() {
    let ip = IpAddr::V4(Ipv4Addr::new(192, 0, 2, 7));
    let ok = DomainTarget::resolved("a.example", ip);
    assert!(ok.is_resolved());
    assert_eq!(ok.address, Some(ip));
    assert!(ok.resolution_error.is_none());

    let bad = DomainTarget::unresolved("b.example", "NXDomain");
    assert!(!bad.is_resolved());
    assert_eq!(bad.resolution_error.as_deref(), Some("NXDomain"));
    assert!(bad.response_body.is_none());
}
