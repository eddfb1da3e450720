//! Tests for command-line parsing and its conversion into `Config`.

use clap::Parser;
use domain_health::config::{LogFormat, LogLevel};
use domain_health::{Config, Opt};
use std::path::PathBuf;

#[test]
fn test_defaults() {
    let opt = Opt::try_parse_from(["domain_health", "example.com"]).expect("Should parse");
    let config = Config::from(opt);

    assert_eq!(config.domains, vec!["example.com".to_string()]);
    assert_eq!(config.dns_servers, vec!["8.8.8.8".to_string(), "8.8.4.4".to_string()]);
    assert!(config.resolv_conf.is_none());
    assert_eq!(config.timeout_seconds, 10);
    assert_eq!(config.concurrency, 20);
    assert_eq!(config.health_path, "/nagios_check.php");
    assert_eq!(config.port, 80);
    assert!(!config.keep_alive);
    assert_eq!(config.second_pass_threshold, 10);
    // LogLevel doesn't implement PartialEq, so we compare via conversion
    assert_eq!(
        log::LevelFilter::from(config.log_level),
        log::LevelFilter::Warn
    );
    assert!(matches!(config.log_format, LogFormat::Plain));
}

#[test]
fn test_short_flags() {
    let opt = Opt::try_parse_from([
        "domain_health",
        "-s",
        "1.1.1.1, 9.9.9.9:5353",
        "-t",
        "3",
        "-c",
        "50",
        "-u",
        "status",
        "-p",
        "8080",
        "-k",
        "a.example",
        "b.example",
    ])
    .expect("Should parse");
    let config = Config::from(opt);

    assert_eq!(config.domains, vec!["a.example".to_string(), "b.example".to_string()]);
    assert_eq!(
        config.dns_servers,
        vec!["1.1.1.1".to_string(), "9.9.9.9:5353".to_string()]
    );
    assert_eq!(config.timeout_seconds, 3);
    assert_eq!(config.concurrency, 50);
    assert_eq!(config.health_path, "/status");
    assert_eq!(config.port, 8080);
    assert!(config.keep_alive);
}

#[test]
fn test_long_flags() {
    let opt = Opt::try_parse_from([
        "domain_health",
        "--resolv-conf",
        "/etc/resolv.conf",
        "--url",
        "/health",
        "--second-pass-threshold",
        "3",
        "--log-level",
        "debug",
        "--log-format",
        "json",
        "example.org",
    ])
    .expect("Should parse");
    let config = Config::from(opt);

    assert_eq!(config.resolv_conf, Some(PathBuf::from("/etc/resolv.conf")));
    assert_eq!(config.health_path, "/health");
    assert_eq!(config.second_pass_threshold, 3);
    assert_eq!(
        log::LevelFilter::from(config.log_level),
        log::LevelFilter::from(LogLevel::Debug)
    );
    assert!(matches!(config.log_format, LogFormat::Json));
}

#[test]
fn test_domains_are_required() {
    let result = Opt::try_parse_from(["domain_health"]);
    assert!(result.is_err(), "Should require at least one domain");
}

#[test]
fn test_invalid_numbers_are_rejected() {
    assert!(Opt::try_parse_from(["domain_health", "-p", "99999", "a.example"]).is_err());
    assert!(Opt::try_parse_from(["domain_health", "-c", "-1", "a.example"]).is_err());
    assert!(Opt::try_parse_from(["domain_health", "-t", "soon", "a.example"]).is_err());
}

#[test]
fn test_invalid_log_level_is_rejected() {
    let result = Opt::try_parse_from(["domain_health", "--log-level", "loud", "a.example"]);
    assert!(result.is_err());
}

#[test]
fn test_empty_server_entry_is_kept_for_validation() {
    let opt = Opt::try_parse_from(["domain_health", "-s", "8.8.8.8,", "a.example"])
        .expect("Should parse");
    let config = Config::from(opt);
    // Rejected later, when the resolver is initialized.
    assert_eq!(config.dns_servers, vec!["8.8.8.8".to_string(), String::new()]);
}
