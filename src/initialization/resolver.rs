//! DNS resolver initialization.
//!
//! Servers come either from an explicit list or from a resolv.conf-style file.
//! Any entry that cannot be used is a hard error; the resolver never starts
//! with a partial or empty server list.

use std::io;
use std::net::{IpAddr, SocketAddr};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use log::debug;

use crate::config::{Config, DNS_PORT};
use crate::dns::{DnsResolver, ResolverConfig};
use crate::error_handling::InitializationError;

/// Initializes the shared DNS resolver from `config`.
///
/// `resolv_conf` wins over `dns_servers` when both are set. The retry budget
/// is two per server.
///
/// # Errors
///
/// Returns an `InitializationError` if the file is missing or unparseable,
/// if a server entry is malformed or does not resolve, or if no servers remain.
pub async fn init_resolver(config: &Config) -> Result<Arc<DnsResolver>, InitializationError> {
    let servers = match &config.resolv_conf {
        Some(path) => read_resolv_conf(path)?,
        None => parse_server_list(&config.dns_servers).await?,
    };
    debug!("Using DNS servers: {:?}", servers);

    let resolver_config = ResolverConfig::new(servers)?
        .with_attempt_timeout(Duration::from_secs(config.dns_timeout_seconds));
    Ok(Arc::new(DnsResolver::new(resolver_config)))
}

/// Turns `host`, `host:port`, `ip` or `ip:port` entries into socket addresses.
///
/// Bare entries get port 53. Hostnames are looked up once, here, through the
/// system resolver.
pub async fn parse_server_list<S: AsRef<str>>(
    servers: &[S],
) -> Result<Vec<SocketAddr>, InitializationError> {
    let mut parsed = Vec::with_capacity(servers.len());
    for server in servers {
        parsed.push(parse_server(server.as_ref()).await?);
    }
    if parsed.is_empty() {
        return Err(InitializationError::NoDnsServersError);
    }
    Ok(parsed)
}

async fn parse_server(server: &str) -> Result<SocketAddr, InitializationError> {
    let invalid = |reason: &str| InitializationError::DnsServerError {
        server: server.to_string(),
        reason: reason.to_string(),
    };

    if server.is_empty() {
        return Err(invalid("empty entry"));
    }
    if let Ok(addr) = server.parse::<SocketAddr>() {
        return Ok(addr);
    }
    if let Ok(ip) = server.parse::<IpAddr>() {
        return Ok(SocketAddr::new(ip, DNS_PORT));
    }

    let (host, port) = match server.rsplit_once(':') {
        Some((host, port)) => (
            host,
            port.parse::<u16>().map_err(|_| invalid("invalid port"))?,
        ),
        None => (server, DNS_PORT),
    };
    if host.is_empty() || host.contains(char::is_whitespace) {
        return Err(invalid("invalid host"));
    }

    let mut addrs = tokio::net::lookup_host((host, port))
        .await
        .map_err(|e| invalid(&e.to_string()))?;
    addrs.next().ok_or_else(|| invalid("host has no addresses"))
}

/// Reads the `nameserver` entries of a resolv.conf-style file.
///
/// # Errors
///
/// - `ResolvConfMissingError` if the path does not exist
/// - `ResolvConfError` if it cannot be read or parsed
/// - `NoDnsServersError` if it lists no nameservers
pub fn read_resolv_conf(path: &Path) -> Result<Vec<SocketAddr>, InitializationError> {
    if !path.exists() {
        return Err(InitializationError::ResolvConfMissingError(path.to_path_buf()));
    }
    let data = std::fs::read(path).map_err(|source| InitializationError::ResolvConfError {
        path: path.to_path_buf(),
        source,
    })?;
    let (resolver_config, _) = hickory_resolver::system_conf::parse_resolv_conf(&data)
        .map_err(|e| InitializationError::ResolvConfError {
            path: path.to_path_buf(),
            source: io::Error::new(io::ErrorKind::InvalidData, e.to_string()),
        })?;

    // Each nameserver is listed once per protocol; keep one entry per address.
    let mut servers: Vec<SocketAddr> = Vec::new();
    for name_server in resolver_config.name_servers() {
        if !servers.contains(&name_server.socket_addr) {
            servers.push(name_server.socket_addr);
        }
    }
    if servers.is_empty() {
        return Err(InitializationError::NoDnsServersError);
    }
    Ok(servers)
}
