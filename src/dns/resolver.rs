//! A-record resolution against a fixed set of servers with bounded retry.

use std::net::{IpAddr, SocketAddr};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use hickory_proto::op::{Message, MessageType, OpCode, Query, ResponseCode};
use hickory_proto::rr::{Name, RData, RecordType};
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio_retry::RetryIf;

use super::exchange::{DnsExchange, UdpExchange};
use crate::config::{DNS_RETRIES_PER_SERVER, DNS_TIMEOUT_SECS};
use crate::domain::parse_ip_literal;
use crate::error_handling::{DnsError, InitializationError};

/// Servers and retry policy for a `DnsResolver`.
///
/// Immutable once built; always holds at least one server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    servers: Vec<SocketAddr>,
    retry_budget: usize,
    attempt_timeout: Duration,
}

impl ResolverConfig {
    /// Builds a config with the conventional retry budget of two per server.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::NoDnsServersError` if `servers` is empty.
    pub fn new(servers: Vec<SocketAddr>) -> Result<Self, InitializationError> {
        if servers.is_empty() {
            return Err(InitializationError::NoDnsServersError);
        }
        let retry_budget = servers.len() * DNS_RETRIES_PER_SERVER;
        Ok(Self {
            servers,
            retry_budget,
            attempt_timeout: Duration::from_secs(DNS_TIMEOUT_SECS),
        })
    }

    /// Overrides the number of retries after the first attempt.
    pub fn with_retry_budget(mut self, retry_budget: usize) -> Self {
        self.retry_budget = retry_budget;
        self
    }

    /// Overrides the per-attempt timeout.
    pub fn with_attempt_timeout(mut self, attempt_timeout: Duration) -> Self {
        self.attempt_timeout = attempt_timeout;
        self
    }

    pub fn servers(&self) -> &[SocketAddr] {
        &self.servers
    }

    pub fn retry_budget(&self) -> usize {
        self.retry_budget
    }

    pub fn attempt_timeout(&self) -> Duration {
        self.attempt_timeout
    }
}

/// Anything that can turn a name into addresses.
///
/// The pipeline depends on this rather than on `DnsResolver` directly.
#[async_trait]
pub trait Resolve: Send + Sync {
    /// Resolves `name` to its addresses, in the order the server returned them.
    async fn resolve(&self, name: &str) -> Result<Vec<IpAddr>, DnsError>;
}

/// Stub resolver that sends each attempt to one randomly chosen server.
///
/// Server choice only spreads load; the generator is seedable so tests can
/// reproduce a selection sequence. It sits behind a mutex that is never held
/// across an await, so all resolution workers can share one resolver.
pub struct DnsResolver {
    config: ResolverConfig,
    exchange: Arc<dyn DnsExchange>,
    rng: Mutex<StdRng>,
}

impl DnsResolver {
    /// Creates a resolver using UDP and an OS-seeded generator.
    pub fn new(config: ResolverConfig) -> Self {
        Self::with_exchange(config, Arc::new(UdpExchange), None)
    }

    /// Creates a UDP resolver whose server selection is reproducible.
    pub fn with_seed(config: ResolverConfig, seed: u64) -> Self {
        Self::with_exchange(config, Arc::new(UdpExchange), Some(seed))
    }

    /// Creates a resolver over a custom transport, optionally with a fixed seed.
    pub fn with_exchange(
        config: ResolverConfig,
        exchange: Arc<dyn DnsExchange>,
        seed: Option<u64>,
    ) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            config,
            exchange,
            rng: Mutex::new(rng),
        }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolves `name` to its A-record addresses.
    ///
    /// IP literals are returned as-is without touching the network. Otherwise a
    /// recursive A query is sent to a random server; timeouts, SERVFAIL and
    /// REFUSED are retried against a freshly chosen server until the retry
    /// budget is spent, so at most `retry_budget + 1` exchanges happen. Any
    /// other non-success code fails immediately.
    ///
    /// # Errors
    ///
    /// Returns the last `DnsError` seen, or `DnsError::EmptyAnswer` if the
    /// server answered without any A record.
    pub async fn resolve(&self, name: &str) -> Result<Vec<IpAddr>, DnsError> {
        if let Some(ip) = parse_ip_literal(name) {
            return Ok(vec![ip]);
        }

        let query = self.build_query(name)?;
        let resolver = self;
        let query = &query;
        // Zero delay between attempts: a new server is picked instead of waiting.
        let strategy = std::iter::repeat(Duration::ZERO).take(self.config.retry_budget);

        RetryIf::start(
            strategy,
            move || async move {
                let server = resolver.pick_server();
                let result = resolver
                    .exchange
                    .exchange(server, query, resolver.config.attempt_timeout)
                    .await
                    .and_then(extract_addresses);
                if let Err(e) = &result {
                    debug!("DNS attempt via {} failed: {}", server, e);
                }
                result
            },
            DnsError::is_transient,
        )
        .await
    }

    fn build_query(&self, name: &str) -> Result<Message, DnsError> {
        let fqdn = if name.ends_with('.') {
            name.to_string()
        } else {
            format!("{}.", name)
        };
        let name = Name::from_utf8(&fqdn).map_err(|e| DnsError::InvalidName {
            name: name.to_string(),
            reason: e.to_string(),
        })?;

        let id = self.lock_rng().random::<u16>();
        let mut message = Message::new();
        message
            .set_id(id)
            .set_message_type(MessageType::Query)
            .set_op_code(OpCode::Query)
            .set_recursion_desired(true)
            .add_query(Query::query(name, RecordType::A));
        Ok(message)
    }

    fn pick_server(&self) -> SocketAddr {
        let servers = &self.config.servers;
        let index = self.lock_rng().random_range(0..servers.len());
        servers[index]
    }

    fn lock_rng(&self) -> std::sync::MutexGuard<'_, StdRng> {
        // A poisoned generator is still a valid generator.
        self.rng.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl Resolve for DnsResolver {
    async fn resolve(&self, name: &str) -> Result<Vec<IpAddr>, DnsError> {
        DnsResolver::resolve(self, name).await
    }
}

/// Maps a response to its A-record addresses, classifying the response code.
pub(super) fn extract_addresses(response: Message) -> Result<Vec<IpAddr>, DnsError> {
    let code = response.response_code();
    if code != ResponseCode::NoError {
        return Err(DnsError::ResponseCode(code));
    }

    let addresses: Vec<IpAddr> = response
        .answers()
        .iter()
        .filter_map(|record| match record.data() {
            Some(RData::A(a)) => Some(IpAddr::V4(a.0)),
            _ => None,
        })
        .collect();

    if addresses.is_empty() {
        Err(DnsError::EmptyAnswer)
    } else {
        Ok(addresses)
    }
}
