//! Single DNS query/response exchange over UDP.

use std::net::SocketAddr;
use std::time::Duration;

use async_trait::async_trait;
use hickory_proto::op::Message;
use log::trace;
use tokio::net::UdpSocket;

use crate::config::MAX_UDP_RESPONSE_SIZE;
use crate::error_handling::DnsError;

/// One query sent to one server, one response back.
///
/// Implementations must enforce `timeout` themselves and report it as
/// `DnsError::Timeout`; the resolver only decides whether to try again.
#[async_trait]
pub trait DnsExchange: Send + Sync {
    /// Sends `query` to `server` and returns the matching response.
    async fn exchange(
        &self,
        server: SocketAddr,
        query: &Message,
        timeout: Duration,
    ) -> Result<Message, DnsError>;
}

/// Plain UDP transport, one ephemeral socket per exchange.
#[derive(Debug, Default, Clone, Copy)]
pub struct UdpExchange;

#[async_trait]
impl DnsExchange for UdpExchange {
    async fn exchange(
        &self,
        server: SocketAddr,
        query: &Message,
        timeout: Duration,
    ) -> Result<Message, DnsError> {
        let wire = query
            .to_vec()
            .map_err(|e| DnsError::Protocol(format!("Failed to encode query: {}", e)))?;

        tokio::time::timeout(timeout, round_trip(server, &wire, query.id()))
            .await
            .map_err(|_| DnsError::Timeout)?
    }
}

async fn round_trip(server: SocketAddr, wire: &[u8], id: u16) -> Result<Message, DnsError> {
    let bind_addr: SocketAddr = if server.is_ipv4() {
        ([0, 0, 0, 0], 0).into()
    } else {
        ([0u16; 8], 0).into()
    };
    let socket = UdpSocket::bind(bind_addr).await?;
    socket.connect(server).await?;
    socket.send(wire).await?;

    let mut buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];
    loop {
        let len = socket.recv(&mut buf).await?;
        let response = Message::from_vec(&buf[..len])
            .map_err(|e| DnsError::Protocol(format!("Failed to parse response: {}", e)))?;

        // Stray datagrams (late answers to someone else's id) are skipped; the
        // caller's timeout bounds how long we keep listening.
        if response.id() == id {
            return Ok(response);
        }
        trace!(
            "Ignoring DNS response from {} with id {} (expected {})",
            server,
            response.id(),
            id
        );
    }
}
