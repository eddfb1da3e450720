// Shared test helpers: an in-process UDP DNS server and an IPv4 HTTP server.
//
// The DNS server answers every query according to a per-name rule and counts
// the queries it receives. It is aborted when dropped.

use std::net::{Ipv4Addr, SocketAddr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use hickory_proto::op::{Message, MessageType, OpCode, ResponseCode};
use hickory_proto::rr::rdata::A;
use hickory_proto::rr::{RData, Record};
use hickory_proto::serialize::binary::BinEncodable;
use tokio::net::UdpSocket;
use tokio::task::JoinHandle;

/// Starts an `httptest` server on 127.0.0.1.
///
/// Resolution only yields A records, so the server must listen on IPv4;
/// `Server::run()` prefers `[::1]` when the host supports it.
#[allow(dead_code)] // Used by other test files
pub fn local_http_server() -> httptest::Server {
    httptest::ServerBuilder::new()
        .bind_addr("127.0.0.1:0".parse().expect("valid socket address"))
        .run()
        .expect("Failed to start IPv4 HTTP server")
}

/// How the fake server treats one query.
#[derive(Debug, Clone, Copy)]
#[allow(dead_code)] // Not every test file uses every reply
pub enum Reply {
    /// NOERROR with one A record
    Answer(Ipv4Addr),
    /// No answer section, the given response code
    Code(ResponseCode),
    /// Never respond
    Silent,
}

type Rule = Arc<dyn Fn(&str) -> Reply + Send + Sync>;

/// A UDP DNS server bound to an ephemeral localhost port.
pub struct FakeDns {
    addr: SocketAddr,
    queries: Arc<AtomicUsize>,
    handle: JoinHandle<()>,
}

#[allow(dead_code)] // Used by other test files
impl FakeDns {
    /// Starts a server that replies per `rule`, called with the lowercased
    /// query name without its trailing dot.
    pub async fn start<F>(rule: F) -> Self
    where
        F: Fn(&str) -> Reply + Send + Sync + 'static,
    {
        let rule: Rule = Arc::new(rule);
        let socket = UdpSocket::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake DNS socket");
        let addr = socket.local_addr().expect("Failed to read local address");
        let queries = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&queries);

        let handle = tokio::spawn(async move {
            let mut buf = vec![0u8; 4096];
            loop {
                let (len, peer) = match socket.recv_from(&mut buf).await {
                    Ok(received) => received,
                    Err(_) => break,
                };
                let Ok(request) = Message::from_vec(&buf[..len]) else {
                    continue;
                };
                counter.fetch_add(1, Ordering::SeqCst);

                let Some(query) = request.queries().first().cloned() else {
                    continue;
                };
                let name = query.name().to_utf8();
                let name = name.trim_end_matches('.').to_lowercase();

                let mut response = Message::new();
                response
                    .set_id(request.id())
                    .set_message_type(MessageType::Response)
                    .set_op_code(OpCode::Query)
                    .set_recursion_desired(request.recursion_desired())
                    .set_recursion_available(true);
                response.add_query(query.clone());

                match rule(&name) {
                    Reply::Silent => continue,
                    Reply::Code(code) => {
                        response.set_response_code(code);
                    }
                    Reply::Answer(ip) => {
                        response.set_response_code(ResponseCode::NoError);
                        response.add_answer(Record::from_rdata(
                            query.name().clone(),
                            60,
                            RData::A(A(ip)),
                        ));
                    }
                }

                if let Ok(bytes) = response.to_bytes() {
                    let _ = socket.send_to(&bytes, peer).await;
                }
            }
        });

        Self {
            addr,
            queries,
            handle,
        }
    }

    /// Starts a server that answers every name with `ip`.
    pub async fn answering(ip: Ipv4Addr) -> Self {
        Self::start(move |_| Reply::Answer(ip)).await
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Number of well-formed queries received so far.
    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

impl Drop for FakeDns {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
