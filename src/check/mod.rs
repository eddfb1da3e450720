//! HTTP health check against a resolved address.
//!
//! The request goes to `http://<address>:<port><path>` with the `Host` header
//! set to the checked domain, so virtual hosting at the target sees the
//! domain rather than the IP.

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use reqwest::header::HOST;
use reqwest::StatusCode;

use crate::config::Config;
use crate::domain::DomainTarget;
use crate::error_handling::CheckError;

/// Anything that can verify a resolved target.
///
/// The pipeline depends on this rather than on `HttpChecker` directly.
#[async_trait]
pub trait Verify: Send + Sync {
    /// Checks `target`, possibly attaching data to it (e.g. the response body).
    async fn verify(&self, target: &mut DomainTarget) -> Result<(), CheckError>;
}

/// Issues one GET per target over a shared client.
///
/// Only status 200 passes. With `keep_body` on, the full body is read and
/// attached to the target whatever the status; it is never inspected.
#[derive(Debug, Clone)]
pub struct HttpChecker {
    client: Arc<reqwest::Client>,
    port: u16,
    path: String,
    keep_body: bool,
}

impl HttpChecker {
    pub fn new(
        client: Arc<reqwest::Client>,
        port: u16,
        path: impl Into<String>,
        keep_body: bool,
    ) -> Self {
        Self {
            client,
            port,
            path: path.into(),
            keep_body,
        }
    }

    /// Builds a checker from the port, path and keep-alive settings in `config`.
    pub fn from_config(client: Arc<reqwest::Client>, config: &Config) -> Self {
        Self::new(
            client,
            config.port,
            config.health_path.clone(),
            config.keep_alive,
        )
    }

    /// URL for a health check against `address` (IPv6 addresses are bracketed).
    pub fn url_for(&self, address: IpAddr) -> String {
        format!("http://{}{}", SocketAddr::new(address, self.port), self.path)
    }

    /// Runs the health check for one target.
    ///
    /// # Errors
    ///
    /// - `CheckError::Unresolved` if the target has no address
    /// - `CheckError::Transport` on connect/reset/timeout or an unsendable request
    /// - `CheckError::Status` for any status other than 200
    pub async fn check(&self, target: &mut DomainTarget) -> Result<(), CheckError> {
        let address = target
            .address
            .ok_or_else(|| CheckError::Unresolved(target.name.clone()))?;
        let url = self.url_for(address);

        let response = self
            .client
            .get(&url)
            .header(HOST, target.name.as_str())
            .send()
            .await?;
        let status = response.status();

        // Reading the body consumes the response; otherwise it is dropped here.
        // Either way the connection goes back to the pool or is closed.
        if self.keep_body {
            match response.text().await {
                Ok(body) => target.response_body = Some(body),
                Err(e) => debug!("Failed to read body from {} ({}): {}", target.name, url, e),
            }
        }

        if status == StatusCode::OK {
            Ok(())
        } else {
            Err(CheckError::Status(status))
        }
    }
}

#[async_trait]
impl Verify for HttpChecker {
    async fn verify(&self, target: &mut DomainTarget) -> Result<(), CheckError> {
        self.check(target).await
    }
}
