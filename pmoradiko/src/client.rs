//! HTTP client for radiko
//!
//! [`RadikoClient`] is the default [`Transport`]: a shared `reqwest::Client`
//! plus the auth token of an already authenticated session. Obtaining the
//! token is left to the caller.
//!
//! # Example
//!
//! ```no_run
//! use pmoradiko::RadikoClient;
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = RadikoClient::builder()
//!         .auth_token("token-from-auth2")
//!         .build()
//!         .await?;
//!
//!     let seek = chrono::Utc::now() - chrono::Duration::hours(2);
//!     let uri = client
//!         .timeshift()
//!         .timeshift_playlist_m3u8(
//!             &CancellationToken::new(),
//!             "TBS",
//!             seek,
//!             "20240101050000",
//!             "20240101060000",
//!         )
//!         .await?;
//!     println!("Stream: {}", uri);
//!     Ok(())
//! }
//! ```

use crate::config::DEFAULT_REQUEST_TIMEOUT_SECS;
use crate::error::{Error, Result};
use crate::timeshift::TimeshiftResolver;
use crate::transport::{cancellable, Transport};
use async_trait::async_trait;
use reqwest::{Client, Request, Response};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// radiko HTTP client
///
/// Cloning is cheap: the connection pool is shared.
#[derive(Debug, Clone)]
pub struct RadikoClient {
    pub(crate) client: Client,
    auth_token: Option<String>,
    timeout: Duration,
}

impl RadikoClient {
    /// Create a new client with default settings (no auth token)
    pub async fn new() -> Result<Self> {
        Self::builder().build().await
    }

    /// Create a builder for configuring the client
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Create a client with a custom reqwest::Client
    ///
    /// Useful for sharing HTTP connection pools or custom proxy settings
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            auth_token: None,
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    /// Get the internal HTTP client
    pub fn http_client(&self) -> &Client {
        &self.client
    }

    /// Replace the auth token
    pub fn set_auth_token(&mut self, token: impl Into<String>) {
        self.auth_token = Some(token.into());
    }

    /// Timeshift resolver using this client and the default configuration
    pub fn timeshift(&self) -> TimeshiftResolver<RadikoClient> {
        TimeshiftResolver::new(self.clone())
    }
}

#[async_trait]
impl Transport for RadikoClient {
    async fn send(&self, mut request: Request, cancel: &CancellationToken) -> Result<Response> {
        if request.timeout().is_none() {
            *request.timeout_mut() = Some(self.timeout);
        }

        let url = request.url().clone();
        debug!("{} {}", request.method(), url);

        let response = cancellable(cancel, async {
            self.client.execute(request).await.map_err(Error::from)
        })
        .await?;

        let status = response.status();
        if !status.is_success() {
            warn!("{} returned status {}", url, status);
            return Err(Error::api_error(format!(
                "{} returned status: {}",
                url.path(),
                status
            )));
        }

        Ok(response)
    }

    fn auth_token(&self) -> Option<String> {
        self.auth_token.clone()
    }
}

/// Builder for configuring a RadikoClient
///
/// The User-Agent is not a client setting: every request carries
/// `timeshift.user_agent` from [`crate::RadikoConfig`].
#[derive(Debug)]
pub struct ClientBuilder {
    client: Option<Client>,
    timeout: Duration,
    proxy: Option<String>,
    auth_token: Option<String>,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self {
            client: None,
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            proxy: None,
            auth_token: None,
        }
    }
}

impl ClientBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a custom HTTP client
    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set a proxy URL
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Set the auth token of an authenticated session
    pub fn auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Build the client
    pub async fn build(self) -> Result<RadikoClient> {
        let client = if let Some(client) = self.client {
            client
        } else {
            let mut builder = Client::builder().timeout(self.timeout);

            if let Some(proxy_url) = &self.proxy {
                let proxy = reqwest::Proxy::all(proxy_url)
                    .map_err(|e| Error::other(format!("Invalid proxy: {}", e)))?;
                builder = builder.proxy(proxy);
            }

            builder.build()?
        };

        Ok(RadikoClient {
            client,
            auth_token: self.auth_token,
            timeout: self.timeout,
        })
    }
}
