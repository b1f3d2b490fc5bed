//! radiko timeshift client library for PMOMusic
//!
//! This crate resolves playable catch-up ("timeshift") stream URLs for
//! radiko stations, given a station id and a program window.
//!
//! # Features
//!
//! - **Endpoint Resolution**: Fetch the station's stream descriptor and pick
//!   the in-area timeshift endpoint (falling back to any timeshift endpoint)
//! - **Signed Playlist Requests**: Fresh `lsid` per call, auth token header,
//!   program bounds kept apart from the seek position
//! - **Manifest Parsing**: First variant of the returned HLS master playlist
//! - **Cancellation**: Every network stage honors a `CancellationToken`
//! - **Browser Links**: `https://radiko.jp/#!/ts/<station>/<timestamp>`
//!
//! Authentication (obtaining the token) is out of scope: the client is given
//! the token of an already authenticated session.
//!
//! # Example
//!
//! ```no_run
//! use pmoradiko::{RadikoClient, TimeshiftResolver, RadikoConfig};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = RadikoClient::builder().auth_token("token").build().await?;
//!     let resolver = TimeshiftResolver::with_config(client, RadikoConfig::load("radiko.yaml")?);
//!
//!     let cancel = CancellationToken::new();
//!     let seek = chrono::Utc::now() - chrono::Duration::minutes(90);
//!     let uri = resolver
//!         .timeshift_playlist_m3u8(&cancel, "TBS", seek, "20240101050000", "20240101060000")
//!         .await?;
//!     println!("Stream: {}", uri);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod datetime;
pub mod endpoint;
pub mod error;
pub mod manifest;
pub mod models;
pub mod playlist;
pub mod session;
pub mod timeshift;
pub mod transport;

// Re-exports
pub use client::{ClientBuilder, RadikoClient};
pub use config::{ApiConfig, RadikoConfig, TimeshiftConfig};
pub use datetime::{format_datetime, RadikoDatetime, TimestampFormatter};
pub use error::{Error, Result};
pub use manifest::{M3u8Manifest, ManifestParser};
pub use models::{StreamEndpoint, StreamEndpointCatalog, TimeWindow};
pub use session::generate_lsid;
pub use timeshift::{timeshift_browser_url, TimeshiftResolver};
pub use transport::Transport;
