//! Timeshift (catch-up) stream resolution
//!
//! [`TimeshiftResolver::timeshift_playlist_m3u8`] chains the whole pipeline:
//! stream descriptor → endpoint selection → signed playlist request →
//! manifest → playable URI. Each call is independent and only reads the
//! transport's auth token once.

use crate::config::{RadikoConfig, DEFAULT_BASE_URL};
use crate::datetime::{RadikoDatetime, TimestampFormatter};
use crate::endpoint::resolve_playlist_create_url;
use crate::error::{Error, Result};
use crate::manifest::{M3u8Manifest, ManifestParser};
use crate::models::TimeWindow;
use crate::playlist::{fetch_manifest_uri, PlaylistRequest};
use crate::session::generate_lsid;
use crate::transport::Transport;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Resolves timeshift stream URIs through a [`Transport`]
#[derive(Clone)]
pub struct TimeshiftResolver<T> {
    transport: T,
    config: RadikoConfig,
    manifest: Arc<dyn ManifestParser>,
    formatter: Arc<dyn TimestampFormatter>,
}

impl<T: Transport> TimeshiftResolver<T> {
    /// Create a resolver with the default configuration
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, RadikoConfig::default())
    }

    /// Create a resolver with an explicit configuration
    pub fn with_config(transport: T, config: RadikoConfig) -> Self {
        Self {
            transport,
            config,
            manifest: Arc::new(M3u8Manifest),
            formatter: Arc::new(RadikoDatetime),
        }
    }

    /// Replace the manifest parser
    pub fn manifest_parser(mut self, parser: Arc<dyn ManifestParser>) -> Self {
        self.manifest = parser;
        self
    }

    /// Replace the timestamp formatter
    pub fn formatter(mut self, formatter: Arc<dyn TimestampFormatter>) -> Self {
        self.formatter = formatter;
        self
    }

    pub fn config(&self) -> &RadikoConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Resolve the playable URI of a past program.
    ///
    /// # Arguments
    ///
    /// * `cancel` - aborts either network stage with [`Error::Cancelled`]
    /// * `station_id` - radiko station id (e.g. "TBS")
    /// * `seek` - where playback should begin
    /// * `ft` / `to` - program boundaries, already in radiko format
    pub async fn timeshift_playlist_m3u8(
        &self,
        cancel: &CancellationToken,
        station_id: &str,
        seek: DateTime<Utc>,
        ft: &str,
        to: &str,
    ) -> Result<String> {
        let window = TimeWindow::new(ft, to, seek);
        self.resolve(cancel, station_id, &window).await
    }

    /// Same as [`timeshift_playlist_m3u8`](Self::timeshift_playlist_m3u8)
    /// with a prepared [`TimeWindow`]
    pub async fn resolve(
        &self,
        cancel: &CancellationToken,
        station_id: &str,
        window: &TimeWindow,
    ) -> Result<String> {
        let auth_token = self.transport.auth_token().ok_or(Error::MissingAuthToken)?;

        let endpoint =
            resolve_playlist_create_url(&self.transport, &self.config, cancel, station_id).await?;

        let lsid = generate_lsid()?;
        let request = PlaylistRequest {
            endpoint: &endpoint,
            station_id,
            window,
            lsid: &lsid,
            auth_token: &auth_token,
        }
        .build(&self.config.timeshift, self.formatter.as_ref())?;

        let uri =
            fetch_manifest_uri(&self.transport, request, cancel, self.manifest.as_ref()).await?;
        debug!("Station {}: timeshift stream {}", station_id, uri);

        Ok(uri)
    }

    /// Web player URL for a station at a given instant (no network access)
    pub fn browser_url(&self, station_id: &str, start: &DateTime<Utc>) -> String {
        build_browser_url(
            self.config.browser_base(),
            station_id,
            &self.formatter.format(start),
        )
    }
}

/// Web player URL on radiko.jp: `https://radiko.jp/#!/ts/<station>/<timestamp>`
///
/// Inputs are not validated.
///
/// ```
/// use chrono::{TimeZone, Utc};
///
/// let start = Utc.with_ymd_and_hms(2024, 1, 1, 20, 0, 0).unwrap();
/// assert_eq!(
///     pmoradiko::timeshift_browser_url("TBS", &start),
///     "https://radiko.jp/#!/ts/TBS/20240102050000"
/// );
/// ```
pub fn timeshift_browser_url(station_id: &str, start: &DateTime<Utc>) -> String {
    build_browser_url(DEFAULT_BASE_URL, station_id, &RadikoDatetime.format(start))
}

fn build_browser_url(base: &str, station_id: &str, timestamp: &str) -> String {
    let path = ["#!", "ts", station_id, timestamp]
        .iter()
        .map(|segment| segment.trim_matches('/'))
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/");
    format!("{}/{}", base.trim_end_matches('/'), path)
}
