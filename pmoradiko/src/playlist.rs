//! Timeshift playlist request construction and retrieval
//!
//! `start_at`/`end_at` always carry the program boundaries; only `seek`
//! moves the playback position.

use crate::config::TimeshiftConfig;
use crate::datetime::TimestampFormatter;
use crate::error::{Error, Result};
use crate::manifest::ManifestParser;
use crate::models::TimeWindow;
use crate::transport::{header_value, read_body, Transport};
use reqwest::header::{HeaderName, PRAGMA, USER_AGENT};
use reqwest::{Method, Request};
use tokio_util::sync::CancellationToken;
use tracing::debug;
use url::Url;

/// Inputs of a single timeshift playlist request
#[derive(Debug, Clone)]
pub struct PlaylistRequest<'a> {
    /// `playlist_create_url` selected from the stream descriptor
    pub endpoint: &'a str,
    pub station_id: &'a str,
    pub window: &'a TimeWindow,
    /// Logical session id
    pub lsid: &'a str,
    pub auth_token: &'a str,
}

impl PlaylistRequest<'_> {
    /// Build the outbound request. Performs no I/O.
    ///
    /// Query parameters already present on the endpoint are kept.
    pub fn build(
        &self,
        settings: &TimeshiftConfig,
        formatter: &dyn TimestampFormatter,
    ) -> Result<Request> {
        let mut url = Url::parse(self.endpoint)?;

        let limit = settings.playlist_limit.to_string();
        let preroll = settings.preroll.to_string();
        let seek = formatter.format(&self.window.seek);

        url.query_pairs_mut()
            .append_pair("station_id", self.station_id)
            .append_pair("l", &limit)
            .append_pair("ft", &self.window.ft)
            .append_pair("to", &self.window.to)
            .append_pair("start_at", &self.window.ft)
            .append_pair("end_at", &self.window.to)
            .append_pair("seek", &seek)
            .append_pair("lsid", self.lsid)
            .append_pair("preroll", &preroll)
            .append_pair("type", &settings.stream_type);

        let token_header = HeaderName::from_bytes(settings.auth_token_header.as_bytes())
            .map_err(|_| Error::InvalidHeader(settings.auth_token_header.clone()))?;

        let mut request = Request::new(Method::GET, url);
        let headers = request.headers_mut();
        headers.insert(
            USER_AGENT,
            header_value(USER_AGENT.as_str(), &settings.user_agent)?,
        );
        headers.insert(PRAGMA, header_value(PRAGMA.as_str(), "no-cache")?);
        headers.insert(
            token_header,
            header_value(&settings.auth_token_header, self.auth_token)?,
        );

        Ok(request)
    }
}

/// Send a playlist request and extract the playable URI from its manifest.
///
/// The response body is read completely before parsing; the response is
/// released on every path.
pub async fn fetch_manifest_uri<T>(
    transport: &T,
    request: Request,
    cancel: &CancellationToken,
    parser: &dyn ManifestParser,
) -> Result<String>
where
    T: Transport + ?Sized,
{
    let response = transport.send(request, cancel).await?;
    let body = read_body(response, cancel).await?;
    debug!("Playlist manifest received ({} bytes)", body.len());
    parser.extract_uri(&body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datetime::RadikoDatetime;
    use chrono::{TimeZone, Utc};
    use std::collections::HashMap;

    fn window() -> TimeWindow {
        // 05:30 JST, half an hour into a 05:00-06:00 program
        let seek = Utc.with_ymd_and_hms(2024, 1, 1, 20, 30, 0).unwrap();
        TimeWindow::new("20240102050000", "20240102060000", seek)
    }

    fn query(request: &Request) -> HashMap<String, String> {
        request
            .url()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    fn build(endpoint: &str, settings: &TimeshiftConfig) -> Result<Request> {
        let window = window();
        PlaylistRequest {
            endpoint,
            station_id: "TBS",
            window: &window,
            lsid: "0123456789abcdef0123456789abcdef",
            auth_token: "secret-token",
        }
        .build(settings, &RadikoDatetime)
    }

    #[test]
    fn test_query_parameters() {
        let request = build("https://tf.example/tf/playlist.m3u8", &TimeshiftConfig::default())
            .unwrap();
        let q = query(&request);

        assert_eq!(request.method(), &Method::GET);
        assert_eq!(request.url().path(), "/tf/playlist.m3u8");
        assert_eq!(q["station_id"], "TBS");
        assert_eq!(q["l"], "300");
        assert_eq!(q["ft"], "20240102050000");
        assert_eq!(q["to"], "20240102060000");
        assert_eq!(q["end_at"], "20240102060000");
        assert_eq!(q["seek"], "20240102053000");
        assert_eq!(q["lsid"], "0123456789abcdef0123456789abcdef");
        assert_eq!(q["preroll"], "0");
        assert_eq!(q["type"], "b");
        assert_eq!(q.len(), 10);
    }

    #[test]
    fn test_start_at_pinned_to_program_start() {
        let request = build("https://tf.example/p.m3u8", &TimeshiftConfig::default()).unwrap();
        let q = query(&request);

        assert_eq!(q["start_at"], q["ft"]);
        assert_ne!(q["start_at"], q["seek"]);
    }

    #[test]
    fn test_parameter_order() {
        let request = build("https://tf.example/p.m3u8", &TimeshiftConfig::default()).unwrap();
        let keys: Vec<String> = request
            .url()
            .query_pairs()
            .map(|(k, _)| k.into_owned())
            .collect();
        assert_eq!(
            keys,
            [
                "station_id", "l", "ft", "to", "start_at", "end_at", "seek", "lsid", "preroll",
                "type"
            ]
        );
    }

    #[test]
    fn test_existing_query_kept() {
        let request = build("https://tf.example/p.m3u8?foo=bar", &TimeshiftConfig::default())
            .unwrap();
        let q = query(&request);
        assert_eq!(q["foo"], "bar");
        assert_eq!(q["station_id"], "TBS");
    }

    #[test]
    fn test_headers() {
        let request = build("https://tf.example/p.m3u8", &TimeshiftConfig::default()).unwrap();
        let headers = request.headers();

        assert_eq!(headers["pragma"], "no-cache");
        assert_eq!(headers["x-radiko-authtoken"], "secret-token");
        assert!(headers["user-agent"]
            .to_str()
            .unwrap()
            .starts_with("pmoradiko/"));
    }

    #[test]
    fn test_overridden_settings() {
        let settings = TimeshiftConfig {
            user_agent: "test-agent".to_string(),
            auth_token_header: "X-Test-Token".to_string(),
            playlist_limit: 15,
            stream_type: "c".to_string(),
            preroll: 1,
        };
        let request = build("https://tf.example/p.m3u8", &settings).unwrap();
        let q = query(&request);

        assert_eq!(q["l"], "15");
        assert_eq!(q["type"], "c");
        assert_eq!(q["preroll"], "1");
        assert_eq!(request.headers()["x-test-token"], "secret-token");
        assert_eq!(request.headers()["user-agent"], "test-agent");
    }

    #[test]
    fn test_malformed_endpoint() {
        let err = build("not a url", &TimeshiftConfig::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }

    #[test]
    fn test_invalid_token_header_value() {
        let window = window();
        let err = PlaylistRequest {
            endpoint: "https://tf.example/p.m3u8",
            station_id: "TBS",
            window: &window,
            lsid: "00",
            auth_token: "bad\ntoken",
        }
        .build(&TimeshiftConfig::default(), &RadikoDatetime)
        .unwrap_err();
        assert!(matches!(err, Error::InvalidHeader(_)));
    }
}
