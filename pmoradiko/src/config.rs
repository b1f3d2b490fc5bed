//! Configuration for the radiko timeshift client.
//!
//! Every value has a default matching the public radiko service, so an empty
//! YAML document (or no document at all) yields a usable configuration.
//!
//! ```yaml
//! api:
//!   base_url: https://radiko.jp
//!   request_timeout_secs: 30
//! timeshift:
//!   playlist_limit: 300
//!   stream_type: b
//!   preroll: 0
//! ```

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default radiko base URL
pub const DEFAULT_BASE_URL: &str = "https://radiko.jp";

/// Default timeout for HTTP requests (30 seconds)
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default User-Agent
pub const DEFAULT_USER_AGENT: &str = concat!("pmoradiko/", env!("CARGO_PKG_VERSION"));

/// Header carrying the radiko auth token
pub const DEFAULT_AUTH_TOKEN_HEADER: &str = "X-Radiko-AuthToken";

/// Value of the `l` query parameter
pub const DEFAULT_PLAYLIST_LIMIT: u32 = 300;

/// Value of the `type` query parameter
pub const DEFAULT_STREAM_TYPE: &str = "b";

/// Value of the `preroll` query parameter (0 disables the ad preroll)
pub const DEFAULT_PREROLL: u32 = 0;

/// Top-level configuration block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RadikoConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub timeshift: TimeshiftConfig,
}

impl RadikoConfig {
    /// Parse a configuration from a YAML document
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a configuration from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&content)
    }

    /// URL of the stream descriptor document for a station
    pub fn stream_descriptor_url(&self, station_id: &str) -> String {
        format!(
            "{}/v3/station/stream/pc_html5/{}.xml",
            self.api.base_url.trim_end_matches('/'),
            station_id
        )
    }

    /// Base URL used for web player links
    pub fn browser_base(&self) -> &str {
        self.api.base_url.trim_end_matches('/')
    }
}

/// Service location and HTTP behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "ApiConfig::default_base_url")]
    pub base_url: String,
    #[serde(default = "ApiConfig::default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl ApiConfig {
    fn default_base_url() -> String {
        DEFAULT_BASE_URL.to_string()
    }

    const fn default_request_timeout() -> u64 {
        DEFAULT_REQUEST_TIMEOUT_SECS
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
            request_timeout_secs: Self::default_request_timeout(),
        }
    }
}

/// Fixed values sent with every timeshift playlist request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeshiftConfig {
    #[serde(default = "TimeshiftConfig::default_user_agent")]
    pub user_agent: String,
    #[serde(default = "TimeshiftConfig::default_auth_token_header")]
    pub auth_token_header: String,
    #[serde(default = "TimeshiftConfig::default_playlist_limit")]
    pub playlist_limit: u32,
    #[serde(default = "TimeshiftConfig::default_stream_type")]
    pub stream_type: String,
    #[serde(default = "TimeshiftConfig::default_preroll")]
    pub preroll: u32,
}

impl TimeshiftConfig {
    fn default_user_agent() -> String {
        DEFAULT_USER_AGENT.to_string()
    }

    fn default_auth_token_header() -> String {
        DEFAULT_AUTH_TOKEN_HEADER.to_string()
    }

    const fn default_playlist_limit() -> u32 {
        DEFAULT_PLAYLIST_LIMIT
    }

    fn default_stream_type() -> String {
        DEFAULT_STREAM_TYPE.to_string()
    }

    const fn default_preroll() -> u32 {
        DEFAULT_PREROLL
    }
}

impl Default for TimeshiftConfig {
    fn default() -> Self {
        Self {
            user_agent: Self::default_user_agent(),
            auth_token_header: Self::default_auth_token_header(),
            playlist_limit: Self::default_playlist_limit(),
            stream_type: Self::default_stream_type(),
            preroll: Self::default_preroll(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = RadikoConfig::default();
        assert_eq!(config.api.base_url, "https://radiko.jp");
        assert_eq!(config.api.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.timeshift.playlist_limit, 300);
        assert_eq!(config.timeshift.stream_type, "b");
        assert_eq!(config.timeshift.preroll, 0);
        assert_eq!(config.timeshift.auth_token_header, "X-Radiko-AuthToken");
        assert!(config.timeshift.user_agent.starts_with("pmoradiko/"));
    }

    #[test]
    fn test_empty_yaml_gives_defaults() {
        assert_eq!(RadikoConfig::from_yaml_str("").unwrap(), RadikoConfig::default());
        assert_eq!(RadikoConfig::from_yaml_str("{}").unwrap(), RadikoConfig::default());
    }

    #[test]
    fn test_partial_yaml_override() {
        let yaml = "api:\n  base_url: http://127.0.0.1:8080/\ntimeshift:\n  playlist_limit: 60\n";
        let config = RadikoConfig::from_yaml_str(yaml).unwrap();

        assert_eq!(config.api.base_url, "http://127.0.0.1:8080/");
        assert_eq!(config.api.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
        assert_eq!(config.timeshift.playlist_limit, 60);
        assert_eq!(config.timeshift.stream_type, "b");
        assert_eq!(config.browser_base(), "http://127.0.0.1:8080");
    }

    #[test]
    fn test_invalid_yaml() {
        let err = RadikoConfig::from_yaml_str("timeshift: [1, 2").unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "timeshift:\n  stream_type: c\n  preroll: 1").unwrap();

        let config = RadikoConfig::load(file.path()).unwrap();
        assert_eq!(config.timeshift.stream_type, "c");
        assert_eq!(config.timeshift.preroll, 1);
    }

    #[test]
    fn test_stream_descriptor_url() {
        let config = RadikoConfig::default();
        assert_eq!(
            config.stream_descriptor_url("TBS"),
            "https://radiko.jp/v3/station/stream/pc_html5/TBS.xml"
        );
    }
}
