//! Data models for radiko stream descriptors and timeshift windows

use crate::datetime::TimestampFormatter;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Stream Descriptor Models
// ============================================================================

/// Stream descriptor returned by `/v3/station/stream/pc_html5/<station>.xml`
///
/// ```xml
/// <urls>
///   <url areafree="0" timefree="1">
///     <playlist_create_url>https://...</playlist_create_url>
///   </url>
/// </urls>
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamEndpointCatalog {
    /// Candidate endpoints in document order
    #[serde(rename = "url", default)]
    pub endpoints: Vec<StreamEndpoint>,
}

/// A candidate playlist endpoint for a station
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamEndpoint {
    /// 1 when reachable outside the station's home area
    #[serde(rename = "@areafree", default)]
    pub area_free: u8,
    /// 1 when the endpoint serves timeshift playback
    #[serde(rename = "@timefree", default)]
    pub time_free: u8,
    /// Playlist generation URL
    pub playlist_create_url: String,
}

impl StreamEndpoint {
    /// Check if this endpoint supports timeshift playback
    pub fn is_timefree(&self) -> bool {
        self.time_free == 1
    }

    /// Check if this endpoint is restricted to the station's home area
    pub fn is_area_restricted(&self) -> bool {
        self.area_free == 0
    }
}

// ============================================================================
// Timeshift Window
// ============================================================================

/// Program boundaries and playback position of a timeshift request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeWindow {
    /// Program start, already in radiko format
    pub ft: String,
    /// Program end, already in radiko format
    pub to: String,
    /// Where playback should begin
    pub seek: DateTime<Utc>,
}

impl TimeWindow {
    pub fn new(ft: impl Into<String>, to: impl Into<String>, seek: DateTime<Utc>) -> Self {
        Self {
            ft: ft.into(),
            to: to.into(),
            seek,
        }
    }

    /// Build a window from instants, formatting the program boundaries
    pub fn from_instants(
        start: &DateTime<Utc>,
        end: &DateTime<Utc>,
        seek: DateTime<Utc>,
        formatter: &dyn TimestampFormatter,
    ) -> Self {
        Self::new(formatter.format(start), formatter.format(end), seek)
    }
}
