//! Error types for the radiko timeshift client

/// Result type alias for radiko operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving a timeshift stream
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid URL (stream descriptor or playlist endpoint)
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A header value could not be encoded
    #[error("Invalid header value for {0}")]
    InvalidHeader(String),

    /// The transport holds no auth token
    #[error("No auth token available")]
    MissingAuthToken,

    /// API returned an error status
    #[error("API error: {0}")]
    ApiError(String),

    /// The caller cancelled the request
    #[error("Request cancelled")]
    Cancelled,

    /// Stream descriptor XML could not be decoded
    #[error("XML decoding failed: {0}")]
    Xml(#[from] quick_xml::de::DeError),

    /// Playlist manifest could not be interpreted
    #[error("Invalid playlist manifest: {0}")]
    Manifest(String),

    /// No endpoint in the descriptor supports timeshift playback
    #[error("no valid timeshift URL found for station {0}")]
    NoTimeshiftEndpoint(String),

    /// The OS random source failed
    #[error("Entropy source unavailable: {0}")]
    Entropy(String),

    /// Configuration could not be parsed
    #[error("Configuration error: {0}")]
    Config(#[from] serde_yaml::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a generic error from a string
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// Create an API error
    pub fn api_error(msg: impl Into<String>) -> Self {
        Self::ApiError(msg.into())
    }

    /// Create a manifest error
    pub fn manifest(msg: impl Into<String>) -> Self {
        Self::Manifest(msg.into())
    }

    /// True when the call was aborted through its cancellation token
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// True when the station has no endpoint usable for timeshift playback
    pub fn is_no_timeshift_endpoint(&self) -> bool {
        matches!(self, Self::NoTimeshiftEndpoint(_))
    }
}
