//! Stream endpoint resolution
//!
//! radiko advertises several playlist endpoints per station. For timeshift
//! playback the resolver picks, in order:
//!
//! 1. the first endpoint with `timefree="1"` and `areafree="0"` (in-area
//!    catch-up endpoint);
//! 2. otherwise the first endpoint with `timefree="1"`;
//! 3. otherwise resolution fails with [`Error::NoTimeshiftEndpoint`].

use crate::config::RadikoConfig;
use crate::error::{Error, Result};
use crate::models::{StreamEndpoint, StreamEndpointCatalog};
use crate::transport::{header_value, read_body, Transport};
use quick_xml::de::DeError;
use quick_xml::events::Event;
use quick_xml::Reader;
use reqwest::header::USER_AGENT;
use reqwest::{Method, Request};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use url::Url;

/// Root element of a stream descriptor
pub const DESCRIPTOR_ROOT: &str = "urls";

/// Decode a stream descriptor document.
///
/// Decoding is strict: any malformed content, a root element other than
/// `<urls>` or content after the root is an error.
pub fn parse_stream_catalog(body: &[u8]) -> Result<StreamEndpointCatalog> {
    check_descriptor_shape(body)?;
    Ok(quick_xml::de::from_reader(body)?)
}

/// Walk the document once: a single `<urls>` root, only prolog/epilog
/// markup (declaration, comments, whitespace) around it.
fn check_descriptor_shape(body: &[u8]) -> Result<()> {
    let mut reader = Reader::from_reader(body);
    let mut buf = Vec::new();
    let mut depth = 0usize;
    let mut root_seen = false;

    loop {
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|e| invalid_descriptor(format!("malformed XML: {}", e)))?;

        match event {
            Event::Eof => break,
            _ if depth > 0 => match &event {
                Event::Start(_) => depth += 1,
                Event::End(_) => depth -= 1,
                _ => {}
            },
            Event::Start(ref e) | Event::Empty(ref e) => {
                if root_seen {
                    return Err(invalid_descriptor("content after the root element"));
                }
                if e.name().as_ref() != DESCRIPTOR_ROOT.as_bytes() {
                    return Err(invalid_descriptor(format!(
                        "unexpected root element <{}>",
                        String::from_utf8_lossy(e.name().as_ref())
                    )));
                }
                root_seen = true;
                if matches!(event, Event::Start(_)) {
                    depth = 1;
                }
            }
            Event::Decl(_) | Event::Comment(_) | Event::PI(_) | Event::DocType(_) => {}
            Event::Text(ref t) if t.iter().all(u8::is_ascii_whitespace) => {}
            _ => return Err(invalid_descriptor("unexpected content outside the root element")),
        }
        buf.clear();
    }

    if !root_seen || depth != 0 {
        return Err(invalid_descriptor("missing or unclosed <urls> root element"));
    }
    Ok(())
}

fn invalid_descriptor(msg: impl Into<String>) -> Error {
    Error::Xml(DeError::Custom(msg.into()))
}

/// Pick the playlist URL to use for timeshift playback
pub fn select_playlist_url<'a>(
    catalog: &'a StreamEndpointCatalog,
    station_id: &str,
) -> Result<&'a str> {
    let candidates = || catalog.endpoints.iter().filter(|e| is_timeshift_candidate(e));

    candidates()
        .find(|e| e.is_area_restricted())
        .or_else(|| candidates().next())
        .map(|e| e.playlist_create_url.as_str())
        .ok_or_else(|| Error::NoTimeshiftEndpoint(station_id.to_string()))
}

fn is_timeshift_candidate(endpoint: &StreamEndpoint) -> bool {
    endpoint.is_timefree() && !endpoint.playlist_create_url.trim().is_empty()
}

/// Fetch the station's stream descriptor and select its timeshift endpoint
pub async fn resolve_playlist_create_url<T>(
    transport: &T,
    config: &RadikoConfig,
    cancel: &CancellationToken,
    station_id: &str,
) -> Result<String>
where
    T: Transport + ?Sized,
{
    let url = Url::parse(&config.stream_descriptor_url(station_id))?;

    let mut request = Request::new(Method::GET, url);
    request.headers_mut().insert(
        USER_AGENT,
        header_value(USER_AGENT.as_str(), &config.timeshift.user_agent)?,
    );

    let response = transport.send(request, cancel).await?;
    let body = read_body(response, cancel).await?;
    let catalog = parse_stream_catalog(&body)?;

    match select_playlist_url(&catalog, station_id) {
        Ok(playlist_url) => {
            debug!(
                "Station {}: {} endpoints, selected {}",
                station_id,
                catalog.endpoints.len(),
                playlist_url
            );
            Ok(playlist_url.to_string())
        }
        Err(e) => {
            warn!("Station {}: {}", station_id, e);
            Err(e)
        }
    }
}
