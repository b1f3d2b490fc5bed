//! Playlist manifest interpretation
//!
//! The playlist endpoint answers with an HLS master playlist whose first
//! variant is the playable stream.

use crate::error::{Error, Result};
use m3u8_rs::Playlist;

/// Extracts the playable URI from a playlist response body
pub trait ManifestParser: Send + Sync {
    fn extract_uri(&self, body: &[u8]) -> Result<String>;
}

/// HLS master playlist parser (first variant wins)
#[derive(Debug, Clone, Copy, Default)]
pub struct M3u8Manifest;

impl ManifestParser for M3u8Manifest {
    fn extract_uri(&self, body: &[u8]) -> Result<String> {
        match m3u8_rs::parse_playlist_res(body) {
            Ok(Playlist::MasterPlaylist(master)) => master
                .variants
                .into_iter()
                .next()
                .map(|variant| variant.uri)
                .ok_or_else(|| Error::manifest("no variant in master playlist")),
            Ok(Playlist::MediaPlaylist(_)) => {
                Err(Error::manifest("expected a master playlist, got a media playlist"))
            }
            Err(e) => Err(Error::manifest(format!("parse error: {:?}", e))),
        }
    }
}
