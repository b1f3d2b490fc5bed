//! Example: Resolve a radiko timeshift stream URL
//!
//! Run with:
//! RADIKO_AUTH_TOKEN=... cargo run -p pmoradiko --example timeshift_url -- TBS 20240101050000 20240101060000
//!
//! An optional `radiko.yaml` in the working directory overrides the defaults.

use pmoradiko::{format_datetime, RadikoClient, RadikoConfig, TimeshiftResolver};
use std::path::Path;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (station, ft, to) = match args.as_slice() {
        [station, ft, to] => (station.as_str(), ft.as_str(), to.as_str()),
        _ => anyhow::bail!("usage: timeshift_url <station_id> <ft> <to>"),
    };

    let config = if Path::new("radiko.yaml").exists() {
        RadikoConfig::load("radiko.yaml")?
    } else {
        RadikoConfig::default()
    };

    let token = std::env::var("RADIKO_AUTH_TOKEN")?;
    let client = RadikoClient::builder().auth_token(token).build().await?;
    let resolver = TimeshiftResolver::with_config(client, config);

    // Start playback ten minutes into the program
    let seek = chrono::NaiveDateTime::parse_from_str(ft, "%Y%m%d%H%M%S")?
        .and_utc()
        - chrono::Duration::hours(9)
        + chrono::Duration::minutes(10);
    println!("Seeking to {} (JST)", format_datetime(&seek));

    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c.cancel();
        }
    });

    let uri = resolver
        .timeshift_playlist_m3u8(&cancel, station, seek, ft, to)
        .await?;

    println!("Stream:  {}", uri);
    println!("Browser: {}", resolver.browser_url(station, &seek));

    Ok(())
}
