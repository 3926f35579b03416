use std::time::Duration;

use clap::{Parser, Subcommand};
use log::info;
use serde::Serialize;
use serde_json::{Value, json};

use albumfetch::clients::{AlbumClient, HttpTransport, LogNotifier, errors::Result};
use albumfetch::config::ConfigBuilder;

#[derive(Parser)]
#[command(name = "albumfetch")]
#[command(version, about = "Fetch album data from a music server", long_about = None)]
struct Cli {
    /// Music server base URL (defaults to $ALBUMFETCH_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Request timeout in seconds (defaults to $ALBUMFETCH_TIMEOUT_SECS)
    #[arg(long, global = true)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Album info and tracks
    Tracks { hash: String },
    /// Artists credited on the album
    Artists { hash: String },
    /// Album biography
    Bio { hash: String },
    /// Other albums by an artist
    FromArtist {
        albumartist: String,
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long, default_value = "")]
        exclude: String,
    },
    /// Everything the album page shows
    Overview { hash: String },
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut builder = ConfigBuilder::new();
    if let Some(url) = cli.base_url {
        builder = builder.base_url(url);
    }
    if let Some(secs) = cli.timeout {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    let config = builder.build()?;
    let client = AlbumClient::new(config.http_transport()?);

    match cli.command {
        Commands::Tracks { hash } => print(&client.fetch_album_tracks(&hash, &LogNotifier).await?),
        Commands::Artists { hash } => print(&client.fetch_album_artists(&hash).await?),
        Commands::Bio { hash } => print(&client.fetch_album_bio(&hash).await?),
        Commands::FromArtist {
            albumartist,
            limit,
            exclude,
        } => print(
            &client
                .fetch_albums_from_artist(&albumartist, limit, &exclude)
                .await?,
        ),
        Commands::Overview { hash } => print(&overview(&client, &hash).await?),
    }
}

async fn overview(client: &AlbumClient<HttpTransport>, hash: &str) -> Result<Value> {
    info!("Fetching album page for {hash} ...");
    let (album, artists, bio) = futures::try_join!(
        client.fetch_album_tracks(hash, &LogNotifier),
        client.fetch_album_artists(hash),
        client.fetch_album_bio(hash),
    )?;

    let related = match artists
        .first()
        .and_then(|a| a.get("name"))
        .and_then(Value::as_str)
    {
        Some(name) => client.fetch_albums_from_artist(name, None, hash).await?,
        None => Vec::new(),
    };
    info!(
        "Album {hash}: {} tracks, {} artists, {} related albums",
        album.tracks.len(),
        artists.len(),
        related.len()
    );

    Ok(json!({
        "info": album.info,
        "tracks": album.tracks,
        "artists": artists,
        "bio": bio,
        "related": related,
    }))
}

fn print<T: Serialize>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value)?;
    println!("{out}");
    Ok(())
}
