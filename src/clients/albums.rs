use log::{debug, error, warn};
use serde_json::Value;

use crate::clients::{
    endpoints::{Endpoint, Params},
    entities::{Album, AlbumData, Artist, ArtistsPayload, BioPayload, RelatedAlbumsPayload},
    errors::{Error, Result},
    notification::{NotificationSink, Severity},
    transport::Transport,
};

/// Message shown when an album is known to the server but not indexed yet.
pub const ALBUM_NOT_CREATED: &str = "Album not created yet!";
/// Related-albums count used when the caller gives no limit.
pub const DEFAULT_RELATED_LIMIT: u32 = 2;

const NO_CONTENT: u16 = 204;
const NOT_FOUND: u16 = 404;

fn require_hash(hash: &str) -> Result<()> {
    if hash.is_empty() {
        return Err(Error::InvalidInput("album hash must not be empty".into()));
    }
    Ok(())
}

/// Album page data source. Every call is one request; responses that carry
/// an error are turned into the empty value of the expected shape.
pub struct AlbumClient<T> {
    transport: T,
}

impl<T: Transport> AlbumClient<T> {
    /// Wraps `transport`; all four operations go through it.
    pub fn new(transport: T) -> Self {
        AlbumClient { transport }
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Album info and its tracks.
    ///
    /// A 204 means the album is known but not indexed yet: `notifier` gets one
    /// error notification and the result is empty.
    pub async fn fetch_album_tracks<N: NotificationSink + ?Sized>(
        &self,
        hash: &str,
        notifier: &N,
    ) -> Result<AlbumData> {
        require_hash(hash)?;
        let params = Params::new().with("hash", hash);
        let mut response = self.transport.request(Endpoint::Album, &params).await?;

        if response.status == Some(NO_CONTENT) {
            notifier.show_notification(ALBUM_NOT_CREATED, Severity::Error);
            return Ok(AlbumData::default());
        }
        if let Some(err) = response.error.take() {
            error!(
                "Failed to fetch album {hash} (status {:?}): {err}",
                response.status
            );
            return Ok(AlbumData::default());
        }

        match response.take_data() {
            Some(data) => Ok(serde_json::from_value(data)?),
            None => Ok(AlbumData::default()),
        }
    }

    /// Artists credited on the album, in server order. Empty on any error reply.
    pub async fn fetch_album_artists(&self, hash: &str) -> Result<Vec<Artist>> {
        require_hash(hash)?;
        let params = Params::new().with("hash", hash);
        let mut response = self
            .transport
            .request(Endpoint::AlbumArtists, &params)
            .await?;

        if let Some(err) = response.error.take() {
            warn!("Failed to fetch artists for album {hash}: {err}");
            return Ok(Vec::new());
        }

        match response.take_data() {
            Some(data @ Value::Object(_)) => {
                Ok(serde_json::from_value::<ArtistsPayload>(data)?.artists)
            }
            Some(other) => {
                debug!("Unexpected album artists payload: {other}");
                Ok(Vec::new())
            }
            None => Ok(Vec::new()),
        }
    }

    /// Album biography text.
    ///
    /// `None` covers both "no biography" (404) and any other empty reply.
    pub async fn fetch_album_bio(&self, hash: &str) -> Result<Option<String>> {
        require_hash(hash)?;
        let params = Params::new().with("hash", hash);
        let mut response = self.transport.request(Endpoint::AlbumBio, &params).await?;

        match response.take_data() {
            Some(data @ Value::Object(_)) => {
                return Ok(serde_json::from_value::<BioPayload>(data)?.bio);
            }
            Some(other) => {
                debug!("Unexpected album bio payload: {other}");
                return Ok(None);
            }
            None => {}
        }
        if response.status != Some(NOT_FOUND) {
            debug!(
                "No biography for album {hash} (status {:?}, error {:?})",
                response.status, response.error
            );
        }
        Ok(None)
    }

    /// Other albums by `albumartist`, at most `limit` of them (2 when not
    /// given), never including the album `exclude`.
    pub async fn fetch_albums_from_artist(
        &self,
        albumartist: &str,
        limit: Option<u32>,
        exclude: &str,
    ) -> Result<Vec<Album>> {
        let params = Params::new()
            .with("albumartist", albumartist)
            .with("limit", limit.unwrap_or(DEFAULT_RELATED_LIMIT))
            .with("exclude", exclude);
        let mut response = self
            .transport
            .request(Endpoint::AlbumsFromArtist, &params)
            .await?;

        if let Some(err) = response.error.take() {
            warn!("Failed to fetch albums from artist {albumartist:?}: {err}");
            return Ok(Vec::new());
        }

        match response.take_data() {
            Some(data @ Value::Object(_)) => {
                Ok(serde_json::from_value::<RelatedAlbumsPayload>(data)?.data)
            }
            Some(other) => {
                debug!("Unexpected related albums payload: {other}");
                Ok(Vec::new())
            }
            None => Ok(Vec::new()),
        }
    }
}
