use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use serde_with::{DefaultOnError, DefaultOnNull, serde_as};

/// Album description as sent by the server, kept as-is.
pub type AlbumInfo = Map<String, Value>;
/// One track of an album, opaque JSON.
pub type Track = Value;
/// One artist credited on an album, opaque JSON.
pub type Artist = Value;
/// One album in a related-albums listing, opaque JSON.
pub type Album = Value;

/// Album info together with its tracks. Missing or `null` fields are empty.
#[serde_as]
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct AlbumData {
    /// Album description.
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub info: AlbumInfo,
    /// Tracks in server order.
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub tracks: Vec<Track>,
}

// Payload wrappers only check for presence: a field of the wrong type reads as absent

#[serde_as]
#[derive(Deserialize, Debug, Default)]
pub(crate) struct ArtistsPayload {
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub artists: Vec<Artist>,
}

#[serde_as]
#[derive(Deserialize, Debug, Default)]
pub(crate) struct BioPayload {
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub bio: Option<String>,
}

// The related-albums endpoint nests its results one level down
#[serde_as]
#[derive(Deserialize, Debug, Default)]
pub(crate) struct RelatedAlbumsPayload {
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub data: Vec<Album>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_album_data_null_fields_default_to_empty() {
        let data: AlbumData =
            serde_json::from_value(json!({ "info": null, "tracks": null })).unwrap();
        assert_eq!(data, AlbumData::default());
    }

    #[test]
    fn test_album_data_missing_fields_default_to_empty() {
        let data: AlbumData =
            serde_json::from_value(json!({ "info": { "title": "Blue" } })).unwrap();
        assert_eq!(data.info["title"], "Blue");
        assert!(data.tracks.is_empty());
    }

    #[test]
    fn test_album_data_rejects_non_object_info() {
        assert!(serde_json::from_value::<AlbumData>(json!({ "info": [1, 2] })).is_err());
    }

    #[test]
    fn test_payload_wrong_field_types_default() {
        let artists: ArtistsPayload =
            serde_json::from_value(json!({ "artists": { "name": "A" } })).unwrap();
        assert!(artists.artists.is_empty());

        let bio: BioPayload = serde_json::from_value(json!({ "bio": 42 })).unwrap();
        assert_eq!(bio.bio, None);

        let related: RelatedAlbumsPayload =
            serde_json::from_value(json!({ "data": "none" })).unwrap();
        assert!(related.data.is_empty());
    }

    #[test]
    fn test_payload_null_fields_default() {
        let artists: ArtistsPayload = serde_json::from_value(json!({ "artists": null })).unwrap();
        assert!(artists.artists.is_empty());

        let bio: BioPayload = serde_json::from_value(json!({ "bio": null })).unwrap();
        assert_eq!(bio.bio, None);
    }
}
