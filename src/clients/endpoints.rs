use std::collections::HashMap;

use reqwest::Url;

use crate::clients::errors::{Error, Result};

/// Remote endpoints the album client calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Album info and tracks, by hash.
    Album,
    /// Artists credited on an album, by hash.
    AlbumArtists,
    /// Album biography, by hash.
    AlbumBio,
    /// Other albums by an album artist.
    AlbumsFromArtist,
}

impl Endpoint {
    /// Short name used in logs and errors.
    pub fn as_str(&self) -> &'static str {
        match self {
            Endpoint::Album => "album",
            Endpoint::AlbumArtists => "album_artists",
            Endpoint::AlbumBio => "album_bio",
            Endpoint::AlbumsFromArtist => "albums_from_artist",
        }
    }

    /// Path template used unless overridden.
    pub fn default_path(&self) -> &'static str {
        match self {
            Endpoint::Album => "/album/{hash}",
            Endpoint::AlbumArtists => "/album/{hash}/artists",
            Endpoint::AlbumBio => "/album/{hash}/bio",
            Endpoint::AlbumsFromArtist => "/album/from-artist",
        }
    }
}

/// Ordered request parameters. Keys are fixed by the caller, values are
/// already rendered to strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(Vec<(&'static str, String)>);

impl Params {
    /// No parameters.
    pub fn new() -> Self {
        Params(Vec::new())
    }

    /// Appends `key = value`.
    #[must_use]
    pub fn with(mut self, key: &'static str, value: impl ToString) -> Self {
        self.0.push((key, value.to_string()));
        self
    }

    /// First value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Parameters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

/// Maps each [`Endpoint`] to a path template under one base URL.
///
/// A `{name}` segment in a template is replaced by the URL-encoded value of
/// the parameter `name`; every other parameter goes to the query string.
#[derive(Debug, Clone)]
pub struct EndpointTable {
    base_url: String,
    overrides: HashMap<Endpoint, String>,
}

impl EndpointTable {
    /// Table with the default paths under `base_url`.
    pub fn new(base_url: &str) -> Result<Self> {
        Url::parse(base_url).map_err(|e| {
            Error::ConfigurationError(format!("invalid base URL {base_url:?}: {e}"))
        })?;
        Ok(EndpointTable {
            base_url: base_url.trim_end_matches('/').to_string(),
            overrides: HashMap::new(),
        })
    }

    /// Replaces the path template of `endpoint`.
    #[must_use]
    pub fn with_path(mut self, endpoint: Endpoint, path: impl Into<String>) -> Self {
        self.overrides.insert(endpoint, path.into());
        self
    }

    /// Path template currently used for `endpoint`.
    pub fn path(&self, endpoint: Endpoint) -> &str {
        self.overrides
            .get(&endpoint)
            .map_or_else(|| endpoint.default_path(), String::as_str)
    }

    /// Full URL for `endpoint` plus the query pairs left after path substitution.
    pub fn resolve(
        &self,
        endpoint: Endpoint,
        params: &Params,
    ) -> Result<(Url, Vec<(String, String)>)> {
        let mut path = self.path(endpoint).to_string();
        let mut query = Vec::new();

        for (key, value) in params.iter() {
            let placeholder = format!("{{{key}}}");
            if path.contains(&placeholder) {
                path = path.replace(&placeholder, &urlencoding::encode(value));
            } else {
                query.push((key.to_string(), value.to_string()));
            }
        }

        if let Some(start) = path.find('{')
            && path[start..].contains('}')
        {
            return Err(Error::InvalidInput(format!(
                "missing parameter for {} path {path:?}",
                endpoint.as_str()
            )));
        }

        let url = Url::parse(&format!("{}{path}", self.base_url)).map_err(|e| {
            Error::ConfigurationError(format!("invalid URL for {}: {e}", endpoint.as_str()))
        })?;
        Ok((url, query))
    }
}
