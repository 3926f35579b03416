use std::time::Duration;

use log::debug;

use crate::clients::{
    endpoints::EndpointTable,
    errors::{Error, Result},
    transport::HttpTransport,
};

/// Music server used when neither the builder nor the environment names one.
pub const DEFAULT_BASE_URL: &str = "http://localhost:1970";
/// Request timeout used when neither the builder nor the environment sets one.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const BASE_URL_VAR: &str = "ALBUMFETCH_BASE_URL";
const TIMEOUT_VAR: &str = "ALBUMFETCH_TIMEOUT_SECS";

/// Configuration for the album client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Server root the endpoint paths are appended to.
    pub base_url: String,
    /// Per-request timeout of the HTTP client.
    pub timeout: Duration,
}

impl Config {
    /// Builds the reqwest-backed transport with the default endpoint table.
    pub fn http_transport(&self) -> Result<HttpTransport> {
        let endpoints = EndpointTable::new(&self.base_url)?;
        let client = reqwest::Client::builder().timeout(self.timeout).build()?;
        debug!(
            "Using music server at {} (timeout {:?})",
            self.base_url, self.timeout
        );
        Ok(HttpTransport::new(client, endpoints))
    }
}

/// Builder for [`Config`]. Unset values come from `ALBUMFETCH_BASE_URL` and
/// `ALBUMFETCH_TIMEOUT_SECS`, then from the defaults.
#[derive(Default)]
pub struct ConfigBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
}

impl ConfigBuilder {
    /// Builder with nothing set.
    pub fn new() -> Self {
        Self {
            base_url: None,
            timeout: None,
        }
    }

    /// Sets the server root, overriding the environment.
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets the request timeout, overriding the environment.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Resolves every value: explicit, then environment, then default.
    pub fn build(self) -> Result<Config> {
        let env_base_url = match self.base_url {
            Some(_) => None,
            None => read_var(BASE_URL_VAR)?,
        };
        let env_timeout = match self.timeout {
            Some(_) => None,
            None => read_var(TIMEOUT_VAR)?,
        };
        let base_url = pick_base_url(self.base_url, env_base_url);
        let timeout = pick_timeout(self.timeout, env_timeout)?;
        Ok(Config { base_url, timeout })
    }
}

fn pick_base_url(explicit: Option<String>, from_env: Option<String>) -> String {
    explicit
        .or(from_env)
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
}

fn pick_timeout(explicit: Option<Duration>, from_env: Option<String>) -> Result<Duration> {
    match (explicit, from_env) {
        (Some(timeout), _) => Ok(timeout),
        (None, Some(raw)) => parse_timeout(&raw),
        (None, None) => Ok(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
    }
}

fn parse_timeout(raw: &str) -> Result<Duration> {
    raw.trim().parse().map(Duration::from_secs).map_err(|_| {
        Error::ConfigurationError(format!(
            "{TIMEOUT_VAR} must be a number of seconds, got {raw:?}"
        ))
    })
}

fn read_var(name: &str) -> Result<Option<String>> {
    match std::env::var(name) {
        Ok(value) if value.is_empty() => Ok(None),
        Ok(value) => Ok(Some(value)),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(err) => Err(err.into()),
    }
}
