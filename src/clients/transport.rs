use std::future::Future;

use log::debug;
use serde_json::Value;

use crate::clients::{
    endpoints::{Endpoint, EndpointTable, Params},
    errors::Result,
};

/// Outcome of one request. A 2xx reply fills `data`, anything else fills
/// `error`; `status` is set whenever the server answered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Response {
    /// Body of a successful reply.
    pub data: Option<Value>,
    /// HTTP status, if the server answered.
    pub status: Option<u16>,
    /// Body (or reason phrase) of a failed reply.
    pub error: Option<Value>,
}

impl Response {
    /// `data` unless it is absent or JSON `null`.
    pub fn take_data(&mut self) -> Option<Value> {
        self.data.take().filter(|v| !v.is_null())
    }
}

/// Executes one request against an [`Endpoint`].
pub trait Transport {
    /// Sends `params` to `endpoint`. `Err` only when no usable reply arrived.
    fn request(
        &self,
        endpoint: Endpoint,
        params: &Params,
    ) -> impl Future<Output = Result<Response>> + Send;
}

/// [`Transport`] over a `reqwest::Client`, issuing GET requests.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoints: EndpointTable,
}

impl HttpTransport {
    /// Sends requests with `client` to the URLs of `endpoints`.
    pub fn new(client: reqwest::Client, endpoints: EndpointTable) -> Self {
        HttpTransport { client, endpoints }
    }

    /// The endpoint table in use.
    pub fn endpoints(&self) -> &EndpointTable {
        &self.endpoints
    }
}

// Empty bodies (204, bare 404) map to `None`; non-JSON bodies are kept as text
fn parse_body(bytes: &[u8]) -> Option<Value> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return None;
    }
    Some(
        serde_json::from_slice(bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned())),
    )
}

impl Transport for HttpTransport {
    async fn request(&self, endpoint: Endpoint, params: &Params) -> Result<Response> {
        let (url, query) = self.endpoints.resolve(endpoint, params)?;
        debug!("GET {url} ({}) query={query:?}", endpoint.as_str());

        let response = self.client.get(url).query(&query).send().await?;
        let status = response.status();
        let body = parse_body(&response.bytes().await?);
        debug!("{} answered with status {}", endpoint.as_str(), status.as_u16());

        if status.is_success() {
            Ok(Response {
                data: body,
                status: Some(status.as_u16()),
                error: None,
            })
        } else {
            let error = body.unwrap_or_else(|| {
                Value::String(status.canonical_reason().unwrap_or("request failed").to_string())
            });
            Ok(Response {
                data: None,
                status: Some(status.as_u16()),
                error: Some(error),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        Json, Router,
        extract::{Path, Query},
        http::StatusCode,
        response::IntoResponse,
        routing::get,
    };
    use serde_json::json;
    use std::collections::HashMap;

    use super::*;
    use crate::clients::errors::Error;

    async fn album(Path(hash): Path<String>) -> axum::response::Response {
        match hash.as_str() {
            "pending" => StatusCode::NO_CONTENT.into_response(),
            "broken" => {
                (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "msg": "boom" }))).into_response()
            }
            _ => Json(json!({ "info": { "albumhash": hash }, "tracks": [] })).into_response(),
        }
    }

    async fn bio(Path(_hash): Path<String>) -> StatusCode {
        StatusCode::NOT_FOUND
    }

    async fn from_artist(Query(query): Query<HashMap<String, String>>) -> Json<Value> {
        Json(json!({ "data": [query] }))
    }

    async fn spawn_server() -> String {
        let app = Router::new()
            .route("/album/from-artist", get(from_artist))
            .route("/album/{hash}", get(album))
            .route("/album/{hash}/bio", get(bio));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    async fn transport() -> HttpTransport {
        let endpoints = EndpointTable::new(&spawn_server().await).unwrap();
        HttpTransport::new(reqwest::Client::new(), endpoints)
    }

    #[tokio::test]
    async fn test_success_fills_data() {
        let transport = transport().await;
        let params = Params::new().with("hash", "abc");
        let response = transport.request(Endpoint::Album, &params).await.unwrap();
        assert_eq!(response.status, Some(200));
        assert_eq!(response.data.unwrap()["info"]["albumhash"], "abc");
        assert!(response.error.is_none());
    }

    #[tokio::test]
    async fn test_no_content_has_no_data() {
        let transport = transport().await;
        let params = Params::new().with("hash", "pending");
        let response = transport.request(Endpoint::Album, &params).await.unwrap();
        assert_eq!(
            response,
            Response {
                data: None,
                status: Some(204),
                error: None,
            }
        );
    }

    #[tokio::test]
    async fn test_not_found_fills_error() {
        let transport = transport().await;
        let params = Params::new().with("hash", "abc");
        let response = transport.request(Endpoint::AlbumBio, &params).await.unwrap();
        assert_eq!(response.status, Some(404));
        assert!(response.data.is_none());
        assert_eq!(response.error, Some(json!("Not Found")));
    }

    #[tokio::test]
    async fn test_server_error_keeps_body() {
        let transport = transport().await;
        let params = Params::new().with("hash", "broken");
        let response = transport.request(Endpoint::Album, &params).await.unwrap();
        assert_eq!(response.status, Some(500));
        assert_eq!(response.error, Some(json!({ "msg": "boom" })));
    }

    #[tokio::test]
    async fn test_query_params_are_sent() {
        let transport = transport().await;
        let params = Params::new()
            .with("albumartist", "Simon & Garfunkel")
            .with("limit", 3)
            .with("exclude", "abc");
        let response = transport
            .request(Endpoint::AlbumsFromArtist, &params)
            .await
            .unwrap();
        assert_eq!(
            response.data.unwrap()["data"][0],
            json!({ "albumartist": "Simon & Garfunkel", "limit": "3", "exclude": "abc" })
        );
    }

    #[tokio::test]
    async fn test_connection_failure_is_an_error() {
        // Bind then drop to get a port nothing listens on
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let endpoints = EndpointTable::new(&format!("http://{addr}")).unwrap();
        let transport = HttpTransport::new(reqwest::Client::new(), endpoints);
        let params = Params::new().with("hash", "abc");
        let err = transport.request(Endpoint::Album, &params).await.unwrap_err();
        assert!(matches!(err, Error::HttpError(_)));
    }

    #[test]
    fn test_parse_body() {
        assert_eq!(parse_body(b""), None);
        assert_eq!(parse_body(b" \n"), None);
        assert_eq!(parse_body(b"{\"a\":1}"), Some(json!({ "a": 1 })));
        assert_eq!(parse_body(b"oops"), Some(json!("oops")));
    }

    #[test]
    fn test_take_data_skips_null() {
        let mut response = Response {
            data: Some(Value::Null),
            ..Default::default()
        };
        assert_eq!(response.take_data(), None);
    }
}
