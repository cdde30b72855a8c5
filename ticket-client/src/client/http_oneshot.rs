// ticket-client/src/client/http_oneshot.rs
// Oneshot HTTP transport - in-memory calls
//
// Requires the "in-process" feature (always compiled for tests)

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use http::{Method, Request, Response};
use reqwest::Url;
use serde::de::DeserializeOwned;
use tower::ServiceExt;

use crate::{ClientError, ClientResult};

use super::http::{BinaryResponse, HttpClient, QueryPairs, decode_json, header_string};

/// Oneshot HTTP client (in-memory calls)
///
/// Drives an axum `Router` through tower's `oneshot`, so an order service
/// running in the same process (or a stub router in tests) is reached
/// without a socket.
///
/// # Example
///
/// ```ignore
/// use axum::Router;
/// use ticket_client::{OneshotHttpClient, RemoteOrderApi};
///
/// let router: Router = build_order_routes();
/// let api = RemoteOrderApi::new(OneshotHttpClient::new(router));
/// let page = api.list(PageRequest::default()).await?;
/// ```
#[derive(Debug, Clone)]
pub struct OneshotHttpClient {
    router: Router,
}

impl OneshotHttpClient {
    /// Create a new oneshot client
    ///
    /// # Arguments
    /// * `router` - fully built router (state already applied); paths are
    ///   matched without the service base URL prefix
    pub fn new(router: Router) -> Self {
        Self { router }
    }

    fn uri(path: &str, query: &QueryPairs) -> ClientResult<String> {
        if query.is_empty() {
            return Ok(path.to_string());
        }
        // Borrow Url's form encoder; the host is never used
        let mut url = Url::parse("http://in-process")
            .and_then(|base| base.join(path))
            .map_err(|e| ClientError::Config(format!("Invalid path {}: {}", path, e)))?;
        url.query_pairs_mut()
            .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        Ok(format!("{}?{}", url.path(), url.query().unwrap_or_default()))
    }

    fn build_request(method: Method, uri: &str, body: Option<Vec<u8>>) -> ClientResult<Request<Body>> {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(bytes) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(bytes)),
            None => builder.body(Body::empty()),
        };
        request.map_err(|e| ClientError::Config(format!("Failed to build request: {}", e)))
    }

    async fn execute(&self, request: Request<Body>) -> ClientResult<Response<Body>> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .map_err(|e| ClientError::InvalidResponse(format!("Oneshot call failed: {}", e)))
    }

    async fn read_body(response: Response<Body>) -> ClientResult<(u16, http::HeaderMap, Vec<u8>)> {
        let status = response.status().as_u16();
        let (parts, body) = response.into_parts();
        let bytes = axum::body::to_bytes(body, usize::MAX)
            .await
            .map_err(|e| ClientError::InvalidResponse(format!("Failed to read body: {}", e)))?;
        Ok((status, parts.headers, bytes.to_vec()))
    }

    async fn send_json<T: DeserializeOwned>(&self, request: Request<Body>) -> ClientResult<T> {
        let response = self.execute(request).await?;
        let (status, _, bytes) = Self::read_body(response).await?;
        decode_json(status, &bytes)
    }
}

#[async_trait]
impl HttpClient for OneshotHttpClient {
    async fn get<T: DeserializeOwned>(&self, path: &str, query: &QueryPairs) -> ClientResult<T> {
        let request = Self::build_request(Method::GET, &Self::uri(path, query)?, None)?;
        self.send_json(request).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let request = Self::build_request(Method::POST, path, Some(serde_json::to_vec(body)?))?;
        self.send_json(request).await
    }

    async fn put<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let request = Self::build_request(Method::PUT, path, Some(serde_json::to_vec(body)?))?;
        self.send_json(request).await
    }

    async fn delete(&self, path: &str) -> ClientResult<()> {
        let request = Self::build_request(Method::DELETE, path, None)?;
        let response = self.execute(request).await?;
        let (status, _, bytes) = Self::read_body(response).await?;
        if !(200..300).contains(&status) {
            return Err(ClientError::from_status(status, &bytes));
        }
        Ok(())
    }

    async fn get_bytes(&self, path: &str, query: &QueryPairs) -> ClientResult<BinaryResponse> {
        let request = Self::build_request(Method::GET, &Self::uri(path, query)?, None)?;
        let response = self.execute(request).await?;
        let (status, headers, bytes) = Self::read_body(response).await?;
        if !(200..300).contains(&status) {
            return Err(ClientError::from_status(status, &bytes));
        }
        Ok(BinaryResponse {
            status,
            bytes,
            content_type: header_string(&headers, CONTENT_TYPE),
            content_disposition: header_string(&headers, CONTENT_DISPOSITION),
        })
    }
}
