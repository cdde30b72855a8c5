// ticket-client/src/client/http.rs
// HTTP transport - network communication

use crate::{ClientConfig, ClientError, ClientResult};
use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE, HeaderMap, HeaderName};
use serde::de::DeserializeOwned;

/// Query parameters, in send order
pub type QueryPairs = [(&'static str, String)];

/// Raw binary response body plus the headers that describe it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BinaryResponse {
    pub status: u16,
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
    pub content_disposition: Option<String>,
}

/// HTTP transport trait
///
/// One call is one round trip. Paths are relative to the transport's base
/// (e.g. `/orders/search`).
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get<T: DeserializeOwned>(&self, path: &str, query: &QueryPairs) -> ClientResult<T>;
    async fn post<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    async fn put<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    /// DELETE; any response body is ignored
    async fn delete(&self, path: &str) -> ClientResult<()>;
    /// GET an opaque binary body
    async fn get_bytes(&self, path: &str, query: &QueryPairs) -> ClientResult<BinaryResponse>;
}

/// Decode a JSON body, or map a failure status
pub(crate) fn decode_json<T: DeserializeOwned>(status: u16, body: &[u8]) -> ClientResult<T> {
    if !(200..300).contains(&status) {
        return Err(ClientError::from_status(status, body));
    }
    serde_json::from_slice(body)
        .map_err(|e| ClientError::InvalidResponse(format!("JSON parse error: {}", e)))
}

pub(crate) fn header_string(headers: &HeaderMap, name: HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// Network HTTP client (reqwest)
#[derive(Debug, Clone)]
pub struct NetworkHttpClient {
    client: Client,
    base_url: String,
}

impl NetworkHttpClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;
        Ok(Self {
            client,
            base_url: config.normalized_base_url().to_string(),
        })
    }

    /// Base URL without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn execute<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> ClientResult<T> {
        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;
        decode_json(status, &body)
    }
}

#[async_trait]
impl HttpClient for NetworkHttpClient {
    async fn get<T: DeserializeOwned>(&self, path: &str, query: &QueryPairs) -> ClientResult<T> {
        tracing::debug!(path, "GET");
        let request = self.client.get(self.url(path)).query(query);
        self.execute(request).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        tracing::debug!(path, "POST");
        let request = self.client.post(self.url(path)).json(body);
        self.execute(request).await
    }

    async fn put<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        tracing::debug!(path, "PUT");
        let request = self.client.put(self.url(path)).json(body);
        self.execute(request).await
    }

    async fn delete(&self, path: &str) -> ClientResult<()> {
        tracing::debug!(path, "DELETE");
        let response = self.client.delete(self.url(path)).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await?;
            return Err(ClientError::from_status(status.as_u16(), &body));
        }
        Ok(())
    }

    async fn get_bytes(&self, path: &str, query: &QueryPairs) -> ClientResult<BinaryResponse> {
        tracing::debug!(path, "GET (binary)");
        let response = self.client.get(self.url(path)).query(query).send().await?;
        let status = response.status();
        let content_type = header_string(response.headers(), CONTENT_TYPE);
        let content_disposition = header_string(response.headers(), CONTENT_DISPOSITION);
        let bytes = response.bytes().await?;

        if !status.is_success() {
            return Err(ClientError::from_status(status.as_u16(), &bytes));
        }
        Ok(BinaryResponse {
            status: status.as_u16(),
            bytes: bytes.to_vec(),
            content_type,
            content_disposition,
        })
    }
}
