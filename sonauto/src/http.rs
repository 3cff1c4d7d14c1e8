//! HTTP transport for the Sonauto API.

use std::time::Duration;

use bytes::Bytes;
use reqwest::{
    Client as ReqwestClient, Response,
    header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT},
};
use serde::{Serialize, de::DeserializeOwned};

use crate::error::{Error, Result};

/// HTTP client for the Sonauto API.
///
/// Transport failures are not retried: the first error aborts the call and
/// is surfaced to the caller.
#[derive(Debug)]
pub struct HttpClient {
    client: ReqwestClient,
    base_url: String,
    api_key: String,
}

impl HttpClient {
    /// Creates a new HTTP client.
    pub fn new(base_url: String, api_key: String) -> Result<Self> {
        let client = ReqwestClient::builder()
            .timeout(Duration::from_secs(300))
            .build()?;

        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    /// Returns the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Makes a JSON HTTP request to the API.
    pub async fn request<T, R>(&self, method: &str, path: &str, body: Option<&T>) -> Result<R>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self.send(method, path, body).await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(parse_error(&body, status.as_u16()));
        }

        serde_json::from_slice(&body).map_err(Error::from)
    }

    /// Makes an HTTP request and returns the raw response body as text.
    ///
    /// The status endpoint responds with a bare JSON string rather than an
    /// object, so it cannot go through [`HttpClient::request`].
    pub async fn request_text(&self, method: &str, path: &str) -> Result<String> {
        let response = self.send::<()>(method, path, None).await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(parse_error(&body, status.as_u16()));
        }

        Ok(String::from_utf8_lossy(&body).to_string())
    }

    /// Fetches a transient artifact URL.
    ///
    /// Artifact URLs are served from a CDN and take no authentication; the
    /// API key is never sent here.
    pub async fn download(&self, url: &str) -> Result<Bytes> {
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            return Err(parse_error(&body, status.as_u16()));
        }

        Ok(response.bytes().await?)
    }

    /// Performs a single HTTP request.
    async fn send<T>(&self, method: &str, path: &str, body: Option<&T>) -> Result<Response>
    where
        T: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);

        let mut request = match method {
            "GET" => self.client.get(&url),
            "POST" => self.client.post(&url),
            "PUT" => self.client.put(&url),
            "DELETE" => self.client.delete(&url),
            _ => return Err(Error::Other(format!("unsupported method: {}", method))),
        };

        request = request.headers(self.default_headers());

        if let Some(body) = body {
            request = request.json(body);
        }

        Ok(request.send().await?)
    }

    /// Returns default headers for API requests.
    fn default_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.api_key)).unwrap(),
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static("encore-sonauto-rust/1.0"),
        );
        headers
    }
}

/// Parses an error response body.
fn parse_error(body: &[u8], http_status: u16) -> Error {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        detail: Option<serde_json::Value>,
        error: Option<String>,
    }

    if let Ok(parsed) = serde_json::from_slice::<ErrorBody>(body) {
        if let Some(detail) = parsed.detail {
            let message = match detail {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            };
            return Error::api(message, http_status);
        }
        if let Some(error) = parsed.error {
            return Error::api(error, http_status);
        }
    }

    Error::api(String::from_utf8_lossy(body).to_string(), http_status)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_extracts_detail_string() {
        let err = parse_error(br#"{"detail": "prompt too long"}"#, 422);
        match err {
            Error::Api {
                message,
                http_status,
            } => {
                assert_eq!(message, "prompt too long");
                assert_eq!(http_status, 422);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn parse_error_falls_back_to_raw_body() {
        let err = parse_error(b"service unavailable", 503);
        match err {
            Error::Api { message, .. } => assert_eq!(message, "service unavailable"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(parse_error(b"", 503).is_server_error());
    }
}
