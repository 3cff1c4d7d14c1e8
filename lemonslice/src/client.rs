//! Lemon Slice API client.

use std::{sync::Arc, time::Duration};

use crate::{
    error::{Error, Result},
    http::HttpClient,
    video::VideoService,
};

/// Default Lemon Slice API base URL.
pub const DEFAULT_BASE_URL: &str = "https://lemonslice.com/api/v2";

/// Default interval between status polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Lemon Slice API client.
///
/// # Example
///
/// ```rust,no_run
/// use encore_lemonslice::{Client, GenerateVideoRequest};
///
/// # async fn run() -> encore_lemonslice::Result<()> {
/// let client = Client::new("your-api-key")?;
///
/// let request = GenerateVideoRequest {
///     img_url: "https://example.com/character.png".to_string(),
///     audio_url: "https://example.com/song.ogg".to_string(),
///     ..Default::default()
/// };
///
/// let job = client.video().generate(&request).await?;
/// let info = job.wait().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Client {
    http: Arc<HttpClient>,
    config: ClientConfig,
}

/// Client configuration.
#[derive(Debug, Clone)]
struct ClientConfig {
    api_key: String,
    base_url: String,
    poll_interval: Duration,
}

impl Client {
    /// Creates a new Lemon Slice API client with default settings.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        ClientBuilder::new(api_key).build()
    }

    /// Creates a new client builder for more configuration options.
    pub fn builder(api_key: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(api_key)
    }

    /// Returns the configured API key.
    pub fn api_key(&self) -> &str {
        &self.config.api_key
    }

    /// Returns the configured base URL.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Returns the configured poll interval.
    pub fn poll_interval(&self) -> Duration {
        self.config.poll_interval
    }

    /// Returns the video generation service.
    pub fn video(&self) -> VideoService {
        VideoService::new(self.http.clone(), self.config.poll_interval)
    }

    /// Returns a reference to the internal HTTP client.
    pub fn http(&self) -> &Arc<HttpClient> {
        &self.http
    }
}

/// Builder for creating a Lemon Slice API client.
pub struct ClientBuilder {
    api_key: String,
    base_url: String,
    poll_interval: Duration,
}

impl ClientBuilder {
    /// Creates a new client builder.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Sets a custom base URL for the API.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the interval between status polls.
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Builds the client.
    pub fn build(self) -> Result<Client> {
        if self.api_key.is_empty() {
            return Err(Error::Config("api_key must be non-empty".to_string()));
        }

        let http = HttpClient::new(self.base_url.clone(), self.api_key.clone())?;

        Ok(Client {
            http: Arc::new(http),
            config: ClientConfig {
                api_key: self.api_key,
                base_url: self.base_url,
                poll_interval: self.poll_interval,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_rejects_empty_api_key() {
        let err = Client::new("").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
