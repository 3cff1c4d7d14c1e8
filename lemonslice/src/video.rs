//! Video generation service.

use std::{sync::Arc, time::Duration};

use bytes::Bytes;
use serde::Deserialize;

use crate::{
    error::Result,
    http::HttpClient,
    job::Job,
    types::{GenerateVideoRequest, JobInfo},
};

/// Video generation service.
pub struct VideoService {
    http: Arc<HttpClient>,
    poll_interval: Duration,
}

impl VideoService {
    pub(crate) fn new(http: Arc<HttpClient>, poll_interval: Duration) -> Self {
        Self {
            http,
            poll_interval,
        }
    }

    /// Starts a video generation job.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # async fn run(client: encore_lemonslice::Client) -> encore_lemonslice::Result<()> {
    /// use encore_lemonslice::GenerateVideoRequest;
    ///
    /// let request = GenerateVideoRequest {
    ///     img_url: "https://example.com/character.png".to_string(),
    ///     audio_url: "https://example.com/song.ogg".to_string(),
    ///     resolution: Some("320".to_string()),
    ///     ..Default::default()
    /// };
    ///
    /// let job = client.video().generate(&request).await?;
    /// let info = job.wait().await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn generate(&self, request: &GenerateVideoRequest) -> Result<Job> {
        #[derive(Deserialize)]
        struct Response {
            job_id: String,
        }

        let resp: Response = self.http.request("POST", "/generate", Some(request)).await?;

        Ok(Job::new(resp.job_id, self.http.clone(), self.poll_interval))
    }

    /// Fetches the record of an existing job.
    pub async fn get(&self, job_id: &str) -> Result<JobInfo> {
        let path = format!("/generations/{}", job_id);
        self.http.request::<(), _>("GET", &path, None).await
    }

    /// Downloads a video artifact from its transient URL.
    pub async fn download(&self, url: &str) -> Result<Bytes> {
        self.http.download(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::Client;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn generate_poll_and_download_flow() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/generate"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_partial_json(serde_json::json!({
                "img_url": "http://example.com/a.png",
                "audio_url": "http://example.com/a.ogg",
                "resolution": "320",
                "whole_body_mode": true,
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"job_id": "job_9"})),
            )
            .mount(&server)
            .await;

        let video_url = format!("{}/videos/v.mp4", server.uri());
        Mock::given(method("GET"))
            .and(path("/generations/job_9"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "completed",
                "video_url": video_url,
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/videos/v.mp4"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"fake mp4".to_vec()))
            .mount(&server)
            .await;

        let client = Client::builder("test-key")
            .base_url(server.uri())
            .poll_interval(std::time::Duration::from_millis(10))
            .build()
            .unwrap();

        let request = GenerateVideoRequest {
            img_url: "http://example.com/a.png".to_string(),
            audio_url: "http://example.com/a.ogg".to_string(),
            resolution: Some("320".to_string()),
            crop_head: Some(false),
            expressiveness: Some(1.0),
            whole_body_mode: Some(true),
        };

        let job = client.video().generate(&request).await.unwrap();
        assert_eq!(job.id(), "job_9");

        let info = job.wait().await.unwrap();
        let data = client
            .video()
            .download(info.video_url.as_deref().unwrap())
            .await
            .unwrap();
        assert_eq!(&data[..], b"fake mp4");
    }
}
