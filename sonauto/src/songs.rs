//! Song generation service.

use std::{sync::Arc, time::Duration};

use bytes::Bytes;
use serde::Deserialize;

use crate::{
    error::Result,
    http::HttpClient,
    task::Task,
    types::{Generation, GenerationRequest, InpaintRequest},
};

/// Song generation service.
pub struct SongService {
    http: Arc<HttpClient>,
    poll_interval: Duration,
}

impl SongService {
    pub(crate) fn new(http: Arc<HttpClient>, poll_interval: Duration) -> Self {
        Self {
            http,
            poll_interval,
        }
    }

    /// Starts a song generation task.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # async fn run(client: encore_sonauto::Client) -> encore_sonauto::Result<()> {
    /// use encore_sonauto::GenerationRequest;
    ///
    /// let request = GenerationRequest {
    ///     prompt: Some("An upbeat rock song".to_string()),
    ///     num_songs: Some(1),
    ///     ..Default::default()
    /// };
    ///
    /// let task = client.songs().generate(&request).await?;
    /// let generation = task.wait().await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn generate(&self, request: &GenerationRequest) -> Result<Task> {
        #[derive(Deserialize)]
        struct Response {
            task_id: String,
        }

        let resp: Response = self
            .http
            .request("POST", "/generations", Some(request))
            .await?;

        Ok(Task::new(resp.task_id, self.http.clone(), self.poll_interval))
    }

    /// Starts an inpainting task over existing audio.
    pub async fn inpaint(&self, request: &InpaintRequest) -> Result<Task> {
        #[derive(Deserialize)]
        struct Response {
            task_id: String,
        }

        let resp: Response = self
            .http
            .request("POST", "/generations/inpaint", Some(request))
            .await?;

        Ok(Task::new(resp.task_id, self.http.clone(), self.poll_interval))
    }

    /// Fetches the generation record for a task.
    pub async fn get(&self, task_id: &str) -> Result<Generation> {
        let path = format!("/generations/{}", task_id);
        self.http.request::<(), _>("GET", &path, None).await
    }

    /// Downloads a song artifact from its transient URL.
    pub async fn download(&self, url: &str) -> Result<Bytes> {
        self.http.download(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::Client;
    use crate::error::Error;
    use crate::types::TaskStatus;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> Client {
        Client::builder("test-key")
            .base_url(server.uri())
            .poll_interval(Duration::from_millis(10))
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn generate_poll_and_download_flow() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/generations"))
            .and(body_partial_json(serde_json::json!({
                "prompt": "test",
                "num_songs": 1,
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"task_id": "task_1"})),
            )
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/generations/status/task_1"))
            .respond_with(ResponseTemplate::new(200).set_body_string("\"GENERATING\""))
            .up_to_n_times(2)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/generations/status/task_1"))
            .respond_with(ResponseTemplate::new(200).set_body_string("\"SUCCESS\""))
            .mount(&server)
            .await;

        let song_url = format!("{}/songs/a.ogg", server.uri());
        Mock::given(method("GET"))
            .and(path("/generations/task_1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "song_paths": [song_url],
                "lyrics": "la la",
                "seed": 42,
                "tags": ["rock"],
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/songs/a.ogg"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"OggS fake audio".to_vec()))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let request = GenerationRequest {
            prompt: Some("test".to_string()),
            num_songs: Some(1),
            ..Default::default()
        };

        let task = client.songs().generate(&request).await.unwrap();
        assert_eq!(task.id(), "task_1");

        let mut seen = Vec::new();
        let generation = task
            .wait_with_progress(Duration::from_millis(10), |status| seen.push(status))
            .await
            .unwrap();

        assert_eq!(seen, vec![TaskStatus::Pending, TaskStatus::Success]);
        assert_eq!(generation.seed, Some(42));
        assert_eq!(generation.tags, vec!["rock".to_string()]);
        assert_eq!(generation.lyrics, "la la");

        let data = client
            .songs()
            .download(&generation.song_paths[0])
            .await
            .unwrap();
        assert_eq!(&data[..], b"OggS fake audio");
    }

    #[tokio::test]
    async fn failed_generation_reports_error_detail() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/generations"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"task_id": "task_2"})),
            )
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/generations/status/task_2"))
            .respond_with(ResponseTemplate::new(200).set_body_string("\"PENDING\""))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/generations/status/task_2"))
            .respond_with(ResponseTemplate::new(200).set_body_string("\"FAILURE\""))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/generations/task_2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "error_message": "bad prompt",
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let task = client
            .songs()
            .generate(&GenerationRequest::default())
            .await
            .unwrap();

        let err = task
            .wait_with_interval(Duration::from_millis(10))
            .await
            .unwrap_err();

        match err {
            Error::TaskFailed(detail) => assert!(detail.contains("bad prompt")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn submit_rejection_is_an_api_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/generations"))
            .respond_with(
                ResponseTemplate::new(422)
                    .set_body_json(serde_json::json!({"detail": "prompt too long"})),
            )
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client
            .songs()
            .generate(&GenerationRequest::default())
            .await
            .unwrap_err();

        match err {
            Error::Api {
                message,
                http_status,
            } => {
                assert_eq!(http_status, 422);
                assert!(message.contains("prompt too long"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn inpaint_submits_sections_and_audio() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/generations/inpaint"))
            .and(body_partial_json(serde_json::json!({
                "sections": [[44.9, 50.1]],
                "lyrics": "",
                "tags": [],
                "selection_crop": false,
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"task_id": "task_3"})),
            )
            .mount(&server)
            .await;

        let client = client_for(&server);
        let request = InpaintRequest {
            audio_base64: "c29uZw==".to_string(),
            sections: vec![[44.9, 50.1]],
            lyrics: String::new(),
            tags: Vec::new(),
            selection_crop: false,
            seed: None,
        };

        let task = client.songs().inpaint(&request).await.unwrap();
        assert_eq!(task.id(), "task_3");
    }
}
