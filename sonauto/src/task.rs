//! Async generation task polling.

use std::{sync::Arc, time::Duration};

use crate::{
    error::{Error, Result},
    http::HttpClient,
    types::{Generation, TaskStatus},
};

/// Placeholder detail used when a failed task carries no error message.
pub const DEFAULT_ERROR_DETAIL: &str = "no detailed error message available";

/// A generation task that can be polled for completion.
#[derive(Debug)]
pub struct Task {
    id: String,
    http: Arc<HttpClient>,
    poll_interval: Duration,
}

impl Task {
    /// Creates a new task handle.
    pub(crate) fn new(id: String, http: Arc<HttpClient>, poll_interval: Duration) -> Self {
        Self {
            id,
            http,
            poll_interval,
        }
    }

    /// Returns the task ID.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Queries the current status of the task.
    pub async fn status(&self) -> Result<TaskStatus> {
        let path = format!("/generations/status/{}", self.id);
        let body = self.http.request_text("GET", &path).await?;
        Ok(parse_status_body(&body))
    }

    /// Fetches the generation record for the task.
    ///
    /// On a failed task the record carries the error detail instead of
    /// artifact URLs.
    pub async fn fetch(&self) -> Result<Generation> {
        let path = format!("/generations/{}", self.id);
        self.http.request::<(), _>("GET", &path, None).await
    }

    /// Waits for the task to complete and returns the generation.
    ///
    /// Polls on the client's poll interval with no backoff and no attempt
    /// cap; the loop runs until a terminal status or a transport error.
    /// Callers that need a bound wrap this future in `tokio::time::timeout`.
    pub async fn wait(&self) -> Result<Generation> {
        self.wait_with_progress(self.poll_interval, |_| {}).await
    }

    /// Waits for the task to complete with a custom polling interval.
    pub async fn wait_with_interval(&self, interval: Duration) -> Result<Generation> {
        self.wait_with_progress(interval, |_| {}).await
    }

    /// Waits for the task to complete, reporting status transitions.
    ///
    /// `on_status` is invoked only when the observed status differs from
    /// the previous observation, never once per poll tick.
    pub async fn wait_with_progress<F>(&self, interval: Duration, mut on_status: F) -> Result<Generation>
    where
        F: FnMut(TaskStatus),
    {
        let mut prev: Option<TaskStatus> = None;

        loop {
            let status = self.status().await?;

            if prev != Some(status) {
                tracing::debug!(task_id = %self.id, %status, "task status changed");
                on_status(status);
                prev = Some(status);
            }

            match status {
                TaskStatus::Success => {
                    let generation = self.fetch().await?;
                    if generation.song_paths.is_empty() {
                        return Err(Error::TaskFailed("no song paths returned".to_string()));
                    }
                    return Ok(generation);
                }
                TaskStatus::Failure => {
                    let detail = match self.fetch().await {
                        Ok(generation) => generation
                            .error_message
                            .unwrap_or_else(|| DEFAULT_ERROR_DETAIL.to_string()),
                        Err(_) => DEFAULT_ERROR_DETAIL.to_string(),
                    };
                    return Err(Error::TaskFailed(detail));
                }
                TaskStatus::Pending => {
                    tokio::time::sleep(interval).await;
                }
            }
        }
    }
}

/// Parses the status endpoint body.
///
/// The endpoint returns a bare JSON string; fall back to trimming quote
/// characters when the body is not valid JSON.
fn parse_status_body(body: &str) -> TaskStatus {
    let raw = serde_json::from_str::<String>(body.trim())
        .unwrap_or_else(|_| body.trim().trim_matches('"').to_string());
    TaskStatus::from_wire(&raw)
}
