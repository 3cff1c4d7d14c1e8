//! Async video job polling.

use std::{sync::Arc, time::Duration};

use crate::{
    error::{Error, Result},
    http::HttpClient,
    types::{JobInfo, JobStatus},
};

/// A video generation job that can be polled for completion.
pub struct Job {
    id: String,
    http: Arc<HttpClient>,
    poll_interval: Duration,
}

impl Job {
    /// Creates a new job handle.
    pub(crate) fn new(id: String, http: Arc<HttpClient>, poll_interval: Duration) -> Self {
        Self {
            id,
            http,
            poll_interval,
        }
    }

    /// Returns the job ID.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Fetches the job record.
    pub async fn get(&self) -> Result<JobInfo> {
        let path = format!("/generations/{}", self.id);
        self.http.request::<(), _>("GET", &path, None).await
    }

    /// Queries the current status of the job.
    pub async fn status(&self) -> Result<JobStatus> {
        Ok(JobStatus::from_wire(&self.get().await?.status))
    }

    /// Waits for the job to complete and returns the record.
    ///
    /// Polls on the client's poll interval with no backoff and no attempt
    /// cap; the loop runs until a terminal status or a transport error.
    /// Callers that need a bound wrap this future in `tokio::time::timeout`.
    pub async fn wait(&self) -> Result<JobInfo> {
        self.wait_with_progress(self.poll_interval, |_| {}).await
    }

    /// Waits for the job to complete with a custom polling interval.
    pub async fn wait_with_interval(&self, interval: Duration) -> Result<JobInfo> {
        self.wait_with_progress(interval, |_| {}).await
    }

    /// Waits for the job to complete, reporting status transitions.
    ///
    /// `on_status` is invoked only when the observed status differs from
    /// the previous observation, never once per poll tick.
    pub async fn wait_with_progress<F>(&self, interval: Duration, mut on_status: F) -> Result<JobInfo>
    where
        F: FnMut(JobStatus),
    {
        let mut prev: Option<JobStatus> = None;

        loop {
            let info = self.get().await?;
            let status = JobStatus::from_wire(&info.status);

            if prev != Some(status) {
                tracing::debug!(job_id = %self.id, %status, "job status changed");
                on_status(status);
                prev = Some(status);
            }

            match status {
                JobStatus::Completed => {
                    if info.video_url.is_none() {
                        return Err(Error::JobFailed("no video_url returned".to_string()));
                    }
                    return Ok(info);
                }
                JobStatus::Failed => {
                    let detail = info.error_message.unwrap_or_else(|| {
                        format!("job ended with status \"{}\"", info.status)
                    });
                    return Err(Error::JobFailed(detail));
                }
                JobStatus::Pending => {
                    tokio::time::sleep(interval).await;
                }
            }
        }
    }
}
