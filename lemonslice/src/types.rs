//! Common types for the Lemon Slice API.

use serde::{Deserialize, Serialize};

// ==================== Job Status ====================

/// Status of a video generation job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    Pending,
    Completed,
    Failed,
}

impl JobStatus {
    /// Converts the wire status string into a status.
    ///
    /// `"completed"` is the only success. In-progress markers keep the job
    /// pending; any other value is a terminal failure.
    pub fn from_wire(s: &str) -> Self {
        match s {
            "completed" => JobStatus::Completed,
            "pending" | "queued" | "processing" => JobStatus::Pending,
            _ => JobStatus::Failed,
        }
    }

    /// Returns true if the job is still in progress.
    pub fn is_pending(&self) -> bool {
        matches!(self, JobStatus::Pending)
    }

    /// Returns true if the job reached a terminal status.
    pub fn is_terminal(&self) -> bool {
        !self.is_pending()
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            JobStatus::Pending => "pending",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
        };
        f.write_str(s)
    }
}

// ==================== Request/Response Types ====================

/// Request for talking-head video generation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateVideoRequest {
    /// Source character image URL.
    pub img_url: String,

    /// Source audio URL. Must be publicly fetchable by the service.
    pub audio_url: String,

    /// Output resolution, e.g. "320" or "512".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,

    /// Crops the output to the head region.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crop_head: Option<bool>,

    /// Animation expressiveness, 0.0 to 1.0.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expressiveness: Option<f64>,

    /// Animates the whole body rather than the face alone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whole_body_mode: Option<bool>,
}

/// A video generation job record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobInfo {
    /// Raw job status string from the service.
    #[serde(default)]
    pub status: String,

    /// Artifact URL, present once the job completes.
    #[serde(default)]
    pub video_url: Option<String>,

    /// Failure detail, when the service reports one.
    #[serde(default)]
    pub error_message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_status_mapping() {
        assert_eq!(JobStatus::from_wire("completed"), JobStatus::Completed);
        assert_eq!(JobStatus::from_wire("pending"), JobStatus::Pending);
        assert_eq!(JobStatus::from_wire("queued"), JobStatus::Pending);
        assert_eq!(JobStatus::from_wire("processing"), JobStatus::Pending);
        assert_eq!(JobStatus::from_wire("errored"), JobStatus::Failed);
        assert_eq!(JobStatus::from_wire(""), JobStatus::Failed);
    }

    #[test]
    fn optional_request_fields_are_omitted() {
        let request = GenerateVideoRequest {
            img_url: "https://example.com/a.png".to_string(),
            audio_url: "https://example.com/a.ogg".to_string(),
            ..Default::default()
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "img_url": "https://example.com/a.png",
                "audio_url": "https://example.com/a.ogg",
            })
        );
    }
}
