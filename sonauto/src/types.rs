//! Common types for the Sonauto API.

use serde::{Deserialize, Serialize};

// ==================== Task Status ====================

/// Status of an asynchronous generation task.
///
/// The wire protocol reports several in-progress markers; they are all
/// collapsed into [`TaskStatus::Pending`] at the client boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Pending,
    Success,
    Failure,
}

impl TaskStatus {
    /// Converts the wire status string into a status.
    ///
    /// `"SUCCESS"` and `"FAILURE"` are the only terminal values; any other
    /// string keeps the task pending.
    pub fn from_wire(s: &str) -> Self {
        match s {
            "SUCCESS" => TaskStatus::Success,
            "FAILURE" => TaskStatus::Failure,
            _ => TaskStatus::Pending,
        }
    }

    /// Returns true if the task is still in progress.
    pub fn is_pending(&self) -> bool {
        matches!(self, TaskStatus::Pending)
    }

    /// Returns true if the task reached a terminal status.
    pub fn is_terminal(&self) -> bool {
        !self.is_pending()
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TaskStatus::Pending => "PENDING",
            TaskStatus::Success => "SUCCESS",
            TaskStatus::Failure => "FAILURE",
        };
        f.write_str(s)
    }
}

// ==================== Request/Response Types ====================

/// Request for song generation.
///
/// Either `prompt` or `lyrics` + `tags` drives the generation; unset fields
/// are omitted from the request body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Text description of the song to generate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,

    /// Full lyrics, when not letting the model write them.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lyrics: Option<String>,

    /// Style tags, e.g. "rock", "synth pop".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    /// Generation seed for reproducible output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<i64>,

    /// Number of songs to generate in one task.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_songs: Option<u32>,

    /// Output audio format: ogg, mp3, flac, wav.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_format: Option<String>,
}

/// Request for inpainting a time range of existing audio.
///
/// The service regenerates only the given sections and preserves the rest
/// of the audio.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InpaintRequest {
    /// Base64-encoded source audio.
    pub audio_base64: String,

    /// Time ranges to regenerate, as `[start, end]` second pairs.
    pub sections: Vec<[f64; 2]>,

    /// Lyrics for the regenerated sections. Empty for an instrumental fill.
    pub lyrics: String,

    /// Style tags. Empty lets the model infer the style from the audio.
    pub tags: Vec<String>,

    /// When true, the result is cropped to the regenerated selection
    /// instead of returning the full track.
    pub selection_crop: bool,

    /// Generation seed for reproducible output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<i64>,
}

/// A completed (or failed) generation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Generation {
    /// Artifact URLs. The first entry is the usable song.
    #[serde(default)]
    pub song_paths: Vec<String>,

    /// Lyrics of the generated song.
    #[serde(default)]
    pub lyrics: String,

    /// Seed used for the generation.
    #[serde(default)]
    pub seed: Option<i64>,

    /// Style tags applied.
    #[serde(default)]
    pub tags: Vec<String>,

    /// Human-readable failure detail, present on failed tasks.
    #[serde(default)]
    pub error_message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_wire_statuses() {
        assert_eq!(TaskStatus::from_wire("SUCCESS"), TaskStatus::Success);
        assert_eq!(TaskStatus::from_wire("FAILURE"), TaskStatus::Failure);
        assert!(TaskStatus::from_wire("SUCCESS").is_terminal());
        assert!(TaskStatus::from_wire("FAILURE").is_terminal());
    }

    #[test]
    fn unknown_wire_statuses_stay_pending() {
        for raw in ["RECEIVED", "GENERATING", "success", "", "DONE"] {
            assert!(TaskStatus::from_wire(raw).is_pending(), "{raw:?}");
        }
    }

    #[test]
    fn optional_request_fields_are_omitted() {
        let request = GenerationRequest {
            prompt: Some("test".to_string()),
            num_songs: Some(1),
            ..Default::default()
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"prompt": "test", "num_songs": 1})
        );
    }

    #[test]
    fn generation_tolerates_missing_fields() {
        let generation: Generation = serde_json::from_str("{}").unwrap();
        assert!(generation.song_paths.is_empty());
        assert!(generation.error_message.is_none());
        assert_eq!(generation.seed, None);
    }
}
