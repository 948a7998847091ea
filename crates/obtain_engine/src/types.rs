use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// One entry of `GET /api/conversions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub format: String,
    pub status: String,
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub filename: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub error: Option<String>,
    /// Fraction in `[0, 1]`.
    #[serde(default)]
    pub progress: f64,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub size: Option<String>,
    #[serde(default)]
    pub can_retry: bool,
}

/// Body of `POST /api/download`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadRequest {
    pub url: String,
    pub convert: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

/// Answer to `POST /api/download`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadResponse {
    pub status: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub download_url: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub job_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    JobsListed(Result<Vec<Job>, ApiError>),
    Submitted(Result<DownloadResponse, ApiError>),
    Deleted {
        filename: String,
        result: Result<(), ApiError>,
    },
    Retried {
        job_id: String,
        result: Result<(), ApiError>,
    },
    PollTick,
}

/// Bytes written so far while saving a remote file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveProgress {
    pub written: u64,
    pub total: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct ApiError {
    pub kind: FailureKind,
    pub message: String,
}

impl ApiError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    InvalidFilename,
    HttpStatus(u16),
    Timeout,
    Network,
    Decode,
    Io,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::InvalidFilename => write!(f, "invalid file name"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Decode => write!(f, "undecodable response"),
            FailureKind::Io => write!(f, "io error"),
        }
    }
}

/// The server encodes "no value" as `""` as often as `null`.
fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|value| !value.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_decodes_server_shape() {
        let raw = r#"{
            "id": "abc_1700000000",
            "url": "https://youtu.be/abc",
            "format": "mpg",
            "status": "completed",
            "startTime": "2024-03-01T10:00:00.123456+01:00",
            "endTime": null,
            "filename": "abc_1700000000.mpg",
            "error": "",
            "progress": 1.0,
            "size": "1.2 MB",
            "canRetry": false
        }"#;
        let job: Job = serde_json::from_str(raw).unwrap();
        assert_eq!(job.filename.as_deref(), Some("abc_1700000000.mpg"));
        assert_eq!(job.error, None);
        assert_eq!(job.end_time, None);
        assert_eq!(
            job.start_time.unwrap().to_rfc3339(),
            "2024-03-01T09:00:00.123456+00:00"
        );
    }

    #[test]
    fn job_tolerates_missing_optional_fields() {
        let job: Job = serde_json::from_str(r#"{"id":"x","status":"failed"}"#).unwrap();
        assert!(!job.can_retry);
        assert_eq!(job.progress, 0.0);
        assert_eq!(job.filename, None);
        assert_eq!(job.start_time, None);
    }

    #[test]
    fn direct_request_omits_format() {
        let request = DownloadRequest {
            url: "https://youtu.be/abc".into(),
            convert: false,
            format: None,
        };
        assert_eq!(
            serde_json::to_string(&request).unwrap(),
            r#"{"url":"https://youtu.be/abc","convert":false}"#
        );
    }
}
