use chrono::{DateTime, Utc};

pub type JobId = String;

/// Server-reported job status. Unknown strings are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    Queued,
    Downloading,
    Converting,
    Completed,
    Failed,
    Other(String),
}

impl JobStatus {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "queued" => JobStatus::Queued,
            "downloading" => JobStatus::Downloading,
            "converting" => JobStatus::Converting,
            "completed" => JobStatus::Completed,
            "failed" => JobStatus::Failed,
            other => JobStatus::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            JobStatus::Queued => "queued",
            JobStatus::Downloading => "downloading",
            JobStatus::Converting => "converting",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
            JobStatus::Other(raw) => raw,
        }
    }

    pub fn is_in_progress(&self) -> bool {
        matches!(
            self,
            JobStatus::Queued | JobStatus::Downloading | JobStatus::Converting
        )
    }
}

/// One job as last reported by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSnapshot {
    pub id: JobId,
    pub url: String,
    pub format: String,
    pub status: JobStatus,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
    pub filename: Option<String>,
    pub error: Option<String>,
    /// 0..=100
    pub progress_percent: u8,
    pub size: Option<String>,
    pub can_retry: bool,
}

impl JobSnapshot {
    /// Minimal snapshot; the remaining fields are filled in by struct update syntax.
    pub fn new(id: impl Into<JobId>, url: impl Into<String>, format: impl Into<String>, status: JobStatus) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            format: format.into(),
            status,
            started_at: None,
            finished_at: None,
            filename: None,
            error: None,
            progress_percent: 0,
            size: None,
            can_retry: false,
        }
    }
}

/// Home view radio: fetch the file as-is or queue a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DownloadAction {
    #[default]
    Download,
    Convert,
}

impl DownloadAction {
    pub fn label(self) -> &'static str {
        match self {
            DownloadAction::Download => "Download",
            DownloadAction::Convert => "Convert",
        }
    }

    pub fn other(self) -> Self {
        match self {
            DownloadAction::Download => DownloadAction::Convert,
            DownloadAction::Convert => DownloadAction::Download,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Mpg,
    Avi,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 2] = [OutputFormat::Mpg, OutputFormat::Avi];

    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Mpg => "mpg",
            OutputFormat::Avi => "avi",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|format| format.as_str().eq_ignore_ascii_case(raw.trim()))
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Server answer to a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Ready { download_url: String },
    Converting { job_id: Option<JobId> },
    /// Any other status string; accepted but changes nothing beyond resetting the form.
    Other(String),
}
