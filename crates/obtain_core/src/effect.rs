use std::time::Duration;

use crate::{OutputFormat, Theme};

/// Side effects requested by [`crate::update`]; the platform executes them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// `GET /api/conversions`.
    FetchJobs,
    /// Arm the poll timer, replacing any timer that is already running.
    StartPolling { interval: Duration },
    /// Disarm the poll timer.
    StopPolling,
    /// `POST /api/download`.
    SubmitDownload(Submission),
    /// `DELETE /api/delete/{filename}`.
    DeleteFile { filename: String },
    /// `POST /api/retry/{jobId}`.
    RetryJob { job_id: crate::JobId },
    /// Write the theme preference to the store.
    PersistTheme(Theme),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub url: String,
    pub convert: bool,
    /// Present only when `convert` is set.
    pub format: Option<OutputFormat>,
}
