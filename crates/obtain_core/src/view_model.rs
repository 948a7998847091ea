use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::{DownloadAction, JobId, JobSnapshot, JobStatus, OutputFormat, Theme, ThemeIcon, View};

/// Delay between two job-list fetches while the conversions view is visible.
pub const POLL_INTERVAL: Duration = Duration::from_millis(2000);

pub const EMPTY_STATE_MESSAGE: &str = "No conversions yet";
pub const EMPTY_URL_MESSAGE: &str = "Please enter a YouTube URL";
pub const SUBMIT_FAILED_MESSAGE: &str = "Failed to process video. Please try again.";
pub const DELETE_CONFIRM_PROMPT: &str = "Are you sure you want to delete this file?";
pub const SUBMIT_LABEL: &str = "obtain";
pub const SUBMIT_BUSY_LABEL: &str = "Processing...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppViewModel {
    pub view: View,
    pub theme: Theme,
    pub theme_icon: ThemeIcon,
    pub home: HomeView,
    pub conversions: ConversionsView,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeView {
    pub url_input: String,
    pub action: DownloadAction,
    pub format: OutputFormat,
    pub format_group_visible: bool,
    pub submit_enabled: bool,
    pub submit_label: &'static str,
    pub error_banner: Option<String>,
    pub direct_download_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionsView {
    pub list: JobListView,
    pub polling: bool,
    pub confirm_delete: Option<ConfirmDelete>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmDelete {
    pub filename: String,
    pub prompt: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobListView {
    Loading,
    Empty { message: &'static str },
    Cards(Vec<JobCardView>),
}

impl JobListView {
    pub fn cards(&self) -> &[JobCardView] {
        match self {
            JobListView::Cards(cards) => cards,
            JobListView::Loading | JobListView::Empty { .. } => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobCardView {
    pub job_id: JobId,
    /// e.g. `MPG Conversion`.
    pub title: String,
    pub status_label: String,
    /// e.g. `status-completed`.
    pub status_class: String,
    pub url: String,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
    /// Shown while the server is still working on the job.
    pub progress_percent: Option<u8>,
    pub size: Option<String>,
    pub error_line: Option<String>,
    pub actions: Vec<CardAction>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardAction {
    Download { filename: String },
    Delete { filename: String },
    Retry { job_id: JobId },
}

pub(crate) fn card_for(job: &JobSnapshot) -> JobCardView {
    let mut actions = Vec::new();
    let mut error_line = None;
    let mut size = None;

    match (&job.status, &job.filename) {
        (JobStatus::Completed, Some(filename)) => {
            actions.push(CardAction::Download {
                filename: filename.clone(),
            });
            actions.push(CardAction::Delete {
                filename: filename.clone(),
            });
            size = job.size.clone();
        }
        (JobStatus::Failed, _) => {
            let reason = job.error.as_deref().unwrap_or("Unknown error");
            error_line = Some(format!("Error: {reason}"));
            if job.can_retry {
                actions.push(CardAction::Retry {
                    job_id: job.id.clone(),
                });
            }
        }
        _ => {}
    }

    JobCardView {
        job_id: job.id.clone(),
        title: format!("{} Conversion", job.format.to_uppercase()),
        status_label: job.status.as_str().to_string(),
        status_class: format!("status-{}", job.status.as_str()),
        url: job.url.clone(),
        started_at: job.started_at,
        finished_at: job.finished_at,
        progress_percent: job
            .status
            .is_in_progress()
            .then_some(job.progress_percent.min(100)),
        size,
        error_line,
        actions,
    }
}
