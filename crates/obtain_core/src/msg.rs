use crate::{DownloadAction, JobSnapshot, OutputFormat, SubmitOutcome, View};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User switched between the home and conversions views.
    Navigate(View),
    /// Terminal focus changed; `false` means the view is hidden.
    VisibilityChanged(bool),
    /// Poll timer fired.
    PollTick,
    /// Job list fetched.
    JobsLoaded(Vec<JobSnapshot>),
    /// Job list fetch failed; already logged by the platform.
    JobsLoadFailed,
    /// User pressed delete on a card; asks for confirmation first.
    DeleteClicked { filename: String },
    /// User accepted the pending delete.
    DeleteConfirmed,
    /// User dismissed the pending delete.
    DeleteCancelled,
    /// Delete request returned.
    DeleteFinished { filename: String, succeeded: bool },
    /// User pressed retry on a failed card.
    RetryClicked { job_id: crate::JobId },
    /// Retry request returned.
    RetryFinished { job_id: crate::JobId, succeeded: bool },
    /// User edited the URL input box.
    UrlInputChanged(String),
    /// User picked download or convert.
    ActionSelected(DownloadAction),
    /// User picked an output format.
    FormatSelected(OutputFormat),
    /// User pressed the submit control (button or Enter).
    SubmitClicked,
    /// Submission request returned a decoded response.
    SubmitSucceeded(SubmitOutcome),
    /// Submission request failed for any reason.
    SubmitFailed,
    /// Stored theme value read at startup.
    ThemeRestored(Option<String>),
    /// User clicked the theme toggle.
    ThemeToggled,
    /// Fallback for placeholder wiring.
    NoOp,
}
