//! Obtain core: pure state machine and view-model helpers for the job client.
mod effect;
mod job;
mod msg;
mod state;
mod theme;
mod update;
mod view_model;

pub use effect::{Effect, Submission};
pub use job::{DownloadAction, JobId, JobSnapshot, JobStatus, OutputFormat, SubmitOutcome};
pub use msg::Msg;
pub use state::{AppState, View};
pub use theme::{Theme, ThemeIcon, THEME_STORAGE_KEY};
pub use update::update;
pub use view_model::{
    AppViewModel, CardAction, ConfirmDelete, ConversionsView, HomeView, JobCardView,
    JobListView, DELETE_CONFIRM_PROMPT, EMPTY_STATE_MESSAGE, EMPTY_URL_MESSAGE,
    POLL_INTERVAL, SUBMIT_BUSY_LABEL, SUBMIT_FAILED_MESSAGE, SUBMIT_LABEL,
};
