use std::time::Duration;

use crate::view_model::{
    card_for, AppViewModel, ConfirmDelete, ConversionsView, HomeView, JobListView,
    DELETE_CONFIRM_PROMPT, EMPTY_STATE_MESSAGE, POLL_INTERVAL, SUBMIT_BUSY_LABEL, SUBMIT_LABEL,
};
use crate::{DownloadAction, JobSnapshot, OutputFormat, Submission, Theme};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Home,
    Conversions,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct HomeState {
    url_input: String,
    action: DownloadAction,
    format: OutputFormat,
    busy: bool,
    error: Option<String>,
    direct_download: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct ConversionsState {
    /// `None` until the first list response for the current visit.
    jobs: Option<Vec<JobSnapshot>>,
    polling: bool,
    pending_delete: Option<String>,
}

/// Whole-application state. Owned by the event loop and threaded through [`crate::update`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    view: View,
    visible: bool,
    theme: Theme,
    poll_interval: Duration,
    home: HomeState,
    conversions: ConversionsState,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            view: View::Home,
            visible: true,
            theme: Theme::Light,
            poll_interval: POLL_INTERVAL,
            home: HomeState::default(),
            conversions: ConversionsState::default(),
            dirty: false,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_poll_interval(poll_interval: Duration) -> Self {
        Self {
            poll_interval,
            ..Self::default()
        }
    }

    pub fn view(&self) -> AppViewModel {
        let list = match &self.conversions.jobs {
            None => JobListView::Loading,
            Some(jobs) if jobs.is_empty() => JobListView::Empty {
                message: EMPTY_STATE_MESSAGE,
            },
            Some(jobs) => JobListView::Cards(jobs.iter().map(card_for).collect()),
        };

        AppViewModel {
            view: self.view,
            theme: self.theme,
            theme_icon: self.theme.icon(),
            home: HomeView {
                url_input: self.home.url_input.clone(),
                action: self.home.action,
                format: self.home.format,
                format_group_visible: self.home.action == DownloadAction::Convert,
                submit_enabled: !self.home.busy,
                submit_label: if self.home.busy {
                    SUBMIT_BUSY_LABEL
                } else {
                    SUBMIT_LABEL
                },
                error_banner: self.home.error.clone(),
                direct_download_url: self.home.direct_download.clone(),
            },
            conversions: ConversionsView {
                list,
                polling: self.conversions.polling,
                confirm_delete: self
                    .conversions
                    .pending_delete
                    .as_ref()
                    .map(|filename| ConfirmDelete {
                        filename: filename.clone(),
                        prompt: DELETE_CONFIRM_PROMPT,
                    }),
            },
        }
    }

    /// Returns whether anything visible changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn current_view(&self) -> View {
        self.view
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_polling(&self) -> bool {
        self.conversions.polling
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_view(&mut self, view: View) {
        self.view = view;
        self.mark_dirty();
    }

    pub(crate) fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub(crate) fn set_polling(&mut self, polling: bool) {
        if self.conversions.polling != polling {
            self.conversions.polling = polling;
            self.mark_dirty();
        }
    }

    /// Fresh visit to the conversions view: forget the previous list.
    pub(crate) fn reset_conversions_page(&mut self) {
        self.conversions.jobs = None;
        self.conversions.pending_delete = None;
    }

    /// Leaving the home view: drop the result card and banner the user has seen.
    /// A response that lands while another view is active stays until the next visit ends.
    pub(crate) fn reset_home_page(&mut self) {
        self.home.error = None;
        self.home.direct_download = None;
    }

    pub(crate) fn replace_jobs(&mut self, jobs: Vec<JobSnapshot>) {
        self.conversions.jobs = Some(jobs);
        self.mark_dirty();
    }

    pub(crate) fn request_delete(&mut self, filename: String) {
        self.conversions.pending_delete = Some(filename);
        self.mark_dirty();
    }

    pub(crate) fn take_pending_delete(&mut self) -> Option<String> {
        let pending = self.conversions.pending_delete.take();
        if pending.is_some() {
            self.mark_dirty();
        }
        pending
    }

    pub(crate) fn set_url_input(&mut self, text: String) {
        if self.home.url_input != text {
            self.home.url_input = text;
            self.mark_dirty();
        }
    }

    pub(crate) fn select_action(&mut self, action: DownloadAction) {
        self.home.action = action;
        if action == DownloadAction::Convert {
            self.home.direct_download = None;
        }
        self.mark_dirty();
    }

    pub(crate) fn select_format(&mut self, format: OutputFormat) {
        if self.home.format != format {
            self.home.format = format;
            self.mark_dirty();
        }
    }

    pub(crate) fn is_busy(&self) -> bool {
        self.home.busy
    }

    pub(crate) fn show_error(&mut self, message: &str) {
        self.home.error = Some(message.to_string());
        self.mark_dirty();
    }

    /// Validates the form and moves it into the in-flight state.
    ///
    /// Returns `None` when the trimmed URL is empty; the caller shows the banner.
    pub(crate) fn begin_submission(&mut self) -> Option<Submission> {
        let url = self.home.url_input.trim();
        if url.is_empty() {
            return None;
        }
        let convert = self.home.action == DownloadAction::Convert;
        let submission = Submission {
            url: url.to_string(),
            convert,
            format: convert.then_some(self.home.format),
        };
        self.home.busy = true;
        self.home.error = None;
        self.mark_dirty();
        Some(submission)
    }

    /// Response arrived: the form resets regardless of the status value.
    pub(crate) fn finish_submission(&mut self) {
        self.home.url_input.clear();
        self.home.busy = false;
        self.mark_dirty();
    }

    pub(crate) fn fail_submission(&mut self, message: &str) {
        self.home.busy = false;
        self.show_error(message);
    }

    pub(crate) fn show_direct_download(&mut self, url: String) {
        self.home.direct_download = Some(url);
        self.mark_dirty();
    }

    pub(crate) fn hide_direct_download(&mut self) {
        self.home.direct_download = None;
        self.mark_dirty();
    }

    pub(crate) fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.mark_dirty();
        self.theme
    }
}
