use crate::view_model::{EMPTY_URL_MESSAGE, SUBMIT_FAILED_MESSAGE};
use crate::{AppState, Effect, Msg, SubmitOutcome, Theme, View};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Navigate(view) => navigate(&mut state, view),
        Msg::VisibilityChanged(visible) => {
            let was_visible = state.is_visible();
            state.set_visible(visible);
            match (was_visible, visible) {
                (true, false) => stop_polling(&mut state),
                (false, true) if state.current_view() == View::Conversions => {
                    start_polling(&mut state)
                }
                _ => Vec::new(),
            }
        }
        Msg::PollTick => {
            // A tick can race with StopPolling; only a live poller fetches.
            if state.is_polling() {
                vec![Effect::FetchJobs]
            } else {
                Vec::new()
            }
        }
        Msg::JobsLoaded(jobs) => {
            state.replace_jobs(jobs);
            Vec::new()
        }
        Msg::JobsLoadFailed => Vec::new(),
        Msg::DeleteClicked { filename } => {
            if state.current_view() == View::Conversions {
                state.request_delete(filename);
            }
            Vec::new()
        }
        Msg::DeleteConfirmed => match state.take_pending_delete() {
            Some(filename) => vec![Effect::DeleteFile { filename }],
            None => Vec::new(),
        },
        Msg::DeleteCancelled => {
            state.take_pending_delete();
            Vec::new()
        }
        Msg::DeleteFinished { succeeded, .. } | Msg::RetryFinished { succeeded, .. } => {
            if succeeded && state.current_view() == View::Conversions {
                vec![Effect::FetchJobs]
            } else {
                Vec::new()
            }
        }
        Msg::RetryClicked { job_id } => vec![Effect::RetryJob { job_id }],
        Msg::UrlInputChanged(text) => {
            state.set_url_input(text);
            Vec::new()
        }
        Msg::ActionSelected(action) => {
            state.select_action(action);
            Vec::new()
        }
        Msg::FormatSelected(format) => {
            state.select_format(format);
            Vec::new()
        }
        Msg::SubmitClicked => {
            if state.is_busy() {
                // Control is disabled while a request is in flight.
                Vec::new()
            } else {
                match state.begin_submission() {
                    Some(submission) => vec![Effect::SubmitDownload(submission)],
                    None => {
                        state.show_error(EMPTY_URL_MESSAGE);
                        Vec::new()
                    }
                }
            }
        }
        Msg::SubmitSucceeded(outcome) => {
            state.finish_submission();
            match outcome {
                SubmitOutcome::Ready { download_url } => {
                    state.show_direct_download(download_url);
                    Vec::new()
                }
                SubmitOutcome::Converting { .. } => {
                    state.hide_direct_download();
                    if state.current_view() == View::Conversions {
                        // Already watching the list; show the new job without a second timer.
                        if state.is_polling() {
                            vec![Effect::FetchJobs]
                        } else {
                            Vec::new()
                        }
                    } else {
                        navigate(&mut state, View::Conversions)
                    }
                }
                SubmitOutcome::Other(_) => Vec::new(),
            }
        }
        Msg::SubmitFailed => {
            state.fail_submission(SUBMIT_FAILED_MESSAGE);
            Vec::new()
        }
        Msg::ThemeRestored(stored) => {
            if stored.as_deref() == Some(Theme::Dark.as_str()) && state.theme() == Theme::Light {
                toggle_theme(&mut state)
            } else {
                Vec::new()
            }
        }
        Msg::ThemeToggled => toggle_theme(&mut state),
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn navigate(state: &mut AppState, view: View) -> Vec<Effect> {
    if state.current_view() == view {
        return Vec::new();
    }

    let mut effects = Vec::new();
    match state.current_view() {
        View::Conversions => effects.extend(stop_polling(state)),
        View::Home => state.reset_home_page(),
    }

    state.set_view(view);
    if view == View::Conversions {
        state.reset_conversions_page();
        if state.is_visible() {
            effects.extend(start_polling(state));
        }
    }
    effects
}

/// Fetch once right away, then hand the timer to the platform.
fn start_polling(state: &mut AppState) -> Vec<Effect> {
    state.set_polling(true);
    vec![
        Effect::FetchJobs,
        Effect::StartPolling {
            interval: state.poll_interval(),
        },
    ]
}

fn stop_polling(state: &mut AppState) -> Vec<Effect> {
    if state.is_polling() {
        state.set_polling(false);
        vec![Effect::StopPolling]
    } else {
        Vec::new()
    }
}

fn toggle_theme(state: &mut AppState) -> Vec<Effect> {
    let theme = state.toggle_theme();
    vec![Effect::PersistTheme(theme)]
}
