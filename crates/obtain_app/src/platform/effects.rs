use obtain_core::{Effect, Msg, THEME_STORAGE_KEY};
use obtain_engine::{EngineEvent, EngineHandle};
use obtain_logging::{obtain_error, obtain_info, obtain_warn};

use super::persistence::PreferenceStore;
use crate::wire::{outcome_from_response, request_from_submission, snapshot_from_job};

/// Executes core effects against the engine and the preference store.
pub struct EffectRunner {
    engine: EngineHandle,
    preferences: PreferenceStore,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, preferences: PreferenceStore) -> Self {
        Self {
            engine,
            preferences,
        }
    }

    pub fn preferences(&self) -> &PreferenceStore {
        &self.preferences
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchJobs => self.engine.list_jobs(),
                Effect::StartPolling { interval } => {
                    obtain_info!("StartPolling interval_ms={}", interval.as_millis());
                    self.engine.start_polling(interval);
                }
                Effect::StopPolling => {
                    obtain_info!("StopPolling");
                    self.engine.stop_polling();
                }
                Effect::SubmitDownload(submission) => {
                    obtain_info!(
                        "SubmitDownload convert={} url={}",
                        submission.convert,
                        submission.url
                    );
                    self.engine.submit(request_from_submission(submission));
                }
                Effect::DeleteFile { filename } => {
                    obtain_info!("DeleteFile filename={}", filename);
                    self.engine.delete(filename);
                }
                Effect::RetryJob { job_id } => {
                    obtain_info!("RetryJob job_id={}", job_id);
                    self.engine.retry(job_id);
                }
                Effect::PersistTheme(theme) => {
                    if let Err(err) = self.preferences.set(THEME_STORAGE_KEY, theme.as_str()) {
                        obtain_error!("Failed to persist theme {}: {}", theme.as_str(), err);
                    }
                }
            }
        }
    }

    /// Engine results that arrived since the last call, as core messages.
    pub fn drain(&self) -> Vec<Msg> {
        let mut inbox = Vec::new();
        while let Some(event) = self.engine.try_recv() {
            inbox.push(translate(event));
        }
        inbox
    }
}

pub(crate) fn translate(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::JobsListed(Ok(jobs)) => {
            Msg::JobsLoaded(jobs.into_iter().map(snapshot_from_job).collect())
        }
        EngineEvent::JobsListed(Err(err)) => {
            obtain_warn!("Failed to load conversions: {}", err);
            Msg::JobsLoadFailed
        }
        EngineEvent::Submitted(Ok(response)) => match outcome_from_response(response) {
            Some(outcome) => Msg::SubmitSucceeded(outcome),
            None => {
                obtain_warn!("Server reported ready without a download url");
                Msg::SubmitFailed
            }
        },
        EngineEvent::Submitted(Err(err)) => {
            obtain_warn!("Submission failed: {}", err);
            Msg::SubmitFailed
        }
        EngineEvent::Deleted { filename, result } => {
            if let Err(err) = &result {
                obtain_warn!("Delete of {} failed: {}", filename, err);
            }
            Msg::DeleteFinished {
                filename,
                succeeded: result.is_ok(),
            }
        }
        EngineEvent::Retried { job_id, result } => {
            if let Err(err) = &result {
                obtain_warn!("Retry of {} failed: {}", job_id, err);
            }
            Msg::RetryFinished {
                job_id,
                succeeded: result.is_ok(),
            }
        }
        EngineEvent::PollTick => Msg::PollTick,
    }
}

#[cfg(test)]
mod tests {
    use obtain_core::SubmitOutcome;
    use obtain_engine::DownloadResponse;

    use super::*;

    #[test]
    fn ready_response_becomes_success() {
        let msg = translate(EngineEvent::Submitted(Ok(DownloadResponse {
            status: "ready".into(),
            download_url: Some("https://cdn/x.mp4".into()),
            job_id: None,
        })));
        assert_eq!(
            msg,
            Msg::SubmitSucceeded(SubmitOutcome::Ready {
                download_url: "https://cdn/x.mp4".into()
            })
        );
    }

    #[test]
    fn ready_without_url_becomes_failure() {
        let msg = translate(EngineEvent::Submitted(Ok(DownloadResponse {
            status: "ready".into(),
            download_url: None,
            job_id: None,
        })));
        assert_eq!(msg, Msg::SubmitFailed);
    }

    #[test]
    fn request_results_map_to_finished_messages() {
        assert_eq!(translate(EngineEvent::PollTick), Msg::PollTick);
        assert_eq!(
            translate(EngineEvent::Retried {
                job_id: "j".into(),
                result: Ok(())
            }),
            Msg::RetryFinished {
                job_id: "j".into(),
                succeeded: true
            }
        );
    }
}
