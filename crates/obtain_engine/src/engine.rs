use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use obtain_logging::{obtain_debug, obtain_warn};

use crate::poll::PollTimer;
use crate::{DownloadRequest, EngineEvent, JobApi};

enum Request {
    ListJobs,
    Submit(DownloadRequest),
    Delete { filename: String },
    Retry { job_id: String },
}

enum EngineCommand {
    Request(Request),
    StartPolling { interval: Duration },
    StopPolling,
}

/// Handle to the background IO thread. Requests are fire-and-forget; results come
/// back through [`EngineHandle::try_recv`].
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(api: Arc<dyn JobApi>) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::Builder::new()
            .name("obtain-engine".to_string())
            .spawn(move || {
                let mut poll_timer = PollTimer::new(runtime.handle().clone(), event_tx.clone());
                while let Ok(command) = cmd_rx.recv() {
                    match command {
                        EngineCommand::StartPolling { interval } => poll_timer.start(interval),
                        EngineCommand::StopPolling => poll_timer.stop(),
                        EngineCommand::Request(request) => {
                            let api = api.clone();
                            let event_tx = event_tx.clone();
                            runtime.spawn(async move {
                                let event = handle_request(api.as_ref(), request).await;
                                let _ = event_tx.send(event);
                            });
                        }
                    }
                }
                poll_timer.stop();
                obtain_debug!("engine command channel closed");
            })?;

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn list_jobs(&self) {
        self.send(EngineCommand::Request(Request::ListJobs));
    }

    pub fn submit(&self, request: DownloadRequest) {
        self.send(EngineCommand::Request(Request::Submit(request)));
    }

    pub fn delete(&self, filename: impl Into<String>) {
        self.send(EngineCommand::Request(Request::Delete {
            filename: filename.into(),
        }));
    }

    pub fn retry(&self, job_id: impl Into<String>) {
        self.send(EngineCommand::Request(Request::Retry {
            job_id: job_id.into(),
        }));
    }

    /// Replaces any running poll timer.
    pub fn start_polling(&self, interval: Duration) {
        self.send(EngineCommand::StartPolling { interval });
    }

    pub fn stop_polling(&self) {
        self.send(EngineCommand::StopPolling);
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            obtain_warn!("engine thread is gone; command dropped");
        }
    }
}

async fn handle_request(api: &dyn JobApi, request: Request) -> EngineEvent {
    match request {
        Request::ListJobs => EngineEvent::JobsListed(api.list_conversions().await),
        Request::Submit(request) => {
            EngineEvent::Submitted(api.submit_download(&request).await)
        }
        Request::Delete { filename } => {
            let result = api.delete_file(&filename).await;
            EngineEvent::Deleted { filename, result }
        }
        Request::Retry { job_id } => {
            let result = api.retry_job(&job_id).await;
            EngineEvent::Retried { job_id, result }
        }
    }
}
