use std::sync::mpsc;
use std::time::Duration;

use obtain_logging::obtain_debug;
use tokio::runtime::Handle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::EngineEvent;

/// Periodic `PollTick` source. Holds at most one live timer.
pub struct PollTimer {
    runtime: Handle,
    events: mpsc::Sender<EngineEvent>,
    current: Option<CancellationToken>,
}

impl PollTimer {
    pub fn new(runtime: Handle, events: mpsc::Sender<EngineEvent>) -> Self {
        Self {
            runtime,
            events,
            current: None,
        }
    }

    /// Arms a timer whose first tick fires one `interval` from now.
    /// A timer that is already running is cancelled first.
    pub fn start(&mut self, interval: Duration) {
        self.stop();

        let token = CancellationToken::new();
        let cancelled = token.clone();
        let events = self.events.clone();
        obtain_debug!("poll timer armed interval_ms={}", interval.as_millis());

        self.runtime.spawn(async move {
            let mut ticker = time::interval_at(Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = cancelled.cancelled() => break,
                    _ = ticker.tick() => {
                        if events.send(EngineEvent::PollTick).is_err() {
                            break;
                        }
                    }
                }
            }
        });

        self.current = Some(token);
    }

    pub fn stop(&mut self) {
        if let Some(token) = self.current.take() {
            token.cancel();
            obtain_debug!("poll timer cleared");
        }
    }

    pub fn is_running(&self) -> bool {
        self.current.is_some()
    }
}

impl Drop for PollTimer {
    fn drop(&mut self) {
        self.stop();
    }
}
