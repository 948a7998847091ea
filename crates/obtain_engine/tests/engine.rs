use std::sync::{mpsc, Arc, Mutex};
use std::time::Duration;

use obtain_engine::{
    ApiError, DownloadRequest, DownloadResponse, EngineEvent, EngineHandle, FailureKind, Job,
    JobApi, PollTimer,
};

const WAIT: Duration = Duration::from_secs(2);

/// In-memory stand-in for the job service.
#[derive(Default)]
struct FakeApi {
    calls: Mutex<Vec<String>>,
    fail_delete: bool,
}

impl FakeApi {
    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl JobApi for FakeApi {
    async fn list_conversions(&self) -> Result<Vec<Job>, ApiError> {
        self.calls.lock().unwrap().push("list".into());
        let job: Job = serde_json::from_str(r#"{"id":"a","status":"converting"}"#).unwrap();
        Ok(vec![job])
    }

    async fn submit_download(
        &self,
        request: &DownloadRequest,
    ) -> Result<DownloadResponse, ApiError> {
        self.calls.lock().unwrap().push(format!("submit {}", request.url));
        Ok(DownloadResponse {
            status: "ready".into(),
            download_url: Some("https://cdn.example.com/a.mp4".into()),
            job_id: None,
        })
    }

    async fn delete_file(&self, filename: &str) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(format!("delete {filename}"));
        if self.fail_delete {
            Err(ApiError {
                kind: FailureKind::HttpStatus(404),
                message: "File not found".into(),
            })
        } else {
            Ok(())
        }
    }

    async fn retry_job(&self, job_id: &str) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(format!("retry {job_id}"));
        Ok(())
    }
}

fn next_non_tick(engine: &EngineHandle) -> EngineEvent {
    loop {
        match engine.recv_timeout(WAIT).expect("engine event") {
            EngineEvent::PollTick => continue,
            event => return event,
        }
    }
}

#[test]
fn requests_round_trip_through_engine() {
    let api = Arc::new(FakeApi::default());
    let engine = EngineHandle::new(api.clone()).expect("engine");

    engine.list_jobs();
    match next_non_tick(&engine) {
        EngineEvent::JobsListed(Ok(jobs)) => assert_eq!(jobs[0].id, "a"),
        other => panic!("unexpected event {other:?}"),
    }

    engine.submit(DownloadRequest {
        url: "https://youtu.be/a".into(),
        convert: false,
        format: None,
    });
    match next_non_tick(&engine) {
        EngineEvent::Submitted(Ok(response)) => assert_eq!(response.status, "ready"),
        other => panic!("unexpected event {other:?}"),
    }

    engine.retry("a");
    assert_eq!(
        next_non_tick(&engine),
        EngineEvent::Retried {
            job_id: "a".into(),
            result: Ok(())
        }
    );

    assert_eq!(
        api.calls(),
        vec!["list", "submit https://youtu.be/a", "retry a"]
    );
}

#[test]
fn failures_are_reported_not_swallowed() {
    let api = Arc::new(FakeApi {
        fail_delete: true,
        ..FakeApi::default()
    });
    let engine = EngineHandle::new(api).expect("engine");

    engine.delete("gone.mpg");
    match next_non_tick(&engine) {
        EngineEvent::Deleted { filename, result } => {
            assert_eq!(filename, "gone.mpg");
            assert_eq!(result.unwrap_err().kind, FailureKind::HttpStatus(404));
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn engine_polling_ticks_until_stopped() {
    let engine = EngineHandle::new(Arc::new(FakeApi::default())).expect("engine");

    engine.start_polling(Duration::from_millis(20));
    assert_eq!(engine.recv_timeout(WAIT), Some(EngineEvent::PollTick));

    engine.stop_polling();
    // Drain anything already in flight, then expect silence.
    std::thread::sleep(Duration::from_millis(60));
    while engine.try_recv().is_some() {}
    assert_eq!(engine.recv_timeout(Duration::from_millis(120)), None);
}

#[test]
fn restarting_poll_timer_keeps_a_single_timer() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let (tx, rx) = mpsc::channel();
    let mut timer = PollTimer::new(runtime.handle().clone(), tx);

    timer.start(Duration::from_millis(100));
    timer.start(Duration::from_millis(100));
    timer.start(Duration::from_millis(100));
    assert!(timer.is_running());

    std::thread::sleep(Duration::from_millis(250));
    let ticks = rx.try_iter().count();
    // One live timer fires twice in 250ms; three would fire about six times.
    assert!((1..=3).contains(&ticks), "got {ticks} ticks");

    timer.stop();
    assert!(!timer.is_running());
    std::thread::sleep(Duration::from_millis(50));
    rx.try_iter().count();
    std::thread::sleep(Duration::from_millis(200));
    assert_eq!(rx.try_iter().count(), 0);
}
