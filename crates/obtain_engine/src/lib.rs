//! Obtain engine: HTTP client for the job service and effect execution.
mod client;
mod engine;
mod poll;
mod save;
mod types;

pub use client::{ApiBase, ClientSettings, JobApi, ReqwestJobApi};
pub use engine::EngineHandle;
pub use poll::PollTimer;
pub use save::{NoProgress, ProgressSink};
pub use types::{
    ApiError, DownloadRequest, DownloadResponse, EngineEvent, FailureKind, Job, SaveProgress,
};
