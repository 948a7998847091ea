//! Conversions between engine wire types and core messages.

use obtain_core::{JobSnapshot, JobStatus, SubmitOutcome, Submission};
use obtain_engine::{DownloadRequest, DownloadResponse, Job};

pub fn snapshot_from_job(job: Job) -> JobSnapshot {
    JobSnapshot {
        status: JobStatus::parse(&job.status),
        started_at: job.start_time,
        finished_at: job.end_time,
        filename: job.filename,
        error: job.error,
        progress_percent: progress_percent(job.progress),
        size: job.size,
        can_retry: job.can_retry,
        ..JobSnapshot::new(job.id, job.url, job.format, JobStatus::Queued)
    }
}

pub fn request_from_submission(submission: Submission) -> DownloadRequest {
    DownloadRequest {
        url: submission.url,
        convert: submission.convert,
        format: submission.format.map(|format| format.as_str().to_string()),
    }
}

/// `None` when the server claims `ready` but gives nothing to download.
pub fn outcome_from_response(response: DownloadResponse) -> Option<SubmitOutcome> {
    match response.status.as_str() {
        "ready" => response
            .download_url
            .map(|download_url| SubmitOutcome::Ready { download_url }),
        "converting" => Some(SubmitOutcome::Converting {
            job_id: response.job_id,
        }),
        _ => Some(SubmitOutcome::Other(response.status)),
    }
}

fn progress_percent(fraction: f64) -> u8 {
    if !fraction.is_finite() {
        return 0;
    }
    (fraction * 100.0).round().clamp(0.0, 100.0) as u8
}
