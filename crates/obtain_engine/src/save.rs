use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use futures_util::StreamExt;
use tempfile::NamedTempFile;

use crate::client::{check_status, map_reqwest_error};
use crate::{ApiError, FailureKind, ReqwestJobApi, SaveProgress};

pub trait ProgressSink: Send + Sync {
    fn emit(&self, progress: SaveProgress);
}

/// Sink for callers that do not report progress.
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn emit(&self, _progress: SaveProgress) {}
}

impl ReqwestJobApi {
    /// Streams `GET /api/file/{filename}` into `dir/filename`.
    ///
    /// The body lands in a temp file next to the target and is renamed into place
    /// only once complete, so an interrupted transfer never leaves a partial file.
    pub async fn save_file(
        &self,
        filename: &str,
        dir: &Path,
        sink: &dyn ProgressSink,
    ) -> Result<PathBuf, ApiError> {
        let local_name = local_file_name(filename)?;
        ensure_dir(dir)?;

        let response = self
            .client
            .get(self.base().file(filename))
            .send()
            .await
            .map_err(map_reqwest_error)?;
        check_status(&response)?;

        let total = response.content_length();
        let mut tmp = NamedTempFile::new_in(dir).map_err(io_error)?;
        let mut written = 0u64;
        sink.emit(SaveProgress { written, total });

        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            tmp.write_all(&chunk).map_err(io_error)?;
            written += chunk.len() as u64;
            sink.emit(SaveProgress { written, total });
        }

        tmp.flush().map_err(io_error)?;
        tmp.as_file_mut().sync_all().map_err(io_error)?;

        let target = dir.join(local_name);
        tmp.persist(&target).map_err(|err| io_error(err.error))?;
        Ok(target)
    }
}

/// Server names are flat; anything path-like is reduced to its last component.
fn local_file_name(filename: &str) -> Result<&str, ApiError> {
    Path::new(filename)
        .file_name()
        .and_then(|name| name.to_str())
        .filter(|name| !name.trim().is_empty())
        .ok_or_else(|| ApiError::new(FailureKind::InvalidFilename, filename.to_string()))
}

fn ensure_dir(dir: &Path) -> Result<(), ApiError> {
    if dir.exists() {
        if !dir.is_dir() {
            return Err(ApiError::new(
                FailureKind::Io,
                format!("{} is not a directory", dir.display()),
            ));
        }
        return Ok(());
    }
    fs::create_dir_all(dir).map_err(io_error)
}

fn io_error(err: std::io::Error) -> ApiError {
    ApiError::new(FailureKind::Io, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_name_strips_directories() {
        assert_eq!(local_file_name("clip.mpg").unwrap(), "clip.mpg");
        assert_eq!(local_file_name("nested/clip.avi").unwrap(), "clip.avi");
        assert_eq!(
            local_file_name("..").unwrap_err().kind,
            FailureKind::InvalidFilename
        );
        assert!(local_file_name("").is_err());
    }
}
