use std::time::Duration;

use serde::de::DeserializeOwned;
use url::Url;

use crate::{ApiError, DownloadRequest, DownloadResponse, FailureKind, Job};

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    /// `None` waits as long as the server needs; `/api/download` can take tens of seconds.
    pub request_timeout: Option<Duration>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: None,
        }
    }
}

/// Server root plus the endpoint layout of the job service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiBase {
    root: Url,
}

impl ApiBase {
    pub fn parse(raw: &str) -> Result<Self, ApiError> {
        let root = Url::parse(raw.trim())
            .map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))?;
        if root.cannot_be_a_base() {
            return Err(ApiError::new(
                FailureKind::InvalidUrl,
                format!("{raw} cannot be used as a server base url"),
            ));
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Url {
        &self.root
    }

    pub fn conversions(&self) -> Url {
        self.endpoint(&["api", "conversions"])
    }

    pub fn download(&self) -> Url {
        self.endpoint(&["api", "download"])
    }

    /// Link a browser or `obtain save` can fetch the finished file from.
    pub fn file(&self, filename: &str) -> Url {
        self.endpoint(&["api", "file", filename])
    }

    pub fn delete(&self, filename: &str) -> Url {
        self.endpoint(&["api", "delete", filename])
    }

    pub fn retry(&self, job_id: &str) -> Url {
        self.endpoint(&["api", "retry", job_id])
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.root.clone();
        url.set_query(None);
        url.set_fragment(None);
        // `parse` rejected cannot-be-a-base urls, so segments are always available.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

#[async_trait::async_trait]
pub trait JobApi: Send + Sync {
    async fn list_conversions(&self) -> Result<Vec<Job>, ApiError>;

    async fn submit_download(&self, request: &DownloadRequest)
        -> Result<DownloadResponse, ApiError>;

    async fn delete_file(&self, filename: &str) -> Result<(), ApiError>;

    async fn retry_job(&self, job_id: &str) -> Result<(), ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestJobApi {
    base: ApiBase,
    pub(crate) client: reqwest::Client,
}

impl ReqwestJobApi {
    pub fn new(settings: ClientSettings) -> Result<Self, ApiError> {
        let base = ApiBase::parse(&settings.base_url)?;
        let mut builder = reqwest::Client::builder().connect_timeout(settings.connect_timeout);
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| ApiError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { base, client })
    }

    pub fn base(&self) -> &ApiBase {
        &self.base
    }
}

#[async_trait::async_trait]
impl JobApi for ReqwestJobApi {
    async fn list_conversions(&self) -> Result<Vec<Job>, ApiError> {
        let response = self
            .client
            .get(self.base.conversions())
            .send()
            .await
            .map_err(map_reqwest_error)?;
        read_json(response).await
    }

    async fn submit_download(
        &self,
        request: &DownloadRequest,
    ) -> Result<DownloadResponse, ApiError> {
        let response = self
            .client
            .post(self.base.download())
            .json(request)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        read_json(response).await
    }

    async fn delete_file(&self, filename: &str) -> Result<(), ApiError> {
        let response = self
            .client
            .delete(self.base.delete(filename))
            .send()
            .await
            .map_err(map_reqwest_error)?;
        // Body content is irrelevant, but it must be JSON.
        read_json::<serde_json::Value>(response).await.map(|_| ())
    }

    async fn retry_job(&self, job_id: &str) -> Result<(), ApiError> {
        let response = self
            .client
            .post(self.base.retry(job_id))
            .send()
            .await
            .map_err(map_reqwest_error)?;
        read_json::<serde_json::Value>(response).await.map(|_| ())
    }
}

pub(crate) fn check_status(response: &reqwest::Response) -> Result<(), ApiError> {
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(ApiError::new(
            FailureKind::HttpStatus(status.as_u16()),
            format!("{} {}", status, response.url()),
        ))
    }
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    if let Err(mut err) = check_status(&response) {
        if let Ok(body) = response.text().await {
            let body = body.trim();
            if !body.is_empty() {
                err.message = format!("{}: {}", err.message, body);
            }
        }
        return Err(err);
    }
    let bytes = response.bytes().await.map_err(map_reqwest_error)?;
    serde_json::from_slice(&bytes).map_err(|err| ApiError::new(FailureKind::Decode, err.to_string()))
}

pub(crate) fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return ApiError::new(FailureKind::Decode, err.to_string());
    }
    ApiError::new(FailureKind::Network, err.to_string())
}
