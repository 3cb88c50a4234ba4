use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use url::Url;

use dashboard_logging::{dashboard_debug, dashboard_warn};

use crate::{EngineError, FailureKind, JobFailure, JobResult, JobSuccess, UploadFile};

/// Multipart field the backend reads uploaded statements from.
pub const UPLOAD_FIELD_NAME: &str = "file";

pub const HEALTH_ROUTE: &str = "actuator/health";

/// Shown when an error response carries no usable message.
pub const SERVER_ERROR_FALLBACK: &str = "Server error";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportSettings {
    /// Scheme, host and port of the backend, e.g. `http://localhost:8080`.
    pub base_endpoint: String,
}

impl TransportSettings {
    pub fn new(base_endpoint: impl Into<String>) -> Self {
        Self {
            base_endpoint: base_endpoint.into(),
        }
    }
}

#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// POSTs a job route. Every failure is returned, never raised.
    async fn invoke(&self, route: &str, upload: Option<UploadFile>) -> JobResult;

    /// GETs the health endpoint and returns its `status` field.
    async fn health(&self) -> Result<String, JobFailure>;
}

#[derive(Debug, Deserialize)]
struct SuccessBody {
    message: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: Option<i64>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct HealthBody {
    status: Option<String>,
}

/// Production transport. Uses reqwest's default timeouts and never retries.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    settings: TransportSettings,
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(settings: TransportSettings) -> Result<Self, EngineError> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &TransportSettings {
        &self.settings
    }
}

#[async_trait::async_trait]
impl Transport for ReqwestTransport {
    async fn invoke(&self, route: &str, upload: Option<UploadFile>) -> JobResult {
        let url = join_url(&self.settings.base_endpoint, route)?;
        let request = match upload {
            Some(upload) => {
                dashboard_debug!(
                    "POST {} multipart file_name={} bytes={}",
                    url,
                    upload.file_name,
                    upload.bytes.len()
                );
                let part = Part::bytes(upload.bytes).file_name(upload.file_name);
                // reqwest sets the multipart content type, boundary included.
                self.client
                    .post(url)
                    .multipart(Form::new().part(UPLOAD_FIELD_NAME, part))
            }
            None => {
                dashboard_debug!("POST {}", url);
                self.client.post(url).header(CONTENT_TYPE, "application/json")
            }
        };

        let response = request.send().await.map_err(map_reqwest_error)?;
        let status = response.status();

        if !status.is_success() {
            // The status already decides the outcome; a broken body only costs the message.
            let message = match response.bytes().await {
                Ok(body) => error_message(&body),
                Err(err) => {
                    dashboard_warn!("failed to read {} error body: {}", status, err);
                    SERVER_ERROR_FALLBACK.to_string()
                }
            };
            return Err(JobFailure::new(
                FailureKind::HttpStatus(status.as_u16()),
                message,
            ));
        }

        let body = response.bytes().await.map_err(map_reqwest_error)?;
        serde_json::from_slice::<SuccessBody>(&body)
            .map(|parsed| JobSuccess {
                message: parsed.message,
            })
            .map_err(|err| JobFailure::new(FailureKind::MalformedResponse, err.to_string()))
    }

    async fn health(&self) -> Result<String, JobFailure> {
        let url = join_url(&self.settings.base_endpoint, HEALTH_ROUTE)?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(JobFailure::new(
                FailureKind::HttpStatus(status.as_u16()),
                format!("HTTP error! status: {}", status.as_u16()),
            ));
        }

        let body = response.bytes().await.map_err(map_reqwest_error)?;
        let parsed: HealthBody = serde_json::from_slice(&body)
            .map_err(|err| JobFailure::new(FailureKind::MalformedResponse, err.to_string()))?;
        parsed.status.ok_or_else(|| {
            JobFailure::new(
                FailureKind::MalformedResponse,
                "health response missing status field",
            )
        })
    }
}

/// Joins the base endpoint and a route with exactly one `/` between them.
pub fn join_url(base: &str, route: &str) -> Result<Url, JobFailure> {
    let joined = format!(
        "{}/{}",
        base.trim_end_matches('/'),
        route.trim_start_matches('/')
    );
    Url::parse(&joined)
        .map_err(|err| JobFailure::new(FailureKind::InvalidUrl, format!("{joined}: {err}")))
}

fn error_message(body: &[u8]) -> String {
    match serde_json::from_slice::<ErrorBody>(body) {
        Ok(ErrorBody {
            code,
            message: Some(message),
        }) if !message.trim().is_empty() => {
            if let Some(code) = code {
                dashboard_debug!("backend error code={}", code);
            }
            message
        }
        Ok(_) => SERVER_ERROR_FALLBACK.to_string(),
        Err(err) => {
            dashboard_warn!("unparsable error body ({} bytes): {}", body.len(), err);
            SERVER_ERROR_FALLBACK.to_string()
        }
    }
}

fn map_reqwest_error(err: reqwest::Error) -> JobFailure {
    if err.is_builder() {
        return JobFailure::new(FailureKind::InvalidUrl, err.to_string());
    }
    JobFailure::new(FailureKind::Network, err.to_string())
}
