// src/backend/http.rs

use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client, StatusCode, Url, header};
use serde_json::Value;
use std::time::{Duration, Instant};

use crate::backend::ScreeningBackend;
use crate::config::ClientConfig;
use crate::errors::{Operation, Result, ScreenError};
use crate::models::{
    HealthStatus, JobSubmission, ResumeFile, ResumeResult, SubmitReceipt, resumes_from_value,
};

const POST_JOB_PATH: &str = "post-job";
const LIST_RESUMES_PATH: &str = "get_resumes";
const DOWNLOAD_PATH: &str = "download";
const HEALTH_PATH: &str = "health";

/// Fallback when an error body parses as JSON but carries no usable detail.
const SUBMIT_FAILED: &str = "Failed to post job";

const OCTET_STREAM: &str = "application/octet-stream";

/// Talks to the screening backend over HTTP.
pub struct HttpBackend {
    client: Client,
    config: ClientConfig,
    base: Url,
}

impl HttpBackend {
    /// Creates a new `HttpBackend` against `config.api_base`.
    pub fn new(client: Client, config: ClientConfig) -> Result<Self> {
        let base = Url::parse(&config.api_base).map_err(|e| {
            ScreenError::Config(format!("invalid api_base '{}': {}", config.api_base, e))
        })?;
        if base.cannot_be_a_base() {
            return Err(ScreenError::Config(format!(
                "api_base '{}' cannot carry a path",
                config.api_base
            )));
        }
        Ok(Self {
            client,
            config,
            base,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Asks the backend whether it is up. Bounded by the fetch timeout.
    pub async fn check_health(&self) -> Result<HealthStatus> {
        let url = self.endpoint(&[HEALTH_PATH]);
        log::debug!("Checking backend health at {}", url);

        with_deadline(Operation::HealthCheck, self.config.fetch_timeout, async {
            let resp = self
                .client
                .get(url)
                .header(header::ACCEPT, "application/json")
                .send()
                .await?;

            let status = resp.status();
            let body = resp.text().await?;
            if !status.is_success() {
                log::warn!("Health check returned {}: {}", status, body);
                return Err(ScreenError::Server {
                    status: status.as_u16(),
                    message: format!("Health check failed: {}", status.as_u16()),
                });
            }
            parse_body(&body)
        })
        .await
    }

    /// `base` joined with `segments`, each percent-encoded as one path segment.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn post_job(&self, submission: &JobSubmission) -> Result<SubmitReceipt> {
        let url = self.endpoint(&[POST_JOB_PATH]);
        let form = build_form(submission)?;

        log::info!(
            "📡 Posting job to {} with {} resume(s)",
            url,
            submission.resumes.len()
        );
        for (i, file) in submission.resumes.iter().enumerate() {
            log::debug!(
                "File {}: {}, {} bytes, type: {}",
                i + 1,
                file.name,
                file.size(),
                file.media_type
            );
        }

        let start = Instant::now();
        let resp = self
            .client
            .post(url)
            .header(header::ACCEPT, "application/json")
            .multipart(form)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        log::info!(
            "📥 Job posting response status: {} ({}ms)",
            status,
            start.elapsed().as_millis()
        );

        if !status.is_success() {
            log::warn!("Job posting failed with {}: {}", status, body);
            return Err(ScreenError::Server {
                status: status.as_u16(),
                message: submit_failure_message(status, &body),
            });
        }

        parse_body(&body)
    }

    async fn list_resumes(&self) -> Result<Vec<ResumeResult>> {
        let url = self.endpoint(&[LIST_RESUMES_PATH]);
        let mut query: Vec<(&str, u32)> = Vec::new();
        if let Some(limit) = self.config.list_limit {
            query.push(("limit", limit));
        }
        if let Some(skip) = self.config.list_skip {
            query.push(("skip", skip));
        }

        log::debug!("Fetching resumes from {}", url);

        let start = Instant::now();
        let resp = self
            .client
            .get(url)
            .query(&query)
            .header(header::ACCEPT, "application/json")
            .header(header::CACHE_CONTROL, "no-cache")
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        log::debug!(
            "Resume listing response status: {} ({}ms)",
            status,
            start.elapsed().as_millis()
        );

        if !status.is_success() {
            log::warn!("Resume listing failed with {}: {}", status, body);
            return Err(ScreenError::Server {
                status: status.as_u16(),
                message: format!("Failed to fetch resumes: {}", status.as_u16()),
            });
        }

        resumes_from_value(parse_body(&body)?).ok_or_else(|| {
            ScreenError::Parse("expected a list of resumes".to_string())
        })
    }
}

impl ScreeningBackend for HttpBackend {
    async fn submit_job(&self, submission: &JobSubmission) -> Result<SubmitReceipt> {
        with_deadline(
            Operation::SubmitJob,
            self.config.submit_timeout,
            self.post_job(submission),
        )
        .await
    }

    async fn fetch_resumes(&self) -> Result<Vec<ResumeResult>> {
        with_deadline(
            Operation::FetchResumes,
            self.config.fetch_timeout,
            self.list_resumes(),
        )
        .await
    }

    fn download_url(&self, path: &str) -> Option<String> {
        if path.is_empty() {
            return None;
        }
        Some(self.endpoint(&[DOWNLOAD_PATH, path]).to_string())
    }
}

/// Runs `fut` under a one-shot deadline. Expiry drops the in-flight request.
async fn with_deadline<T, F>(operation: Operation, after: Duration, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    let timed_out = || {
        log::error!("Request to {} timed out after {:?}", operation, after);
        ScreenError::Timeout { operation, after }
    };

    match tokio::time::timeout(after, fut).await {
        Ok(Err(ScreenError::Network(e))) if e.is_timeout() => Err(timed_out()),
        Ok(result) => result,
        Err(_) => Err(timed_out()),
    }
}

fn build_form(submission: &JobSubmission) -> Result<Form> {
    let mut form = Form::new();

    let text_fields = [
        ("job_title", &submission.job_title),
        ("description", &submission.description),
        ("years_needed", &submission.years_needed),
    ];
    for (name, value) in text_fields {
        if let Some(value) = value {
            form = form.text(name, value.clone());
        }
    }

    for (name, value) in submission.weights.fields() {
        form = form.text(name, value.to_string());
    }

    for file in &submission.resumes {
        form = form.part("resumes", resume_part(file)?);
    }

    Ok(form)
}

/// The contents are shared with `file`, not copied.
fn resume_part(file: &ResumeFile) -> Result<Part> {
    let media_type = if file.media_type.parse::<mime_guess::Mime>().is_ok() {
        file.media_type.as_str()
    } else {
        log::warn!(
            "Unrecognised media type '{}' for {}, sending as {}",
            file.media_type,
            file.name,
            OCTET_STREAM
        );
        OCTET_STREAM
    };

    Part::stream_with_length(Body::from(file.bytes.clone()), file.size() as u64)
        .file_name(file.name.clone())
        .mime_str(media_type)
        .map_err(|e| {
            ScreenError::Validation(format!("Invalid media type for {}: {}", file.name, e))
        })
}

fn parse_body<T: serde::de::DeserializeOwned>(body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| ScreenError::Parse(e.to_string()))
}

/// Picks the most useful message out of a failed job posting.
///
/// A JSON body yields its `detail`. A plain-text body is shown as is. An
/// empty body falls back to the status code.
fn submit_failure_message(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(value) => detail_message(&value).unwrap_or_else(|| SUBMIT_FAILED.to_string()),
        Err(_) if body.trim().is_empty() => format!("HTTP error! Status: {}", status.as_u16()),
        Err(_) => body.to_string(),
    }
}

fn detail_message(value: &Value) -> Option<String> {
    match value.get("detail")? {
        Value::String(detail) if !detail.trim().is_empty() => Some(detail.clone()),
        // Request validation failures come back as a list of {loc, msg, type}.
        Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            (!messages.is_empty()).then(|| messages.join("; "))
        }
        _ => None,
    }
}
