//! Job board client: typed access to the Career Navigator REST API.
//!
//! Jobs and candidate profiles are owned by that API; this service only reads them,
//! forwarding the caller's `Authorization` header unchanged.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header::AUTHORIZATION, Client, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::envelope::{Envelope, JobsPage};
use crate::models::job::{CandidateProfile, JobPosting};

const JOBS_PATH: &str = "/api/jobs";
const PROFILE_PATH: &str = "/api/auth/profile";
const MAX_RETRIES: u32 = 3;
const RETRY_BACKOFF: Duration = Duration::from_secs(1);

#[derive(Debug, Error)]
pub enum JobBoardError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Job board rejected the credentials")]
    Unauthorized,

    #[error("Job board reported failure: {0}")]
    Rejected(String),
}

/// Read access to the job board. Implemented over HTTP in production and by fakes in tests.
#[async_trait]
pub trait JobBoard: Send + Sync {
    async fn fetch_profile(&self, authorization: &str) -> Result<CandidateProfile, JobBoardError>;

    async fn fetch_jobs(
        &self,
        authorization: &str,
        search: Option<&str>,
    ) -> Result<Vec<JobPosting>, JobBoardError>;
}

#[derive(Clone)]
pub struct HttpJobBoard {
    client: Client,
    base_url: String,
    retry_backoff: Duration,
}

impl HttpJobBoard {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, JobBoardError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            retry_backoff: RETRY_BACKOFF,
        })
    }

    #[cfg(test)]
    fn with_retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff = backoff;
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GETs `path` and unwraps the `{ success, data }` envelope.
    /// Retries on transport errors, 429 and 5xx with exponential backoff.
    async fn get_data<T: DeserializeOwned>(
        &self,
        path: &str,
        authorization: &str,
        query: &[(&str, &str)],
    ) -> Result<T, JobBoardError> {
        let mut last_error: Option<JobBoardError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // 1s, 2s
                let delay = self.retry_backoff * (1 << (attempt - 1));
                warn!(
                    "Job board call to {} failed (attempt {}), retrying after {}ms...",
                    path,
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .get(self.url(path))
                .header(AUTHORIZATION, authorization)
                .query(query)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(JobBoardError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("Job board returned {} for {}: {}", status, path, body);
                last_error = Some(JobBoardError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
                return Err(JobBoardError::Unauthorized);
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<Envelope<serde_json::Value>>(&body)
                    .ok()
                    .and_then(|e| e.message)
                    .unwrap_or(body);
                return Err(JobBoardError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let envelope: Envelope<T> = response.json().await?;
            debug!("Job board call to {} succeeded", path);
            return unwrap_envelope(envelope);
        }

        Err(last_error.unwrap_or(JobBoardError::Api {
            status: StatusCode::SERVICE_UNAVAILABLE.as_u16(),
            message: format!("gave up after {MAX_RETRIES} attempts"),
        }))
    }
}

fn unwrap_envelope<T>(envelope: Envelope<T>) -> Result<T, JobBoardError> {
    if !envelope.success {
        return Err(JobBoardError::Rejected(
            envelope
                .message
                .unwrap_or_else(|| "request was not successful".to_string()),
        ));
    }
    envelope
        .data
        .ok_or_else(|| JobBoardError::Rejected("response carried no data".to_string()))
}

#[async_trait]
impl JobBoard for HttpJobBoard {
    async fn fetch_profile(&self, authorization: &str) -> Result<CandidateProfile, JobBoardError> {
        self.get_data(PROFILE_PATH, authorization, &[]).await
    }

    async fn fetch_jobs(
        &self,
        authorization: &str,
        search: Option<&str>,
    ) -> Result<Vec<JobPosting>, JobBoardError> {
        let query: Vec<(&str, &str)> = search.map(|s| vec![("search", s)]).unwrap_or_default();
        let page: JobsPage = self.get_data(JOBS_PATH, authorization, &query).await?;
        let jobs = page.jobs;
        debug!("Fetched {} jobs from job board", jobs.len());
        Ok(jobs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    /// Serves `script` in order, one `(status, body)` per request, and counts hits.
    async fn serve_script(script: Vec<(u16, Value)>) -> (String, Arc<AtomicUsize>) {
        let script = Arc::new(Mutex::new(VecDeque::from(script)));
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();

        let app = axum::Router::new().fallback(move || {
            let script = script.clone();
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                let (status, body) = script
                    .lock()
                    .unwrap()
                    .pop_front()
                    .unwrap_or((500, json!({ "success": false })));
                (
                    axum::http::StatusCode::from_u16(status).unwrap(),
                    axum::Json(body),
                )
            }
        });

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{addr}"), hits)
    }

    fn board(base_url: &str) -> HttpJobBoard {
        HttpJobBoard::new(base_url, Duration::from_secs(5))
            .unwrap()
            .with_retry_backoff(Duration::from_millis(1))
    }

    fn profile_ok() -> (u16, Value) {
        (200, json!({ "success": true, "data": { "skills": ["rust"] } }))
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let board = HttpJobBoard::new("http://localhost:5000/", Duration::from_secs(5)).unwrap();
        assert_eq!(board.url(JOBS_PATH), "http://localhost:5000/api/jobs");
    }

    #[test]
    fn test_unwrap_successful_jobs_envelope() {
        let envelope: Envelope<JobsPage> = serde_json::from_value(json!({
            "success": true,
            "data": { "jobs": [ { "_id": "1", "title": "Dev", "skills": ["Go"] } ] }
        }))
        .unwrap();
        let page = unwrap_envelope(envelope).unwrap();
        let jobs = page.jobs;
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].skills, vec!["Go"]);
    }

    #[test]
    fn test_unwrap_failed_envelope_keeps_message() {
        let envelope: Envelope<CandidateProfile> = serde_json::from_value(json!({
            "success": false,
            "message": "User not found"
        }))
        .unwrap();
        match unwrap_envelope(envelope) {
            Err(JobBoardError::Rejected(msg)) => assert_eq!(msg, "User not found"),
            other => panic!("expected Rejected, got {other:?}"),
        }
    }

    #[test]
    fn test_unwrap_envelope_without_data_is_rejected() {
        let envelope: Envelope<CandidateProfile> =
            serde_json::from_value(json!({ "success": true })).unwrap();
        assert!(matches!(
            unwrap_envelope(envelope),
            Err(JobBoardError::Rejected(_))
        ));
    }

    #[tokio::test]
    async fn test_retries_server_error_then_succeeds() {
        let (url, hits) = serve_script(vec![(503, json!({})), profile_ok()]).await;

        let profile = board(&url).fetch_profile("Bearer t").await.unwrap();

        assert_eq!(profile.skills, vec!["rust"]);
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_retries_rate_limit_and_server_errors() {
        let (url, hits) =
            serve_script(vec![(429, json!({})), (500, json!({})), profile_ok()]).await;

        assert!(board(&url).fetch_profile("Bearer t").await.is_ok());
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_retries() {
        let (url, hits) = serve_script(vec![(503, json!({})); 3]).await;

        let err = board(&url).fetch_profile("Bearer t").await.unwrap_err();

        assert!(matches!(err, JobBoardError::Api { status: 503, .. }));
        assert_eq!(hits.load(Ordering::SeqCst), MAX_RETRIES as usize);
    }

    #[tokio::test]
    async fn test_unauthorized_and_forbidden_are_not_retried() {
        for status in [401, 403] {
            let (url, hits) = serve_script(vec![(status, json!({ "success": false }))]).await;

            let err = board(&url).fetch_profile("Bearer t").await.unwrap_err();

            assert!(matches!(err, JobBoardError::Unauthorized), "status {status}");
            assert_eq!(hits.load(Ordering::SeqCst), 1);
        }
    }

    #[tokio::test]
    async fn test_other_client_error_keeps_upstream_message() {
        let (url, hits) =
            serve_script(vec![(404, json!({ "success": false, "message": "Not found" }))]).await;

        let err = board(&url).fetch_profile("Bearer t").await.unwrap_err();

        match err {
            JobBoardError::Api { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "Not found");
            }
            other => panic!("expected Api, got {other:?}"),
        }
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_ok_status_with_failed_envelope_is_rejected() {
        let (url, _) =
            serve_script(vec![(200, json!({ "success": false, "message": "Profile missing" }))])
                .await;

        let err = board(&url).fetch_profile("Bearer t").await.unwrap_err();

        assert!(matches!(err, JobBoardError::Rejected(msg) if msg == "Profile missing"));
    }

    #[tokio::test]
    async fn test_fetch_jobs_skips_undecodable_records() {
        let (url, _) = serve_script(vec![(
            200,
            json!({
                "success": true,
                "data": { "jobs": [
                    { "_id": "1", "id": "1", "skills": ["Go", null], "createdAt": 1718452800000_i64 },
                    "not a job",
                    { "_id": "2", "skills": ["Rust"] }
                ] }
            }),
        )])
        .await;

        let jobs = board(&url).fetch_jobs("Bearer t", Some("go")).await.unwrap();

        let ids: Vec<&str> = jobs.iter().map(|j| j.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
        assert_eq!(jobs[0].skills, vec!["Go"]);
    }
}
