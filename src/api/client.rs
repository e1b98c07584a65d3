use crate::api::parser;
use crate::app::{InstallAck, JobStatus, PathInfo, Summary, ViewQuery};
use crate::error::ApiError;
use async_trait::async_trait;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// The six operations the skills manager server exposes. The event loop and
/// poller only see this trait; tests substitute their own implementation.
#[async_trait]
pub trait SkillsApi: Send + Sync {
    async fn fetch_summary(&self, query: ViewQuery) -> Result<Summary, ApiError>;
    async fn start_install(&self, query: ViewQuery, refresh: bool) -> Result<InstallAck, ApiError>;
    async fn fetch_job(&self) -> Result<JobStatus, ApiError>;
    async fn fetch_log(&self, lines: u32) -> Result<String, ApiError>;
    /// Returns the report pretty-printed for display.
    async fn fetch_report(&self) -> Result<String, ApiError>;
    async fn fetch_paths(&self) -> Result<PathInfo, ApiError>;
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct InstallRequest<'a> {
    view: &'a str,
    limit: u32,
    resolve_missing: bool,
    refresh: bool,
}

pub struct HttpClient {
    base: String,
    http: reqwest::Client,
}

impl HttpClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            base: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }
}

#[async_trait]
impl SkillsApi for HttpClient {
    async fn fetch_summary(&self, query: ViewQuery) -> Result<Summary, ApiError> {
        let res = self
            .http
            .get(self.endpoint("/api/summary"))
            .query(&[
                ("view", query.view.as_str().to_string()),
                ("limit", query.limit.to_string()),
            ])
            .send()
            .await?;
        let status = res.status();
        let body = res.text().await?;
        if !status.is_success() {
            return Err(ApiError::server(parser::error_message(
                &body,
                &format!("summary request failed ({status})"),
            )));
        }
        parser::parse_summary(&body)
    }

    async fn start_install(&self, query: ViewQuery, refresh: bool) -> Result<InstallAck, ApiError> {
        let request = InstallRequest {
            view: query.view.as_str(),
            limit: query.limit,
            // Missing skills are always resolved when a job runs; `refresh`
            // additionally re-resolves ones already installed.
            resolve_missing: true,
            refresh,
        };
        let res = self
            .http
            .post(self.endpoint("/api/install"))
            .json(&request)
            .send()
            .await?;
        let status = res.status();
        let body = res.text().await?;
        if !status.is_success() {
            return Err(ApiError::server(parser::error_message(
                &body,
                &format!("install request failed ({status})"),
            )));
        }
        parser::parse_install_ack(&body)
    }

    async fn fetch_job(&self) -> Result<JobStatus, ApiError> {
        let res = self.http.get(self.endpoint("/api/job")).send().await?;
        let status = res.status();
        let body = res.text().await?;
        if !status.is_success() {
            return Err(ApiError::server(parser::error_message(
                &body,
                &format!("job status request failed ({status})"),
            )));
        }
        parser::parse_job(&body)
    }

    async fn fetch_log(&self, lines: u32) -> Result<String, ApiError> {
        let res = self
            .http
            .get(self.endpoint("/api/log"))
            .query(&[("lines", lines.to_string())])
            .send()
            .await?;
        let status = res.status();
        if !status.is_success() {
            return Err(ApiError::server(format!("log request failed ({status})")));
        }
        Ok(res.text().await?)
    }

    async fn fetch_report(&self) -> Result<String, ApiError> {
        let res = self.http.get(self.endpoint("/api/report")).send().await?;
        if !res.status().is_success() {
            // Any non-2xx means the server has nothing to show yet.
            return Err(ApiError::NoReport);
        }
        let body = res.text().await?;
        parser::pretty_report(&body)
    }

    async fn fetch_paths(&self) -> Result<PathInfo, ApiError> {
        let res = self.http.get(self.endpoint("/api/paths")).send().await?;
        let status = res.status();
        let body = res.text().await?;
        if !status.is_success() {
            return Err(ApiError::server(format!("paths request failed ({status})")));
        }
        parser::parse_paths(&body)
    }
}
