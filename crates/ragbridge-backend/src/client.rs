// HTTP client for the RAG backend service.

use std::time::Duration;

use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::Url;
use serde_json::Value;

use crate::config::BackendConfig;
use crate::error::{BackendError, Result};
use crate::types::{IngestFormat, QueryRequest};

/// Typed client over the backend's HTTP surface (HTTP direct, no SDK).
///
/// Built once at startup and shared across requests; every method is a
/// single request/response exchange with no retries.
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url).map_err(|_| BackendError::InvalidBaseUrl(base_url.clone()))?;

        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Start a streaming query. Returns the raw response so the caller can
    /// relay its body; the status is validated here and a non-2xx answer
    /// fails without touching the body.
    pub async fn stream_query(&self, request: &QueryRequest) -> Result<reqwest::Response> {
        let response = self
            .http
            .post(self.endpoint("/query/stream"))
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Status(status));
        }

        Ok(response)
    }

    /// Forward a file to the ingestion endpoint matching its format.
    pub async fn upload(
        &self,
        format: IngestFormat,
        filename: &str,
        contents: Bytes,
    ) -> Result<Value> {
        let part = Part::stream(contents).file_name(filename.to_string());
        let form = Form::new().part("file", part);

        let response = self
            .http
            .post(self.endpoint(format.ingestion_path()))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Status(status));
        }

        Ok(response.json().await?)
    }

    /// Fetch the backend's file listing as-is.
    pub async fn list_files(&self) -> Result<Value> {
        let response = self.http.get(self.endpoint("/files/list")).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Status(status));
        }

        Ok(response.json().await?)
    }

    /// Ask the backend to delete a stored file by its URL.
    pub async fn delete_file(&self, file_url: &str) -> Result<Value> {
        let response = self
            .http
            .delete(self.endpoint("/files/delete"))
            .json(&serde_json::json!({ "file_url": file_url }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Status(status));
        }

        Ok(response.json().await?)
    }
}
