//! Blocking HTTP client for the detection endpoint.
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::blocking::multipart::{Form, Part};
use thiserror::Error;

use crate::client::detect_response::{DetectResponse, DetectResult, HealthResponse};
use crate::shared::constants::{FAKE_MEDIA_FIELD, REAL_MEDIA_FIELD};
use crate::shared::media::{mime_type, sanitize_filename};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

#[derive(Error, Debug)]
pub enum DetectError {
    #[error("Cannot connect to the server. Please ensure the server is running at {base_url}")]
    Connect { base_url: String },
    #[error("Network error. Please check your internet connection.")]
    Network(#[source] reqwest::Error),
    #[error("Server Error ({status}): {body}")]
    Server { status: u16, body: String },
    #[error("Invalid response format from server")]
    InvalidResponse,
    #[error("Could not read {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DetectError {
    /// Banner text. Transport failures are shown as is, everything else is
    /// prefixed with `Error: `.
    pub fn user_message(&self) -> String {
        match self {
            DetectError::Connect { .. } | DetectError::Network(_) => self.to_string(),
            _ => format!("Error: {self}"),
        }
    }
}

pub struct DetectClient {
    base_url: String,
    http: reqwest::blocking::Client,
}

impl DetectClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, DetectError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(DetectError::Network)?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Upload both files in one multipart POST and parse the score.
    pub fn detect(&self, real: &Path, fake: &Path) -> Result<DetectResult, DetectError> {
        let form = Form::new()
            .part(REAL_MEDIA_FIELD, file_part(real)?)
            .part(FAKE_MEDIA_FIELD, file_part(fake)?);

        let url = format!("{}/detect", self.base_url);
        log::info!("POST {url}");
        let response = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .map_err(|e| self.transport_error(e))?;

        let response = check_status(response)?;
        let body: DetectResponse = response
            .json()
            .map_err(|_| DetectError::InvalidResponse)?;
        let result = DetectResult::from_response(body)?;
        log::info!(
            "Similarity {:.4}, likely deepfake: {}",
            result.cosine_similarity,
            result.is_likely_deepfake
        );
        Ok(result)
    }

    pub fn health(&self) -> Result<HealthResponse, DetectError> {
        let url = format!("{}/health", self.base_url);
        let response = self
            .http
            .get(&url)
            .send()
            .map_err(|e| self.transport_error(e))?;
        check_status(response)?
            .json()
            .map_err(|_| DetectError::InvalidResponse)
    }

    fn transport_error(&self, e: reqwest::Error) -> DetectError {
        log::error!("Request to {} failed: {e}", self.base_url);
        if e.is_connect() {
            DetectError::Connect {
                base_url: self.base_url.clone(),
            }
        } else {
            DetectError::Network(e)
        }
    }
}

fn file_part(path: &Path) -> Result<Part, DetectError> {
    let bytes = std::fs::read(path).map_err(|source| DetectError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    let name = path
        .file_name()
        .map(|n| sanitize_filename(&n.to_string_lossy()))
        .unwrap_or_default();
    Part::bytes(bytes)
        .file_name(name)
        .mime_str(mime_type(path))
        .map_err(DetectError::Network)
}

fn check_status(
    response: reqwest::blocking::Response,
) -> Result<reqwest::blocking::Response, DetectError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    let body = if body.is_empty() {
        "No response from server".to_string()
    } else {
        body
    };
    Err(DetectError::Server {
        status: status.as_u16(),
        body,
    })
}
