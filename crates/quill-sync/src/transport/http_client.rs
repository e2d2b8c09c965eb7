//! HTTP client with finite timeouts for snapshot upload and download.
//!
//! A timeout or refused connection is a normal failure, not a fatal one:
//! the caller records it and the next scheduled cycle is the retry.

use std::time::Duration;

use quill_core::errors::{QuillError, QuillResult, SyncError};

/// Upload endpoint path, relative to the configured base URL.
const UPLOAD_PATH: &str = "/upload_model";
/// Download endpoint path.
const DOWNLOAD_PATH: &str = "/download_aggregated_model";

/// Multipart field carrying the snapshot blob.
const FIELD_MODEL_FILE: &str = "model_file";
/// Multipart field carrying the device identifier.
const FIELD_DEVICE_ID: &str = "device_id";

/// Configuration for the transport layer.
#[derive(Debug, Clone)]
pub struct SyncClientConfig {
    /// Base URL of the aggregator.
    pub base_url: String,
    /// Connection timeout.
    pub connect_timeout: Duration,
    /// Request (read/write) timeout.
    pub request_timeout: Duration,
}

impl Default for SyncClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            connect_timeout: Duration::from_secs(30),
            request_timeout: Duration::from_secs(60),
        }
    }
}

/// Convert a transport failure into a SyncError::Network.
fn net_err(reason: String) -> QuillError {
    SyncError::Network { reason }.into()
}

/// Wire-level client for the aggregator's two endpoints.
#[derive(Debug)]
pub struct SyncClient {
    config: SyncClientConfig,
    client: reqwest::blocking::Client,
}

impl SyncClient {
    pub fn new(config: SyncClientConfig) -> QuillResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| net_err(e.to_string()))?;
        Ok(Self { config, client })
    }

    /// POST the snapshot blob as a multipart form. Any 2xx means accepted.
    pub fn upload(&self, blob: Vec<u8>, device_id: &str) -> QuillResult<()> {
        let url = format!("{}{UPLOAD_PATH}", self.config.base_url);
        let form = reqwest::blocking::multipart::Form::new()
            .part(
                FIELD_MODEL_FILE,
                reqwest::blocking::multipart::Part::bytes(blob).file_name("model.quill"),
            )
            .text(FIELD_DEVICE_ID, device_id.to_string());

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .map_err(|e| net_err(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(SyncError::HttpStatus {
                status: status.as_u16(),
            }
            .into())
        }
    }

    /// GET the aggregated snapshot. Success is a 2xx with a non-empty body.
    pub fn download(&self) -> QuillResult<Vec<u8>> {
        let url = format!("{}{DOWNLOAD_PATH}", self.config.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| net_err(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::HttpStatus {
                status: status.as_u16(),
            }
            .into());
        }

        let bytes = response.bytes().map_err(|e| net_err(e.to_string()))?;
        if bytes.is_empty() {
            return Err(SyncError::EmptyBody.into());
        }
        Ok(bytes.to_vec())
    }
}
