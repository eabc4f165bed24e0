//! HTTP client for the table-extraction service.
//!
//! Two endpoints:
//! - `POST /upload` with multipart `file`
//! - `POST /extract-table` with multipart `file` (JPEG) and `selection` (JSON)
//!
//! [`TableBackend`] is the seam the workbench talks through; [`HttpBackend`]
//! is the `reqwest` implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, instrument};
use url::Url;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::extract::{ExtractResponse, ExtractionRequest, SNAPSHOT_FILE_NAME};
use crate::intake::IntakeFile;

/// What `/upload` answered. Every field is optional; the body is only logged.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UploadReceipt {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// The extraction service.
#[async_trait]
pub trait TableBackend: Send + Sync {
    /// Store the original file server-side.
    async fn upload(&self, file: &IntakeFile) -> Result<UploadReceipt>;

    /// Extract the table inside the selected region of the snapshot.
    async fn extract_table(&self, request: ExtractionRequest) -> Result<ExtractResponse>;
}

/// `reqwest`-backed [`TableBackend`].
pub struct HttpBackend {
    client: Client,
    base: Url,
}

impl HttpBackend {
    /// Build a client for the endpoint and timeouts in `config`.
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            // Keep connections alive for reuse
            .pool_max_idle_per_host(4)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .tcp_nodelay(true)
            .use_rustls_tls()
            .gzip(true)
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            // Extraction runs OCR server-side
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("tablesnap/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base: base_url(&config.endpoint)?,
        })
    }

    /// Resolve an endpoint path against the base URL.
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base.join(path)?)
    }
}

#[async_trait]
impl TableBackend for HttpBackend {
    #[instrument(skip(self, file), fields(name = %file.name, bytes = file.bytes.len()))]
    async fn upload(&self, file: &IntakeFile) -> Result<UploadReceipt> {
        let part = Part::bytes(file.bytes.to_vec())
            .file_name(file.name.clone())
            .mime_str(&file.media_type)?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(self.endpoint("upload")?)
            .multipart(form)
            .send()
            .await?;
        let status = response.status();
        let body = response.bytes().await?;
        let receipt = serde_json::from_slice::<UploadReceipt>(&body);

        match receipt {
            Ok(receipt) if status.is_success() && receipt.error.is_none() => {
                info!(%status, ?receipt, "upload finished");
                Ok(receipt)
            }
            Ok(receipt) => Err(Error::Upload {
                status: status.as_u16(),
                message: receipt.error.unwrap_or_else(|| status.to_string()),
            }),
            Err(e) if status.is_success() => Err(e.into()),
            Err(_) => Err(Error::Upload {
                status: status.as_u16(),
                message: status.to_string(),
            }),
        }
    }

    #[instrument(skip(self, request), fields(selection = ?request.selection))]
    async fn extract_table(&self, request: ExtractionRequest) -> Result<ExtractResponse> {
        let selection = request.selection.to_json()?;
        let part = Part::bytes(request.snapshot)
            .file_name(SNAPSHOT_FILE_NAME)
            .mime_str("image/jpeg")?;
        let form = Form::new().part("file", part).text("selection", selection);

        debug!("posting extraction request");
        let response = self
            .client
            .post(self.endpoint("extract-table")?)
            .multipart(form)
            .send()
            .await?;

        // Failures come back as 4xx/5xx with a JSON body; read it either way.
        let status = response.status();
        let body = response.bytes().await?;
        let parsed: ExtractResponse = serde_json::from_slice(&body)?;
        info!(%status, success = parsed.success, "extraction response received");
        Ok(parsed)
    }
}

/// Parse the endpoint, making sure relative joins land under its path.
fn base_url(endpoint: &str) -> Result<Url> {
    let mut url = Url::parse(endpoint)?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
