use crate::{
    backend::ImageBackend,
    config::ServerConfig,
    error::{Result, StudioError},
    models::{
        error_message, DownloadRequest, DownloadedImage, GenerateRequest, GenerationResponse,
        ShareStatus, GENERIC_DOWNLOAD_ERROR, SHARE_STATUS_HEADER,
    },
};
use async_trait::async_trait;
use reqwest::{header, Client};
use serde_json::Value;

pub const GENERATE_PATH: &str = "/generate";
pub const DOWNLOAD_PATH: &str = "/download-and-pin";

#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    server: ServerConfig,
}

impl HttpBackend {
    pub fn new(server: ServerConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("pinforge/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| StudioError::Config(format!("cannot build HTTP client: {}", e)))?;

        Ok(Self { client, server })
    }

    fn build_headers(&self) -> header::HeaderMap {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );
        headers
    }
}

#[async_trait]
impl ImageBackend for HttpBackend {
    async fn generate(&self, prompt: &str) -> Result<GenerationResponse> {
        let url = self.server.endpoint(GENERATE_PATH);
        log::debug!("Sending generation request to {}", url);

        let response = self
            .client
            .post(&url)
            .headers(self.build_headers())
            .json(&GenerateRequest {
                prompt: prompt.to_string(),
            })
            .send()
            .await
            .map_err(|e| StudioError::Request(format!("generation request failed: {}", e)))?;

        let status = response.status();
        log::debug!("Generation response status: {}", status);

        // 202 Accepted carries the pending body and is handled below.
        if !status.is_success() {
            let message = response
                .json::<Value>()
                .await
                .ok()
                .as_ref()
                .and_then(error_message);
            return Err(StudioError::Transport {
                status: status.as_u16(),
                message,
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| StudioError::Response(format!("invalid generation body: {}", e)))?;

        Ok(GenerationResponse::from_body(&body))
    }

    async fn download_and_pin(&self, image_url: &str) -> Result<DownloadedImage> {
        let url = self.server.endpoint(DOWNLOAD_PATH);
        log::debug!("Requesting download of {}", image_url);

        let response = self
            .client
            .post(&url)
            .headers(self.build_headers())
            .json(&DownloadRequest {
                image_url: image_url.to_string(),
            })
            .send()
            .await
            .map_err(|e| StudioError::Request(format!("download request failed: {}", e)))?;

        if !response.status().is_success() {
            let message = response
                .json::<Value>()
                .await
                .ok()
                .as_ref()
                .and_then(error_message)
                .unwrap_or_else(|| GENERIC_DOWNLOAD_ERROR.to_string());
            return Err(StudioError::Application(message));
        }

        let share_status = ShareStatus::from_header(
            response
                .headers()
                .get(SHARE_STATUS_HEADER)
                .and_then(|v| v.to_str().ok()),
        );
        let content_disposition = response
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .map(ToOwned::to_owned);
        log::debug!("Share status for {}: {:?}", image_url, share_status);

        let bytes = response
            .bytes()
            .await
            .map_err(|e| StudioError::Response(format!("failed to read image body: {}", e)))?;

        Ok(DownloadedImage {
            bytes: bytes.to_vec(),
            content_disposition,
            share_status,
        })
    }
}
