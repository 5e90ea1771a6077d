use serde::{Deserialize, Serialize};

pub const SHARE_STATUS_HEADER: &str = "X-Pinterest-Status";
pub const SHARE_SUCCESS: &str = "success";
pub const GENERIC_DOWNLOAD_ERROR: &str = "Failed to process image";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DownloadRequest {
    pub image_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareStatus {
    Shared,
    NotShared,
}

impl ShareStatus {
    /// Only the exact header value `success` counts as shared.
    pub fn from_header(value: Option<&str>) -> Self {
        match value {
            Some(SHARE_SUCCESS) => ShareStatus::Shared,
            _ => ShareStatus::NotShared,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedImage {
    pub bytes: Vec<u8>,
    pub content_disposition: Option<String>,
    pub share_status: ShareStatus,
}

impl DownloadedImage {
    pub fn filename_or(&self, fallback: &str) -> String {
        resolve_filename(self.content_disposition.as_deref(), fallback)
    }
}

/// Picks the name after `filename=` in a `Content-Disposition` value,
/// stripping quotes and any trailing parameters. Falls back when the
/// header is absent or carries no usable name.
pub fn resolve_filename(content_disposition: Option<&str>, fallback: &str) -> String {
    content_disposition
        .and_then(|header| header.split_once("filename=").map(|(_, rest)| rest))
        .map(|rest| rest.split(';').next().unwrap_or_default())
        .map(|name| name.trim().trim_matches('"').trim())
        .filter(|name| !name.is_empty())
        .map(ToOwned::to_owned)
        .unwrap_or_else(|| fallback.to_string())
}
