pub mod http;

use crate::{
    error::Result,
    models::{DownloadedImage, GenerationResponse},
};
use async_trait::async_trait;
use std::sync::Arc;

pub use http::HttpBackend;

/// The generation/share service as the controller sees it.
#[async_trait]
pub trait ImageBackend: Send + Sync {
    /// `POST /generate`. Transport failures other than `202 Accepted` are
    /// returned as errors; everything else is classified from the body.
    async fn generate(&self, prompt: &str) -> Result<GenerationResponse>;

    /// `POST /download-and-pin`. Fails with the server's `error` message,
    /// or a generic one, when the response is not successful.
    async fn download_and_pin(&self, image_url: &str) -> Result<DownloadedImage>;
}

#[async_trait]
impl<T> ImageBackend for Arc<T>
where
    T: ImageBackend + ?Sized,
{
    async fn generate(&self, prompt: &str) -> Result<GenerationResponse> {
        self.as_ref().generate(prompt).await
    }

    async fn download_and_pin(&self, image_url: &str) -> Result<DownloadedImage> {
        self.as_ref().download_and_pin(image_url).await
    }
}
