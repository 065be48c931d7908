//! Image uploads to the media collaborator.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use villa_core::error::CoreError;

use super::{ensure_success, ImageUpload, MediaStore, UpstreamError, MEDIA_SERVICE};

/// Response body of `POST /media/upload`.
#[derive(Debug, Deserialize)]
struct UploadResponse {
    url: Option<String>,
}

/// Forwards images to the media service as multipart `file` uploads.
pub struct HttpMediaStore {
    client: reqwest::Client,
    base_url: String,
}

impl HttpMediaStore {
    pub fn new(client: reqwest::Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    async fn post_upload(&self, part: Part) -> Result<String, UpstreamError> {
        let form = Form::new().part("file", part);
        let response = self
            .client
            .post(format!("{}/media/upload", self.base_url))
            .multipart(form)
            .send()
            .await?;

        let body = ensure_success(response)
            .await?
            .json::<UploadResponse>()
            .await?;
        body.url
            .filter(|url| !url.is_empty())
            .ok_or_else(|| UpstreamError::Malformed("no image URL returned".into()))
    }
}

#[async_trait]
impl MediaStore for HttpMediaStore {
    async fn upload(&self, image: ImageUpload) -> Result<String, CoreError> {
        let part = Part::bytes(image.bytes)
            .file_name(image.file_name)
            .mime_str(&image.content_type)
            .map_err(|_| {
                CoreError::Validation(format!(
                    "Invalid image content type '{}'",
                    image.content_type
                ))
            })?;

        self.post_upload(part)
            .await
            .map_err(|e| e.into_core(MEDIA_SERVICE))
    }
}
