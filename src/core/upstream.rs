use crate::core::credentials::ApiCredentials;
use crate::server::types::{OutputFormat, ProcessingMode, VectorizeResult};
use crate::utils::constants::{
    CREDITS_CALCULATED_HEADER, CREDITS_CHARGED_HEADER, DEFAULT_CONTENT_TYPE, SVG_CONTENT_TYPE,
};
use base64::prelude::*;
use bytes::Bytes;
use reqwest::header::{AUTHORIZATION, HeaderMap};
use reqwest::multipart::{Form, Part};
use serde_json::{Value, json};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("Vectorizer API credentials are not configured")]
    ConfigurationMissing,

    #[error("{0}")]
    Validation(String),

    // Upstream replied with a non-success status; its status and body are
    // relayed verbatim so the caller keeps the diagnostic detail.
    #[error("Upstream returned status {status}")]
    Upstream { status: u16, body: Value },

    #[error("Upstream request failed: {0}")]
    Network(#[from] reqwest::Error),
}

#[derive(Debug, Clone)]
pub enum ImageSource {
    File {
        bytes: Bytes,
        filename: String,
        content_type: String,
    },
    Url(String),
}

#[derive(Debug, Clone)]
pub struct VectorizeRequest {
    pub image: ImageSource,
    pub mode: ProcessingMode,
    pub output_format: OutputFormat,
}

#[derive(Clone)]
pub struct UpstreamClient {
    http_client: reqwest::Client,
    base_url: String,
    auth_header: String,
}

impl UpstreamClient {
    pub fn new(http_client: reqwest::Client, base_url: impl Into<String>, credentials: &ApiCredentials) -> Self {
        let base_url = base_url.into();
        Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_header: credentials.authorization_header(),
        }
    }

    // Account endpoint passthrough. No field massaging here; the client
    // normalizes on its side.
    pub async fn account(&self) -> Result<(u16, Value), ProxyError> {
        let response = self
            .http_client
            .get(format!("{}/account", self.base_url))
            .header(AUTHORIZATION, &self.auth_header)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body: Value = response.json().await?;
        Ok((status, body))
    }

    pub async fn vectorize(&self, request: VectorizeRequest) -> Result<VectorizeResult, ProxyError> {
        let mut form = Form::new();

        match request.image {
            ImageSource::File {
                bytes,
                filename,
                content_type,
            } => {
                let part = Part::bytes(bytes.to_vec())
                    .file_name(filename)
                    .mime_str(&content_type)
                    .map_err(|_| {
                        ProxyError::Validation(format!(
                            "Invalid image content type: {}",
                            content_type
                        ))
                    })?;
                form = form.part("image", part);
            }
            ImageSource::Url(image_url) => {
                form = form.text("image.url", image_url);
            }
        }

        form = form
            .text("mode", request.mode.as_str())
            .text("output.file_format", request.output_format.as_str());

        let response = self
            .http_client
            .post(format!("{}/vectorize", self.base_url))
            .header(AUTHORIZATION, &self.auth_header)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let credits_charged = credit_header(response.headers(), CREDITS_CHARGED_HEADER);
        let credits_calculated = credit_header(response.headers(), CREDITS_CALCULATED_HEADER);

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let body = serde_json::from_str(&error_text).unwrap_or_else(|_| {
                if error_text.is_empty() {
                    json!({"error": "Vectorization failed"})
                } else {
                    json!({"error": error_text})
                }
            });
            tracing::error!("Upstream vectorize failed: {} - {}", status, body);
            return Err(ProxyError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();

        // The upstream's declared media type is authoritative: errors come
        // back as JSON no matter which output format was requested, so the
        // text/binary split cannot key off the request.
        if is_text_content(&content_type) {
            let content = response.text().await?;
            Ok(VectorizeResult {
                content,
                content_type,
                is_base64: false,
                credits_charged,
                credits_calculated,
            })
        } else {
            let bytes = response.bytes().await?;
            Ok(VectorizeResult {
                content: BASE64_STANDARD.encode(&bytes),
                content_type,
                is_base64: true,
                credits_charged,
                credits_calculated,
            })
        }
    }
}

// `text/*` or SVG, parameters ignored: "image/svg+xml; charset=utf-8" is
// still text.
pub fn is_text_content(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();
    essence.starts_with("text/") || essence == SVG_CONTENT_TYPE
}

// Absent, non-UTF-8 or non-numeric headers all count as zero credits.
pub fn credit_header(headers: &HeaderMap, name: &str) -> f64 {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<f64>().ok())
        .unwrap_or(0.0)
}
