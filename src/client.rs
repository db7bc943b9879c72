use crate::server::types::{LoginRequest, OutputFormat, ProcessingMode, VectorizeResult};
use base64::prelude::*;
use reqwest::multipart::{Form, Part};
use serde_json::{Value, json};
use thiserror::Error;

// Programmatic consumer of the proxy surface. This is the module the
// browser bundle embeds; anything driving the proxy from Rust (tests,
// a CLI) goes through it too.

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    // message comes from the error payload when it has one, else the
    // generic "Error {status}: {reason}" fallback
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Failed to decode vectorized content: {0}")]
    Decode(#[from] base64::DecodeError),
}

#[derive(Debug, Clone)]
pub enum ImageInput {
    File {
        bytes: Vec<u8>,
        filename: String,
        content_type: String,
    },
    Url(String),
}

#[derive(Debug, Clone, Copy)]
pub struct VectorizeOptions {
    pub mode: ProcessingMode,
    pub output_format: OutputFormat,
}

// Decoded, ready for display or download; `data` is raw bytes either way.
#[derive(Debug, Clone)]
pub struct VectorizedArtifact {
    pub data: Vec<u8>,
    pub content_type: String,
    pub is_text: bool,
    pub credits_charged: f64,
    pub credits_calculated: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AccountStatus {
    pub subscription_plan: String,
    pub subscription_state: String,
    pub credits: f64,
}

pub struct VectorizerClient {
    http_client: reqwest::Client,
    base_url: String,
    authenticated: bool,
}

impl VectorizerClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            http_client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            authenticated: false,
        }
    }

    pub async fn auth_required(&self) -> Result<bool, ClientError> {
        let response = self
            .http_client
            .get(format!("{}/api/auth/config", self.base_url))
            .send()
            .await?;
        let body: Value = response.json().await?;
        Ok(body["authRequired"].as_bool().unwrap_or(false))
    }

    // A rejected login is a `false` return, not an error; the flag is only
    // ever set on success.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<bool, ClientError> {
        let response = self
            .http_client
            .post(format!("{}/api/auth/login", self.base_url))
            .json(&LoginRequest {
                username: username.to_string(),
                password: password.to_string(),
            })
            .send()
            .await?;

        let success = if response.status().is_success() {
            let body: Value = response.json().await.unwrap_or_else(|_| json!({}));
            body["success"].as_bool().unwrap_or(false)
        } else {
            false
        };

        if success {
            self.authenticated = true;
        }
        Ok(success)
    }

    pub fn logout(&mut self) {
        self.authenticated = false;
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    // "Status unknown" is not an error condition: any failure here comes
    // back as None and the rest of the UI keeps working.
    pub async fn account_status(&self) -> Option<AccountStatus> {
        let response = self
            .http_client
            .get(format!("{}/api/account", self.base_url))
            .send()
            .await
            .ok()?;

        if !response.status().is_success() {
            return None;
        }

        let data: Value = response.json().await.ok()?;
        Some(AccountStatus {
            subscription_plan: data["subscriptionPlan"]
                .as_str()
                .unwrap_or("none")
                .to_string(),
            subscription_state: data["subscriptionState"]
                .as_str()
                .unwrap_or("ended")
                .to_string(),
            credits: credits_value(&data["credits"]),
        })
    }

    pub async fn vectorize_image(
        &self,
        image: ImageInput,
        options: VectorizeOptions,
    ) -> Result<VectorizedArtifact, ClientError> {
        let mut form = Form::new();
        match image {
            ImageInput::File {
                bytes,
                filename,
                content_type,
            } => {
                let part = Part::bytes(bytes)
                    .file_name(filename)
                    .mime_str(&content_type)?;
                form = form.part("image", part);
            }
            ImageInput::Url(url) => {
                form = form.text("image.url", url);
            }
        }
        form = form
            .text("mode", options.mode.as_str())
            .text("output.file_format", options.output_format.as_str());

        let response = self
            .http_client
            .post(format!("{}/api/vectorize", self.base_url))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body: Value = response.json().await.unwrap_or_else(|_| json!({}));
            let message = error_message(&body).unwrap_or_else(|| {
                format!(
                    "Error {}: {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("request failed")
                )
            });
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let result: VectorizeResult = response.json().await?;
        let (data, is_text) = if result.is_base64 {
            (BASE64_STANDARD.decode(&result.content)?, false)
        } else {
            (result.content.into_bytes(), true)
        };

        Ok(VectorizedArtifact {
            data,
            content_type: result.content_type,
            is_text,
            credits_charged: result.credits_charged,
            credits_calculated: result.credits_calculated,
        })
    }
}

// the proxy relays upstream errors as {"error": {"message": ...}} and wraps
// its own as {"error": "..."}
fn error_message(body: &Value) -> Option<String> {
    body["error"]["message"]
        .as_str()
        .or_else(|| body["error"].as_str())
        .map(String::from)
}

// upstream reports credits as a number, older replies as a numeric string
fn credits_value(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}
