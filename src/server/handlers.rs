use crate::core::upstream::{ImageSource, ProxyError, VectorizeRequest};
use crate::server::types::{AppState, LoginRequest, OutputFormat, ProcessingMode};
use crate::utils::constants::DEFAULT_CONTENT_TYPE;
use crate::utils::urls::is_valid_image_url;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{Value, json};
use std::sync::Arc;

// server status handler
pub async fn server_status_handler() -> Json<Value> {
    Json(json!({"status": "running"}))
}

pub async fn auth_config_handler(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({"authRequired": state.gate.required()}))
}

pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginRequest>,
) -> Response {
    if state.gate.login(&body.username, &body.password) {
        Json(json!({"success": true})).into_response()
    } else {
        // deliberately vague: never hint whether the username or the
        // password was the wrong half
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"success": false, "error": "Invalid credentials"})),
        )
            .into_response()
    }
}

// account passthrough: upstream status and body are relayed untouched
pub async fn account_handler(State(state): State<Arc<AppState>>) -> Response {
    let Some(upstream) = &state.upstream else {
        return proxy_error_response(ProxyError::ConfigurationMissing);
    };

    match upstream.account().await {
        Ok((status, body)) => upstream_response(status, body),
        Err(err) => {
            tracing::error!("Account status fetch failed: {}", err);
            proxy_error_response(err)
        }
    }
}

pub async fn vectorize_handler(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Response {
    let request = match read_vectorize_request(multipart).await {
        Ok(request) => request,
        Err(message) => {
            return error_json(StatusCode::BAD_REQUEST, message);
        }
    };

    let Some(upstream) = &state.upstream else {
        return proxy_error_response(ProxyError::ConfigurationMissing);
    };

    match upstream.vectorize(request).await {
        Ok(result) => {
            tracing::info!(
                "Vectorized image: {} ({} credits charged)",
                result.content_type,
                result.credits_charged
            );
            Json(result).into_response()
        }
        Err(err) => proxy_error_response(err),
    }
}

// Collects the multipart fields into a validated VectorizeRequest. All
// rejections happen here, before any upstream traffic.
async fn read_vectorize_request(mut multipart: Multipart) -> Result<VectorizeRequest, String> {
    let mut image: Option<ImageSource> = None;
    let mut image_url: Option<String> = None;
    let mut mode: Option<String> = None;
    let mut output_format: Option<String> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(err) => return Err(format!("Malformed multipart body: {}", err)),
        };

        // the field name borrow must end before .bytes()/.text() consume
        // the field
        let name = field.name().map(ToString::to_string);
        match name.as_deref() {
            Some("image") => {
                let filename = field.file_name().unwrap_or("image").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or(DEFAULT_CONTENT_TYPE)
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|err| format!("Failed to read image field: {}", err))?;
                image = Some(ImageSource::File {
                    bytes,
                    filename,
                    content_type,
                });
            }
            Some("image.url") => {
                let url = field
                    .text()
                    .await
                    .map_err(|err| format!("Failed to read image.url field: {}", err))?;
                image_url = Some(url);
            }
            Some("mode") => {
                let value = field
                    .text()
                    .await
                    .map_err(|err| format!("Failed to read mode field: {}", err))?;
                mode = Some(value);
            }
            Some("output.file_format") => {
                let value = field
                    .text()
                    .await
                    .map_err(|err| format!("Failed to read output.file_format field: {}", err))?;
                output_format = Some(value);
            }
            _ => {}
        }
    }

    let image = match (image, image_url) {
        (Some(_), Some(_)) => {
            return Err("Provide either an image file or an image URL, not both".to_string());
        }
        (None, None) => {
            return Err("No image file or image URL provided".to_string());
        }
        (Some(file), None) => file,
        (None, Some(url)) => {
            if !is_valid_image_url(&url) {
                return Err(format!("Invalid image URL: {}", url));
            }
            ImageSource::Url(url)
        }
    };

    let mode = match mode.as_deref() {
        None => return Err("Missing mode field".to_string()),
        Some(raw) => {
            ProcessingMode::parse(raw).ok_or_else(|| format!("Unknown processing mode: {}", raw))?
        }
    };

    let output_format = match output_format.as_deref() {
        None => return Err("Missing output.file_format field".to_string()),
        Some(raw) => {
            OutputFormat::parse(raw).ok_or_else(|| format!("Unknown output format: {}", raw))?
        }
    };

    Ok(VectorizeRequest {
        image,
        mode,
        output_format,
    })
}

fn error_json(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({"error": message.into()}))).into_response()
}

fn upstream_response(status: u16, body: Value) -> Response {
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
    (status, Json(body)).into_response()
}

fn proxy_error_response(err: ProxyError) -> Response {
    match err {
        ProxyError::ConfigurationMissing => {
            error_json(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
        ProxyError::Validation(message) => error_json(StatusCode::BAD_REQUEST, message),
        ProxyError::Upstream { status, body } => upstream_response(status, body),
        ProxyError::Network(_) => error_json(StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
    }
}
