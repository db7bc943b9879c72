pub mod handlers;
pub mod session;
pub mod types;

use crate::server::handlers::{
    account_handler, auth_config_handler, login_handler, server_status_handler, vectorize_handler,
};
use crate::server::types::AppState;
use crate::utils::constants::SERVER_REQUEST_BODY_LIMIT;
use axum::extract::DefaultBodyLimit;
use axum::{Router, routing::get, routing::post};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;

pub fn router(state: Arc<AppState>) -> Router {
    // the web front end is served separately, so the API stays wide open
    // CORS-wise
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let timeout = TimeoutLayer::new(Duration::from_secs(300));
    let request_body_limit = RequestBodyLimitLayer::new(SERVER_REQUEST_BODY_LIMIT);

    Router::new()
        .route("/", get(server_status_handler))
        .route("/api/auth/config", get(auth_config_handler))
        .route("/api/auth/login", post(login_handler))
        .route("/api/account", get(account_handler))
        .route("/api/vectorize", post(vectorize_handler))
        .layer(timeout)
        .layer(cors)
        .layer(request_body_limit)
        // axum's own 2MB cap would otherwise trip before the layer above
        .layer(DefaultBodyLimit::max(SERVER_REQUEST_BODY_LIMIT))
        .with_state(state)
}
