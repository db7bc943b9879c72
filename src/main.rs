use vectoproxy::booter::Booter;
use vectoproxy::core::credentials::ApiCredentials;
use vectoproxy::core::upstream::UpstreamClient;
use vectoproxy::server::router;
use vectoproxy::server::session::SessionGate;
use vectoproxy::server::types::AppState;
use vectoproxy::utils::constants::VECTORIZER_API_URL;
use vectoproxy::utils::get_env::get_env_var_opt;

use reqwest::Client;
use std::sync::Arc;

// Initialize app state from environment variables. The server starts even
// without the upstream credential pair so the auth surface stays reachable;
// proxied routes then answer with a configuration error.
fn init_app_state() -> AppState {
    let http_client = Client::new();
    let base_url =
        get_env_var_opt("VECTORIZER_API_URL").unwrap_or_else(|| VECTORIZER_API_URL.to_string());

    let upstream = match ApiCredentials::resolve() {
        Some(credentials) => Some(UpstreamClient::new(http_client, base_url, &credentials)),
        None => {
            tracing::warn!(
                "VECTORIZER_API_ID / VECTORIZER_API_SECRET not set; vectorize and account routes will fail"
            );
            None
        }
    };

    AppState {
        upstream,
        gate: SessionGate::from_env(),
    }
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt::init();

    let state = Arc::new(init_app_state());
    let router = router(state);

    let booter = Booter::new(Some(3001)).await?;
    tracing::info!("Listening on port {}", booter.port);
    booter.start(router).await?;

    Ok(())
}
