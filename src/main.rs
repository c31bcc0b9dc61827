mod chat;
mod config;
mod dashboard;
mod llm;
mod places;
mod routes;
mod services;
mod state;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = config::AppConfig::from_env();

    // Initialize LLM client (non-fatal: the copilot answers with a mock reply if config is missing).
    let llm: Option<Arc<dyn llm::LlmChat>> = match llm::LlmClient::from_env() {
        Ok(client) => {
            tracing::info!(model = client.model(), "LLM client initialized");
            Some(Arc::new(client) as Arc<dyn llm::LlmChat>)
        }
        Err(e) => {
            tracing::warn!(error = %e, "LLM client not configured, using mock responses");
            None
        }
    };

    let state = state::AppState::new(config.view, llm, config.ai);

    // Competitor data is fetched once; the API serves a loading state until it settles.
    match places::PlacesClient::new(places::PlacesConfig::from_env()) {
        Ok(places) => {
            let state = state.clone();
            tokio::spawn(async move { services::dashboard::load_competitors(&state, &places).await });
        }
        Err(e) => {
            tracing::warn!(error = %e, "places client init failed");
            state
                .dashboard
                .write()
                .await
                .set_load_error(services::dashboard::LOAD_ERROR_MESSAGE);
        }
    }

    let app = routes::app(state);
    let port = config.port;
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "bitebase listening");
    axum::serve(listener, app).await.expect("server failed");
}
