mod config;
mod error;
mod llm;
mod routes;
mod services;
mod state;
mod view;

use std::sync::Arc;

use llm::LlmGenerate;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = config::AppConfig::from_env().expect("invalid configuration");

    let llm: Option<Arc<dyn LlmGenerate>> = match llm::LlmClient::from_env() {
        Ok(client) => {
            tracing::info!(
                provider = client.provider().as_str(),
                text_model = client.text_model(),
                image_model = client.image_model(),
                "LLM client ready"
            );
            Some(Arc::new(client))
        }
        Err(e) => {
            tracing::warn!(error = %e, "LLM unavailable, AI features disabled");
            None
        }
    };

    let state = state::AppState::new(config.default_theme, llm);

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .expect("failed to bind");

    tracing::info!(port = config.port, "luminalayout listening");
    axum::serve(listener, app).await.expect("server failed");
}
