use product_search::config::ServerConfig;
use product_search::search::handlers::{router, AppState, ENDPOINT_PRODUCTS};
use product_search::search::index::AlgoliaIndex;
use product_search::translation::client::GroqClient;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env()?;

    // 1. Language model (query translation):
    let translator = Arc::new(GroqClient::new(
        config.groq_api_key.clone(),
        config.groq_model.clone(),
    ));
    tracing::info!("Query translation model: {}", config.groq_model);

    // 2. Search index (read-only key):
    let index = Arc::new(AlgoliaIndex::new(
        config.algolia_app_id.clone(),
        config.algolia_search_key.clone(),
        config.algolia_index_name.clone(),
    ));
    tracing::info!("Search index: {}", index.index_name());

    // 3. HTTP Router:
    let app = router(AppState { translator, index });

    // 4. Start HTTP server:
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(
        "Backend listening on http://localhost:{}{}",
        config.port,
        ENDPOINT_PRODUCTS
    );
    axum::serve(listener, app).await?;

    Ok(())
}
