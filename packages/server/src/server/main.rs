// Main entry point for API server

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use verifier_core::{kernel::ServerDeps, server::build_app, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,verifier_core=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Claim Verifier API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(
        ner_model = %config.ner_model,
        embedding_model = %config.embedding_model,
        nli_model = %config.nli_model,
        "Configuration loaded"
    );

    // Models and evidence sources live for the whole process
    let server_deps = ServerDeps::from_config(&config).context("Failed to build dependencies")?;

    // Build application
    let app = build_app(server_deps);

    // Start server
    let addr = config.bind_addr();
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Verify endpoint: POST http://localhost:{}/verify", config.port);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
