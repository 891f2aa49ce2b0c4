use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;

use codesmith::config::Config;
use codesmith::languages::InMemoryLanguageStore;
use codesmith::server::{self, AppState};
use codesmith::service::CodesmithService;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();

    let config = Arc::new(Config::load());
    let service = Arc::new(CodesmithService::new(&config));
    let languages = Arc::new(InMemoryLanguageStore::new());

    let state = AppState {
        service,
        languages,
        config: config.clone(),
    };

    let bind: SocketAddr = config
        .http
        .bind
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid http.bind {}: {e}", config.http.bind))?;

    let listener = tokio::net::TcpListener::bind(bind).await?;
    tracing::info!(
        %bind,
        name = %config.server.name,
        version = %config.server.version,
        endpoint = %config.completion.endpoint_url,
        "Starting codesmith HTTP server"
    );

    axum::serve(listener, server::router(state)).await?;
    Ok(())
}
