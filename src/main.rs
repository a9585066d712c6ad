use tracing_subscriber::EnvFilter;

use wisetech::api;
use wisetech::config::Config;
use wisetech::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();
    tracing::info!("Data directory: {}", config.data_dir.display());

    let state = AppState::new(config.clone())?;
    {
        let db = state.db.read();
        tracing::info!(
            "Loaded {} users, {} gadgets, {} reviews",
            db.users.len(),
            db.gadgets.len(),
            db.reviews.len()
        );
    }

    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
