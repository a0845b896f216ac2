use reel_recs::{
    api::{create_router, AppState},
    config::Config,
    services::Summary,
    store::Store,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;

    // Load the dataset and build every matrix up front
    let store = Store::load(&config.data_dir);
    let state = AppState::new(store, config.default_top_k);

    let summary = Summary::from_store(&state.store, &state.pipeline);
    tracing::info!(
        users = summary.users,
        rated_movies = summary.rated_movies,
        density = summary.matrix_density,
        "Recommendation pipeline ready"
    );

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    tracing::info!(addr = %config.bind_addr(), "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
