use ac_core::AutocitaConfig;
use ac_server::{app_with_state, state::AppState};
use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AutocitaConfig::from_env().context("loading configuration")?;
    let addr = config.bind_addr();
    let guided_flow = config.guided_flow;
    let state = AppState::from_config(config).context("building application state")?;
    let backend = state.backend_name;

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!(%addr, backend, guided_flow, "✅ AutoCitaMX listening");
    axum::serve(listener, app_with_state(state)).await?;
    Ok(())
}
