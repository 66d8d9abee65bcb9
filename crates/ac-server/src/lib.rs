//! AutoCitaMX HTTP server (Axum).
//!
//! Twilio WhatsApp webhook at `/whatsapp`, liveness and health probes, and a
//! request echo for debugging.

pub mod error;
pub mod inbound;
pub mod routes;
pub mod state;
pub mod twiml;

use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::Router;
use state::AppState;
use std::time::Instant;
use tracing::info;

/// Build the application router with an offline default state.
pub fn app() -> Router {
    app_with_state(AppState::default())
}

/// Build the application router with a custom state.
pub fn app_with_state(state: AppState) -> Router {
    Router::new()
        .merge(routes::health_routes())
        .merge(routes::webhook_routes())
        .merge(routes::debug_routes())
        .fallback(routes::not_found)
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

async fn log_request(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let started = Instant::now();
    let resp = next.run(req).await;
    info!(
        %method,
        %path,
        status = resp.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "request"
    );
    resp
}
