use axum::body::Bytes;
use axum::extract::rejection::QueryRejection;
use axum::extract::{FromRequest, Query, Request, State};
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::routing::{any, get, post};
use axum::{Form, Json, Router};
use serde_json::{json, Map, Value};
use tracing::{debug, info_span, warn, Instrument};
use uuid::Uuid;

use crate::error::WebhookError;
use crate::inbound::{fields_from_json, parse_inbound, Fields};
use crate::state::AppState;
use crate::twiml::Twiml;

pub const LIVENESS: &str = "✅ AutoCitaMX listening — /whatsapp (POST/GET) listo · /__echo (debug)";

pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(liveness))
        .route("/health", get(health))
}

/// `POST` reads a form or JSON body; every other method reads the query string.
pub fn webhook_routes() -> Router<AppState> {
    Router::new().route("/whatsapp", post(whatsapp_form).fallback(whatsapp_query))
}

pub fn debug_routes() -> Router<AppState> {
    Router::new().route("/__echo", any(echo))
}

async fn liveness() -> &'static str {
    LIVENESS
}

async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "uptime_secs": state.uptime_secs(),
        "backend": state.backend_name,
        "guided_flow": state.config.guided_flow,
    }))
}

/// Webhook fields from a urlencoded or JSON request body.
pub struct WebhookBody(pub Fields);

impl<S> FromRequest<S> for WebhookBody
where
    S: Send + Sync,
{
    type Rejection = WebhookError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_json(req.headers()) {
            let Json(value) = Json::<Value>::from_request(req, state).await?;
            Ok(Self(fields_from_json(&value)))
        } else {
            let Form(fields) = Form::<Fields>::from_request(req, state).await?;
            Ok(Self(fields))
        }
    }
}

fn content_type(headers: &HeaderMap) -> &str {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

fn is_json(headers: &HeaderMap) -> bool {
    let ct = content_type(headers).to_ascii_lowercase();
    let essence = ct.split(';').next().unwrap_or("").trim();
    essence == "application/json" || essence.ends_with("+json")
}

fn is_form(headers: &HeaderMap) -> bool {
    content_type(headers)
        .to_ascii_lowercase()
        .starts_with("application/x-www-form-urlencoded")
}

async fn whatsapp_form(
    State(state): State<AppState>,
    WebhookBody(fields): WebhookBody,
) -> Result<Twiml, WebhookError> {
    answer(&state, fields).await
}

async fn whatsapp_query(
    State(state): State<AppState>,
    query: Result<Query<Fields>, QueryRejection>,
) -> Result<Twiml, WebhookError> {
    let Query(fields) = query?;
    answer(&state, fields).await
}

async fn answer(state: &AppState, fields: Fields) -> Result<Twiml, WebhookError> {
    let msg = parse_inbound(&fields);
    let span = info_span!("webhook", request_id = %Uuid::new_v4(), sender = %msg.session_key());
    async move {
        let reply = state.dispatcher.dispatch(&msg).await?;
        debug!(chars = reply.text.chars().count(), "reply ready");
        Ok::<_, WebhookError>(Twiml(reply.text))
    }
    .instrument(span)
    .await
}

async fn echo(
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    query: Result<Query<Fields>, QueryRejection>,
    body: Bytes,
) -> Json<Value> {
    let header_map: Map<String, Value> = headers
        .iter()
        .map(|(k, v)| (k.to_string(), Value::String(String::from_utf8_lossy(v.as_bytes()).into_owned())))
        .collect();
    let query = query.map(|Query(q)| q).unwrap_or_default();
    let form = is_form(&headers)
        .then(|| serde_urlencoded::from_bytes::<Fields>(&body).ok())
        .flatten();
    let text = String::from_utf8_lossy(&body);
    let body = match form {
        Some(fields) => json!(fields),
        None if text.trim().is_empty() => json!({}),
        None => serde_json::from_str(&text).unwrap_or_else(|_| Value::String(text.into_owned())),
    };
    Json(json!({
        "method": method.as_str(),
        "path": uri.path(),
        "headers": header_map,
        "query": query,
        "body": body,
    }))
}

pub async fn not_found(method: Method, uri: Uri) -> (StatusCode, &'static str) {
    warn!(%method, path = %uri.path(), "route not found");
    (StatusCode::NOT_FOUND, "Not found")
}
