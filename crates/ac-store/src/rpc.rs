//! Supabase PostgREST RPC client.
//!
//! Each call is `POST {base}/rest/v1/rpc/{function}` with the anon key in
//! both the `apikey` and bearer headers, bounded by a fixed timeout.

use ac_core::config::BackendConfig;
use ac_core::{AcError, AppointmentRecord, AppointmentStatus, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::{debug, warn};

use crate::backend::AppointmentBackend;

pub const UPSERT_FN: &str = "rpc_upsert_cita_v1";
pub const PATCH_FN: &str = "rpc_patch_cita";

#[derive(Debug, Serialize)]
struct UpsertParams<'a> {
    p_secret: &'a str,
    p_id: &'a str,
    p_negocio_id: &'a str,
    p_fecha: &'a str,
    p_hora: &'a str,
    p_cliente: &'a str,
    p_telefono: &'a str,
    p_servicio: &'a str,
    p_estado: AppointmentStatus,
    p_monto: f64,
    p_forma_pago: &'a str,
    p_calendar_event_id: &'a str,
}

#[derive(Debug, Serialize)]
struct PatchParams<'a> {
    p_secret: &'a str,
    p_id: &'a str,
    p_fields: &'a Map<String, Value>,
}

#[derive(Clone)]
pub struct SupabaseRpc {
    client: Client,
    base_url: String,
    anon_key: String,
    secret: String,
    timeout: Duration,
}

impl SupabaseRpc {
    pub fn new(
        base_url: impl Into<String>,
        anon_key: impl Into<String>,
        secret: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
            secret: secret.into(),
            timeout,
        }
    }

    pub fn from_config(cfg: &BackendConfig) -> Result<Self> {
        let url = cfg.url.clone().ok_or_else(|| AcError::MissingConfig("SUPABASE_URL".into()))?;
        let key = cfg.anon_key.clone().ok_or_else(|| AcError::MissingConfig("SUPABASE_ANON_KEY".into()))?;
        Ok(Self::new(url, key, cfg.api_secret.clone(), Duration::from_millis(cfg.timeout_ms)))
    }

    pub fn endpoint(&self, function: &str) -> String {
        format!("{}/rest/v1/rpc/{}", self.base_url, function)
    }

    /// Invoke `function` with a JSON body, waiting at most the configured timeout.
    pub async fn call<B>(&self, function: &str, body: &B) -> Result<Value>
    where
        B: Serialize + Sync + ?Sized,
    {
        match tokio::time::timeout(self.timeout, self.send(function, body)).await {
            Ok(result) => result,
            Err(_) => {
                warn!(function, timeout_ms = self.timeout.as_millis() as u64, "rpc timed out");
                Err(AcError::Timeout {
                    function: function.to_string(),
                    millis: self.timeout.as_millis() as u64,
                })
            }
        }
    }

    async fn send<B>(&self, function: &str, body: &B) -> Result<Value>
    where
        B: Serialize + Sync + ?Sized,
    {
        let url = self.endpoint(function);
        debug!(%url, "rpc request");
        let res = self
            .client
            .post(&url)
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .json(body)
            .send()
            .await
            .map_err(|e| AcError::Transport(e.to_string()))?;

        let status = res.status();
        let text = res.text().await.map_err(|e| AcError::Transport(e.to_string()))?;
        if !status.is_success() {
            warn!(function, status = status.as_u16(), "rpc failed");
            return Err(AcError::Rpc {
                function: function.to_string(),
                status: status.as_u16(),
                body: text,
            });
        }
        Ok(parse_body(text))
    }
}

/// JSON when possible, otherwise the raw text; empty bodies become `null`.
pub fn parse_body(text: String) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    match serde_json::from_str(&text) {
        Ok(v) => v,
        Err(_) => Value::String(text),
    }
}

#[async_trait]
impl AppointmentBackend for SupabaseRpc {
    async fn upsert(&self, r: &AppointmentRecord) -> Result<Value> {
        let params = UpsertParams {
            p_secret: &self.secret,
            p_id: &r.id,
            p_negocio_id: &r.business,
            p_fecha: &r.date,
            p_hora: &r.time,
            p_cliente: &r.client,
            p_telefono: &r.phone,
            p_servicio: &r.service,
            p_estado: r.status,
            p_monto: r.amount,
            p_forma_pago: &r.payment_method,
            p_calendar_event_id: &r.calendar_event_id,
        };
        self.call(UPSERT_FN, &params).await
    }

    async fn patch(&self, id: &str, fields: Map<String, Value>) -> Result<Value> {
        let params = PatchParams { p_secret: &self.secret, p_id: id, p_fields: &fields };
        self.call(PATCH_FN, &params).await
    }

    fn name(&self) -> &'static str {
        "supabase"
    }
}
