//! In-process backend used when outbound calls are disabled.

use ac_core::{AcError, AppointmentRecord, Result};
use async_trait::async_trait;
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::info;

use crate::backend::AppointmentBackend;
use crate::rpc::{PATCH_FN, UPSERT_FN};

/// One call as received by [`MemoryBackend`].
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    Upsert(AppointmentRecord),
    Patch { id: String, fields: Map<String, Value> },
}

#[derive(Default)]
struct MemoryState {
    rows: HashMap<String, Value>,
    calls: Vec<BackendCall>,
}

/// Row shape of the remote `citas` table.
fn row_for(r: &AppointmentRecord) -> Value {
    json!({
        "id": r.id,
        "negocio_id": r.business,
        "fecha": r.date,
        "hora": r.time,
        "cliente": r.client,
        "telefono": r.phone,
        "servicio": r.service,
        "estado": r.status,
        "monto": r.amount,
        "forma_pago": r.payment_method,
        "calendar_event_id": r.calendar_event_id,
    })
}

/// Keeps appointments as JSON rows and logs every call.
#[derive(Default)]
pub struct MemoryBackend {
    state: Mutex<MemoryState>,
    failure: Option<String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend whose every call fails with a 500 carrying `body`.
    pub fn failing(body: impl Into<String>) -> Self {
        Self { failure: Some(body.into()), ..Self::default() }
    }

    pub fn calls(&self) -> Vec<BackendCall> {
        self.lock().calls.clone()
    }

    pub fn get(&self, id: &str) -> Option<Value> {
        self.lock().rows.get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().rows.is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn check_failure(&self, function: &str) -> Result<()> {
        match &self.failure {
            Some(body) => Err(AcError::Rpc { function: function.to_string(), status: 500, body: body.clone() }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl AppointmentBackend for MemoryBackend {
    async fn upsert(&self, record: &AppointmentRecord) -> Result<Value> {
        self.lock().calls.push(BackendCall::Upsert(record.clone()));
        self.check_failure(UPSERT_FN)?;
        self.lock().rows.insert(record.id.clone(), row_for(record));
        info!(id = %record.id, business = %record.business, "appointment stored in memory");
        Ok(json!({ "id": record.id }))
    }

    async fn patch(&self, id: &str, fields: Map<String, Value>) -> Result<Value> {
        let mut state = self.lock();
        state.calls.push(BackendCall::Patch { id: id.to_string(), fields: fields.clone() });
        self.check_failure(PATCH_FN)?;
        let row = state.rows.get_mut(id).and_then(Value::as_object_mut).ok_or_else(|| AcError::Rpc {
            function: PATCH_FN.to_string(),
            status: 404,
            body: format!("appointment {id} not found"),
        })?;
        for (k, v) in fields {
            row.insert(k, v);
        }
        info!(id, "appointment patched in memory");
        Ok(json!({ "id": id }))
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
