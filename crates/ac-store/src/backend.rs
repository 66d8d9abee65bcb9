use ac_core::{AppointmentRecord, Result};
use async_trait::async_trait;
use serde_json::{Map, Value};

/// Remote appointment store. Every call is awaited by the caller and its
/// outcome reported back to the user.
#[async_trait]
pub trait AppointmentBackend: Send + Sync {
    /// Create or replace an appointment by id.
    async fn upsert(&self, record: &AppointmentRecord) -> Result<Value>;

    /// Overwrite selected fields of an existing appointment.
    async fn patch(&self, id: &str, fields: Map<String, Value>) -> Result<Value>;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}
