//! Remote appointment store: the backend trait, the Supabase RPC client and
//! an in-memory stand-in.

pub mod backend;
pub mod memory;
pub mod rpc;

pub use backend::AppointmentBackend;
pub use memory::{BackendCall, MemoryBackend};
pub use rpc::SupabaseRpc;

use ac_core::{AutocitaConfig, Result};
use std::sync::Arc;
use tracing::info;

/// Backend selected by configuration: Supabase when outbound calls are
/// enabled, otherwise the in-memory store.
pub fn backend_from_config(cfg: &AutocitaConfig) -> Result<Arc<dyn AppointmentBackend>> {
    if cfg.backend.enable_outbound {
        let rpc = SupabaseRpc::from_config(&cfg.backend)?;
        info!(endpoint = %rpc.endpoint("*"), "using supabase backend");
        Ok(Arc::new(rpc))
    } else {
        info!("outbound disabled, using in-memory backend");
        Ok(Arc::new(MemoryBackend::new()))
    }
}
