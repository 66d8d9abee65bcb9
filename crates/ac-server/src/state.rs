//! Application state shared across all handlers.

use ac_core::{AutocitaConfig, Result};
use ac_router::Dispatcher;
use ac_session::{InMemorySessionStore, SessionStore};
use ac_store::{backend_from_config, AppointmentBackend, MemoryBackend};
use std::sync::Arc;
use std::time::Instant;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
    pub config: Arc<AutocitaConfig>,
    pub backend_name: &'static str,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(
        config: AutocitaConfig,
        sessions: Arc<dyn SessionStore>,
        backend: Arc<dyn AppointmentBackend>,
    ) -> Self {
        let config = Arc::new(config);
        let backend_name = backend.name();
        Self {
            dispatcher: Arc::new(Dispatcher::new(config.clone(), sessions, backend)),
            config,
            backend_name,
            start_time: Instant::now(),
        }
    }

    /// Backend chosen by `ENABLE_OUTBOUND`, sessions kept in process.
    pub fn from_config(config: AutocitaConfig) -> Result<Self> {
        let backend = backend_from_config(&config)?;
        Ok(Self::new(config, Arc::new(InMemorySessionStore::new()), backend))
    }

    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(
            AutocitaConfig::default(),
            Arc::new(InMemorySessionStore::new()),
            Arc::new(MemoryBackend::new()),
        )
    }
}
