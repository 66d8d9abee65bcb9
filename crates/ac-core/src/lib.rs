//! Shared configuration, errors and domain types for AutoCita.

pub mod catalog;
pub mod config;
pub mod error;
pub mod ids;
pub mod template;
pub mod text;
pub mod types;

pub use catalog::{ServiceCatalog, ServiceItem};
pub use config::AutocitaConfig;
pub use error::{AcError, Result};
pub use template::{Template, TemplateVars};
pub use types::{AppointmentCommand, AppointmentRecord, AppointmentStatus, BusinessContext, InboundMessage};
