use serde::{Deserialize, Serialize};
use std::fmt;

/// Static branding of one deployment, substituted into reply templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessContext {
    pub name: String,
    pub location: String,
    pub hours: String,
    pub phone: String,
    pub branch: String,
    pub hashtag: String,
}

impl Default for BusinessContext {
    fn default() -> Self {
        Self {
            name: "Tu Negocio".into(),
            location: "Tu dirección o zona".into(),
            hours: "L–S 10:00–20:00".into(),
            phone: "55 0000 0000".into(),
            branch: "Sucursal Principal".into(),
            hashtag: "tu_negocio".into(),
        }
    }
}

/// Appointment status as stored remotely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppointmentStatus {
    #[serde(rename = "confirmada")]
    Confirmed,
    #[serde(rename = "cancelada")]
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Confirmed => "confirmada",
            AppointmentStatus::Cancelled => "cancelada",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A booking request derived from one message (or one finished flow).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentCommand {
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`
    pub time: String,
    pub client_name: String,
    pub service_name: String,
    pub price: Option<f64>,
}

/// Full appointment row sent to the remote store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentRecord {
    pub id: String,
    pub business: String,
    pub date: String,
    pub time: String,
    pub client: String,
    pub phone: String,
    pub service: String,
    pub status: AppointmentStatus,
    pub amount: f64,
    pub payment_method: String,
    pub calendar_event_id: String,
}

impl AppointmentRecord {
    /// Confirmed record for a freshly parsed command.
    pub fn confirmed(
        id: impl Into<String>,
        business: impl Into<String>,
        phone: impl Into<String>,
        cmd: &AppointmentCommand,
    ) -> Self {
        Self {
            id: id.into(),
            business: business.into(),
            date: cmd.date.clone(),
            time: cmd.time.clone(),
            client: cmd.client_name.clone(),
            phone: phone.into(),
            service: cmd.service_name.clone(),
            status: AppointmentStatus::Confirmed,
            amount: cmd.price.unwrap_or(0.0),
            payment_method: String::new(),
            calendar_event_id: String::new(),
        }
    }
}

/// An inbound chat message after provider field picking.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundMessage {
    /// Raw body as received.
    pub body: String,
    /// Provider sender address, e.g. `whatsapp:+5215512345678`.
    pub sender: String,
    /// Bare WhatsApp id (digits only), empty when unknown.
    pub wa_id: String,
    pub profile_name: Option<String>,
}

impl InboundMessage {
    pub fn new(sender: impl Into<String>, body: impl Into<String>) -> Self {
        Self { sender: sender.into(), body: body.into(), ..Default::default() }
    }

    pub fn with_wa_id(mut self, wa_id: impl Into<String>) -> Self {
        self.wa_id = wa_id.into();
        self
    }

    pub fn with_profile(mut self, name: impl Into<String>) -> Self {
        self.profile_name = Some(name.into());
        self
    }

    /// Key under which the sender's session is stored.
    pub fn session_key(&self) -> &str {
        if !self.wa_id.is_empty() {
            &self.wa_id
        } else {
            &self.sender
        }
    }

    /// Best display name for the client: profile, then `WA:<id>`, then `Cliente`.
    pub fn client_label(&self) -> String {
        match self.profile_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ if !self.wa_id.is_empty() => format!("WA:{}", self.wa_id),
            _ => "Cliente".to_string(),
        }
    }
}
