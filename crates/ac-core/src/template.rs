//! Reply templates and `[[PLACEHOLDER]]` substitution.

use crate::types::BusinessContext;

/// Every reply the bot can send, apart from inline error lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    Welcome,
    ReservationGuide,
    ChangeOrCancel,
    Confirm,
    CancelOk,
    CancelMissingId,
    Help,
    Prices,
    AskService,
    AskDate,
    AskTime,
    AskLookupRef,
    AskPayRef,
    PayOk,
    InvalidChoice,
}

impl Template {
    pub fn text(&self) -> &'static str {
        match self {
            Template::Welcome => WELCOME,
            Template::ReservationGuide => RESERVATION_GUIDE,
            Template::ChangeOrCancel => CHANGE_OR_CANCEL,
            Template::Confirm => CONFIRM,
            Template::CancelOk => CANCEL_OK,
            Template::CancelMissingId => "Falta ID. Ej: cancelar ACMX-...",
            Template::Help => HELP,
            Template::Prices => PRICES,
            Template::AskService => ASK_SERVICE,
            Template::AskDate => "📅 ¿Qué día? Escribe la fecha como AAAA-MM-DD (ej. 2025-10-31).",
            Template::AskTime => "🕒 ¿A qué hora? Escribe la hora como HH:MM (ej. 12:30).",
            Template::AskLookupRef => "🔎 Envía el ID de tu cita para cancelarla (ej. ACMX-20251031123000-ABCD).",
            Template::AskPayRef => "💳 Envía el ID de tu cita y la referencia de pago.\nEj: ACMX-20251031123000-ABCD transferencia 123456",
            Template::PayOk => "✅ *Pago registrado*\nID: [[ID_CITA]]\nReferencia: [[REFERENCIA]]",
            Template::InvalidChoice => "⚠️ Respuesta no válida.",
        }
    }

    /// Render against the deployment branding and per-reply values.
    pub fn render(&self, business: &BusinessContext, vars: &TemplateVars) -> String {
        render(self.text(), business, vars)
    }
}

const WELCOME: &str = "🙌 ¡Hola! Soy el asistente de [[NOMBRE_NEGOCIO]].

Puedo ayudarte a:
1) Reservar cita
2) Cambiar o cancelar
3) Ver precios/servicios

✍️ *Escribe:*
• \"reservar 2025-10-31 12:30 TuNombre - Servicio\"
• \"cancelar ID_DE_CITA\"
• \"ayuda\" para ver ejemplos

📍 Sucursal: [[UBICACIÓN_CORTA]]
🕒 Horario: [[HORARIO_RESUMEN]]
📱 Tel: [[TEL_CORTO]]";

const RESERVATION_GUIDE: &str = "🗓️ *Para reservar*, envía:
reservar AAAA-MM-DD HH:MM TuNombre - Servicio

Ejemplo:
reservar 2025-10-31 12:30 Juan - Corte

👉 Si manejas varias sucursales, agrega su hashtag (opcional):
#[[HASHTAG_NEGOCIO]]";

const CHANGE_OR_CANCEL: &str = "🔄 Para cambiar o cancelar:
• \"cancelar ID\"
• o envía un nuevo \"reservar YYYY-MM-DD HH:MM Nombre - Servicio\"";

const CONFIRM: &str = "✅ *Cita confirmada*
ID: [[ID_CITA]]
👤 [[CLIENTE]]
💇 [[SERVICIO]]
📅 [[FECHA]] [[HORA]]
📍 [[SUCURSAL]]

ℹ️ Si necesitas cambiar o cancelar, escribe:
\"cancelar [[ID_CITA]]\"";

const CANCEL_OK: &str = "❌ *Cita cancelada*
ID: [[ID_CITA]]
👤 [[CLIENTE]] — [[SERVICIO]]

¿Deseas agendar otra fecha? Escribe:
reservar AAAA-MM-DD HH:MM [[CLIENTE]] - [[SERVICIO]]";

const HELP: &str = "📲 AutoCitaMX:
• reservar YYYY-MM-DD HH:MM Nombre - Servicio
   ej: reservar 2025-11-05 10:00 Juan - Corte
• cancelar ID
   ej: cancelar ACMX-202511051000-ABCD
• negocio opcional: #[[HASHTAG_NEGOCIO]]";

const PRICES: &str = "💈 *Servicios principales*:
[[LISTA_SERVICIOS]]

👉 Reserva con:
reservar AAAA-MM-DD HH:MM TuNombre - Servicio #[[HASHTAG_NEGOCIO]]";

const ASK_SERVICE: &str = "💈 Elige un servicio enviando su número:
[[LISTA_SERVICIOS]]";

/// Per-reply values; unset entries render as empty text.
#[derive(Debug, Clone, Default)]
pub struct TemplateVars {
    pub id: Option<String>,
    pub client: Option<String>,
    pub service: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub reference: Option<String>,
    /// Overrides the branding hashtag (e.g. the tag the sender used).
    pub hashtag: Option<String>,
    pub services: Option<String>,
}

impl TemplateVars {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, v: impl Into<String>) -> Self {
        self.id = Some(v.into());
        self
    }

    pub fn client(mut self, v: impl Into<String>) -> Self {
        self.client = Some(v.into());
        self
    }

    pub fn service(mut self, v: impl Into<String>) -> Self {
        self.service = Some(v.into());
        self
    }

    pub fn date(mut self, v: impl Into<String>) -> Self {
        self.date = Some(v.into());
        self
    }

    pub fn time(mut self, v: impl Into<String>) -> Self {
        self.time = Some(v.into());
        self
    }

    pub fn reference(mut self, v: impl Into<String>) -> Self {
        self.reference = Some(v.into());
        self
    }

    pub fn hashtag(mut self, v: impl Into<String>) -> Self {
        self.hashtag = Some(v.into());
        self
    }

    pub fn services(mut self, v: impl Into<String>) -> Self {
        self.services = Some(v.into());
        self
    }
}

/// Substitute every known placeholder in `template`.
pub fn render(template: &str, business: &BusinessContext, vars: &TemplateVars) -> String {
    let opt = |v: &Option<String>| v.clone().unwrap_or_default();
    let hashtag = vars.hashtag.as_deref().unwrap_or(&business.hashtag);

    template
        .replace("[[NOMBRE_NEGOCIO]]", &business.name)
        .replace("[[UBICACIÓN_CORTA]]", &business.location)
        .replace("[[HORARIO_RESUMEN]]", &business.hours)
        .replace("[[TEL_CORTO]]", &business.phone)
        .replace("[[SUCURSAL]]", &business.branch)
        .replace("[[HASHTAG_NEGOCIO]]", hashtag)
        .replace("[[ID_CITA]]", &opt(&vars.id))
        .replace("[[CLIENTE]]", &opt(&vars.client))
        .replace("[[SERVICIO]]", &opt(&vars.service))
        .replace("[[FECHA]]", &opt(&vars.date))
        .replace("[[HORA]]", &opt(&vars.time))
        .replace("[[REFERENCIA]]", &opt(&vars.reference))
        .replace("[[LISTA_SERVICIOS]]", &opt(&vars.services))
}
