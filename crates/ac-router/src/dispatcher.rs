//! Message dispatch: intent → reply text, calling the backend when a
//! booking, cancellation or payment has to be recorded.

use ac_core::ids::new_appointment_id;
use ac_core::text::{normalize_body, strip_hashtags};
use ac_core::{
    AppointmentCommand, AppointmentRecord, AppointmentStatus, AutocitaConfig, InboundMessage, Result, Template,
    TemplateVars,
};
use ac_parser::extract;
use ac_session::{flow, Branch, SessionStore, Step, Transition};
use ac_store::AppointmentBackend;
use serde_json::{json, Map, Value};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::intent::{classify, Intent};
use crate::reply::Reply;

pub struct Dispatcher {
    config: Arc<AutocitaConfig>,
    sessions: Arc<dyn SessionStore>,
    backend: Arc<dyn AppointmentBackend>,
}

impl Dispatcher {
    pub fn new(
        config: Arc<AutocitaConfig>,
        sessions: Arc<dyn SessionStore>,
        backend: Arc<dyn AppointmentBackend>,
    ) -> Self {
        Self { config, sessions, backend }
    }

    pub fn config(&self) -> &AutocitaConfig {
        &self.config
    }

    /// Answer one inbound message.
    ///
    /// Backend failures are reported inside the reply. Only session-store
    /// faults surface as `Err`.
    pub async fn dispatch(&self, msg: &InboundMessage) -> Result<Reply> {
        let body = normalize_body(&msg.body);
        let intent = classify(&body);
        let business = self.config.business_name_for(&msg.body);
        debug!(?intent, %business, "message classified");

        match intent {
            Intent::Empty => return Ok(Reply::empty()),
            Intent::Greeting => {
                self.reset_session(msg.session_key()).await?;
                return Ok(self.welcome());
            }
            _ => {}
        }

        if self.config.guided_flow {
            if let Some(reply) = self.guided(msg, &body, &intent, &business).await? {
                return Ok(reply);
            }
        }

        let reply = match intent {
            Intent::Empty => Reply::empty(),
            Intent::Greeting | Intent::Unknown => self.welcome(),
            Intent::MenuChoice(1) | Intent::BookingGuide | Intent::Book(None) => {
                self.render(Template::ReservationGuide, TemplateVars::new().hashtag(&business))
            }
            Intent::MenuChoice(2) => self.render(Template::ChangeOrCancel, TemplateVars::new()),
            Intent::MenuChoice(3) => self.prices(&business),
            Intent::MenuChoice(_) => self.welcome(),
            Intent::Help => self.render(Template::Help, TemplateVars::new().hashtag(&business)),
            Intent::Cancel { id: None } => self.render(Template::CancelMissingId, TemplateVars::new()),
            Intent::Cancel { id: Some(id) } => self.cancel(&id, msg).await,
            Intent::Book(Some(request)) => {
                let cmd = request.into_command(msg.client_label());
                self.book(cmd, msg, &business).await
            }
            Intent::QuickBook { text } => {
                let e = extract(&strip_hashtags(&text));
                let cmd = AppointmentCommand {
                    date: e.date,
                    time: e.time,
                    client_name: msg.client_label(),
                    service_name: e.service,
                    price: Some(e.price),
                };
                self.book(cmd, msg, &business).await
            }
        };
        Ok(reply)
    }

    /// State-machine handling; `None` leaves the message to the command rules.
    async fn guided(
        &self,
        msg: &InboundMessage,
        body: &str,
        intent: &Intent,
        business: &str,
    ) -> Result<Option<Reply>> {
        let mut session = self.sessions.load_or_create(msg.session_key()).await?;

        let transition = if !session.is_idle() {
            flow::advance(&mut session, body, &self.config.catalog, &msg.client_label())
        } else {
            let branch = match intent {
                Intent::MenuChoice(1) => Branch::Booking,
                Intent::MenuChoice(2) => Branch::Lookup,
                Intent::MenuChoice(4) => Branch::Payment,
                _ => return Ok(None),
            };
            flow::start(&mut session, branch)
        };
        self.sessions.set(session).await?;

        Ok(Some(self.execute(transition, msg, business).await))
    }

    async fn execute(&self, transition: Transition, msg: &InboundMessage, business: &str) -> Reply {
        match transition {
            Transition::Prompt { step, retry } => self.prompt(step, retry),
            Transition::Commit(cmd) => self.book(cmd, msg, business).await,
            Transition::Cancel { id } => self.cancel(&id, msg).await,
            Transition::Pay { id, reference } => self.pay(&id, &reference).await,
        }
    }

    fn prompt(&self, step: Step, retry: bool) -> Reply {
        let template = match step {
            Step::Menu => return self.welcome(),
            Step::Service => Template::AskService,
            Step::Date => Template::AskDate,
            Step::Time => Template::AskTime,
            Step::LookupRef => Template::AskLookupRef,
            Step::PayRef => Template::AskPayRef,
        };
        let vars = TemplateVars::new().services(self.config.catalog.numbered_menu());
        let text = template.render(&self.config.business, &vars);
        if retry {
            let invalid = Template::InvalidChoice.render(&self.config.business, &vars);
            Reply::new(format!("{invalid}\n{text}"))
        } else {
            Reply::new(text)
        }
    }

    async fn book(&self, cmd: AppointmentCommand, msg: &InboundMessage, business: &str) -> Reply {
        let id = new_appointment_id();
        let phone = self.config.phone.normalize(&msg.wa_id);
        let record = AppointmentRecord::confirmed(&id, business, phone, &cmd);

        match self.backend.upsert(&record).await {
            Ok(_) => {
                info!(%id, %business, date = %cmd.date, time = %cmd.time, backend = self.backend.name(), "appointment booked");
                let vars = TemplateVars::new()
                    .id(&id)
                    .client(&cmd.client_name)
                    .service(&cmd.service_name)
                    .date(&cmd.date)
                    .time(&cmd.time);
                self.render(Template::Confirm, vars)
            }
            Err(e) => {
                warn!(%id, error = %e, "booking failed");
                Reply::new(format!("⚠️ No se pudo reservar: {}", e.inline()))
            }
        }
    }

    async fn cancel(&self, id: &str, msg: &InboundMessage) -> Reply {
        let fields = single_field("estado", json!(AppointmentStatus::Cancelled.as_str()));
        match self.backend.patch(id, fields).await {
            Ok(_) => {
                info!(id, "appointment cancelled");
                let vars = TemplateVars::new().id(id).client(msg.client_label()).service("");
                self.render(Template::CancelOk, vars)
            }
            Err(e) => {
                warn!(id, error = %e, "cancel failed");
                Reply::new(format!("⚠️ No se pudo cancelar: {}", e.inline()))
            }
        }
    }

    async fn pay(&self, id: &str, reference: &str) -> Reply {
        let fields = single_field("forma_pago", json!(reference));
        match self.backend.patch(id, fields).await {
            Ok(_) => {
                info!(id, "payment reference recorded");
                self.render(Template::PayOk, TemplateVars::new().id(id).reference(reference))
            }
            Err(e) => {
                warn!(id, error = %e, "payment update failed");
                Reply::new(format!("⚠️ No se pudo registrar el pago: {}", e.inline()))
            }
        }
    }

    async fn reset_session(&self, key: &str) -> Result<()> {
        if let Some(mut session) = self.sessions.get(key).await? {
            session.reset();
            self.sessions.set(session).await?;
        }
        Ok(())
    }

    fn welcome(&self) -> Reply {
        self.render(Template::Welcome, TemplateVars::new())
    }

    fn prices(&self, business: &str) -> Reply {
        let vars = TemplateVars::new()
            .hashtag(business)
            .services(self.config.catalog.price_list());
        self.render(Template::Prices, vars)
    }

    fn render(&self, template: Template, vars: TemplateVars) -> Reply {
        Reply::new(template.render(&self.config.business, &vars))
    }
}

fn single_field(key: &str, value: Value) -> Map<String, Value> {
    let mut fields = Map::new();
    fields.insert(key.to_string(), value);
    fields
}
