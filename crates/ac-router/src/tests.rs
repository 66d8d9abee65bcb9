use crate::*;
use ac_core::{AppointmentStatus, AutocitaConfig, InboundMessage};
use ac_parser::BookingRequest;
use ac_session::{InMemorySessionStore, Session, SessionStore, Step};
use ac_store::{BackendCall, MemoryBackend};
use chrono::{Datelike, Local};
use std::sync::Arc;

const WA: &str = "5215512345678";

struct Harness {
    dispatcher: Dispatcher,
    backend: Arc<MemoryBackend>,
    sessions: Arc<InMemorySessionStore>,
}

fn harness_with(backend: MemoryBackend, guided: bool) -> Harness {
    let config = AutocitaConfig { guided_flow: guided, ..AutocitaConfig::default() };
    let backend = Arc::new(backend);
    let sessions = Arc::new(InMemorySessionStore::new());
    let dispatcher = Dispatcher::new(Arc::new(config), sessions.clone(), backend.clone());
    Harness { dispatcher, backend, sessions }
}

fn harness() -> Harness {
    harness_with(MemoryBackend::new(), false)
}

fn guided() -> Harness {
    harness_with(MemoryBackend::new(), true)
}

fn msg(body: &str) -> InboundMessage {
    InboundMessage::new(format!("whatsapp:+{WA}"), body).with_wa_id(WA)
}

impl Harness {
    async fn send(&self, body: &str) -> String {
        self.dispatcher.dispatch(&msg(body)).await.unwrap().text
    }

    fn upserts(&self) -> Vec<ac_core::AppointmentRecord> {
        self.backend
            .calls()
            .into_iter()
            .filter_map(|c| match c {
                BackendCall::Upsert(r) => Some(r),
                _ => None,
            })
            .collect()
    }
}

fn id_from_reply(reply: &str) -> String {
    reply
        .lines()
        .find_map(|l| l.strip_prefix("ID: "))
        .expect("reply carries an id")
        .to_string()
}

// ========== Classification ==========

#[test]
fn test_classify_priorities() {
    assert_eq!(classify(""), Intent::Empty);
    assert_eq!(classify("Hola"), Intent::Greeting);
    assert_eq!(classify("menú"), Intent::Greeting);
    assert_eq!(classify("reiniciar"), Intent::Greeting);
    assert_eq!(classify("2"), Intent::MenuChoice(2));
    assert_eq!(classify("4"), Intent::MenuChoice(4));
    assert_eq!(classify("5"), Intent::Unknown);
    assert_eq!(classify("01"), Intent::Unknown);
    assert_eq!(classify("?"), Intent::Help);
    assert_eq!(classify("AYUDA"), Intent::Help);
    assert_eq!(classify("cancelar"), Intent::Cancel { id: None });
    assert_eq!(classify("Cancelar ACMX-1"), Intent::Cancel { id: Some("ACMX-1".into()) });
    assert_eq!(classify("reservar"), Intent::BookingGuide);
    assert_eq!(classify("reservar pronto"), Intent::Book(None));
    assert_eq!(classify("reservar 2025-10-31 12:30"), Intent::Book(None));
    assert_eq!(classify("agendar"), Intent::BookingGuide);
    assert_eq!(classify("agendar Barba 90"), Intent::QuickBook { text: "Barba 90".into() });
    assert_eq!(classify("buenas tardes"), Intent::Unknown);
}

#[test]
fn test_classify_booking_payload() {
    let expected = BookingRequest {
        date: "2025-10-31".into(),
        time: "12:30".into(),
        client: Some("Juan".into()),
        service: Some("Corte".into()),
    };
    assert_eq!(classify("reservar 2025-10-31 12:30 Juan - Corte"), Intent::Book(Some(expected)));
}

// ========== Command mode ==========

#[tokio::test]
async fn test_empty_message_gets_empty_reply() {
    let h = harness();
    let reply = h.dispatcher.dispatch(&msg("   ")).await.unwrap();
    assert!(reply.is_empty());
    assert!(h.backend.calls().is_empty());
}

#[tokio::test]
async fn test_greeting_returns_welcome() {
    let h = harness();
    let reply = h.send("hola").await;
    assert!(reply.contains("Soy el asistente de Tu Negocio"));
    assert!(reply.contains("1) Reservar cita"));
}

#[tokio::test]
async fn test_menu_digits() {
    let h = harness();
    assert!(h.send("1").await.contains("*Para reservar*"));
    assert!(h.send("2").await.contains("Para cambiar o cancelar"));
    let prices = h.send("3").await;
    assert!(prices.contains("• Corte clásico — $150"));
    assert!(prices.contains("#tu_negocio"));
    assert!(h.send("4").await.contains("Puedo ayudarte"));
}

#[tokio::test]
async fn test_help_uses_business_tag() {
    let h = harness();
    assert!(h.send("ayuda").await.contains("negocio opcional: #tu_negocio"));
}

#[tokio::test]
async fn test_unknown_falls_back_to_welcome() {
    let h = harness();
    assert!(h.send("quiero una cita").await.contains("Puedo ayudarte"));
}

#[tokio::test]
async fn test_cancel_without_id_makes_no_call() {
    let h = harness();
    assert_eq!(h.send("cancelar").await, "Falta ID. Ej: cancelar ACMX-...");
    assert!(h.backend.calls().is_empty());
}

#[tokio::test]
async fn test_book_then_cancel() {
    let h = harness();
    let reply = h.send("reservar 2025-10-31 12:30 Juan - Corte").await;
    assert!(reply.contains("✅ *Cita confirmada*"));
    let id = id_from_reply(&reply);
    assert!(id.starts_with("ACMX-"));
    assert!(reply.contains(&format!("cancelar {id}")));

    let upserts = h.upserts();
    assert_eq!(upserts.len(), 1);
    let r = &upserts[0];
    assert_eq!(r.id, id);
    assert_eq!(r.date, "2025-10-31");
    assert_eq!(r.time, "12:30");
    assert_eq!(r.client, "Juan");
    assert_eq!(r.service, "Corte");
    assert_eq!(r.status, AppointmentStatus::Confirmed);
    assert_eq!(r.amount, 0.0);
    assert_eq!(r.phone, format!("+{WA}"));
    assert_eq!(r.business, "tu_negocio");

    let reply = h.send(&format!("cancelar {id}")).await;
    assert!(reply.contains("❌ *Cita cancelada*"));
    assert!(reply.contains(&format!("WA:{WA}")));
    assert_eq!(h.backend.get(&id).unwrap()["estado"], "cancelada");
}

#[tokio::test]
async fn test_book_uses_hashtag_business() {
    let h = harness();
    h.send("reservar 2025-10-31 12:30 Juan - Corte #Spa_Roma").await;
    let r = &h.upserts()[0];
    assert_eq!(r.business, "spa_roma");
    assert_eq!(r.service, "Corte");
}

#[tokio::test]
async fn test_book_without_name_returns_guide() {
    let h = harness();
    let m = msg("reservar 2025-10-31 12:30").with_profile("Ana");
    let reply = h.dispatcher.dispatch(&m).await.unwrap();
    assert!(reply.text.contains("*Para reservar*"));
    assert!(h.backend.calls().is_empty());
}

#[tokio::test]
async fn test_bad_booking_returns_guide() {
    let h = harness();
    assert!(h.send("reservar mañana a las 5").await.contains("*Para reservar*"));
    assert!(h.send("reservar").await.contains("*Para reservar*"));
    assert!(h.backend.calls().is_empty());
}

#[tokio::test]
async fn test_cancel_unknown_id_reports_inline() {
    let h = harness();
    let reply = h.send("cancelar ACMX-404").await;
    assert!(reply.starts_with("⚠️ No se pudo cancelar: Error: RPC rpc_patch_cita 404"));
}

#[tokio::test]
async fn test_backend_failure_is_truncated_inline() {
    let h = harness_with(MemoryBackend::failing("x".repeat(1000)), false);
    let reply = h.send("reservar 2025-10-31 12:30 Juan - Corte").await;
    let detail = reply.strip_prefix("⚠️ No se pudo reservar: ").unwrap();
    assert_eq!(detail.chars().count(), 180);
    assert!(detail.starts_with("Error: RPC rpc_upsert_cita_v1 500: xxx"));
}

#[tokio::test]
async fn test_quick_book_extracts_free_text() {
    let h = harness();
    let reply = h.send("agendar Barba 31/10 12:30 90").await;
    assert!(reply.contains("💇 Barba"));
    let r = &h.upserts()[0];
    assert_eq!(r.service, "Barba");
    assert_eq!(r.time, "12:30");
    assert_eq!(r.amount, 90.0);
    assert_eq!(r.date, format!("{}-10-31", Local::now().year()));
}

#[tokio::test]
async fn test_command_mode_keeps_no_sessions() {
    let h = harness();
    h.send("1").await;
    h.send("reservar 2025-10-31 12:30 Juan").await;
    assert!(h.sessions.is_empty());
}

// ========== Guided flow ==========

#[tokio::test]
async fn test_guided_booking() {
    let h = guided();
    let reply = h.send("1").await;
    assert!(reply.contains("Elige un servicio"));
    assert!(reply.contains("3) Barba — $120"));

    let reply = h.send("9").await;
    assert!(reply.starts_with("⚠️ Respuesta no válida."));
    assert_eq!(h.sessions.get(WA).await.unwrap().unwrap().step, Step::Service);

    assert!(h.send("3").await.contains("AAAA-MM-DD"));
    assert!(h.send("31/10").await.starts_with("⚠️"));
    assert!(h.send("2025-10-31").await.contains("HH:MM"));
    let reply = h.send("12:30").await;
    assert!(reply.contains("✅ *Cita confirmada*"));

    let r = &h.upserts()[0];
    assert_eq!(r.service, "Barba");
    assert_eq!(r.amount, 120.0);
    assert_eq!(r.client, format!("WA:{WA}"));
    let session = h.sessions.get(WA).await.unwrap().unwrap();
    assert_eq!(session.step, Step::Menu);
    assert!(session.data.is_empty());
}

#[tokio::test]
async fn test_guided_reset_from_any_state() {
    let h = guided();
    h.send("1").await;
    h.send("2").await;
    assert_eq!(h.sessions.get(WA).await.unwrap().unwrap().step, Step::Date);

    let reply = h.send("menu").await;
    assert!(reply.contains("Puedo ayudarte"));
    let session = h.sessions.get(WA).await.unwrap().unwrap();
    assert_eq!(session.step, Step::Menu);
    assert!(session.data.is_empty());
    assert!(h.backend.calls().is_empty());
}

#[tokio::test]
async fn test_greeting_wins_over_session_state() {
    let h = guided();
    let mut s = Session::new(WA);
    s.goto(Step::Time);
    s.data.service = Some("Barba".into());
    h.sessions.set(s).await.unwrap();
    assert!(h.send("hola").await.contains("Puedo ayudarte"));
    assert!(h.sessions.get(WA).await.unwrap().unwrap().is_idle());
}

#[tokio::test]
async fn test_guided_lookup_cancels() {
    let h = guided();
    let id = id_from_reply(&h.send("reservar 2025-10-31 12:30 Juan - Corte").await);
    assert!(h.send("2").await.contains("Envía el ID"));
    assert!(h.send(&id).await.contains("❌ *Cita cancelada*"));
    assert_eq!(h.backend.get(&id).unwrap()["estado"], "cancelada");
}

#[tokio::test]
async fn test_guided_payment_reference() {
    let h = guided();
    let id = id_from_reply(&h.send("reservar 2025-10-31 12:30 Juan - Corte").await);
    h.send("4").await;
    let reply = h.send(&format!("{id} transferencia 98765")).await;
    assert!(reply.contains("✅ *Pago registrado*"));
    assert!(reply.contains("Referencia: transferencia 98765"));
    assert_eq!(h.backend.get(&id).unwrap()["forma_pago"], "transferencia 98765");
}

#[tokio::test]
async fn test_guided_prices_do_not_start_flow() {
    let h = guided();
    assert!(h.send("3").await.contains("Servicios principales"));
    assert!(h.sessions.get(WA).await.unwrap().is_none());
}
