//! Guided conversation: `menu → service → date → time → menu`, plus the
//! one-turn `lookupRef` and `payRef` branches.
//!
//! Each turn is read only in light of the current step. Invalid input keeps
//! the step and asks again. Side effects are returned as a [`Transition`] for
//! the caller to execute.

use ac_core::{AppointmentCommand, ServiceCatalog};
use ac_parser::{is_strict_clock, parse_iso_date};
use tracing::debug;

use crate::session::{Session, Step};

/// Commands that abandon any conversation and return to the menu.
pub const RESET_COMMANDS: [&str; 4] = ["menu", "reiniciar", "inicio", "start"];

pub fn is_reset_command(lower: &str) -> bool {
    RESET_COMMANDS.contains(&lower)
}

/// Conversation started from a menu choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Branch {
    Booking,
    Lookup,
    Payment,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// Ask for the input of `step`; `retry` when the last answer was rejected.
    Prompt { step: Step, retry: bool },
    /// Booking finished; the session is already back at `menu`.
    Commit(AppointmentCommand),
    Cancel { id: String },
    Pay { id: String, reference: String },
}

impl Transition {
    fn ask(step: Step) -> Self {
        Transition::Prompt { step, retry: false }
    }

    fn retry(step: Step) -> Self {
        Transition::Prompt { step, retry: true }
    }
}

/// Enter a branch from `menu`, discarding anything collected before.
pub fn start(session: &mut Session, branch: Branch) -> Transition {
    session.reset();
    let step = match branch {
        Branch::Booking => Step::Service,
        Branch::Lookup => Step::LookupRef,
        Branch::Payment => Step::PayRef,
    };
    session.goto(step);
    debug!(sender = %session.sender, %step, "flow started");
    Transition::ask(step)
}

/// Feed one normalized user message to the session.
pub fn advance(
    session: &mut Session,
    input: &str,
    catalog: &ServiceCatalog,
    client_name: &str,
) -> Transition {
    let input = input.trim();
    let step = session.step;
    let transition = match step {
        Step::Menu => Transition::ask(Step::Menu),
        Step::Service => match input.parse::<usize>().ok().and_then(|n| catalog.get(n)) {
            Some(item) => {
                session.data.service = Some(item.name.clone());
                session.data.price = Some(item.price);
                session.goto(Step::Date);
                Transition::ask(Step::Date)
            }
            None => Transition::retry(Step::Service),
        },
        Step::Date => match parse_iso_date(input) {
            Some(date) => {
                session.data.date = Some(date.format("%Y-%m-%d").to_string());
                session.goto(Step::Time);
                Transition::ask(Step::Time)
            }
            None => Transition::retry(Step::Date),
        },
        Step::Time if is_strict_clock(input) => commit(session, input, client_name),
        Step::Time => Transition::retry(Step::Time),
        Step::LookupRef => match input.split_whitespace().next() {
            Some(id) => {
                let id = id.to_string();
                session.reset();
                Transition::Cancel { id }
            }
            None => Transition::retry(Step::LookupRef),
        },
        Step::PayRef => match input.split_once(char::is_whitespace) {
            Some((id, reference)) if !reference.trim().is_empty() => {
                let (id, reference) = (id.to_string(), reference.trim().to_string());
                session.reset();
                Transition::Pay { id, reference }
            }
            _ => Transition::retry(Step::PayRef),
        },
    };
    debug!(sender = %session.sender, from = %step, to = %session.step, "flow turn");
    transition
}

fn commit(session: &mut Session, time: &str, client_name: &str) -> Transition {
    let data = std::mem::take(&mut session.data);
    let (Some(service), Some(date)) = (data.service, data.date) else {
        // Step data lost (e.g. a concurrent reset); restart the booking.
        session.goto(Step::Service);
        return Transition::retry(Step::Service);
    };
    session.reset();
    Transition::Commit(AppointmentCommand {
        date,
        time: time.to_string(),
        client_name: client_name.to_string(),
        service_name: service,
        price: data.price,
    })
}
