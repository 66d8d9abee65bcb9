//! Literal intent classification of a normalized message.

use ac_parser::{cancel_target, parse_booking, BookingRequest};
use ac_session::is_reset_command;

pub const GREETINGS: [&str; 3] = ["hola", "menu", "menú"];
pub const HELP_WORDS: [&str; 3] = ["ayuda", "help", "?"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Empty,
    /// Greeting or reset command; always answered with the menu.
    Greeting,
    /// Numeric menu option `1`..=`4`.
    MenuChoice(u8),
    Help,
    Cancel { id: Option<String> },
    BookingGuide,
    /// `reservar ...`; `None` when the arguments did not parse.
    Book(Option<BookingRequest>),
    /// `agendar <free text>`.
    QuickBook { text: String },
    Unknown,
}

/// Classify a body already passed through `normalize_body`.
///
/// Checks run in priority order; the first hit wins.
pub fn classify(body: &str) -> Intent {
    if body.is_empty() {
        return Intent::Empty;
    }
    let lower = body.to_lowercase();
    let lower = lower.as_str();

    if GREETINGS.contains(&lower) || is_reset_command(lower) {
        return Intent::Greeting;
    }
    if let Ok(n @ 1..=4) = lower.parse::<u8>() {
        if lower.len() == 1 {
            return Intent::MenuChoice(n);
        }
    }
    if HELP_WORDS.contains(&lower) {
        return Intent::Help;
    }
    if lower.starts_with("cancelar") {
        return Intent::Cancel { id: cancel_target(body) };
    }
    if lower == "reservar" {
        return Intent::BookingGuide;
    }
    if lower.starts_with("reservar") {
        return Intent::Book(parse_booking(body));
    }
    if lower.starts_with("agendar") {
        let text = body.split_once(' ').map(|(_, rest)| rest.trim()).unwrap_or("");
        if text.is_empty() {
            return Intent::BookingGuide;
        }
        return Intent::QuickBook { text: text.to_string() };
    }
    Intent::Unknown
}
