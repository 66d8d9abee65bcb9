//! Strict command grammars: `reservar DATE TIME NAME - SERVICE` and `cancelar ID`.

use ac_core::text::strip_hashtags;
use ac_core::AppointmentCommand;
use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

pub const DEFAULT_BOOKED_SERVICE: &str = "Servicio";

static BOOKING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^reservar\s+(\d{4}-\d{2}-\d{2})\s+(\d{1,2}:\d{2})\s+(.+?)(?:\s*-\s*(.+))?$")
        .expect("valid booking regex")
});
static ISO_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date regex"));
static CLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([01]?\d|2[0-3]):([0-5]\d)$").expect("valid clock regex"));
static STRICT_CLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([01]\d|2[0-3]):[0-5]\d$").expect("valid clock regex"));

/// A parsed `reservar` command. The name is required by the grammar but may
/// still be blank once dashes are trimmed; the service is optional.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRequest {
    pub date: String,
    pub time: String,
    pub client: Option<String>,
    pub service: Option<String>,
}

impl BookingRequest {
    /// Fill the gaps: `fallback_client` for a blank name, `Servicio` for a missing service.
    pub fn into_command(self, fallback_client: impl Into<String>) -> AppointmentCommand {
        AppointmentCommand {
            date: self.date,
            time: self.time,
            client_name: self.client.unwrap_or_else(|| fallback_client.into()),
            service_name: self.service.unwrap_or_else(|| DEFAULT_BOOKED_SERVICE.to_string()),
            price: None,
        }
    }
}

/// Parse a normalized `reservar ...` body. `#tags` are ignored.
///
/// Returns `None` when the shape does not match or the date/time are not real.
pub fn parse_booking(body: &str) -> Option<BookingRequest> {
    let text = strip_hashtags(body);
    let caps = BOOKING.captures(&text)?;

    let date = parse_iso_date(&caps[1])?.format("%Y-%m-%d").to_string();
    let time = normalize_clock(&caps[2])?;
    let non_empty = |s: &str| Some(s.trim().to_string()).filter(|s| !s.is_empty());
    let client = caps
        .get(3)
        .and_then(|m| non_empty(m.as_str().trim_start_matches('-')));
    let service = caps.get(4).and_then(|m| non_empty(m.as_str()));

    Some(BookingRequest { date, time, client, service })
}

/// Second whitespace-separated token of a `cancelar` body.
pub fn cancel_target(body: &str) -> Option<String> {
    body.split_whitespace().nth(1).map(str::to_string)
}

/// Exact `YYYY-MM-DD` naming a real calendar day.
pub fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    if !ISO_DATE.is_match(s) {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// `H:MM` or `HH:MM` on a 24-hour clock, zero-padded to `HH:MM`.
pub fn normalize_clock(s: &str) -> Option<String> {
    let caps = CLOCK.captures(s)?;
    let hour: u32 = caps[1].parse().ok()?;
    Some(format!("{:02}:{}", hour, &caps[2]))
}

/// Exact `HH:MM`, no padding allowed.
pub fn is_strict_clock(s: &str) -> bool {
    STRICT_CLOCK.is_match(s)
}
