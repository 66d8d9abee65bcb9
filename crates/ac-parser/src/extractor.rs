//! Free-text appointment extraction.
//!
//! Pulls a time, a date and a price out of an unstructured message and keeps
//! whatever is left as the service description. Tokens are consumed in a
//! fixed order: time, then date, then price, then the remainder. Nothing here
//! fails; unrecognized input falls back to defaults.

use ac_core::text::collapse_whitespace;
use chrono::{Datelike, Local, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

pub const DEFAULT_TIME: &str = "12:00";
pub const DEFAULT_SERVICE: &str = "Pendiente";

static TIME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([01]?\d|2[0-3]):([0-5]\d)\b").expect("valid time regex"));
static FULL_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})[-/](\d{1,2})[-/](\d{1,2})$").expect("valid date regex"));
static SHORT_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2})[-/](\d{1,2})$").expect("valid date regex"));
static TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\S+").expect("valid token regex"));
static PRICE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$?\s*\b(\d+(?:[.,]\d{1,2})?)\b").expect("valid price regex"));

/// Typed result of [`extract`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extraction {
    pub service: String,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`
    pub time: String,
    pub price: f64,
}

/// Extract against today's process-local calendar day.
pub fn extract(text: &str) -> Extraction {
    extract_at(text, Local::now().date_naive())
}

/// Extract with an explicit "today", used for partial dates and the default.
pub fn extract_at(text: &str, today: NaiveDate) -> Extraction {
    let mut working = text.to_string();

    let time = take_time(&mut working).unwrap_or_else(|| DEFAULT_TIME.to_string());
    let date = take_date(&mut working, today).unwrap_or(today);
    let price = take_price(&mut working).unwrap_or(0.0);

    let service = collapse_whitespace(&working)
        .trim_matches(|c: char| c.is_whitespace() || matches!(c, '-' | ',' | ';' | ':'))
        .to_string();

    Extraction {
        service: if service.is_empty() { DEFAULT_SERVICE.to_string() } else { service },
        date: date.format("%Y-%m-%d").to_string(),
        time,
        price,
    }
}

fn take_time(working: &mut String) -> Option<String> {
    let (whole, time) = {
        let caps = TIME.captures(working.as_str())?;
        let hour: u32 = caps[1].parse().ok()?;
        (caps.get(0)?.range(), format!("{:02}:{}", hour, &caps[2]))
    };
    working.replace_range(whole, " ");
    Some(time)
}

fn take_date(working: &mut String, today: NaiveDate) -> Option<NaiveDate> {
    let (whole, date) = TOKEN
        .find_iter(working.as_str())
        .find_map(|m| parse_date_token(m.as_str(), today.year()).map(|d| (m.range(), d)))?;
    working.replace_range(whole, " ");
    Some(date)
}

/// `YYYY-MM-DD`, `YYYY/MM/DD`, `DD/MM` or `DD-MM`; must be a real date.
pub fn parse_date_token(token: &str, current_year: i32) -> Option<NaiveDate> {
    if let Some(c) = FULL_DATE.captures(token) {
        return NaiveDate::from_ymd_opt(c[1].parse().ok()?, c[2].parse().ok()?, c[3].parse().ok()?);
    }
    let c = SHORT_DATE.captures(token)?;
    NaiveDate::from_ymd_opt(current_year, c[2].parse().ok()?, c[1].parse().ok()?)
}

fn take_price(working: &mut String) -> Option<f64> {
    let (whole, price) = {
        let m = PRICE.captures_iter(working.as_str()).last()?;
        let price: f64 = m[1].replace(',', ".").parse().ok()?;
        (m.get(0)?.range(), price)
    };
    working.replace_range(whole, " ");
    Some(price)
}
