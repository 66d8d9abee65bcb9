use crate::*;
use crate::extractor::{parse_date_token, DEFAULT_SERVICE, DEFAULT_TIME};
use chrono::{Local, NaiveDate};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
}

// ========== Extractor ==========

#[test]
fn test_extract_full_message() {
    let e = extract_at("Barba 31/10 12:30 90", today());
    assert_eq!(e.service, "Barba");
    assert_eq!(e.date, "2026-10-31");
    assert_eq!(e.time, "12:30");
    assert_eq!(e.price, 90.0);
}

#[test]
fn test_extract_empty_defaults() {
    let e = extract_at("", today());
    assert_eq!(e.service, DEFAULT_SERVICE);
    assert_eq!(e.date, "2026-10-16");
    assert_eq!(e.time, DEFAULT_TIME);
    assert_eq!(e.price, 0.0);
}

#[test]
fn test_extract_uses_local_today() {
    let e = extract("Corte");
    assert_eq!(e.date, Local::now().date_naive().format("%Y-%m-%d").to_string());
}

#[test]
fn test_extract_time_is_stripped() {
    let e = extract_at("Masaje relajante 18:45", today());
    assert_eq!(e.time, "18:45");
    assert_eq!(e.service, "Masaje relajante");
    assert!(!e.service.contains("18"));
}

#[test]
fn test_extract_pads_single_digit_hour() {
    let e = extract_at("Corte 9:05", today());
    assert_eq!(e.time, "09:05");
    assert_eq!(e.service, "Corte");
}

#[test]
fn test_extract_rejects_out_of_range_time() {
    let e = extract_at("Corte 25:10", today());
    assert_eq!(e.time, DEFAULT_TIME);
}

#[test]
fn test_extract_full_date_and_currency() {
    let e = extract_at("Corte clásico 2025-11-05 $150.50", today());
    assert_eq!(e.date, "2025-11-05");
    assert_eq!(e.price, 150.5);
    assert_eq!(e.service, "Corte clásico");
}

#[test]
fn test_extract_slash_full_date() {
    let e = extract_at("Tinte 2027/01/09 10:00", today());
    assert_eq!(e.date, "2027-01-09");
    assert_eq!(e.time, "10:00");
    assert_eq!(e.price, 0.0);
}

#[test]
fn test_extract_dash_short_date_comma_price() {
    let e = extract_at("Uñas 05-12 350,5", today());
    assert_eq!(e.date, "2026-12-05");
    assert_eq!(e.price, 350.5);
    assert_eq!(e.service, "Uñas");
}

#[test]
fn test_extract_last_number_is_price() {
    let e = extract_at("Corte 2 personas 300", today());
    assert_eq!(e.price, 300.0);
    assert_eq!(e.service, "Corte 2 personas");
}

#[test]
fn test_extract_removes_matched_date_token_only() {
    let e = extract_at("Promo2x31/10 31/10 90", today());
    assert_eq!(e.service, "Promo2x31/10");
    assert_eq!(e.date, "2026-10-31");
    assert_eq!(e.price, 90.0);
}

#[test]
fn test_extract_trims_separators() {
    let e = extract_at("Barba - 150", today());
    assert_eq!(e.service, "Barba");
    assert_eq!(e.price, 150.0);
}

#[test]
fn test_extract_only_numbers_defaults_service() {
    let e = extract_at("12:00 300", today());
    assert_eq!(e.service, DEFAULT_SERVICE);
    assert_eq!(e.price, 300.0);
}

#[test]
fn test_extract_serializes() {
    let e = extract_at("Barba 31/10 12:30 90", today());
    let v = serde_json::to_value(&e).unwrap();
    assert_eq!(v["date"], "2026-10-31");
    assert_eq!(v["price"], 90.0);
}

#[test]
fn test_parse_date_token_forms() {
    assert_eq!(parse_date_token("2025-10-31", 2026), NaiveDate::from_ymd_opt(2025, 10, 31));
    assert_eq!(parse_date_token("31/10", 2026), NaiveDate::from_ymd_opt(2026, 10, 31));
    assert_eq!(parse_date_token("1-2", 2026), NaiveDate::from_ymd_opt(2026, 2, 1));
    assert_eq!(parse_date_token("31/02", 2026), None);
    assert_eq!(parse_date_token("2025-13-01", 2026), None);
    assert_eq!(parse_date_token("hola", 2026), None);
}

// ========== Booking command ==========

#[test]
fn test_parse_booking_full() {
    let b = parse_booking("reservar 2025-10-31 12:30 Juan - Corte").unwrap();
    assert_eq!(b.date, "2025-10-31");
    assert_eq!(b.time, "12:30");
    assert_eq!(b.client.as_deref(), Some("Juan"));
    assert_eq!(b.service.as_deref(), Some("Corte"));
}

#[test]
fn test_parse_booking_multiword_and_case() {
    let b = parse_booking("Reservar 2025-10-31 9:00 Ana Pérez - Corte + Barba").unwrap();
    assert_eq!(b.time, "09:00");
    assert_eq!(b.client.as_deref(), Some("Ana Pérez"));
    assert_eq!(b.service.as_deref(), Some("Corte + Barba"));
}

#[test]
fn test_parse_booking_without_service() {
    let b = parse_booking("reservar 2025-10-31 12:30 Juan").unwrap();
    assert_eq!(b.client.as_deref(), Some("Juan"));
    assert!(b.service.is_none());
}

#[test]
fn test_parse_booking_requires_name() {
    assert!(parse_booking("reservar 2025-10-31 12:30").is_none());
    assert!(parse_booking("reservar 2025-10-31 12:30   ").is_none());
    assert!(parse_booking("reservar 2025-10-31 12:30 #spa_roma").is_none());
}

#[test]
fn test_parse_booking_blank_name_uses_fallback() {
    let b = parse_booking("reservar 2025-10-31 12:30 -").unwrap();
    assert!(b.client.is_none());
    let cmd = b.into_command("WA:521");
    assert_eq!(cmd.client_name, "WA:521");
    assert_eq!(cmd.service_name, command::DEFAULT_BOOKED_SERVICE);
}

#[test]
fn test_parse_booking_ignores_hashtag() {
    let b = parse_booking("reservar 2025-10-31 12:30 Juan - Corte #spa_roma").unwrap();
    assert_eq!(b.service.as_deref(), Some("Corte"));
}

#[test]
fn test_parse_booking_rejects_bad_shapes() {
    assert!(parse_booking("reservar mañana a las 5").is_none());
    assert!(parse_booking("reservar 31/10 12:30 Juan").is_none());
    assert!(parse_booking("reservar 2025-02-30 12:30 Juan").is_none());
    assert!(parse_booking("reservar 2025-10-31 24:00 Juan").is_none());
}

#[test]
fn test_booking_into_command() {
    let cmd = parse_booking("reservar 2025-10-31 12:30 Juan - Corte").unwrap().into_command("Cliente");
    assert_eq!(cmd.client_name, "Juan");
    assert_eq!(cmd.service_name, "Corte");
    assert_eq!(cmd.price, None);
}

// ========== Cancel + validators ==========

#[test]
fn test_cancel_target() {
    assert_eq!(cancel_target("cancelar ACMX-20251031123000-ABCD").as_deref(), Some("ACMX-20251031123000-ABCD"));
    assert_eq!(cancel_target("cancelar"), None);
    assert_eq!(cancel_target("cancelar a b").as_deref(), Some("a"));
}

#[test]
fn test_iso_date_validator() {
    assert!(parse_iso_date("2025-10-31").is_some());
    assert!(parse_iso_date("2025-1-5").is_none());
    assert!(parse_iso_date("2025-02-29").is_none());
    assert!(parse_iso_date("2024-02-29").is_some());
}

#[test]
fn test_clock_validators() {
    assert_eq!(normalize_clock("7:30").as_deref(), Some("07:30"));
    assert!(normalize_clock("7:3").is_none());
    assert!(is_strict_clock("09:00"));
    assert!(is_strict_clock("23:59"));
    assert!(!is_strict_clock("9:00"));
    assert!(!is_strict_clock("24:00"));
}
