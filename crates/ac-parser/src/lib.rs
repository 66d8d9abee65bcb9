//! Message parsing for AutoCita: free-text extraction and strict commands.

pub mod command;
pub mod extractor;

pub use command::{cancel_target, is_strict_clock, normalize_clock, parse_booking, parse_iso_date, BookingRequest};
pub use extractor::{extract, extract_at, Extraction};

#[cfg(test)]
mod tests;
