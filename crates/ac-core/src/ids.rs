//! Appointment identifiers: `ACMX-<local timestamp>-<4 base36 chars>`.
//!
//! Not collision-free; two bookings in the same second share the timestamp
//! and rely on the random suffix alone.

use chrono::{Local, NaiveDateTime};
use rand::Rng;

pub const ID_PREFIX: &str = "ACMX";

const BASE36: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const SUFFIX_LEN: usize = 4;

/// Build an identifier for the given local time.
pub fn appointment_id_at<R: Rng + ?Sized>(now: NaiveDateTime, rng: &mut R) -> String {
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();
    format!("{}-{}-{}", ID_PREFIX, now.format("%Y%m%d%H%M%S"), suffix)
}

/// Fresh identifier stamped with the process-local clock.
pub fn new_appointment_id() -> String {
    appointment_id_at(Local::now().naive_local(), &mut rand::thread_rng())
}
