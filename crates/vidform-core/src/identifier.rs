//! Submission identifier generation.

use chrono::{Datelike, Local, NaiveDateTime, Timelike};

/// Build `{base}_{HH}-{MM}-{SS}_{YYYY}-{MM}-{DD}` from local wall-clock time.
///
/// Two attempts with the same base inside the same second produce the same
/// identifier.
pub fn build_identifier(base_id: &str, now: NaiveDateTime) -> String {
    // month0() is zero-based
    let month = now.month0() + 1;
    format!(
        "{}_{:02}-{:02}-{:02}_{:04}-{:02}-{:02}",
        base_id,
        now.hour(),
        now.minute(),
        now.second(),
        now.year(),
        month,
        now.day()
    )
}

/// Current local wall-clock time.
pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}
