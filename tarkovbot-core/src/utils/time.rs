// File: tarkovbot-core/src/utils/time.rs

use chrono::{DateTime, Duration, Utc};
use chrono_tz::Europe::Moscow;

/// In-game time runs seven times faster than real time.
pub const TARKOV_TIME_FACTOR: i64 = 7;

/// The second clock face lags the first by half a day.
pub const TARKOV_FACE_OFFSET_MS: i64 = 12 * 60 * 60 * 1000;

/// Label shown instead of a countdown once a restock time has passed.
pub const RESTOCK_LABEL: &str = "Restock";

/// Compact "time ago" string, e.g. `"1h 1m 1s"`, `"1m 5s"`, `"0s"`.
///
/// The hours segment appears only when there is at least one full hour and
/// the minutes segment only when there is at least one full minute, so an
/// exact hour renders as `"1h 0m 0s"`. Negative input is clamped to zero.
pub fn duration_to_clock(ms: i64) -> String {
    let seconds = ms.max(0) / 1000;
    let minutes = seconds / 60;
    let hours = minutes / 60;

    let mut out = String::new();
    if hours > 0 {
        out.push_str(&format!("{hours}h "));
    }
    if minutes > 0 {
        out.push_str(&format!("{}m ", minutes % 60));
    }
    out.push_str(&format!("{}s", seconds % 60));
    out
}

/// Countdown as `H:MM:SS`, or [`RESTOCK_LABEL`] when `delta_ms <= 0`.
pub fn countdown_clock(delta_ms: i64) -> String {
    if delta_ms <= 0 {
        return RESTOCK_LABEL.to_string();
    }
    let hours = delta_ms / (1000 * 60 * 60);
    let minutes = (delta_ms % (1000 * 60 * 60)) / (1000 * 60);
    let seconds = (delta_ms % (1000 * 60)) / 1000;
    format!("{hours}:{minutes:02}:{seconds:02}")
}

/// Both in-game clock faces as `HH:MM` in Moscow time: the left one at
/// `now * 7`, the right one twelve hours behind it.
pub fn tarkov_clock(now: DateTime<Utc>) -> (String, String) {
    let left = tarkov_instant(now);
    let right = left - Duration::milliseconds(TARKOV_FACE_OFFSET_MS);
    (format_face(left), format_face(right))
}

/// The accelerated instant behind the left clock face.
pub fn tarkov_instant(now: DateTime<Utc>) -> DateTime<Utc> {
    let scaled = now.timestamp_millis().saturating_mul(TARKOV_TIME_FACTOR);
    DateTime::from_timestamp_millis(scaled).unwrap_or_default()
}

fn format_face(instant: DateTime<Utc>) -> String {
    instant.with_timezone(&Moscow).format("%H:%M").to_string()
}
