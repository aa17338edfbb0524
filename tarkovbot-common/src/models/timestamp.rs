// File: tarkovbot-common/src/models/timestamp.rs
//
// The tarkovbot API is not consistent about how it encodes instants, so
// record fields accept RFC 3339, naive "YYYY-MM-DD HH:MM:SS" (UTC) and
// epoch milliseconds.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

use crate::Error;

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Millis(i64),
    FractionalMillis(f64),
    Text(String),
}

pub fn from_epoch_millis(ms: i64) -> Result<DateTime<Utc>, Error> {
    DateTime::from_timestamp_millis(ms)
        .ok_or_else(|| Error::Parse(format!("timestamp out of range: {ms}")))
}

/// Parse a textual timestamp in any of the shapes the API is known to emit.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, Error> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Ok(naive.and_utc());
        }
    }
    if let Ok(ms) = raw.parse::<i64>() {
        return from_epoch_millis(ms);
    }
    Err(Error::Parse(format!("unrecognised timestamp '{raw}'")))
}

/// `deserialize_with` adapter for record fields.
pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let parsed = match RawTimestamp::deserialize(deserializer)? {
        RawTimestamp::Millis(ms) => from_epoch_millis(ms),
        RawTimestamp::FractionalMillis(ms) => from_epoch_millis(ms.floor() as i64),
        RawTimestamp::Text(text) => parse_timestamp(&text),
    };
    parsed.map_err(serde::de::Error::custom)
}
