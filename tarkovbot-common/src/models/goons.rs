// File: tarkovbot-common/src/models/goons.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Error;
use crate::models::settings::GoonsSource;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoonsLocationRecord {
    pub location: String,
    #[serde(deserialize_with = "crate::models::timestamp::deserialize")]
    pub reported: DateTime<Utc>,
}

/// Raw goons payload. Depending on the account it is either a single
/// record `{ location, reported }` or `{ pve: {...}, pvp: {...} }`, so the
/// shape is only resolved once the caller knows which source it wants.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct GoonsLocationResponse(pub Value);

impl GoonsLocationResponse {
    pub fn select(&self, source: GoonsSource) -> Result<GoonsLocationRecord, Error> {
        let node = match source {
            GoonsSource::Pve => self.0.get("pve"),
            GoonsSource::Pvp => self.0.get("pvp"),
            GoonsSource::All => Some(&self.0),
        }
        .ok_or_else(|| Error::Parse(format!("goons payload has no '{source}' section")))?;

        Ok(GoonsLocationRecord::deserialize(node)?)
    }
}
