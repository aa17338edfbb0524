// File: tarkovbot-common/src/models/trader.rs

use std::fmt;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The two independent trader-reset feeds the API publishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameMode {
    Regular,
    Pve,
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameMode::Regular => write!(f, "regular"),
            GameMode::Pve => write!(f, "pve"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraderRestockRecord {
    pub name: String,
    #[serde(rename = "resetTime", deserialize_with = "crate::models::timestamp::deserialize")]
    pub reset_time: DateTime<Utc>,
}

impl TraderRestockRecord {
    /// Button image bundled with the plugin for this trader.
    pub fn image_path(&self) -> String {
        format!("assets/{}.png", self.name)
    }
}

/// `{ "data": { "traders": [ ... ] } }`
#[derive(Debug, Clone, Deserialize)]
pub struct TraderResetsResponse {
    pub data: TraderResetsData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TraderResetsData {
    #[serde(default)]
    pub traders: Vec<TraderRestockRecord>,
}

/// One complete poll result. Snapshots are replaced, never merged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TraderSnapshot {
    pub traders: Vec<TraderRestockRecord>,
    pub fetched_at: Option<DateTime<Utc>>,
}

impl TraderSnapshot {
    pub fn new(traders: Vec<TraderRestockRecord>, fetched_at: DateTime<Utc>) -> Self {
        Self {
            traders,
            fetched_at: Some(fetched_at),
        }
    }

    /// True once at least one poll has succeeded.
    pub fn is_loaded(&self) -> bool {
        self.fetched_at.is_some()
    }

    /// Exact, case-sensitive name match.
    pub fn find(&self, name: &str) -> Option<&TraderRestockRecord> {
        self.traders.iter().find(|t| t.name == name)
    }
}
