// File: tarkovbot-core/src/config.rs

use std::time::Duration;
use tarkovbot_common::models::GameMode;

use crate::api::ApiEndpoints;

/// Runtime knobs. Everything has a built-in default; the host only tells
/// us where to connect (see the plugin binary's launch arguments).
#[derive(Debug, Clone)]
pub struct PluginConfig {
    pub endpoints: ApiEndpoints,

    /// Poll period of the regular trader-reset feed.
    pub regular_refresh_interval: Duration,

    /// Poll period of the PVE feed. Deliberately not equal to the regular
    /// one so the two polls drift apart instead of always coinciding.
    pub pve_refresh_interval: Duration,

    /// How often a trader-restock button re-renders its countdown.
    pub trader_tick: Duration,

    /// How often a tarkov-time button re-renders its clock faces.
    pub clock_tick: Duration,

    /// Profile the map-info button switches the device to.
    pub map_info_profile: String,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            endpoints: ApiEndpoints::default(),
            regular_refresh_interval: Duration::from_secs(5 * 60),
            pve_refresh_interval: Duration::from_secs(5 * 60 + 50),
            trader_tick: Duration::from_secs(1),
            clock_tick: Duration::from_secs(2),
            map_info_profile: "Map Info XL".to_string(),
        }
    }
}

impl PluginConfig {
    pub fn refresh_interval(&self, mode: GameMode) -> Duration {
        match mode {
            GameMode::Regular => self.regular_refresh_interval,
            GameMode::Pve => self.pve_refresh_interval,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refresh_intervals_are_skewed() {
        let cfg = PluginConfig::default();
        assert_eq!(cfg.refresh_interval(GameMode::Regular), Duration::from_secs(300));
        assert_eq!(cfg.refresh_interval(GameMode::Pve), Duration::from_secs(350));
        assert_ne!(cfg.regular_refresh_interval, cfg.pve_refresh_interval);
    }
}
