// File: tarkovbot-core/src/actions/map_info.rs

use std::sync::Arc;

use tarkovbot_common::models::ActionSettings;
use tarkovbot_common::protocol::ActionKind;

use crate::actions::PluginAction;
use crate::context::PluginContext;

pub const PROMPT_TITLE: &str = "Switch\nProfile";

/// Jumps the whole device to the bundled map-info profile on release.
pub struct MapInfoAction {
    ctx: Arc<PluginContext>,
}

impl MapInfoAction {
    pub fn new(ctx: Arc<PluginContext>) -> Self {
        Self { ctx }
    }
}

impl PluginAction for MapInfoAction {
    fn kind(&self) -> ActionKind {
        ActionKind::MapInfo
    }

    fn on_will_appear(&self, context: &str, _settings: &ActionSettings) {
        self.ctx.host.set_title(context, PROMPT_TITLE);
    }

    fn on_key_up(&self, context: &str, _settings: &ActionSettings) {
        self.ctx
            .host
            .switch_to_profile(context, self.ctx.config.map_info_profile.clone());
    }
}
