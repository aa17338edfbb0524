//! tarkovbot-core/src/actions/mod.rs
//!
//! The four button behaviors and the registry the connection dispatches
//! host events through.

pub mod goons_tracker;
pub mod handles;
pub mod map_info;
pub mod tarkov_time;
pub mod trader_restock;

use std::sync::Arc;
use tracing::debug;

use tarkovbot_common::models::ActionSettings;
use tarkovbot_common::protocol::{ActionKind, EventKind, HostEvent};

use crate::context::PluginContext;

pub use goons_tracker::GoonsTrackerAction;
pub use map_info::MapInfoAction;
pub use tarkov_time::TarkovTimeAction;
pub use trader_restock::TraderRestockAction;

/// Lifecycle callbacks of one button type. Every callback defaults to a
/// no-op; behaviors override the ones they care about. Callbacks must not
/// block: anything slow is spawned.
pub trait PluginAction: Send + Sync {
    fn kind(&self) -> ActionKind;

    fn on_key_down(&self, _context: &str, _settings: &ActionSettings) {}

    fn on_key_up(&self, _context: &str, _settings: &ActionSettings) {}

    fn on_will_appear(&self, _context: &str, _settings: &ActionSettings) {}

    fn on_will_disappear(&self, _context: &str, _settings: &ActionSettings) {}

    fn on_did_receive_settings(&self, _context: &str, _settings: &ActionSettings) {}
}

/// Owns one instance of every behavior.
pub struct ActionRegistry {
    goons_tracker: GoonsTrackerAction,
    tarkov_time: TarkovTimeAction,
    trader_restock: TraderRestockAction,
    map_info: MapInfoAction,
}

impl ActionRegistry {
    pub fn new(ctx: Arc<PluginContext>) -> Self {
        Self {
            goons_tracker: GoonsTrackerAction::new(ctx.clone()),
            tarkov_time: TarkovTimeAction::new(ctx.clone()),
            trader_restock: TraderRestockAction::new(ctx.clone()),
            map_info: MapInfoAction::new(ctx),
        }
    }

    pub fn action(&self, kind: ActionKind) -> &dyn PluginAction {
        match kind {
            ActionKind::GoonsTracker => &self.goons_tracker,
            ActionKind::TarkovTime => &self.tarkov_time,
            ActionKind::TraderRestock => &self.trader_restock,
            ActionKind::MapInfo => &self.map_info,
        }
    }

    pub fn goons_tracker(&self) -> &GoonsTrackerAction {
        &self.goons_tracker
    }

    pub fn tarkov_time(&self) -> &TarkovTimeAction {
        &self.tarkov_time
    }

    pub fn trader_restock(&self) -> &TraderRestockAction {
        &self.trader_restock
    }

    pub fn dispatch(&self, event: &HostEvent) {
        let action = self.action(event.action);
        let context = event.context.as_str();
        let settings = &event.settings;
        debug!("[Dispatch] {} → {} on {}", event.kind.name(), action.kind().id(), context);
        match event.kind {
            EventKind::KeyDown => action.on_key_down(context, settings),
            EventKind::KeyUp => action.on_key_up(context, settings),
            EventKind::WillAppear => action.on_will_appear(context, settings),
            EventKind::WillDisappear => action.on_will_disappear(context, settings),
            EventKind::DidReceiveSettings => action.on_did_receive_settings(context, settings),
        }
    }
}
