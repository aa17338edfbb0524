// File: tarkovbot-core/src/actions/tarkov_time.rs

use std::sync::Arc;
use chrono::Utc;
use tokio::time::{interval, MissedTickBehavior};

use tarkovbot_common::models::ActionSettings;
use tarkovbot_common::protocol::ActionKind;

use crate::actions::PluginAction;
use crate::actions::handles::ContextTasks;
use crate::context::PluginContext;
use crate::utils::time::tarkov_clock;

pub const LOADING_TITLE: &str = "Loading";

/// Both in-game clock faces, refreshed every couple of seconds.
pub struct TarkovTimeAction {
    ctx: Arc<PluginContext>,
    timers: ContextTasks,
}

impl TarkovTimeAction {
    pub fn new(ctx: Arc<PluginContext>) -> Self {
        Self {
            ctx,
            timers: ContextTasks::new(),
        }
    }

    pub fn active_timers(&self) -> usize {
        self.timers.active()
    }
}

pub fn clock_title() -> String {
    let (left, right) = tarkov_clock(Utc::now());
    format!("{left}\n{right}")
}

impl PluginAction for TarkovTimeAction {
    fn kind(&self) -> ActionKind {
        ActionKind::TarkovTime
    }

    fn on_will_appear(&self, context: &str, _settings: &ActionSettings) {
        self.ctx.host.set_title(context, LOADING_TITLE);

        // One timer per button; several clock buttons can be on screen at once.
        let ctx = self.ctx.clone();
        let context_owned = context.to_string();
        self.timers.replace(context, |ticket| async move {
            let mut ticker = interval(ctx.config.clock_tick);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                ticket.render(|| ctx.host.set_title(&context_owned, clock_title()));
            }
        });
    }

    fn on_will_disappear(&self, context: &str, _settings: &ActionSettings) {
        self.timers.cancel(context);
    }
}
