// File: tarkovbot-core/src/actions/trader_restock.rs

use std::sync::Arc;
use chrono::{DateTime, Utc};
use tokio::time::{interval, MissedTickBehavior};
use tracing::debug;

use tarkovbot_common::models::{ActionSettings, TraderRestockRecord};
use tarkovbot_common::protocol::ActionKind;

use crate::actions::PluginAction;
use crate::actions::handles::ContextTasks;
use crate::context::PluginContext;
use crate::utils::time::countdown_clock;

// Titles start with three blank lines so the text sits under the trader portrait.
pub const LOADING_TITLE: &str = "\n\n\nLoading";
pub const SELECT_TRADER_TITLE: &str = "Select\nTrader";
pub const NO_DATA_TITLE: &str = "No Data";

/// Per-button countdown to the next restock of the selected trader.
pub struct TraderRestockAction {
    ctx: Arc<PluginContext>,
    timers: ContextTasks,
}

/// Title and image for one render tick.
pub fn restock_render(record: Option<&TraderRestockRecord>, now: DateTime<Utc>) -> (String, String) {
    match record {
        Some(record) => {
            let delta = (record.reset_time - now).num_milliseconds();
            (format!("\n\n\n{}", countdown_clock(delta)), record.image_path())
        }
        None => (NO_DATA_TITLE.to_string(), String::new()),
    }
}

impl TraderRestockAction {
    pub fn new(ctx: Arc<PluginContext>) -> Self {
        Self {
            ctx,
            timers: ContextTasks::new(),
        }
    }

    /// (Re)start the render timer for `context` using `settings`.
    pub fn start_updating(&self, context: &str, settings: &ActionSettings) {
        let ctx = self.ctx.clone();
        let context_owned = context.to_string();
        let trader = settings.selected_trader().unwrap_or_default().to_string();
        let mode = settings.trader_mode();
        debug!("restock timer for {} ({}) on {}", trader, mode, context);

        self.timers.replace(context, |ticket| async move {
            let mut ticker = interval(ctx.config.trader_tick);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                let snapshot = ctx.traders.snapshot(mode);
                let (title, image) = restock_render(snapshot.find(&trader), Utc::now());
                ticket.render(|| {
                    ctx.host.set_title(&context_owned, title);
                    ctx.host.set_image(&context_owned, image);
                });
            }
        });
    }

    pub fn stop_updating(&self, context: &str) {
        self.timers.cancel(context);
    }

    pub fn is_updating(&self, context: &str) -> bool {
        self.timers.is_active(context)
    }

    pub fn active_timers(&self) -> usize {
        self.timers.active()
    }

    fn appear(&self, context: &str, settings: &ActionSettings) {
        self.ctx.host.set_title(context, LOADING_TITLE);
        if settings.selected_trader().is_some() {
            self.start_updating(context, settings);
        } else {
            self.ctx.host.set_image(context, "");
            self.ctx.host.set_title(context, SELECT_TRADER_TITLE);
        }
    }
}

impl PluginAction for TraderRestockAction {
    fn kind(&self) -> ActionKind {
        ActionKind::TraderRestock
    }

    fn on_will_appear(&self, context: &str, settings: &ActionSettings) {
        self.appear(context, settings);
    }

    fn on_will_disappear(&self, context: &str, _settings: &ActionSettings) {
        self.stop_updating(context);
    }

    fn on_did_receive_settings(&self, context: &str, settings: &ActionSettings) {
        self.stop_updating(context);
        self.appear(context, settings);
    }
}
