// File: tarkovbot-core/src/actions/goons_tracker.rs

use std::sync::Arc;
use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use tarkovbot_common::models::{ActionSettings, GoonsLocationRecord};
use tarkovbot_common::protocol::ActionKind;

use crate::Error;
use crate::actions::PluginAction;
use crate::actions::handles::ContextTasks;
use crate::context::PluginContext;
use crate::utils::time::duration_to_clock;

pub const PROMPT_TITLE: &str = "Press to\nGet\nLocation";
pub const LOADING_TITLE: &str = "Loading";
pub const INVALID_TOKEN_TITLE: &str = "Invalid\nToken";
pub const ERROR_TITLE: &str = "Error";

/// Shows where the goons were last reported, on demand.
pub struct GoonsTrackerAction {
    ctx: Arc<PluginContext>,
    requests: ContextTasks,
}

impl GoonsTrackerAction {
    pub fn new(ctx: Arc<PluginContext>) -> Self {
        Self {
            ctx,
            requests: ContextTasks::new(),
        }
    }

    /// Number of lookups still waiting on the API.
    pub fn in_flight(&self) -> usize {
        self.requests.active()
    }
}

/// `"{location}\n{time ago}"`
pub fn location_title(record: &GoonsLocationRecord, now: DateTime<Utc>) -> String {
    let elapsed = (now - record.reported).num_milliseconds();
    format!("{}\n{}", record.location, duration_to_clock(elapsed))
}

pub fn failure_title(err: &Error) -> &'static str {
    if err.is_unauthorized() {
        INVALID_TOKEN_TITLE
    } else {
        ERROR_TITLE
    }
}

impl PluginAction for GoonsTrackerAction {
    fn kind(&self) -> ActionKind {
        ActionKind::GoonsTracker
    }

    fn on_will_appear(&self, context: &str, _settings: &ActionSettings) {
        self.ctx.host.set_title(context, PROMPT_TITLE);
    }

    fn on_key_down(&self, context: &str, settings: &ActionSettings) {
        let Some(token) = settings.token() else {
            self.requests.cancel(context);
            self.ctx.host.set_title(context, INVALID_TOKEN_TITLE);
            return;
        };

        let ctx = self.ctx.clone();
        let token = token.to_string();
        let source = settings.goons_source();
        let context_owned = context.to_string();
        // A newer press supersedes the lookup this context may still have in flight.
        self.requests.replace(context, |ticket| {
            ticket.render(|| ctx.host.set_title(&context_owned, LOADING_TITLE));
            async move {
                let result = match ctx.api.goons_location(&token).await {
                    Ok(response) => response.select(source),
                    Err(e) => Err(e),
                };
                let title = match result {
                    Ok(record) => {
                        debug!("goons at {} (source={})", record.location, source);
                        location_title(&record, Utc::now())
                    }
                    Err(e) => {
                        warn!("goons lookup failed: {}", e);
                        failure_title(&e).to_string()
                    }
                };
                ticket.render(|| ctx.host.set_title(&context_owned, title));
            }
        });
    }

    fn on_will_disappear(&self, context: &str, _settings: &ActionSettings) {
        self.requests.cancel(context);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn title_has_location_then_elapsed() {
        let now = Utc::now();
        let record = GoonsLocationRecord {
            location: "Lighthouse".into(),
            reported: now - Duration::milliseconds(3_661_000),
        };
        assert_eq!(location_title(&record, now), "Lighthouse\n1h 1m 1s");
    }

    #[test]
    fn failure_titles() {
        assert_eq!(failure_title(&Error::Status(401)), INVALID_TOKEN_TITLE);
        assert_eq!(failure_title(&Error::Status(500)), ERROR_TITLE);
        assert_eq!(failure_title(&Error::Parse("x".into())), ERROR_TITLE);
    }
}
