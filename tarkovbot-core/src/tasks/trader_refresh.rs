// tarkovbot-core/src/tasks/trader_refresh.rs

use std::sync::Arc;
use std::time::Duration;
use chrono::Utc;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, error};

use tarkovbot_common::models::TraderSnapshot;

use crate::Error;
use crate::api::RemoteDataClient;
use crate::config::PluginConfig;
use crate::context::{DatasetWriter, DatasetWriters};

/// Poll the writer's feed once and publish the result as a new snapshot.
/// On failure nothing is published, so readers keep the previous snapshot.
pub async fn refresh_once(api: &RemoteDataClient, writer: &DatasetWriter) -> Result<usize, Error> {
    let traders = api.trader_resets(writer.mode()).await?;
    let count = traders.len();
    writer.publish(TraderSnapshot::new(traders, Utc::now()));
    Ok(count)
}

/// Spawns a background task that refreshes one trader dataset immediately
/// and then every `period`, forever. Failures are logged and swallowed.
pub fn spawn_trader_refresh_task(
    api: Arc<RemoteDataClient>,
    writer: DatasetWriter,
    period: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            match refresh_once(&api, &writer).await {
                Ok(count) => {
                    debug!("[TraderRefresh] {} dataset refreshed: {} trader(s)", writer.mode(), count);
                }
                Err(e) => {
                    error!("[TraderRefresh] {} dataset refresh failed: {:?}", writer.mode(), e);
                }
            }
        }
    })
}

/// Start one refresher per game mode, each on its own period.
pub fn spawn_trader_refreshers(
    api: Arc<RemoteDataClient>,
    writers: DatasetWriters,
    config: &PluginConfig,
) -> Vec<JoinHandle<()>> {
    let DatasetWriters { regular, pve } = writers;
    let regular_period = config.refresh_interval(regular.mode());
    let pve_period = config.refresh_interval(pve.mode());
    vec![
        spawn_trader_refresh_task(api.clone(), regular, regular_period),
        spawn_trader_refresh_task(api, pve, pve_period),
    ]
}
