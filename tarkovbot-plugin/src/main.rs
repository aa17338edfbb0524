use std::future::Future;
use std::sync::Arc;
use clap::Parser;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use tarkovbot_core::actions::ActionRegistry;
use tarkovbot_core::connection::HostConnection;
use tarkovbot_core::context::trader_datasets;
use tarkovbot_core::tasks::trader_refresh::spawn_trader_refreshers;
use tarkovbot_core::{
    DefaultHttpClient, Error, HostHandle, HttpClient, PluginConfig, PluginContext, RemoteDataClient,
};
use tarkovbot_core::protocol::OutboundMessage;

mod launch;
use launch::{normalize_launch_args, LaunchArgs};

fn init_tracing() {
    let filter = EnvFilter::from_default_env()
        .add_directive("tarkovbot=info".parse().unwrap_or_default());
    let sub = fmt().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(sub)
        .expect("Failed to set global subscriber");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let args = LaunchArgs::parse_from(normalize_launch_args(std::env::args()));
    info!("TarkovBot plugin starting. port={}, uuid={}, register_event={}",
          args.port, args.plugin_uuid, args.register_event);

    if let Some(host_info) = args.host_info() {
        info!("Host application {} on {} ({}); {} device(s)",
              host_info.application.version.as_deref().unwrap_or("?"),
              host_info.application.platform.as_deref().unwrap_or("?"),
              host_info.application.language.as_deref().unwrap_or("?"),
              host_info.devices.len());
        for device in &host_info.devices {
            info!("  device {} ({}, type {})",
                  device.id,
                  device.name.as_deref().unwrap_or("unnamed"),
                  device.kind.map_or_else(|| "?".to_string(), |k| k.to_string()));
        }
    }

    let config = PluginConfig::default();

    // 1) Outbound queue; drained once the socket is up.
    let (host, outbound_rx) = HostHandle::channel(args.plugin_uuid.clone());

    // 2) API client + trader datasets, refreshed in the background from now on.
    let http: Arc<dyn HttpClient> = Arc::new(DefaultHttpClient::new());
    let api = Arc::new(RemoteDataClient::new(http, config.endpoints.clone()));
    let (writers, datasets) = trader_datasets();
    let _refreshers = spawn_trader_refreshers(api.clone(), writers, &config);

    // 3) Actions share one context.
    let ctx = Arc::new(PluginContext::new(host, api, datasets, config));
    let registry = ActionRegistry::new(ctx);

    // 4) Talk to the host until it hangs up, then until we are told to stop.
    let connection = HostConnection::new(args.port, &args.plugin_uuid, &args.register_event);
    serve(&connection, &registry, outbound_rx, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Could not listen for Ctrl+C: {:?}", e);
        }
    })
    .await?;
    info!("Got Ctrl+C => exiting plugin.");
    Ok(())
}

/// Run the host connection. If the host cannot be reached or the
/// registration fails, return the error right away. After a session that
/// registered and then closed, timers and refreshers keep going until
/// `shutdown` resolves; the host terminates us when it is done.
async fn serve<F>(
    connection: &HostConnection,
    registry: &ActionRegistry,
    outbound_rx: UnboundedReceiver<OutboundMessage>,
    shutdown: F,
) -> Result<(), Error>
where
    F: Future<Output = ()>,
{
    if let Err(e) = connection.run(registry, outbound_rx).await {
        error!("Host connection error: {:?}", e);
        return Err(e);
    }

    info!("Host connection closed. Waiting for shutdown.");
    shutdown.await;
    Ok(())
}
