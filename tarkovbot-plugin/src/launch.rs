//! tarkovbot-plugin/src/launch.rs
//!
//! The host starts the plugin as
//! `tarkovbot -port 28196 -pluginUUID <id> -registerEvent registerPlugin -info <json>`.
//! clap only understands `--long` flags, so single-dash words are rewritten
//! before parsing.

use clap::Parser;
use serde::Deserialize;
use tracing::warn;

#[derive(Parser, Debug, Clone)]
#[command(name = "tarkovbot")]
#[command(author, version, about = "TarkovBot tools - trader restocks, tarkov time and goons tracking for the button deck")]
pub struct LaunchArgs {
    /// Port of the host's local WebSocket server
    #[arg(long)]
    pub port: u16,

    /// Identifier the host assigned to this plugin instance
    #[arg(long = "pluginUUID")]
    pub plugin_uuid: String,

    /// Event name to register with
    #[arg(long = "registerEvent")]
    pub register_event: String,

    /// JSON describing the host application and attached devices
    #[arg(long)]
    pub info: Option<String>,
}

impl LaunchArgs {
    /// Decoded `-info` blob; `None` when absent or malformed.
    pub fn host_info(&self) -> Option<HostInfo> {
        let raw = self.info.as_deref()?;
        match serde_json::from_str(raw) {
            Ok(info) => Some(info),
            Err(e) => {
                warn!("Ignoring malformed -info blob: {}", e);
                None
            }
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HostInfo {
    #[serde(default)]
    pub application: ApplicationInfo,
    #[serde(default)]
    pub devices: Vec<DeviceInfo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApplicationInfo {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeviceInfo {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<u32>,
}

/// Turn `-port` into `--port` (and so on). Values, `--flags` and
/// single-letter switches are left alone.
pub fn normalize_launch_args<I, S>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    args.into_iter()
        .map(Into::into)
        .enumerate()
        .map(|(i, arg)| {
            let is_single_dash_word = i > 0
                && arg.len() > 2
                && arg.starts_with('-')
                && !arg.starts_with("--")
                && arg[1..].chars().all(|c| c.is_ascii_alphanumeric());
            if is_single_dash_word {
                format!("-{arg}")
            } else {
                arg
            }
        })
        .collect()
}
