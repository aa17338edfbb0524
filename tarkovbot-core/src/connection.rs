//! tarkovbot-core/src/connection.rs
//!
//! The host connection: WebSocket to the host's local port, registration
//! handshake, inbound event routing and the outbound writer task.

use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};
use tracing::{debug, error, info, warn};

use tarkovbot_common::models::DecodedSettings;
use tarkovbot_common::protocol::{HostEvent, InboundEnvelope, OutboundMessage, RegistrationMessage};

use crate::Error;
use crate::actions::ActionRegistry;

/// Where to find the host and how to introduce ourselves.
#[derive(Debug, Clone, PartialEq)]
pub struct HostConnection {
    port: u16,
    plugin_uuid: String,
    register_event: String,
}

impl HostConnection {
    pub fn new(port: u16, plugin_uuid: impl Into<String>, register_event: impl Into<String>) -> Self {
        Self {
            port,
            plugin_uuid: plugin_uuid.into(),
            register_event: register_event.into(),
        }
    }

    pub fn url(&self) -> String {
        format!("ws://127.0.0.1:{}", self.port)
    }

    pub fn registration(&self) -> RegistrationMessage {
        RegistrationMessage {
            event: self.register_event.clone(),
            uuid: self.plugin_uuid.clone(),
        }
    }

    /// Connect, register, then route host events into `registry` until the
    /// host closes the socket. Commands queued on `outbound` are written out
    /// by a separate task. There is no reconnect: returning `Ok(())` means
    /// the host went away.
    pub async fn run(
        &self,
        registry: &ActionRegistry,
        mut outbound: UnboundedReceiver<OutboundMessage>,
    ) -> Result<(), Error> {
        let url = self.url();
        let (ws_stream, _response) = connect_async(url.as_str())
            .await
            .map_err(|e| Error::WebSocket(format!("connect to {url} failed: {e}")))?;
        info!("[Host] connected → {}", url);

        let (mut write_half, mut read_half) = ws_stream.split();

        let registration = serde_json::to_string(&self.registration())?;
        write_half
            .send(Message::text(registration))
            .await
            .map_err(|e| Error::WebSocket(format!("registration failed: {e}")))?;
        info!("[Host] registered as {} via '{}'", self.plugin_uuid, self.register_event);

        let writer = tokio::spawn(async move {
            while let Some(msg) = outbound.recv().await {
                let text = match serde_json::to_string(&msg) {
                    Ok(text) => text,
                    Err(e) => {
                        error!("[Host] could not encode {:?}: {}", msg, e);
                        continue;
                    }
                };
                if let Err(e) = write_half.send(Message::text(text)).await {
                    warn!("[Host] write failed => {}", e);
                    break;
                }
            }
        });

        while let Some(frame) = read_half.next().await {
            match frame {
                Ok(Message::Text(txt)) => {
                    if let Some(event) = decode_event(txt.as_str()) {
                        registry.dispatch(&event);
                    }
                }
                Ok(Message::Close(_frame)) => {
                    info!("[Host] WebSocket closed by host.");
                    break;
                }
                Ok(_) => {
                    // ping/pong/binary
                }
                Err(e) => {
                    warn!("[Host] websocket error => {}", e);
                    break;
                }
            }
        }

        writer.abort();
        info!("[Host] read loop ended.");
        Ok(())
    }
}

/// Decode one inbound frame into a routed event. Returns `None` for frames
/// the plugin has no handler for (unknown event name or action id,
/// application-level events) and for frames that are not JSON at all.
pub fn decode_event(raw: &str) -> Option<HostEvent> {
    let envelope: InboundEnvelope = match serde_json::from_str(raw) {
        Ok(envelope) => envelope,
        Err(e) => {
            debug!("[Host] undecodable frame ({}): {}", e, raw);
            return None;
        }
    };

    let (kind, action, context) = envelope.route()?;
    let DecodedSettings { settings, rejected } = envelope.settings();
    if !rejected.is_empty() {
        warn!("[Host] ignoring mistyped settings {:?} for {} on {}", rejected, action.id(), context);
    }

    Some(HostEvent {
        kind,
        action,
        context: context.to_string(),
        device: envelope.device.clone(),
        settings,
    })
}
