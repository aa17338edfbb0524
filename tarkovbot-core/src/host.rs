//! tarkovbot-core/src/host.rs
//!
//! Outbound side of the host connection. Actions render through a
//! [`HostHandle`]; the connection's writer task drains the queue onto the
//! socket. Every command is fire-and-forget.

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::debug;

use tarkovbot_common::protocol::{
    ImagePayload, OutboundMessage, ProfilePayload, Target, TitlePayload, DEFAULT_STATE,
};

#[derive(Debug, Clone)]
pub struct HostHandle {
    tx: UnboundedSender<OutboundMessage>,
    plugin_uuid: String,
}

impl HostHandle {
    /// Create a handle plus the receiving end the connection will drain.
    pub fn channel(plugin_uuid: impl Into<String>) -> (Self, UnboundedReceiver<OutboundMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                tx,
                plugin_uuid: plugin_uuid.into(),
            },
            rx,
        )
    }

    pub fn set_title(&self, context: &str, title: impl Into<String>) {
        self.send(OutboundMessage::SetTitle {
            context: context.to_string(),
            payload: TitlePayload {
                title: title.into(),
                target: Target::HardwareAndSoftware,
                state: DEFAULT_STATE,
            },
        });
    }

    /// An empty `image` clears the button image.
    pub fn set_image(&self, context: &str, image: impl Into<String>) {
        self.send(OutboundMessage::SetImage {
            context: context.to_string(),
            payload: ImagePayload {
                image: image.into(),
                target: Target::HardwareAndSoftware,
                state: DEFAULT_STATE,
            },
        });
    }

    /// Switch the whole device, not just this button, to `profile`.
    pub fn switch_to_profile(&self, context: &str, profile: impl Into<String>) {
        self.send(OutboundMessage::SwitchToProfile {
            context: context.to_string(),
            device: self.plugin_uuid.clone(),
            payload: ProfilePayload {
                profile: profile.into(),
            },
        });
    }

    fn send(&self, msg: OutboundMessage) {
        if let Err(e) = self.tx.send(msg) {
            debug!("host connection gone, dropping {:?}", e.0);
        }
    }
}
