//! tarkovbot-common/src/protocol.rs
//!
//! Wire types for the host connection: the registration handshake, the
//! inbound event envelope and the outbound render / profile commands.

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::models::settings::{ActionSettings, DecodedSettings};

/// The four button types this plugin registers with the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    GoonsTracker,
    TarkovTime,
    TraderRestock,
    MapInfo,
}

impl ActionKind {
    pub const ALL: [ActionKind; 4] = [
        ActionKind::GoonsTracker,
        ActionKind::TarkovTime,
        ActionKind::TraderRestock,
        ActionKind::MapInfo,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            ActionKind::GoonsTracker => "eu.tarkovbot.tools.goonsgetlocation",
            ActionKind::TarkovTime => "eu.tarkovbot.tools.tarkovtime",
            ActionKind::TraderRestock => "eu.tarkovbot.tools.traderrestock",
            ActionKind::MapInfo => "eu.tarkovbot.tools.mapinfo",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.id() == id)
    }
}

/// Inbound lifecycle events the plugin reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    KeyDown,
    KeyUp,
    WillAppear,
    WillDisappear,
    DidReceiveSettings,
}

impl EventKind {
    pub fn name(&self) -> &'static str {
        match self {
            EventKind::KeyDown => "keyDown",
            EventKind::KeyUp => "keyUp",
            EventKind::WillAppear => "willAppear",
            EventKind::WillDisappear => "willDisappear",
            EventKind::DidReceiveSettings => "didReceiveSettings",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "keyDown" => Some(EventKind::KeyDown),
            "keyUp" => Some(EventKind::KeyUp),
            "willAppear" => Some(EventKind::WillAppear),
            "willDisappear" => Some(EventKind::WillDisappear),
            "didReceiveSettings" => Some(EventKind::DidReceiveSettings),
            _ => None,
        }
    }
}

/// Anything the host sends. Application- and device-level events carry no
/// `action` / `context`, hence the options.
#[derive(Debug, Clone, Deserialize)]
pub struct InboundEnvelope {
    pub event: String,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub context: Option<String>,
    #[serde(default)]
    pub device: Option<String>,
    #[serde(default)]
    pub payload: Option<Value>,
}

impl InboundEnvelope {
    /// Resolve event name and action id. `None` means the plugin has no
    /// handler for this message.
    pub fn route(&self) -> Option<(EventKind, ActionKind, &str)> {
        let kind = EventKind::from_name(&self.event)?;
        let action = ActionKind::from_id(self.action.as_deref()?)?;
        let context = self.context.as_deref()?;
        Some((kind, action, context))
    }

    pub fn settings(&self) -> DecodedSettings {
        ActionSettings::from_payload(self.payload.as_ref().and_then(|p| p.get("settings")))
    }
}

/// A routed, decoded lifecycle event for one button.
#[derive(Debug, Clone, PartialEq)]
pub struct HostEvent {
    pub kind: EventKind,
    pub action: ActionKind,
    pub context: String,
    pub device: Option<String>,
    pub settings: ActionSettings,
}

/// Sent once right after the socket opens.
#[derive(Debug, Clone, Serialize)]
pub struct RegistrationMessage {
    pub event: String,
    pub uuid: String,
}

/// Where the host should render a title or image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Target {
    #[default]
    HardwareAndSoftware = 0,
    HardwareOnly = 1,
    SoftwareOnly = 2,
}

impl Serialize for Target {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(*self as u8)
    }
}

/// State index used for every render command.
pub const DEFAULT_STATE: u8 = 0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TitlePayload {
    pub title: String,
    pub target: Target,
    pub state: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImagePayload {
    pub image: String,
    pub target: Target,
    pub state: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfilePayload {
    pub profile: String,
}

/// Commands the plugin sends to the host.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum OutboundMessage {
    SetTitle {
        context: String,
        payload: TitlePayload,
    },
    SetImage {
        context: String,
        payload: ImagePayload,
    },
    SwitchToProfile {
        context: String,
        device: String,
        payload: ProfilePayload,
    },
}

impl OutboundMessage {
    pub fn context(&self) -> &str {
        match self {
            OutboundMessage::SetTitle { context, .. }
            | OutboundMessage::SetImage { context, .. }
            | OutboundMessage::SwitchToProfile { context, .. } => context,
        }
    }

    /// The title text, if this is a `setTitle` command.
    pub fn title(&self) -> Option<&str> {
        match self {
            OutboundMessage::SetTitle { payload, .. } => Some(&payload.title),
            _ => None,
        }
    }

    /// The image path, if this is a `setImage` command.
    pub fn image(&self) -> Option<&str> {
        match self {
            OutboundMessage::SetImage { payload, .. } => Some(&payload.image),
            _ => None,
        }
    }
}
