// File: tarkovbot-common/src/models/settings.rs

use std::fmt;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::trader::GameMode;

/// Which slice of the goons payload a button wants to see.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GoonsSource {
    #[serde(rename = "PVE")]
    Pve,
    #[serde(rename = "PVP")]
    Pvp,
    /// Unset, or anything the property inspector sent that we don't know.
    #[default]
    #[serde(other)]
    All,
}

impl fmt::Display for GoonsSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GoonsSource::Pve => write!(f, "pve"),
            GoonsSource::Pvp => write!(f, "pvp"),
            GoonsSource::All => write!(f, "all"),
        }
    }
}

/// Per-button settings blob owned by the host.
///
/// Every field is optional; the host delivers `{}` for a freshly dropped
/// button. Empty strings are treated the same as a missing value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionSettings {
    pub token: Option<String>,
    pub selected_goons_source: Option<GoonsSource>,
    pub selected_trader: Option<String>,
    pub pve_traders_mode_check: Option<bool>,
}

/// Result of decoding a settings blob field by field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodedSettings {
    pub settings: ActionSettings,
    /// Keys that were present with a value of the wrong type. Each one is
    /// left unset; the other fields are kept.
    pub rejected: Vec<&'static str>,
}

impl ActionSettings {
    /// Decode the `settings` member of an event payload. A missing or null
    /// value yields the default settings. A value that is not an object at
    /// all is rejected as a whole under the key `"settings"`.
    pub fn from_payload(settings: Option<&Value>) -> DecodedSettings {
        let fields = match settings {
            None | Some(Value::Null) => return DecodedSettings::default(),
            Some(Value::Object(fields)) => fields,
            Some(_) => {
                return DecodedSettings {
                    settings: Self::default(),
                    rejected: vec!["settings"],
                };
            }
        };

        let mut rejected = Vec::new();
        let settings = Self {
            token: field(fields, "token", &mut rejected),
            selected_goons_source: field(fields, "selectedGoonsSource", &mut rejected),
            selected_trader: field(fields, "selectedTrader", &mut rejected),
            pve_traders_mode_check: flag(fields, "pve_traders_mode_check", &mut rejected),
        };
        DecodedSettings { settings, rejected }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }

    pub fn selected_trader(&self) -> Option<&str> {
        self.selected_trader.as_deref().filter(|t| !t.is_empty())
    }

    pub fn goons_source(&self) -> GoonsSource {
        self.selected_goons_source.unwrap_or_default()
    }

    /// Dataset the trader-restock button reads from.
    pub fn trader_mode(&self) -> GameMode {
        if self.pve_traders_mode_check.unwrap_or(false) {
            GameMode::Pve
        } else {
            GameMode::Regular
        }
    }
}

fn field<T: DeserializeOwned>(
    fields: &Map<String, Value>,
    key: &'static str,
    rejected: &mut Vec<&'static str>,
) -> Option<T> {
    match fields.get(key) {
        None | Some(Value::Null) => None,
        Some(value) => T::deserialize(value).ok().or_else(|| {
            rejected.push(key);
            None
        }),
    }
}

/// Checkbox values arrive as booleans, or as `"true"` / `"false"` from some
/// property inspectors.
fn flag(fields: &Map<String, Value>, key: &'static str, rejected: &mut Vec<&'static str>) -> Option<bool> {
    match fields.get(key) {
        None | Some(Value::Null) => None,
        Some(Value::Bool(b)) => Some(*b),
        Some(Value::String(s)) if s.eq_ignore_ascii_case("true") => Some(true),
        Some(Value::String(s)) if s.eq_ignore_ascii_case("false") => Some(false),
        Some(_) => {
            rejected.push(key);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_full_blob() {
        let raw = json!({
            "token": "abc",
            "selectedGoonsSource": "PVP",
            "selectedTrader": "Prapor",
            "pve_traders_mode_check": true
        });
        let settings = ActionSettings::from_payload(Some(&raw)).settings;
        assert_eq!(settings.token(), Some("abc"));
        assert_eq!(settings.goons_source(), GoonsSource::Pvp);
        assert_eq!(settings.selected_trader(), Some("Prapor"));
        assert_eq!(settings.trader_mode(), GameMode::Pve);
    }

    #[test]
    fn empty_strings_count_as_missing() {
        let raw = json!({ "token": "", "selectedTrader": "" });
        let settings = ActionSettings::from_payload(Some(&raw)).settings;
        assert_eq!(settings.token(), None);
        assert_eq!(settings.selected_trader(), None);
        assert_eq!(settings.trader_mode(), GameMode::Regular);
    }

    #[test]
    fn unknown_goons_source_is_unfiltered() {
        let raw = json!({ "selectedGoonsSource": "ARENA" });
        let settings = ActionSettings::from_payload(Some(&raw)).settings;
        assert_eq!(settings.goons_source(), GoonsSource::All);

        let settings = ActionSettings::from_payload(None).settings;
        assert_eq!(settings.goons_source(), GoonsSource::All);
    }

    #[test]
    fn mistyped_field_keeps_the_others() {
        let raw = json!({
            "selectedTrader": "Prapor",
            "token": "abc",
            "selectedGoonsSource": 3,
            "pve_traders_mode_check": "yes"
        });
        let decoded = ActionSettings::from_payload(Some(&raw));
        assert_eq!(decoded.settings.selected_trader(), Some("Prapor"));
        assert_eq!(decoded.settings.token(), Some("abc"));
        assert_eq!(decoded.settings.goons_source(), GoonsSource::All);
        assert_eq!(decoded.settings.trader_mode(), GameMode::Regular);
        assert_eq!(decoded.rejected, vec!["selectedGoonsSource", "pve_traders_mode_check"]);
    }

    #[test]
    fn string_checkbox_values_are_understood() {
        let raw = json!({ "selectedTrader": "Prapor", "token": "abc", "pve_traders_mode_check": "true" });
        let decoded = ActionSettings::from_payload(Some(&raw));
        assert!(decoded.rejected.is_empty());
        assert_eq!(decoded.settings.trader_mode(), GameMode::Pve);
        assert_eq!(decoded.settings.selected_trader(), Some("Prapor"));
        assert_eq!(decoded.settings.token(), Some("abc"));
    }

    #[test]
    fn non_object_settings_are_rejected_whole() {
        let decoded = ActionSettings::from_payload(Some(&json!("oops")));
        assert_eq!(decoded.settings, ActionSettings::default());
        assert_eq!(decoded.rejected, vec!["settings"]);
    }
}
