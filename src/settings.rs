//! Persisted local user configuration.
//!
//! Display name, die color, and room code are stored as a small JSON blob.
//! Malformed user input is reported as inline per-field messages via
//! [`UserSettings::validate`]; only I/O and blob corruption surface as
//! errors.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

const ROOM_CODE_LEN: std::ops::RangeInclusive<usize> = 4..=12;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    pub name: String,
    /// Any CSS color; the engine consumes this as the die tint.
    pub color: String,
    pub room_code: String,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            name: String::new(),
            color: "#e8e8e8".to_string(),
            room_code: String::new(),
        }
    }
}

/// One inline validation message, keyed by form field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl UserSettings {
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Inline form validation. Returns one message per offending field;
    /// an empty result means the settings are usable.
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if self.name.trim().is_empty() {
            errors.push(FieldError {
                field: "name",
                message: "enter a display name".to_string(),
            });
        }
        if let Err(err) = csscolorparser::parse(&self.color) {
            errors.push(FieldError {
                field: "color",
                message: format!("not a recognizable color: {err}"),
            });
        }
        let code_ok = ROOM_CODE_LEN.contains(&self.room_code.len())
            && self.room_code.chars().all(|c| c.is_ascii_alphanumeric());
        if !code_ok {
            errors.push(FieldError {
                field: "room_code",
                message: "room codes are 4-12 letters or digits".to_string(),
            });
        }
        errors
    }

    /// The user tint as RGBA, when the color string parses.
    pub fn tint(&self) -> Option<[f32; 4]> {
        csscolorparser::parse(&self.color).ok().map(|c| c.to_array())
    }
}
