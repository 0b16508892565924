//! Session participants

use serde::{Deserialize, Serialize};

/// A driver taking part in the session.
#[derive(Default, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(rename_all = "PascalCase")]
#[serde(default)]
pub struct DriverInfo {
    /// Race number, kept as text as the provider does
    pub driver_number: String,
    /// Three-letter abbreviation
    pub abbreviation: String,
    /// Full name
    pub full_name: String,
    /// Team name
    pub team_name: String,
    /// Team colour as hex without the leading '#'
    pub team_color: Option<String>,
}

impl DriverInfo {
    /// Whether `id` names this driver by number or abbreviation.
    pub fn matches(&self, id: &str) -> bool {
        let id = id.trim();
        self.driver_number == id || self.abbreviation.eq_ignore_ascii_case(id)
    }

    /// Abbreviation, falling back to the number when the provider has none.
    pub fn short_name(&self) -> &str {
        if self.abbreviation.is_empty() { &self.driver_number } else { &self.abbreviation }
    }

    /// Label shown in driver pickers: `"VER - Max Verstappen"`.
    pub fn display_name(&self) -> String {
        let full_name = if self.full_name.is_empty() {
            format!("Driver {}", self.driver_number)
        } else {
            self.full_name.clone()
        };
        format!("{} - {}", self.short_name(), full_name)
    }

    /// Team colour as `#rrggbb`, if known.
    pub fn color(&self) -> Option<String> {
        self.team_color
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(|c| if c.starts_with('#') { c.to_string() } else { format!("#{c}") })
    }
}
