//! Circuit layout information

use serde::{Deserialize, Serialize};

/// Corner markers of the circuit.
#[derive(Default, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(rename_all = "PascalCase")]
#[serde(default)]
pub struct CircuitInfo {
    /// Corners in lap order
    pub corners: Vec<Corner>,
    /// Rotation (degrees) that aligns the map with the official layout
    pub rotation: f64,
}

/// A single corner marker.
#[derive(Default, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(rename_all = "PascalCase")]
#[serde(default)]
pub struct Corner {
    /// Corner number
    pub number: u32,
    /// Suffix for split corners ("a", "b")
    pub letter: Option<String>,
    /// Distance from the start line (m)
    pub distance: f64,
    /// Map X coordinate
    pub x: f64,
    /// Map Y coordinate
    pub y: f64,
}

impl Corner {
    /// Label drawn on charts: `T7`, `T13a`.
    pub fn label(&self) -> String {
        format!("T{}{}", self.number, self.letter.as_deref().unwrap_or(""))
    }
}
