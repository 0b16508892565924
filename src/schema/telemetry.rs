//! Provider telemetry rows
//!
//! Rows arrive loosely typed: any column may be absent, numbers may be encoded
//! as strings and missing readings as `.nan`. Validation into
//! [`TelemetrySample`](crate::types::TelemetrySample) happens separately so a
//! session can be loaded before any lap is inspected.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A numeric cell that may have been exported as text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
}

impl RawValue {
    /// Numeric reading of the cell, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            RawValue::Number(n) => Some(*n),
            RawValue::Text(text) => text.trim().parse().ok(),
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Number(n) => write!(f, "{n}"),
            RawValue::Text(text) => write!(f, "{text:?}"),
        }
    }
}

/// Brake cell: a boolean switch or a numeric pressure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawBrake {
    Flag(bool),
    Value(RawValue),
}

/// One telemetry row as exported by the provider.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
#[serde(default)]
pub struct RawSample {
    /// Distance since lap start (m)
    pub distance: Option<RawValue>,
    /// Time since lap start (s)
    pub time: Option<RawValue>,
    /// Speed (km/h)
    pub speed: Option<RawValue>,
    /// Throttle (0-100)
    pub throttle: Option<RawValue>,
    /// Brake switch or pressure
    pub brake: Option<RawBrake>,
    /// Engine speed
    #[serde(rename = "RPM", alias = "Rpm")]
    pub rpm: Option<RawValue>,
    /// Gear
    #[serde(rename = "nGear", alias = "Gear")]
    pub gear: Option<RawValue>,
    /// Map X coordinate
    pub x: Option<RawValue>,
    /// Map Y coordinate
    pub y: Option<RawValue>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_provider_columns() {
        let yaml = r#"
Distance: 12.5
Time: "0.25"
Speed: 288
Throttle: 100
Brake: false
RPM: 11800
nGear: 7
X: -1200.5
Y: 340
"#;
        let raw: RawSample = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(raw.time, Some(RawValue::Text("0.25".to_string())));
        assert_eq!(raw.speed.as_ref().and_then(RawValue::as_f64), Some(288.0));
        assert_eq!(raw.brake, Some(RawBrake::Flag(false)));
        assert_eq!(raw.gear.as_ref().and_then(RawValue::as_f64), Some(7.0));
    }

    #[test]
    fn missing_and_nan_cells() {
        let raw: RawSample = serde_yaml_ng::from_str("Speed: .nan\nBrake: 42.0\n").unwrap();
        assert!(raw.distance.is_none());
        assert!(raw.speed.as_ref().and_then(RawValue::as_f64).is_some_and(f64::is_nan));
        assert_eq!(raw.brake, Some(RawBrake::Value(RawValue::Number(42.0))));
    }
}
