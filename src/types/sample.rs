//! Validated telemetry samples

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::schema::{RawBrake, RawSample, RawValue};
use crate::{Result, TelemetryError};

/// Highest gear a car reports. Zero is neutral.
pub const MAX_GEAR: u8 = 8;

/// Brake channel as reported by the provider.
///
/// Older seasons expose an on/off switch, newer exports may carry a pressure
/// percentage. Either form is "engaged" when true or strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(untagged)]
pub enum Brake {
    /// On/off brake switch
    Pressed(bool),
    /// Brake pressure in percent
    Pressure(f64),
}

impl Default for Brake {
    fn default() -> Self {
        Brake::Pressed(false)
    }
}

impl Brake {
    /// Whether the driver is on the brakes for this sample.
    pub fn is_engaged(self) -> bool {
        match self {
            Brake::Pressed(pressed) => pressed,
            Brake::Pressure(pct) => pct > 0.0,
        }
    }

    /// Brake application as a 0-100 value for plotting.
    pub fn as_percent(self) -> f64 {
        match self {
            Brake::Pressed(true) => 100.0,
            Brake::Pressed(false) => 0.0,
            Brake::Pressure(pct) => pct,
        }
    }
}

/// A single validated telemetry sample of a lap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct TelemetrySample {
    /// Distance driven since the start of the lap (m)
    pub distance: f64,
    /// Time since the start of the lap (s)
    pub time: f64,
    /// Car speed (km/h)
    pub speed: f64,
    /// Throttle pedal position (0-100)
    pub throttle: f64,
    /// Brake application
    pub brake: Brake,
    /// Engine speed (rev/min)
    pub rpm: f64,
    /// Selected gear, 0 for neutral
    pub gear: u8,
    /// Circuit map X coordinate
    pub x: f64,
    /// Circuit map Y coordinate
    pub y: f64,
}

impl TelemetrySample {
    /// Validate a provider sample at position `index` of its lap.
    ///
    /// Required numeric fields that are missing, non-numeric or non-finite
    /// produce [`TelemetryError::MalformedSample`]. Throttle readings above 100
    /// are provider glitch values and are clamped.
    pub fn from_raw(index: usize, raw: &RawSample) -> Result<Self> {
        let distance = required(index, "Distance", raw.distance.as_ref())?;
        let time = required(index, "Time", raw.time.as_ref())?;
        let speed = required(index, "Speed", raw.speed.as_ref())?;
        let mut throttle = required(index, "Throttle", raw.throttle.as_ref())?;
        let rpm = required(index, "RPM", raw.rpm.as_ref())?;
        let gear = required(index, "nGear", raw.gear.as_ref())?;
        let x = required(index, "X", raw.x.as_ref())?;
        let y = required(index, "Y", raw.y.as_ref())?;

        if speed < 0.0 {
            return Err(TelemetryError::malformed_sample(index, "Speed", "is negative"));
        }
        if rpm < 0.0 {
            return Err(TelemetryError::malformed_sample(index, "RPM", "is negative"));
        }
        if throttle < 0.0 {
            return Err(TelemetryError::malformed_sample(index, "Throttle", "is negative"));
        }
        if throttle > 100.0 {
            trace!(index, throttle, "Clamping throttle reading above 100");
            throttle = 100.0;
        }
        if gear.fract() != 0.0 || gear < 0.0 || gear > f64::from(MAX_GEAR) {
            return Err(TelemetryError::malformed_sample(
                index,
                "nGear",
                format!("{gear} is not a gear between 0 and {MAX_GEAR}"),
            ));
        }

        let brake = match &raw.brake {
            None => Brake::default(),
            Some(RawBrake::Flag(pressed)) => Brake::Pressed(*pressed),
            Some(RawBrake::Value(value)) => brake_from_value(index, value)?,
        };

        Ok(Self { distance, time, speed, throttle, brake, rpm, gear: gear as u8, x, y })
    }
}

/// Validate every sample of a lap, rejecting the whole lap on the first defect.
///
/// Samples must be ordered by distance. An empty input yields an empty vector;
/// emptiness is reported by the operations that need data.
pub fn validate_samples(raw: &[RawSample]) -> Result<Vec<TelemetrySample>> {
    let mut samples: Vec<TelemetrySample> = Vec::with_capacity(raw.len());

    for (index, raw_sample) in raw.iter().enumerate() {
        let sample = TelemetrySample::from_raw(index, raw_sample)?;

        if let Some(previous) = samples.last() {
            if sample.distance < previous.distance {
                return Err(TelemetryError::malformed_sample(
                    index,
                    "Distance",
                    format!("decreases from {} to {}", previous.distance, sample.distance),
                ));
            }
        }

        samples.push(sample);
    }

    Ok(samples)
}

fn required(index: usize, field: &str, value: Option<&RawValue>) -> Result<f64> {
    let value = value.ok_or_else(|| TelemetryError::malformed_sample(index, field, "is missing"))?;

    let number = value.as_f64().ok_or_else(|| {
        TelemetryError::malformed_sample(index, field, format!("is not numeric ({value})"))
    })?;

    if !number.is_finite() {
        return Err(TelemetryError::malformed_sample(index, field, "is not finite"));
    }

    Ok(number)
}

fn brake_from_value(index: usize, value: &RawValue) -> Result<Brake> {
    if let RawValue::Text(text) = value {
        match text.trim().to_ascii_lowercase().as_str() {
            "true" => return Ok(Brake::Pressed(true)),
            "false" => return Ok(Brake::Pressed(false)),
            _ => {}
        }
    }

    match value.as_f64() {
        Some(pct) if pct.is_finite() && pct >= 0.0 => Ok(Brake::Pressure(pct)),
        _ => Err(TelemetryError::malformed_sample(
            index,
            "Brake",
            format!("is neither a flag nor a pressure ({value})"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(distance: f64, throttle: f64) -> RawSample {
        RawSample {
            distance: Some(RawValue::Number(distance)),
            time: Some(RawValue::Number(distance / 50.0)),
            speed: Some(RawValue::Number(180.0)),
            throttle: Some(RawValue::Number(throttle)),
            brake: Some(RawBrake::Flag(false)),
            rpm: Some(RawValue::Number(10_500.0)),
            gear: Some(RawValue::Number(6.0)),
            x: Some(RawValue::Number(100.0)),
            y: Some(RawValue::Number(-40.0)),
        }
    }

    #[test]
    fn brake_engagement() {
        assert!(Brake::Pressed(true).is_engaged());
        assert!(!Brake::Pressed(false).is_engaged());
        assert!(Brake::Pressure(0.5).is_engaged());
        assert!(!Brake::Pressure(0.0).is_engaged());
        assert_eq!(Brake::Pressed(true).as_percent(), 100.0);
    }

    #[test]
    fn valid_sample_converts() {
        let sample = TelemetrySample::from_raw(0, &raw(10.0, 99.0)).unwrap();
        assert_eq!(sample.gear, 6);
        assert_eq!(sample.throttle, 99.0);
        assert_eq!(sample.brake, Brake::Pressed(false));
    }

    #[test]
    fn numeric_strings_are_accepted() {
        let mut sample = raw(10.0, 50.0);
        sample.speed = Some(RawValue::Text(" 212.5 ".to_string()));
        let converted = TelemetrySample::from_raw(0, &sample).unwrap();
        assert_eq!(converted.speed, 212.5);
    }

    #[test]
    fn missing_required_field_is_malformed() {
        let mut sample = raw(10.0, 50.0);
        sample.rpm = None;
        let err = TelemetrySample::from_raw(4, &sample).unwrap_err();
        match err {
            TelemetryError::MalformedSample { index, field, .. } => {
                assert_eq!(index, 4);
                assert_eq!(field, "RPM");
            }
            other => panic!("Expected MalformedSample, got {other:?}"),
        }
    }

    #[test]
    fn non_numeric_and_non_finite_fields_are_malformed() {
        let mut text = raw(10.0, 50.0);
        text.throttle = Some(RawValue::Text("full".to_string()));
        assert!(matches!(
            TelemetrySample::from_raw(0, &text),
            Err(TelemetryError::MalformedSample { .. })
        ));

        let mut nan = raw(10.0, 50.0);
        nan.speed = Some(RawValue::Number(f64::NAN));
        assert!(matches!(
            TelemetrySample::from_raw(0, &nan),
            Err(TelemetryError::MalformedSample { .. })
        ));
    }

    #[test]
    fn gear_must_be_integral_and_in_range() {
        let mut fractional = raw(10.0, 50.0);
        fractional.gear = Some(RawValue::Number(3.5));
        assert!(TelemetrySample::from_raw(0, &fractional).is_err());

        let mut ninth = raw(10.0, 50.0);
        ninth.gear = Some(RawValue::Number(9.0));
        assert!(TelemetrySample::from_raw(0, &ninth).is_err());

        let mut neutral = raw(10.0, 50.0);
        neutral.gear = Some(RawValue::Number(0.0));
        assert_eq!(TelemetrySample::from_raw(0, &neutral).unwrap().gear, 0);
    }

    #[test]
    fn glitch_throttle_is_clamped() {
        let sample = TelemetrySample::from_raw(0, &raw(10.0, 104.0)).unwrap();
        assert_eq!(sample.throttle, 100.0);
        assert!(TelemetrySample::from_raw(0, &raw(10.0, -1.0)).is_err());
    }

    #[test]
    fn brake_pressure_and_text_flags() {
        let mut pressure = raw(10.0, 0.0);
        pressure.brake = Some(RawBrake::Value(RawValue::Number(35.0)));
        assert_eq!(TelemetrySample::from_raw(0, &pressure).unwrap().brake, Brake::Pressure(35.0));

        let mut text = raw(10.0, 0.0);
        text.brake = Some(RawBrake::Value(RawValue::Text("True".to_string())));
        assert_eq!(TelemetrySample::from_raw(0, &text).unwrap().brake, Brake::Pressed(true));

        let mut missing = raw(10.0, 0.0);
        missing.brake = None;
        assert_eq!(TelemetrySample::from_raw(0, &missing).unwrap().brake, Brake::Pressed(false));
    }

    #[test]
    fn lap_rejects_decreasing_distance() {
        let lap = vec![raw(0.0, 100.0), raw(12.0, 100.0), raw(11.0, 100.0)];
        match validate_samples(&lap).unwrap_err() {
            TelemetryError::MalformedSample { index, field, .. } => {
                assert_eq!(index, 2);
                assert_eq!(field, "Distance");
            }
            other => panic!("Expected MalformedSample, got {other:?}"),
        }
    }

    #[test]
    fn lap_validation_stops_at_first_defect() {
        let mut lap = vec![raw(0.0, 100.0), raw(5.0, 100.0), raw(10.0, 100.0)];
        lap[1].gear = None;
        assert!(matches!(
            validate_samples(&lap),
            Err(TelemetryError::MalformedSample { index: 1, .. })
        ));
        assert!(validate_samples(&[]).unwrap().is_empty());
    }
}
