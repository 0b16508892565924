//! Validated lap telemetry

use super::{Compound, TelemetrySample, validate_samples};
use crate::schema::LapRecord;
use crate::{Result, TelemetryError};

/// One lap of one driver with validated, distance-ordered samples.
#[derive(Debug, Clone, PartialEq)]
pub struct LapTelemetry {
    /// Driver abbreviation
    pub driver: String,
    /// Lap number within the session
    pub lap_number: u32,
    /// Lap time (s)
    pub lap_time: Option<f64>,
    /// Sector times (s)
    pub sector_times: [Option<f64>; 3],
    /// Tyre compound fitted
    pub compound: Compound,
    /// Laps driven on the tyre set
    pub tyre_life: Option<f64>,
    /// Whether this is the driver's personal best
    pub is_personal_best: bool,
    /// Samples ordered by distance
    pub samples: Vec<TelemetrySample>,
}

impl LapTelemetry {
    /// Validate the raw telemetry attached to a lap record.
    pub fn from_record(record: &LapRecord) -> Result<Self> {
        let raw = record.telemetry.as_deref().ok_or_else(|| TelemetryError::TelemetryMissing {
            driver: record.driver.clone(),
            lap: record.lap_number,
        })?;

        let samples = validate_samples(raw)?;

        Ok(Self {
            driver: record.driver.clone(),
            lap_number: record.lap_number,
            lap_time: record.lap_time,
            sector_times: record.sector_times(),
            compound: Compound::from_label(record.compound.as_deref()),
            tyre_life: record.tyre_life,
            is_personal_best: record.is_personal_best,
            samples,
        })
    }
}
