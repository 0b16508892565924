//! Lap records

use serde::{Deserialize, Serialize};

use super::RawSample;

/// One timed lap of a driver, optionally carrying its telemetry rows.
#[derive(Default, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
#[serde(default)]
pub struct LapRecord {
    /// Driver abbreviation
    pub driver: String,
    /// Driver race number
    pub driver_number: Option<String>,
    /// Team name
    pub team: Option<String>,
    /// Lap number
    pub lap_number: u32,
    /// Lap time (s)
    pub lap_time: Option<f64>,
    /// Sector 1 time (s)
    pub sector1_time: Option<f64>,
    /// Sector 2 time (s)
    pub sector2_time: Option<f64>,
    /// Sector 3 time (s)
    pub sector3_time: Option<f64>,
    /// Tyre compound label
    pub compound: Option<String>,
    /// Laps driven on this tyre set
    pub tyre_life: Option<f64>,
    /// Stint number
    pub stint: Option<u32>,
    /// Running position at the end of the lap
    pub position: Option<u32>,
    /// Whether this is the driver's personal best
    pub is_personal_best: bool,
    /// Telemetry rows, ordered by distance
    pub telemetry: Option<Vec<RawSample>>,
}

impl LapRecord {
    /// Lap time when it is a usable positive number.
    pub fn timed(&self) -> Option<f64> {
        self.lap_time.filter(|t| t.is_finite() && *t > 0.0)
    }

    /// The three sector times.
    pub fn sector_times(&self) -> [Option<f64>; 3] {
        [self.sector1_time, self.sector2_time, self.sector3_time]
    }
}
