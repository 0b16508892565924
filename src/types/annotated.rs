//! Annotated samples and lap-level KPIs

use serde::{Deserialize, Serialize};

use super::TelemetrySample;

/// A telemetry sample with the driving-behaviour flags derived for it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct AnnotatedSample {
    /// The sample the flags were derived from
    #[serde(flatten)]
    pub sample: TelemetrySample,
    /// Throttle released without braking
    pub coast_lift: bool,
    /// RPM rising while speed does not, at partial-to-high throttle
    pub traction_loss: bool,
}

impl AnnotatedSample {
    /// Wrap a sample with both flags cleared.
    pub fn unflagged(sample: TelemetrySample) -> Self {
        Self { sample, coast_lift: false, traction_loss: false }
    }
}

/// Summary figures for one lap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct LapKpis {
    /// Percentage of samples at near-full throttle (0-100)
    pub efficiency_score: f64,
    /// Percentage of samples flagged as coast/lift (0-100)
    pub coast_lift_pct: f64,
    /// Percentage of samples flagged as traction loss (0-100)
    pub traction_loss_pct: f64,
    /// Number of samples the percentages are computed over
    pub sample_count: u32,
}
