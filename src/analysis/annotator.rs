//! Coast/lift and traction-loss detection
//!
//! Both detectors compare each sample with the one before it. There is no
//! smoothing, hysteresis or lookahead: the flag of sample `i` depends on
//! samples `i - 1` and `i` only, and the first sample is never flagged.

use serde::{Deserialize, Serialize};

use crate::types::{AnnotatedSample, LapKpis, TelemetrySample};
use crate::{Result, TelemetryError};

/// Fixed thresholds of the detectors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(default)]
pub struct SignalThresholds {
    /// Throttle at or above which the car counts as flat out (%)
    pub full_throttle: f64,
    /// RPM rise between consecutive samples that must be exceeded
    pub rpm_jump: f64,
    /// Throttle that must be exceeded for wheelspin to count (%)
    pub traction_throttle: f64,
    /// Largest speed gain (km/h) still treated as stagnant
    pub speed_stagnation: f64,
}

impl SignalThresholds {
    pub const DEFAULT: SignalThresholds = SignalThresholds {
        full_throttle: 95.0,
        rpm_jump: 200.0,
        traction_throttle: 50.0,
        speed_stagnation: 0.5,
    };
}

impl Default for SignalThresholds {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Annotate a lap with the default thresholds.
///
/// # Errors
///
/// [`TelemetryError::EmptyInput`] when `samples` is empty.
///
/// # Example
///
/// ```rust
/// use pitlane::analysis::annotate;
/// use pitlane::types::{Brake, TelemetrySample};
///
/// let at = |throttle: f64| TelemetrySample {
///     distance: 0.0, time: 0.0, speed: 250.0, throttle,
///     brake: Brake::Pressed(false), rpm: 11_000.0, gear: 7, x: 0.0, y: 0.0,
/// };
/// let annotated = annotate(&[at(96.0), at(94.0)])?;
/// assert!(!annotated[0].coast_lift);
/// assert!(annotated[1].coast_lift);
/// # Ok::<(), pitlane::TelemetryError>(())
/// ```
pub fn annotate(samples: &[TelemetrySample]) -> Result<Vec<AnnotatedSample>> {
    annotate_with(samples, &SignalThresholds::DEFAULT)
}

/// Annotate a lap with explicit thresholds.
pub fn annotate_with(
    samples: &[TelemetrySample],
    thresholds: &SignalThresholds,
) -> Result<Vec<AnnotatedSample>> {
    let first = samples.first().ok_or_else(|| TelemetryError::empty_input("annotate"))?;

    let mut annotated = Vec::with_capacity(samples.len());
    annotated.push(AnnotatedSample::unflagged(*first));

    annotated.extend(samples.windows(2).map(|pair| {
        let (prev, curr) = (&pair[0], &pair[1]);
        AnnotatedSample {
            sample: *curr,
            coast_lift: is_coast_lift(prev, curr, thresholds),
            traction_loss: is_traction_loss(prev, curr, thresholds),
        }
    }));

    Ok(annotated)
}

fn is_coast_lift(prev: &TelemetrySample, curr: &TelemetrySample, t: &SignalThresholds) -> bool {
    curr.throttle - prev.throttle < 0.0
        && curr.throttle < t.full_throttle
        && !curr.brake.is_engaged()
}

fn is_traction_loss(prev: &TelemetrySample, curr: &TelemetrySample, t: &SignalThresholds) -> bool {
    curr.rpm - prev.rpm > t.rpm_jump
        && curr.speed - prev.speed <= t.speed_stagnation
        && curr.throttle > t.traction_throttle
}

/// Recover the plain samples of an annotated lap.
pub fn strip_flags(annotated: &[AnnotatedSample]) -> Vec<TelemetrySample> {
    annotated.iter().map(|a| a.sample).collect()
}

/// Lap KPIs with the default full-throttle threshold.
///
/// # Errors
///
/// [`TelemetryError::EmptyInput`] when `annotated` is empty.
pub fn summarize(annotated: &[AnnotatedSample]) -> Result<LapKpis> {
    summarize_with(annotated, &SignalThresholds::DEFAULT)
}

/// Lap KPIs with explicit thresholds.
pub fn summarize_with(annotated: &[AnnotatedSample], thresholds: &SignalThresholds) -> Result<LapKpis> {
    if annotated.is_empty() {
        return Err(TelemetryError::empty_input("summarize"));
    }

    let total = annotated.len() as f64;
    let pct = |count: usize| count as f64 * 100.0 / total;

    let flat_out = annotated.iter().filter(|a| a.sample.throttle >= thresholds.full_throttle).count();
    let coasting = annotated.iter().filter(|a| a.coast_lift).count();
    let spinning = annotated.iter().filter(|a| a.traction_loss).count();

    Ok(LapKpis {
        efficiency_score: pct(flat_out),
        coast_lift_pct: pct(coasting),
        traction_loss_pct: pct(spinning),
        sample_count: u32::try_from(annotated.len()).unwrap_or(u32::MAX),
    })
}
