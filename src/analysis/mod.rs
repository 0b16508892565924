//! Derived driving signals and session pace analysis.
//!
//! [`annotator`] flags coast/lift and traction loss sample by sample and sums a
//! lap up into [`LapKpis`](crate::types::LapKpis). [`pace`] works on lap times:
//! fastest and quick laps, tyre stints and team ranking.

pub mod annotator;
pub mod pace;

pub use annotator::{
    SignalThresholds, annotate, annotate_with, strip_flags, summarize, summarize_with,
};
pub use pace::{
    DEFAULT_QUICK_LAP_THRESHOLD, Stint, TeamPace, fastest_lap, median, quick_laps, rank_teams,
    stints,
};
