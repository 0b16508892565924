//! Lap-time based session analysis: fastest and quick laps, stints and team pace.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::schema::LapRecord;
use crate::types::Compound;

/// Fraction of the session's fastest lap a lap must beat to count as quick.
pub const DEFAULT_QUICK_LAP_THRESHOLD: f64 = 1.07;

/// The fastest timed lap among `laps`. Ties go to the earlier lap.
pub fn fastest_lap<'a, I>(laps: I) -> Option<&'a LapRecord>
where
    I: IntoIterator<Item = &'a LapRecord>,
{
    laps.into_iter()
        .filter_map(|lap| lap.timed().map(|time| (time, lap)))
        .min_by(|(a, lap_a), (b, lap_b)| {
            a.total_cmp(b).then_with(|| lap_a.lap_number.cmp(&lap_b.lap_number))
        })
        .map(|(_, lap)| lap)
}

/// Laps within `threshold` times the fastest lap among them.
///
/// Outlaps, inlaps and laps behind the safety car fall out because they are far
/// slower than a representative lap.
pub fn quick_laps<'a, I>(laps: I, threshold: f64) -> Vec<&'a LapRecord>
where
    I: IntoIterator<Item = &'a LapRecord>,
    I::IntoIter: Clone,
{
    let laps = laps.into_iter();
    let Some(cutoff) = fastest_lap(laps.clone()).and_then(LapRecord::timed).map(|t| t * threshold)
    else {
        return Vec::new();
    };

    laps.filter(|lap| lap.timed().is_some_and(|time| time < cutoff)).collect()
}

/// A continuous run on one tyre compound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct Stint {
    /// Stint number as reported by the provider
    pub stint: u32,
    /// Compound label
    pub compound: String,
    /// First lap of the stint
    pub start_lap: u32,
    /// Last lap of the stint
    pub end_lap: u32,
}

impl Stint {
    /// Number of laps in the stint, both ends included.
    pub fn laps(&self) -> u32 {
        self.end_lap - self.start_lap + 1
    }
}

/// Group a driver's laps into stints, ordered by stint number.
///
/// Laps without a stint number are left out.
pub fn stints<'a, I>(laps: I) -> Vec<Stint>
where
    I: IntoIterator<Item = &'a LapRecord>,
{
    let mut stints: Vec<(Compound, Stint)> = Vec::new();

    for lap in laps {
        let Some(number) = lap.stint else { continue };
        let compound = Compound::from_label(lap.compound.as_deref());

        match stints.iter_mut().find(|(c, s)| s.stint == number && *c == compound) {
            Some((_, stint)) => {
                stint.start_lap = stint.start_lap.min(lap.lap_number);
                stint.end_lap = stint.end_lap.max(lap.lap_number);
            }
            None => stints.push((
                compound,
                Stint {
                    stint: number,
                    compound: compound.label().to_string(),
                    start_lap: lap.lap_number,
                    end_lap: lap.lap_number,
                },
            )),
        }
    }

    let mut stints: Vec<Stint> = stints.into_iter().map(|(_, stint)| stint).collect();
    stints.sort_by(|a, b| a.stint.cmp(&b.stint).then(a.start_lap.cmp(&b.start_lap)));
    stints
}

/// Median of a set of values, `None` when empty.
pub fn median(values: &[f64]) -> Option<f64> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Lap times of one team and their median.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct TeamPace {
    pub team: String,
    pub median_lap_time: f64,
    pub lap_times: Vec<f64>,
}

/// Rank teams by median lap time, fastest first.
///
/// Laps without a team are ignored.
pub fn rank_teams<'a, I>(laps: I) -> Vec<TeamPace>
where
    I: IntoIterator<Item = &'a LapRecord>,
{
    let mut teams: Vec<(String, Vec<f64>)> = Vec::new();

    for lap in laps {
        let (Some(team), Some(time)) = (lap.team.as_deref(), lap.timed()) else { continue };
        match teams.iter_mut().find(|(name, _)| name == team) {
            Some((_, times)) => times.push(time),
            None => teams.push((team.to_string(), vec![time])),
        }
    }

    let mut ranking: Vec<TeamPace> = teams
        .into_iter()
        .filter_map(|(team, lap_times)| {
            median(&lap_times).map(|median_lap_time| TeamPace { team, median_lap_time, lap_times })
        })
        .collect();

    ranking.sort_by(|a, b| {
        a.median_lap_time.partial_cmp(&b.median_lap_time).unwrap_or(Ordering::Equal)
    });
    ranking
}
