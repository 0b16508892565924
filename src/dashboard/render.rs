//! Chart builders
//!
//! Pure functions from a loaded session to the structures in [`charts`](super::charts).
//! The handlers on [`Dashboard`](super::Dashboard) fetch the session and call these.

use tracing::trace;

use super::charts::{
    CornerMarker, DriverLapChart, DriverLapTimes, FALLBACK_DRIVER_COLORS, Highlight,
    LapTimeDistribution, LapTimePoint, LegendEntry, MapSegment, Point, PositionChart,
    PositionSeries, Region, StintBar, StrategyChart, StrategyRow, TeamPaceChart, TeamPaceEntry,
};
use super::selection::LapChoice;
use crate::analysis::{
    SignalThresholds, annotate_with, fastest_lap, quick_laps, rank_teams, stints, summarize_with,
};
use crate::schema::{DriverInfo, LapRecord, SessionData};
use crate::types::{AnnotatedSample, Compound, LapTelemetry};
use crate::{Result, TelemetryError};

/// Team colour of the driver, or a fallback picked by selection index.
pub fn driver_color(driver: &DriverInfo, index: usize) -> String {
    driver
        .color()
        .unwrap_or_else(|| FALLBACK_DRIVER_COLORS[index % FALLBACK_DRIVER_COLORS.len()].to_string())
}

/// The lap of `driver` named by `choice`.
pub fn pick_lap<'a>(
    session: &'a SessionData,
    driver: &'a DriverInfo,
    choice: LapChoice,
) -> Result<&'a LapRecord> {
    match choice {
        LapChoice::Fastest => fastest_lap(session.laps_of(driver)).ok_or_else(|| {
            TelemetryError::invalid_selection(format!(
                "driver '{}' has no timed lap",
                driver.short_name()
            ))
        }),
        LapChoice::Number(number) => session
            .laps_of(driver)
            .find(|lap| lap.lap_number == number)
            .ok_or_else(|| TelemetryError::LapNotFound {
                driver: driver.short_name().to_string(),
                lap: number,
            }),
    }
}

/// Validate, annotate and summarize one lap and lay it out as chart panels.
pub fn lap_chart(
    driver: &DriverInfo,
    color: String,
    lap: &LapRecord,
    thresholds: &SignalThresholds,
) -> Result<DriverLapChart> {
    let telemetry = LapTelemetry::from_record(lap)?;
    let annotated = annotate_with(&telemetry.samples, thresholds)?;
    let kpis = summarize_with(&annotated, thresholds)?;

    trace!(
        driver = driver.short_name(),
        lap = telemetry.lap_number,
        samples = annotated.len(),
        efficiency = kpis.efficiency_score,
        "Annotated lap"
    );

    let series = |value: fn(&AnnotatedSample) -> f64| -> Vec<Point> {
        annotated.iter().map(|a| Point::new(a.sample.distance, value(a))).collect()
    };

    Ok(DriverLapChart {
        driver: driver.short_name().to_string(),
        color,
        lap_number: telemetry.lap_number,
        lap_time: telemetry.lap_time,
        compound: telemetry.compound.label().to_string(),
        kpis,
        speed: series(|a| a.sample.speed),
        throttle: series(|a| a.sample.throttle),
        brake: series(|a| a.sample.brake.as_percent()),
        rpm: series(|a| a.sample.rpm),
        gear: series(|a| f64::from(a.sample.gear)),
        sector_times: telemetry.sector_times.to_vec(),
        regions: flagged_regions(&annotated),
        map: map_segments(&annotated),
    })
}

/// Contiguous runs of flagged samples, ordered by start distance.
///
/// A flag describes the step from the previous sample, so a run starts at the
/// distance of the sample before its first flagged sample.
pub fn flagged_regions(annotated: &[AnnotatedSample]) -> Vec<Region> {
    let mut regions = Vec::new();

    for highlight in [Highlight::CoastLift, Highlight::TractionLoss] {
        let flagged = |a: &AnnotatedSample| match highlight {
            Highlight::CoastLift => a.coast_lift,
            Highlight::TractionLoss => a.traction_loss,
        };

        let mut run: Option<Region> = None;
        for (i, sample) in annotated.iter().enumerate() {
            if flagged(sample) {
                let distance = sample.sample.distance;
                match run.as_mut() {
                    Some(region) => region.end_distance = distance,
                    None => {
                        let start = annotated[i.saturating_sub(1)].sample.distance;
                        run = Some(Region::new(start, distance, highlight));
                    }
                }
            } else if let Some(region) = run.take() {
                regions.push(region);
            }
        }
        regions.extend(run);
    }

    regions.sort_by(|a, b| a.start_distance.total_cmp(&b.start_distance));
    regions
}

/// Map segments between consecutive samples, coloured by the flags of the later one.
pub fn map_segments(annotated: &[AnnotatedSample]) -> Vec<MapSegment> {
    annotated
        .windows(2)
        .map(|pair| {
            let (from, to) = (&pair[0].sample, &pair[1]);
            let highlight = if to.traction_loss {
                Some(Highlight::TractionLoss)
            } else if to.coast_lift {
                Some(Highlight::CoastLift)
            } else {
                None
            };
            MapSegment::new(Point::new(from.x, from.y), Point::new(to.sample.x, to.sample.y), highlight)
        })
        .collect()
}

/// Corner markers of the session's circuit, empty when unknown.
pub fn corner_markers(session: &SessionData) -> Vec<CornerMarker> {
    session
        .circuit_info
        .as_ref()
        .map(|info| {
            info.corners
                .iter()
                .map(|corner| CornerMarker {
                    label: corner.label(),
                    distance: corner.distance,
                    x: corner.x,
                    y: corner.y,
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Quick laps of each driver, in the given order.
pub fn lap_time_distribution(
    session: &SessionData,
    drivers: &[&DriverInfo],
    threshold: f64,
) -> LapTimeDistribution {
    let drivers = drivers
        .iter()
        .enumerate()
        .map(|(index, driver)| {
            let own_laps: Vec<&LapRecord> = session.laps_of(driver).collect();
            let laps = quick_laps(own_laps.iter().copied(), threshold)
                .into_iter()
                .filter_map(|lap| {
                    let compound = Compound::from_label(lap.compound.as_deref());
                    lap.timed().map(|lap_time| LapTimePoint {
                        lap_number: lap.lap_number,
                        lap_time,
                        compound: compound.label().to_string(),
                        compound_color: compound.color().to_string(),
                    })
                })
                .collect();

            DriverLapTimes {
                driver: driver.short_name().to_string(),
                color: driver_color(driver, index),
                laps,
            }
        })
        .collect();

    LapTimeDistribution { drivers }
}

/// Position of every driver at the end of each lap.
pub fn position_chart(session: &SessionData) -> PositionChart {
    let drivers = session
        .drivers
        .iter()
        .enumerate()
        .filter_map(|(index, driver)| {
            let mut points: Vec<Point> = session
                .laps_of(driver)
                .filter_map(|lap| {
                    lap.position.map(|pos| Point::new(f64::from(lap.lap_number), f64::from(pos)))
                })
                .collect();
            if points.is_empty() {
                return None;
            }
            points.sort_by(|a, b| a.x.total_cmp(&b.x));

            Some(PositionSeries {
                driver: driver.short_name().to_string(),
                color: driver_color(driver, index),
                points,
            })
        })
        .collect();

    PositionChart { max_position: session.drivers.len() as u32, drivers }
}

/// Tyre stints of every driver, with a compound legend.
pub fn strategy_chart(session: &SessionData) -> StrategyChart {
    let rows = session
        .drivers
        .iter()
        .filter_map(|driver| {
            let bars: Vec<StintBar> = stints(session.laps_of(driver))
                .into_iter()
                .map(|stint| {
                    let compound = Compound::from_label(Some(stint.compound.as_str()));
                    StintBar {
                        stint: stint.stint,
                        color: compound.color().to_string(),
                        compound: stint.compound,
                        start_lap: stint.start_lap,
                        end_lap: stint.end_lap,
                    }
                })
                .collect();
            (!bars.is_empty())
                .then(|| StrategyRow { driver: driver.short_name().to_string(), stints: bars })
        })
        .collect();

    let legend = Compound::ALL
        .iter()
        .filter(|c| **c != Compound::Unknown)
        .map(|c| LegendEntry { label: c.label().to_string(), color: c.color().to_string() })
        .collect();

    StrategyChart { rows, legend }
}

/// Team median pace over the session's quick laps.
pub fn team_pace_chart(session: &SessionData, threshold: f64) -> TeamPaceChart {
    let quick = quick_laps(&session.laps, threshold);

    let teams = rank_teams(quick)
        .into_iter()
        .enumerate()
        .map(|(index, pace)| {
            let color = session
                .drivers
                .iter()
                .filter(|d| session.team_of(d).as_deref() == Some(pace.team.as_str()))
                .find_map(DriverInfo::color)
                .unwrap_or_else(|| {
                    FALLBACK_DRIVER_COLORS[index % FALLBACK_DRIVER_COLORS.len()].to_string()
                });
            TeamPaceEntry { color, pace }
        })
        .collect();

    TeamPaceChart { teams }
}
