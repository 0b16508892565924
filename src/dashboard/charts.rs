//! Render-ready chart structures
//!
//! Everything here is plain serializable data. Highlighted regions and map
//! segments carry their colour so the presentation layer draws them as is.

use serde::{Deserialize, Serialize};

use crate::analysis::TeamPace;
use crate::types::{LapKpis, SessionKey};

/// Colour of coast/lift regions.
pub const COAST_LIFT_COLOR: &str = "#FFA500";

/// Colour of traction-loss regions.
pub const TRACTION_LOSS_COLOR: &str = "#FF00FF";

/// Driver colours used when the session carries no team colour.
pub const FALLBACK_DRIVER_COLORS: [&str; 10] = [
    "#0600EF", "#FF8700", "#FF1801", "#DC143C", "#00D2BE", "#FF69B4", "#32CD32", "#FF4500",
    "#8A2BE2", "#00CED1",
];

/// Derived signal highlighted on a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub enum Highlight {
    CoastLift,
    TractionLoss,
}

impl Highlight {
    pub fn color(self) -> &'static str {
        match self {
            Highlight::CoastLift => COAST_LIFT_COLOR,
            Highlight::TractionLoss => TRACTION_LOSS_COLOR,
        }
    }
}

/// A point of a line series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A stretch of the lap, by distance, where a signal was flagged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct Region {
    pub start_distance: f64,
    pub end_distance: f64,
    pub highlight: Highlight,
    pub color: String,
}

impl Region {
    pub fn new(start_distance: f64, end_distance: f64, highlight: Highlight) -> Self {
        Self { start_distance, end_distance, highlight, color: highlight.color().to_string() }
    }
}

/// Vertical corner marker on distance charts and label on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct CornerMarker {
    pub label: String,
    pub distance: f64,
    pub x: f64,
    pub y: f64,
}

/// One segment of the circuit map between consecutive samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct MapSegment {
    pub from: Point,
    pub to: Point,
    /// Traction loss wins over coast/lift when both are flagged
    pub highlight: Option<Highlight>,
    /// Colour of `highlight`; `None` draws the segment in the driver's colour
    pub color: Option<String>,
}

impl MapSegment {
    pub fn new(from: Point, to: Point, highlight: Option<Highlight>) -> Self {
        let color = highlight.map(|h| h.color().to_string());
        Self { from, to, highlight, color }
    }
}

/// All panels of one driver's lap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct DriverLapChart {
    pub driver: String,
    pub color: String,
    pub lap_number: u32,
    pub lap_time: Option<f64>,
    pub compound: String,
    pub kpis: LapKpis,
    /// Speed over distance
    pub speed: Vec<Point>,
    /// Throttle over distance
    pub throttle: Vec<Point>,
    /// Brake (0-100) over distance
    pub brake: Vec<Point>,
    /// RPM over distance
    pub rpm: Vec<Point>,
    /// Gear over distance
    pub gear: Vec<Point>,
    /// Sector 1-3 times
    pub sector_times: Vec<Option<f64>>,
    /// Flagged stretches
    pub regions: Vec<Region>,
    /// Circuit map
    pub map: Vec<MapSegment>,
}

/// A driver whose lap could not be charted, and why.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct ChartFailure {
    pub driver: String,
    pub message: String,
}

/// Response of the lap chart handler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct LapChartSet {
    pub session: SessionKey,
    pub corners: Vec<CornerMarker>,
    pub drivers: Vec<DriverLapChart>,
    pub failures: Vec<ChartFailure>,
}

/// Entry of a driver picker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct DriverOption {
    pub number: String,
    pub abbreviation: String,
    /// `"VER - Max Verstappen"`
    pub label: String,
}

/// Outcome of loading one session of a weekend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct SessionStatus {
    pub session: SessionKey,
    pub loaded: bool,
    pub message: String,
}

/// Outcome of loading qualifying and race.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct WeekendStatus {
    pub qualifying: SessionStatus,
    pub race: SessionStatus,
}

impl WeekendStatus {
    /// Whether at least one session can be shown.
    pub fn any_loaded(&self) -> bool {
        self.qualifying.loaded || self.race.loaded
    }

    /// `"Qualifying loaded | Error loading Race: ..."`
    pub fn summary(&self) -> String {
        format!("{} | {}", self.qualifying.message, self.race.message)
    }
}

/// One lap on the lap-time distribution chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct LapTimePoint {
    pub lap_number: u32,
    pub lap_time: f64,
    pub compound: String,
    pub compound_color: String,
}

/// Quick laps of one driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct DriverLapTimes {
    pub driver: String,
    pub color: String,
    pub laps: Vec<LapTimePoint>,
}

/// Lap-time distribution of the selected drivers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct LapTimeDistribution {
    pub drivers: Vec<DriverLapTimes>,
}

impl LapTimeDistribution {
    /// False when no selected driver has a quick lap; the view shows a notice.
    pub fn has_data(&self) -> bool {
        self.drivers.iter().any(|d| !d.laps.is_empty())
    }
}

/// Position per lap of one driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct PositionSeries {
    pub driver: String,
    pub color: String,
    /// x = lap number, y = position
    pub points: Vec<Point>,
}

/// Position changes over a race. The y axis runs from `max_position` at the
/// bottom to 1 at the top.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct PositionChart {
    pub max_position: u32,
    pub drivers: Vec<PositionSeries>,
}

/// A stint bar on the strategy chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct StintBar {
    pub stint: u32,
    pub compound: String,
    pub color: String,
    pub start_lap: u32,
    pub end_lap: u32,
}

/// Stints of one driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct StrategyRow {
    pub driver: String,
    pub stints: Vec<StintBar>,
}

/// Legend entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct LegendEntry {
    pub label: String,
    pub color: String,
}

/// Tyre strategy of every driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct StrategyChart {
    pub rows: Vec<StrategyRow>,
    pub legend: Vec<LegendEntry>,
}

/// Team pace box plot, fastest team first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct TeamPaceChart {
    pub teams: Vec<TeamPaceEntry>,
}

/// One box of the team pace chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct TeamPaceEntry {
    pub color: String,
    #[serde(flatten)]
    pub pace: TeamPace,
}
