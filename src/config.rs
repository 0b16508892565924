//! Dashboard configuration
//!
//! Loaded from YAML; every key is optional and falls back to the defaults below.
//!
//! ```yaml
//! data_root: /var/lib/pitlane/sessions
//! cache_capacity: 8
//! earliest_season: 2018
//! max_selected_drivers: 8
//! default_selected_drivers: 3
//! quick_lap_threshold: 1.07
//! render_interval_ms: 250
//! thresholds:
//!   full_throttle: 95.0
//!   rpm_jump: 200.0
//!   traction_throttle: 50.0
//!   speed_stagnation: 0.5
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::analysis::{DEFAULT_QUICK_LAP_THRESHOLD, SignalThresholds};
use crate::types::{EARLIEST_SEASON, SessionKey, SessionKind, current_season};
use crate::{Result, TelemetryError};

/// Settings shared by the dashboard handlers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Root directory of exported session dumps
    pub data_root: PathBuf,
    /// Sessions kept in the cache
    pub cache_capacity: usize,
    /// First selectable season
    pub earliest_season: u16,
    /// Last selectable season, the current year when unset
    pub latest_season: Option<u16>,
    /// Upper bound on drivers compared at once
    pub max_selected_drivers: usize,
    /// Drivers preselected when a session is opened
    pub default_selected_drivers: usize,
    /// Quick-lap cutoff as a multiple of the fastest lap
    pub quick_lap_threshold: f64,
    /// Minimum time between two renders of the live dashboard
    pub render_interval_ms: u64,
    /// Detector thresholds
    pub thresholds: SignalThresholds,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_root: PathBuf::from("sessions"),
            cache_capacity: 8,
            earliest_season: EARLIEST_SEASON,
            latest_season: None,
            max_selected_drivers: 8,
            default_selected_drivers: 3,
            quick_lap_threshold: DEFAULT_QUICK_LAP_THRESHOLD,
            render_interval_ms: 250,
            thresholds: SignalThresholds::default(),
        }
    }
}

impl DashboardConfig {
    /// Parse and validate a YAML configuration.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: DashboardConfig = if yaml.trim().is_empty() {
            DashboardConfig::default()
        } else {
            serde_yaml_ng::from_str(yaml).map_err(|e| {
                TelemetryError::parse_error("Dashboard configuration", e.to_string())
            })?
        };
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a YAML configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading dashboard configuration");
        let text = std::fs::read_to_string(path)
            .map_err(|e| TelemetryError::file_error(path.to_path_buf(), e))?;
        Self::from_yaml_str(&text)
    }

    /// Reject settings that cannot work together.
    pub fn validate(&self) -> Result<()> {
        if self.cache_capacity == 0 {
            return Err(TelemetryError::config("cache_capacity must be at least 1"));
        }
        if self.earliest_season < EARLIEST_SEASON {
            return Err(TelemetryError::config(format!(
                "earliest_season must be {EARLIEST_SEASON} or later"
            )));
        }
        if self.latest_season() < self.earliest_season {
            return Err(TelemetryError::config("latest_season is before earliest_season"));
        }
        if self.max_selected_drivers == 0 {
            return Err(TelemetryError::config("max_selected_drivers must be at least 1"));
        }
        if self.default_selected_drivers > self.max_selected_drivers {
            return Err(TelemetryError::config(
                "default_selected_drivers exceeds max_selected_drivers",
            ));
        }
        if !self.quick_lap_threshold.is_finite() || self.quick_lap_threshold < 1.0 {
            return Err(TelemetryError::config("quick_lap_threshold must be 1.0 or more"));
        }
        let t = &self.thresholds;
        if !(0.0..=100.0).contains(&t.full_throttle) || !(0.0..=100.0).contains(&t.traction_throttle)
        {
            return Err(TelemetryError::config("throttle thresholds must lie within 0-100"));
        }
        if !t.rpm_jump.is_finite() || t.rpm_jump < 0.0 {
            return Err(TelemetryError::config("rpm_jump must be a non-negative number"));
        }
        if !t.speed_stagnation.is_finite() {
            return Err(TelemetryError::config("speed_stagnation must be finite"));
        }
        Ok(())
    }

    /// Last selectable season.
    pub fn latest_season(&self) -> u16 {
        self.latest_season.unwrap_or_else(current_season)
    }

    /// Build a session key checked against the configured season range.
    pub fn session_key(&self, year: u16, circuit: &str, kind: SessionKind) -> Result<SessionKey> {
        SessionKey::with_seasons(year, circuit, kind, self.earliest_season, self.latest_season())
    }

    /// Minimum time between two renders.
    pub fn render_interval(&self) -> Duration {
        Duration::from_millis(self.render_interval_ms.max(1))
    }
}
