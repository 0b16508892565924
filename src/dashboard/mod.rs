//! Dashboard request handlers.
//!
//! Every handler receives what it needs (session key, selection) as a
//! parameter and returns a render-ready structure; there is no implicit
//! per-user state. Sessions are fetched through the shared [`SessionCache`].
//!
//! ```rust,no_run
//! use pitlane::dashboard::{Dashboard, LapChoice, Selection};
//! use pitlane::{DashboardConfig, SessionKind};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> pitlane::Result<()> {
//! let dashboard = Dashboard::from_config(DashboardConfig::default());
//! let status = dashboard.load_weekend("Monaco", 2024).await?;
//! println!("{}", status.summary());
//!
//! let charts = dashboard
//!     .lap_charts(&Selection {
//!         year: 2024,
//!         circuit: "Monaco".into(),
//!         kind: SessionKind::Qualifying,
//!         drivers: vec!["LEC".into(), "PIA".into()],
//!         lap: LapChoice::Fastest,
//!     })
//!     .await?;
//! for driver in &charts.drivers {
//!     println!("{}: {:.1}% flat out", driver.driver, driver.kpis.efficiency_score);
//! }
//! dashboard.shutdown().await;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use tracing::{debug, info, warn};

pub mod charts;
pub mod live;
pub mod render;
pub mod selection;

pub use charts::*;
pub use live::{LiveDashboard, RenderOutcome};
pub use selection::{LapChoice, Selection};

use crate::cache::SessionCache;
use crate::config::DashboardConfig;
use crate::provider::TelemetrySource;
use crate::providers::FileSource;
use crate::schema::{DriverInfo, SessionData};
use crate::types::{SessionKey, SessionKind};
use crate::{Result, TelemetryError};

/// Request handlers sharing a source, a session cache and configuration.
#[derive(Clone)]
pub struct Dashboard {
    source: Arc<dyn TelemetrySource>,
    cache: Arc<SessionCache>,
    config: Arc<DashboardConfig>,
}

impl std::fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dashboard")
            .field("source", &self.source.name())
            .field("cache", &self.cache)
            .field("config", &self.config)
            .finish()
    }
}

impl Dashboard {
    /// Create handlers over an explicit source and cache.
    pub fn new(
        source: Arc<dyn TelemetrySource>,
        cache: Arc<SessionCache>,
        config: DashboardConfig,
    ) -> Self {
        Self { source, cache, config: Arc::new(config) }
    }

    /// Handlers over session dumps under `config.data_root`, with a fresh cache.
    pub fn from_config(config: DashboardConfig) -> Self {
        let source = Arc::new(FileSource::new(&config.data_root));
        let cache = Arc::new(SessionCache::new(config.cache_capacity));
        Self::new(source, cache, config)
    }

    /// Active configuration.
    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Shared session cache.
    pub fn cache(&self) -> &Arc<SessionCache> {
        &self.cache
    }

    /// Build a session key checked against the configured seasons.
    pub fn session_key(&self, year: u16, circuit: &str, kind: SessionKind) -> Result<SessionKey> {
        self.config.session_key(year, circuit, kind)
    }

    /// A session, from the cache or the source.
    pub async fn session(&self, key: &SessionKey) -> Result<Arc<SessionData>> {
        self.cache.get_or_load(self.source.as_ref(), key).await
    }

    /// Load qualifying and race of an event.
    ///
    /// A session that fails to load is reported in the status, not as an
    /// error; only an invalid circuit or season is an error.
    pub async fn load_weekend(&self, circuit: &str, year: u16) -> Result<WeekendStatus> {
        let qualifying = self.session_key(year, circuit, SessionKind::Qualifying)?;
        let race = qualifying.with_kind(SessionKind::Race);

        let (q, r) = futures::join!(self.session_status(qualifying), self.session_status(race));
        let status = WeekendStatus { qualifying: q, race: r };

        info!(circuit, year, summary = %status.summary(), "Weekend loaded");
        Ok(status)
    }

    async fn session_status(&self, key: SessionKey) -> SessionStatus {
        match self.session(&key).await {
            Ok(_) => SessionStatus { message: format!("{} loaded", key.kind), session: key, loaded: true },
            Err(e) => {
                warn!(session = %key, error = %e, "Failed to load session");
                SessionStatus {
                    message: format!("Error loading {}: {e}", key.kind),
                    session: key,
                    loaded: false,
                }
            }
        }
    }

    /// Drivers of a session as picker entries.
    pub async fn drivers(&self, key: &SessionKey) -> Result<Vec<DriverOption>> {
        let session = self.session(key).await?;
        Ok(session
            .drivers
            .iter()
            .map(|driver| DriverOption {
                number: driver.driver_number.clone(),
                abbreviation: driver.short_name().to_string(),
                label: driver.display_name(),
            })
            .collect())
    }

    /// Drivers preselected when a session is opened.
    pub async fn default_selection(&self, key: &SessionKey) -> Result<Vec<String>> {
        let session = self.session(key).await?;
        Ok(session
            .drivers
            .iter()
            .take(self.config.default_selected_drivers)
            .map(|driver| driver.short_name().to_string())
            .collect())
    }

    /// Chart-update handler: annotated lap panels for every selected driver.
    ///
    /// A driver whose lap cannot be charted (unknown driver, missing lap,
    /// malformed telemetry) is listed in `failures`; the other drivers are
    /// still charted.
    pub async fn lap_charts(&self, selection: &Selection) -> Result<LapChartSet> {
        let key = selection.validate(&self.config)?;
        let session = self.session(&key).await?;
        selection.check_drivers(&session)?;

        let mut drivers = Vec::with_capacity(selection.drivers.len());
        let mut failures = Vec::new();

        for (index, id) in selection.drivers.iter().enumerate() {
            match self.chart_driver(&session, id, index, selection.lap) {
                Ok(chart) => drivers.push(chart),
                Err(e) => {
                    warn!(session = %key, driver = %id, error = %e, "Skipping driver");
                    failures.push(ChartFailure { driver: id.clone(), message: e.to_string() });
                }
            }
        }

        debug!(session = %key, charted = drivers.len(), failed = failures.len(), "Lap charts built");
        Ok(LapChartSet { corners: render::corner_markers(&session), session: key, drivers, failures })
    }

    /// Lap panels of a single driver; any failure is returned as the error.
    pub async fn lap_chart(
        &self,
        key: &SessionKey,
        driver: &str,
        lap: LapChoice,
    ) -> Result<DriverLapChart> {
        let session = self.session(key).await?;
        self.chart_driver(&session, driver, 0, lap)
    }

    fn chart_driver(
        &self,
        session: &SessionData,
        id: &str,
        index: usize,
        lap: LapChoice,
    ) -> Result<DriverLapChart> {
        let driver = find_driver(session, id)?;
        let record = render::pick_lap(session, driver, lap)?;
        render::lap_chart(driver, render::driver_color(driver, index), record, &self.config.thresholds)
    }

    /// Quick-lap time distribution of the given drivers.
    pub async fn lap_time_distribution(
        &self,
        key: &SessionKey,
        drivers: &[String],
    ) -> Result<LapTimeDistribution> {
        let session = self.session(key).await?;
        selection::reject_repeated_drivers(&session, drivers)?;
        let selected = drivers
            .iter()
            .map(|id| find_driver(&session, id))
            .collect::<Result<Vec<_>>>()?;
        Ok(render::lap_time_distribution(&session, &selected, self.config.quick_lap_threshold))
    }

    /// Position changes over the session.
    pub async fn position_changes(&self, key: &SessionKey) -> Result<PositionChart> {
        let session = self.session(key).await?;
        Ok(render::position_chart(&session))
    }

    /// Tyre strategy of every driver.
    pub async fn tyre_strategy(&self, key: &SessionKey) -> Result<StrategyChart> {
        let session = self.session(key).await?;
        Ok(render::strategy_chart(&session))
    }

    /// Team ranking by median quick-lap time.
    pub async fn team_pace(&self, key: &SessionKey) -> Result<TeamPaceChart> {
        let session = self.session(key).await?;
        Ok(render::team_pace_chart(&session, self.config.quick_lap_threshold))
    }

    /// Release cached sessions. Call once when the application stops.
    pub async fn shutdown(&self) {
        self.cache.clear().await;
    }
}

fn find_driver<'a>(session: &'a SessionData, id: &str) -> Result<&'a DriverInfo> {
    session
        .driver(id)
        .ok_or_else(|| TelemetryError::DriverNotFound { driver: id.to_string() })
}
