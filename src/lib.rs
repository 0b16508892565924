//! Type-safe Rust library for Formula 1 lap telemetry.
//!
//! Pitlane loads qualifying and race sessions, annotates every telemetry sample
//! of a lap with derived driving signals and prepares render-ready chart data
//! for a comparison dashboard.
//!
//! # Features
//!
//! - **Annotation**: Coast/lift and traction-loss detection per sample
//! - **Lap KPIs**: Full-throttle efficiency and flag percentages
//! - **Session caching**: Explicit, bounded cache shared between handlers
//! - **Dashboard handlers**: Lap panels, circuit map, lap-time distribution,
//!   position changes, tyre strategy and team pace
//! - **Live mode**: Background re-rendering of the latest selection
//!
//! # Quick Start
//!
//! ```rust
//! use pitlane::{Brake, TelemetrySample, annotate, summarize};
//!
//! let at = |distance: f64, throttle: f64| TelemetrySample {
//!     distance,
//!     time: distance / 70.0,
//!     speed: 250.0,
//!     throttle,
//!     brake: Brake::Pressed(false),
//!     rpm: 11_000.0,
//!     gear: 6,
//!     x: distance,
//!     y: 0.0,
//! };
//!
//! let lap = vec![at(0.0, 100.0), at(5.0, 100.0), at(10.0, 60.0)];
//! let annotated = annotate(&lap)?;
//! assert!(annotated[2].coast_lift);
//!
//! let kpis = summarize(&annotated)?;
//! assert_eq!(kpis.sample_count, 3);
//! # Ok::<(), pitlane::TelemetryError>(())
//! ```
//!
//! ## Example (dashboard over session dumps)
//!
//! ```rust,no_run
//! use pitlane::{Dashboard, DashboardConfig, SessionKind};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DashboardConfig::from_file("pitlane.yaml")?;
//!     let dashboard = Dashboard::from_config(config);
//!
//!     let key = dashboard.session_key(2024, "Monaco", SessionKind::Race)?;
//!     for row in dashboard.tyre_strategy(&key).await?.rows {
//!         println!("{}: {} stints", row.driver, row.stints.len());
//!     }
//!
//!     dashboard.shutdown().await;
//!     Ok(())
//! }
//! ```

// Core types and error handling
mod error;
#[cfg(any(test, feature = "benchmark"))]
pub mod test_utils;
pub mod types;
mod yaml_utils;

// Analysis
pub mod analysis;

// Session sources and caching
pub mod cache;
pub mod provider;
pub mod providers;
pub mod schema;

// Dashboard
pub mod config;
pub mod dashboard;
pub mod stream;

// Core exports
pub use error::*;
pub use types::*;

pub use analysis::{SignalThresholds, annotate, annotate_with, strip_flags, summarize, summarize_with};
pub use cache::SessionCache;
pub use config::DashboardConfig;
pub use dashboard::{Dashboard, LapChoice, LiveDashboard, RenderOutcome, Selection};
pub use provider::TelemetrySource;
pub use providers::{FileSource, MemorySource};
pub use schema::SessionData;
