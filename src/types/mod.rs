//! Core types for lap telemetry.
//!
//! - [`TelemetrySample`] is one validated sample; [`validate_samples`] turns the
//!   provider's loosely typed rows into samples, rejecting the whole lap on the
//!   first malformed row
//! - [`LapTelemetry`] is a lap's metadata plus its samples
//! - [`AnnotatedSample`] and [`LapKpis`] are what the annotator derives
//! - [`SessionKey`] and [`SessionKind`] address a session of an event
//!
//! ## Usage Example
//!
//! ```rust
//! use pitlane::types::{Brake, TelemetrySample};
//!
//! let sample = TelemetrySample {
//!     distance: 120.0,
//!     time: 1.9,
//!     speed: 284.0,
//!     throttle: 100.0,
//!     brake: Brake::Pressed(false),
//!     rpm: 11_200.0,
//!     gear: 7,
//!     x: 1520.0,
//!     y: -310.0,
//! };
//! assert!(!sample.brake.is_engaged());
//! ```

mod annotated;
mod compound;
mod lap;
mod sample;
mod session;

pub use annotated::{AnnotatedSample, LapKpis};
pub use compound::Compound;
pub use lap::LapTelemetry;
pub use sample::{Brake, MAX_GEAR, TelemetrySample, validate_samples};
pub use session::{EARLIEST_SEASON, SessionKey, SessionKind, current_season, slugify};
