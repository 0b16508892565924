//! Test utilities for fixture sessions and synthetic telemetry
//!
//! Fixture sessions live under `test-data/sessions/` in the layout
//! [`FileSource`](crate::providers::FileSource) reads, and are also embedded
//! so unit tests can parse them without touching the filesystem.

#![cfg(any(test, feature = "benchmark"))]

use std::path::{Path, PathBuf};

use crate::schema::SessionData;
use crate::types::{Brake, SessionKey, SessionKind, TelemetrySample};

const QUALIFYING_YAML: &str = include_str!("../test-data/sessions/2024/monaco/qualifying.yaml");
const RACE_YAML: &str = include_str!("../test-data/sessions/2024/monaco/race.yaml");

/// Error returned when a required session fixture cannot be located.
#[derive(Debug, Clone)]
pub struct FixtureError {
    message: String,
}

impl std::fmt::Display for FixtureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for FixtureError {}

/// Require that a fixture exists on disk.
pub fn require_fixture<P: AsRef<Path>>(path: P) -> Result<PathBuf, FixtureError> {
    let path = path.as_ref();
    if path.exists() {
        Ok(path.to_path_buf())
    } else {
        Err(FixtureError { message: format!("Missing session fixture: {}", path.display()) })
    }
}

/// Root of the fixture session dumps.
pub fn sessions_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("test-data").join("sessions")
}

/// Key of the 2024 Monaco fixture session, valid for seasons 2018-2024.
pub fn session_key(kind: SessionKind) -> SessionKey {
    SessionKey::with_seasons(2024, "Monaco", kind, 2018, 2024).expect("fixture key is valid")
}

/// The 2024 Monaco qualifying fixture.
pub fn qualifying_session() -> SessionData {
    SessionData::parse(QUALIFYING_YAML).expect("qualifying fixture parses")
}

/// The 2024 Monaco race fixture.
pub fn race_session() -> SessionData {
    SessionData::parse(RACE_YAML).expect("race fixture parses")
}

/// A sample at `distance` with the signals the annotator looks at.
pub fn sample(distance: f64, speed: f64, throttle: f64, brake: bool, rpm: f64) -> TelemetrySample {
    TelemetrySample {
        distance,
        time: distance / 70.0,
        speed,
        throttle,
        brake: Brake::Pressed(brake),
        rpm,
        gear: 5,
        x: distance,
        y: 0.0,
    }
}

/// A lap of `len` samples cycling through straights, braking zones and
/// wheelspin exits, so every detector fires somewhere.
pub fn synthetic_lap(len: usize) -> Vec<TelemetrySample> {
    (0..len)
        .map(|i| {
            let distance = i as f64 * 5.0;
            let phase = (i % 20) as f64;
            match i % 20 {
                0..=9 => sample(distance, 200.0 + phase * 8.0, 100.0, false, 10_000.0 + phase * 150.0),
                10 | 11 => sample(distance, 270.0, 60.0 - (phase - 10.0) * 30.0, false, 11_000.0),
                12..=15 => sample(distance, 240.0 - (phase - 12.0) * 30.0, 0.0, true, 9_000.0),
                _ => sample(distance, 130.0, 70.0, false, 9_000.0 + (phase - 15.0) * 400.0),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixtures_are_on_disk() {
        let root = sessions_root();
        assert!(require_fixture(root.join("2024/monaco/qualifying.yaml")).is_ok());
        assert!(require_fixture(root.join("2024/monaco/race.yaml")).is_ok());
        assert!(require_fixture(root.join("1999/nowhere/race.yaml")).is_err());
    }

    #[test]
    fn synthetic_lap_is_distance_ordered() {
        let lap = synthetic_lap(100);
        assert_eq!(lap.len(), 100);
        assert!(lap.windows(2).all(|w| w[0].distance <= w[1].distance));
    }
}
