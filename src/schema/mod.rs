//! # Session Data
//!
//! The shape of a session as the telemetry provider hands it over: event
//! metadata, participants, every lap with optional telemetry rows, and the
//! circuit's corner markers. Keys are PascalCase, mirroring the provider's
//! column names, so exports can be dumped to YAML (or JSON) and loaded as-is.
//!
//! ```text
//! Year: 2024
//! EventName: Monaco Grand Prix
//! SessionName: Qualifying
//! Drivers:
//!   - { DriverNumber: "16", Abbreviation: LEC, FullName: Charles Leclerc, TeamName: Ferrari }
//! Laps:
//!   - Driver: LEC
//!     LapNumber: 12
//!     LapTime: 70.27
//!     Telemetry:
//!       - { Distance: 0, Time: 0, Speed: 280, Throttle: 100, Brake: false, RPM: 11500, nGear: 7, X: 0, Y: 0 }
//! CircuitInfo:
//!   Corners:
//!     - { Number: 1, Distance: 210.5, X: -7600, Y: 1200 }
//! ```
//!
//! Parsing cleans the text first (see [`clean_session_yaml`](crate::yaml_utils::clean_session_yaml))
//! and validates the result, so a [`SessionData`] that exists has at least one
//! driver and a recognised session kind.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::slugify;

pub mod circuit;
pub mod driver;
pub mod lap;
pub mod telemetry;

pub use circuit::{CircuitInfo, Corner};
pub use driver::DriverInfo;
pub use lap::LapRecord;
pub use telemetry::{RawBrake, RawSample, RawValue};

use crate::types::{SessionKey, SessionKind};
use crate::yaml_utils::clean_session_yaml;
use crate::{Result, TelemetryError};

/// A complete session as supplied by the telemetry provider.
#[derive(Default, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct SessionData {
    /// Season
    pub year: u16,
    /// Event name, e.g. "Monaco Grand Prix"
    pub event_name: String,
    /// Provider session name ("Qualifying", "Race")
    pub session_name: String,
    /// Participants in classification order
    #[serde(default)]
    pub drivers: Vec<DriverInfo>,
    /// All laps of all drivers
    #[serde(default)]
    pub laps: Vec<LapRecord>,
    /// Corner markers
    #[serde(default)]
    pub circuit_info: Option<CircuitInfo>,
}

impl SessionData {
    /// Parse and validate a session dump.
    pub fn parse(yaml: &str) -> Result<Self> {
        let cleaned = clean_session_yaml(yaml)?;

        let session: SessionData = serde_yaml_ng::from_str(&cleaned).map_err(|e| {
            TelemetryError::parse_error("Session deserialization", format!("YAML parsing failed: {e}"))
        })?;

        session.validate()?;
        debug!(
            event = %session.event_name,
            session = %session.session_name,
            drivers = session.drivers.len(),
            laps = session.laps.len(),
            "Parsed session data"
        );
        Ok(session)
    }

    /// Check the session is complete enough to chart.
    pub fn validate(&self) -> Result<()> {
        if self.event_name.trim().is_empty() {
            return Err(TelemetryError::parse_error("Session validation", "Missing event name"));
        }

        self.kind()?;

        if self.drivers.is_empty() {
            return Err(TelemetryError::parse_error("Session validation", "No drivers found"));
        }

        if let Some(lap) = self.laps.iter().find(|lap| lap.lap_number == 0) {
            return Err(TelemetryError::parse_error(
                "Session validation",
                format!("Lap of driver '{}' has lap number 0", lap.driver),
            ));
        }

        Ok(())
    }

    /// Session kind named by `session_name`.
    pub fn kind(&self) -> Result<SessionKind> {
        self.session_name.parse()
    }

    /// Whether this dump holds the session addressed by `key`.
    ///
    /// The key's circuit must name the event as a whole-word run of its slug:
    /// "Monaco" and "Monaco Grand Prix" both match "Monaco Grand Prix", "Mon" does not.
    pub fn matches(&self, key: &SessionKey) -> bool {
        let event = format!("-{}-", slugify(&self.event_name));
        let circuit = format!("-{}-", key.circuit_slug());

        self.year == key.year
            && self.kind().is_ok_and(|kind| kind == key.kind)
            && event.contains(&circuit)
    }

    /// Look a driver up by number or abbreviation.
    pub fn driver(&self, id: &str) -> Option<&DriverInfo> {
        self.drivers.iter().find(|driver| driver.matches(id))
    }

    /// All laps of a driver, in the order the provider listed them.
    pub fn laps_of<'a>(&'a self, driver: &'a DriverInfo) -> impl Iterator<Item = &'a LapRecord> + 'a {
        self.laps.iter().filter(move |lap| {
            lap.driver.eq_ignore_ascii_case(&driver.abbreviation)
                || lap.driver_number.as_deref() == Some(driver.driver_number.as_str())
        })
    }

    /// Team of a driver, from the driver list or their laps.
    pub fn team_of(&self, driver: &DriverInfo) -> Option<String> {
        if !driver.team_name.is_empty() {
            return Some(driver.team_name.clone());
        }
        self.laps_of(driver).find_map(|lap| lap.team.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
Year: 2024
EventName: Monaco Grand Prix
SessionName: Race
Drivers:
  - DriverNumber: "16"
    Abbreviation: LEC
    FullName: Charles Leclerc
    TeamName: Ferrari
    TeamColor: E8002D
  - DriverNumber: "81"
    Abbreviation: PIA
    FullName: Oscar Piastri
Laps:
  - Driver: LEC
    LapNumber: 1
    LapTime: 84.1
    Team: Ferrari
  - Driver: PIA
    DriverNumber: "81"
    LapNumber: 1
    LapTime: 84.9
    Team: McLaren
"#;

    #[test]
    fn parses_minimal_session() {
        let session = SessionData::parse(MINIMAL).unwrap();
        assert_eq!(session.kind().unwrap(), SessionKind::Race);
        assert_eq!(session.drivers.len(), 2);
        assert!(session.circuit_info.is_none());

        let key = SessionKey::with_seasons(2024, "Monaco", SessionKind::Race, 2018, 2024).unwrap();
        assert!(session.matches(&key));
        assert!(!session.matches(&key.with_kind(SessionKind::Qualifying)));
    }

    #[test]
    fn matches_requires_the_same_event() {
        let session = SessionData::parse(MINIMAL).unwrap();
        let key = |circuit: &str| {
            SessionKey::with_seasons(2024, circuit, SessionKind::Race, 2018, 2024).unwrap()
        };

        assert!(session.matches(&key("monaco")));
        assert!(session.matches(&key("Monaco Grand Prix")));
        assert!(!session.matches(&key("Silverstone")));
        assert!(!session.matches(&key("Mon")));
        assert!(!session.matches(&key("Grand Prix Monaco")));
    }

    #[test]
    fn looks_up_drivers_and_their_laps() {
        let session = SessionData::parse(MINIMAL).unwrap();
        let piastri = session.driver("81").unwrap();
        assert_eq!(session.laps_of(piastri).count(), 1);
        assert_eq!(session.team_of(piastri).as_deref(), Some("McLaren"));
        assert!(session.driver("HAM").is_none());
    }

    #[test]
    fn rejects_unsupported_sessions() {
        let practice = MINIMAL.replace("SessionName: Race", "SessionName: Practice 1");
        assert!(matches!(
            SessionData::parse(&practice),
            Err(TelemetryError::UnsupportedSession { .. })
        ));
    }

    #[test]
    fn rejects_sessions_without_drivers() {
        let yaml = "Year: 2024\nEventName: Monaco Grand Prix\nSessionName: Race\n";
        assert!(matches!(SessionData::parse(yaml), Err(TelemetryError::Parse { .. })));
    }

    #[test]
    fn reports_yaml_errors_as_parse_errors() {
        assert!(matches!(
            SessionData::parse("Year: [2024\n"),
            Err(TelemetryError::Parse { .. })
        ));
    }
}
