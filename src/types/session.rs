//! Session identification

use chrono::{Datelike, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::{Result, TelemetryError};

/// First season with telemetry available from the provider.
pub const EARLIEST_SEASON: u16 = 2018;

/// Session kinds the dashboard analyses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub enum SessionKind {
    Qualifying,
    Race,
}

impl SessionKind {
    /// Both kinds, in the order a weekend is loaded.
    pub const WEEKEND: [SessionKind; 2] = [SessionKind::Qualifying, SessionKind::Race];

    /// File-name friendly identifier.
    pub fn slug(self) -> &'static str {
        match self {
            SessionKind::Qualifying => "qualifying",
            SessionKind::Race => "race",
        }
    }

    /// Provider session name.
    pub fn name(self) -> &'static str {
        match self {
            SessionKind::Qualifying => "Qualifying",
            SessionKind::Race => "Race",
        }
    }
}

impl FromStr for SessionKind {
    type Err = TelemetryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "q" | "quali" | "qualifying" => Ok(SessionKind::Qualifying),
            "r" | "race" => Ok(SessionKind::Race),
            _ => Err(TelemetryError::UnsupportedSession { name: s.to_string() }),
        }
    }
}

impl fmt::Display for SessionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Identifies one session of one event.
///
/// Circuits compare by slug, so `"Monaco"` and `" monaco "` address the same
/// session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct SessionKey {
    pub year: u16,
    pub circuit: String,
    pub kind: SessionKind,
}

impl SessionKey {
    /// Create a key for a supported season (2018 up to the current year).
    pub fn new(year: u16, circuit: impl Into<String>, kind: SessionKind) -> Result<Self> {
        Self::with_seasons(year, circuit, kind, EARLIEST_SEASON, current_season())
    }

    /// Create a key validated against an explicit season range.
    pub fn with_seasons(
        year: u16,
        circuit: impl Into<String>,
        kind: SessionKind,
        earliest: u16,
        latest: u16,
    ) -> Result<Self> {
        if year < earliest || year > latest {
            return Err(TelemetryError::UnsupportedSeason { year, earliest, latest });
        }

        let circuit = circuit.into().trim().to_string();
        if circuit.is_empty() {
            return Err(TelemetryError::invalid_selection("circuit name is empty"));
        }

        Ok(Self { year, circuit, kind })
    }

    /// Lower-case, dash separated circuit name used for lookups.
    pub fn circuit_slug(&self) -> String {
        slugify(&self.circuit)
    }

    /// Same event, other session kind.
    pub fn with_kind(&self, kind: SessionKind) -> Self {
        Self { kind, ..self.clone() }
    }
}

impl PartialEq for SessionKey {
    fn eq(&self, other: &Self) -> bool {
        self.year == other.year
            && self.kind == other.kind
            && self.circuit_slug() == other.circuit_slug()
    }
}

impl Eq for SessionKey {}

impl Hash for SessionKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.year.hash(state);
        self.circuit_slug().hash(state);
        self.kind.hash(state);
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.year, self.circuit, self.kind)
    }
}

/// Lower-case a circuit name and join its words with dashes.
pub fn slugify(name: &str) -> String {
    name.split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Calendar year of the local clock.
pub fn current_season() -> u16 {
    u16::try_from(Local::now().year()).unwrap_or(u16::MAX)
}
