//! Tyre compounds and their chart colours

use std::fmt;
use std::str::FromStr;

/// Tyre compound of a lap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Compound {
    Soft,
    Medium,
    Hard,
    Intermediate,
    Wet,
    #[default]
    Unknown,
}

impl Compound {
    /// Every compound in legend order.
    pub const ALL: [Compound; 6] = [
        Compound::Soft,
        Compound::Medium,
        Compound::Hard,
        Compound::Intermediate,
        Compound::Wet,
        Compound::Unknown,
    ];

    /// Parse a provider compound label, mapping anything unrecognised to `Unknown`.
    pub fn from_label(label: Option<&str>) -> Self {
        label.and_then(|l| l.parse().ok()).unwrap_or(Compound::Unknown)
    }

    /// Upper-case label as used by the provider.
    pub fn label(self) -> &'static str {
        match self {
            Compound::Soft => "SOFT",
            Compound::Medium => "MEDIUM",
            Compound::Hard => "HARD",
            Compound::Intermediate => "INTERMEDIATE",
            Compound::Wet => "WET",
            Compound::Unknown => "UNKNOWN",
        }
    }

    /// Hex colour used for this compound in strategy and distribution charts.
    pub fn color(self) -> &'static str {
        match self {
            Compound::Soft => "#da020e",
            Compound::Medium => "#ffd12e",
            Compound::Hard => "#f0f0ec",
            Compound::Intermediate => "#43b02a",
            Compound::Wet => "#0067ad",
            Compound::Unknown => "#808080",
        }
    }
}

impl FromStr for Compound {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SOFT" | "S" => Ok(Compound::Soft),
            "MEDIUM" | "M" => Ok(Compound::Medium),
            "HARD" | "H" => Ok(Compound::Hard),
            "INTERMEDIATE" | "I" | "INTER" => Ok(Compound::Intermediate),
            "WET" | "W" => Ok(Compound::Wet),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Compound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_parse_case_insensitively() {
        assert_eq!(Compound::from_label(Some("soft")), Compound::Soft);
        assert_eq!(Compound::from_label(Some("INTERMEDIATE")), Compound::Intermediate);
        assert_eq!(Compound::from_label(Some("TEST_UNKNOWN")), Compound::Unknown);
        assert_eq!(Compound::from_label(None), Compound::Unknown);
    }

    #[test]
    fn unknown_compound_is_grey() {
        assert_eq!(Compound::Unknown.color(), "#808080");
        assert_eq!(Compound::Soft.color(), "#da020e");
    }
}
