//! What the user has picked in the dashboard

use serde::{Deserialize, Serialize};

use crate::config::DashboardConfig;
use crate::schema::SessionData;
use crate::types::{SessionKey, SessionKind};
use crate::{Result, TelemetryError};

/// Which lap of each selected driver to chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub enum LapChoice {
    /// The driver's fastest timed lap
    #[default]
    Fastest,
    /// A specific lap number
    Number(u32),
}

/// Current dashboard selection, passed explicitly to every chart handler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct Selection {
    pub year: u16,
    pub circuit: String,
    pub kind: SessionKind,
    /// Driver numbers or abbreviations, in display order
    pub drivers: Vec<String>,
    #[serde(default)]
    pub lap: LapChoice,
}

impl Selection {
    /// Check the selection against the configuration and return its session key.
    ///
    /// Repeated ids are an error so colours and rows stay unambiguous. Ids that
    /// name the same driver in different forms (`"LEC"` and `"16"`) can only be
    /// caught once the session is known, see [`Selection::check_drivers`].
    pub fn validate(&self, config: &DashboardConfig) -> Result<SessionKey> {
        let key = config.session_key(self.year, &self.circuit, self.kind)?;

        if self.drivers.is_empty() {
            return Err(TelemetryError::invalid_selection("no drivers selected"));
        }
        if self.drivers.len() > config.max_selected_drivers {
            return Err(TelemetryError::invalid_selection(format!(
                "{} drivers selected, at most {} can be compared",
                self.drivers.len(),
                config.max_selected_drivers
            )));
        }
        for (i, driver) in self.drivers.iter().enumerate() {
            if self.drivers[..i].iter().any(|d| d.trim().eq_ignore_ascii_case(driver.trim())) {
                return Err(TelemetryError::invalid_selection(format!(
                    "driver '{driver}' selected twice"
                )));
            }
        }
        if self.lap == LapChoice::Number(0) {
            return Err(TelemetryError::invalid_selection("lap numbers start at 1"));
        }

        Ok(key)
    }

    /// Reject ids that resolve to the same driver of `session`.
    ///
    /// Unknown ids are left alone; they are reported per driver when charting.
    pub fn check_drivers(&self, session: &SessionData) -> Result<()> {
        reject_repeated_drivers(session, &self.drivers)
    }
}

/// Reject driver ids that resolve to the same driver of `session`.
pub(crate) fn reject_repeated_drivers(session: &SessionData, ids: &[String]) -> Result<()> {
    for (i, id) in ids.iter().enumerate() {
        let Some(driver) = session.driver(id) else { continue };
        if let Some(earlier) = ids[..i]
            .iter()
            .find(|other| session.driver(other).is_some_and(|d| std::ptr::eq(d, driver)))
        {
            return Err(TelemetryError::invalid_selection(format!(
                "driver '{}' selected twice (as '{earlier}' and '{id}')",
                driver.short_name()
            )));
        }
    }
    Ok(())
}
