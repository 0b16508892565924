//! Provider trait for session data sources

use crate::Result;
use crate::schema::SessionData;
use crate::types::SessionKey;

/// Trait for telemetry data sources
///
/// Sources abstract over where sessions come from (exported files, an
/// in-memory fixture set, a remote API). All I/O happens here, before any
/// lap is validated or annotated.
#[async_trait::async_trait]
pub trait TelemetrySource: Send + Sync + 'static {
    /// Load a complete session
    ///
    /// Returns:
    /// - `Ok(session)` - Session loaded and validated
    /// - `Err(TelemetryError::SessionUnavailable { .. })` - The source has no data for `key`
    /// - `Err(e)` - Reading or parsing failed
    async fn load_session(&self, key: &SessionKey) -> Result<SessionData>;

    /// Short name used in logs
    fn name(&self) -> &str;
}
