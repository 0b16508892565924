//! File source for exported session dumps

use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::provider::TelemetrySource;
use crate::schema::SessionData;
use crate::types::SessionKey;
use crate::{Result, TelemetryError};

/// Extensions tried, in order, for a session file.
const EXTENSIONS: [&str; 3] = ["yaml", "yml", "json"];

/// Source that reads session dumps laid out as
/// `<root>/<year>/<circuit-slug>/<qualifying|race>.yaml`.
#[derive(Debug, Clone)]
pub struct FileSource {
    root: PathBuf,
}

impl FileSource {
    /// Create a source rooted at `root`.
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }

    /// Root directory of the dumps.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding the sessions of an event.
    pub fn event_dir(&self, key: &SessionKey) -> PathBuf {
        self.root.join(key.year.to_string()).join(key.circuit_slug())
    }

    /// First existing session file for `key`, if any.
    pub async fn session_path(&self, key: &SessionKey) -> Option<PathBuf> {
        let dir = self.event_dir(key);
        for ext in EXTENSIONS {
            let candidate = dir.join(format!("{}.{ext}", key.kind.slug()));
            if tokio::fs::try_exists(&candidate).await.unwrap_or(false) {
                return Some(candidate);
            }
        }
        None
    }
}

#[async_trait::async_trait]
impl TelemetrySource for FileSource {
    async fn load_session(&self, key: &SessionKey) -> Result<SessionData> {
        let path = self.session_path(key).await.ok_or_else(|| {
            TelemetryError::session_unavailable(
                key.to_string(),
                format!("no session file under {}", self.event_dir(key).display()),
            )
        })?;

        debug!(path = %path.display(), "Reading session file");
        let text = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| TelemetryError::file_error(path.clone(), e))?;

        let session = SessionData::parse(&text)?;
        if !session.matches(key) {
            return Err(TelemetryError::parse_error(
                format!("Session file {}", path.display()),
                format!(
                    "holds {} {} {} instead of {}",
                    session.year, session.event_name, session.session_name, key
                ),
            ));
        }

        info!(
            session = %key,
            drivers = session.drivers.len(),
            laps = session.laps.len(),
            "Loaded session from file"
        );
        Ok(session)
    }

    fn name(&self) -> &str {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils;
    use crate::types::SessionKind;

    fn key(kind: SessionKind) -> SessionKey {
        SessionKey::with_seasons(2024, "Monaco", kind, 2018, 2024).unwrap()
    }

    #[test]
    fn event_dir_uses_year_and_slug() {
        let source = FileSource::new("/data");
        let key = SessionKey::with_seasons(2023, "Las Vegas", SessionKind::Race, 2018, 2024)
            .unwrap();
        assert_eq!(source.event_dir(&key), PathBuf::from("/data/2023/las-vegas"));
    }

    #[tokio::test]
    async fn loads_fixture_sessions() {
        let source = FileSource::new(test_utils::sessions_root());

        let race = source.load_session(&key(SessionKind::Race)).await.unwrap();
        assert_eq!(race.kind().unwrap(), SessionKind::Race);
        assert!(!race.laps.is_empty());

        let quali = source.load_session(&key(SessionKind::Qualifying)).await.unwrap();
        assert!(quali.circuit_info.is_some());
    }

    #[tokio::test]
    async fn missing_event_is_unavailable() {
        let source = FileSource::new(test_utils::sessions_root());
        let key = SessionKey::with_seasons(2019, "Atlantis", SessionKind::Race, 2018, 2024)
            .unwrap();

        let err = source.load_session(&key).await.unwrap_err();
        assert!(matches!(err, TelemetryError::SessionUnavailable { .. }));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn dump_filed_under_another_circuit_is_rejected() {
        let root = std::env::temp_dir().join(format!("pitlane-misfiled-{}", std::process::id()));
        let dir = root.join("2024").join("imola");
        tokio::fs::create_dir_all(&dir).await.unwrap();
        let monaco = test_utils::sessions_root().join("2024/monaco/race.yaml");
        tokio::fs::copy(&monaco, dir.join("race.yaml")).await.unwrap();

        let source = FileSource::new(&root);
        let key = SessionKey::with_seasons(2024, "Imola", SessionKind::Race, 2018, 2024).unwrap();
        let err = source.load_session(&key).await.unwrap_err();

        tokio::fs::remove_dir_all(&root).await.unwrap();
        assert!(matches!(err, TelemetryError::Parse { .. }));
        assert!(err.to_string().contains("Monaco Grand Prix"));
        assert!(!err.is_retryable());
    }
}
