//! Live dashboard: re-render lap charts whenever the selection changes

use futures::{Stream, StreamExt};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::Dashboard;
use super::charts::LapChartSet;
use super::selection::Selection;
use crate::stream::ThrottleExt;

/// Result of rendering one selection.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderOutcome {
    /// Charts for the selection
    Rendered { selection: Selection, charts: LapChartSet },
    /// The selection could not be rendered at all
    Failed { selection: Selection, message: String },
}

impl RenderOutcome {
    /// Selection this outcome was rendered for.
    pub fn selection(&self) -> &Selection {
        match self {
            RenderOutcome::Rendered { selection, .. } | RenderOutcome::Failed { selection, .. } => {
                selection
            }
        }
    }

    /// Charts, when rendering succeeded.
    pub fn charts(&self) -> Option<&LapChartSet> {
        match self {
            RenderOutcome::Rendered { charts, .. } => Some(charts),
            RenderOutcome::Failed { .. } => None,
        }
    }
}

/// Handle to a background task rendering the latest selection.
///
/// Selections sent while a render is running replace each other; only the
/// newest is rendered next. Dropping the handle stops the task.
pub struct LiveDashboard {
    selection: watch::Sender<Option<Selection>>,
    outcomes: watch::Receiver<Option<Arc<RenderOutcome>>>,
    interval: std::time::Duration,
    cancel: CancellationToken,
}

impl Dashboard {
    /// Start rendering selections in the background, beginning with `initial`.
    pub fn watch(&self, initial: Option<Selection>) -> LiveDashboard {
        let (selection_tx, mut selection_rx) = watch::channel(initial);
        let (outcome_tx, outcome_rx) = watch::channel(None);
        let cancel = CancellationToken::new();

        // Render the initial selection without waiting for a change
        selection_rx.mark_changed();

        let dashboard = self.clone();
        let token = cancel.clone();
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    changed = selection_rx.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        let latest = selection_rx.borrow_and_update().clone();
                        let Some(selection) = latest else {
                            continue;
                        };

                        let started = Instant::now();
                        let outcome = tokio::select! {
                            _ = token.cancelled() => break,
                            result = dashboard.lap_charts(&selection) => match result {
                                Ok(charts) => RenderOutcome::Rendered { selection, charts },
                                Err(e) => {
                                    warn!(error = %e, "Failed to render selection");
                                    RenderOutcome::Failed { selection, message: e.to_string() }
                                }
                            },
                        };
                        debug!(elapsed_ms = started.elapsed().as_millis() as u64, "Selection rendered");

                        if outcome_tx.send(Some(Arc::new(outcome))).is_err() {
                            break;
                        }
                    }
                }
            }
            debug!("Live dashboard task stopped");
        });

        LiveDashboard {
            selection: selection_tx,
            outcomes: outcome_rx,
            interval: self.config().render_interval(),
            cancel,
        }
    }
}

impl LiveDashboard {
    /// Replace the selection; the task renders it once the current render ends.
    pub fn select(&self, selection: Selection) {
        self.selection.send_replace(Some(selection));
    }

    /// Render outcomes, at most one per configured render interval.
    ///
    /// Yields the latest outcome first if one exists. Ends when the task stops.
    pub fn renders(&self) -> impl Stream<Item = Arc<RenderOutcome>> + Send + 'static {
        WatchStream::new(self.outcomes.clone())
            .filter_map(|outcome| async move { outcome })
            .throttle(self.interval)
    }

    /// Most recent outcome, if anything was rendered yet.
    pub fn current(&self) -> Option<Arc<RenderOutcome>> {
        self.outcomes.borrow().clone()
    }

    /// Whether the background task is still running.
    pub fn is_running(&self) -> bool {
        !self.cancel.is_cancelled() && !self.selection.is_closed()
    }

    /// Stop the background task.
    pub fn stop(&self) {
        self.cancel.cancel();
    }
}

impl Drop for LiveDashboard {
    fn drop(&mut self) {
        debug!("Dropping live dashboard");
        self.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::SessionCache;
    use crate::config::DashboardConfig;
    use crate::dashboard::LapChoice;
    use crate::providers::MemorySource;
    use crate::test_utils;
    use crate::types::SessionKind;
    use std::time::Duration;

    fn dashboard() -> Dashboard {
        let source = MemorySource::new().with_session(
            test_utils::session_key(SessionKind::Qualifying),
            test_utils::qualifying_session(),
        );
        let config = DashboardConfig {
            latest_season: Some(2024),
            render_interval_ms: 50,
            ..Default::default()
        };
        Dashboard::new(Arc::new(source), Arc::new(SessionCache::new(2)), config)
    }

    fn selection(drivers: &[&str]) -> Selection {
        Selection {
            year: 2024,
            circuit: "Monaco".into(),
            kind: SessionKind::Qualifying,
            drivers: drivers.iter().map(|d| d.to_string()).collect(),
            lap: LapChoice::Fastest,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn initial_selection_is_rendered() {
        let live = dashboard().watch(Some(selection(&["LEC"])));
        let mut renders = Box::pin(live.renders());

        let outcome = renders.next().await.unwrap();
        let charts = outcome.charts().expect("rendered");
        assert_eq!(charts.drivers[0].driver, "LEC");
        assert_eq!(live.current().as_deref(), Some(&*outcome));
    }

    #[tokio::test(start_paused = true)]
    async fn latest_selection_wins() {
        let live = dashboard().watch(None);
        let mut renders = Box::pin(live.renders());

        live.select(selection(&["PIA"]));
        live.select(selection(&["LEC", "PIA"]));
        live.select(selection(&["LEC"]));

        let last = selection(&["LEC"]);
        let outcome = tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                let outcome = renders.next().await.unwrap();
                if *outcome.selection() == last {
                    return outcome;
                }
            }
        })
        .await
        .unwrap();

        assert_eq!(outcome.charts().unwrap().drivers.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn invalid_selection_renders_failure() {
        let live = dashboard().watch(Some(selection(&[])));
        let mut renders = Box::pin(live.renders());

        match &*renders.next().await.unwrap() {
            RenderOutcome::Failed { message, .. } => assert!(message.contains("no drivers")),
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_handle_ends_renders() {
        let live = dashboard().watch(None);
        let renders = live.renders();
        assert!(live.is_running());
        drop(live);

        let rest: Vec<_> =
            tokio::time::timeout(Duration::from_secs(5), renders.collect()).await.unwrap();
        assert!(rest.is_empty());
    }
}
