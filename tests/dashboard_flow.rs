//! End-to-end dashboard flow over the session dumps in `test-data/`.

use std::path::PathBuf;

use pitlane::dashboard::{Highlight, LapChoice, Selection};
use pitlane::{Dashboard, DashboardConfig, SessionKind, TelemetryError};

fn dashboard() -> Dashboard {
    let config = DashboardConfig {
        data_root: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("test-data").join("sessions"),
        latest_season: Some(2024),
        cache_capacity: 2,
        ..Default::default()
    };
    Dashboard::from_config(config)
}

fn qualifying(drivers: &[&str], lap: LapChoice) -> Selection {
    Selection {
        year: 2024,
        circuit: "Monaco".into(),
        kind: SessionKind::Qualifying,
        drivers: drivers.iter().map(|d| d.to_string()).collect(),
        lap,
    }
}

#[tokio::test]
async fn weekend_to_lap_charts() {
    let dashboard = dashboard();

    let status = dashboard.load_weekend("Monaco", 2024).await.unwrap();
    assert!(status.qualifying.loaded, "{}", status.summary());
    assert!(status.race.loaded, "{}", status.summary());

    let key = dashboard.session_key(2024, "Monaco", SessionKind::Qualifying).unwrap();
    let defaults = dashboard.default_selection(&key).await.unwrap();
    assert_eq!(defaults, vec!["LEC", "PIA", "SAI"]);

    let charts = dashboard.lap_charts(&qualifying(&["LEC", "SAI"], LapChoice::Fastest)).await.unwrap();
    assert!(charts.failures.is_empty(), "{:?}", charts.failures);
    assert_eq!(charts.drivers.len(), 2);

    let leclerc = &charts.drivers[0];
    assert_eq!(leclerc.lap_number, 3);
    assert_eq!(leclerc.kpis.sample_count, 12);
    assert!((leclerc.kpis.efficiency_score - 50.0).abs() < 1e-9);
    // Throttle readings above 100 are clamped
    assert!(leclerc.throttle.iter().all(|p| p.y <= 100.0));

    let coast: Vec<_> =
        leclerc.regions.iter().filter(|r| r.highlight == Highlight::CoastLift).collect();
    assert_eq!(coast.len(), 1);
    assert_eq!((coast[0].start_distance, coast[0].end_distance), (40.0, 120.0));

    let traction: Vec<_> =
        leclerc.regions.iter().filter(|r| r.highlight == Highlight::TractionLoss).collect();
    assert_eq!(traction.len(), 1);
    assert_eq!((traction[0].start_distance, traction[0].end_distance), (200.0, 280.0));

    assert_eq!(charts.corners.last().unwrap().label, "T10a");
    dashboard.shutdown().await;
}

#[tokio::test]
async fn race_views() {
    let dashboard = dashboard();
    let key = dashboard.session_key(2024, "monaco", SessionKind::Race).unwrap();

    let strategy = dashboard.tyre_strategy(&key).await.unwrap();
    let piastri = strategy.rows.iter().find(|r| r.driver == "PIA").unwrap();
    let compounds: Vec<_> = piastri.stints.iter().map(|s| s.compound.as_str()).collect();
    assert_eq!(compounds, vec!["MEDIUM", "HARD"]);
    assert_eq!((piastri.stints[1].start_lap, piastri.stints[1].end_lap), (3, 5));

    let pace = dashboard.team_pace(&key).await.unwrap();
    let teams: Vec<_> = pace.teams.iter().map(|t| t.pace.team.as_str()).collect();
    assert_eq!(teams, vec!["McLaren", "Ferrari", "Red Bull Racing"]);
    assert_eq!(pace.teams[0].color, "#FF8000");

    // Opening laps and pit laps are outside the quick-lap window
    let distribution = dashboard.lap_time_distribution(&key, &["LEC".into()]).await.unwrap();
    let laps: Vec<u32> = distribution.drivers[0].laps.iter().map(|l| l.lap_number).collect();
    assert_eq!(laps, vec![2, 3, 5]);

    let positions = dashboard.position_changes(&key).await.unwrap();
    let leclerc = positions.drivers.iter().find(|d| d.driver == "LEC").unwrap();
    assert_eq!(leclerc.points.iter().map(|p| p.y).collect::<Vec<_>>(), vec![1.0, 1.0, 1.0, 2.0, 1.0]);
}

#[tokio::test]
async fn unavailable_sessions_and_bad_requests() {
    let dashboard = dashboard();

    let status = dashboard.load_weekend("Silverstone", 2024).await.unwrap();
    assert!(!status.any_loaded());

    assert!(matches!(
        dashboard.session_key(2025, "Monaco", SessionKind::Race),
        Err(TelemetryError::UnsupportedSeason { .. })
    ));

    let key = dashboard.session_key(2024, "Monaco", SessionKind::Qualifying).unwrap();
    assert!(matches!(
        dashboard.lap_chart(&key, "LEC", LapChoice::Number(7)).await,
        Err(TelemetryError::LapNotFound { lap: 7, .. })
    ));
    assert!(matches!(
        dashboard.lap_chart(&key, "NOR", LapChoice::Fastest).await,
        Err(TelemetryError::TelemetryMissing { .. })
    ));
}
