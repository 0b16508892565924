//! Print the KPIs and flagged stretches of one lap.
//!
//! ```text
//! lap-report <data-root> <year> <circuit> <Q|R> <driver> [lap]
//! ```
//!
//! Without a lap number the driver's fastest lap is used. Log output is
//! controlled with `RUST_LOG`.

use anyhow::{Context, bail};
use tracing_subscriber::EnvFilter;

use pitlane::dashboard::Highlight;
use pitlane::{Dashboard, DashboardConfig, LapChoice, SessionKind};

const USAGE: &str = "usage: lap-report <data-root> <year> <circuit> <Q|R> <driver> [lap]";

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 5 || args.len() > 6 {
        bail!(USAGE);
    }

    let year: u16 = args[1].parse().with_context(|| format!("invalid year '{}'", args[1]))?;
    let kind: SessionKind = args[3].parse()?;
    let lap = match args.get(5) {
        Some(lap) => LapChoice::Number(lap.parse().with_context(|| format!("invalid lap '{lap}'"))?),
        None => LapChoice::Fastest,
    };

    let config = DashboardConfig { data_root: args[0].clone().into(), ..Default::default() };
    let dashboard = Dashboard::from_config(config);

    let key = dashboard.session_key(year, &args[2], kind)?;
    let chart = dashboard
        .lap_chart(&key, &args[4], lap)
        .await
        .with_context(|| format!("cannot chart {} in {key}", args[4]))?;

    println!("{key}: {} lap {}", chart.driver, chart.lap_number);
    match chart.lap_time {
        Some(time) => println!("  lap time      {}", format_lap_time(time)),
        None => println!("  lap time      -"),
    }
    println!("  compound      {}", chart.compound);
    println!("  samples       {}", chart.kpis.sample_count);
    println!("  full throttle {:>6.1}%", chart.kpis.efficiency_score);
    println!("  coast/lift    {:>6.1}%", chart.kpis.coast_lift_pct);
    println!("  traction loss {:>6.1}%", chart.kpis.traction_loss_pct);

    if !chart.regions.is_empty() {
        println!();
        for region in &chart.regions {
            let label = match region.highlight {
                Highlight::CoastLift => "coast/lift",
                Highlight::TractionLoss => "traction loss",
            };
            println!(
                "  {:>7.0} m - {:>7.0} m  {label}",
                region.start_distance, region.end_distance
            );
        }
    }

    dashboard.shutdown().await;
    Ok(())
}

fn format_lap_time(seconds: f64) -> String {
    let minutes = (seconds / 60.0).floor();
    format!("{}:{:06.3}", minutes as u64, seconds - minutes * 60.0)
}
