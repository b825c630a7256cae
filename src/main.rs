use anyhow::{Context, Result};
use clap::Parser;

use glucose_trend::analysis::summary::DashboardSummary;
use glucose_trend::data::{load_checkpoints_file, load_readings_file};
use glucose_trend::utils::TimeUtils;
use glucose_trend::{Cli, Metric};

fn main() -> Result<()> {
    // A. Init Logging
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    // B. Parse Args
    let args = Cli::parse();
    #[cfg(debug_assertions)]
    log::debug!("Parsed arguments: {:?}", args);

    let settings = args.settings();
    let mode = args.ingest_mode();

    // C. Data Loading
    let glucose = load_readings_file(&args.readings, Metric::Glucose, mode)?;
    if !glucose.skipped.is_empty() {
        log::warn!("{} malformed rows were skipped", glucose.skipped.len());
    }
    let checkpoints = args
        .weights
        .as_deref()
        .map(|path| load_checkpoints_file(path, mode))
        .transpose()?;

    // D. Analysis
    let summary = DashboardSummary::build(&glucose.series, checkpoints.as_deref(), &settings)
        .context("Failed to build dashboard summary")?;

    // E. Output
    if args.json {
        let json = serde_json::to_string_pretty(&summary).context("Failed to serialize summary")?;
        println!("{}", json);
    } else {
        print_summary(&summary);
    }
    Ok(())
}

fn print_summary(summary: &DashboardSummary) {
    let unit = Metric::Glucose.unit();
    let params = &summary.parameters;

    println!(
        "Latest reading: {:.1} {} on {} ({} readings)",
        summary.latest.value,
        unit,
        TimeUtils::format_date(summary.latest.date),
        summary.readings
    );
    for kpi in &summary.kpis {
        match kpi.mean {
            Some(mean) => println!("Mean last {}d: {:.1} {}", kpi.window, mean, unit),
            None => println!("Mean last {}d: n/a", kpi.window),
        }
    }
    println!(
        "Asymptotic target: {:.0} {} ({:+.0} pts)",
        params.asymptote(),
        unit,
        -summary.distance_to_target
    );

    let stats = &summary.stats;
    println!(
        "Range: {:.0}..{:.0}, mean {:.1}, std dev {}",
        stats.min,
        stats.max,
        stats.mean,
        stats
            .std_dev
            .map(|sd| format!("{:.1}", sd))
            .unwrap_or_else(|| "n/a".to_string())
    );
    println!(
        "In safe zone {:.0}..{:.0}: {} of {} ({:.0}%)",
        summary.safe_zone.low,
        summary.safe_zone.high,
        summary.safe_zone.inside,
        summary.readings,
        summary.safe_zone.inside_pct
    );

    for curve in &summary.rolling {
        let current = curve.points.last().and_then(|p| p.mean);
        match current {
            Some(mean) => println!("Rolling {}d: {:.1}", curve.window, mean),
            None => println!("Rolling {}d: insufficient data", curve.window),
        }
    }

    println!(
        "Projection (k = {}, {} days):",
        params.decay_constant(),
        params.horizon_days()
    );
    for point in &summary.projection {
        println!("  {}  {:.1}", TimeUtils::format_date(point.date), point.value);
    }
    for milestone in &summary.milestones {
        println!("Reaches {:.0}: {}", milestone.threshold, milestone.eta);
    }

    if let Some(weight) = &summary.weight {
        println!(
            "Weight: {:.1} {} on {}, BMI {:.1} ({})",
            weight.latest.value,
            Metric::Weight.unit(),
            TimeUtils::format_date(weight.latest.date),
            weight.bmi.value,
            weight.bmi.category
        );
    }
}
