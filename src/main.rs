use anyhow::{anyhow, bail, Result};
use chrono::{DateTime, Utc};
use std::env;

use echogis::{
    classify_track_as_of, load_csv, mockdata, summarize, write_csv, Classification, Geofence,
    MockConfig, Observation, TrackSet,
};

const DEFAULT_CSV: &str = "echogis_mock_dolphins.csv";

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    match args.get(1).map(String::as_str) {
        Some("generate") => run_generate(&args[2..]),
        Some("report") => run_report(&args[2..]),
        _ => {
            print_usage();
            Ok(())
        }
    }
}

fn print_usage() {
    println!("🐬 EchoGIS - Geofence Track Classifier");
    println!();
    println!("Usage:");
    println!("  echogis generate [path]                      Write the mock dolphin CSV");
    println!("  echogis report [csv] [--until TIMESTAMP]");
    println!("                       [--geofence FILE]       Classify positions and summarize");
    println!();
    println!("The report cutoff defaults to the latest timestamp in the dataset;");
    println!("the geofence defaults to the built-in river danger zone.");
}

fn run_generate(args: &[String]) -> Result<()> {
    let path = args.first().map(String::as_str).unwrap_or(DEFAULT_CSV);

    println!("🧪 Generating mock dolphin tracks");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let config = MockConfig::default();
    let observations = mockdata::generate(&config);
    write_csv(path, &observations)?;

    println!(
        "✓ Wrote {} observations ({} dolphins × {} steps) to {}",
        observations.len(),
        config.dolphins,
        config.steps,
        path
    );

    Ok(())
}

fn run_report(args: &[String]) -> Result<()> {
    let (csv_path, cutoff_arg, geofence_path) = parse_report_args(args)?;

    println!("🐬 EchoGIS Geofence Report");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    // 1. Load observations
    println!("\n📂 Loading observations...");
    let observations = load_csv(&csv_path)?;
    println!("✓ Loaded {} observations from {}", observations.len(), csv_path);

    let tracks = TrackSet::from_observations(observations.clone());
    println!("✓ {} tracked dolphin(s)", tracks.entity_count());

    // 2. Resolve geofence and cutoff
    let geofence = match &geofence_path {
        Some(path) => Geofence::from_file(path)?,
        None => Geofence::default_danger_zone(),
    };
    println!(
        "✓ Geofence '{}' with {} vertices",
        geofence.name,
        geofence.polygon().vertex_count()
    );

    let cutoff = match cutoff_arg {
        Some(raw) => parse_cutoff(&raw)?,
        None => match tracks.time_range() {
            Some((_, latest)) => latest,
            None => bail!("Dataset is empty; nothing to classify"),
        },
    };

    // 3. Classify up to the cutoff
    println!(
        "\n🛰️  Classifying positions as of {}...",
        cutoff.format("%Y-%m-%d %H:%M:%S")
    );
    let classified = classify_track_as_of(&observations, geofence.polygon(), cutoff)?;
    let summary = summarize(&classified);

    println!("✓ Classified {} position(s)", summary.total());
    println!("   Safe (outside zone):   {}", summary.outside);
    println!("   Danger (inside zone):  {}", summary.inside);

    if summary.has_alert() {
        println!(
            "\n⚠️  ALERT: {} dolphin position(s) in danger zone!",
            summary.inside
        );
    } else {
        println!("\n✅ No dolphins in the danger zone.");
    }

    // 4. Most recent positions
    print_recent_positions(&classified, 10);

    Ok(())
}

fn parse_report_args(args: &[String]) -> Result<(String, Option<String>, Option<String>)> {
    let mut csv_path = DEFAULT_CSV.to_string();
    let mut cutoff = None;
    let mut geofence = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--until" => {
                cutoff = Some(
                    iter.next()
                        .ok_or_else(|| anyhow!("--until requires a timestamp"))?
                        .clone(),
                );
            }
            "--geofence" => {
                geofence = Some(
                    iter.next()
                        .ok_or_else(|| anyhow!("--geofence requires a file path"))?
                        .clone(),
                );
            }
            other if other.starts_with("--") => bail!("Unknown flag: {}", other),
            other => csv_path = other.to_string(),
        }
    }

    Ok((csv_path, cutoff, geofence))
}

fn parse_cutoff(raw: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    let naive = chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .map_err(|_| anyhow!("Unparseable cutoff timestamp: {}", raw))?;
    Ok(naive.and_utc())
}

fn print_recent_positions(classified: &[(Observation, Classification)], limit: usize) {
    if classified.is_empty() {
        return;
    }

    println!("\n📊 Most recent positions:");
    println!(
        "   {:<8} {:<20} {:>10} {:>10}  status",
        "dolphin", "timestamp", "lat", "lon"
    );

    let mut recent: Vec<_> = classified.iter().collect();
    recent.sort_by(|a, b| b.0.timestamp.cmp(&a.0.timestamp));

    for (obs, classification) in recent.into_iter().take(limit) {
        println!(
            "   {:<8} {:<20} {:>10.5} {:>10.5}  {}",
            obs.entity_id,
            obs.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            obs.position.lat,
            obs.position.lon,
            classification.label()
        );
    }
}
