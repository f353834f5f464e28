// 📂 CSV observation loader
// Reads and writes the dolphin_id,timestamp,latitude,longitude contract

use crate::geometry::Point;
use crate::track::Observation;
use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One CSV row of the input contract.
///
/// Timestamps stay as strings here; parsing happens when the row is
/// turned into an `Observation`, so a bad row reports its own text.
#[derive(Debug, Deserialize, Serialize)]
struct ObservationRow {
    dolphin_id: String,
    timestamp: String,
    latitude: f64,
    longitude: f64,
}

/// Parse an ISO-8601-like timestamp.
///
/// Accepts RFC 3339 with an offset, or a naive date-time (the mock
/// generator's `isoformat()` output) interpreted as UTC.
fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .with_context(|| format!("Unparseable timestamp: {}", raw))?;
    Ok(naive.and_utc())
}

/// Load observations from a CSV file.
///
/// Rows are returned in file order; track construction sorts them by
/// timestamp later. Malformed rows fail the whole load.
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Vec<Observation>> {
    let mut rdr = csv::Reader::from_path(path.as_ref())
        .with_context(|| format!("Failed to open CSV file: {:?}", path.as_ref()))?;

    let mut observations = Vec::new();

    for result in rdr.deserialize() {
        let row: ObservationRow = result.context("Failed to deserialize observation row")?;
        let timestamp = parse_timestamp(&row.timestamp)?;

        observations.push(Observation::new(
            row.dolphin_id,
            timestamp,
            Point::new(row.longitude, row.latitude),
        ));
    }

    Ok(observations)
}

/// Write observations to a CSV file in the input contract's format.
pub fn write_csv<P: AsRef<Path>>(path: P, observations: &[Observation]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path.as_ref())
        .with_context(|| format!("Failed to create CSV file: {:?}", path.as_ref()))?;

    for obs in observations {
        wtr.serialize(ObservationRow {
            dolphin_id: obs.entity_id.clone(),
            timestamp: obs.timestamp.format("%Y-%m-%dT%H:%M:%S").to_string(),
            latitude: obs.position.lat,
            longitude: obs.position.lon,
        })
        .context("Failed to write observation row")?;
    }

    wtr.flush().context("Failed to flush CSV file")?;
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_naive_timestamp_as_utc() {
        let dt = parse_timestamp("2025-09-05T06:00:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2025, 9, 5, 6, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_rfc3339_timestamp() {
        let dt = parse_timestamp("2025-09-05T06:00:00+05:30").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2025, 9, 5, 0, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_fractional_seconds() {
        let dt = parse_timestamp("2025-09-05T06:00:00.500000").unwrap();
        assert_eq!(dt.timestamp_subsec_millis(), 500);
    }

    #[test]
    fn test_parse_garbage_timestamp_fails() {
        assert!(parse_timestamp("yesterday at noon").is_err());
    }

    #[test]
    fn test_load_csv_round_trip() {
        let path = std::env::temp_dir().join("echogis_test_loader.csv");
        let observations = vec![
            Observation::new(
                "D01",
                Utc.with_ymd_and_hms(2025, 9, 5, 6, 0, 0).unwrap(),
                Point::new(86.980, 25.250),
            ),
            Observation::new(
                "D02",
                Utc.with_ymd_and_hms(2025, 9, 5, 6, 1, 0).unwrap(),
                Point::new(87.051, 25.331),
            ),
        ];

        write_csv(&path, &observations).unwrap();
        let loaded = load_csv(&path).unwrap();

        assert_eq!(loaded, observations);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_csv_missing_file_is_an_error() {
        let missing = std::env::temp_dir().join("echogis_no_such_data.csv");
        assert!(load_csv(&missing).is_err());
    }

    #[test]
    fn test_load_csv_malformed_row_is_an_error() {
        let path = std::env::temp_dir().join("echogis_test_malformed.csv");
        std::fs::write(
            &path,
            "dolphin_id,timestamp,latitude,longitude\nD01,2025-09-05T06:00:00,not-a-number,87.0\n",
        )
        .unwrap();

        assert!(load_csv(&path).is_err());

        std::fs::remove_file(&path).ok();
    }
}
