// 🗺️ Geofence configuration - named danger polygons
// Loads vertex rings from JSON; carries the built-in river danger zone

use crate::geometry::{Point, Polygon};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A named geofence: static for the lifetime of a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geofence {
    pub name: String,
    polygon: Polygon,
}

impl Geofence {
    pub fn new(name: impl Into<String>, polygon: Polygon) -> Self {
        Geofence {
            name: name.into(),
            polygon,
        }
    }

    /// Load a geofence from a JSON file holding an array of
    /// `[longitude, latitude]` pairs.
    ///
    /// Only the file format is handled here; the vertex-count
    /// precondition is enforced by the polygon test itself.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read geofence file: {:?}", path.as_ref()))?;

        let pairs: Vec<[f64; 2]> =
            serde_json::from_str(&content).context("Failed to parse geofence JSON")?;

        let vertices = pairs
            .into_iter()
            .map(|[lon, lat]| Point::new(lon, lat))
            .collect();

        let name = path
            .as_ref()
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "geofence".to_string());

        Ok(Geofence::new(name, Polygon::new(vertices)))
    }

    /// The high-risk river reach from the monitoring prototype.
    pub fn default_danger_zone() -> Self {
        Geofence::new(
            "danger-zone",
            Polygon::new(vec![
                Point::new(87.010, 25.285),
                Point::new(87.040, 25.285),
                Point::new(87.040, 25.305),
                Point::new(87.010, 25.305),
            ]),
        )
    }

    pub fn polygon(&self) -> &Polygon {
        &self.polygon
    }
}

// ============================================================================
// TESTS
// ============================================================================
