// 🏷️ Geofence Track Classifier
// Pure containment classification over observations and track prefixes

use crate::geometry::{GeofenceError, Point, Polygon};
use crate::track::Observation;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// CLASSIFICATION
// ============================================================================

/// Containment verdict for a single observation.
///
/// Derived, never stored: recomputed on demand from point + polygon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Classification {
    Inside,
    Outside,
}

impl Classification {
    pub fn is_inside(&self) -> bool {
        matches!(self, Classification::Inside)
    }

    /// Display label used by the report frontend.
    pub fn label(&self) -> &'static str {
        match self {
            Classification::Inside => "Danger",
            Classification::Outside => "Safe",
        }
    }
}

/// Classify a single point against a geofence polygon.
///
/// Pure and deterministic for identical float inputs. The only failure
/// is `InvalidPolygon` for rings with fewer than 3 vertices.
pub fn classify(point: Point, polygon: &Polygon) -> Result<Classification, GeofenceError> {
    Ok(if polygon.contains(point)? {
        Classification::Inside
    } else {
        Classification::Outside
    })
}

/// Classify every observation with timestamp ≤ `cutoff`, in input order.
///
/// The cutoff is the caller's playback cursor; this function owns no
/// state between calls. The result has the same cardinality and order
/// as the filtered input, and is empty when nothing satisfies the
/// cutoff.
pub fn classify_track_as_of(
    observations: &[Observation],
    polygon: &Polygon,
    cutoff: DateTime<Utc>,
) -> Result<Vec<(Observation, Classification)>, GeofenceError> {
    let mut classified = Vec::new();
    for obs in observations.iter().filter(|o| o.timestamp <= cutoff) {
        classified.push((obs.clone(), classify(obs.position, polygon)?));
    }
    Ok(classified)
}

// ============================================================================
// SUMMARY
// ============================================================================

/// Per-label counts over a classified sequence.
///
/// Labels with no occurrences read as zero, never as absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Summary {
    pub inside: usize,
    pub outside: usize,
}

impl Summary {
    pub fn count(&self, classification: Classification) -> usize {
        match classification {
            Classification::Inside => self.inside,
            Classification::Outside => self.outside,
        }
    }

    pub fn total(&self) -> usize {
        self.inside + self.outside
    }

    /// True when any observation sits in the danger zone.
    pub fn has_alert(&self) -> bool {
        self.inside > 0
    }
}

/// Count classifications in a classified sequence.
pub fn summarize(classified: &[(Observation, Classification)]) -> Summary {
    let mut summary = Summary::default();
    for (_, classification) in classified {
        match classification {
            Classification::Inside => summary.inside += 1,
            Classification::Outside => summary.outside += 1,
        }
    }
    summary
}

// ============================================================================
// TESTS
// ============================================================================
