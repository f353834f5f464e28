// 🐬 Track model - timestamped observations grouped per entity

use crate::geometry::Point;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// OBSERVATION
// ============================================================================

/// One sighting: entity id, timestamp, position.
///
/// Observations are created in bulk when a dataset is loaded (or
/// synthesized) and never mutated afterwards. Ordering is significant
/// only by timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub entity_id: String,
    pub timestamp: DateTime<Utc>,
    pub position: Point,
}

impl Observation {
    pub fn new(entity_id: impl Into<String>, timestamp: DateTime<Utc>, position: Point) -> Self {
        Observation {
            entity_id: entity_id.into(),
            timestamp,
            position,
        }
    }
}

// ============================================================================
// TRACK
// ============================================================================

/// Ordered observations for a single entity.
///
/// Invariant: timestamps are non-decreasing. Duplicate timestamps are
/// allowed and kept in input order (stable sort at construction);
/// input rows are not required to arrive pre-sorted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    entity_id: String,
    observations: Vec<Observation>,
}

impl Track {
    pub fn new(entity_id: impl Into<String>, mut observations: Vec<Observation>) -> Self {
        observations.sort_by_key(|o| o.timestamp);
        Track {
            entity_id: entity_id.into(),
            observations,
        }
    }

    pub fn entity_id(&self) -> &str {
        &self.entity_id
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn first_timestamp(&self) -> Option<DateTime<Utc>> {
        self.observations.first().map(|o| o.timestamp)
    }

    pub fn last_timestamp(&self) -> Option<DateTime<Utc>> {
        self.observations.last().map(|o| o.timestamp)
    }

    /// Prefix of the track up to `cutoff`, inclusive.
    ///
    /// Simulated playback advances a cutoff and re-reads this prefix;
    /// the track itself holds no playback state.
    pub fn as_of(&self, cutoff: DateTime<Utc>) -> &[Observation] {
        let end = self.observations.partition_point(|o| o.timestamp <= cutoff);
        &self.observations[..end]
    }
}

// ============================================================================
// TRACK SET
// ============================================================================

/// All tracks for a dataset, keyed by entity id.
#[derive(Debug, Clone, Default)]
pub struct TrackSet {
    tracks: BTreeMap<String, Track>,
}

impl TrackSet {
    /// Group a flat observation list into per-entity tracks.
    pub fn from_observations(observations: Vec<Observation>) -> Self {
        let mut grouped: BTreeMap<String, Vec<Observation>> = BTreeMap::new();
        for obs in observations {
            grouped.entry(obs.entity_id.clone()).or_default().push(obs);
        }

        let tracks = grouped
            .into_iter()
            .map(|(id, obs)| (id.clone(), Track::new(id, obs)))
            .collect();

        TrackSet { tracks }
    }

    pub fn get(&self, entity_id: &str) -> Option<&Track> {
        self.tracks.get(entity_id)
    }

    pub fn tracks(&self) -> impl Iterator<Item = &Track> {
        self.tracks.values()
    }

    pub fn entity_count(&self) -> usize {
        self.tracks.len()
    }

    pub fn observation_count(&self) -> usize {
        self.tracks.values().map(Track::len).sum()
    }

    /// Earliest and latest timestamp across all tracks.
    pub fn time_range(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let first = self.tracks.values().filter_map(Track::first_timestamp).min()?;
        let last = self.tracks.values().filter_map(Track::last_timestamp).max()?;
        Some((first, last))
    }
}

// ============================================================================
// TESTS
// ============================================================================
