// 🧪 Mock track generator
// Synthesizes the simulated dolphin GPS dataset used as input

use crate::geometry::Point;
use crate::track::Observation;
use chrono::{DateTime, Duration, TimeZone, Utc};

// River reach covered by the simulated swim, south-west to north-east.
const LAT_START: f64 = 25.250;
const LAT_END: f64 = 25.330;
const LON_START: f64 = 86.980;
const LON_END: f64 = 87.050;

// Per-dolphin lane separation so the tracks do not overlap exactly.
const LANE_LAT_SPACING: f64 = 0.0025;
const LANE_LON_SPACING: f64 = -0.002;

// Positional jitter amplitude in degrees.
const JITTER: f64 = 0.0005;

/// Generation parameters. Defaults match the reference dataset:
/// 3 dolphins, 60 one-minute steps from 2025-09-05 06:00 UTC.
#[derive(Debug, Clone)]
pub struct MockConfig {
    pub dolphins: usize,
    pub steps: usize,
    pub start: DateTime<Utc>,
    pub seed: u64,
}

impl Default for MockConfig {
    fn default() -> Self {
        MockConfig {
            dolphins: 3,
            steps: 60,
            start: Utc.with_ymd_and_hms(2025, 9, 5, 6, 0, 0).unwrap(),
            seed: 0x5EED_D01F,
        }
    }
}

/// Minimal LCG so generated fixtures are reproducible across runs.
/// Constants from Knuth's MMIX line.
struct Lcg(u64);

impl Lcg {
    fn next_f64(&mut self) -> f64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform in [-1, 1).
    fn jitter(&mut self) -> f64 {
        self.next_f64() * 2.0 - 1.0
    }
}

/// Synthesize a mock track set as a flat observation list.
///
/// Each dolphin swims the same linear lat/lon ramp one minute per step,
/// offset into its own lane, with small positional jitter on top.
pub fn generate(config: &MockConfig) -> Vec<Observation> {
    let mut rng = Lcg(config.seed);
    let mut observations = Vec::with_capacity(config.dolphins * config.steps);
    let last_step = config.steps.saturating_sub(1).max(1) as f64;

    for d in 1..=config.dolphins {
        let lane = d as f64 - 2.0;
        let lat_offset = lane * LANE_LAT_SPACING;
        let lon_offset = lane * LANE_LON_SPACING;

        for i in 0..config.steps {
            let frac = i as f64 / last_step;
            let lat = LAT_START + frac * (LAT_END - LAT_START) + lat_offset + rng.jitter() * JITTER;
            let lon = LON_START + frac * (LON_END - LON_START) + lon_offset + rng.jitter() * JITTER;

            observations.push(Observation::new(
                format!("D{:02}", d),
                config.start + Duration::minutes(i as i64),
                Point::new(lon, lat),
            ));
        }
    }

    observations
}

// ============================================================================
// TESTS
// ============================================================================
