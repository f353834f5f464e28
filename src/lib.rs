// EchoGIS Core - Geofence Track Classifier
// Exposes all modules for use in the CLI and tests

pub mod classifier;
pub mod geofence;
pub mod geometry;
pub mod loader;
pub mod mockdata;
pub mod track;

// Re-export commonly used types
pub use classifier::{classify, classify_track_as_of, summarize, Classification, Summary};
pub use geofence::Geofence;
pub use geometry::{GeofenceError, Point, Polygon};
pub use loader::{load_csv, write_csv};
pub use mockdata::MockConfig;
pub use track::{Observation, Track, TrackSet};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
