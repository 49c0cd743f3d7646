//! Nearest-station ranking.
//!
//! Computes distance-augmented station records sorted by proximity to a
//! reference point, feeding the "closest stations" panel. Ranking is a pure
//! function; the host re-runs it whenever the station set or the reference
//! point changes.

mod rank;

pub use rank::{DEFAULT_LIMIT, RankedStation, Ranking, SkippedStation, rank};
