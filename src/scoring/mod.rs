pub mod normalizer;
pub mod snapshot;

pub use normalizer::{is_valid_score, net_score, normalize, RankedEntry};
pub use snapshot::{capture, find_baseline, SnapshotEntry};
