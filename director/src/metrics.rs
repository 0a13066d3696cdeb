use std::time::Duration;

/// Timings of the most recent operations of each kind.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DirectorMetrics {
    pub last_rebuild: Duration,
    pub last_sort: Duration,
    pub last_search: Duration,
    /// Spatial queries answered since construction.
    pub total_queries: u64,
}
