use crate::error::{QuadtreeError, QuadtreeResult};

/// Node capacity before a split, and the depth at which splitting stops.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    pub node_capacity: usize,
    /// Nodes at this depth never split; they take any number of points.
    pub max_depth: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            node_capacity: 4,
            max_depth: 8,
        }
    }
}

pub(crate) fn validate_config(config: &Config) -> QuadtreeResult<()> {
    if config.node_capacity == 0 {
        return Err(QuadtreeError::InvalidConfig {
            node_capacity: config.node_capacity,
        });
    }
    Ok(())
}
