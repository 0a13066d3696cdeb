use crate::error::{DirectorError, DirectorResult};
use common::shapes::Rectangle;
use common::Vec2;
use quadtree::quadtree::Config;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectorConfig {
    pub arena_center: Vec2,
    pub arena_half_extent: Vec2,
    /// Initial bucket count of the id registry.
    pub registry_capacity: usize,
    /// Threat queue key is `distance / threat_distance_scale`.
    pub threat_distance_scale: f32,
    /// Ranking priority is `threat_ranking_numerator / (distance + 1)`.
    pub threat_ranking_numerator: f32,
    pub node_capacity: usize,
    pub max_depth: usize,
}

impl Default for DirectorConfig {
    fn default() -> Self {
        let quadtree = Config::default();
        DirectorConfig {
            arena_center: Vec2::ZERO,
            arena_half_extent: Vec2::new(5000.0, 5000.0),
            registry_capacity: 128,
            threat_distance_scale: 100.0,
            threat_ranking_numerator: 10_000.0,
            node_capacity: quadtree.node_capacity,
            max_depth: quadtree.max_depth,
        }
    }
}

impl DirectorConfig {
    pub fn arena_bounds(&self) -> Rectangle {
        Rectangle::from_center_half_extent(self.arena_center, self.arena_half_extent)
    }

    pub fn quadtree_config(&self) -> Config {
        Config {
            node_capacity: self.node_capacity,
            max_depth: self.max_depth,
        }
    }

    /// Arena bounds and node capacity are checked by the quadtree itself.
    pub(crate) fn validate(&self) -> DirectorResult<()> {
        if !(self.threat_distance_scale.is_finite() && self.threat_distance_scale > 0.0) {
            return Err(DirectorError::InvalidConfig(format!(
                "threat_distance_scale must be finite and positive, got {}",
                self.threat_distance_scale
            )));
        }
        if !(self.threat_ranking_numerator.is_finite() && self.threat_ranking_numerator > 0.0) {
            return Err(DirectorError::InvalidConfig(format!(
                "threat_ranking_numerator must be finite and positive, got {}",
                self.threat_ranking_numerator
            )));
        }
        Ok(())
    }
}
