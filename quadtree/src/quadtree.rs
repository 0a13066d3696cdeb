mod config;
mod insert;
mod nearest;
mod query;
mod types;

pub use config::Config;
pub use types::QuadtreePoint;

use crate::error::QuadtreeResult;
use common::shapes::Rectangle;
use config::validate_config;
use types::{validate_bounds, Node};

/// Region quadtree over 2D points.
///
/// Nodes live in a flat arena with the root at index 0. A leaf holds up to
/// `node_capacity` points; the next insert splits it into four quadrants and
/// pushes its points down. Leaves at `max_depth` never split. A point sits in
/// exactly one node, normally a leaf; if float rounding leaves it outside
/// every quadrant it stays in the parent.
pub struct QuadTree {
    nodes: Vec<Node>,
    config: Config,
    len: usize,
}

impl QuadTree {
    pub fn new(bounds: Rectangle) -> QuadtreeResult<Self> {
        Self::with_config(bounds, Config::default())
    }

    pub fn with_config(bounds: Rectangle, config: Config) -> QuadtreeResult<Self> {
        validate_bounds(&bounds)?;
        validate_config(&config)?;
        Ok(Self {
            nodes: vec![Node::new_leaf(bounds, 0, config.node_capacity)],
            config,
            len: 0,
        })
    }

    pub fn bounds(&self) -> Rectangle {
        self.nodes[0].bounds
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Counts stored points by walking every node. Always equal to
    /// [`QuadTree::len`].
    pub fn size(&self) -> usize {
        self.nodes.iter().map(|node| node.points.len()).sum()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the root has been split.
    pub fn is_subdivided(&self) -> bool {
        !self.nodes[0].is_leaf()
    }

    /// Drops every point and child, leaving a single empty root.
    pub fn clear(&mut self) {
        self.nodes.truncate(1);
        let root = &mut self.nodes[0];
        root.points.clear();
        root.children = [0; 4];
        self.len = 0;
    }

    /// All stored points in arena order.
    pub fn points(&self) -> impl Iterator<Item = &QuadtreePoint> + '_ {
        self.nodes.iter().flat_map(|node| node.points.iter())
    }

    pub fn node_bounds(&self) -> Vec<Rectangle> {
        self.nodes.iter().map(|node| node.bounds).collect()
    }
}
