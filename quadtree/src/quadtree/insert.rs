use super::types::{child_bounds, Node, QuadtreePoint};
use super::QuadTree;
use common::Vec2;

impl QuadTree {
    /// Stores `value` at `position`. Returns `false` if the position is not
    /// inside the root bounds (edges count as inside) or is not finite.
    pub fn insert(&mut self, position: Vec2, value: u32) -> bool {
        if !position.is_finite() || !self.nodes[0].bounds.contains_point(position.x, position.y) {
            return false;
        }
        let point = QuadtreePoint { position, value };

        let mut node_idx = 0;
        loop {
            let node = &self.nodes[node_idx];
            if node.is_leaf() {
                if node.points.len() < self.config.node_capacity
                    || node.depth >= self.config.max_depth
                {
                    self.nodes[node_idx].points.push(point);
                    self.len += 1;
                    return true;
                }
                self.subdivide(node_idx);
            }
            match self.child_containing(node_idx, position) {
                Some(child_idx) => node_idx = child_idx,
                None => {
                    self.nodes[node_idx].points.push(point);
                    self.len += 1;
                    return true;
                }
            }
        }
    }

    pub fn insert_point(&mut self, point: QuadtreePoint) -> bool {
        self.insert(point.position, point.value)
    }

    fn subdivide(&mut self, node_idx: usize) {
        let parent = &self.nodes[node_idx];
        let depth = parent.depth + 1;
        let quadrants = child_bounds(&parent.bounds);

        let first_child = self.nodes.len() as u32;
        for bounds in quadrants {
            self.nodes
                .push(Node::new_leaf(bounds, depth, self.config.node_capacity));
        }
        self.nodes[node_idx].children = [
            first_child,
            first_child + 1,
            first_child + 2,
            first_child + 3,
        ];

        // The parent was exactly full, so each quadrant receives at most
        // node_capacity points and stays a leaf.
        let points = std::mem::take(&mut self.nodes[node_idx].points);
        for point in points {
            match self.child_containing(node_idx, point.position) {
                Some(child_idx) => self.nodes[child_idx].points.push(point),
                None => self.nodes[node_idx].points.push(point),
            }
        }
    }

    /// First quadrant, in NW, NE, SW, SE order, whose bounds contain `position`.
    fn child_containing(&self, node_idx: usize, position: Vec2) -> Option<usize> {
        self.nodes[node_idx]
            .children
            .iter()
            .map(|&child| child as usize)
            .find(|&child| {
                self.nodes[child]
                    .bounds
                    .contains_point(position.x, position.y)
            })
    }
}
