use super::types::QuadtreePoint;
use super::QuadTree;
use collections::PriorityQueue;
use common::Vec2;

impl QuadTree {
    /// Closest stored point to `position`.
    ///
    /// A positive `max_distance` is a hard cutoff: nothing farther is ever
    /// returned, even when the tree holds points just beyond it. Zero,
    /// negative or NaN means unlimited. Equal distances resolve to the
    /// smaller `value`.
    ///
    /// Nodes are visited best-first by the squared distance from `position`
    /// to their bounds, and the walk stops once that lower bound exceeds the
    /// best match found so far.
    pub fn nearest(&self, position: Vec2, max_distance: f32) -> Option<QuadtreePoint> {
        if !position.is_finite() || self.is_empty() {
            return None;
        }
        let limit_sq = if max_distance > 0.0 {
            max_distance * max_distance
        } else {
            f32::INFINITY
        };

        let mut best: Option<(QuadtreePoint, f32)> = None;
        let mut frontier = PriorityQueue::new();
        frontier.enqueue(0u32, self.lower_bound_sq(0, position));

        while let Some((node_idx, lower_bound)) = frontier.dequeue_with_priority() {
            if lower_bound > limit_sq {
                break;
            }
            if let Some((_, best_sq)) = best {
                if lower_bound > best_sq {
                    break;
                }
            }

            let node = &self.nodes[node_idx as usize];
            for point in &node.points {
                let distance_sq = point.position.distance_sq(position);
                if distance_sq > limit_sq {
                    continue;
                }
                let closer = match best {
                    None => true,
                    Some((current, best_sq)) => {
                        distance_sq < best_sq
                            || (distance_sq == best_sq && point.value < current.value)
                    }
                };
                if closer {
                    best = Some((*point, distance_sq));
                }
            }

            if !node.is_leaf() {
                for &child in &node.children {
                    let bound = self.lower_bound_sq(child as usize, position);
                    let worth_visiting =
                        bound <= limit_sq && best.map_or(true, |(_, best_sq)| bound <= best_sq);
                    if worth_visiting {
                        frontier.enqueue(child, bound);
                    }
                }
            }
        }

        best.map(|(point, _)| point)
    }

    fn lower_bound_sq(&self, node_idx: usize, position: Vec2) -> f32 {
        self.nodes[node_idx]
            .bounds
            .distance_to_point(position.x, position.y)
    }
}
