//! A* search over an explicit grid of navigation nodes.
//!
//! Nodes sit on a regular grid (`grid_size` apart). Each node links to the
//! walkable nodes one step away in the eight planar directions. Positions
//! are matched within [`POSITION_TOLERANCE`].

use collections::{HashMap, PriorityQueue};
use common::Vec3;

pub const POSITION_TOLERANCE: f32 = 1.0;
pub const DEFAULT_GRID_SIZE: f32 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Heuristic {
    #[default]
    Euclidean,
    Manhattan,
}

impl Heuristic {
    pub fn estimate(self, from: Vec3, to: Vec3) -> f32 {
        match self {
            Heuristic::Euclidean => from.distance(to),
            Heuristic::Manhattan => from.manhattan_distance(to),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavNode {
    pub position: Vec3,
    pub walkable: bool,
}

type Cell = (i64, i64, i64);

pub struct NavGraph {
    nodes: Vec<NavNode>,
    grid_size: f32,
    heuristic: Heuristic,
    cells: HashMap<Cell, Vec<usize>>,
}

impl NavGraph {
    /// Grid sizes that are not finite or not larger than
    /// [`POSITION_TOLERANCE`] fall back to [`DEFAULT_GRID_SIZE`]. Above the
    /// tolerance every match lies in the neighbouring cells.
    pub fn new(grid_size: f32) -> Self {
        let grid_size = if grid_size.is_finite() && grid_size > POSITION_TOLERANCE {
            grid_size
        } else {
            log::warn!(
                "grid size {} must exceed the position tolerance, using {}",
                grid_size,
                DEFAULT_GRID_SIZE
            );
            DEFAULT_GRID_SIZE
        };
        Self {
            nodes: Vec::new(),
            grid_size,
            heuristic: Heuristic::default(),
            cells: HashMap::new(),
        }
    }

    /// A `columns` x `rows` walkable grid in the z = 0 plane, starting at
    /// `origin`.
    pub fn grid(origin: Vec3, columns: usize, rows: usize, grid_size: f32) -> Self {
        let mut graph = Self::new(grid_size);
        let step = graph.grid_size;
        for row in 0..rows {
            for column in 0..columns {
                let offset = Vec3::new(column as f32 * step, row as f32 * step, 0.0);
                graph.add_node(origin + offset, true);
            }
        }
        graph
    }

    pub fn with_heuristic(mut self, heuristic: Heuristic) -> Self {
        self.heuristic = heuristic;
        self
    }

    pub fn grid_size(&self) -> f32 {
        self.grid_size
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, index: usize) -> Option<&NavNode> {
        self.nodes.get(index)
    }

    /// Returns the new node's index.
    pub fn add_node(&mut self, position: Vec3, walkable: bool) -> usize {
        let index = self.nodes.len();
        self.nodes.push(NavNode { position, walkable });
        let cell = self.cell_of(position);
        match self.cells.get_mut(&cell) {
            Some(indices) => indices.push(index),
            None => {
                self.cells.insert(cell, vec![index]);
            }
        }
        index
    }

    /// Returns `false` for an unknown index.
    pub fn set_walkable(&mut self, index: usize, walkable: bool) -> bool {
        match self.nodes.get_mut(index) {
            Some(node) => {
                node.walkable = walkable;
                true
            }
            None => false,
        }
    }

    /// Sets the walkable flag of the node at `position`, if any.
    pub fn set_walkable_at(&mut self, position: Vec3, walkable: bool) -> bool {
        match self.find_node(position) {
            Some(index) => self.set_walkable(index, walkable),
            None => false,
        }
    }

    fn cell_of(&self, position: Vec3) -> Cell {
        (
            (position.x / self.grid_size).round() as i64,
            (position.y / self.grid_size).round() as i64,
            (position.z / self.grid_size).round() as i64,
        )
    }

    /// Lowest-index node within the tolerance of `position`.
    pub fn find_node(&self, position: Vec3) -> Option<usize> {
        let (cx, cy, cz) = self.cell_of(position);
        let mut found: Option<usize> = None;
        // A node near a cell boundary can round into the adjacent cell.
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let Some(indices) = self.cells.get(&(cx + dx, cy + dy, cz + dz)) else {
                        continue;
                    };
                    for &index in indices {
                        if self.nodes[index]
                            .position
                            .approx_eq(position, POSITION_TOLERANCE)
                        {
                            found = Some(found.map_or(index, |best| best.min(index)));
                        }
                    }
                }
            }
        }
        found
    }

    /// Walkable nodes one grid step away in the eight planar directions.
    pub fn neighbours(&self, index: usize) -> Vec<usize> {
        let Some(node) = self.nodes.get(index) else {
            return Vec::new();
        };
        let step = self.grid_size;
        let directions = [
            (step, 0.0),
            (-step, 0.0),
            (0.0, step),
            (0.0, -step),
            (step, step),
            (-step, step),
            (step, -step),
            (-step, -step),
        ];
        directions
            .iter()
            .filter_map(|&(dx, dy)| self.find_node(node.position + Vec3::new(dx, dy, 0.0)))
            .filter(|&neighbour| self.nodes[neighbour].walkable)
            .collect()
    }

    /// Shortest path of node positions from `start` to `end`, both ends
    /// included. `None` if either position has no node or no path exists.
    pub fn find_path(&self, start: Vec3, end: Vec3) -> Option<Vec<Vec3>> {
        let start_idx = self.find_node(start)?;
        let end_idx = self.find_node(end)?;
        let end_position = self.nodes[end_idx].position;

        let n = self.nodes.len();
        let mut g_cost = vec![f32::INFINITY; n];
        let mut parent: Vec<Option<usize>> = vec![None; n];
        let mut closed = vec![false; n];
        let mut open = PriorityQueue::new();

        g_cost[start_idx] = 0.0;
        open.enqueue(
            start_idx,
            self.heuristic
                .estimate(self.nodes[start_idx].position, end_position),
        );

        while let Some(current) = open.dequeue() {
            if closed[current] {
                continue;
            }
            closed[current] = true;
            if current == end_idx {
                return Some(self.reconstruct_path(&parent, end_idx));
            }

            let current_position = self.nodes[current].position;
            for neighbour in self.neighbours(current) {
                if closed[neighbour] {
                    continue;
                }
                let neighbour_position = self.nodes[neighbour].position;
                let tentative = g_cost[current] + current_position.distance(neighbour_position);
                let queued = open.contains(&neighbour);
                if queued && tentative >= g_cost[neighbour] {
                    continue;
                }
                parent[neighbour] = Some(current);
                g_cost[neighbour] = tentative;
                let f_cost = tentative + self.heuristic.estimate(neighbour_position, end_position);
                if queued {
                    open.update_priority(&neighbour, f_cost);
                } else {
                    open.enqueue(neighbour, f_cost);
                }
            }
        }

        log::debug!(
            "no path from ({}, {}, {}) to ({}, {}, {})",
            start.x,
            start.y,
            start.z,
            end.x,
            end.y,
            end.z
        );
        None
    }

    fn reconstruct_path(&self, parent: &[Option<usize>], end_idx: usize) -> Vec<Vec3> {
        let mut path = vec![self.nodes[end_idx].position];
        let mut current = end_idx;
        while let Some(previous) = parent[current] {
            path.push(self.nodes[previous].position);
            current = previous;
        }
        path.reverse();
        path
    }
}
