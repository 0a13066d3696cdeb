use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum QuadtreeError {
    #[error(
        "quadtree bounds must be finite with non-negative extents \
         (x: {x}, y: {y}, width: {width}, height: {height})"
    )]
    InvalidBounds {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
    #[error("node_capacity must be at least 1 (node_capacity: {node_capacity})")]
    InvalidConfig { node_capacity: usize },
}

pub type QuadtreeResult<T> = Result<T, QuadtreeError>;
