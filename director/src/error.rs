use quadtree::QuadtreeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DirectorError {
    #[error("spatial index: {0}")]
    Quadtree(#[from] QuadtreeError),

    #[error("invalid director configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid save slot name: {0:?}")]
    InvalidSlotName(String),

    #[error("save slot I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot encoding failed: {0}")]
    Encoding(#[from] bincode::Error),
}

pub type DirectorResult<T> = Result<T, DirectorError>;
