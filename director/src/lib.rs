//! Per-tick entity index for a wave-based arena.
//!
//! [`Director`] owns a registry ([`collections::HashMap`]), a threat queue
//! ([`collections::PriorityQueue`]) and a [`quadtree::quadtree::QuadTree`],
//! rebuilds them from the simulation's entity list, and answers nearest,
//! radius, by-id and threat-ranking queries. [`history`] keeps undo/redo and
//! save slots for flat game-state snapshots; [`navigation`] is an A* search
//! over an explicit node grid.

pub mod config;
pub mod director;
pub mod error;
pub mod history;
pub mod metrics;
pub mod navigation;
pub mod store;
pub mod threat;
pub mod types;

pub use config::DirectorConfig;
pub use director::{Director, DirectorEvent, IndexState, RebuildReport, TickReport};
pub use error::{DirectorError, DirectorResult};
pub use metrics::DirectorMetrics;
pub use threat::{ThreatEntry, ThreatRanking};
pub use types::{EntityId, EntityState, RegistryId};
