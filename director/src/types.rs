use common::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier the simulation uses for an entity. The index stores it as an
/// opaque handle and never owns the entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Sequential id handed out by [`crate::Director::rebuild_registry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RegistryId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entity#{}", self.0)
    }
}

impl fmt::Display for RegistryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "registry#{}", self.0)
    }
}

/// One row of the per-tick input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntityState {
    pub id: EntityId,
    pub position: Vec3,
    /// In play. Inactive entities stay registered but are not indexed.
    pub active: bool,
}

impl EntityState {
    pub fn new(id: u32, position: Vec3, active: bool) -> Self {
        Self {
            id: EntityId(id),
            position,
            active,
        }
    }

    pub fn active(id: u32, position: Vec3) -> Self {
        Self::new(id, position, true)
    }
}
