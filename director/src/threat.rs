use crate::types::{EntityId, RegistryId};
use collections::search::{linear_search, partition_point_by};
use collections::sorting::quick_sort_by;

/// One entity's threat relative to a reference point.
///
/// Equality looks at `entity` only.
#[derive(Debug, Clone, Copy)]
pub struct ThreatEntry {
    pub entity: EntityId,
    pub registry_id: RegistryId,
    pub priority: f32,
    pub distance: f32,
}

impl ThreatEntry {
    /// Entry that compares equal to any entry for `entity`.
    pub(crate) fn lookup_key(entity: EntityId) -> Self {
        Self {
            entity,
            registry_id: RegistryId(0),
            priority: 0.0,
            distance: 0.0,
        }
    }
}

impl PartialEq for ThreatEntry {
    fn eq(&self, other: &Self) -> bool {
        self.entity == other.entity
    }
}

/// Threat entries ordered highest priority first.
///
/// Only finite distances are ranked. Ranking priority falls as distance
/// grows, so entries are also ordered by non-decreasing distance. Equal priorities fall back to the shorter
/// distance, then the lower entity id.
#[derive(Debug, Clone, Default)]
pub struct ThreatRanking {
    entries: Vec<ThreatEntry>,
}

impl ThreatRanking {
    pub(crate) fn from_unsorted(mut entries: Vec<ThreatEntry>) -> Self {
        quick_sort_by(&mut entries, |a, b| {
            if a.priority != b.priority {
                return a.priority > b.priority;
            }
            if a.distance != b.distance {
                return a.distance < b.distance;
            }
            a.entity < b.entity
        });
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[ThreatEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &ThreatEntry> + '_ {
        self.entries.iter()
    }

    /// Highest threat.
    pub fn top(&self) -> Option<&ThreatEntry> {
        self.entries.first()
    }

    /// Number of entries at most `distance` away. Binary search.
    pub fn count_within(&self, distance: f32) -> usize {
        partition_point_by(&self.entries, |entry| entry.distance <= distance)
    }

    pub fn within(&self, distance: f32) -> &[ThreatEntry] {
        &self.entries[..self.count_within(distance)]
    }

    /// Rank of `entity`, 0 being the highest threat.
    pub fn rank_of(&self, entity: EntityId) -> Option<usize> {
        linear_search(&self.entries, &ThreatEntry::lookup_key(entity))
    }

    pub fn into_vec(self) -> Vec<ThreatEntry> {
        self.entries
    }
}

impl IntoIterator for ThreatRanking {
    type Item = ThreatEntry;
    type IntoIter = std::vec::IntoIter<ThreatEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
