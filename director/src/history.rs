//! Undo/redo history and save slots for flat game-state snapshots.

use crate::error::DirectorResult;
use crate::store::{MemorySlotStore, SlotStore};
use collections::{HashMap, Stack};
use common::Vec3;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub player_health: i32,
    pub player_points: i32,
    pub wave: i32,
    pub wave_kills: i32,
    pub current_ammo: i32,
    pub holstered_ammo: i32,
    pub enemy_positions: Vec<Vec3>,
    pub enemy_health: Vec<i32>,
    /// Assigned on capture, increasing per manager.
    pub sequence: u64,
}

impl Default for GameStateSnapshot {
    fn default() -> Self {
        Self {
            player_health: 100,
            player_points: 0,
            wave: 0,
            wave_kills: 0,
            current_ammo: 0,
            holstered_ammo: 0,
            enemy_positions: Vec::new(),
            enemy_health: Vec::new(),
            sequence: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistoryConfig {
    /// Zero means unbounded.
    pub max_undo_history: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        HistoryConfig {
            max_undo_history: 50,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HistoryMetrics {
    pub total_saves: u32,
    pub total_loads: u32,
    pub average_save_time: Duration,
    /// Store loads only; cache hits are not timed.
    pub average_load_time: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CacheStats {
    pub cached_states: usize,
    pub load_factor: f32,
}

/// Current snapshot plus undo/redo stacks, with a slot cache in front of a
/// [`SlotStore`].
///
/// Undo history is bounded by [`HistoryConfig::max_undo_history`]. Once it
/// is full, the state a capture would push is dropped rather than the
/// oldest one.
pub struct GameStateManager<S: SlotStore = MemorySlotStore> {
    undo: Stack<GameStateSnapshot>,
    redo: Stack<GameStateSnapshot>,
    cache: HashMap<String, GameStateSnapshot>,
    current: Option<GameStateSnapshot>,
    next_sequence: u64,
    store: S,
    metrics: HistoryMetrics,
}

impl GameStateManager<MemorySlotStore> {
    pub fn in_memory() -> Self {
        Self::new(HistoryConfig::default(), MemorySlotStore::new())
    }
}

impl<S: SlotStore> GameStateManager<S> {
    pub fn new(config: HistoryConfig, store: S) -> Self {
        Self {
            undo: Stack::with_max_capacity(config.max_undo_history),
            redo: Stack::new(),
            cache: HashMap::new(),
            current: None,
            next_sequence: 1,
            store,
            metrics: HistoryMetrics::default(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn current(&self) -> Option<&GameStateSnapshot> {
        self.current.as_ref()
    }

    /// Makes `snapshot` current, pushing the previous current state onto the
    /// undo stack and clearing redo. The snapshot's `sequence` is replaced.
    pub fn capture_state(&mut self, mut snapshot: GameStateSnapshot) -> &GameStateSnapshot {
        snapshot.sequence = self.next_sequence;
        self.next_sequence += 1;
        if let Some(previous) = self.current.take() {
            self.push_undo(previous);
        }
        self.redo.clear();
        self.current.insert(snapshot)
    }

    fn push_undo(&mut self, snapshot: GameStateSnapshot) {
        let sequence = snapshot.sequence;
        if !self.undo.push(snapshot) {
            log::warn!(
                "undo history full ({} states), dropping state {}",
                self.undo.len(),
                sequence
            );
        }
    }

    /// Steps back one state. The state left behind becomes redoable.
    pub fn undo(&mut self) -> Option<&GameStateSnapshot> {
        let previous = self.undo.pop()?;
        if let Some(current) = self.current.take() {
            self.redo.push(current);
        }
        Some(&*self.current.insert(previous))
    }

    pub fn redo(&mut self) -> Option<&GameStateSnapshot> {
        let next = self.redo.pop()?;
        if let Some(current) = self.current.take() {
            self.push_undo(current);
        }
        Some(&*self.current.insert(next))
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    pub fn clear_history(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }

    /// Writes the current state (or a default one if nothing was captured)
    /// to `slot` and caches it.
    pub fn save_state(&mut self, slot: &str) -> DirectorResult<()> {
        let start = Instant::now();
        let snapshot = self.current.clone().unwrap_or_default();
        self.store.save(slot, &snapshot)?;
        self.cache.insert(slot.to_string(), snapshot);

        let elapsed = start.elapsed();
        self.metrics.average_save_time =
            running_average(self.metrics.average_save_time, self.metrics.total_saves, elapsed);
        self.metrics.total_saves += 1;
        log::info!("saved slot '{}' in {:?}", slot, elapsed);
        Ok(())
    }

    /// Makes the state in `slot` current. The cache is consulted before the
    /// store. `Ok(None)` when neither has the slot.
    pub fn load_state(&mut self, slot: &str) -> DirectorResult<Option<&GameStateSnapshot>> {
        if let Some(cached) = self.cache.get(slot) {
            let snapshot = cached.clone();
            log::info!("loaded slot '{}' from cache", slot);
            return Ok(Some(&*self.current.insert(snapshot)));
        }

        let start = Instant::now();
        let Some(snapshot) = self.store.load(slot)? else {
            return Ok(None);
        };
        self.cache.insert(slot.to_string(), snapshot.clone());

        let elapsed = start.elapsed();
        self.metrics.average_load_time =
            running_average(self.metrics.average_load_time, self.metrics.total_loads, elapsed);
        self.metrics.total_loads += 1;
        log::info!("loaded slot '{}' from store in {:?}", slot, elapsed);
        Ok(Some(&*self.current.insert(snapshot)))
    }

    /// Deletes `slot` from the store and, if that succeeded, from the cache.
    pub fn delete_save(&mut self, slot: &str) -> DirectorResult<bool> {
        let deleted = self.store.delete(slot)?;
        if deleted {
            self.cache.remove(slot);
            log::info!("deleted slot '{}'", slot);
        }
        Ok(deleted)
    }

    /// Cached slot names, sorted.
    pub fn available_slots(&self) -> Vec<String> {
        let mut slots = self.cache.keys();
        slots.sort();
        slots
    }

    pub fn metrics(&self) -> HistoryMetrics {
        self.metrics
    }

    pub fn cache_stats(&self) -> CacheStats {
        CacheStats {
            cached_states: self.cache.len(),
            load_factor: self.cache.load_factor(),
        }
    }
}

fn running_average(average: Duration, count: u32, sample: Duration) -> Duration {
    (average * count + sample) / (count + 1)
}
