use crate::config::DirectorConfig;
use crate::error::DirectorResult;
use crate::metrics::DirectorMetrics;
use crate::threat::{ThreatEntry, ThreatRanking};
use crate::types::{EntityId, EntityState, RegistryId};
use collections::{HashMap, PriorityQueue};
use common::Vec3;
use quadtree::quadtree::QuadTree;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexState {
    /// Nothing has been indexed yet.
    Idle,
    /// The spatial index matches the last frame it was given.
    Built,
    /// Entities moved since the last rebuild. Spatial queries still answer
    /// for the positions of that rebuild.
    Stale,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RebuildReport {
    pub indexed: usize,
    /// Active entities whose position fell outside the arena.
    pub rejected: Vec<EntityId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectorEvent {
    /// Was active last tick and is now inactive or missing.
    Departed(EntityId),
    /// Active but outside the arena, so not indexed this tick.
    OutOfBounds(EntityId),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub events: Vec<DirectorEvent>,
    pub indexed: usize,
}

impl TickReport {
    pub fn departed(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.events.iter().filter_map(|event| match event {
            DirectorEvent::Departed(id) => Some(*id),
            _ => None,
        })
    }

    pub fn out_of_bounds(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.events.iter().filter_map(|event| match event {
            DirectorEvent::OutOfBounds(id) => Some(*id),
            _ => None,
        })
    }
}

/// Entity index rebuilt from the simulation's entity list.
///
/// The simulation loop owns the director and is its only caller. Each tick
/// it hands over the full entity list; the director never holds on to
/// entities beyond their id and last reported position.
pub struct Director {
    config: DirectorConfig,
    spatial: QuadTree,
    registry: HashMap<RegistryId, EntityId>,
    registry_ids: HashMap<EntityId, RegistryId>,
    threat_queue: PriorityQueue<ThreatEntry>,
    // Latest frame seen by rebuild, observe or tick, one row per id.
    frame: Vec<EntityState>,
    state: IndexState,
    metrics: DirectorMetrics,
}

impl Director {
    pub fn new(config: DirectorConfig) -> DirectorResult<Self> {
        config.validate()?;
        let spatial = QuadTree::with_config(config.arena_bounds(), config.quadtree_config())?;
        Ok(Self {
            registry: HashMap::with_capacity(config.registry_capacity),
            registry_ids: HashMap::with_capacity(config.registry_capacity),
            threat_queue: PriorityQueue::new(),
            frame: Vec::new(),
            state: IndexState::Idle,
            metrics: DirectorMetrics::default(),
            spatial,
            config,
        })
    }

    pub fn config(&self) -> &DirectorConfig {
        &self.config
    }

    pub fn state(&self) -> IndexState {
        self.state
    }

    pub fn metrics(&self) -> DirectorMetrics {
        self.metrics
    }

    pub fn spatial_index(&self) -> &QuadTree {
        &self.spatial
    }

    /// Entities in the spatial index as of the last rebuild.
    pub fn indexed_len(&self) -> usize {
        self.spatial.len()
    }

    /// Clears the quadtree and re-inserts every active entity. A repeated
    /// id only counts with its first row.
    pub fn rebuild_spatial_index(&mut self, entities: &[EntityState]) -> RebuildReport {
        let start = Instant::now();
        self.spatial.clear();

        let frame = first_row_per_id(entities);
        let mut report = RebuildReport::default();
        for entity in frame.iter().filter(|entity| entity.active) {
            if self.spatial.insert(entity.position.planar(), entity.id.0) {
                report.indexed += 1;
            } else {
                log::warn!(
                    "{} at ({}, {}) is outside the arena, not indexed",
                    entity.id,
                    entity.position.x,
                    entity.position.y
                );
                report.rejected.push(entity.id);
            }
        }

        self.frame = frame;
        self.state = IndexState::Built;
        self.metrics.last_rebuild = start.elapsed();
        log::debug!(
            "spatial index rebuilt: {} entities, {} rejected, {} nodes in {:?}",
            report.indexed,
            report.rejected.len(),
            self.spatial.node_count(),
            self.metrics.last_rebuild
        );
        report
    }

    /// Records the latest frame without rebuilding. A built index turns
    /// stale when any position or active flag differs from the last
    /// rebuild.
    pub fn observe(&mut self, entities: &[EntityState]) -> IndexState {
        let frame = first_row_per_id(entities);
        if self.state != IndexState::Idle && self.frame != frame {
            self.state = IndexState::Stale;
        }
        self.frame = frame;
        self.state
    }

    /// Assigns sequential registry ids, starting at 0, to every entity in
    /// `entities`, active or not. A repeated id keeps the registry id of its
    /// first row. Returns the number registered.
    pub fn rebuild_registry(&mut self, entities: &[EntityState]) -> usize {
        self.registry.clear();
        self.registry_ids.clear();
        let mut next_id = 0;
        for entity in first_row_per_id(entities) {
            let registry_id = RegistryId(next_id);
            self.registry.insert(registry_id, entity.id);
            self.registry_ids.insert(entity.id, registry_id);
            next_id += 1;
        }
        log::debug!(
            "registry built: {} entities, load factor {:.2}",
            self.registry.len(),
            self.registry.load_factor()
        );
        self.registry.len()
    }

    pub fn registry_len(&self) -> usize {
        self.registry.len()
    }

    pub fn by_id(&mut self, id: RegistryId) -> Option<EntityId> {
        let start = Instant::now();
        let found = self.registry.get(&id).copied();
        self.metrics.last_search = start.elapsed();
        log::trace!("registry lookup {} in {:?}", id, self.metrics.last_search);
        found
    }

    pub fn registry_id_of(&self, entity: EntityId) -> Option<RegistryId> {
        self.registry_ids.get(&entity).copied()
    }

    /// Closest indexed entity on the ground plane. A positive
    /// `max_distance` is a hard cutoff; otherwise the search is unbounded.
    pub fn nearest(&mut self, position: Vec3, max_distance: f32) -> Option<EntityId> {
        let start = Instant::now();
        let found = self
            .spatial
            .nearest(position.planar(), max_distance)
            .map(|point| EntityId(point.value));
        self.record_query(start);
        found
    }

    /// Indexed entities within `radius` on the ground plane, in no
    /// particular order.
    pub fn in_radius(&mut self, center: Vec3, radius: f32) -> Vec<EntityId> {
        let start = Instant::now();
        let found: Vec<EntityId> = self
            .spatial
            .query_radius(center.planar(), radius)
            .into_iter()
            .map(|point| EntityId(point.value))
            .collect();
        self.record_query(start);
        found
    }

    fn record_query(&mut self, start: Instant) {
        self.metrics.last_search = start.elapsed();
        self.metrics.total_queries += 1;
        log::trace!(
            "spatial query #{} in {:?}",
            self.metrics.total_queries,
            self.metrics.last_search
        );
    }

    /// Every active, registered entity of the latest frame, ranked by
    /// `threat_ranking_numerator / (distance + 1)` with the highest first.
    /// Entities at a non-finite distance from `reference` are left out.
    pub fn ranked_by_threat(&mut self, reference: Vec3) -> ThreatRanking {
        let start = Instant::now();
        let numerator = self.config.threat_ranking_numerator;
        let mut entries = Vec::new();
        for (entity, registry_id) in self.registered_active() {
            let distance = entity.position.distance(reference);
            if !distance.is_finite() {
                log::warn!("{} has a non-finite distance, not ranked", entity.id);
                continue;
            }
            entries.push(ThreatEntry {
                entity: entity.id,
                registry_id,
                priority: numerator / (distance + 1.0),
                distance,
            });
        }
        let ranking = ThreatRanking::from_unsorted(entries);
        self.metrics.last_sort = start.elapsed();
        log::debug!(
            "ranked {} entities by threat in {:?}",
            ranking.len(),
            self.metrics.last_sort
        );
        ranking
    }

    /// Refills the threat queue from the latest frame, keyed by
    /// `distance / threat_distance_scale` so the closest entity comes out
    /// first. Entities at a non-finite distance are not queued. Returns the
    /// queue length.
    pub fn rebuild_threat_queue(&mut self, reference: Vec3) -> usize {
        let scale = self.config.threat_distance_scale;
        let mut queue = std::mem::take(&mut self.threat_queue);
        queue.clear();
        for (entity, registry_id) in self.registered_active() {
            let distance = entity.position.distance(reference);
            let key = distance / scale;
            if !key.is_finite() {
                log::warn!("{} has a non-finite distance, not queued", entity.id);
                continue;
            }
            let entry = ThreatEntry {
                entity: entity.id,
                registry_id,
                priority: key,
                distance,
            };
            queue.enqueue(entry, key);
        }
        self.threat_queue = queue;
        log::debug!("threat queue rebuilt: {} entities", self.threat_queue.len());
        self.threat_queue.len()
    }

    pub fn threat_queue_len(&self) -> usize {
        self.threat_queue.len()
    }

    /// Removes and returns the closest queued entity. `priority` is the
    /// queue key and `registry_id` is the one held when the queue was built.
    pub fn next_threat(&mut self) -> Option<ThreatEntry> {
        let (entry, key) = self.threat_queue.dequeue_with_priority()?;
        Some(self.queued_entry(entry, key))
    }

    pub fn peek_threat(&self) -> Option<ThreatEntry> {
        let entry = *self.threat_queue.peek()?;
        let key = self.threat_queue.peek_priority()?;
        Some(self.queued_entry(entry, key))
    }

    /// Re-keys a queued entity for a new distance. Returns `false` when the
    /// entity is not queued or the distance is not finite.
    pub fn update_threat(&mut self, entity: EntityId, distance: f32) -> bool {
        let key = distance / self.config.threat_distance_scale;
        if !key.is_finite() {
            return false;
        }
        self.threat_queue
            .update_priority(&ThreatEntry::lookup_key(entity), key)
    }

    fn queued_entry(&self, entry: ThreatEntry, key: f32) -> ThreatEntry {
        ThreatEntry {
            priority: key,
            distance: key * self.config.threat_distance_scale,
            ..entry
        }
    }

    fn registered_active(&self) -> impl Iterator<Item = (&EntityState, RegistryId)> + '_ {
        self.frame
            .iter()
            .filter(|entity| entity.active)
            .filter_map(|entity| {
                self.registry_id_of(entity.id)
                    .map(|registry_id| (entity, registry_id))
            })
    }

    /// One simulation step: reports entities that left play since the
    /// previous frame, then rebuilds the spatial index from `entities`.
    pub fn tick(&mut self, entities: &[EntityState]) -> TickReport {
        let mut events = Vec::new();
        let frame = first_row_per_id(entities);

        let mut now_active: HashMap<EntityId, ()> = HashMap::with_capacity(frame.len());
        for entity in frame.iter().filter(|entity| entity.active) {
            now_active.insert(entity.id, ());
        }
        for previous in self.frame.iter().filter(|entity| entity.active) {
            if !now_active.contains_key(&previous.id) {
                events.push(DirectorEvent::Departed(previous.id));
            }
        }

        let report = self.rebuild_spatial_index(&frame);
        events.extend(report.rejected.into_iter().map(DirectorEvent::OutOfBounds));

        if !events.is_empty() {
            log::debug!("tick produced {} events", events.len());
        }
        TickReport {
            events,
            indexed: report.indexed,
        }
    }
}

/// Drops every row whose id already appeared earlier in `entities`.
fn first_row_per_id(entities: &[EntityState]) -> Vec<EntityState> {
    let mut seen: HashMap<EntityId, ()> = HashMap::with_capacity(entities.len());
    let mut frame = Vec::with_capacity(entities.len());
    for entity in entities {
        if seen.insert(entity.id, ()).is_some() {
            log::warn!("{} listed twice, keeping its first row", entity.id);
            continue;
        }
        frame.push(*entity);
    }
    frame
}
