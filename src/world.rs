//! World: the immutable per-tick snapshot handed to the scheduler.

use std::collections::{BTreeMap, HashSet};

use serde::Deserialize;

use crate::error::SchedulerError;
use crate::pearl::{Pearl, PearlColor, PearlLayer};
use crate::worker::{Worker, WorkerId, WorkerKind};

/// Raw wire form of one input frame. Deserialized directly from an
/// NDJSON line; validated and lifted into a [`World`] by [`World::from_snapshot`].
#[derive(Debug, Deserialize)]
pub struct Snapshot {
    pub workers: Vec<SnapshotWorker>,
    pub neighbor_map: Vec<(WorkerId, WorkerId)>,
    pub score: i32,
}

#[derive(Debug, Deserialize)]
pub struct SnapshotWorker {
    pub id: WorkerId,
    pub flavor: String,
    pub desk: Vec<SnapshotPearl>,
}

#[derive(Debug, Deserialize)]
pub struct SnapshotPearl {
    pub id: u32,
    pub layers: Vec<SnapshotLayer>,
}

#[derive(Debug, Deserialize)]
pub struct SnapshotLayer {
    pub color: String,
    pub thickness: u32,
}

/// One tick's world: workers (with their desks), adjacency, and score.
/// Immutable for the lifetime of a `step` call.
pub struct World {
    pub workers: BTreeMap<WorkerId, Worker>,
    pub adjacency: Vec<(WorkerId, WorkerId)>,
    pub score: i32,
    /// Ascending-by-id neighbor lists, precomputed once per tick. All routing
    /// iterates neighbors through this map to keep dispatch order deterministic.
    neighbors: BTreeMap<WorkerId, Vec<WorkerId>>,
}

impl World {
    pub fn from_snapshot(snapshot: Snapshot) -> Result<Self, SchedulerError> {
        let mut workers = BTreeMap::new();
        for w in snapshot.workers {
            let kind = WorkerKind::from_flavor(&w.flavor);
            if kind == WorkerKind::General && w.flavor != "General" {
                log::warn!("unknown worker flavor {:?} for worker {}, defaulting to General", w.flavor, w.id);
            }
            let mut pearls = Vec::with_capacity(w.desk.len());
            for p in w.desk {
                let mut layers = Vec::with_capacity(p.layers.len());
                for l in p.layers {
                    let color = PearlColor::parse(&l.color)
                        .ok_or_else(|| SchedulerError::UnknownPearlColor(l.color.clone()))?;
                    layers.push(PearlLayer { color, thickness: l.thickness });
                }
                pearls.push(Pearl::new(p.id, layers));
            }
            workers.insert(w.id, Worker::new(w.id, kind, pearls));
        }

        if !workers.contains_key(&0) {
            return Err(SchedulerError::MissingGatekeeper);
        }

        for (a, b) in &snapshot.neighbor_map {
            if !workers.contains_key(a) {
                return Err(SchedulerError::UnknownWorker(*a));
            }
            if !workers.contains_key(b) {
                return Err(SchedulerError::UnknownWorker(*b));
            }
        }

        let mut adjacency_sets: BTreeMap<WorkerId, HashSet<WorkerId>> =
            workers.keys().map(|id| (*id, HashSet::new())).collect();
        for (a, b) in &snapshot.neighbor_map {
            adjacency_sets.get_mut(a).unwrap().insert(*b);
            adjacency_sets.get_mut(b).unwrap().insert(*a);
        }
        let neighbors: BTreeMap<WorkerId, Vec<WorkerId>> = adjacency_sets
            .into_iter()
            .map(|(id, set)| {
                let mut v: Vec<WorkerId> = set.into_iter().collect();
                v.sort_unstable();
                (id, v)
            })
            .collect();

        let world = World {
            adjacency: snapshot.neighbor_map,
            score: snapshot.score,
            workers,
            neighbors,
        };
        world.check_connected()?;
        Ok(world)
    }

    /// Ascending-id neighbor list for `worker_id`. Empty if the worker has no
    /// edges (never actually empty in a valid connected multi-worker graph,
    /// except for a single-worker world).
    pub fn neighbors(&self, worker_id: WorkerId) -> &[WorkerId] {
        self.neighbors.get(&worker_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn worker_ids(&self) -> impl Iterator<Item = WorkerId> + '_ {
        self.workers.keys().copied()
    }

    fn check_connected(&self) -> Result<(), SchedulerError> {
        let Some(&start) = self.workers.keys().next() else {
            return Ok(());
        };
        let mut seen = HashSet::new();
        let mut stack = vec![start];
        seen.insert(start);
        while let Some(w) = stack.pop() {
            for &n in self.neighbors(w) {
                if seen.insert(n) {
                    stack.push(n);
                }
            }
        }
        for &id in self.workers.keys() {
            if !seen.contains(&id) {
                return Err(SchedulerError::Disconnected { start, unreachable: id });
            }
        }
        Ok(())
    }
}
