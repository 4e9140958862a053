//! The dispatcher: cross-tick state and the per-tick `step` pipeline that
//! turns a [`World`] into an ordered worker→command map.

use std::collections::{BTreeMap, VecDeque};

use crate::command::Command;
use crate::pearl::PearlId;
use crate::plan::build_plan;
use crate::priority::PriorityDiscipline;
use crate::worker::WorkerId;
use crate::world::World;

/// Persistent scheduler state: live execution plans and advisory worker
/// load. Both survive across `step` calls; everything else is rebuilt fresh
/// from each tick's `World`.
pub struct Scheduler {
    plans: BTreeMap<PearlId, VecDeque<Command>>,
    worker_load: BTreeMap<WorkerId, u32>,
    priority: PriorityDiscipline,
}

impl Scheduler {
    pub fn new(priority: PriorityDiscipline) -> Self {
        Self {
            plans: BTreeMap::new(),
            worker_load: BTreeMap::new(),
            priority,
        }
    }

    /// Current advisory load booked against `worker_id`. Exposed for tests
    /// and diagnostics; never goes negative.
    pub fn worker_load(&self, worker_id: WorkerId) -> u32 {
        *self.worker_load.get(&worker_id).unwrap_or(&0)
    }

    pub fn live_plan_count(&self) -> usize {
        self.plans.len()
    }

    pub fn step(&mut self, world: &World) -> BTreeMap<WorkerId, Command> {
        let mut candidates = Vec::new();
        for worker in world.workers.values() {
            for pearl in worker.desk.values() {
                candidates.push((pearl, worker.id));
            }
        }
        candidates.sort_by_key(|(pearl, _)| self.priority.key(pearl));
        log::debug!("step: {} candidate pearls, {} live plans", candidates.len(), self.plans.len());

        let mut output: BTreeMap<WorkerId, Command> = BTreeMap::new();

        for (pearl, holder) in candidates {
            let needs_rebuild = match self.plans.get(&pearl.id).and_then(|p| p.front()) {
                Some(cmd) => cmd.worker_id() != holder,
                None => true,
            };

            if needs_rebuild {
                log::debug!("step: rebuilding plan for pearl {} at worker {}", pearl.id, holder);
                let commands = build_plan(pearl, holder, world, &self.worker_load);
                if commands.is_empty() {
                    self.plans.remove(&pearl.id);
                    continue;
                }
                for c in &commands {
                    *self.worker_load.entry(c.worker_id()).or_insert(0) += 1;
                }
                self.plans.insert(pearl.id, commands.into());
            }

            let plan = self
                .plans
                .get_mut(&pearl.id)
                .expect("plan was just built or already existed");
            let next = plan.front().expect("non-empty plan invariant").clone();
            let target_worker = next.worker_id();

            if output.contains_key(&target_worker) {
                log::debug!(
                    "step: pearl {} skipped this tick, worker {} already booked",
                    pearl.id,
                    target_worker
                );
                continue;
            }

            plan.pop_front();
            if let Some(load) = self.worker_load.get_mut(&target_worker) {
                *load = load.saturating_sub(1);
            }
            if plan.is_empty() {
                self.plans.remove(&pearl.id);
            }
            log::debug!("step: pearl {} dispatching {:?}", pearl.id, next);
            output.insert(target_worker, next);
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::Snapshot;

    fn world(json: &str) -> World {
        let s: Snapshot = serde_json::from_str(json).unwrap();
        World::from_snapshot(s).unwrap()
    }

    #[test]
    fn idle_world_yields_no_commands() {
        let w = world(
            r#"{"workers":[{"id":0,"flavor":"General","desk":[]},
                           {"id":1,"flavor":"General","desk":[]}],
               "neighbor_map":[[0,1]],"score":0}"#,
        );
        let mut sched = Scheduler::new(PriorityDiscipline::ThinnestFirst);
        assert!(sched.step(&w).is_empty());
    }

    #[test]
    fn single_pearl_at_gate_with_vector_neighbor_moves_there() {
        let w = world(
            r#"{"workers":[{"id":0,"flavor":"General",
               "desk":[{"id":7,"layers":[{"color":"Green","thickness":10}]}]},
                           {"id":1,"flavor":"Vector","desk":[]}],
               "neighbor_map":[[0,1]],"score":0}"#,
        );
        let mut sched = Scheduler::new(PriorityDiscipline::ThinnestFirst);
        let out = sched.step(&w);
        assert_eq!(out.len(), 1);
        assert_eq!(out[&0], Command::Pass { from: 0, pearl: 7, to: 1 });
    }

    #[test]
    fn worker_load_drains_one_booking_per_dispatched_command() {
        // Pearl 7 needs 3 Noms at worker 1 and never moves, so its plan
        // books worker_load[1] to 3 up front, then decrements by one per
        // tick as each Nom is dispatched.
        let w = world(
            r#"{"workers":[{"id":0,"flavor":"General","desk":[]},
                           {"id":1,"flavor":"Vector",
                            "desk":[{"id":7,"layers":[{"color":"Green","thickness":11}]}]}],
               "neighbor_map":[[0,1]],"score":0}"#,
        );
        let mut sched = Scheduler::new(PriorityDiscipline::ThinnestFirst);

        sched.step(&w);
        assert_eq!(sched.worker_load(1), 2);
        sched.step(&w);
        assert_eq!(sched.worker_load(1), 1);
        sched.step(&w);
        assert_eq!(sched.worker_load(1), 0);
        assert_eq!(sched.live_plan_count(), 0);

        // Further ticks rebuild the plan from scratch (the world is static
        // in this test) without ever driving the booking below zero.
        for _ in 0..5 {
            sched.step(&w);
            assert!(sched.worker_load(1) <= 3);
        }
    }

    #[test]
    fn nom_plan_drains_one_command_per_tick() {
        let w = world(
            r#"{"workers":[{"id":0,"flavor":"General","desk":[]},
                           {"id":1,"flavor":"Vector",
                            "desk":[{"id":7,"layers":[{"color":"Green","thickness":11}]}]}],
               "neighbor_map":[[0,1]],"score":0}"#,
        );
        let mut sched = Scheduler::new(PriorityDiscipline::ThinnestFirst);
        let out1 = sched.step(&w);
        // First tick processes at worker 1 directly (already co-located);
        // exactly one Nom command should be issued this tick.
        assert_eq!(out1.len(), 1);
        assert!(matches!(out1[&1], Command::Nom { worker: 1, pearl: 7 }));
        assert_eq!(sched.live_plan_count(), 1);
    }
}
