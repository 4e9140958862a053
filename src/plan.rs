//! Execution plan builder: for one pearl at its current worker, choose a
//! route (and, for an undigested pearl, a target worker) and produce the
//! ordered command sequence to get it there and digest it.

use std::collections::{BTreeMap, VecDeque};

use crate::command::Command;
use crate::pearl::Pearl;
use crate::routing::{reconstruct_route, shortest_path};
use crate::worker::WorkerId;
use crate::world::World;

/// Build the plan for `pearl`, currently held by `current_worker`.
///
/// Returns an empty vector only for a digested pearl already at the
/// gatekeeper — the dispatcher must treat that as "no plan needed" rather
/// than registering bookings for it.
pub fn build_plan(
    pearl: &Pearl,
    current_worker: WorkerId,
    world: &World,
    worker_load: &BTreeMap<WorkerId, u32>,
) -> Vec<Command> {
    if pearl.digested() {
        if world.workers[&current_worker].is_gatekeeper() {
            return Vec::new();
        }
        let route = shortest_path(world, current_worker, 0, worker_load);
        return commands_from_route(pearl, &route, world);
    }

    let target = select_target(pearl, current_worker, world, worker_load);
    commands_from_route(pearl, &target, world)
}

/// Target selection for an undigested pearl: a bounded FIFO frontier search
/// (not a priority queue) that tracks the cheapest `move_cost` to
/// each visited worker and picks the worker minimizing
/// `move_cost + cost_pearl(pearl, worker)`, pruning any branch whose
/// `move_cost` alone already meets or exceeds the best total found so far.
fn select_target(
    pearl: &Pearl,
    start: WorkerId,
    world: &World,
    worker_load: &BTreeMap<WorkerId, u32>,
) -> Vec<WorkerId> {
    let start_worker = &world.workers[&start];
    let mut best_total = start_worker.cost_pearl(pearl);
    if start_worker.is_gatekeeper() {
        best_total += 2 * world.workers.len() as u32;
    }
    let mut best = start;

    let mut move_cost: BTreeMap<WorkerId, u32> = BTreeMap::new();
    let mut predecessor: BTreeMap<WorkerId, WorkerId> = BTreeMap::new();
    move_cost.insert(start, 0);

    let mut queue: VecDeque<(u32, WorkerId)> = VecDeque::new();
    queue.push_back((0, start));

    while let Some((cost, worker_id)) = queue.pop_front() {
        if cost >= best_total {
            continue;
        }
        for &n in world.neighbors(worker_id) {
            let load = *worker_load.get(&n).unwrap_or(&0);
            let new_cost = cost + 1 + load;
            let old_cost = *move_cost.get(&n).unwrap_or(&u32::MAX);
            if old_cost <= new_cost {
                continue;
            }
            predecessor.insert(n, worker_id);
            move_cost.insert(n, new_cost);
            queue.push_back((new_cost, n));

            let processing_cost = world.workers[&n].cost_pearl(pearl);
            let total = processing_cost + new_cost;
            if total < best_total {
                best_total = total;
                best = n;
            }
        }
    }

    reconstruct_route(start, best, &predecessor)
}

/// Turn a materialized route into the Pass/Nom command sequence: one Pass
/// per consecutive pair, then enough Nom commands to fully digest the pearl
/// at the route's final worker.
fn commands_from_route(pearl: &Pearl, route: &[WorkerId], world: &World) -> Vec<Command> {
    let mut commands = Vec::new();
    for pair in route.windows(2) {
        commands.push(Command::Pass { from: pair[0], pearl: pearl.id, to: pair[1] });
    }
    if !pearl.digested() {
        let last = *route.last().expect("route is always non-empty");
        let nom_count = world.workers[&last].cost_pearl(pearl);
        for _ in 0..nom_count {
            commands.push(Command::Nom { worker: last, pearl: pearl.id });
        }
    }
    commands
}
