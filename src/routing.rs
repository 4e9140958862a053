//! The weighted shortest-path routing kernel shared by the plan builder.
//!
//! Edge weight entering `v` is `1 + worker_load[v]`; the start node is
//! entered for free. Neighbors are always visited in ascending-id order
//! (the world's precomputed neighbor lists already guarantee this), which
//! makes the whole kernel deterministic: ties in distance are broken by
//! whichever predecessor was discovered first.

use std::collections::{BTreeMap, BinaryHeap};
use std::cmp::Reverse;

use crate::worker::WorkerId;
use crate::world::World;

/// Predecessor and distance maps from a single-source shortest-path run.
pub struct ShortestTree {
    pub distance: BTreeMap<WorkerId, u64>,
    pub predecessor: BTreeMap<WorkerId, WorkerId>,
}

impl ShortestTree {
    /// Reconstruct the route `[start, ..., goal]` from this tree.
    /// Panics if `goal` was not reached, which cannot happen on a connected
    /// world (a precondition enforced at `World` construction time).
    pub fn route_to(&self, start: WorkerId, goal: WorkerId) -> Vec<WorkerId> {
        reconstruct_route(start, goal, &self.predecessor)
    }
}

/// Walk a predecessor map back from `goal` to `start` and return the route
/// in forward order. Shared by [`ShortestTree::route_to`] and the plan
/// builder's own bounded frontier search, which builds its own predecessor
/// map outside of a full Dijkstra run.
pub fn reconstruct_route(start: WorkerId, goal: WorkerId, predecessor: &BTreeMap<WorkerId, WorkerId>) -> Vec<WorkerId> {
    if start == goal {
        return vec![start];
    }
    let mut route = vec![goal];
    let mut cur = goal;
    while cur != start {
        cur = *predecessor
            .get(&cur)
            .expect("goal is reachable from start on a connected world");
        route.push(cur);
    }
    route.reverse();
    route
}

/// Full single-source shortest-path tree from `start`, using `worker_load`
/// as the per-node entry penalty.
pub fn shortest_tree(world: &World, start: WorkerId, worker_load: &BTreeMap<WorkerId, u32>) -> ShortestTree {
    let mut distance = BTreeMap::new();
    let mut predecessor = BTreeMap::new();
    let mut heap = BinaryHeap::new();

    distance.insert(start, 0u64);
    heap.push(Reverse((0u64, start)));

    while let Some(Reverse((dist, worker_id))) = heap.pop() {
        if dist > *distance.get(&worker_id).unwrap_or(&u64::MAX) {
            continue;
        }
        for &n in world.neighbors(worker_id) {
            let load = *worker_load.get(&n).unwrap_or(&0) as u64;
            let candidate = dist + 1 + load;
            let best_known = *distance.get(&n).unwrap_or(&u64::MAX);
            if candidate < best_known {
                distance.insert(n, candidate);
                predecessor.insert(n, worker_id);
                heap.push(Reverse((candidate, n)));
            }
        }
    }

    ShortestTree { distance, predecessor }
}

/// Shortest route `[start, ..., goal]` under the worker-load edge weight.
pub fn shortest_path(world: &World, start: WorkerId, goal: WorkerId, worker_load: &BTreeMap<WorkerId, u32>) -> Vec<WorkerId> {
    let tree = shortest_tree(world, start, worker_load);
    tree.route_to(start, goal)
}
