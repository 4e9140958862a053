//! Error types for snapshot validation and world construction.
//!
//! Everything in here is fatal: the color set is closed, and a disconnected
//! graph or an out-of-range reference violates a precondition the host is
//! required to uphold. Recoverable conditions (unknown worker flavor,
//! plan/snapshot desync, worker collisions) never produce a
//! `SchedulerError` — they are handled in place where they occur.

use crate::worker::WorkerId;

#[derive(Debug, thiserror::Error)]
pub enum SchedulerError {
    #[error("unknown pearl color: {0}")]
    UnknownPearlColor(String),

    #[error("neighbor_map references unknown worker id {0}")]
    UnknownWorker(WorkerId),

    #[error("world graph is disconnected: worker {unreachable} is not reachable from {start}")]
    Disconnected { start: WorkerId, unreachable: WorkerId },

    #[error("world graph has no worker with id 0 (gatekeeper)")]
    MissingGatekeeper,
}
