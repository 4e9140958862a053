//! Stateful scheduler core for a pearl-processing game played over a graph
//! of workers: parse a world snapshot, decide this tick's commands, repeat.

pub mod command;
pub mod config;
pub mod error;
pub mod pearl;
pub mod plan;
pub mod priority;
pub mod render;
pub mod routing;
pub mod scheduler;
pub mod worker;
pub mod world;

pub use command::{commands_to_json, Command};
pub use error::SchedulerError;
pub use pearl::{Pearl, PearlColor, PearlId, PearlLayer};
pub use priority::PriorityDiscipline;
pub use scheduler::Scheduler;
pub use worker::{Worker, WorkerId, WorkerKind};
pub use world::{Snapshot, World};
