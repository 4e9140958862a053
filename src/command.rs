//! Commands: the per-worker instructions the scheduler emits each tick.

use crate::pearl::PearlId;
use crate::worker::WorkerId;

/// A single instruction issued to one worker for one tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Pass {
        from: WorkerId,
        pearl: PearlId,
        to: WorkerId,
    },
    Nom {
        worker: WorkerId,
        pearl: PearlId,
    },
}

impl Command {
    /// The worker this command is booked against / dispatched to.
    pub fn worker_id(&self) -> WorkerId {
        match self {
            Command::Pass { from, .. } => *from,
            Command::Nom { worker, .. } => *worker,
        }
    }

    pub fn pearl_id(&self) -> PearlId {
        match self {
            Command::Pass { pearl, .. } => *pearl,
            Command::Nom { pearl, .. } => *pearl,
        }
    }

    /// The wire form of this command: `{"Pass": {...}}` or `{"Nom": id}`.
    pub fn to_wire(&self) -> serde_json::Value {
        match self {
            Command::Pass { pearl, to, .. } => serde_json::json!({
                "Pass": { "pearl_id": pearl, "to_worker": to }
            }),
            Command::Nom { pearl, .. } => serde_json::json!({ "Nom": pearl }),
        }
    }
}

/// Serialize a tick's worker→command map to the output schema: an object
/// keyed by worker id (as a JSON string key) with each value in wire form.
/// Worker ids are emitted in ascending order for log stability.
pub fn commands_to_json(commands: &std::collections::BTreeMap<WorkerId, Command>) -> serde_json::Value {
    let mut obj = serde_json::Map::with_capacity(commands.len());
    for (worker_id, cmd) in commands {
        obj.insert(worker_id.to_string(), cmd.to_wire());
    }
    serde_json::Value::Object(obj)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn pass_serializes_to_wire_schema() {
        let cmd = Command::Pass { from: 0, pearl: 7, to: 1 };
        assert_eq!(cmd.to_wire(), serde_json::json!({"Pass": {"pearl_id": 7, "to_worker": 1}}));
    }

    #[test]
    fn nom_serializes_to_wire_schema() {
        let cmd = Command::Nom { worker: 1, pearl: 7 };
        assert_eq!(cmd.to_wire(), serde_json::json!({"Nom": 7}));
    }

    #[test]
    fn empty_tick_serializes_to_empty_object() {
        let commands: BTreeMap<WorkerId, Command> = BTreeMap::new();
        assert_eq!(commands_to_json(&commands), serde_json::json!({}));
    }

    #[test]
    fn worker_ids_become_string_keys() {
        let mut commands = BTreeMap::new();
        commands.insert(0, Command::Pass { from: 0, pearl: 7, to: 1 });
        let json = commands_to_json(&commands);
        assert!(json.get("0").is_some());
    }
}
