//! Debug rendering: write one tick's world to a Graphviz `.dot` file.
//!
//! The Rust-native analogue of the host project's original PNG debug aid:
//! stops at the portable text format instead of shelling out to an image
//! renderer, so a rendering failure only ever costs a missing debug file,
//! never the scheduler's actual output.

use std::fmt::Write as _;
use std::path::Path;

use crate::pearl::Pearl;
use crate::world::World;

fn pearl_label(pearl: &Pearl) -> String {
    let layers: Vec<String> = pearl
        .layers
        .iter()
        .map(|l| format!("{:?}:{}", l.color, l.thickness))
        .collect();
    format!("pearl {} [{}]", pearl.id, layers.join(", "))
}

/// Render `world` as Graphviz source, one oval node per worker (labeled with
/// id, kind, and desk contents) and one undirected edge per adjacency entry.
pub fn render_dot(world: &World) -> String {
    let mut out = String::new();
    writeln!(out, "graph Atlantis {{").unwrap();
    for worker in world.workers.values() {
        let mut label = format!("{} - {:?}", worker.id, worker.kind);
        for pearl in worker.desk.values() {
            write!(label, "\\n{}", pearl_label(pearl)).unwrap();
        }
        writeln!(out, "  {} [label=\"{}\", shape=oval];", worker.id, label).unwrap();
    }
    for (a, b) in &world.adjacency {
        writeln!(out, "  {a} -- {b};").unwrap();
    }
    writeln!(out, "}}").unwrap();
    out
}

/// Write `tick-<tick>.dot` under `output_dir`. Failures are the caller's to
/// log at `warn` and otherwise ignore.
pub fn write_tick_render(output_dir: &Path, tick: u64, world: &World) -> std::io::Result<()> {
    let path = output_dir.join(format!("tick-{tick:04}.dot"));
    std::fs::write(path, render_dot(world))
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
    fn renders_one_node_per_worker_and_one_edge_per_adjacency() {
        let w = world(
            r#"{"workers":[{"id":0,"flavor":"General","desk":[]},
                           {"id":1,"flavor":"Vector",
                            "desk":[{"id":7,"layers":[{"color":"Green","thickness":5}]}]}],
               "neighbor_map":[[0,1]],"score":0}"#,
        );
        let dot = render_dot(&w);
        assert!(dot.contains("graph Atlantis"));
        assert!(dot.contains("0 [label=\"0 - General\""));
        assert!(dot.contains("pearl 7"));
        assert!(dot.contains("0 -- 1;"));
    }

    #[test]
    fn write_tick_render_creates_expected_file() {
        let w = world(r#"{"workers":[{"id":0,"flavor":"General","desk":[]}],"neighbor_map":[],"score":0}"#);
        let tmp = tempfile::tempdir().unwrap();
        write_tick_render(tmp.path(), 3, &w).unwrap();
        assert!(tmp.path().join("tick-0003.dot").is_file());
    }
}
