//! Worker model: identity, specialization, and the per-color cost table.

use std::collections::BTreeMap;

use crate::pearl::{Pearl, PearlColor, PearlLayer};

pub type WorkerId = u32;

/// The three worker specializations. Each has a different pearls-thickness-
/// units-per-Nom rate for each color; see [`WorkerKind::rate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkerKind {
    General,
    Vector,
    Matrix,
}

impl WorkerKind {
    /// Parse a snapshot `"flavor"` string. Unknown flavors default to
    /// `General` (the caller is responsible for logging a warning).
    pub fn from_flavor(flavor: &str) -> Self {
        match flavor {
            "Vector" => WorkerKind::Vector,
            "Matrix" => WorkerKind::Matrix,
            _ => WorkerKind::General,
        }
    }

    /// Pearls-thickness-units digested per Nom for the given color.
    pub const fn rate(self, color: PearlColor) -> u32 {
        match (self, color) {
            (WorkerKind::General, _) => 1,
            (WorkerKind::Vector, PearlColor::Red) => 1,
            (WorkerKind::Vector, PearlColor::Green) => 5,
            (WorkerKind::Vector, PearlColor::Blue) => 2,
            (WorkerKind::Matrix, PearlColor::Red) => 1,
            (WorkerKind::Matrix, PearlColor::Green) => 2,
            (WorkerKind::Matrix, PearlColor::Blue) => 10,
        }
    }

    /// Number of Nom commands needed to fully digest one layer.
    pub fn cost_layer(self, layer: PearlLayer) -> u32 {
        if layer.thickness == 0 {
            return 0;
        }
        layer.thickness.div_ceil(self.rate(layer.color))
    }
}

/// A node in the world graph: its id, kind, and the pearls on its desk.
#[derive(Debug, Clone)]
pub struct Worker {
    pub id: WorkerId,
    pub kind: WorkerKind,
    pub desk: BTreeMap<crate::pearl::PearlId, Pearl>,
}

impl Worker {
    pub fn new(id: WorkerId, kind: WorkerKind, pearls: Vec<Pearl>) -> Self {
        Self {
            id,
            kind,
            desk: pearls.into_iter().map(|p| (p.id, p)).collect(),
        }
    }

    /// Total Nom commands required to fully digest this pearl at this worker.
    pub fn cost_pearl(&self, pearl: &Pearl) -> u32 {
        pearl.layers.iter().map(|l| self.kind.cost_layer(*l)).sum()
    }

    /// `true` iff this worker is the network's entry/exit point.
    pub fn is_gatekeeper(&self) -> bool {
        self.id == 0
    }
}
