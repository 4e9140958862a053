//! Pearl model: the job unit the scheduler routes and digests.

pub type PearlId = u32;

/// One of the three colors a pearl layer can be made of. The set is closed:
/// an unrecognized snapshot color string is a fatal error, not a silent
/// default, so parsing goes through [`PearlColor::parse`] rather than serde.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PearlColor {
    Red,
    Green,
    Blue,
}

impl PearlColor {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Red" => Some(PearlColor::Red),
            "Green" => Some(PearlColor::Green),
            "Blue" => Some(PearlColor::Blue),
            _ => None,
        }
    }
}

/// A single layer of a pearl: a color and the bites remaining on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PearlLayer {
    pub color: PearlColor,
    pub thickness: u32,
}

/// A layered job. The top layer (index 0) is the one Nom bites.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pearl {
    pub id: PearlId,
    pub layers: Vec<PearlLayer>,
}

impl Pearl {
    pub fn new(id: PearlId, layers: Vec<PearlLayer>) -> Self {
        Self { id, layers }
    }

    /// Sum of thickness across all layers, including already-zero ones.
    pub fn remaining_thickness(&self) -> u32 {
        self.layers.iter().map(|l| l.thickness).sum()
    }

    /// True iff every layer has been fully bitten down (or there are no layers).
    pub fn digested(&self) -> bool {
        self.remaining_thickness() == 0
    }
}
