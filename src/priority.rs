//! Pearl priority disciplines used by the dispatcher to order candidate
//! pearls before plan acquisition.

use crate::pearl::{Pearl, PearlId};

/// Which ordering the dispatcher uses to decide which pearls get first crack
/// at contended workers this tick. `ThinnestFirst` is the production default;
/// `MostLayersFirst` is retained from an earlier iteration of the scheduling
/// policy and is selectable via `--priority`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PriorityDiscipline {
    #[value(name = "thinnest")]
    ThinnestFirst,
    #[value(name = "most-layers")]
    MostLayersFirst,
}

impl PriorityDiscipline {
    /// Sort key for a candidate pearl: lower sorts first. Ties always break
    /// on ascending `pearl.id` so ordering is deterministic.
    pub fn key(self, pearl: &Pearl) -> (u32, PearlId) {
        match self {
            PriorityDiscipline::ThinnestFirst => (pearl.remaining_thickness(), pearl.id),
            PriorityDiscipline::MostLayersFirst => {
                let layer_count = pearl.layers.len() as u32;
                (u32::MAX - layer_count, pearl.id)
            }
        }
    }
}

impl std::str::FromStr for PriorityDiscipline {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "thinnest" => Ok(PriorityDiscipline::ThinnestFirst),
            "most-layers" => Ok(PriorityDiscipline::MostLayersFirst),
            other => Err(format!("unknown priority discipline: {other}")),
        }
    }
}

impl Default for PriorityDiscipline {
    fn default() -> Self {
        PriorityDiscipline::ThinnestFirst
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pearl::{PearlColor, PearlLayer};

    fn pearl(id: PearlId, layers: Vec<PearlLayer>) -> Pearl {
        Pearl::new(id, layers)
    }

    #[test]
    fn thinnest_first_orders_by_remaining_thickness_then_id() {
        let a = pearl(2, vec![PearlLayer { color: PearlColor::Red, thickness: 3 }]);
        let b = pearl(1, vec![PearlLayer { color: PearlColor::Red, thickness: 3 }]);
        let c = pearl(3, vec![PearlLayer { color: PearlColor::Red, thickness: 1 }]);
        let disc = PriorityDiscipline::ThinnestFirst;
        let mut pearls = vec![&a, &b, &c];
        pearls.sort_by_key(|p| disc.key(p));
        let ids: Vec<PearlId> = pearls.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn most_layers_first_orders_by_layer_count_descending() {
        let one_layer = pearl(1, vec![PearlLayer { color: PearlColor::Red, thickness: 1 }]);
        let two_layers = pearl(
            2,
            vec![
                PearlLayer { color: PearlColor::Red, thickness: 1 },
                PearlLayer { color: PearlColor::Blue, thickness: 1 },
            ],
        );
        let disc = PriorityDiscipline::MostLayersFirst;
        let mut pearls = vec![&one_layer, &two_layers];
        pearls.sort_by_key(|p| disc.key(p));
        let ids: Vec<PearlId> = pearls.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn from_str_rejects_unknown_names() {
        assert!("thinnest".parse::<PriorityDiscipline>().is_ok());
        assert!("bogus".parse::<PriorityDiscipline>().is_err());
    }
}
