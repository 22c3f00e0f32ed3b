use crate::tile::Tile;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Remaining-cost estimate used to order the A* open list.
///
/// Estimates are measured between tile centres in world units, so they are only
/// admissible when a step's weight is at least the world distance it covers.
/// With unit weights that means unit-sized tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Heuristic {
    /// Euclidean distance.
    #[default]
    Distance,
    /// Sum of absolute axis differences. Admissible for four-directional movement.
    Manhattan,
    /// Largest absolute axis difference. Admissible for eight-directional movement.
    Diagonal,
}

impl Heuristic {
    pub fn estimate(self, node: &Tile, target: &Tile) -> f32 {
        let delta = (target.position() - node.position()).abs();
        match self {
            Heuristic::Distance => delta.length(),
            Heuristic::Manhattan => delta.x + delta.y,
            Heuristic::Diagonal => delta.x.max(delta.y),
        }
    }
}
