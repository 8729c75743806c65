//! Cell state types for the ocean grid.

use serde::{Deserialize, Serialize};

/// Occupant species without per-cell state.
///
/// This is the tag reported by run enumeration and accepted by the
/// explicit-runs constructor, where a shark's hunger is implied (newborn)
/// rather than stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Species {
    Empty,
    Fish,
    Shark,
}

/// Full state of one grid cell.
///
/// Shark hunger is the number of timesteps left before starvation; a shark
/// with `hunger == 0` starves on the next step unless it eats. Two cells are
/// equal only if their species *and* hunger match, which is exactly the
/// mergeability rule for adjacent runs in the encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    Fish,
    Shark { hunger: u32 },
}

impl Cell {
    /// The species tag of this cell, discarding hunger.
    #[inline]
    pub fn species(&self) -> Species {
        match self {
            Cell::Empty => Species::Empty,
            Cell::Fish => Species::Fish,
            Cell::Shark { .. } => Species::Shark,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Single-character glyph used by the ASCII renderer.
    #[inline]
    pub fn glyph(&self) -> char {
        match self {
            Cell::Empty => ' ',
            Cell::Fish => '~',
            Cell::Shark { .. } => 'S',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn species_discards_hunger() {
        assert_eq!(Cell::Shark { hunger: 0 }.species(), Species::Shark);
        assert_eq!(Cell::Shark { hunger: 7 }.species(), Species::Shark);
        assert_eq!(Cell::Fish.species(), Species::Fish);
        assert_eq!(Cell::Empty.species(), Species::Empty);
    }

    #[test]
    fn shark_equality_includes_hunger() {
        assert_ne!(Cell::Shark { hunger: 1 }, Cell::Shark { hunger: 2 });
        assert_eq!(Cell::Shark { hunger: 3 }, Cell::Shark { hunger: 3 });
    }
}
