//! Conversion between the dense ocean grid and its run-length encoding.
//!
//! Both directions are single linear passes: encoding greedily groups
//! maximal spans of identical cells (shark hunger included), decoding
//! writes each run's cells back in order. A valid encoding tiles the grid
//! exactly, so decoding always fills every cell.

use log::debug;

use crate::schema::Cell;
use crate::sim::ocean::Ocean;
use crate::sim::rle::{Run, RunList};

impl RunList {
    /// Compress an ocean snapshot into a run-length encoding.
    ///
    /// Scans cells in linear index order and groups maximal runs of equal
    /// cells, so the result is compacted by construction.
    pub fn from_ocean(ocean: &Ocean) -> Self {
        let mut list = Self::bare(ocean.width(), ocean.height(), ocean.starve_time());
        let total = ocean.width() * ocean.height();
        let mut start = 0;
        while start < total {
            let cell = ocean.cell_at(start);
            let mut len = 1;
            while start + len < total && ocean.cell_at(start + len) == cell {
                len += 1;
            }
            list.append(Run { cell, len });
            start += len;
        }
        list.restart_runs();
        debug_assert_eq!(list.check(), Ok(()));
        debug!(
            "encoded {}x{} ocean into {} runs",
            ocean.width(),
            ocean.height(),
            list.run_count()
        );
        list
    }

    /// Expand the encoding back into a dense ocean.
    pub fn to_ocean(&self) -> Ocean {
        let mut ocean = Ocean::all_empty(self.width(), self.height(), self.starve_time());
        let mut idx = 0;
        for run in self.runs() {
            if run.cell == Cell::Empty {
                idx += run.len;
                continue;
            }
            for _ in 0..run.len {
                ocean.set_cell_at(idx, run.cell);
                idx += 1;
            }
        }
        ocean
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::error::OceanError;
    use crate::schema::{OceanConfig, Species};

    fn config(width: usize, height: usize, starve_time: u32) -> OceanConfig {
        OceanConfig {
            width,
            height,
            starve_time,
        }
    }

    fn populated_ocean() -> Ocean {
        let mut ocean = Ocean::new(&config(20, 20, 3)).unwrap();
        ocean.add_shark(2, 1).unwrap();
        ocean.add_shark(1, 2).unwrap();
        ocean.add_shark(2, 2).unwrap();
        ocean.add_shark(3, 2).unwrap();
        ocean.add_shark(2, 3).unwrap();
        ocean.add_fish(1, 1).unwrap();
        ocean.add_fish(3, 1).unwrap();
        ocean.add_fish(4, 1).unwrap();
        ocean.add_fish(0, 3).unwrap();
        ocean.add_fish(1, 3).unwrap();
        ocean
    }

    #[test]
    fn encode_then_decode_reproduces_the_ocean() {
        let ocean = populated_ocean();
        let list = RunList::from_ocean(&ocean);
        assert_eq!(list.check(), Ok(()));
        assert_eq!(list.to_ocean(), ocean);
    }

    #[test]
    fn encoding_preserves_shark_hunger() {
        let mut ocean = Ocean::new(&config(4, 1, 5)).unwrap();
        ocean.add_shark_with_hunger(0, 0, 2).unwrap();
        ocean.add_shark_with_hunger(1, 0, 2).unwrap();
        ocean.add_shark_with_hunger(2, 0, 4).unwrap();
        let list = RunList::from_ocean(&ocean);
        let runs: Vec<Run> = list.runs().collect();
        assert_eq!(runs, vec![
            Run {
                cell: Cell::Shark { hunger: 2 },
                len: 2
            },
            Run {
                cell: Cell::Shark { hunger: 4 },
                len: 1
            },
            Run {
                cell: Cell::Empty,
                len: 1
            },
        ]);
        let back = list.to_ocean();
        assert_eq!(back.shark_hunger(0, 0).unwrap(), Some(2));
        assert_eq!(back.shark_hunger(2, 0).unwrap(), Some(4));
    }

    #[test]
    fn decode_then_encode_is_identity_on_compacted_lists() {
        let mut list = RunList::from_runs(&config(6, 2, 3), &[
            (Species::Fish, 3),
            (Species::Empty, 4),
            (Species::Shark, 2),
            (Species::Empty, 3),
        ])
        .unwrap();
        list.add_fish(4, 0).unwrap();
        let reencoded = RunList::from_ocean(&list.to_ocean());
        let lhs: Vec<Run> = list.runs().collect();
        let rhs: Vec<Run> = reencoded.runs().collect();
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn edits_on_the_encoding_match_edits_on_the_grid() {
        let mut ocean = Ocean::new(&config(8, 6, 3)).unwrap();
        let mut list = RunList::from_ocean(&ocean);
        let edits = [(0usize, 0usize), (7, 5), (3, 2), (4, 2), (3, 2)];
        for &(x, y) in &edits {
            ocean.add_fish(x, y).unwrap();
            list.add_fish(x, y).unwrap();
        }
        ocean.add_shark_with_hunger(5, 2, 1).unwrap();
        list.add_shark_with_hunger(5, 2, 1).unwrap();
        assert_eq!(list.to_ocean(), ocean);
        assert_eq!(list.check(), Ok(()));
    }

    #[test]
    fn cursor_enumeration_matches_iterator() {
        let ocean = populated_ocean();
        let mut list = RunList::from_ocean(&ocean);
        let from_iter: Vec<(Species, usize)> = list
            .runs()
            .map(|run| (run.cell.species(), run.len))
            .collect();
        list.restart_runs();
        let mut from_cursor = Vec::new();
        while let Some(run) = list.next_run() {
            from_cursor.push(run);
        }
        assert_eq!(from_cursor, from_iter);
    }

    // ----- property tests -----

    fn cell_strategy() -> impl Strategy<Value = Cell> {
        prop_oneof![
            Just(Cell::Empty),
            Just(Cell::Fish),
            (0u32..4).prop_map(|hunger| Cell::Shark { hunger }),
        ]
    }

    fn ocean_strategy() -> impl Strategy<Value = Ocean> {
        (1usize..12, 1usize..12)
            .prop_flat_map(|(width, height)| {
                (
                    Just(width),
                    Just(height),
                    proptest::collection::vec(cell_strategy(), width * height),
                )
            })
            .prop_map(|(width, height, cells)| {
                let mut ocean = Ocean::all_empty(width, height, 3);
                for (idx, cell) in cells.into_iter().enumerate() {
                    ocean.set_cell_at(idx, cell);
                }
                ocean
            })
    }

    proptest! {
        #[test]
        fn round_trip_reproduces_any_ocean(ocean in ocean_strategy()) {
            let list = RunList::from_ocean(&ocean);
            prop_assert_eq!(list.check(), Ok(()));
            prop_assert_eq!(list.to_ocean(), ocean);
        }

        #[test]
        fn invariants_hold_after_random_edits(
            ocean in ocean_strategy(),
            edits in proptest::collection::vec(
                (0usize..12, 0usize..12, 0u8..3, 0u32..4),
                0..24,
            ),
        ) {
            let mut list = RunList::from_ocean(&ocean);
            let mut mirror = ocean;
            for (x, y, kind, hunger) in edits {
                if x >= mirror.width() || y >= mirror.height() {
                    let out_of_bounds = matches!(
                        list.add_fish(x, y),
                        Err(OceanError::OutOfBounds { .. })
                    );
                    prop_assert!(out_of_bounds);
                    continue;
                }
                match kind {
                    0 => {
                        list.add_fish(x, y).unwrap();
                        mirror.add_fish(x, y).unwrap();
                    }
                    1 => {
                        list.add_shark(x, y).unwrap();
                        mirror.add_shark(x, y).unwrap();
                    }
                    _ => {
                        list.add_shark_with_hunger(x, y, hunger).unwrap();
                        mirror.add_shark_with_hunger(x, y, hunger).unwrap();
                    }
                }
                prop_assert_eq!(list.check(), Ok(()));
            }
            prop_assert_eq!(list.to_ocean(), mirror);
        }
    }
}
