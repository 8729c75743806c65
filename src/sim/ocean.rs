//! Dense toroidal ocean grid and its per-generation transition rules.

use std::fmt;

use log::trace;
use rayon::prelude::*;

use crate::error::OceanError;
use crate::schema::{Cell, OceanConfig, Species};

/// Dense toroidal grid of [`Cell`]s in row-major order.
///
/// Cell (x, y) lives at linear index `x + y * width`. Coordinates passed to
/// the public API never wrap; only neighbor lookup inside [`time_step`]
/// treats the grid as a torus.
///
/// [`time_step`]: Ocean::time_step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ocean {
    cells: Vec<Cell>,
    width: usize,
    height: usize,
    starve_time: u32,
}

impl Ocean {
    /// Create an all-empty ocean.
    pub fn new(config: &OceanConfig) -> Result<Self, OceanError> {
        config.validate()?;
        Ok(Self::all_empty(config.width, config.height, config.starve_time))
    }

    /// All-empty ocean from already-validated dimensions.
    pub(crate) fn all_empty(width: usize, height: usize, starve_time: u32) -> Self {
        Self {
            cells: vec![Cell::Empty; width * height],
            width,
            height,
            starve_time,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn starve_time(&self) -> u32 {
        self.starve_time
    }

    /// The configuration this ocean was built from.
    pub fn config(&self) -> OceanConfig {
        OceanConfig {
            width: self.width,
            height: self.height,
            starve_time: self.starve_time,
        }
    }

    fn index(&self, x: usize, y: usize) -> Result<usize, OceanError> {
        if x >= self.width || y >= self.height {
            return Err(OceanError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(x + y * self.width)
    }

    /// Full cell state at (x, y), including shark hunger.
    pub fn cell(&self, x: usize, y: usize) -> Result<Cell, OceanError> {
        Ok(self.cells[self.index(x, y)?])
    }

    /// Species occupying cell (x, y).
    pub fn cell_contents(&self, x: usize, y: usize) -> Result<Species, OceanError> {
        Ok(self.cell(x, y)?.species())
    }

    /// Hunger of the shark at (x, y), or `None` if the cell holds no shark.
    pub fn shark_hunger(&self, x: usize, y: usize) -> Result<Option<u32>, OceanError> {
        match self.cell(x, y)? {
            Cell::Shark { hunger } => Ok(Some(hunger)),
            _ => Ok(None),
        }
    }

    /// Place a fish in cell (x, y) if it is empty. An occupied cell is left
    /// as it is; this is not an error.
    pub fn add_fish(&mut self, x: usize, y: usize) -> Result<(), OceanError> {
        self.place(x, y, Cell::Fish)
    }

    /// Place a newborn shark (hunger = starve time) in cell (x, y) if it is
    /// empty. An occupied cell is left as it is.
    pub fn add_shark(&mut self, x: usize, y: usize) -> Result<(), OceanError> {
        self.place(x, y, Cell::Shark {
            hunger: self.starve_time,
        })
    }

    /// Place a shark with explicit hunger, used when reconstructing an ocean
    /// from an encoding that stores hunger per run.
    pub fn add_shark_with_hunger(
        &mut self,
        x: usize,
        y: usize,
        hunger: u32,
    ) -> Result<(), OceanError> {
        self.place(x, y, Cell::Shark { hunger })
    }

    fn place(&mut self, x: usize, y: usize, cell: Cell) -> Result<(), OceanError> {
        let idx = self.index(x, y)?;
        if self.cells[idx].is_empty() {
            self.cells[idx] = cell;
        } else {
            trace!(
                "cell ({x}, {y}) already holds {:?}, leaving it",
                self.cells[idx]
            );
        }
        Ok(())
    }

    #[inline]
    pub(crate) fn cell_at(&self, idx: usize) -> Cell {
        self.cells[idx]
    }

    #[inline]
    pub(crate) fn set_cell_at(&mut self, idx: usize, cell: Cell) {
        self.cells[idx] = cell;
    }

    /// Count fish and sharks among the 8 toroidal neighbors of (x, y).
    fn neighbor_counts(&self, x: usize, y: usize) -> (u32, u32) {
        let mut fish = 0;
        let mut sharks = 0;
        for dy in -1i64..=1 {
            for dx in -1i64..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let nx = (x as i64 + dx).rem_euclid(self.width as i64) as usize;
                let ny = (y as i64 + dy).rem_euclid(self.height as i64) as usize;
                match self.cells[nx + ny * self.width] {
                    Cell::Fish => fish += 1,
                    Cell::Shark { .. } => sharks += 1,
                    Cell::Empty => {}
                }
            }
        }
        (fish, sharks)
    }

    /// Next state of cell (x, y) from the current snapshot.
    ///
    /// - Empty: two or more fish neighbors spawn a fish, unless two or more
    ///   shark neighbors are also present, which spawn a newborn shark.
    /// - Fish: exactly one shark neighbor eats it; two or more replace it
    ///   with a newborn shark; with none it survives.
    /// - Shark: any fish neighbor feeds it (hunger back to full before the
    ///   countdown); its hunger then ticks down, and a tick past zero
    ///   starves it.
    fn step_cell(&self, x: usize, y: usize) -> Cell {
        let (fish, sharks) = self.neighbor_counts(x, y);
        match self.cells[x + y * self.width] {
            Cell::Empty => {
                if fish < 2 {
                    Cell::Empty
                } else if sharks < 2 {
                    Cell::Fish
                } else {
                    Cell::Shark {
                        hunger: self.starve_time,
                    }
                }
            }
            Cell::Fish => match sharks {
                0 => Cell::Fish,
                1 => Cell::Empty,
                _ => Cell::Shark {
                    hunger: self.starve_time,
                },
            },
            Cell::Shark { hunger } => {
                let hunger = if fish > 0 {
                    self.starve_time + 1
                } else {
                    hunger
                };
                if hunger == 0 {
                    Cell::Empty
                } else {
                    Cell::Shark { hunger: hunger - 1 }
                }
            }
        }
    }

    /// Compute one generation, returning a new ocean.
    ///
    /// Every output cell depends only on the previous snapshot, so rows are
    /// computed in parallel into the fresh grid.
    pub fn time_step(&self) -> Ocean {
        let mut next = vec![Cell::Empty; self.cells.len()];
        next.par_chunks_mut(self.width)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, out) in row.iter_mut().enumerate() {
                    *out = self.step_cell(x, y);
                }
            });
        Ocean {
            cells: next,
            width: self.width,
            height: self.height,
            starve_time: self.starve_time,
        }
    }
}

impl fmt::Display for Ocean {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for _ in 0..self.width + 2 {
            write!(f, "_")?;
        }
        writeln!(f)?;
        for y in 0..self.height {
            write!(f, "|")?;
            for x in 0..self.width {
                write!(f, "{}", self.cells[x + y * self.width].glyph())?;
            }
            writeln!(f, "|")?;
        }
        for _ in 0..self.width + 2 {
            write!(f, "_")?;
        }
        Ok(())
    }
}
