//! Run-length encoding of an ocean grid.
//!
//! The encoding is an ordered sequence of maximal homogeneous runs covering
//! the row-major flattening of the grid. It is stored as an index-addressed
//! arena: a `Vec` of nodes carrying explicit `prev`/`next` slot indices,
//! bounded by two sentinel slots that never hold data. Freed slots are
//! recycled through a free list, so local splices stay O(1) without any
//! cyclic ownership between nodes.
//!
//! Three invariants hold after every public mutation:
//!
//! - runs tile the grid exactly (lengths sum to `width * height`),
//! - no two adjacent runs hold equal cells (maximal compaction),
//! - every run has length >= 1.
//!
//! [`RunList::check`] verifies all three and is the authority on what
//! "corrupt" means here.

use log::trace;

use crate::error::OceanError;
use crate::schema::{Cell, OceanConfig, Species};

/// Arena slot of the head sentinel (before the first run).
const HEAD: usize = 0;
/// Arena slot of the tail sentinel (after the last run).
const TAIL: usize = 1;
/// Null slot index for the sentinels' outward links.
const NIL: usize = usize::MAX;

/// One maximal span of identical cells in the linear flattening.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub cell: Cell,
    pub len: usize,
}

#[derive(Debug, Clone, Copy)]
struct Node {
    run: Run,
    prev: usize,
    next: usize,
}

/// Placeholder payload for sentinel slots; never read.
const SENTINEL_RUN: Run = Run {
    cell: Cell::Empty,
    len: 0,
};

/// Run-length encoded ocean supporting compacted point edits.
///
/// Created empty, from explicit runs, or by compressing an
/// [`Ocean`](crate::Ocean) snapshot (see `sim::codec`). `add_fish` and
/// `add_shark` edit single cells directly on the encoding, splitting the
/// containing run and re-merging neighbors so the encoding stays maximally
/// compacted without a full decompression.
#[derive(Debug, Clone)]
pub struct RunList {
    nodes: Vec<Node>,
    /// Recycled arena slots.
    free: Vec<usize>,
    width: usize,
    height: usize,
    starve_time: u32,
    /// Enumeration cursor for `restart_runs` / `next_run`. Any mutation
    /// resets it to the first run; an enumeration pass must not be
    /// interleaved with mutation.
    cursor: usize,
}

impl RunList {
    /// Encoding of an all-empty ocean: one run covering the whole grid.
    pub fn new(config: &OceanConfig) -> Result<Self, OceanError> {
        config.validate()?;
        let mut list = Self::bare(config.width, config.height, config.starve_time);
        list.append(Run {
            cell: Cell::Empty,
            len: config.grid_size(),
        });
        list.restart_runs();
        Ok(list)
    }

    /// Encoding built from explicit `(species, length)` runs.
    ///
    /// Shark runs are treated as newborn sharks (hunger = starve time);
    /// there is no way to construct an already-hungry shark run through this
    /// path. Zero-length entries are skipped and adjacent duplicates
    /// coalesced, so the result is compacted regardless of input shape. The
    /// lengths must sum to exactly `width * height`.
    pub fn from_runs(
        config: &OceanConfig,
        runs: &[(Species, usize)],
    ) -> Result<Self, OceanError> {
        config.validate()?;
        let mut list = Self::bare(config.width, config.height, config.starve_time);
        let mut total = 0usize;
        for &(species, len) in runs {
            if len == 0 {
                continue;
            }
            total += len;
            let cell = match species {
                Species::Empty => Cell::Empty,
                Species::Fish => Cell::Fish,
                Species::Shark => Cell::Shark {
                    hunger: config.starve_time,
                },
            };
            list.append(Run { cell, len });
        }
        if total != config.grid_size() {
            return Err(OceanError::RunSumMismatch {
                expected: config.grid_size(),
                actual: total,
            });
        }
        list.restart_runs();
        debug_assert_eq!(list.check(), Ok(()));
        Ok(list)
    }

    /// Arena holding only the two sentinels.
    pub(crate) fn bare(width: usize, height: usize, starve_time: u32) -> Self {
        let nodes = vec![
            Node {
                run: SENTINEL_RUN,
                prev: NIL,
                next: TAIL,
            },
            Node {
                run: SENTINEL_RUN,
                prev: HEAD,
                next: NIL,
            },
        ];
        Self {
            nodes,
            free: Vec::new(),
            width,
            height,
            starve_time,
            cursor: TAIL,
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

    // ----- arena splice primitives -----

    /// Slot of the first real run, or `TAIL` if the list is empty.
    fn first(&self) -> usize {
        self.nodes[HEAD].next
    }

    /// Slot of the last real run, or `HEAD` if the list is empty.
    fn last(&self) -> usize {
        self.nodes[TAIL].prev
    }

    fn alloc(&mut self, node: Node) -> usize {
        if let Some(slot) = self.free.pop() {
            self.nodes[slot] = node;
            slot
        } else {
            self.nodes.push(node);
            self.nodes.len() - 1
        }
    }

    /// Link `run` directly after `at` with no structural checks.
    fn splice_after(&mut self, at: usize, run: Run) -> usize {
        let next = self.nodes[at].next;
        let slot = self.alloc(Node {
            run,
            prev: at,
            next,
        });
        self.nodes[at].next = slot;
        self.nodes[next].prev = slot;
        slot
    }

    /// Unlink the node at `at` and recycle its slot. Callers must not pass
    /// a sentinel slot.
    fn unlink(&mut self, at: usize) -> Run {
        debug_assert!(at != HEAD && at != TAIL);
        let Node { run, prev, next } = self.nodes[at];
        self.nodes[prev].next = next;
        self.nodes[next].prev = prev;
        self.free.push(at);
        run
    }

    /// Insert `run` after the node at `at`. Inserting after the tail
    /// sentinel is structurally invalid.
    fn insert_after(&mut self, at: usize, run: Run) -> Result<usize, OceanError> {
        if at == TAIL {
            return Err(OceanError::InvalidSplice);
        }
        Ok(self.splice_after(at, run))
    }

    /// Insert `run` before the node at `at`. Inserting before the head
    /// sentinel is structurally invalid.
    fn insert_before(&mut self, at: usize, run: Run) -> Result<usize, OceanError> {
        if at == HEAD {
            return Err(OceanError::InvalidSplice);
        }
        Ok(self.splice_after(self.nodes[at].prev, run))
    }

    /// Remove the node at `at`, returning its run. Sentinels cannot be
    /// removed.
    fn remove(&mut self, at: usize) -> Result<Run, OceanError> {
        if at == HEAD || at == TAIL {
            return Err(OceanError::InvalidSplice);
        }
        Ok(self.unlink(at))
    }

    /// Append a run at the end, coalescing with the last run when equal.
    /// Used by the constructors and the grid encoder, which produce runs in
    /// linear order.
    pub(crate) fn append(&mut self, run: Run) {
        let last = self.last();
        if last != HEAD && self.nodes[last].run.cell == run.cell {
            self.nodes[last].run.len += run.len;
        } else {
            self.splice_after(last, run);
        }
    }

    // ----- enumeration -----

    /// Reset the enumeration so [`next_run`](Self::next_run) starts again
    /// from the run containing cell (0, 0).
    pub fn restart_runs(&mut self) {
        self.cursor = self.first();
    }

    /// The next `(species, length)` run, or `None` once every run has been
    /// returned.
    pub fn next_run(&mut self) -> Option<(Species, usize)> {
        if self.cursor == TAIL {
            return None;
        }
        let node = self.nodes[self.cursor];
        self.cursor = node.next;
        Some((node.run.cell.species(), node.run.len))
    }

    /// Iterator over the full runs (including shark hunger) in linear
    /// order. Unlike the cursor enumeration this borrows the list, so it
    /// cannot be interleaved with mutation at all.
    pub fn runs(&self) -> Runs<'_> {
        Runs {
            list: self,
            at: self.first(),
        }
    }

    /// Number of runs in the encoding.
    pub fn run_count(&self) -> usize {
        self.runs().count()
    }

    // ----- point edits -----

    /// Place a fish in cell (x, y) if it is empty. An occupied cell is left
    /// as it is; this is not an error.
    pub fn add_fish(&mut self, x: usize, y: usize) -> Result<(), OceanError> {
        self.insert_cell(x, y, Cell::Fish)
    }

    /// Place a newborn shark (hunger = starve time) in cell (x, y) if it is
    /// empty. An occupied cell is left as it is.
    pub fn add_shark(&mut self, x: usize, y: usize) -> Result<(), OceanError> {
        let hunger = self.starve_time;
        self.insert_cell(x, y, Cell::Shark { hunger })
    }

    /// Place a shark with explicit hunger, used when reconstructing an
    /// encoding from a source that stores hunger explicitly.
    pub fn add_shark_with_hunger(
        &mut self,
        x: usize,
        y: usize,
        hunger: u32,
    ) -> Result<(), OceanError> {
        self.insert_cell(x, y, Cell::Shark { hunger })
    }

    fn linear_index(&self, x: usize, y: usize) -> Result<usize, OceanError> {
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

    /// Slot of the run containing linear index `target`, plus the linear
    /// index of that run's first cell. Coverage of every valid index is
    /// guaranteed by the total-length invariant.
    fn locate(&self, target: usize) -> (usize, usize) {
        let mut offset = 0;
        let mut at = self.first();
        while at != TAIL {
            let len = self.nodes[at].run.len;
            if target < offset + len {
                return (at, offset);
            }
            offset += len;
            at = self.nodes[at].next;
        }
        unreachable!("encoding does not cover linear index {target}");
    }

    /// Core point edit: split the empty run containing (x, y) around a new
    /// singleton run of `cell`, then merge outward until compacted.
    fn insert_cell(&mut self, x: usize, y: usize, cell: Cell) -> Result<(), OceanError> {
        let target = self.linear_index(x, y)?;
        let (slot, offset) = self.locate(target);
        let run = self.nodes[slot].run;
        if !run.cell.is_empty() {
            trace!("cell ({x}, {y}) already holds {:?}, leaving it", run.cell);
            return Ok(());
        }

        trace!(
            "inserting {cell:?} at ({x}, {y}) into empty run of {} at offset {offset}",
            run.len
        );

        // Replace the empty run with prefix / singleton / suffix, dropping
        // the zero-length pieces of a split at either end of the run.
        let before = target - offset;
        let after = run.len - before - 1;
        let anchor = self.nodes[slot].next;
        self.remove(slot)?;
        if before > 0 {
            self.insert_before(anchor, Run {
                cell: Cell::Empty,
                len: before,
            })?;
        }
        let inserted = self.insert_before(anchor, Run { cell, len: 1 })?;
        if after > 0 {
            self.insert_after(inserted, Run {
                cell: Cell::Empty,
                len: after,
            })?;
        }

        self.coalesce_around(inserted);
        self.restart_runs();
        debug_assert_eq!(self.check(), Ok(()));
        Ok(())
    }

    /// Merge runs of equal cells outward from `slot` until no adjacent pair
    /// is equal at either boundary.
    fn coalesce_around(&mut self, slot: usize) {
        let mut slot = slot;
        loop {
            let prev = self.nodes[slot].prev;
            if prev == HEAD || self.nodes[prev].run.cell != self.nodes[slot].run.cell {
                break;
            }
            self.nodes[prev].run.len += self.nodes[slot].run.len;
            self.unlink(slot);
            slot = prev;
        }
        loop {
            let next = self.nodes[slot].next;
            if next == TAIL || self.nodes[next].run.cell != self.nodes[slot].run.cell {
                break;
            }
            let merged = self.nodes[next].run.len;
            self.nodes[slot].run.len += merged;
            self.unlink(next);
        }
    }

    // ----- validation -----

    /// Walk the whole encoding once and verify its invariants.
    ///
    /// Pure and safe to call at any time. Reports the first violation
    /// found: a zero-length run, an adjacent pair of equal runs, or a total
    /// length different from `width * height`, each with enough detail to
    /// diagnose without re-walking the structure.
    pub fn check(&self) -> Result<(), OceanError> {
        let mut total = 0usize;
        let mut position = 0usize;
        let mut prev: Option<Run> = None;
        let mut at = self.first();
        while at != TAIL {
            let run = self.nodes[at].run;
            if run.len == 0 {
                return Err(OceanError::CorruptEmptyRun {
                    position,
                    cell: run.cell,
                });
            }
            if let Some(left) = prev {
                if left.cell == run.cell {
                    return Err(OceanError::CorruptAdjacentRuns {
                        position: position - 1,
                        cell: run.cell,
                        left_len: left.len,
                        right_len: run.len,
                    });
                }
            }
            total += run.len;
            prev = Some(run);
            position += 1;
            at = self.nodes[at].next;
        }
        let expected = self.width * self.height;
        if total != expected {
            return Err(OceanError::CorruptTotalLength {
                expected,
                actual: total,
            });
        }
        Ok(())
    }
}

/// Borrowing iterator over the runs of a [`RunList`] in linear order.
pub struct Runs<'a> {
    list: &'a RunList,
    at: usize,
}

impl Iterator for Runs<'_> {
    type Item = Run;

    fn next(&mut self) -> Option<Run> {
        if self.at == TAIL {
            return None;
        }
        let node = self.list.nodes[self.at];
        self.at = node.next;
        Some(node.run)
    }
}
