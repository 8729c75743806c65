//! Wa-Tor style predator/prey cellular automaton with a run-length encoded
//! grid representation.
//!
//! The ocean is a toroidal 2D grid of cells, each empty, holding a fish, or
//! holding a shark with a hunger countdown. Alongside the dense grid this
//! crate maintains a compressed run-length view of the same ocean that
//! supports point edits (placing a fish or shark) without decompressing,
//! keeping the encoding maximally compacted after every mutation.
//!
//! # Architecture
//!
//! The crate is split into two main modules:
//!
//! - `schema`: Cell/species types and ocean configuration
//! - `sim`: The dense [`Ocean`] grid, the [`RunList`] encoding, and the
//!   conversions between them
//!
//! # Example
//!
//! ```rust
//! use wator::{Ocean, OceanConfig, RunList, Species};
//!
//! let config = OceanConfig {
//!     width: 8,
//!     height: 8,
//!     starve_time: 3,
//! };
//!
//! let mut ocean = Ocean::new(&config).unwrap();
//! ocean.add_fish(1, 1).unwrap();
//! ocean.add_shark(4, 4).unwrap();
//!
//! // Compress, edit the encoding directly, and expand back.
//! let mut encoding = RunList::from_ocean(&ocean);
//! encoding.add_fish(2, 1).unwrap();
//! encoding.check().unwrap();
//!
//! let ocean = encoding.to_ocean();
//! assert_eq!(ocean.cell_contents(2, 1).unwrap(), Species::Fish);
//!
//! // Advance the simulation one generation.
//! let next = ocean.time_step();
//! assert_eq!(next.width(), 8);
//! ```

pub mod error;
pub mod schema;
pub mod sim;

// Re-export commonly used types
pub use error::OceanError;
pub use schema::{Cell, OceanConfig, Species};
pub use sim::{Ocean, Run, RunList};
