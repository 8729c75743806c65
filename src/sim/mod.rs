//! Simulation module - dense ocean grid and its run-length encoding.

mod codec;
mod ocean;
mod rle;

pub use ocean::*;
pub use rle::*;
