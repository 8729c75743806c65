//! Schema module - Cell types and ocean configuration.

mod cell;
mod config;

pub use cell::*;
pub use config::*;
