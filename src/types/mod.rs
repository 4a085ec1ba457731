//! Type definitions for gridcal

mod error;
mod grid;

pub use error::*;
pub use grid::*;
