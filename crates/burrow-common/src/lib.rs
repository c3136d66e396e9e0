//! # Burrow Common
//!
//! Shared types for the Burrow world engine:
//! - Coordinate types (pixel, tile, chunk, tile rectangles)
//! - Error taxonomy
//! - Prelude for convenient imports

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod coords;
pub mod error;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::coords::*;
    pub use crate::error::*;
}

pub use prelude::*;
