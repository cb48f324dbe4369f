//! Photo collages built from random slicing trees
//!
//! Images are placed on the leaves of a randomly generated full binary tree
//! whose internal nodes cut their region vertically or horizontally. The
//! canvas aspect ratio follows analytically from the leaf aspects and the
//! cuts, so trees are regenerated until it falls inside a requested band,
//! then the accepted tree is turned into gap-free tile rectangles.

#![forbid(unsafe_code)]

/// Input/output collaborators, configuration and error handling
pub mod io;
/// Tree generation, aspect search and tile positioning
pub mod layout;

pub use io::error::{CollageError, Result};
pub use layout::{
    AspectTarget, CanvasDimension, CollageLayout, ImageRecord, LayoutConfig, LayoutEngine, Rect,
    Tile,
};
