/// Bottom-up aspect ratio derivation
pub mod aspect;
/// Layout sessions and the public call surface
pub mod engine;
/// Random tree construction
pub mod generator;
/// Top-down rectangle resolution
pub mod position;
/// Tolerance-band rejection sampling
pub mod search;
/// Slicing tree arena and geometry types
pub mod tree;

pub use engine::{CanvasDimension, CollageLayout, ImageRecord, LayoutConfig, LayoutEngine, Tile};
pub use search::AspectTarget;
pub use tree::{ChildSide, NodeId, Rect, SplitOrientation, TileNode, TileTree};
