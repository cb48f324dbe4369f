//! Top-down conversion of a slicing tree into canvas rectangles

use crate::io::error::{Result, inconsistency};
use crate::layout::tree::{Rect, SplitOrientation, TileTree};

/// Assign a rectangle to every node, starting from `canvas` at the root
///
/// The left child is sized from its own aspect ratio and anchored at the
/// parent's origin. The right child takes exactly the remainder, aligned to
/// the far edge, so siblings never leave a gap or overlap whatever rounding
/// the left size picked up.
///
/// # Errors
///
/// Returns an error if an internal node has no orientation or is reached
/// before its own rectangle is known
pub fn resolve_positions(tree: &mut TileTree, canvas: Rect) -> Result<()> {
    let root = tree.root();
    tree.node_mut(root)?.rect = Some(canvas);

    // Parents always sit at lower indices than their children
    for id in tree.ids() {
        let node = tree.node(id)?;
        let Some((left, right)) = node.children else {
            continue;
        };
        let split = node.split.ok_or_else(|| {
            inconsistency(
                "position resolution",
                &format!("internal node {} has no orientation", id.index()),
            )
        })?;
        let parent = node.rect.ok_or_else(|| {
            inconsistency(
                "position resolution",
                &format!("node {} reached before its rectangle", id.index()),
            )
        })?;

        let (left_rect, right_rect) = split_rect(parent, split, tree.node(left)?.aspect_actual);
        tree.node_mut(left)?.rect = Some(left_rect);
        tree.node_mut(right)?.rect = Some(right_rect);
    }

    Ok(())
}

/// Divide `parent` along `split`, sizing the left part from `left_aspect`
pub fn split_rect(parent: Rect, split: SplitOrientation, left_aspect: f64) -> (Rect, Rect) {
    match split {
        SplitOrientation::Vertical => {
            let left_width = parent.height * left_aspect;
            let right_width = parent.width - left_width;
            (
                Rect::new(parent.x, parent.y, left_width, parent.height),
                Rect::new(
                    parent.x + parent.width - right_width,
                    parent.y,
                    right_width,
                    parent.height,
                ),
            )
        }
        SplitOrientation::Horizontal => {
            let left_height = parent.width / left_aspect;
            let right_height = parent.height - left_height;
            (
                Rect::new(parent.x, parent.y, parent.width, left_height),
                Rect::new(
                    parent.x,
                    parent.y + parent.height - right_height,
                    parent.width,
                    right_height,
                ),
            )
        }
    }
}
