//! Bottom-up aspect ratio derivation for slicing trees

use crate::io::error::{Result, inconsistency};
use crate::layout::tree::{SplitOrientation, TileTree};

/// Aspect ratio of two regions joined along `split`
///
/// Side by side regions share a height, so their aspects add. Stacked regions
/// share a width, so their heights `1/a` add and the result is
/// `a * b / (a + b)`.
pub fn combine(split: SplitOrientation, left: f64, right: f64) -> f64 {
    match split {
        SplitOrientation::Vertical => left + right,
        SplitOrientation::Horizontal => (left * right) / (left + right),
    }
}

/// Recompute `aspect_actual` for every internal node and return the root's
///
/// Leaves keep the aspect of their assigned image. Running this twice on the
/// same tree yields the same result.
///
/// # Errors
///
/// Returns an error if a leaf has no image or an internal node has no
/// orientation
pub fn calculate_aspect(tree: &mut TileTree) -> Result<f64> {
    // Children always sit at higher indices than their parent
    for id in tree.ids().rev() {
        let node = tree.node(id)?;
        let Some((left, right)) = node.children else {
            if node.image_index.is_none() {
                return Err(inconsistency(
                    "aspect calculation",
                    &format!("leaf {} has no image", id.index()),
                ));
            }
            continue;
        };
        let split = node.split.ok_or_else(|| {
            inconsistency(
                "aspect calculation",
                &format!("internal node {} has no orientation", id.index()),
            )
        })?;

        let aspect = combine(
            split,
            tree.node(left)?.aspect_actual,
            tree.node(right)?.aspect_actual,
        );
        tree.node_mut(id)?.aspect_actual = aspect;
    }

    Ok(tree.root_aspect())
}
