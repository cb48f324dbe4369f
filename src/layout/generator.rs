//! Randomized construction of balanced slicing trees

use crate::io::error::{Result, inconsistency, invalid_input};
use crate::layout::tree::{NodeId, SplitOrientation, TileTree};
use rand::Rng;
use rand::seq::SliceRandom;
use rand::seq::index::sample;

/// Number of levels in the complete tree built before the extra splits
///
/// This is the bit length of `count`: `2^(k-1) <= count < 2^k`.
pub const fn level_count(count: usize) -> u32 {
    usize::BITS - count.leading_zeros()
}

/// Build a random full binary tree with one leaf per aspect ratio
///
/// A complete tree with `2^(k-1)` leaves is grown breadth-first, then
/// `count - 2^(k-1)` of its leaves, drawn uniformly without replacement, are
/// split once more. Images are dealt to the leaves in a uniformly shuffled
/// order and every internal node gets an independent fair-coin orientation.
///
/// # Errors
///
/// Returns an error if `aspect_ratios` is empty
pub fn generate_tree<R: Rng + ?Sized>(aspect_ratios: &[f64], rng: &mut R) -> Result<TileTree> {
    let count = aspect_ratios.len();
    if count == 0 {
        return Err(invalid_input(
            "images",
            &count,
            &"at least one image is required",
        ));
    }

    let levels = level_count(count);
    let mut tree = TileTree::new();
    let mut frontier = vec![tree.root()];

    for _ in 1..levels {
        let mut next = Vec::with_capacity(frontier.len() * 2);
        for &id in &frontier {
            let (left, right) = tree.split_leaf(id)?;
            next.push(left);
            next.push(right);
        }
        frontier = next;
    }

    let excess = count - frontier.len();
    for position in sample(rng, frontier.len(), excess) {
        let id = frontier.get(position).copied().ok_or_else(|| {
            inconsistency("generate tree", &format!("sampled leaf {position} out of range"))
        })?;
        tree.split_leaf(id)?;
    }

    assign_images(&mut tree, aspect_ratios, rng)?;
    assign_orientations(&mut tree, rng)?;

    Ok(tree)
}

// Deals a shuffled permutation of image indices onto the leaves
fn assign_images<R: Rng + ?Sized>(
    tree: &mut TileTree,
    aspect_ratios: &[f64],
    rng: &mut R,
) -> Result<()> {
    let leaves = tree.leaves();
    if leaves.len() != aspect_ratios.len() {
        return Err(inconsistency(
            "assign images",
            &format!(
                "{} leaves for {} images",
                leaves.len(),
                aspect_ratios.len()
            ),
        ));
    }

    let mut order: Vec<usize> = (0..aspect_ratios.len()).collect();
    order.shuffle(rng);

    for (leaf, image_index) in leaves.into_iter().zip(order) {
        let aspect = aspect_ratios.get(image_index).copied().ok_or_else(|| {
            inconsistency("assign images", &format!("no image {image_index}"))
        })?;
        let node = tree.node_mut(leaf)?;
        node.image_index = Some(image_index);
        node.aspect_actual = aspect;
    }
    Ok(())
}

fn assign_orientations<R: Rng + ?Sized>(tree: &mut TileTree, rng: &mut R) -> Result<()> {
    let internal: Vec<NodeId> = tree
        .nodes()
        .filter(|(_, node)| !node.is_leaf())
        .map(|(id, _)| id)
        .collect();

    for id in internal {
        tree.node_mut(id)?.split = Some(random_orientation(rng));
    }
    Ok(())
}

/// Fair coin between the two split orientations
pub fn random_orientation<R: Rng + ?Sized>(rng: &mut R) -> SplitOrientation {
    if rng.random_bool(0.5) {
        SplitOrientation::Vertical
    } else {
        SplitOrientation::Horizontal
    }
}
