//! Arena-backed slicing tree describing how the canvas is cut into tiles
//!
//! Nodes live in a flat vector and refer to their children by [`NodeId`].
//! There are no parent links: traversals that need the parent carry it
//! themselves. Children are always allocated after their parent, so index
//! order is a valid pre-order for positioning and reverse index order a valid
//! post-order for aspect calculation.

use crate::io::error::{Result, inconsistency};

/// Index of a node inside its [`TileTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in the arena
    pub const fn index(self) -> usize {
        self.0
    }
}

/// How an internal node divides its region between its two children
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SplitOrientation {
    /// Children sit side by side and share the parent's height
    Vertical,
    /// Children are stacked and share the parent's width
    Horizontal,
}

/// Which slot of its parent a node occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChildSide {
    /// First child: left part of a vertical split, top part of a horizontal one
    Left,
    /// Second child: fills whatever the left sibling leaves over
    Right,
}

/// Axis-aligned rectangle in canvas coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge
    pub x: f64,
    /// Top edge
    pub y: f64,
    /// Horizontal extent
    pub width: f64,
    /// Vertical extent
    pub height: f64,
}

impl Rect {
    /// Rectangle from its top-left corner and size
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Covered area
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Width divided by height
    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }

    /// Area shared with `other`, zero when they only touch or are disjoint
    pub fn intersection_area(&self, other: &Self) -> f64 {
        let overlap_w = self.right().min(other.right()) - self.x.max(other.x);
        let overlap_h = self.bottom().min(other.bottom()) - self.y.max(other.y);
        if overlap_w > 0.0 && overlap_h > 0.0 {
            overlap_w * overlap_h
        } else {
            0.0
        }
    }
}

/// One region of the canvas
#[derive(Debug, Clone, PartialEq)]
pub struct TileNode {
    /// Slot in the parent, `None` for the root
    pub side: Option<ChildSide>,
    /// Cut direction; set on every internal node before aspect calculation
    pub split: Option<SplitOrientation>,
    /// Left and right child, `None` for leaves
    pub children: Option<(NodeId, NodeId)>,
    /// Image shown in this tile, leaves only
    pub image_index: Option<usize>,
    /// Requested aspect ratio, carried by the root of a constrained search
    pub aspect_expected: Option<f64>,
    /// Image aspect for leaves, derived from the children for internal nodes
    pub aspect_actual: f64,
    /// Region on the canvas once positions are resolved
    pub rect: Option<Rect>,
}

impl TileNode {
    const fn new(side: Option<ChildSide>) -> Self {
        Self {
            side,
            split: None,
            children: None,
            image_index: None,
            aspect_expected: None,
            aspect_actual: 0.0,
            rect: None,
        }
    }

    /// Whether this node is terminal
    pub const fn is_leaf(&self) -> bool {
        self.children.is_none()
    }
}

/// Full binary tree whose leaves map one-to-one onto input images
#[derive(Debug, Clone, PartialEq)]
pub struct TileTree {
    nodes: Vec<TileNode>,
}

impl Default for TileTree {
    fn default() -> Self {
        Self::new()
    }
}

impl TileTree {
    /// Tree consisting of a single leaf root
    pub fn new() -> Self {
        Self {
            nodes: vec![TileNode::new(None)],
        }
    }

    /// The root node id
    pub const fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Total number of nodes
    pub const fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a tree has at least its root
    pub const fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up a node
    ///
    /// # Errors
    ///
    /// Returns an error if `id` does not belong to this tree
    pub fn node(&self, id: NodeId) -> Result<&TileNode> {
        self.nodes
            .get(id.0)
            .ok_or_else(|| inconsistency("node lookup", &format!("no node {}", id.0)))
    }

    /// Look up a node for modification
    ///
    /// # Errors
    ///
    /// Returns an error if `id` does not belong to this tree
    pub fn node_mut(&mut self, id: NodeId) -> Result<&mut TileNode> {
        let count = self.nodes.len();
        self.nodes.get_mut(id.0).ok_or_else(|| {
            inconsistency(
                "node lookup",
                &format!("no node {} in tree of {count}", id.0),
            )
        })
    }

    /// Iterate over all node ids in allocation order (parents before children)
    pub fn ids(&self) -> impl DoubleEndedIterator<Item = NodeId> + use<> {
        (0..self.nodes.len()).map(NodeId)
    }

    /// Iterate over all nodes in allocation order
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &TileNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (NodeId(index), node))
    }

    /// Turn a leaf into an internal node with two fresh leaf children
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is unknown or already has children
    pub fn split_leaf(&mut self, id: NodeId) -> Result<(NodeId, NodeId)> {
        let left = NodeId(self.nodes.len());
        let right = NodeId(self.nodes.len() + 1);
        let node = self.node_mut(id)?;
        if !node.is_leaf() {
            return Err(inconsistency(
                "split leaf",
                &format!("node {} is already internal", id.0),
            ));
        }
        node.children = Some((left, right));
        self.nodes.push(TileNode::new(Some(ChildSide::Left)));
        self.nodes.push(TileNode::new(Some(ChildSide::Right)));
        Ok((left, right))
    }

    /// Leaf ids in depth-first, left-to-right order
    pub fn leaves(&self) -> Vec<NodeId> {
        let mut leaves = Vec::with_capacity(self.nodes.len() / 2 + 1);
        let mut stack = vec![self.root()];
        while let Some(id) = stack.pop() {
            match self.nodes.get(id.0).and_then(|node| node.children) {
                Some((left, right)) => {
                    stack.push(right);
                    stack.push(left);
                }
                None => leaves.push(id),
            }
        }
        leaves
    }

    /// Number of leaves
    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|node| node.is_leaf()).count()
    }

    /// Number of internal nodes
    pub fn internal_count(&self) -> usize {
        self.nodes.len() - self.leaf_count()
    }

    /// Aspect ratio of the whole tree, valid after aspect calculation
    pub fn root_aspect(&self) -> f64 {
        self.nodes.first().map_or(0.0, |root| root.aspect_actual)
    }
}
