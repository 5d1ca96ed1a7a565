//! Binary tree layout for the genealogy view.
//!
//! Converts the visible part of a [`GenealogyTree`] into top-left anchored
//! pixel positions. Two pieces share one child rule:
//!
//! - [`width`]: how many horizontal pixels a subtree needs at a given depth.
//! - [`binary_tree`]: walks the tree once, centering every node over the span
//!   its children reserve.
//!
//! A node with exactly one visible child gets a [`TreeSlot::Placeholder`] on the
//! missing side so single-child subtrees still occupy symmetric space.

pub mod binary_tree;
pub mod width;

pub use binary_tree::BinaryTreeLayout;
pub use width::{WidthCache, estimate_width};

use serde::{Deserialize, Serialize};

use crate::tree::{GenealogyTree, MemberId};

/// Text drawn inside a placeholder box.
pub const PLACEHOLDER_LABEL: &str = "No Child";

/// Sizing constants and the depth cutoff for one layout pass.
///
/// Sizes and spacings are expected to be positive; they are not validated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Number of levels drawn below and including the root (root = level 0).
    pub visible_levels: u32,
    /// Width of a node box.
    pub node_width: f32,
    /// Height of a node box.
    pub node_height: f32,
    /// Horizontal gap between sibling subtrees.
    pub x_spacing: f32,
    /// Vertical gap between levels.
    pub y_spacing: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            visible_levels: 3,
            node_width: 180.0,
            node_height: 80.0,
            x_spacing: 80.0,
            y_spacing: 60.0,
        }
    }
}

/// What occupies a drawn box: a real member or the stand-in for a missing child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum TreeSlot {
    Member(MemberId),
    Placeholder,
}

impl TreeSlot {
    /// The member behind this slot, if it is not a placeholder.
    #[inline]
    pub fn member(self) -> Option<MemberId> {
        match self {
            TreeSlot::Member(id) => Some(id),
            TreeSlot::Placeholder => None,
        }
    }

    #[inline]
    pub fn is_placeholder(self) -> bool {
        matches!(self, TreeSlot::Placeholder)
    }
}

impl From<MemberId> for TreeSlot {
    fn from(id: MemberId) -> Self {
        TreeSlot::Member(id)
    }
}

/// A point in un-zoomed layout units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Resolved position of one drawn box.
///
/// `x`/`y` is the box's top-left corner; `parent` is the top-left corner of
/// the box it hangs from, `None` for the layout root.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionRecord {
    pub slot: TreeSlot,
    pub x: f32,
    pub y: f32,
    pub parent: Option<Point>,
}

impl PositionRecord {
    #[inline]
    pub fn parent_x(&self) -> Option<f32> {
        self.parent.map(|p| p.x)
    }

    #[inline]
    pub fn parent_y(&self) -> Option<f32> {
        self.parent.map(|p| p.y)
    }
}

/// The pair of slots drawn below `slot` at `level`, or `None` for a visual leaf.
///
/// Children on the last visible level are treated as absent. When exactly one
/// side has a child the other side becomes a placeholder, so the result is
/// always both-or-neither.
pub fn child_pair(
    tree: &GenealogyTree,
    slot: TreeSlot,
    level: u32,
    visible_levels: u32,
) -> Option<(TreeSlot, TreeSlot)> {
    let TreeSlot::Member(id) = slot else {
        return None;
    };
    if level.saturating_add(1) >= visible_levels {
        return None;
    }

    match (tree.left(id), tree.right(id)) {
        (None, None) => None,
        (Some(left), Some(right)) => Some((left.into(), right.into())),
        (Some(left), None) => Some((left.into(), TreeSlot::Placeholder)),
        (None, Some(right)) => Some((TreeSlot::Placeholder, right.into())),
    }
}

/// Flatten records into `[x, y, parent_x, parent_y, ...]`, `NaN` for a missing parent.
pub fn interleave_positions(records: &[PositionRecord]) -> Vec<f32> {
    let mut flat = Vec::with_capacity(records.len() * 4);
    for record in records {
        flat.push(record.x);
        flat.push(record.y);
        flat.push(record.parent_x().unwrap_or(f32::NAN));
        flat.push(record.parent_y().unwrap_or(f32::NAN));
    }
    flat
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{Member, Side};

    #[test]
    fn test_child_pair_placeholder_sides() {
        let mut tree = GenealogyTree::new();
        let root = tree.add_member(Member::named("root"));
        let only_right = tree.add_child(root, Side::Right, Member::named("r")).unwrap();
        let leaf = tree.add_child(only_right, Side::Left, Member::named("rl")).unwrap();

        assert_eq!(
            child_pair(&tree, root.into(), 0, 3),
            Some((TreeSlot::Placeholder, TreeSlot::Member(only_right)))
        );
        assert_eq!(
            child_pair(&tree, only_right.into(), 1, 3),
            Some((TreeSlot::Member(leaf), TreeSlot::Placeholder))
        );
        assert_eq!(child_pair(&tree, leaf.into(), 2, 3), None);
    }

    #[test]
    fn test_child_pair_respects_cutoff() {
        let mut tree = GenealogyTree::new();
        let root = tree.add_member(Member::named("root"));
        tree.add_child(root, Side::Left, Member::named("l")).unwrap();

        // Children on level 1 are invisible when only one level is shown.
        assert_eq!(child_pair(&tree, root.into(), 0, 1), None);
        assert_eq!(child_pair(&tree, root.into(), 0, 0), None);
        assert!(child_pair(&tree, root.into(), 0, 2).is_some());
    }

    #[test]
    fn test_placeholder_has_no_children() {
        let tree = GenealogyTree::new();
        assert_eq!(child_pair(&tree, TreeSlot::Placeholder, 0, 10), None);
    }

    #[test]
    fn test_slot_serde_shape() {
        let json = serde_json::to_string(&TreeSlot::Member(MemberId(4))).unwrap();
        assert_eq!(json, r#"{"kind":"member","id":4}"#);
        let json = serde_json::to_string(&TreeSlot::Placeholder).unwrap();
        assert_eq!(json, r#"{"kind":"placeholder"}"#);
    }

    #[test]
    fn test_interleave_positions() {
        let records = [
            PositionRecord {
                slot: TreeSlot::Member(MemberId(0)),
                x: 130.0,
                y: 0.0,
                parent: None,
            },
            PositionRecord {
                slot: TreeSlot::Placeholder,
                x: 260.0,
                y: 140.0,
                parent: Some(Point::new(130.0, 0.0)),
            },
        ];
        let flat = interleave_positions(&records);
        assert_eq!(flat.len(), 8);
        assert_eq!(&flat[..2], &[130.0, 0.0]);
        assert!(flat[2].is_nan() && flat[3].is_nan());
        assert_eq!(&flat[4..], &[260.0, 140.0, 130.0, 0.0]);
    }

    #[test]
    fn test_layout_config_defaults_from_partial_json() {
        let config: LayoutConfig = serde_json::from_str(r#"{"visibleLevels": 5}"#).unwrap();
        assert_eq!(config.visible_levels, 5);
        assert_eq!(config.node_width, 180.0);
        assert_eq!(config.y_spacing, 60.0);
    }
}
