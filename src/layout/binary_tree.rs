//! Top-down placement of a binary genealogy tree.
//!
//! Every node is centered over the span its two (possibly placeholder) child
//! subtrees reserve, which is always at least its own width:
//!
//! ```text
//!   x = origin_x + subtree_width / 2 - node_width / 2
//! ```
//!
//! Children go one row down (`node_height + y_spacing`). The left subtree
//! starts at the parent's `origin_x`; the right one starts after the left
//! subtree's width plus `x_spacing`. Widths come from a [`WidthCache`] shared
//! across the whole pass, so each `(slot, level)` is measured once.
//!
//! Output is pre-order (node, then left subtree, then right subtree), which
//! keeps rendering keys stable across identical passes.

use super::width::WidthCache;
use super::{LayoutConfig, Point, PositionRecord, TreeSlot, child_pair};
use crate::tree::{GenealogyTree, MemberId};

/// The binary tree layout engine.
#[derive(Debug, Clone, Default)]
pub struct BinaryTreeLayout {
    config: LayoutConfig,
}

impl BinaryTreeLayout {
    /// Create a layout engine with the given configuration.
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    /// Create a layout engine with default sizing (3 levels, 180x80 boxes).
    pub fn with_defaults() -> Self {
        Self::new(LayoutConfig::default())
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Lay out the visible tree under `root`, anchored at the origin.
    ///
    /// An absent root or zero visible levels yields an empty layout.
    pub fn compute(&self, tree: &GenealogyTree, root: Option<MemberId>) -> Vec<PositionRecord> {
        let records = self.layout_from(tree, root.map(TreeSlot::Member), 0, Point::ORIGIN, None);
        tracing::debug!(
            boxes = records.len(),
            ?root,
            levels = self.config.visible_levels,
            "laid out tree"
        );
        records
    }

    /// Lay out `node` as if it sat at `level`, with its subtree's left edge at
    /// `origin.x` and its top at `origin.y`.
    ///
    /// `parent` is recorded on the first record as the box it hangs from.
    pub fn layout_from(
        &self,
        tree: &GenealogyTree,
        node: Option<TreeSlot>,
        level: u32,
        origin: Point,
        parent: Option<Point>,
    ) -> Vec<PositionRecord> {
        let mut records = Vec::new();
        if let Some(slot) = node {
            let mut widths = WidthCache::new();
            self.place(tree, slot, level, origin, parent, &mut widths, &mut records);
        }
        records
    }

    fn place(
        &self,
        tree: &GenealogyTree,
        slot: TreeSlot,
        level: u32,
        origin: Point,
        parent: Option<Point>,
        widths: &mut WidthCache,
        records: &mut Vec<PositionRecord>,
    ) {
        let config = &self.config;
        if level >= config.visible_levels {
            return;
        }

        let children = child_pair(tree, slot, level, config.visible_levels);
        let (left_width, right_width) = match children {
            Some((left, right)) => (
                widths.width(tree, left, level + 1, config),
                widths.width(tree, right, level + 1, config),
            ),
            None => (0.0, 0.0),
        };
        let spacing = if children.is_some() { config.x_spacing } else { 0.0 };
        let subtree_width = (left_width + right_width + spacing).max(config.node_width);

        let here = Point::new(
            origin.x + subtree_width / 2.0 - config.node_width / 2.0,
            origin.y,
        );
        records.push(PositionRecord {
            slot,
            x: here.x,
            y: here.y,
            parent,
        });

        // Visual leaf: nothing below is drawn.
        let Some((left, right)) = children else {
            return;
        };

        let child_y = here.y + config.node_height + config.y_spacing;
        let mut cursor_x = origin.x;
        self.place(
            tree,
            left,
            level + 1,
            Point::new(cursor_x, child_y),
            Some(here),
            widths,
            records,
        );
        cursor_x += left_width + config.x_spacing;
        self.place(
            tree,
            right,
            level + 1,
            Point::new(cursor_x, child_y),
            Some(here),
            widths,
            records,
        );
    }
}
