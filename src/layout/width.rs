//! Subtree width estimation.
//!
//! A subtree's width is the horizontal space needed to draw it and every
//! visible descendant without overlap:
//!
//! - past the cutoff (or absent): 0
//! - visual leaf: `node_width`
//! - otherwise: `max(left + right + x_spacing, node_width)`
//!
//! The layout pass asks for the same widths repeatedly while descending, so
//! [`WidthCache`] memoizes them per `(slot, level)` for a single config.

use std::collections::HashMap;

use super::{LayoutConfig, TreeSlot, child_pair};
use crate::tree::GenealogyTree;

/// Pixels needed to draw `node`'s visible subtree starting at `level`.
pub fn estimate_width(
    tree: &GenealogyTree,
    node: Option<TreeSlot>,
    level: u32,
    config: &LayoutConfig,
) -> f32 {
    let Some(slot) = node else {
        return 0.0;
    };
    if level >= config.visible_levels {
        return 0.0;
    }

    match child_pair(tree, slot, level, config.visible_levels) {
        None => config.node_width,
        Some((left, right)) => {
            let left_width = estimate_width(tree, Some(left), level + 1, config);
            let right_width = estimate_width(tree, Some(right), level + 1, config);
            (left_width + right_width + config.x_spacing).max(config.node_width)
        }
    }
}

/// Memoized subtree widths for one layout pass.
///
/// Entries are only valid for the tree and config they were computed with;
/// build a fresh cache whenever either changes.
#[derive(Debug, Default)]
pub struct WidthCache {
    widths: HashMap<(TreeSlot, u32), f32>,
}

impl WidthCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Same result as [`estimate_width`] for a present node, computing each
    /// `(slot, level)` at most once.
    pub fn width(
        &mut self,
        tree: &GenealogyTree,
        slot: TreeSlot,
        level: u32,
        config: &LayoutConfig,
    ) -> f32 {
        if level >= config.visible_levels {
            return 0.0;
        }
        if let Some(&width) = self.widths.get(&(slot, level)) {
            return width;
        }

        let width = match child_pair(tree, slot, level, config.visible_levels) {
            None => config.node_width,
            Some((left, right)) => {
                let left_width = self.width(tree, left, level + 1, config);
                let right_width = self.width(tree, right, level + 1, config);
                (left_width + right_width + config.x_spacing).max(config.node_width)
            }
        };
        self.widths.insert((slot, level), width);
        width
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{Member, MemberId, Side};

    fn config(visible_levels: u32) -> LayoutConfig {
        LayoutConfig {
            visible_levels,
            ..LayoutConfig::default()
        }
    }

    /// Complete binary tree with `depth` levels.
    fn perfect_tree(depth: u32) -> (GenealogyTree, MemberId) {
        let mut tree = GenealogyTree::new();
        let root = tree.add_member(Member::named("n0"));
        let mut frontier = vec![root];
        for _ in 1..depth {
            let mut next = Vec::new();
            for parent in frontier {
                for side in Side::BOTH {
                    let child = tree.add_child(parent, side, Member::named("n")).unwrap();
                    next.push(child);
                }
            }
            frontier = next;
        }
        (tree, root)
    }

    #[test]
    fn test_absent_node_is_zero() {
        let tree = GenealogyTree::new();
        assert_eq!(estimate_width(&tree, None, 0, &config(3)), 0.0);
    }

    #[test]
    fn test_past_cutoff_is_zero() {
        let (tree, root) = perfect_tree(3);
        assert_eq!(estimate_width(&tree, Some(root.into()), 3, &config(3)), 0.0);
        assert_eq!(estimate_width(&tree, Some(root.into()), 0, &config(0)), 0.0);
    }

    #[test]
    fn test_leaf_width_ignores_spacing() {
        let mut tree = GenealogyTree::new();
        let leaf = tree.add_member(Member::named("leaf"));
        for x_spacing in [0.0, 10.0, 500.0] {
            let cfg = LayoutConfig {
                x_spacing,
                ..LayoutConfig::default()
            };
            assert_eq!(estimate_width(&tree, Some(leaf.into()), 0, &cfg), 180.0);
        }
        assert_eq!(
            estimate_width(&tree, Some(TreeSlot::Placeholder), 2, &config(3)),
            180.0
        );
    }

    #[test]
    fn test_single_child_reserves_both_sides() {
        let mut tree = GenealogyTree::new();
        let root = tree.add_member(Member::named("root"));
        tree.add_child(root, Side::Right, Member::named("r")).unwrap();

        // 2 * 180 + 80
        assert_eq!(estimate_width(&tree, Some(root.into()), 0, &config(3)), 440.0);
    }

    #[test]
    fn test_children_beyond_cutoff_take_no_space() {
        let (tree, root) = perfect_tree(4);
        assert_eq!(estimate_width(&tree, Some(root.into()), 0, &config(1)), 180.0);
        assert_eq!(estimate_width(&tree, Some(root.into()), 0, &config(2)), 440.0);
        // 4 leaves: 4 * 180 + 3 * 80
        assert_eq!(estimate_width(&tree, Some(root.into()), 0, &config(3)), 960.0);
    }

    #[test]
    fn test_single_child_without_spacing() {
        let mut tree = GenealogyTree::new();
        let root = tree.add_member(Member::named("root"));
        tree.add_child(root, Side::Left, Member::named("l")).unwrap();
        let cfg = LayoutConfig {
            node_width: 100.0,
            x_spacing: 0.0,
            ..LayoutConfig::default()
        };
        assert_eq!(estimate_width(&tree, Some(root.into()), 0, &cfg), 200.0);
    }

    #[test]
    fn test_cache_matches_pure_estimate() {
        let (sample, sample_root) = GenealogyTree::sample().unwrap();
        for visible_levels in 0..=6 {
            let cfg = config(visible_levels);
            let mut cache = WidthCache::new();
            for id in sample.ids() {
                for level in 0..visible_levels + 1 {
                    assert_eq!(
                        cache.width(&sample, id.into(), level, &cfg),
                        estimate_width(&sample, Some(id.into()), level, &cfg),
                        "{id} at level {level} with {visible_levels} levels"
                    );
                }
            }
        }
        let mut cache = WidthCache::new();
        let width = cache.width(&sample, sample_root.into(), 0, &config(3));
        assert_eq!(
            cache.widths.get(&(TreeSlot::from(sample_root), 0)),
            Some(&width)
        );
    }
}
