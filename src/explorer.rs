//! TreeExplorer - the application state around one genealogy tree.
//!
//! The explorer owns:
//! - The immutable tree
//! - A cursor naming the member currently drawn as root
//! - The selected member (details panel, highlighted box)
//! - The view configuration and zoom state
//! - The derived layout and its spatial index
//!
//! Layout is recomputed from scratch whenever the root cursor, the visible
//! depth or the sizing constants change. Zooming never relayouts: positions
//! stay in layout units and the viewport maps them on the way out.

use serde::Serialize;

use crate::config::ViewConfig;
use crate::error::{Result, TreeError};
use crate::layout::{BinaryTreeLayout, Point, PositionRecord, TreeSlot};
use crate::spatial::SpatialIndex;
use crate::tree::{GenealogyTree, MemberId};
use crate::view::{Bounds, Scene, Viewport};

/// What the details panel shows for one member.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberDetails {
    pub id: MemberId,
    pub username: String,
    pub full_name: String,
    pub status: String,
    pub active: bool,
    pub product: String,
    pub category: String,
    /// Number of members below this one.
    pub network_size: usize,
    /// Username of the left child, `None` when the slot is empty.
    pub left: Option<String>,
    pub right: Option<String>,
    pub can_set_as_root: bool,
}

/// State container driving layout and navigation.
pub struct TreeExplorer {
    tree: GenealogyTree,
    /// Member drawn at the top of the view.
    current_root: MemberId,
    selected: Option<MemberId>,
    config: ViewConfig,
    viewport: Viewport,
    positions: Vec<PositionRecord>,
    spatial: SpatialIndex,
}

impl TreeExplorer {
    /// Explore `tree` starting at `root` with the default configuration.
    pub fn new(tree: GenealogyTree, root: MemberId) -> Result<Self> {
        Self::with_config(tree, root, ViewConfig::default())
    }

    /// Explore `tree` starting at `root`.
    pub fn with_config(tree: GenealogyTree, root: MemberId, config: ViewConfig) -> Result<Self> {
        if !tree.contains(root) {
            return Err(TreeError::UnknownMember(root));
        }
        validate(&config)?;

        let mut explorer = Self {
            tree,
            current_root: root,
            selected: None,
            config,
            viewport: Viewport::new(&config),
            positions: Vec::new(),
            spatial: SpatialIndex::new(),
        };
        explorer.relayout();
        Ok(explorer)
    }

    /// Explore `tree` from its first parentless member.
    pub fn from_tree(tree: GenealogyTree, config: ViewConfig) -> Result<Self> {
        let root = tree.roots().first().copied().ok_or(TreeError::EmptyTree)?;
        Self::with_config(tree, root, config)
    }

    /// Load nested member records and explore them from the record root.
    pub fn from_json(json: &str, config: ViewConfig) -> Result<Self> {
        let (tree, root) = GenealogyTree::from_json(json)?;
        Self::with_config(tree, root, config)
    }

    /// The bundled demo network.
    pub fn sample() -> Result<Self> {
        let (tree, root) = GenealogyTree::sample()?;
        Self::new(tree, root)
    }

    // =========================================================================
    // State
    // =========================================================================

    pub fn tree(&self) -> &GenealogyTree {
        &self.tree
    }

    pub fn current_root(&self) -> MemberId {
        self.current_root
    }

    pub fn selected(&self) -> Option<MemberId> {
        self.selected
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Position records of the current layout, in rendering order.
    pub fn positions(&self) -> &[PositionRecord] {
        &self.positions
    }

    /// Bounding box of the current layout.
    pub fn bounds(&self) -> Bounds {
        let layout = &self.config.layout;
        Bounds::from_records(&self.positions, layout.node_width, layout.node_height)
    }

    /// Render-ready boxes and connectors at the current zoom.
    pub fn scene(&self) -> Scene {
        Scene::build(
            &self.tree,
            &self.positions,
            &self.config.layout,
            &self.viewport,
            self.selected,
        )
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Re-root the view at `id`. Only members with children qualify.
    pub fn set_root(&mut self, id: MemberId) -> Result<()> {
        if !self.tree.contains(id) {
            return Err(TreeError::UnknownMember(id));
        }
        if !self.tree.has_children(id) {
            tracing::warn!(%id, "refusing to re-root at leaf");
            return Err(TreeError::NoChildren(id));
        }

        tracing::info!(%id, "re-rooting view");
        self.current_root = id;
        self.selected = None;
        self.relayout();
        Ok(())
    }

    /// Whether the current root has a parent in the full tree.
    pub fn can_navigate_up(&self) -> bool {
        self.tree.parent(self.current_root).is_some()
    }

    /// Move the root cursor to the current root's parent.
    ///
    /// Returns false (and changes nothing) when already at the top.
    pub fn navigate_up(&mut self) -> bool {
        let Some(parent) = self.tree.parent(self.current_root) else {
            return false;
        };

        tracing::info!(from = %self.current_root, to = %parent, "navigating up");
        self.current_root = parent;
        self.selected = None;
        self.relayout();
        true
    }

    // =========================================================================
    // Selection
    // =========================================================================

    pub fn select(&mut self, id: MemberId) -> Result<()> {
        if !self.tree.contains(id) {
            return Err(TreeError::UnknownMember(id));
        }
        self.selected = Some(id);
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Handle a click at a screen-space point.
    ///
    /// Selects and returns the member under the pointer. Clicks on
    /// placeholders or empty canvas change nothing.
    pub fn click_at(&mut self, screen_x: f32, screen_y: f32) -> Option<MemberId> {
        let point = self
            .viewport
            .to_layout(&self.bounds(), Point::new(screen_x, screen_y));
        let hit = self.spatial.at_point(point.x, point.y)?;

        match hit.slot {
            TreeSlot::Member(id) => {
                self.selected = Some(id);
                Some(id)
            }
            TreeSlot::Placeholder => {
                tracing::debug!(key = hit.key, "ignoring click on placeholder box");
                None
            }
        }
    }

    /// Rendering keys of the boxes inside a screen-space rectangle.
    ///
    /// The host uses this to skip boxes scrolled out of the visible canvas.
    pub fn keys_in_view(
        &self,
        screen_x: f32,
        screen_y: f32,
        width: f32,
        height: f32,
    ) -> Vec<usize> {
        let bounds = self.bounds();
        let min = self.viewport.to_layout(&bounds, Point::new(screen_x, screen_y));
        let max = self
            .viewport
            .to_layout(&bounds, Point::new(screen_x + width, screen_y + height));
        self.spatial
            .in_rect(min.x, min.y, max.x, max.y)
            .into_iter()
            .map(|node_box| node_box.key)
            .collect()
    }

    /// Details for the panel, or an error for an unknown member.
    pub fn details(&self, id: MemberId) -> Result<MemberDetails> {
        let member = self.tree.member(id).ok_or(TreeError::UnknownMember(id))?;
        let username_of = |child: Option<MemberId>| {
            child
                .and_then(|child| self.tree.member(child))
                .map(|child| child.username.clone())
        };

        Ok(MemberDetails {
            id,
            username: member.username.clone(),
            full_name: member.full_name.clone(),
            status: member.status.clone(),
            active: member.is_active(),
            product: member.product.clone(),
            category: member.category.clone(),
            network_size: self.tree.network_size(id),
            left: username_of(self.tree.left(id)),
            right: username_of(self.tree.right(id)),
            can_set_as_root: self.tree.has_children(id),
        })
    }

    /// Details of the selected member, if any.
    pub fn selected_details(&self) -> Option<MemberDetails> {
        self.selected.and_then(|id| self.details(id).ok())
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Choices for the visible-levels picker: `1..=depth under the current root`.
    pub fn level_options(&self) -> Vec<u32> {
        (1..=self.tree.max_depth(self.current_root)).collect()
    }

    pub fn set_visible_levels(&mut self, visible_levels: u32) -> Result<()> {
        self.set_config(self.config.with_visible_levels(visible_levels))
    }

    /// Replace the whole configuration and relayout.
    pub fn set_config(&mut self, config: ViewConfig) -> Result<()> {
        validate(&config)?;
        self.config = config;
        self.viewport.reconfigure(&config);
        self.relayout();
        Ok(())
    }

    // =========================================================================
    // Zoom
    // =========================================================================

    pub fn zoom_in(&mut self) -> f32 {
        self.viewport.zoom_in()
    }

    pub fn zoom_out(&mut self) -> f32 {
        self.viewport.zoom_out()
    }

    pub fn reset_zoom(&mut self) -> f32 {
        self.viewport.reset_zoom()
    }

    pub fn set_zoom(&mut self, zoom: f32) -> f32 {
        self.viewport.set_zoom(zoom)
    }

    fn relayout(&mut self) {
        let layout = BinaryTreeLayout::new(self.config.layout);
        self.positions = layout.compute(&self.tree, Some(self.current_root));
        self.spatial.rebuild(
            &self.positions,
            self.config.layout.node_width,
            self.config.layout.node_height,
        );
    }
}

fn validate(config: &ViewConfig) -> Result<()> {
    if config.layout.visible_levels == 0 {
        return Err(TreeError::InvalidVisibleLevels(0));
    }

    let (min, max) = (config.min_zoom, config.max_zoom);
    let ordered = min > 0.0 && max.is_finite() && min <= max;
    if !ordered {
        return Err(TreeError::InvalidZoomRange { min, max });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{Member, Side};

    /// root → (a, b); a → (c, _); b is a leaf.
    fn explorer() -> (TreeExplorer, [MemberId; 4]) {
        let mut tree = GenealogyTree::new();
        let root = tree.add_member(Member::named("root").with_status("active"));
        let a = tree.add_child(root, Side::Left, Member::named("a")).unwrap();
        let b = tree.add_child(root, Side::Right, Member::named("b")).unwrap();
        let c = tree.add_child(a, Side::Left, Member::named("c")).unwrap();
        (TreeExplorer::new(tree, root).unwrap(), [root, a, b, c])
    }

    #[test]
    fn test_initial_layout() {
        let (explorer, [root, ..]) = explorer();
        assert_eq!(explorer.current_root(), root);
        // root, a, b, c, placeholder
        assert_eq!(explorer.positions().len(), 5);
        assert_eq!(explorer.selected(), None);
    }

    #[test]
    fn test_unknown_root_rejected() {
        let tree = GenealogyTree::new();
        assert!(matches!(
            TreeExplorer::new(tree, MemberId(0)),
            Err(TreeError::UnknownMember(_))
        ));
        assert!(matches!(
            TreeExplorer::from_tree(GenealogyTree::new(), ViewConfig::default()),
            Err(TreeError::EmptyTree)
        ));
    }

    #[test]
    fn test_set_root_and_navigate_up() {
        let (mut explorer, [root, a, _, c]) = explorer();
        explorer.select(c).unwrap();

        explorer.set_root(a).unwrap();
        assert_eq!(explorer.current_root(), a);
        assert_eq!(explorer.selected(), None);
        assert_eq!(explorer.positions()[0].slot, TreeSlot::Member(a));
        assert_eq!(explorer.positions()[0].parent, None);
        assert_eq!(explorer.positions().len(), 3);

        assert!(explorer.can_navigate_up());
        assert!(explorer.navigate_up());
        assert_eq!(explorer.current_root(), root);
        assert!(!explorer.can_navigate_up());
        assert!(!explorer.navigate_up());
        assert_eq!(explorer.current_root(), root);
    }

    #[test]
    fn test_rerooting_keeps_full_tree_parents() {
        let (mut explorer, [root, a, _, c]) = explorer();
        explorer.set_root(a).unwrap();
        assert_eq!(explorer.tree().parent(a), Some(root));
        assert_eq!(explorer.tree().parent(c), Some(a));
    }

    #[test]
    fn test_set_root_rejects_leaf() {
        let (mut explorer, [root, _, b, _]) = explorer();
        explorer.select(b).unwrap();
        assert!(matches!(explorer.set_root(b), Err(TreeError::NoChildren(id)) if id == b));
        assert_eq!(explorer.current_root(), root);
        assert_eq!(explorer.selected(), Some(b));
        assert!(matches!(
            explorer.set_root(MemberId(77)),
            Err(TreeError::UnknownMember(_))
        ));
    }

    #[test]
    fn test_click_selects_member() {
        let (mut explorer, [root, ..]) = explorer();
        let scene = explorer.scene();
        let root_box = &scene.nodes[0];
        let hit = explorer.click_at(root_box.x + 10.0, root_box.y + 10.0);
        assert_eq!(hit, Some(root));
        assert_eq!(explorer.selected(), Some(root));
        assert!(explorer.scene().nodes[0].selected);
    }

    #[test]
    fn test_click_ignores_placeholder_and_background() {
        let (mut explorer, _) = explorer();
        let scene = explorer.scene();
        let placeholder = scene
            .nodes
            .iter()
            .find(|node| node.slot == TreeSlot::Placeholder)
            .unwrap();
        assert_eq!(explorer.click_at(placeholder.x + 5.0, placeholder.y + 5.0), None);
        assert_eq!(explorer.click_at(1.0, 1.0), None);
        assert_eq!(explorer.selected(), None);
    }

    #[test]
    fn test_click_respects_zoom() {
        let (mut explorer, [_, a, ..]) = explorer();
        explorer.set_zoom(2.0);
        let scene = explorer.scene();
        let a_box = scene
            .nodes
            .iter()
            .find(|node| node.slot == TreeSlot::Member(a))
            .unwrap();
        let hit = explorer.click_at(a_box.x + a_box.width - 1.0, a_box.y + a_box.height - 1.0);
        assert_eq!(hit, Some(a));
    }

    #[test]
    fn test_visible_levels() {
        let (mut explorer, _) = explorer();
        explorer.set_visible_levels(1).unwrap();
        assert_eq!(explorer.positions().len(), 1);

        explorer.set_visible_levels(2).unwrap();
        assert_eq!(explorer.positions().len(), 3);

        assert!(matches!(
            explorer.set_visible_levels(0),
            Err(TreeError::InvalidVisibleLevels(0))
        ));
        assert_eq!(explorer.config().layout.visible_levels, 2);
    }

    #[test]
    fn test_level_options_follow_root() {
        let (mut explorer, [_, a, ..]) = explorer();
        assert_eq!(explorer.level_options(), vec![1, 2, 3]);
        explorer.set_root(a).unwrap();
        assert_eq!(explorer.level_options(), vec![1, 2]);
    }

    #[test]
    fn test_details() {
        let (explorer, [root, a, b, c]) = explorer();
        let details = explorer.details(root).unwrap();
        assert_eq!(details.username, "root");
        assert!(details.active);
        assert_eq!(details.network_size, 3);
        assert_eq!(details.left.as_deref(), Some("a"));
        assert_eq!(details.right.as_deref(), Some("b"));
        assert!(details.can_set_as_root);

        let details = explorer.details(a).unwrap();
        assert_eq!(details.left.as_deref(), Some("c"));
        assert_eq!(details.right, None);

        assert!(!explorer.details(b).unwrap().can_set_as_root);
        assert_eq!(explorer.details(c).unwrap().network_size, 0);
        assert!(explorer.details(MemberId(50)).is_err());
    }

    #[test]
    fn test_zoom_does_not_relayout() {
        let (mut explorer, _) = explorer();
        let before = explorer.positions().to_vec();
        assert_eq!(explorer.zoom_in(), 1.1);
        assert_eq!(explorer.positions(), &before[..]);
        assert_eq!(explorer.reset_zoom(), 1.0);
        assert_eq!(explorer.zoom_out(), 0.9);
    }

    #[test]
    fn test_set_config_relayouts() {
        let (mut explorer, _) = explorer();
        let config = ViewConfig::from_json(r#"{"nodeWidth": 100, "xSpacing": 20}"#).unwrap();
        explorer.set_config(config).unwrap();
        // Root over (a over c + placeholder) and b: (100 + 20 + 100) + 20 + 100.
        assert_eq!(explorer.bounds().width(), 340.0);
    }

    #[test]
    fn test_keys_in_view() {
        let (mut explorer, _) = explorer();
        // Root row spans screen y 50..130; the child row starts at 190.
        assert_eq!(explorer.keys_in_view(0.0, 0.0, 2000.0, 140.0), vec![0]);
        assert_eq!(explorer.keys_in_view(0.0, 0.0, 2000.0, 2000.0).len(), 5);
        assert!(explorer.keys_in_view(5000.0, 5000.0, 10.0, 10.0).is_empty());

        // At half zoom the whole child row fits in the same 140px strip.
        explorer.set_zoom(0.5);
        assert_eq!(explorer.keys_in_view(0.0, 0.0, 2000.0, 140.0).len(), 3);
    }

    #[test]
    fn test_invalid_zoom_range_rejected() {
        let (tree, root) = GenealogyTree::sample().unwrap();
        let config = ViewConfig::from_json(r#"{"minZoom": 3}"#).unwrap();
        assert!(matches!(
            TreeExplorer::with_config(tree, root, config),
            Err(TreeError::InvalidZoomRange { min, max }) if min == 3.0 && max == 2.0
        ));

        let (mut explorer, _) = explorer();
        for json in [r#"{"minZoom": 0}"#, r#"{"minZoom": -1}"#, r#"{"maxZoom": 0.25}"#] {
            let config = ViewConfig::from_json(json).unwrap();
            assert!(matches!(
                explorer.set_config(config),
                Err(TreeError::InvalidZoomRange { .. })
            ));
        }

        let mut config = ViewConfig::default();
        config.max_zoom = f32::NAN;
        assert!(explorer.set_config(config).is_err());
        config.max_zoom = f32::INFINITY;
        assert!(explorer.set_config(config).is_err());

        assert_eq!(explorer.config().max_zoom, 2.0);
        assert_eq!(explorer.zoom_in(), 1.1);
    }
}
