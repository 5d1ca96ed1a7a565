//! Genealogy Tree - WASM Module
//!
//! This module provides the layout engine and view state for the genealogy
//! tree viewer. It is compiled to WebAssembly and exposes a JavaScript-friendly
//! API via wasm-bindgen; the host page only draws what it is handed.
//!
//! # Architecture
//!
//! - `tree`: Binary genealogy network on petgraph's StableGraph
//! - `layout`: Subtree width estimation and top-down box placement
//! - `view`: Bounding box, zoom/pan transform and render-ready scene
//! - `spatial`: R-tree over drawn boxes for click hit testing
//! - `explorer`: State container (root cursor, selection, config, zoom)

use js_sys::Float32Array;
use wasm_bindgen::prelude::*;

pub mod config;
pub mod error;
pub mod explorer;
pub mod layout;
pub mod spatial;
pub mod tree;
pub mod view;

pub use config::ViewConfig;
pub use error::TreeError;
pub use explorer::{MemberDetails, TreeExplorer};
pub use layout::{BinaryTreeLayout, LayoutConfig, PositionRecord, TreeSlot};
pub use tree::{GenealogyTree, Member, MemberId, Side};

/// Initialize the WASM module.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();
}

/// Main entry point for the genealogy viewer.
///
/// This struct wraps the internal TreeExplorer and provides the public API
/// exposed to JavaScript.
#[wasm_bindgen]
pub struct GenealogyTreeWasm {
    explorer: TreeExplorer,
}

#[wasm_bindgen]
impl GenealogyTreeWasm {
    /// Load a nested member record (JSON text).
    ///
    /// `config` is an optional plain object with camelCase keys; missing keys
    /// keep their defaults (3 levels, 180x80 boxes, 80x60 spacing).
    #[wasm_bindgen(js_name = fromJson)]
    pub fn from_json(json: &str, config: JsValue) -> Result<GenealogyTreeWasm, JsError> {
        let config = parse_config(config)?;
        Ok(Self {
            explorer: TreeExplorer::from_json(json, config)?,
        })
    }

    /// Start from the bundled demo network.
    #[wasm_bindgen(js_name = withSampleData)]
    pub fn with_sample_data(config: JsValue) -> Result<GenealogyTreeWasm, JsError> {
        let config = parse_config(config)?;
        let (tree, root) = GenealogyTree::sample()?;
        Ok(Self {
            explorer: TreeExplorer::with_config(tree, root, config)?,
        })
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Get the current view configuration as a plain object.
    #[wasm_bindgen(js_name = getConfig)]
    pub fn get_config(&self) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(self.explorer.config())?)
    }

    /// Replace the view configuration and recompute the layout.
    #[wasm_bindgen(js_name = setConfig)]
    pub fn set_config(&mut self, config: JsValue) -> Result<(), JsError> {
        let config = parse_config(config)?;
        self.explorer.set_config(config)?;
        Ok(())
    }

    /// Change how many levels are drawn (at least 1).
    #[wasm_bindgen(js_name = setVisibleLevels)]
    pub fn set_visible_levels(&mut self, visible_levels: u32) -> Result<(), JsError> {
        self.explorer.set_visible_levels(visible_levels)?;
        Ok(())
    }

    #[wasm_bindgen(js_name = visibleLevels)]
    pub fn visible_levels(&self) -> u32 {
        self.explorer.config().layout.visible_levels
    }

    /// Choices for the visible-levels picker under the current root.
    #[wasm_bindgen(js_name = levelOptions)]
    pub fn level_options(&self) -> Vec<u32> {
        self.explorer.level_options()
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    #[wasm_bindgen(js_name = currentRoot)]
    pub fn current_root(&self) -> u32 {
        self.explorer.current_root().raw()
    }

    /// Username of the member drawn at the top.
    #[wasm_bindgen(js_name = currentRootName)]
    pub fn current_root_name(&self) -> String {
        self.explorer
            .tree()
            .member(self.explorer.current_root())
            .map(|member| member.username.clone())
            .unwrap_or_default()
    }

    /// Re-root the view at a member. Fails for leaves and unknown IDs.
    #[wasm_bindgen(js_name = setRoot)]
    pub fn set_root(&mut self, member_id: u32) -> Result<(), JsError> {
        self.explorer.set_root(MemberId(member_id))?;
        Ok(())
    }

    #[wasm_bindgen(js_name = canNavigateUp)]
    pub fn can_navigate_up(&self) -> bool {
        self.explorer.can_navigate_up()
    }

    /// Move the root to its parent. Returns false at the top of the tree.
    #[wasm_bindgen(js_name = navigateUp)]
    pub fn navigate_up(&mut self) -> bool {
        self.explorer.navigate_up()
    }

    // =========================================================================
    // Selection
    // =========================================================================

    pub fn selected(&self) -> Option<u32> {
        self.explorer.selected().map(MemberId::raw)
    }

    pub fn select(&mut self, member_id: u32) -> Result<(), JsError> {
        self.explorer.select(MemberId(member_id))?;
        Ok(())
    }

    #[wasm_bindgen(js_name = clearSelection)]
    pub fn clear_selection(&mut self) {
        self.explorer.clear_selection();
    }

    /// Resolve a click in canvas pixels.
    ///
    /// Returns the selected member ID, or undefined for placeholders and
    /// empty space.
    #[wasm_bindgen(js_name = clickAt)]
    pub fn click_at(&mut self, x: f32, y: f32) -> Option<u32> {
        self.explorer.click_at(x, y).map(MemberId::raw)
    }

    /// Rendering keys of the boxes inside a screen-space rectangle, for culling.
    #[wasm_bindgen(js_name = keysInView)]
    pub fn keys_in_view(&self, x: f32, y: f32, width: f32, height: f32) -> Vec<u32> {
        self.explorer
            .keys_in_view(x, y, width, height)
            .into_iter()
            .map(|key| key as u32)
            .collect()
    }

    /// Details panel data for a member.
    pub fn details(&self, member_id: u32) -> Result<JsValue, JsError> {
        let details = self.explorer.details(MemberId(member_id))?;
        Ok(serde_wasm_bindgen::to_value(&details)?)
    }

    /// Details of the selected member, or null when nothing is selected.
    #[wasm_bindgen(js_name = selectedDetails)]
    pub fn selected_details(&self) -> Result<JsValue, JsError> {
        match self.explorer.selected_details() {
            Some(details) => Ok(serde_wasm_bindgen::to_value(&details)?),
            None => Ok(JsValue::NULL),
        }
    }

    // =========================================================================
    // Layout Output
    // =========================================================================

    /// Position records as an array of `{ slot, x, y, parent }` objects.
    pub fn positions(&self) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(self.explorer.positions())?)
    }

    /// Positions as a Float32Array `[x0, y0, parentX0, parentY0, ...]`.
    ///
    /// The root's parent coordinates are NaN.
    #[wasm_bindgen(js_name = positionsBuffer)]
    pub fn positions_buffer(&self) -> Float32Array {
        let flat = layout::interleave_positions(self.explorer.positions());
        Float32Array::from(&flat[..])
    }

    /// Number of drawn boxes (placeholders included).
    #[wasm_bindgen(js_name = positionCount)]
    pub fn position_count(&self) -> usize {
        self.explorer.positions().len()
    }

    /// Render-ready boxes and connector lines at the current zoom.
    pub fn scene(&self) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(&self.explorer.scene())?)
    }

    /// Get the bounding box of the layout.
    ///
    /// Returns [min_x, min_y, max_x, max_y], or None if nothing is drawn.
    #[wasm_bindgen(js_name = getBounds)]
    pub fn get_bounds(&self) -> Option<Vec<f32>> {
        if self.explorer.positions().is_empty() {
            return None;
        }
        let bounds = self.explorer.bounds();
        Some(vec![bounds.min_x, bounds.min_y, bounds.max_x, bounds.max_y])
    }

    // =========================================================================
    // Zoom
    // =========================================================================

    pub fn zoom(&self) -> f32 {
        self.explorer.viewport().zoom()
    }

    #[wasm_bindgen(js_name = zoomIn)]
    pub fn zoom_in(&mut self) -> f32 {
        self.explorer.zoom_in()
    }

    #[wasm_bindgen(js_name = zoomOut)]
    pub fn zoom_out(&mut self) -> f32 {
        self.explorer.zoom_out()
    }

    #[wasm_bindgen(js_name = resetZoom)]
    pub fn reset_zoom(&mut self) -> f32 {
        self.explorer.reset_zoom()
    }

    #[wasm_bindgen(js_name = setZoom)]
    pub fn set_zoom(&mut self, zoom: f32) -> f32 {
        self.explorer.set_zoom(zoom)
    }

    #[wasm_bindgen(js_name = canZoomIn)]
    pub fn can_zoom_in(&self) -> bool {
        self.explorer.viewport().can_zoom_in()
    }

    #[wasm_bindgen(js_name = canZoomOut)]
    pub fn can_zoom_out(&self) -> bool {
        self.explorer.viewport().can_zoom_out()
    }

    /// Zoom as a rounded percentage for the toolbar label.
    #[wasm_bindgen(js_name = zoomPercent)]
    pub fn zoom_percent(&self) -> u32 {
        self.explorer.viewport().zoom_percent()
    }
}

/// Read an optional JS config object; undefined or null means defaults.
fn parse_config(config: JsValue) -> Result<ViewConfig, JsError> {
    if config.is_undefined() || config.is_null() {
        return Ok(ViewConfig::default());
    }
    Ok(serde_wasm_bindgen::from_value(config)?)
}
