//! View configuration.
//!
//! One value object holds everything a layout pass and the viewport need.
//! It is accepted from JavaScript as a plain object (camelCase keys, every
//! key optional) or from JSON.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::layout::LayoutConfig;

/// Layout sizing plus the viewport's padding and zoom range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewConfig {
    #[serde(flatten)]
    pub layout: LayoutConfig,
    /// Empty space around the drawn tree, in layout units.
    pub padding: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
    /// Zoom change per zoom-in / zoom-out step.
    pub zoom_step: f32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            padding: 50.0,
            min_zoom: 0.5,
            max_zoom: 2.0,
            zoom_step: 0.1,
        }
    }
}

impl ViewConfig {
    /// Parse a (possibly partial) JSON config; missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Same config with a different visible depth.
    pub fn with_visible_levels(mut self, visible_levels: u32) -> Self {
        self.layout.visible_levels = visible_levels;
        self
    }
}
