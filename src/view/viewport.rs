//! Bounding box and the zoom/pan transform.
//!
//! Layout positions are top-left corners in un-zoomed units. The viewport
//! shifts them so the tree's bounding box starts at `padding`, then scales:
//!
//! ```text
//!   screen = (layout - bounds.min + padding) * zoom
//! ```

use serde::Serialize;

use crate::config::ViewConfig;
use crate::layout::{Point, PositionRecord};

/// Minimal rectangle covering every drawn box.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl Bounds {
    /// Bounds of `node_width x node_height` boxes anchored at each record.
    ///
    /// An empty layout has zero bounds at the origin.
    pub fn from_records(records: &[PositionRecord], node_width: f32, node_height: f32) -> Self {
        if records.is_empty() {
            return Self::default();
        }

        let mut bounds = Self {
            min_x: f32::INFINITY,
            min_y: f32::INFINITY,
            max_x: f32::NEG_INFINITY,
            max_y: f32::NEG_INFINITY,
        };
        for record in records {
            bounds.min_x = bounds.min_x.min(record.x);
            bounds.min_y = bounds.min_y.min(record.y);
            bounds.max_x = bounds.max_x.max(record.x + node_width);
            bounds.max_y = bounds.max_y.max(record.y + node_height);
        }
        bounds
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }
}

/// Zoom state plus the padding used when mapping to screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    zoom: f32,
    min_zoom: f32,
    max_zoom: f32,
    zoom_step: f32,
    padding: f32,
}

impl Viewport {
    /// Viewport at 100% with the config's zoom range.
    pub fn new(config: &ViewConfig) -> Self {
        let mut viewport = Self {
            zoom: 1.0,
            min_zoom: config.min_zoom,
            max_zoom: config.max_zoom,
            zoom_step: config.zoom_step,
            padding: config.padding,
        };
        viewport.reset_zoom();
        viewport
    }

    /// Adopt a new zoom range and padding, keeping the current zoom if it still fits.
    pub fn reconfigure(&mut self, config: &ViewConfig) {
        self.min_zoom = config.min_zoom;
        self.max_zoom = config.max_zoom;
        self.zoom_step = config.zoom_step;
        self.padding = config.padding;
        self.set_zoom(self.zoom);
    }

    #[inline]
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    #[inline]
    pub fn padding(&self) -> f32 {
        self.padding
    }

    /// Set the zoom factor, clamped to the configured range. Returns the new zoom.
    ///
    /// A NaN request leaves the zoom unchanged.
    pub fn set_zoom(&mut self, zoom: f32) -> f32 {
        if zoom.is_nan() {
            return self.zoom;
        }
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
        self.zoom
    }

    pub fn zoom_in(&mut self) -> f32 {
        self.set_zoom(self.zoom + self.zoom_step)
    }

    pub fn zoom_out(&mut self) -> f32 {
        self.set_zoom(self.zoom - self.zoom_step)
    }

    /// Back to 100% (or the nearest allowed zoom).
    pub fn reset_zoom(&mut self) -> f32 {
        self.set_zoom(1.0)
    }

    pub fn can_zoom_in(&self) -> bool {
        self.zoom < self.max_zoom
    }

    pub fn can_zoom_out(&self) -> bool {
        self.zoom > self.min_zoom
    }

    /// Zoom as a whole percentage, for display.
    pub fn zoom_percent(&self) -> u32 {
        (self.zoom * 100.0).round() as u32
    }

    /// Map a layout point to screen space.
    pub fn to_screen(&self, bounds: &Bounds, point: Point) -> Point {
        Point::new(
            (point.x - bounds.min_x + self.padding) * self.zoom,
            (point.y - bounds.min_y + self.padding) * self.zoom,
        )
    }

    /// Map a screen point back to layout space.
    pub fn to_layout(&self, bounds: &Bounds, point: Point) -> Point {
        Point::new(
            point.x / self.zoom + bounds.min_x - self.padding,
            point.y / self.zoom + bounds.min_y - self.padding,
        )
    }

    /// Size of the scrollable canvas, in screen pixels.
    pub fn content_size(&self, bounds: &Bounds) -> (f32, f32) {
        (
            (bounds.width() + self.padding * 2.0) * self.zoom,
            (bounds.height() + self.padding * 2.0) * self.zoom,
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(&ViewConfig::default())
    }
}
