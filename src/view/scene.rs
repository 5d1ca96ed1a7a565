//! Render-ready scene for the presentation layer.
//!
//! Turns position records into screen-space boxes and connector lines. The
//! host only has to draw what it gets: one line per connector, one box per
//! node. Placeholders come out non-interactive with the "No Child" label and
//! no avatar.

use serde::Serialize;

use super::viewport::{Bounds, Viewport};
use crate::layout::{LayoutConfig, PLACEHOLDER_LABEL, Point, PositionRecord, TreeSlot};
use crate::tree::{GenealogyTree, MemberId};

/// One drawn box, in screen pixels.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneNode {
    /// Stable rendering key (position in the layout order).
    pub key: usize,
    pub slot: TreeSlot,
    pub label: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub selected: bool,
    /// Clickable, with avatar. False for placeholders.
    pub interactive: bool,
    pub active: bool,
}

/// Line from a parent's bottom-center to a child's top-center, in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Connector {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

/// Everything needed to draw one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    pub nodes: Vec<SceneNode>,
    pub connectors: Vec<Connector>,
    /// Scrollable canvas size.
    pub width: f32,
    pub height: f32,
    pub zoom: f32,
}

impl Scene {
    pub fn build(
        tree: &GenealogyTree,
        records: &[PositionRecord],
        layout: &LayoutConfig,
        viewport: &Viewport,
        selected: Option<MemberId>,
    ) -> Self {
        let bounds = Bounds::from_records(records, layout.node_width, layout.node_height);
        let zoom = viewport.zoom();
        let (width, height) = viewport.content_size(&bounds);

        let nodes = records
            .iter()
            .enumerate()
            .map(|(key, record)| {
                let top_left = viewport.to_screen(&bounds, Point::new(record.x, record.y));
                let member = record.slot.member().and_then(|id| tree.member(id));
                SceneNode {
                    key,
                    slot: record.slot,
                    label: match member {
                        Some(member) => member.username.clone(),
                        None => PLACEHOLDER_LABEL.to_string(),
                    },
                    x: top_left.x,
                    y: top_left.y,
                    width: layout.node_width * zoom,
                    height: layout.node_height * zoom,
                    selected: selected.is_some() && record.slot.member() == selected,
                    interactive: !record.slot.is_placeholder(),
                    active: member.is_some_and(|member| member.is_active()),
                }
            })
            .collect();

        let half_width = layout.node_width / 2.0;
        let connectors = records
            .iter()
            .filter_map(|record| {
                let parent = record.parent?;
                let from = viewport.to_screen(
                    &bounds,
                    Point::new(parent.x + half_width, parent.y + layout.node_height),
                );
                let to = viewport.to_screen(&bounds, Point::new(record.x + half_width, record.y));
                Some(Connector {
                    x1: from.x,
                    y1: from.y,
                    x2: to.x,
                    y2: to.y,
                })
            })
            .collect();

        Self {
            nodes,
            connectors,
            width,
            height,
            zoom,
        }
    }
}
