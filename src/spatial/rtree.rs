//! R-tree based spatial index using the rstar crate.
//!
//! Stores every drawn box as a rectangle in layout units and answers:
//! - Which box is under a point (click hit testing)
//! - Which boxes intersect a rectangle (culling boxes scrolled out of view)

use rstar::{AABB, Envelope, PointDistance, RTree, RTreeObject};

use crate::layout::{PositionRecord, TreeSlot};

/// A drawn box in the spatial index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeBox {
    /// What the box shows.
    pub slot: TreeSlot,
    /// Position of the box in the layout output (its rendering key).
    pub key: usize,
    /// Top-left corner.
    pub min: [f32; 2],
    /// Bottom-right corner.
    pub max: [f32; 2],
}

impl NodeBox {
    /// Box for a layout record of the given size.
    pub fn from_record(key: usize, record: &PositionRecord, width: f32, height: f32) -> Self {
        Self {
            slot: record.slot,
            key,
            min: [record.x, record.y],
            max: [record.x + width, record.y + height],
        }
    }
}

impl RTreeObject for NodeBox {
    type Envelope = AABB<[f32; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.min, self.max)
    }
}

impl PointDistance for NodeBox {
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        Envelope::distance_2(&self.envelope(), point)
    }

    fn contains_point(&self, point: &[f32; 2]) -> bool {
        Envelope::contains_point(&self.envelope(), point)
    }
}

/// Spatial index over the boxes of one layout pass.
///
/// Uses an R*-tree for efficient spatial queries.
pub struct SpatialIndex {
    tree: RTree<NodeBox>,
}

impl SpatialIndex {
    /// Create a new empty spatial index.
    pub fn new() -> Self {
        Self { tree: RTree::new() }
    }

    /// Rebuild the index from a layout pass.
    ///
    /// Bulk loading is faster than incremental inserts for a full relayout.
    pub fn rebuild(&mut self, records: &[PositionRecord], width: f32, height: f32) {
        let boxes: Vec<_> = records
            .iter()
            .enumerate()
            .map(|(key, record)| NodeBox::from_record(key, record, width, height))
            .collect();

        self.tree = RTree::bulk_load(boxes);
    }

    /// The box containing a layout point, if any.
    ///
    /// Boxes of one layout never overlap, so at most one box can match.
    pub fn at_point(&self, x: f32, y: f32) -> Option<NodeBox> {
        self.tree.locate_at_point(&[x, y]).copied()
    }

    /// All boxes intersecting a rectangle, in rendering-key order.
    pub fn in_rect(&self, min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Vec<NodeBox> {
        let envelope = AABB::from_corners([min_x, min_y], [max_x, max_y]);
        let mut hits: Vec<_> = self
            .tree
            .locate_in_envelope_intersecting(&envelope)
            .copied()
            .collect();
        hits.sort_unstable_by_key(|node_box| node_box.key);
        hits
    }

}

impl Default for SpatialIndex {
    fn default() -> Self {
        Self::new()
    }
}
