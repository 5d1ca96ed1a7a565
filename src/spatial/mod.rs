//! Spatial indexing for hit testing.
//!
//! This module provides an R-tree over the drawn boxes of a layout pass so a
//! click can be resolved to a member in O(log n).

mod rtree;

pub use rtree::{NodeBox, SpatialIndex};
