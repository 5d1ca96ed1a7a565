//! Presentation-side helpers.
//!
//! Bounding box, zoom/pan transform and the render-ready scene built from a
//! layout pass. Coordinates coming in are top-left anchored layout units.

mod scene;
mod viewport;

pub use scene::{Connector, Scene, SceneNode};
pub use viewport::{Bounds, Viewport};
