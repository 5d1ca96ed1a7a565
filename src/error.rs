//! Error type shared by tree construction, loading and navigation.
//!
//! Layout itself never fails: malformed sizing constants are a caller
//! precondition and missing children are ordinary tree shapes.

use crate::tree::{MemberId, Side};

/// Errors raised while building a genealogy tree or driving the explorer.
#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    /// The id does not name a member of this tree.
    #[error("unknown member {0}")]
    UnknownMember(MemberId),

    /// The parent already has a child on that side.
    #[error("{parent} already has a {side} child")]
    SlotOccupied { parent: MemberId, side: Side },

    /// The child is already linked under another parent.
    #[error("{0} is already attached to a parent")]
    AlreadyAttached(MemberId),

    /// Linking would make a member its own ancestor.
    #[error("attaching {child} under {parent} would create a cycle")]
    WouldCycle { parent: MemberId, child: MemberId },

    /// Only members with at least one child can become the view root.
    #[error("{0} has no children and cannot be the view root")]
    NoChildren(MemberId),

    /// The tree has nothing to show.
    #[error("the tree has no members")]
    EmptyTree,

    /// At least one level must be visible.
    #[error("visible levels must be at least 1, got {0}")]
    InvalidVisibleLevels(u32),

    /// Zoom bounds must be finite, positive and ordered.
    #[error("invalid zoom range {min}..={max}")]
    InvalidZoomRange { min: f32, max: f32 },

    /// Member records or configuration could not be parsed.
    #[error("invalid tree data: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TreeError>;
