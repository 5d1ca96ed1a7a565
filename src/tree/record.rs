//! Loading a tree from nested member records.
//!
//! The upstream network API delivers each member with its `left` and `right`
//! children inlined. Keys the viewer does not use (`num_children`,
//! `parent_id`, `binary_placement`, ...) are ignored; parent links are
//! rebuilt from the nesting.

use serde::Deserialize;

use super::genealogy::GenealogyTree;
use super::member::{Member, MemberId};
use super::side::Side;
use crate::error::Result;

const SAMPLE_TREE: &str = include_str!("../../data/sample-tree.json");

/// One member plus its inlined children.
#[derive(Debug, Clone, Deserialize)]
pub struct MemberRecord {
    #[serde(flatten)]
    pub member: Member,
    #[serde(default)]
    pub left: Option<Box<MemberRecord>>,
    #[serde(default)]
    pub right: Option<Box<MemberRecord>>,
}

impl MemberRecord {
    fn child(&self, side: Side) -> Option<&MemberRecord> {
        match side {
            Side::Left => self.left.as_deref(),
            Side::Right => self.right.as_deref(),
        }
    }
}

impl GenealogyTree {
    /// Build a tree from a nested record. Returns the tree and the record root's ID.
    pub fn from_record(record: &MemberRecord) -> Result<(Self, MemberId)> {
        let mut tree = Self::new();
        let root = tree.add_member(record.member.clone());

        // Explicit stack keeps deep networks off the call stack.
        let mut pending = vec![(root, record)];
        while let Some((id, current)) = pending.pop() {
            for side in Side::BOTH {
                if let Some(child) = current.child(side) {
                    let child_id = tree.add_child(id, side, child.member.clone())?;
                    pending.push((child_id, child));
                }
            }
        }
        Ok((tree, root))
    }

    /// Parse a nested JSON record and build the tree.
    pub fn from_json(json: &str) -> Result<(Self, MemberId)> {
        let record: MemberRecord = serde_json::from_str(json)?;
        tracing::debug!(root = %record.member.username, "loaded member record");
        Self::from_record(&record)
    }

    /// The bundled demo network.
    pub fn sample() -> Result<(Self, MemberId)> {
        Self::from_json(SAMPLE_TREE)
    }
}
