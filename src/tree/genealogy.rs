//! GenealogyTree - the binary network the viewer reads from.
//!
//! The topology lives in petgraph's StableGraph, with every parent→child edge
//! weighted by the [`Side`] it fills. Member display data is kept in a
//! parallel vector indexed by the graph's node index, the same SoA split the
//! rest of the crate uses for per-node data.
//!
//! The tree is built once and then only read. Re-rooting the view never
//! touches it: parent links always describe the full network.

use petgraph::stable_graph::{NodeIndex, StableGraph};
use petgraph::visit::EdgeRef;
use petgraph::{Directed, Direction};
use std::collections::HashMap;

use super::member::{Member, MemberId};
use super::side::Side;
use crate::error::{Result, TreeError};

/// The genealogy network.
#[derive(Debug, Clone, Default)]
pub struct GenealogyTree {
    /// Topology. Nodes store their stable MemberId, edges the child side.
    graph: StableGraph<MemberId, Side, Directed>,

    /// Map from stable MemberId to petgraph NodeIndex
    id_to_index: HashMap<MemberId, NodeIndex>,

    /// Member data, indexed by NodeIndex::index()
    members: Vec<Member>,

    /// Next member ID to assign
    next_id: u32,
}

impl GenealogyTree {
    /// Create a new empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Construction
    // =========================================================================

    /// Add a detached member. Returns its stable ID.
    pub fn add_member(&mut self, member: Member) -> MemberId {
        let id = MemberId(self.next_id);
        self.next_id += 1;

        let index = self.graph.add_node(id);
        self.id_to_index.insert(id, index);

        let slot = index.index();
        if slot >= self.members.len() {
            self.members.resize_with(slot + 1, Member::default);
        }
        self.members[slot] = member;
        id
    }

    /// Link `child` into the `side` slot of `parent`.
    pub fn attach(&mut self, parent: MemberId, side: Side, child: MemberId) -> Result<()> {
        let parent_index = self.index_of(parent)?;
        let child_index = self.index_of(child)?;

        if parent == child {
            return Err(TreeError::WouldCycle { parent, child });
        }
        if self.child(parent, side).is_some() {
            return Err(TreeError::SlotOccupied { parent, side });
        }
        if self.parent(child).is_some() {
            return Err(TreeError::AlreadyAttached(child));
        }
        if self.ancestors(parent).any(|ancestor| ancestor == child) {
            return Err(TreeError::WouldCycle { parent, child });
        }

        self.graph.add_edge(parent_index, child_index, side);
        Ok(())
    }

    /// Add a member and link it under `parent` in one step.
    pub fn add_child(&mut self, parent: MemberId, side: Side, member: Member) -> Result<MemberId> {
        self.index_of(parent)?;
        if self.child(parent, side).is_some() {
            return Err(TreeError::SlotOccupied { parent, side });
        }
        let child = self.add_member(member);
        self.attach(parent, side, child)?;
        Ok(child)
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Number of members.
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    /// Whether the tree has no members.
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Whether `id` names a member of this tree.
    pub fn contains(&self, id: MemberId) -> bool {
        self.id_to_index.contains_key(&id)
    }

    /// Get a member's data.
    pub fn member(&self, id: MemberId) -> Option<&Member> {
        self.id_to_index
            .get(&id)
            .and_then(|index| self.members.get(index.index()))
    }

    /// The child occupying `side`, if any.
    pub fn child(&self, id: MemberId, side: Side) -> Option<MemberId> {
        let index = *self.id_to_index.get(&id)?;
        self.graph
            .edges_directed(index, Direction::Outgoing)
            .find(|edge| *edge.weight() == side)
            .and_then(|edge| self.graph.node_weight(edge.target()).copied())
    }

    /// The left child, if any.
    #[inline]
    pub fn left(&self, id: MemberId) -> Option<MemberId> {
        self.child(id, Side::Left)
    }

    /// The right child, if any.
    #[inline]
    pub fn right(&self, id: MemberId) -> Option<MemberId> {
        self.child(id, Side::Right)
    }

    /// Whether the member has at least one child.
    pub fn has_children(&self, id: MemberId) -> bool {
        self.left(id).is_some() || self.right(id).is_some()
    }

    /// The member's parent in the full network.
    pub fn parent(&self, id: MemberId) -> Option<MemberId> {
        let index = *self.id_to_index.get(&id)?;
        self.graph
            .edges_directed(index, Direction::Incoming)
            .next()
            .and_then(|edge| self.graph.node_weight(edge.source()).copied())
    }

    /// Walk the parent chain upward, starting with the direct parent.
    pub fn ancestors(&self, id: MemberId) -> impl Iterator<Item = MemberId> + '_ {
        std::iter::successors(self.parent(id), move |&current| self.parent(current))
    }

    /// Members without a parent, in ID order.
    pub fn roots(&self) -> Vec<MemberId> {
        let mut roots: Vec<MemberId> = self
            .id_to_index
            .iter()
            .filter(|&(_, &index)| {
                self.graph
                    .edges_directed(index, Direction::Incoming)
                    .next()
                    .is_none()
            })
            .map(|(&id, _)| id)
            .collect();
        roots.sort_unstable();
        roots
    }

    /// Number of levels from `id` down to its deepest descendant.
    ///
    /// A leaf has depth 1; an unknown member has depth 0.
    pub fn max_depth(&self, id: MemberId) -> u32 {
        if !self.contains(id) {
            return 0;
        }
        let mut deepest = 0;
        let mut stack = vec![(id, 1u32)];
        while let Some((current, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            for side in Side::BOTH {
                if let Some(child) = self.child(current, side) {
                    stack.push((child, depth + 1));
                }
            }
        }
        deepest
    }

    /// Number of descendants below `id` (the member's downline).
    pub fn network_size(&self, id: MemberId) -> usize {
        let mut count = 0;
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            for side in Side::BOTH {
                if let Some(child) = self.child(current, side) {
                    count += 1;
                    stack.push(child);
                }
            }
        }
        count
    }

    /// Iterate all member IDs in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = MemberId> + '_ {
        self.graph
            .node_indices()
            .filter_map(|index| self.graph.node_weight(index).copied())
    }

    fn index_of(&self, id: MemberId) -> Result<NodeIndex> {
        self.id_to_index
            .get(&id)
            .copied()
            .ok_or(TreeError::UnknownMember(id))
    }
}
