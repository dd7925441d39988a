// Copyright 2025 the OrbitViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arena tree for hierarchical charts.
//!
//! Nodes live in one `Vec` and refer to each other by [`NodeId`]. A node is owned by the tree,
//! never by its parent, so there are no reference cycles to manage.

extern crate alloc;

use alloc::vec;
use alloc::vec::Vec;

use smallvec::SmallVec;

/// Index of a node inside a [`Tree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    /// The root node of every tree.
    pub const ROOT: Self = Self(0);

    /// Position of the node in arena order (suitable for indexing per-node output vectors).
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Errors returned by tree mutation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// The id does not belong to this tree.
    #[error("node {0:?} does not exist in this tree")]
    UnknownNode(NodeId),
    /// The tree cannot address more nodes.
    #[error("tree is full")]
    Full,
}

#[derive(Clone, Debug)]
struct Node<T> {
    data: T,
    parent: Option<NodeId>,
    children: SmallVec<[NodeId; 4]>,
    depth: u32,
}

/// A rooted tree with arena storage.
///
/// Nodes are never removed, so ids stay valid for the life of the tree and arena order is
/// insertion order (parents always precede their children).
#[derive(Clone, Debug)]
pub struct Tree<T> {
    nodes: Vec<Node<T>>,
}

impl<T> Tree<T> {
    /// Creates a tree holding only `root`.
    pub fn new(root: T) -> Self {
        Self {
            nodes: vec![Node {
                data: root,
                parent: None,
                children: SmallVec::new(),
                depth: 0,
            }],
        }
    }

    /// The root id.
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Appends a child under `parent` and returns its id.
    pub fn add_child(&mut self, parent: NodeId, data: T) -> Result<NodeId, TreeError> {
        let depth = self
            .nodes
            .get(parent.index())
            .ok_or(TreeError::UnknownNode(parent))?
            .depth
            + 1;
        let index = u32::try_from(self.nodes.len()).map_err(|_| TreeError::Full)?;
        let id = NodeId(index);
        self.nodes.push(Node {
            data,
            parent: Some(parent),
            children: SmallVec::new(),
            depth,
        });
        self.nodes[parent.index()].children.push(id);
        Ok(id)
    }

    /// Number of nodes, including the root.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`: a tree has at least its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node payload.
    pub fn get(&self, id: NodeId) -> Option<&T> {
        self.nodes.get(id.index()).map(|n| &n.data)
    }

    /// Mutable node payload.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.nodes.get_mut(id.index()).map(|n| &mut n.data)
    }

    /// Parent of `id` (`None` for the root or a foreign id).
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.index()).and_then(|n| n.parent)
    }

    /// Children of `id` in insertion order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id.index())
            .map_or(&[][..], |n| n.children.as_slice())
    }

    /// Depth of `id` (the root is at depth 0).
    pub fn depth(&self, id: NodeId) -> u32 {
        self.nodes.get(id.index()).map_or(0, |n| n.depth)
    }

    /// Returns `true` if `id` has no children.
    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.children(id).is_empty()
    }

    /// Deepest node depth.
    pub fn max_depth(&self) -> u32 {
        self.nodes.iter().map(|n| n.depth).max().unwrap_or(0)
    }

    /// Iterates over node ids in arena order.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "`add_child` refuses to grow past `u32::MAX` nodes"
    )]
    pub fn ids(&self) -> impl DoubleEndedIterator<Item = NodeId> + ExactSizeIterator + '_ {
        (0..self.nodes.len()).map(|i| NodeId(i as u32))
    }

    /// Pre-order traversal from the root, children in insertion order.
    pub fn depth_first(&self) -> DepthFirst<'_, T> {
        DepthFirst {
            tree: self,
            stack: vec![NodeId::ROOT],
        }
    }

    /// Leaves in depth-first order.
    pub fn leaves(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.depth_first().filter(|&id| self.is_leaf(id))
    }

    /// Number of leaves under `id` (a leaf counts itself).
    pub fn leaf_count(&self, id: NodeId) -> usize {
        let mut stack = vec![id];
        let mut count = 0;
        while let Some(n) = stack.pop() {
            let children = self.children(n);
            if children.is_empty() {
                count += 1;
            } else {
                stack.extend_from_slice(children);
            }
        }
        count
    }

    /// A tree with the same shape and ids whose payloads are `f(id, data)`.
    pub fn map<U>(&self, f: impl Fn(NodeId, &T) -> U) -> Tree<U> {
        Tree {
            nodes: self
                .nodes
                .iter()
                .zip(self.ids())
                .map(|(n, id)| Node {
                    data: f(id, &n.data),
                    parent: n.parent,
                    children: n.children.clone(),
                    depth: n.depth,
                })
                .collect(),
        }
    }

    /// Bottom-up value sums, indexed by [`NodeId::index`].
    ///
    /// A leaf keeps its own value; an inner node becomes `max(own, sum of children)` so a
    /// parent always covers its children.
    pub fn subtree_sums(&self, value_of: impl Fn(&T) -> f64) -> Vec<f64> {
        let mut sums: Vec<f64> = self
            .nodes
            .iter()
            .map(|n| {
                let v = value_of(&n.data);
                if v.is_finite() { v.max(0.0) } else { 0.0 }
            })
            .collect();
        // Children always come after their parent in arena order.
        let mut child_totals = vec![0.0; self.nodes.len()];
        for i in (0..self.nodes.len()).rev() {
            if !self.nodes[i].children.is_empty() {
                sums[i] = sums[i].max(child_totals[i]);
            }
            if let Some(parent) = self.nodes[i].parent {
                child_totals[parent.index()] += sums[i];
            }
        }
        sums
    }
}

/// Pre-order iterator returned by [`Tree::depth_first`].
#[derive(Debug)]
pub struct DepthFirst<'a, T> {
    tree: &'a Tree<T>,
    stack: Vec<NodeId>,
}

impl<T> Iterator for DepthFirst<'_, T> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.tree.children(id).iter().rev().copied());
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec::Vec;

    use super::*;

    fn sample() -> (Tree<f64>, [NodeId; 5]) {
        let mut t = Tree::new(0.0);
        let a = t.add_child(t.root(), 6.0).unwrap();
        let b = t.add_child(t.root(), 4.0).unwrap();
        let a1 = t.add_child(a, 2.0).unwrap();
        let a2 = t.add_child(a, 4.0).unwrap();
        let b1 = t.add_child(b, 1.0).unwrap();
        (t, [a, b, a1, a2, b1])
    }

    #[test]
    fn depth_tracks_parent_depth_plus_one() {
        let (t, [a, b, a1, _, b1]) = sample();
        assert_eq!(t.depth(t.root()), 0);
        assert_eq!(t.depth(a), 1);
        assert_eq!(t.depth(b), 1);
        assert_eq!(t.depth(a1), 2);
        assert_eq!(t.depth(b1), t.depth(t.parent(b1).unwrap()) + 1);
        assert_eq!(t.max_depth(), 2);
    }

    #[test]
    fn every_non_root_node_has_exactly_one_parent() {
        let (t, _) = sample();
        for id in t.ids().skip(1) {
            let parent = t.parent(id).expect("non-root has a parent");
            let listed = t.children(parent).iter().filter(|&&c| c == id).count();
            assert_eq!(listed, 1);
        }
        assert_eq!(t.parent(t.root()), None);
    }

    #[test]
    fn depth_first_is_pre_order_in_insertion_order() {
        let (t, [a, b, a1, a2, b1]) = sample();
        let order: Vec<NodeId> = t.depth_first().collect();
        assert_eq!(order, [NodeId::ROOT, a, a1, a2, b, b1]);
        let leaves: Vec<NodeId> = t.leaves().collect();
        assert_eq!(leaves, [a1, a2, b1]);
        assert_eq!(t.leaf_count(t.root()), 3);
        assert_eq!(t.leaf_count(b1), 1);
    }

    #[test]
    fn subtree_sums_cover_children() {
        let (t, [a, b, ..]) = sample();
        let sums = t.subtree_sums(|v| *v);
        assert_eq!(sums[NodeId::ROOT.index()], 10.0);
        assert_eq!(sums[a.index()], 6.0);
        // `b` declares 4 but its only child is 1, so the declared value wins.
        assert_eq!(sums[b.index()], 4.0);
    }

    #[test]
    fn foreign_ids_are_rejected() {
        let mut t = Tree::new(());
        assert_eq!(
            t.add_child(NodeId(7), ()),
            Err(TreeError::UnknownNode(NodeId(7)))
        );
        assert!(t.children(NodeId(7)).is_empty());
        assert!(t.get(NodeId(7)).is_none());
    }

    #[test]
    fn map_keeps_shape() {
        let (t, [a, _, a1, ..]) = sample();
        let m = t.map(|id, v| (id, *v * 2.0));
        assert_eq!(m.len(), t.len());
        assert_eq!(m.get(a1), Some(&(a1, 4.0)));
        assert_eq!(m.parent(a1), Some(a));
        assert_eq!(m.children(a), t.children(a));
    }

    #[test]
    fn get_mut_updates_payload() {
        let (mut t, [a, ..]) = sample();
        *t.get_mut(a).unwrap() = 9.0;
        assert_eq!(t.get(a), Some(&9.0));
    }
}
