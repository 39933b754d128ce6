//! The Node struct and whole-tree traversals.

use serde::{Deserialize, Serialize};

use crate::error::TreeError;
use crate::goal::Goal;
use crate::limits::{self, Limit};

/// Node identifier, unique only by convention within a tree.
pub type NodeId = i16;

/// Parent id carried by the root node.
pub const ROOT_PARENT_ID: NodeId = -1;

/// A node in an XGraph tree. Owns its goals and children outright.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub parent_id: NodeId,
    #[serde(default)]
    pub goals: Vec<Goal>,
    #[serde(default)]
    pub children: Vec<Node>,
}

impl Node {
    /// Create a node with no goals or children.
    pub fn new(id: NodeId, parent_id: NodeId) -> Self {
        Self {
            id,
            parent_id,
            goals: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Create a root node.
    pub fn root(id: NodeId) -> Self {
        Self::new(id, ROOT_PARENT_ID)
    }

    pub fn is_root(&self) -> bool {
        self.parent_id == ROOT_PARENT_ID
    }

    /// Builder form of [`Node::add_goal`].
    pub fn with_goal(mut self, goal: Goal) -> Self {
        self.add_goal(goal);
        self
    }

    pub fn add_goal(&mut self, goal: Goal) {
        self.goals.push(goal);
    }

    /// Builder form of [`Node::add_child`].
    pub fn with_child(mut self, child: Node) -> Self {
        self.add_child(child);
        self
    }

    /// Append a child, re-pointing its `parent_id` at this node.
    ///
    /// Limits are not enforced here; see [`Node::validate`].
    pub fn add_child(&mut self, mut child: Node) {
        child.parent_id = self.id;
        self.children.push(child);
    }

    /// Total nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Node::node_count).sum::<usize>()
    }

    /// Total goals carried by this subtree.
    pub fn goal_count(&self) -> usize {
        self.goals.len() + self.children.iter().map(Node::goal_count).sum::<usize>()
    }

    /// Height of this subtree; a lone node has depth 0.
    pub fn depth(&self) -> usize {
        self.children
            .iter()
            .map(|c| c.depth() + 1)
            .max()
            .unwrap_or(0)
    }

    /// Check every structural limit, treating `self` as the root.
    ///
    /// Reports the first violation in pre-order.
    pub fn validate(&self) -> Result<(), TreeError> {
        for (depth, node) in self.iter() {
            limits::check_node(node.id, node.goals.len(), node.children.len(), depth)?;
        }
        Limit::TotalNodes.check(self.id, self.node_count())?;
        Limit::TotalGoals.check(self.id, self.goal_count())?;
        Ok(())
    }

    /// Pre-order iterator yielding `(depth, node)` pairs, root at depth 0.
    pub fn iter(&self) -> PreOrder<'_> {
        PreOrder { stack: vec![(0, self)] }
    }
}

/// Pre-order walk over a tree. See [`Node::iter`].
pub struct PreOrder<'a> {
    stack: Vec<(usize, &'a Node)>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = (usize, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        // Reversed so the first child is popped next.
        for child in node.children.iter().rev() {
            self.stack.push((depth + 1, child));
        }
        Some((depth, node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goal::Guid;
    use crate::limits::{MAX_DEPTH, MAX_GOALS, MAX_NODES};

    fn goal() -> Goal {
        Goal::new(Guid::parse("502721f4-48cd-4379-821f-df0f0ba089ae").unwrap())
    }

    fn chain(len: usize) -> Node {
        let mut node = Node::new((len - 1) as NodeId, 0);
        for id in (0..len - 1).rev() {
            node = Node::new(id as NodeId, 0).with_child(node);
        }
        node.parent_id = ROOT_PARENT_ID;
        node
    }

    #[test]
    fn add_child_sets_parent_id() {
        let root = Node::root(0).with_child(Node::new(1, 42));
        assert!(root.is_root());
        assert_eq!(root.children[0].parent_id, 0);
        assert!(!root.children[0].is_root());
    }

    #[test]
    fn counts_cover_whole_tree() {
        let root = Node::root(0)
            .with_goal(goal())
            .with_child(Node::new(1, 0).with_goal(goal()).with_goal(goal()))
            .with_child(Node::new(2, 0).with_child(Node::new(3, 2).with_goal(goal())));
        assert_eq!(root.node_count(), 4);
        assert_eq!(root.goal_count(), 4);
        assert_eq!(root.depth(), 2);
    }

    #[test]
    fn pre_order_visits_parents_before_children() {
        let root = Node::root(0)
            .with_child(Node::new(1, 0).with_child(Node::new(2, 1)))
            .with_child(Node::new(3, 0));
        let visited: Vec<(usize, NodeId)> = root.iter().map(|(d, n)| (d, n.id)).collect();
        assert_eq!(visited, vec![(0, 0), (1, 1), (2, 2), (1, 3)]);
    }

    #[test]
    fn validate_accepts_trees_at_the_limits() {
        let mut root = Node::root(0);
        for _ in 0..MAX_GOALS {
            root.add_goal(goal());
        }
        for id in 1..=MAX_NODES {
            root.add_child(Node::new(id as NodeId, 0));
        }
        assert!(root.validate().is_ok());
        assert!(chain(MAX_DEPTH + 1).validate().is_ok());
    }

    #[test]
    fn validate_rejects_deep_chain() {
        let root = chain(MAX_DEPTH + 2);
        assert_eq!(root.depth(), 256);
        let err = root.validate().unwrap_err();
        assert!(matches!(
            err,
            TreeError::LimitExceeded { limit: Limit::Depth, found: 256, node: 256, .. }
        ));
    }

    #[test]
    fn validate_rejects_wide_node() {
        let mut child = Node::new(1, 0);
        for id in 0..=MAX_NODES {
            child.add_child(Node::new(10 + id as NodeId, 1));
        }
        let root = Node::root(0).with_child(child);
        let err = root.validate().unwrap_err();
        assert!(matches!(
            err,
            TreeError::LimitExceeded { limit: Limit::Children, node: 1, .. }
        ));
    }

    #[test]
    fn json_defaults_missing_lists() {
        let root: Node = serde_json::from_str(r#"{"id": 0, "parent_id": -1}"#).unwrap();
        assert_eq!(root, Node::root(0));
    }
}
