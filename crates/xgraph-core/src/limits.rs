//! Structural limits shared by every XGraph reader and writer.

use std::fmt;

use crate::error::TreeError;
use crate::node::NodeId;

/// Maximum number of direct children a node may own.
pub const MAX_NODES: usize = 4;

/// Maximum number of goals a node may carry.
pub const MAX_GOALS: usize = 3;

/// Maximum depth of any node, with the root at depth 0.
pub const MAX_DEPTH: usize = 255;

/// Header totals are stored as 16-bit counts.
pub const MAX_TOTAL: usize = u16::MAX as usize;

/// The bound that a node or tree violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Limit {
    /// Goals on a single node.
    Goals,
    /// Direct children of a single node.
    Children,
    /// Distance from the root.
    Depth,
    /// Nodes in the whole tree.
    TotalNodes,
    /// Goals in the whole tree.
    TotalGoals,
}

impl Limit {
    /// The inclusive upper bound for this limit.
    pub const fn max(self) -> usize {
        match self {
            Limit::Goals => MAX_GOALS,
            Limit::Children => MAX_NODES,
            Limit::Depth => MAX_DEPTH,
            Limit::TotalNodes | Limit::TotalGoals => MAX_TOTAL,
        }
    }

    /// Fail with [`TreeError::LimitExceeded`] if `found` is over the bound.
    pub fn check(self, node: NodeId, found: usize) -> Result<(), TreeError> {
        let max = self.max();
        if found > max {
            return Err(TreeError::LimitExceeded {
                node,
                limit: self,
                found,
                max,
            });
        }
        Ok(())
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Limit::Goals => write!(f, "goal count"),
            Limit::Children => write!(f, "children count"),
            Limit::Depth => write!(f, "depth"),
            Limit::TotalNodes => write!(f, "total node count"),
            Limit::TotalGoals => write!(f, "total goal count"),
        }
    }
}

/// Check the per-node bounds for a node about to be written or just read.
pub fn check_node(
    node: NodeId,
    goals: usize,
    children: usize,
    depth: usize,
) -> Result<(), TreeError> {
    Limit::Depth.check(node, depth)?;
    Limit::Goals.check(node, goals)?;
    Limit::Children.check(node, children)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_inclusive() {
        assert!(check_node(0, MAX_GOALS, MAX_NODES, MAX_DEPTH).is_ok());
    }

    #[test]
    fn each_bound_reports_its_limit() {
        let err = check_node(7, MAX_GOALS + 1, 0, 0).unwrap_err();
        assert_eq!(
            err,
            TreeError::LimitExceeded {
                node: 7,
                limit: Limit::Goals,
                found: 4,
                max: 3,
            }
        );

        let err = check_node(7, 0, MAX_NODES + 1, 0).unwrap_err();
        assert!(matches!(
            err,
            TreeError::LimitExceeded { limit: Limit::Children, found: 5, .. }
        ));

        let err = check_node(7, 0, 0, MAX_DEPTH + 1).unwrap_err();
        assert!(matches!(
            err,
            TreeError::LimitExceeded { limit: Limit::Depth, found: 256, .. }
        ));
    }

    #[test]
    fn limit_display() {
        let err = Limit::Children.check(2, 9).unwrap_err();
        assert_eq!(
            err.to_string(),
            "node 2: children count of 9 exceeds the maximum of 4"
        );
    }
}
