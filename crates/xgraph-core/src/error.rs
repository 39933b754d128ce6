//! Errors raised while building or validating a tree.

use thiserror::Error;

use crate::limits::Limit;
use crate::node::NodeId;

/// Errors that can occur when validating a tree or parsing its identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("node {node}: {limit} of {found} exceeds the maximum of {max}")]
    LimitExceeded {
        node: NodeId,
        limit: Limit,
        found: usize,
        max: usize,
    },

    #[error("malformed identifier {text:?}: {reason}")]
    MalformedIdentifier { text: String, reason: String },
}
