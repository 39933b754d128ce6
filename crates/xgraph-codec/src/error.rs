//! Errors returned by the encoder and decoder.

use std::fmt;

use thiserror::Error;

use xgraph_core::{Limit, NodeId, TreeError};

use crate::cursor::CursorError;

/// A fixed header field checked against its format constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderField {
    Version,
    Magic,
}

impl fmt::Display for HeaderField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeaderField::Version => write!(f, "version"),
            HeaderField::Magic => write!(f, "magic"),
        }
    }
}

/// A header total compared against the parsed body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountKind {
    Nodes,
    Goals,
}

impl fmt::Display for CountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CountKind::Nodes => write!(f, "node"),
            CountKind::Goals => write!(f, "goal"),
        }
    }
}

/// Errors that can occur while encoding or decoding an XGraph blob.
///
/// Every error is terminal for the call that raised it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum XGraphError {
    #[error("format mismatch: {field} is {found:#x}, expected {expected:#x}")]
    FormatMismatch {
        field: HeaderField,
        found: u64,
        expected: u64,
    },

    #[error("checksum mismatch: trailer says {stored:?}, data hashes to {computed:?}")]
    ChecksumMismatch { stored: String, computed: String },

    /// `node` is [`xgraph_core::ROOT_PARENT_ID`] when the header totals are at fault.
    #[error("limit exceeded at node {node}: {limit} of {found} is over {max}")]
    LimitExceeded {
        node: NodeId,
        limit: Limit,
        found: usize,
        max: usize,
    },

    #[error("bounds violation: {0}")]
    BoundsViolation(#[from] CursorError),

    #[error("malformed identifier {text:?}: {reason}")]
    MalformedIdentifier { text: String, reason: String },

    #[error("node {node} links to parent {found} (root flag {root_flag}), expected parent {expected}")]
    InvalidLink {
        node: NodeId,
        found: NodeId,
        expected: NodeId,
        root_flag: bool,
    },

    #[error("header declares {header} {kind}s but the body holds {actual}")]
    HeaderCountMismatch {
        kind: CountKind,
        header: usize,
        actual: usize,
    },

    #[error("body ends at byte {position} but the trailer starts at byte {trailer}")]
    TrailingBytes { position: usize, trailer: usize },
}

impl From<TreeError> for XGraphError {
    fn from(e: TreeError) -> Self {
        match e {
            TreeError::LimitExceeded {
                node,
                limit,
                found,
                max,
            } => XGraphError::LimitExceeded {
                node,
                limit,
                found,
                max,
            },
            TreeError::MalformedIdentifier { text, reason } => {
                XGraphError::MalformedIdentifier { text, reason }
            }
        }
    }
}
