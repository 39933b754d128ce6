//! Core data model for XGraph trees.
//!
//! An XGraph is a strict, rooted tree. Every node carries a small, ordered set
//! of goals (GUID-identified records) and at most [`MAX_NODES`] children. The
//! structural limits in [`limits`] are shared by the encoder and decoder so
//! that both directions reject exactly the same trees.

pub mod error;
pub mod goal;
pub mod limits;
pub mod node;

pub use error::TreeError;
pub use goal::{Goal, Guid};
pub use limits::{Limit, MAX_DEPTH, MAX_GOALS, MAX_NODES};
pub use node::{Node, NodeId, ROOT_PARENT_ID};
