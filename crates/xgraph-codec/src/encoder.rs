//! Tree to blob.

use tracing::{debug, trace};

use xgraph_core::{limits, Node, NodeId, ROOT_PARENT_ID};

use crate::checksum;
use crate::cursor::ByteWriter;
use crate::error::XGraphError;
use crate::format::{CodecOptions, Header, NODE_ALIGN};

/// Serializes trees into XGraph blobs.
#[derive(Debug, Clone, Copy, Default)]
pub struct Encoder {
    options: CodecOptions,
}

impl Encoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: CodecOptions) -> Self {
        Self { options }
    }

    /// Encode `root` and its whole subtree.
    ///
    /// Fails on the first node, in pre-order, that breaks a structural
    /// limit; nothing is returned for an invalid tree.
    pub fn encode(&self, root: &Node) -> Result<Vec<u8>, XGraphError> {
        let header = Header::for_tree(root)?;
        let mut writer = ByteWriter::new(self.options.endian);
        header.write(&mut writer)?;
        write_node(&mut writer, root, ROOT_PARENT_ID, 0)?;

        let trailer = checksum::checksum(writer.as_slice());
        writer.write_cstring(&trailer)?;

        let bytes = writer.into_bytes();
        debug!(
            nodes = header.node_count,
            goals = header.goal_count,
            len = bytes.len(),
            "encoded xgraph"
        );
        Ok(bytes)
    }
}

fn write_node(
    writer: &mut ByteWriter,
    node: &Node,
    parent_id: NodeId,
    depth: usize,
) -> Result<(), XGraphError> {
    limits::check_node(node.id, node.goals.len(), node.children.len(), depth)?;
    trace!(id = node.id, parent_id, depth, "writing node");

    writer.write_i16(node.id);
    writer.write_i16(parent_id);
    writer.write_bool(depth == 0);
    writer.write_u16(node.goals.len() as u16);
    writer.write_u16(node.children.len() as u16);
    for goal in &node.goals {
        writer.write_guid(&goal.guid);
        writer.write_cstring(goal.name.as_deref().unwrap_or(""))?;
    }
    writer.write_padding(NODE_ALIGN)?;

    for child in &node.children {
        write_node(writer, child, node.id, depth + 1)?;
    }
    Ok(())
}

/// Encode with the default little-endian options.
pub fn encode(root: &Node) -> Result<Vec<u8>, XGraphError> {
    Encoder::new().encode(root)
}
