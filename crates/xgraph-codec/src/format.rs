//! Format constants, codec options and the fixed header.

use serde::{Deserialize, Serialize};

use xgraph_core::{Limit, Node, MAX_GOALS, ROOT_PARENT_ID};

use crate::cursor::{ByteReader, ByteWriter, Endian};
use crate::error::{HeaderField, XGraphError};

/// Format version tag, the first field of every blob.
pub const VERSION: i32 = 0x2244_6688;

/// Magic tag following the version.
pub const MAGIC: u64 = 0xB0B0_BEBA_FECA;

/// Alignment after the version and after the header counts.
pub const HEADER_ALIGN: usize = 16;

/// Alignment after each node's fixed fields and goals.
pub const NODE_ALIGN: usize = 8;

/// Size of the header once padded: version, pad, magic, two counts, pad.
pub const HEADER_LEN: usize = 32;

/// Options shared by the encoder and decoder.
///
/// The byte order is not recorded in the blob; both sides must agree on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CodecOptions {
    #[serde(default)]
    pub endian: Endian,
}

impl CodecOptions {
    pub fn new(endian: Endian) -> Self {
        Self { endian }
    }
}

/// The fixed header at the start of every blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub version: i32,
    pub magic: u64,
    /// Nodes in the whole tree.
    pub node_count: u16,
    /// Goals in the whole tree.
    pub goal_count: u16,
}

impl Header {
    /// Build the header for `root`, counting the full tree.
    pub fn for_tree(root: &Node) -> Result<Self, XGraphError> {
        let nodes = root.node_count();
        let goals = root.goal_count();
        Limit::TotalNodes.check(root.id, nodes)?;
        Limit::TotalGoals.check(root.id, goals)?;
        Ok(Self {
            version: VERSION,
            magic: MAGIC,
            node_count: nodes as u16,
            goal_count: goals as u16,
        })
    }

    pub fn write(&self, writer: &mut ByteWriter) -> Result<(), XGraphError> {
        writer.write_i32(self.version);
        writer.write_padding(HEADER_ALIGN)?;
        writer.write_u64(self.magic);
        writer.write_u16(self.node_count);
        writer.write_u16(self.goal_count);
        writer.write_padding(HEADER_ALIGN)?;
        Ok(())
    }

    /// Read and check the header.
    ///
    /// The totals are only sanity-checked here (at least one node, at most
    /// `MAX_GOALS` goals per node); they are compared with the parsed body
    /// once decoding finishes.
    pub fn read(reader: &mut ByteReader<'_>) -> Result<Self, XGraphError> {
        let version = reader.read_i32()?;
        if version != VERSION {
            return Err(XGraphError::FormatMismatch {
                field: HeaderField::Version,
                found: version as u32 as u64,
                expected: VERSION as u32 as u64,
            });
        }
        reader.read_alignment(HEADER_ALIGN)?;

        let magic = reader.read_u64()?;
        if magic != MAGIC {
            return Err(XGraphError::FormatMismatch {
                field: HeaderField::Magic,
                found: magic,
                expected: MAGIC,
            });
        }

        let node_count = reader.read_u16()?;
        let goal_count = reader.read_u16()?;
        if node_count == 0 {
            return Err(XGraphError::LimitExceeded {
                node: ROOT_PARENT_ID,
                limit: Limit::TotalNodes,
                found: 0,
                max: Limit::TotalNodes.max(),
            });
        }
        let max_goals = node_count as usize * MAX_GOALS;
        if goal_count as usize > max_goals {
            return Err(XGraphError::LimitExceeded {
                node: ROOT_PARENT_ID,
                limit: Limit::TotalGoals,
                found: goal_count as usize,
                max: max_goals,
            });
        }
        reader.read_alignment(HEADER_ALIGN)?;

        Ok(Self {
            version,
            magic,
            node_count,
            goal_count,
        })
    }
}
