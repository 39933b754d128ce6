//! Blob to tree.
//!
//! The trailer is verified before any header field is interpreted. After
//! that the body is replayed pre-order; the per-node counts drive the
//! recursion and the header totals are only cross-checked at the end.

use tracing::{debug, trace};

use xgraph_core::{limits, Goal, Node, NodeId, ROOT_PARENT_ID};

use crate::checksum;
use crate::cursor::ByteReader;
use crate::error::{CountKind, XGraphError};
use crate::format::{CodecOptions, Header, NODE_ALIGN};

/// Header and trailer of a blob, read without parsing the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobInfo {
    pub header: Header,
    /// Base64 MD5 digest stored in the trailer.
    pub checksum: String,
    /// Total blob length including the trailer.
    pub len: usize,
}

/// Deserializes XGraph blobs into trees.
#[derive(Debug, Clone, Copy, Default)]
pub struct Decoder {
    options: CodecOptions,
}

impl Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: CodecOptions) -> Self {
        Self { options }
    }

    /// Decode a complete blob. No partial tree is ever returned.
    pub fn decode(&self, bytes: &[u8]) -> Result<Node, XGraphError> {
        let covered = checksum::verify(bytes)?;
        let mut reader = ByteReader::new(covered, self.options.endian);
        let header = Header::read(&mut reader)?;

        let mut totals = Totals::default();
        let root = read_node(&mut reader, None, 0, &mut totals)?;

        if reader.position() != covered.len() {
            return Err(XGraphError::TrailingBytes {
                position: reader.position(),
                trailer: covered.len(),
            });
        }
        check_count(CountKind::Nodes, header.node_count, totals.nodes)?;
        check_count(CountKind::Goals, header.goal_count, totals.goals)?;

        debug!(
            nodes = totals.nodes,
            goals = totals.goals,
            len = bytes.len(),
            "decoded xgraph"
        );
        Ok(root)
    }

    /// Verify the trailer and read the header only.
    pub fn inspect(&self, bytes: &[u8]) -> Result<BlobInfo, XGraphError> {
        let covered = checksum::verify(bytes)?;
        let stored = &bytes[covered.len()..bytes.len() - 1];
        let mut reader = ByteReader::new(covered, self.options.endian);
        let header = Header::read(&mut reader)?;
        Ok(BlobInfo {
            header,
            checksum: String::from_utf8_lossy(stored).into_owned(),
            len: bytes.len(),
        })
    }
}

#[derive(Debug, Default)]
struct Totals {
    nodes: usize,
    goals: usize,
}

fn check_count(kind: CountKind, header: u16, actual: usize) -> Result<(), XGraphError> {
    if header as usize != actual {
        return Err(XGraphError::HeaderCountMismatch {
            kind,
            header: header as usize,
            actual,
        });
    }
    Ok(())
}

fn read_node(
    reader: &mut ByteReader<'_>,
    parent: Option<NodeId>,
    depth: usize,
    totals: &mut Totals,
) -> Result<Node, XGraphError> {
    let id = reader.read_i16()?;
    let parent_id = reader.read_i16()?;
    let root_flag = reader.read_bool()?;
    let goal_count = reader.read_u16()? as usize;
    let children_count = reader.read_u16()? as usize;
    limits::check_node(id, goal_count, children_count, depth)?;

    let expected = parent.unwrap_or(ROOT_PARENT_ID);
    if parent_id != expected || root_flag != parent.is_none() {
        return Err(XGraphError::InvalidLink {
            node: id,
            found: parent_id,
            expected,
            root_flag,
        });
    }
    trace!(id, parent_id, depth, goal_count, children_count, "reading node");

    let mut node = Node::new(id, parent_id);
    for _ in 0..goal_count {
        let guid = reader.read_guid()?;
        let name = reader.read_cstring()?;
        node.add_goal(Goal::new(guid).with_name(name));
    }
    reader.read_alignment(NODE_ALIGN)?;

    totals.nodes += 1;
    totals.goals += goal_count;

    for _ in 0..children_count {
        let child = read_node(reader, Some(id), depth + 1, totals)?;
        node.children.push(child);
    }
    Ok(node)
}

/// Decode with the default little-endian options.
pub fn decode(bytes: &[u8]) -> Result<Node, XGraphError> {
    Decoder::new().decode(bytes)
}

/// Read the header and trailer of a little-endian blob.
pub fn read_header(bytes: &[u8]) -> Result<BlobInfo, XGraphError> {
    Decoder::new().inspect(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checksum::TRAILER_LEN;
    use crate::cursor::{ByteWriter, Endian};
    use crate::encoder::encode;
    use crate::format::{HEADER_LEN, MAGIC, VERSION};

    /// Seal a hand-built body so it passes the checksum.
    fn seal(writer: ByteWriter) -> Vec<u8> {
        let mut bytes = writer.into_bytes();
        bytes.extend_from_slice(checksum::checksum(&bytes).as_bytes());
        bytes.push(0);
        bytes
    }

    fn header(writer: &mut ByteWriter, node_count: u16, goal_count: u16) {
        Header {
            version: VERSION,
            magic: MAGIC,
            node_count,
            goal_count,
        }
        .write(writer)
        .unwrap();
    }

    fn raw_node(writer: &mut ByteWriter, id: i16, parent: i16, root: bool, goals: u16, children: u16) {
        writer.write_i16(id);
        writer.write_i16(parent);
        writer.write_bool(root);
        writer.write_u16(goals);
        writer.write_u16(children);
        writer.write_padding(NODE_ALIGN).unwrap();
    }

    #[test]
    fn round_trip_small_tree() {
        let root = Node::root(0)
            .with_child(Node::new(1, 0))
            .with_child(Node::new(2, 0).with_child(Node::new(3, 2)));
        let decoded = decode(&encode(&root).unwrap()).unwrap();
        assert_eq!(decoded, root);
    }

    #[test]
    fn inspect_reports_header_and_trailer() {
        let root = Node::root(0).with_child(Node::new(1, 0));
        let bytes = encode(&root).unwrap();
        let info = read_header(&bytes).unwrap();
        assert_eq!(info.header.node_count, 2);
        assert_eq!(info.header.goal_count, 0);
        assert_eq!(info.len, bytes.len());
        assert_eq!(info.checksum, checksum::checksum(&bytes[..bytes.len() - TRAILER_LEN]));
    }

    #[test]
    fn child_count_over_limit_rejected() {
        let mut w = ByteWriter::new(Endian::Little);
        header(&mut w, 1, 0);
        raw_node(&mut w, 0, -1, true, 0, 5);
        let err = decode(&seal(w)).unwrap_err();
        assert!(matches!(
            err,
            XGraphError::LimitExceeded { limit: xgraph_core::Limit::Children, found: 5, .. }
        ));
    }

    #[test]
    fn goal_count_over_limit_rejected() {
        let mut w = ByteWriter::new(Endian::Little);
        header(&mut w, 2, 4);
        raw_node(&mut w, 0, -1, true, 4, 1);
        let err = decode(&seal(w)).unwrap_err();
        assert!(matches!(
            err,
            XGraphError::LimitExceeded { node: 0, limit: xgraph_core::Limit::Goals, found: 4, max: 3 }
        ));
    }

    #[test]
    fn node_at_depth_256_rejected() {
        let mut w = ByteWriter::new(Endian::Little);
        header(&mut w, 257, 0);
        raw_node(&mut w, 0, -1, true, 0, 1);
        for id in 1..=256i16 {
            let children = if id == 256 { 0 } else { 1 };
            raw_node(&mut w, id, id - 1, false, 0, children);
        }
        let err = decode(&seal(w)).unwrap_err();
        assert!(matches!(
            err,
            XGraphError::LimitExceeded { node: 256, limit: xgraph_core::Limit::Depth, found: 256, max: 255 }
        ));
    }

    #[test]
    fn zero_node_header_rejected_before_body() {
        let mut w = ByteWriter::new(Endian::Little);
        header(&mut w, 0, 0);
        raw_node(&mut w, 0, -1, true, 0, 0);
        assert!(matches!(
            decode(&seal(w)),
            Err(XGraphError::LimitExceeded { limit: xgraph_core::Limit::TotalNodes, found: 0, .. })
        ));
    }

    #[test]
    fn wrong_parent_link_rejected() {
        let mut w = ByteWriter::new(Endian::Little);
        header(&mut w, 2, 0);
        raw_node(&mut w, 0, -1, true, 0, 1);
        raw_node(&mut w, 1, 7, false, 0, 0);
        let err = decode(&seal(w)).unwrap_err();
        assert_eq!(
            err,
            XGraphError::InvalidLink {
                node: 1,
                found: 7,
                expected: 0,
                root_flag: false,
            }
        );
    }

    #[test]
    fn root_without_flag_rejected() {
        let mut w = ByteWriter::new(Endian::Little);
        header(&mut w, 1, 0);
        raw_node(&mut w, 0, -1, false, 0, 0);
        assert!(matches!(
            decode(&seal(w)),
            Err(XGraphError::InvalidLink { node: 0, root_flag: false, .. })
        ));
    }

    #[test]
    fn header_totals_must_match_body() {
        let mut w = ByteWriter::new(Endian::Little);
        header(&mut w, 3, 0);
        raw_node(&mut w, 0, -1, true, 0, 0);
        assert_eq!(
            decode(&seal(w)).unwrap_err(),
            XGraphError::HeaderCountMismatch {
                kind: CountKind::Nodes,
                header: 3,
                actual: 1,
            }
        );
    }

    #[test]
    fn extra_body_bytes_rejected() {
        let mut w = ByteWriter::new(Endian::Little);
        header(&mut w, 1, 0);
        raw_node(&mut w, 0, -1, true, 0, 0);
        w.write_u64(0);
        assert_eq!(
            decode(&seal(w)).unwrap_err(),
            XGraphError::TrailingBytes {
                position: HEADER_LEN + 16,
                trailer: HEADER_LEN + 24,
            }
        );
    }

    #[test]
    fn missing_children_is_bounds_violation() {
        let mut w = ByteWriter::new(Endian::Little);
        header(&mut w, 2, 0);
        raw_node(&mut w, 0, -1, true, 0, 1);
        assert!(matches!(
            decode(&seal(w)),
            Err(XGraphError::BoundsViolation(_))
        ));
    }

    #[test]
    fn checksum_is_checked_before_header() {
        let mut bytes = encode(&Node::root(0)).unwrap();
        bytes[0] ^= 0xFF;
        assert!(matches!(
            decode(&bytes),
            Err(XGraphError::ChecksumMismatch { .. })
        ));
    }
}
