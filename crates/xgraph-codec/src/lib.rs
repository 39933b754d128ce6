//! Binary serialization format for XGraph goal trees.
//!
//! Encodes a rooted tree into a compact blob and decodes it back, rejecting
//! corrupted or malformed input.
//!
//! ## Blob Layout
//!
//! ```text
//! XGraph Blob Layout (little-endian):
//! ┌────────────────────────────────┐
//! │ Version: 0x22446688            │  4 bytes
//! │ (pad to 16)                    │
//! │ Magic: 0xB0B0BEBAFECA          │  8 bytes
//! │ node_count: u16                │  total over the tree
//! │ goal_count: u16                │  total over the tree
//! │ (pad to 16)                    │
//! ├────────────────────────────────┤
//! │ Node, repeated pre-order       │
//! │   id: i16                      │
//! │   parent_id: i16               │  -1 for the root
//! │   is_root: u8                  │
//! │   goal_count: u16              │  <= 3
//! │   children_count: u16          │  <= 4
//! │   goal × goal_count            │
//! │     guid: 16 bytes             │
//! │     name: UTF-8, NUL           │  empty when unnamed
//! │   (pad to 8)                   │
//! ├────────────────────────────────┤
//! │ base64(MD5(all above)), NUL    │  25 bytes
//! └────────────────────────────────┘
//! ```

pub mod checksum;
pub mod cursor;
mod decoder;
mod encoder;
mod error;
mod format;

pub use cursor::{ByteReader, ByteWriter, CursorError, Endian};
pub use decoder::{decode, read_header, BlobInfo, Decoder};
pub use encoder::{encode, Encoder};
pub use error::{CountKind, HeaderField, XGraphError};
pub use format::{CodecOptions, Header, HEADER_ALIGN, HEADER_LEN, MAGIC, NODE_ALIGN, VERSION};
