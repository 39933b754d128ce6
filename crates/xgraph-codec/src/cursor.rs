//! Positional byte cursors with bounds checking and alignment control.
//!
//! [`ByteReader`] borrows a byte slice and never returns partial data: every
//! read either consumes its full width or fails without moving. [`ByteWriter`]
//! owns a growable buffer and only ever exposes the written prefix.
//!
//! Both carry an [`Endian`] applied to every multi-byte primitive. GUIDs
//! follow the same order for their first three groups; the trailing eight
//! octets are never reversed.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use xgraph_core::Guid;

/// Starting capacity of a fresh [`ByteWriter`].
const INITIAL_CAPACITY: usize = 256;

/// Byte order for multi-byte primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Endian {
    #[default]
    Little,
    Big,
}

/// Errors raised by cursor primitives.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CursorError {
    #[error("read of {width} bytes at position {position} overruns buffer of {len} bytes")]
    OutOfBounds {
        position: usize,
        width: usize,
        len: usize,
    },

    #[error("string at position {position} has no NUL terminator")]
    MissingTerminator { position: usize },

    #[error("string at position {position} is not valid UTF-8")]
    InvalidUtf8 { position: usize },

    #[error("string contains an interior NUL byte")]
    InteriorNul,

    #[error("alignment {0} is not a power of two")]
    InvalidAlignment(usize),
}

fn aligned(position: usize, alignment: usize, len: usize) -> Result<usize, CursorError> {
    if !alignment.is_power_of_two() {
        return Err(CursorError::InvalidAlignment(alignment));
    }
    let padded = position
        .checked_add(alignment - 1)
        .ok_or(CursorError::OutOfBounds {
            position,
            width: alignment,
            len,
        })?;
    Ok(padded & !(alignment - 1))
}

macro_rules! read_number {
    ($(#[$doc:meta])* $name:ident, $ty:ty) => {
        $(#[$doc])*
        pub fn $name(&mut self) -> Result<$ty, CursorError> {
            let bytes = self.take_array::<{ std::mem::size_of::<$ty>() }>()?;
            Ok(match self.endian {
                Endian::Little => <$ty>::from_le_bytes(bytes),
                Endian::Big => <$ty>::from_be_bytes(bytes),
            })
        }
    };
}

macro_rules! write_number {
    ($(#[$doc:meta])* $name:ident, $ty:ty) => {
        $(#[$doc])*
        pub fn $name(&mut self, value: $ty) {
            match self.endian {
                Endian::Little => self.write_bytes(&value.to_le_bytes()),
                Endian::Big => self.write_bytes(&value.to_be_bytes()),
            }
        }
    };
}

/// Bounds-checked reader over a borrowed byte slice.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    buf: &'a [u8],
    position: usize,
    endian: Endian,
}

impl<'a> ByteReader<'a> {
    pub fn new(buf: &'a [u8], endian: Endian) -> Self {
        Self {
            buf,
            position: 0,
            endian,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Bytes left before the end; zero if alignment moved past it.
    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.position)
    }

    /// Move to an absolute position. Bounds are checked by the next read.
    pub fn seek(&mut self, position: usize) {
        self.position = position;
    }

    /// Consume `width` bytes, or fail without moving.
    pub fn read_bytes(&mut self, width: usize) -> Result<&'a [u8], CursorError> {
        let out_of_bounds = CursorError::OutOfBounds {
            position: self.position,
            width,
            len: self.buf.len(),
        };
        let end = self.position.checked_add(width).ok_or(out_of_bounds.clone())?;
        let bytes = self.buf.get(self.position..end).ok_or(out_of_bounds)?;
        self.position = end;
        Ok(bytes)
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N], CursorError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    /// Read a boolean stored as one byte; any nonzero value is `true`.
    pub fn read_bool(&mut self) -> Result<bool, CursorError> {
        Ok(self.read_u8()? != 0)
    }

    pub fn read_u8(&mut self) -> Result<u8, CursorError> {
        let [b] = self.take_array::<1>()?;
        Ok(b)
    }

    read_number!(read_i16, i16);
    read_number!(read_u16, u16);
    read_number!(read_i32, i32);
    read_number!(read_u32, u32);
    read_number!(read_i64, i64);
    read_number!(read_u64, u64);
    read_number!(read_f32, f32);
    read_number!(read_f64, f64);

    /// Read UTF-8 bytes up to and including a NUL terminator.
    pub fn read_cstring(&mut self) -> Result<String, CursorError> {
        let start = self.position;
        let rest = self.buf.get(start..).unwrap_or(&[]);
        let nul = rest
            .iter()
            .position(|&b| b == 0)
            .ok_or(CursorError::MissingTerminator { position: start })?;
        let text = std::str::from_utf8(&rest[..nul])
            .map_err(|_| CursorError::InvalidUtf8 { position: start })?;
        self.position = start + nul + 1;
        Ok(text.to_string())
    }

    /// Read a 16-byte GUID in this reader's byte order.
    pub fn read_guid(&mut self) -> Result<Guid, CursorError> {
        let bytes = self.take_array::<16>()?;
        Ok(match self.endian {
            Endian::Little => Guid::from_bytes_le(bytes),
            Endian::Big => Guid::from_bytes(bytes),
        })
    }

    /// Skip to the next multiple of `alignment`. Skipped bytes are not inspected.
    pub fn read_alignment(&mut self, alignment: usize) -> Result<(), CursorError> {
        self.position = aligned(self.position, alignment, self.buf.len())?;
        Ok(())
    }
}

/// Writer over an owned, growable buffer.
#[derive(Debug, Clone)]
pub struct ByteWriter {
    buf: Vec<u8>,
    endian: Endian,
}

impl ByteWriter {
    pub fn new(endian: Endian) -> Self {
        Self::with_capacity(INITIAL_CAPACITY, endian)
    }

    pub fn with_capacity(capacity: usize, endian: Endian) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
            endian,
        }
    }

    pub fn position(&self) -> usize {
        self.buf.len()
    }

    /// The bytes written so far.
    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    /// Finish writing and return exactly the written bytes.
    pub fn into_bytes(mut self) -> Vec<u8> {
        self.buf.shrink_to_fit();
        self.buf
    }

    /// Grow to at least `additional` free bytes, doubling the capacity.
    fn ensure_capacity(&mut self, additional: usize) {
        let required = self.buf.len() + additional;
        if required > self.buf.capacity() {
            let target = (self.buf.capacity() * 2).max(required);
            self.buf.reserve_exact(target - self.buf.len());
        }
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.ensure_capacity(bytes.len());
        self.buf.extend_from_slice(bytes);
    }

    pub fn write_bool(&mut self, value: bool) {
        self.write_u8(u8::from(value));
    }

    pub fn write_u8(&mut self, value: u8) {
        self.write_bytes(&[value]);
    }

    write_number!(write_i16, i16);
    write_number!(write_u16, u16);
    write_number!(write_i32, i32);
    write_number!(write_u32, u32);
    write_number!(write_i64, i64);
    write_number!(write_u64, u64);
    write_number!(write_f32, f32);
    write_number!(write_f64, f64);

    /// Write UTF-8 bytes followed by a NUL terminator.
    pub fn write_cstring(&mut self, value: &str) -> Result<(), CursorError> {
        if value.as_bytes().contains(&0) {
            return Err(CursorError::InteriorNul);
        }
        self.ensure_capacity(value.len() + 1);
        self.buf.extend_from_slice(value.as_bytes());
        self.buf.push(0);
        Ok(())
    }

    /// Write a GUID in this writer's byte order.
    pub fn write_guid(&mut self, guid: &Guid) {
        match self.endian {
            Endian::Little => self.write_bytes(&guid.to_bytes_le()),
            Endian::Big => self.write_bytes(guid.as_bytes()),
        }
    }

    /// Zero-fill up to the next multiple of `alignment`.
    pub fn write_padding(&mut self, alignment: usize) -> Result<(), CursorError> {
        let target = aligned(self.buf.len(), alignment, self.buf.len())?;
        self.ensure_capacity(target - self.buf.len());
        self.buf.resize(target, 0);
        Ok(())
    }
}
