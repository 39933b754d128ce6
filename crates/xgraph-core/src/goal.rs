//! Goals and their GUID identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::TreeError;

/// A 16-byte globally unique identifier.
///
/// Rendered as hyphenated lowercase hex (`8-4-4-4-12`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Guid(Uuid);

impl Guid {
    /// The all-zero GUID.
    pub const NIL: Guid = Guid(Uuid::nil());

    /// Parse a GUID from its text form.
    pub fn parse(text: &str) -> Result<Self, TreeError> {
        Uuid::parse_str(text)
            .map(Guid)
            .map_err(|e| TreeError::MalformedIdentifier {
                text: text.to_string(),
                reason: e.to_string(),
            })
    }

    /// Build from the 16 bytes in text order.
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Guid(Uuid::from_bytes(bytes))
    }

    /// The 16 bytes in text order.
    pub fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }

    /// Build from mixed-endian bytes: the first three groups little-endian,
    /// the trailing eight octets as-is.
    pub fn from_bytes_le(bytes: [u8; 16]) -> Self {
        Guid(Uuid::from_bytes_le(bytes))
    }

    /// Mixed-endian bytes, the inverse of [`Guid::from_bytes_le`].
    pub fn to_bytes_le(&self) -> [u8; 16] {
        self.0.to_bytes_le()
    }
}

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for Guid {
    type Err = TreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Guid::parse(s)
    }
}

impl From<Uuid> for Guid {
    fn from(uuid: Uuid) -> Self {
        Guid(uuid)
    }
}

/// A goal attached to a node.
///
/// The name is optional; `Some("")` is stored on the wire the same way as
/// `None` and reads back as `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    pub guid: Guid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Goal {
    pub fn new(guid: Guid) -> Self {
        Self { guid, name: None }
    }

    /// Parse the GUID text and build an unnamed goal.
    pub fn parse(guid: &str) -> Result<Self, TreeError> {
        Ok(Self::new(Guid::parse(guid)?))
    }

    /// Attach a display name. Empty names are dropped.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.name = if name.is_empty() { None } else { Some(name) };
        self
    }
}
