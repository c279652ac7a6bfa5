//! Raw permission blocks: undecoded permission sets.

use bytes::Bytes;
use courier_perms::{
    parse_permission_block_with, ParserConfig, PermissionDescriptor, PermissionSet, Result,
};

/// One permission set as it came off the wire: the bytes of a JSON object,
/// not yet parsed.
///
/// Decoding a token only slices these out. Parsing happens when
/// [`RawPermissionBlock::parse`] is called, so permission data errors surface
/// then and only for the block being parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPermissionBlock(Bytes);

impl RawPermissionBlock {
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parse into a permission set, last duplicate name wins.
    pub fn parse<D: PermissionDescriptor>(&self) -> Result<PermissionSet<D>> {
        self.parse_with(&ParserConfig::default())
    }

    pub fn parse_with<D: PermissionDescriptor>(
        &self,
        config: &ParserConfig,
    ) -> Result<PermissionSet<D>> {
        parse_permission_block_with(&self.0, config)
    }
}

impl From<Bytes> for RawPermissionBlock {
    fn from(bytes: Bytes) -> Self {
        Self(bytes)
    }
}

impl From<Vec<u8>> for RawPermissionBlock {
    fn from(bytes: Vec<u8>) -> Self {
        Self(Bytes::from(bytes))
    }
}

impl AsRef<[u8]> for RawPermissionBlock {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
