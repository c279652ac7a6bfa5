//! Versioned binary streams.
//!
//! Encoding rules:
//! - VInt: unsigned 32-bit integer in little-endian 7-bit groups, high bit set
//!   on every byte except the last, at most 5 bytes
//! - VLong: same scheme for 64-bit integers, at most 10 bytes
//! - Bool: a single byte, 0 or 1
//! - String: VInt byte length followed by UTF-8 bytes
//! - Bytes block: VInt length followed by the raw bytes
//!
//! Both ends carry a [`ProtocolVersion`]. The stream itself never branches on
//! it; it is read by the types being serialized to decide which fields exist.

use std::collections::BTreeMap;

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::{Result, StreamError};
use crate::version::ProtocolVersion;

const VINT_MAX_BYTES: usize = 5;
const VLONG_MAX_BYTES: usize = 10;

/// A growable, version-aware binary writer.
#[derive(Debug, Clone)]
pub struct StreamOutput {
    buf: BytesMut,
    version: ProtocolVersion,
}

impl StreamOutput {
    /// Create an empty writer targeting [`ProtocolVersion::CURRENT`].
    pub fn new() -> Self {
        Self::with_version(ProtocolVersion::CURRENT)
    }

    /// Create an empty writer targeting `version`.
    pub fn with_version(version: ProtocolVersion) -> Self {
        Self {
            buf: BytesMut::new(),
            version,
        }
    }

    pub fn version(&self) -> ProtocolVersion {
        self.version
    }

    pub fn set_version(&mut self, version: ProtocolVersion) {
        self.version = version;
    }

    /// Number of bytes written so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn write_u8(&mut self, value: u8) {
        self.buf.put_u8(value);
    }

    pub fn write_bool(&mut self, value: bool) {
        self.buf.put_u8(u8::from(value));
    }

    pub fn write_vint(&mut self, mut value: u32) {
        while value & !0x7f != 0 {
            self.buf.put_u8(((value & 0x7f) | 0x80) as u8);
            value >>= 7;
        }
        self.buf.put_u8(value as u8);
    }

    pub fn write_vlong(&mut self, mut value: u64) {
        while value & !0x7f != 0 {
            self.buf.put_u8(((value & 0x7f) | 0x80) as u8);
            value >>= 7;
        }
        self.buf.put_u8(value as u8);
    }

    /// Write a length or element count as a VInt.
    pub fn write_len(&mut self, len: usize) -> Result<()> {
        let len = u32::try_from(len).map_err(|_| StreamError::LengthOverflow(len))?;
        self.write_vint(len);
        Ok(())
    }

    /// Write a protocol version as its VInt id.
    pub fn write_version(&mut self, version: ProtocolVersion) {
        self.write_vint(version.id());
    }

    pub fn write_string(&mut self, value: &str) -> Result<()> {
        self.write_bytes_block(value.as_bytes())
    }

    /// Write a presence flag, then the string if present.
    pub fn write_optional_string(&mut self, value: Option<&str>) -> Result<()> {
        match value {
            Some(s) => {
                self.write_bool(true);
                self.write_string(s)
            }
            None => {
                self.write_bool(false);
                Ok(())
            }
        }
    }

    pub fn write_string_list(&mut self, values: &[String]) -> Result<()> {
        self.write_len(values.len())?;
        for value in values {
            self.write_string(value)?;
        }
        Ok(())
    }

    /// Write a string map. Entries are written in key order.
    pub fn write_string_map(&mut self, map: &BTreeMap<String, String>) -> Result<()> {
        self.write_len(map.len())?;
        for (key, value) in map {
            self.write_string(key)?;
            self.write_string(value)?;
        }
        Ok(())
    }

    /// Write a length-prefixed byte block.
    pub fn write_bytes_block(&mut self, bytes: &[u8]) -> Result<()> {
        self.write_len(bytes.len())?;
        self.buf.put_slice(bytes);
        Ok(())
    }

    /// Finish writing and return the accumulated bytes.
    pub fn freeze(self) -> Bytes {
        self.buf.freeze()
    }
}

impl Default for StreamOutput {
    fn default() -> Self {
        Self::new()
    }
}

/// A version-aware binary reader over an immutable buffer.
///
/// Byte blocks are returned as zero-copy slices of the underlying buffer.
#[derive(Debug, Clone)]
pub struct StreamInput {
    buf: Bytes,
    version: ProtocolVersion,
}

impl StreamInput {
    /// Wrap `bytes`, reading as [`ProtocolVersion::CURRENT`] until told otherwise.
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self {
            buf: bytes.into(),
            version: ProtocolVersion::CURRENT,
        }
    }

    pub fn version(&self) -> ProtocolVersion {
        self.version
    }

    pub fn set_version(&mut self, version: ProtocolVersion) {
        self.version = version;
    }

    /// Number of unread bytes.
    pub fn remaining(&self) -> usize {
        self.buf.remaining()
    }

    fn ensure(&self, needed: usize) -> Result<()> {
        let remaining = self.buf.remaining();
        if remaining < needed {
            return Err(StreamError::UnexpectedEof { needed, remaining });
        }
        Ok(())
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        self.ensure(1)?;
        Ok(self.buf.get_u8())
    }

    pub fn read_bool(&mut self) -> Result<bool> {
        match self.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(StreamError::InvalidValue(format!(
                "expected boolean byte 0 or 1, got {other}"
            ))),
        }
    }

    pub fn read_vint(&mut self) -> Result<u32> {
        let mut value: u32 = 0;
        for i in 0..VINT_MAX_BYTES {
            let b = self.read_u8()?;
            if i == VINT_MAX_BYTES - 1 && b & 0xf0 != 0 {
                return Err(StreamError::VarIntTooLong);
            }
            value |= u32::from(b & 0x7f) << (7 * i);
            if b & 0x80 == 0 {
                return Ok(value);
            }
        }
        Err(StreamError::VarIntTooLong)
    }

    pub fn read_vlong(&mut self) -> Result<u64> {
        let mut value: u64 = 0;
        for i in 0..VLONG_MAX_BYTES {
            let b = self.read_u8()?;
            if i == VLONG_MAX_BYTES - 1 && b & 0xfe != 0 {
                return Err(StreamError::VarIntTooLong);
            }
            value |= u64::from(b & 0x7f) << (7 * i);
            if b & 0x80 == 0 {
                return Ok(value);
            }
        }
        Err(StreamError::VarIntTooLong)
    }

    /// Read a length or element count.
    pub fn read_len(&mut self) -> Result<usize> {
        let len = self.read_vint()?;
        usize::try_from(len).map_err(|_| StreamError::InvalidValue(format!("length {len}")))
    }

    /// Read a protocol version tag. Fails for ids outside the version table.
    pub fn read_version(&mut self) -> Result<ProtocolVersion> {
        ProtocolVersion::from_id(self.read_vint()?)
    }

    pub fn read_string(&mut self) -> Result<String> {
        let bytes = self.read_bytes_block()?;
        String::from_utf8(bytes.to_vec()).map_err(|_| StreamError::InvalidUtf8)
    }

    pub fn read_optional_string(&mut self) -> Result<Option<String>> {
        if self.read_bool()? {
            Ok(Some(self.read_string()?))
        } else {
            Ok(None)
        }
    }

    pub fn read_string_list(&mut self) -> Result<Vec<String>> {
        let count = self.read_len()?;
        // Every string takes at least one byte, so `remaining` bounds the count.
        let mut values = Vec::with_capacity(count.min(self.remaining()));
        for _ in 0..count {
            values.push(self.read_string()?);
        }
        Ok(values)
    }

    pub fn read_string_map(&mut self) -> Result<BTreeMap<String, String>> {
        let count = self.read_len()?;
        let mut map = BTreeMap::new();
        for _ in 0..count {
            let key = self.read_string()?;
            let value = self.read_string()?;
            map.insert(key, value);
        }
        Ok(map)
    }

    /// Read a length-prefixed byte block without copying.
    pub fn read_bytes_block(&mut self) -> Result<Bytes> {
        let len = self.read_len()?;
        self.ensure(len)?;
        Ok(self.buf.split_to(len))
    }

    /// Fail if any bytes are left unread.
    pub fn ensure_exhausted(&self) -> Result<()> {
        match self.remaining() {
            0 => Ok(()),
            n => Err(StreamError::TrailingBytes(n)),
        }
    }
}
