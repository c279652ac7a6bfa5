//! Protocol versions and the known version table.
//!
//! A version id packs `major.minor.revision` as
//! `major * 1_000_000 + minor * 10_000 + revision * 100 + 99`, so ids compare
//! in release order.

use std::fmt;

use crate::error::{Result, StreamError};

/// A wire protocol version.
///
/// Only versions present in the known version table can be constructed from
/// an id read off the wire.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProtocolVersion(u32);

impl ProtocolVersion {
    /// 7.17.0, the oldest version remote access tokens can be exchanged with.
    pub const V_7_17_0: Self = Self(7_17_00_99);
    /// 8.0.0.
    pub const V_8_0_0: Self = Self(8_00_00_99);
    /// 8.2.0, realm references gain an optional domain.
    pub const V_8_2_0: Self = Self(8_02_00_99);
    /// 8.6.0.
    pub const V_8_6_0: Self = Self(8_06_00_99);

    /// The version this build writes by default.
    pub const CURRENT: Self = Self::V_8_6_0;

    /// The oldest version this build can read.
    pub const MINIMUM_COMPATIBLE: Self = Self::V_7_17_0;

    const KNOWN: [Self; 4] = [Self::V_7_17_0, Self::V_8_0_0, Self::V_8_2_0, Self::V_8_6_0];

    /// All known versions, oldest first.
    pub fn known() -> &'static [ProtocolVersion] {
        &Self::KNOWN
    }

    /// Look up a version by its wire id.
    pub fn from_id(id: u32) -> Result<Self> {
        Self::KNOWN
            .iter()
            .copied()
            .find(|v| v.0 == id)
            .ok_or(StreamError::UnknownVersion(id))
    }

    /// The wire id.
    pub const fn id(self) -> u32 {
        self.0
    }

    pub const fn major(self) -> u32 {
        self.0 / 1_000_000
    }

    pub const fn minor(self) -> u32 {
        (self.0 / 10_000) % 100
    }

    pub const fn revision(self) -> u32 {
        (self.0 / 100) % 100
    }

    /// Check if this version is the same as or newer than `other`.
    pub fn on_or_after(self, other: ProtocolVersion) -> bool {
        self >= other
    }

    /// Check if this version is older than `other`.
    pub fn before(self, other: ProtocolVersion) -> bool {
        self < other
    }
}

impl Default for ProtocolVersion {
    fn default() -> Self {
        Self::CURRENT
    }
}

impl fmt::Debug for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProtocolVersion({}, id={})", self, self.0)
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major(), self.minor(), self.revision())
    }
}

impl TryFrom<u32> for ProtocolVersion {
    type Error = StreamError;

    fn try_from(id: u32) -> Result<Self> {
        Self::from_id(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_display() {
        assert_eq!(ProtocolVersion::V_7_17_0.to_string(), "7.17.0");
        assert_eq!(ProtocolVersion::V_8_6_0.to_string(), "8.6.0");
    }

    #[test]
    fn test_version_ordering() {
        assert!(ProtocolVersion::V_7_17_0 < ProtocolVersion::V_8_0_0);
        assert!(ProtocolVersion::V_8_2_0.on_or_after(ProtocolVersion::V_8_2_0));
        assert!(ProtocolVersion::V_8_0_0.before(ProtocolVersion::V_8_2_0));
        assert_eq!(ProtocolVersion::CURRENT, *ProtocolVersion::known().last().unwrap());
    }

    #[test]
    fn test_from_id_known() {
        for v in ProtocolVersion::known() {
            assert_eq!(ProtocolVersion::from_id(v.id()).unwrap(), *v);
        }
    }

    #[test]
    fn test_from_id_unknown() {
        assert_eq!(
            ProtocolVersion::from_id(8_01_00_99),
            Err(StreamError::UnknownVersion(8_01_00_99))
        );
        assert!(ProtocolVersion::try_from(0).is_err());
    }
}
