//! Permission blocks: one JSON object per permission set.
//!
//! A block is `{name: body, ...}`. Writing iterates the set in name order.
//! Parsing walks the object's fields in document order, so a repeated name
//! is seen twice and the later value wins (or is rejected, per
//! [`DuplicateNames`]).

use std::fmt;

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};

use crate::descriptor::PermissionDescriptor;
use crate::error::{PermsError, Result};
use crate::set::PermissionSet;

/// How to treat a name that appears twice in one block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicateNames {
    /// Keep the last value, like a plain JSON object read.
    #[default]
    LastWins,
    /// Fail with [`PermsError::DuplicatePermissionName`].
    Reject,
}

/// Configuration for parsing permission blocks.
#[derive(Debug, Clone, Default)]
pub struct ParserConfig {
    pub duplicate_names: DuplicateNames,
}

impl ParserConfig {
    /// Reject blocks that name a descriptor twice.
    pub fn strict() -> Self {
        Self {
            duplicate_names: DuplicateNames::Reject,
        }
    }
}

/// Serialize a permission set to a JSON permission block.
///
/// An empty set yields `{}`.
pub fn write_permission_block<D: PermissionDescriptor>(set: &PermissionSet<D>) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::new(&mut buf);
    let mut map = serializer
        .serialize_map(Some(set.len()))
        .map_err(|e| PermsError::Serialization(e.to_string()))?;
    for descriptor in set {
        map.serialize_entry(descriptor.name(), descriptor.body())
            .map_err(|e| {
                PermsError::Serialization(format!("descriptor [{}]: {e}", descriptor.name()))
            })?;
    }
    map.end()
        .map_err(|e| PermsError::Serialization(e.to_string()))?;
    Ok(buf)
}

/// Parse a permission block with the default configuration.
pub fn parse_permission_block<D: PermissionDescriptor>(bytes: &[u8]) -> Result<PermissionSet<D>> {
    parse_permission_block_with(bytes, &ParserConfig::default())
}

/// Parse a permission block into a permission set.
///
/// The block must be exactly one JSON object (surrounding whitespace is
/// allowed). Each field is handed to [`PermissionDescriptor::parse`] with its
/// name. An empty object yields an empty set.
pub fn parse_permission_block_with<D: PermissionDescriptor>(
    bytes: &[u8],
    config: &ParserConfig,
) -> Result<PermissionSet<D>> {
    let fields = read_fields(bytes)?;

    let mut set = PermissionSet::new();
    for (name, body) in fields {
        if config.duplicate_names == DuplicateNames::Reject && set.contains(&name) {
            return Err(PermsError::DuplicatePermissionName(name));
        }
        set.insert(D::parse(&name, body)?);
    }
    Ok(set)
}

/// Read the top-level object's fields in document order, keeping repeats.
fn read_fields(bytes: &[u8]) -> Result<Vec<(String, serde_json::Value)>> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    let fields = OrderedFields::deserialize(&mut deserializer)
        .and_then(|fields| deserializer.end().map(|()| fields))
        .map_err(|e| PermsError::MalformedPermissionData(e.to_string()))?;
    Ok(fields.0)
}

struct OrderedFields(Vec<(String, serde_json::Value)>);

impl<'de> Deserialize<'de> for OrderedFields {
    fn deserialize<De: Deserializer<'de>>(deserializer: De) -> std::result::Result<Self, De::Error> {
        deserializer.deserialize_map(OrderedFieldsVisitor)
    }
}

struct OrderedFieldsVisitor;

impl<'de> Visitor<'de> for OrderedFieldsVisitor {
    type Value = OrderedFields;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON object of permission descriptors")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<OrderedFields, A::Error> {
        let mut fields = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((name, body)) = map.next_entry::<String, serde_json::Value>()? {
            fields.push((name, body));
        }
        Ok(OrderedFields(fields))
    }
}
