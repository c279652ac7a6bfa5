//! The permission descriptor contract.

use serde::Serialize;

use crate::error::Result;

/// A named unit of granted access.
///
/// The name is carried as the JSON field name in a permission block, not in
/// the body, so [`PermissionDescriptor::parse`] receives it separately.
pub trait PermissionDescriptor: Sized {
    /// The JSON-serializable body written under the descriptor's name.
    type Body: Serialize;

    fn name(&self) -> &str;

    fn body(&self) -> &Self::Body;

    /// Build a descriptor from its name and JSON body.
    ///
    /// Fails with [`PermsError::MalformedPermissionData`](crate::PermsError::MalformedPermissionData)
    /// when the body does not satisfy the descriptor's schema.
    fn parse(name: &str, body: serde_json::Value) -> Result<Self>;
}
