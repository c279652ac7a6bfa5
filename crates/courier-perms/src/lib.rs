//! # Courier Permissions
//!
//! Permission descriptors and the JSON permission blocks that carry them.
//!
//! ## Overview
//!
//! A [`PermissionSet`] is a set of named descriptors. A
//! [`PermissionIntersection`] is an ordered sequence of sets whose effective
//! meaning is their intersection: each set is one candidate restriction.
//!
//! On the wire, each set becomes one JSON object whose field names are the
//! descriptor names and whose values are the descriptor bodies:
//!
//! ```text
//! {"read-logs":{"indices":[{"names":["logs-*"],"privileges":["read"]}]}}
//! ```
//!
//! ## Parsing
//!
//! Blocks are parsed lazily with [`parse_permission_block`]. A block that
//! names the same descriptor twice keeps the last value, unless the parser is
//! configured with [`DuplicateNames::Reject`].
//!
//! ```rust
//! use courier_perms::{parse_permission_block, write_permission_block, PermissionSet, RoleDescriptor};
//!
//! let set: PermissionSet<RoleDescriptor> =
//!     [RoleDescriptor::new("read").cluster(&["monitor"])].into_iter().collect();
//! let block = write_permission_block(&set).unwrap();
//! let parsed: PermissionSet<RoleDescriptor> = parse_permission_block(&block).unwrap();
//! assert_eq!(parsed, set);
//! ```

pub mod descriptor;
pub mod error;
pub mod parser;
pub mod role;
pub mod set;

pub use descriptor::PermissionDescriptor;
pub use error::{PermsError, Result};
pub use parser::{
    parse_permission_block, parse_permission_block_with, write_permission_block, DuplicateNames,
    ParserConfig,
};
pub use role::{ApplicationPrivileges, IndicesPrivileges, RoleBody, RoleDescriptor};
pub use set::{PermissionIntersection, PermissionSet};
