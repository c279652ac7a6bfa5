//! # Courier
//!
//! Carries an authenticated identity and the permissions it may exercise
//! across a service boundary, as one opaque header value.
//!
//! ## Overview
//!
//! A caller that delegates work to another service holds two things:
//!
//! - **A credential**: who the request acts as ([`core::Authentication`])
//! - **A permission intersection**: an ordered list of permission sets; the
//!   request may only do what every set allows
//!
//! [`encode`] packs both into a Base64 token. [`decode`] unpacks it into the
//! credential plus one [`RawPermissionBlock`] per set. Blocks are parsed only
//! when asked, one at a time.
//!
//! ## Usage
//!
//! ```rust
//! use courier::context::ThreadContext;
//! use courier::core::{Authentication, ProtocolVersion, RealmRef, User};
//! use courier::perms::{PermissionIntersection, PermissionSet, RoleDescriptor};
//! use courier::{read_from_context, write_to_context, RemoteAccessAuthentication};
//!
//! let auth = Authentication::new(
//!     User::new("alice", &["viewer"]),
//!     RealmRef::new("file1", "file", "node-a"),
//!     ProtocolVersion::CURRENT,
//! );
//! let read: PermissionSet<RoleDescriptor> =
//!     [RoleDescriptor::new("read").index(&["logs-*"], &["read"])].into_iter().collect();
//! let intersection = PermissionIntersection::new(vec![read, PermissionSet::new()]);
//!
//! let context = ThreadContext::new();
//! write_to_context(&context, &auth, &intersection).unwrap();
//!
//! let decoded: RemoteAccessAuthentication<Authentication> = read_from_context(&context).unwrap();
//! assert_eq!(decoded.authentication(), &auth);
//! assert_eq!(decoded.permission_blocks()[1].as_bytes(), b"{}");
//!
//! let sets: PermissionIntersection<RoleDescriptor> = decoded.parse_permission_sets().unwrap();
//! assert_eq!(sets, intersection);
//! ```
//!
//! ## Re-exports
//!
//! - `courier::core` - Protocol versions, binary streams, credentials
//! - `courier::perms` - Permission descriptors, sets, and the block parser
//! - `courier::context` - Request context header storage

pub mod block;
pub mod codec;
pub mod config;
pub mod error;
pub mod fingerprint;

// Re-export component crates
pub use courier_context as context;
pub use courier_core as core;
pub use courier_perms as perms;

pub use block::RawPermissionBlock;
pub use codec::{
    decode, encode, read_from_context, write_to_context, RemoteAccessAuthentication,
    RemoteAccessCodec, REMOTE_ACCESS_AUTHENTICATION_HEADER,
};
pub use config::{CodecConfig, DEFAULT_MAX_BLOCK_LEN, DEFAULT_MAX_PERMISSION_SETS};
pub use error::{CodecError, DecodeError, Result};
pub use fingerprint::TokenFingerprint;
