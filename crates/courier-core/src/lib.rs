//! # Courier Core
//!
//! Pure primitives for Courier: protocol versions, versioned binary streams,
//! and the credential that travels inside a remote access token.
//!
//! This crate contains no I/O and no JSON. It is pure computation over
//! in-memory byte buffers.
//!
//! ## Key Types
//!
//! - [`ProtocolVersion`] - A wire version from the known version table
//! - [`StreamOutput`] / [`StreamInput`] - Version-aware binary writer and reader
//! - [`Credential`] - Anything that serializes itself in a version-aware way
//! - [`Authentication`] - The concrete authenticated identity
//!
//! ## Versioning
//!
//! Every stream carries the protocol version it is written for. Fields that
//! were introduced in later versions are only written (and only read) when the
//! stream version is on or after the version that introduced them.

pub mod authentication;
pub mod credential;
pub mod error;
pub mod stream;
pub mod version;

pub use authentication::{
    Authentication, AuthenticationType, RealmDomain, RealmIdentifier, RealmRef, Subject, User,
};
pub use credential::Credential;
pub use error::{Result, StreamError};
pub use stream::{StreamInput, StreamOutput};
pub use version::ProtocolVersion;
