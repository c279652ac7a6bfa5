//! # Courier Testkit
//!
//! Testing utilities for Courier.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Known tokens, byte for byte, for cross-implementation verification
//! - **Generators**: Proptest strategies for credentials and permission intersections
//! - **Fixtures**: Ready-made identities, roles, and contexts
//!
//! ## Golden Vectors
//!
//! ```rust
//! use courier_testkit::vectors::{all_vectors, encode_vector};
//!
//! for vector in all_vectors() {
//!     assert_eq!(encode_vector(&vector), vector.expected_token);
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use courier_testkit::generators::TokenParams;
//!
//! proptest! {
//!     #[test]
//!     fn encode_is_deterministic(params: TokenParams) {
//!         let a = courier::encode(&params.authentication, &params.intersection).unwrap();
//!         let b = courier::encode(&params.authentication, &params.intersection).unwrap();
//!         prop_assert_eq!(a, b);
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use courier_testkit::fixtures::TestFixture;
//!
//! let fixture = TestFixture::new();
//! fixture.write().unwrap();
//! let decoded = fixture.read().unwrap();
//! assert_eq!(decoded.authentication(), &fixture.authentication);
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{multi_hop_fixtures, TestFixture};
pub use generators::TokenParams;
pub use vectors::{all_vectors, encode_vector, verify_all_vectors, GoldenVector};
