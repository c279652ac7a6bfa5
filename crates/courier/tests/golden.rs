//! Golden token vectors for cross-implementation verification.
//!
//! Every implementation of the remote access token must produce, for the
//! same credential and permission intersection, identical:
//! - version tag bytes
//! - credential bytes
//! - permission block bytes
//! - Base64 token text

use courier::core::{Authentication, ProtocolVersion, RealmRef, StreamError, User};
use courier::perms::{PermissionIntersection, PermissionSet, RoleDescriptor};
use courier::{decode, encode, CodecError, DecodeError, RemoteAccessAuthentication};

/// A single golden vector.
struct GoldenVector {
    name: &'static str,
    authentication: Authentication,
    intersection: PermissionIntersection<RoleDescriptor>,
    token_hex: &'static str,
    token: &'static str,
}

fn alice() -> Authentication {
    Authentication::new(
        User::new("alice", &["viewer"]),
        RealmRef::new("file1", "file", "node-a"),
        ProtocolVersion::V_8_6_0,
    )
}

fn read_then_empty() -> PermissionIntersection<RoleDescriptor> {
    let read: PermissionSet<RoleDescriptor> =
        [RoleDescriptor::new("read").index(&["logs-*"], &["read"])]
            .into_iter()
            .collect();
    PermissionIntersection::new(vec![read, PermissionSet::new()])
}

/// The first two vectors of `courier_testkit::vectors::all_vectors`. Keep the
/// two copies in sync when either changes.
fn golden_vectors() -> Vec<GoldenVector> {
    vec![
        // Vector 1: two sets, the second empty
        GoldenVector {
            name: "read_then_empty",
            authentication: alice(),
            intersection: read_then_empty(),
            token_hex: concat!(
                "c3f9eb0305616c6963650106766965776572000000010566696c65310466696c65066e6f64652d61",
                "0000000002417b2272656164223a7b22696e6469636573223a5b7b226e616d6573223a5b226c6f67",
                "732d2a225d2c2270726976696c65676573223a5b2272656164225d7d5d7d7d027b7d",
            ),
            token: concat!(
                "w/nrAwVhbGljZQEGdmlld2VyAAAAAQVmaWxlMQRmaWxlBm5vZGUtYQAAAAACQXsicmVhZCI6eyJp",
                "bmRpY2VzIjpbeyJuYW1lcyI6WyJsb2dzLSoiXSwicHJpdmlsZWdlcyI6WyJyZWFkIl19XX19Ant9",
            ),
        },
        // Vector 2: no sets at the oldest supported version
        GoldenVector {
            name: "empty_intersection_7_17",
            authentication: Authentication::new(
                User::new("bob", &[]),
                RealmRef::new("native1", "native", "node-b"),
                ProtocolVersion::V_7_17_0,
            ),
            intersection: PermissionIntersection::empty(),
            token_hex: "b3d0b50303626f620000000001076e617469766531066e6174697665066e6f64652d6200000000",
            token: "s9C1AwNib2IAAAAAAQduYXRpdmUxBm5hdGl2ZQZub2RlLWIAAAAA",
        },
    ]
}

#[test]
fn test_vectors_encode() {
    for v in golden_vectors() {
        let token = encode(&v.authentication, &v.intersection).unwrap();
        assert_eq!(token, v.token, "token mismatch for {}", v.name);
    }
}

#[test]
fn test_vectors_decode() {
    for v in golden_vectors() {
        let decoded: RemoteAccessAuthentication<Authentication> = decode(v.token).unwrap();
        assert_eq!(decoded.authentication(), &v.authentication, "credential mismatch for {}", v.name);
        assert_eq!(
            decoded.permission_blocks().len(),
            v.intersection.len(),
            "block count mismatch for {}",
            v.name
        );

        let sets: PermissionIntersection<RoleDescriptor> = decoded.parse_permission_sets().unwrap();
        assert_eq!(sets, v.intersection, "permission sets mismatch for {}", v.name);
    }
}

#[test]
fn test_vectors_from_hex() {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;

    for v in golden_vectors() {
        let bytes = hex::decode(v.token_hex).unwrap();
        assert_eq!(STANDARD.encode(&bytes), v.token, "hex mismatch for {}", v.name);
    }
}

#[test]
fn print_golden_vectors_json() {
    let vectors: Vec<serde_json::Value> = golden_vectors()
        .iter()
        .map(|v| {
            serde_json::json!({
                "name": v.name,
                "version": v.authentication.effective_subject().version.to_string(),
                "sets": v.intersection.len(),
                "token_hex": v.token_hex,
                "token": v.token,
            })
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&vectors).unwrap());
}

// =============================================================================
// REJECTION VECTORS
// =============================================================================

fn hex_token(bytes_hex: &str) -> String {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;

    STANDARD.encode(hex::decode(bytes_hex).unwrap())
}

#[test]
fn test_reject_unknown_version() {
    // 8.7.0 is not in the version table
    let token = hex_token("d3c7ec03");
    let err = decode::<Authentication>(&token).unwrap_err();
    assert!(
        matches!(
            err,
            CodecError::Deserialization(DecodeError::Stream(StreamError::UnknownVersion(8_07_00_99)))
        ),
        "must reject unknown version, got {err:?}"
    );
}

#[test]
fn test_reject_missing_block() {
    // Vector 2 with a declared count of 1 and no block
    let token = hex_token("b3d0b50303626f620000000001076e617469766531066e6174697665066e6f64652d6200000001");
    let err = decode::<Authentication>(&token).unwrap_err();
    assert!(
        matches!(
            err,
            CodecError::Deserialization(DecodeError::Stream(StreamError::UnexpectedEof { .. }))
        ),
        "must reject a count larger than the blocks present"
    );
}

#[test]
fn test_reject_extra_block() {
    // Vector 2 with a declared count of 0 followed by a `{}` block
    let token = hex_token("b3d0b50303626f620000000001076e617469766531066e6174697665066e6f64652d6200000000027b7d");
    let err = decode::<Authentication>(&token).unwrap_err();
    assert!(
        matches!(
            err,
            CodecError::Deserialization(DecodeError::Stream(StreamError::TrailingBytes(3)))
        ),
        "must reject blocks past the declared count"
    );
}

#[test]
fn test_reject_unknown_authentication_type() {
    // Vector 2 with type byte 9
    let token = hex_token("b3d0b50303626f620000000001076e617469766531066e6174697665066e6f64652d6200090000");
    let err = decode::<Authentication>(&token).unwrap_err();
    assert!(matches!(
        err,
        CodecError::Deserialization(DecodeError::Stream(StreamError::InvalidValue(_)))
    ));
}

#[test]
fn test_reject_unpadded_base64() {
    // Vector 2 cut to 50 characters without restoring padding
    let err = decode::<Authentication>("s9C1AwNib2IAAAAAAQduYXRpdmUxBm5hdGl2ZQZub2RlLWIAAA").unwrap_err();
    assert!(matches!(err, CodecError::Deserialization(DecodeError::Base64(_))));
}
