//! Golden test vectors for deterministic verification.
//!
//! Each vector pins the exact token an implementation must produce for a
//! known credential and permission intersection, so that nodes written
//! against this format agree byte for byte.

use courier::encode;
use courier_core::{Authentication, ProtocolVersion, RealmRef, User};
use courier_perms::{PermissionIntersection, PermissionSet, RoleDescriptor};

use crate::fixtures::{run_as_authentication, sample_intersection};

/// A golden test vector.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// The credential to encode.
    pub authentication: Authentication,
    /// The permission intersection to encode.
    pub intersection: PermissionIntersection<RoleDescriptor>,
    /// Expected raw token bytes (hex).
    pub expected_hex: &'static str,
    /// Expected token text.
    pub expected_token: &'static str,
}

/// Get all golden test vectors.
///
/// `courier/tests/golden.rs` pins the first two as well; keep them in sync.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "realm user with read set and empty set",
            authentication: Authentication::new(
                User::new("alice", &["viewer"]),
                RealmRef::new("file1", "file", "node-a"),
                ProtocolVersion::V_8_6_0,
            ),
            intersection: sample_intersection(),
            expected_hex: concat!(
                "c3f9eb03",
                "05616c696365",
                "0106766965776572",
                "0000",
                "00",
                "01",
                "0566696c6531",
                "0466696c65",
                "066e6f64652d61",
                "00",
                "00",
                "00",
                "00",
                "02",
                "41",
                "7b2272656164223a7b22696e6469636573223a5b7b226e616d6573223a5b226c6f67732d2a225d",
                "2c2270726976696c65676573223a5b2272656164225d7d5d7d7d",
                "027b7d",
            ),
            expected_token: concat!(
                "w/nrAwVhbGljZQEGdmlld2VyAAAAAQVmaWxlMQRmaWxlBm5vZGUtYQAAAAACQXsicmVhZCI6eyJp",
                "bmRpY2VzIjpbeyJuYW1lcyI6WyJsb2dzLSoiXSwicHJpdmlsZWdlcyI6WyJyZWFkIl19XX19Ant9",
            ),
        },
        GoldenVector {
            name: "empty intersection at 7.17.0",
            authentication: Authentication::new(
                User::new("bob", &[]),
                RealmRef::new("native1", "native", "node-b"),
                ProtocolVersion::V_7_17_0,
            ),
            intersection: PermissionIntersection::empty(),
            expected_hex: "b3d0b50303626f620000000001076e617469766531066e6174697665066e6f64652d6200000000",
            expected_token: "s9C1AwNib2IAAAAAAQduYXRpdmUxBm5hdGl2ZQZub2RlLWIAAAAA",
        },
        GoldenVector {
            name: "run-as api key with realm domain at 8.2.0",
            authentication: run_as_authentication(ProtocolVersion::V_8_2_0),
            intersection: PermissionIntersection::new(vec![[
                RoleDescriptor::new("reader").run_as(&["carol"]),
                RoleDescriptor::new("analyst").cluster(&["monitor"]),
            ]
            .into_iter()
            .collect::<PermissionSet<RoleDescriptor>>()]),
            expected_hex: concat!(
                "83c1e903",
                "056361726f6c0107616e616c79737400000001",
                "056c64617031046c646170066e6f64652d63",
                "010673686172656402056c64617031046c646170076e617469766531066e6174697665",
                "01",
                "05616c696365010561646d696e",
                "010d416c696365204c696464656c6c",
                "0111616c696365406578616d706c652e636f6d",
                "010a6465706172746d656e74087265736561726368",
                "01",
                "076e617469766531066e6174697665066e6f64652d63",
                "010673686172656402056c64617031046c646170076e617469766531066e6174697665",
                "01",
                "010a6170695f6b65795f6964026b31",
                "01",
                "41",
                "7b22616e616c797374223a7b22636c7573746572223a5b226d6f6e69746f72225d7d",
                "2c22726561646572223a7b2272756e5f6173223a5b226361726f6c225d7d7d",
            ),
            expected_token: concat!(
                "g8HpAwVjYXJvbAEHYW5hbHlzdAAAAAEFbGRhcDEEbGRhcAZub2RlLWMBBnNoYXJlZAIFbGRhcDEE",
                "bGRhcAduYXRpdmUxBm5hdGl2ZQEFYWxpY2UBBWFkbWluAQ1BbGljZSBMaWRkZWxsARFhbGljZUBl",
                "eGFtcGxlLmNvbQEKZGVwYXJ0bWVudAhyZXNlYXJjaAEHbmF0aXZlMQZuYXRpdmUGbm9kZS1jAQZz",
                "aGFyZWQCBWxkYXAxBGxkYXAHbmF0aXZlMQZuYXRpdmUBAQphcGlfa2V5X2lkAmsxAUF7ImFuYWx5",
                "c3QiOnsiY2x1c3RlciI6WyJtb25pdG9yIl19LCJyZWFkZXIiOnsicnVuX2FzIjpbImNhcm9sIl19",
                "fQ==",
            ),
        },
    ]
}

/// Encode a vector's credential and intersection with the default codec.
///
/// Panics if encoding fails; every vector is encodable.
pub fn encode_vector(vector: &GoldenVector) -> String {
    encode(&vector.authentication, &vector.intersection)
        .unwrap_or_else(|e| panic!("vector '{}' failed to encode: {e}", vector.name))
}

/// Encode every vector and compare against its expected token.
///
/// Returns `(name, matches, actual_token)` per vector.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    all_vectors()
        .iter()
        .map(|v| {
            let token = encode_vector(v);
            let matches = token == v.expected_token;
            (v.name.to_string(), matches, token)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use courier::{decode, RemoteAccessAuthentication};

    #[test]
    fn test_all_vectors_match() {
        for (name, matches, token) in verify_all_vectors() {
            assert!(matches, "Vector '{}' produced unexpected token {}", name, token);
        }
    }

    #[test]
    fn test_vector_hex_matches_token() {
        use base64::engine::general_purpose::STANDARD;
        use base64::Engine;

        for vector in all_vectors() {
            assert_eq!(
                hex::encode(STANDARD.decode(vector.expected_token).unwrap()),
                vector.expected_hex,
                "Vector '{}' hex and token disagree",
                vector.name
            );
        }
    }

    #[test]
    fn test_vectors_decode() {
        for vector in all_vectors() {
            let decoded: RemoteAccessAuthentication<Authentication> =
                decode(vector.expected_token).unwrap();
            assert_eq!(
                decoded.authentication(),
                &vector.authentication,
                "Vector '{}' decoded to a different credential",
                vector.name
            );

            let sets: PermissionIntersection<RoleDescriptor> =
                decoded.parse_permission_sets().unwrap();
            assert_eq!(sets, vector.intersection);
        }
    }

    #[test]
    fn test_older_version_drops_domain() {
        let intersection = sample_intersection();
        let at_8_2 = encode(&run_as_authentication(ProtocolVersion::V_8_2_0), &intersection).unwrap();
        let at_8_0 = encode(&run_as_authentication(ProtocolVersion::V_8_0_0), &intersection).unwrap();
        assert!(at_8_0.len() < at_8_2.len());

        let decoded: RemoteAccessAuthentication<Authentication> = decode(&at_8_0).unwrap();
        assert!(decoded.authentication().effective_subject().realm.domain.is_none());
    }
}
