//! Proptest generators for property-based testing.

use std::collections::BTreeMap;

use proptest::prelude::*;

use courier_core::{
    Authentication, AuthenticationType, ProtocolVersion, RealmDomain, RealmIdentifier, RealmRef,
    User,
};
use courier_perms::{PermissionIntersection, PermissionSet, RoleDescriptor};

/// Generate a known protocol version.
pub fn protocol_version() -> impl Strategy<Value = ProtocolVersion> {
    prop::sample::select(ProtocolVersion::known().to_vec())
}

/// Generate an identifier-like name.
pub fn name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_-]{0,15}".prop_map(String::from)
}

/// Generate free text, possibly empty.
pub fn text() -> impl Strategy<Value = String> {
    "[ -~]{0,24}".prop_map(String::from)
}

pub fn string_map() -> impl Strategy<Value = BTreeMap<String, String>> {
    prop::collection::btree_map(name(), text(), 0..3)
}

pub fn authentication_type() -> impl Strategy<Value = AuthenticationType> {
    prop_oneof![
        Just(AuthenticationType::Realm),
        Just(AuthenticationType::ApiKey),
        Just(AuthenticationType::Token),
        Just(AuthenticationType::Anonymous),
        Just(AuthenticationType::Internal),
    ]
}

pub fn user() -> impl Strategy<Value = User> {
    (
        name(),
        prop::collection::vec(name(), 0..4),
        prop::option::of(text()),
        prop::option::of(text()),
        string_map(),
        any::<bool>(),
    )
        .prop_map(|(principal, roles, full_name, email, metadata, enabled)| User {
            principal,
            roles,
            full_name,
            email,
            metadata,
            enabled,
        })
}

pub fn realm_domain() -> impl Strategy<Value = RealmDomain> {
    (
        name(),
        prop::collection::vec((name(), name()), 0..3),
    )
        .prop_map(|(domain, realms)| {
            let realms = realms
                .into_iter()
                .map(|(name, realm_type)| RealmIdentifier::new(name, realm_type))
                .collect();
            RealmDomain::new(domain, realms)
        })
}

/// Generate a realm that can be written at `version`.
///
/// Realm domains only exist from 8.2.0 on, so earlier versions never get one.
pub fn realm_ref(version: ProtocolVersion) -> BoxedStrategy<RealmRef> {
    let domain = if version.on_or_after(ProtocolVersion::V_8_2_0) {
        prop::option::of(realm_domain()).boxed()
    } else {
        Just(None).boxed()
    };

    (name(), name(), name(), domain)
        .prop_map(|(name, realm_type, node_name, domain)| {
            let realm = RealmRef::new(name, realm_type, node_name);
            match domain {
                Some(domain) => realm.with_domain(domain),
                None => realm,
            }
        })
        .boxed()
}

/// Generate an authentication at any known version, sometimes run-as.
pub fn authentication() -> impl Strategy<Value = Authentication> {
    protocol_version().prop_flat_map(|version| {
        (
            user(),
            realm_ref(version),
            prop::option::of((user(), realm_ref(version))),
            authentication_type(),
            string_map(),
        )
            .prop_map(move |(user, realm, run_as, authentication_type, metadata)| {
                let mut auth =
                    Authentication::new(user, realm, version).with_type(authentication_type);
                if let Some((target, lookup_realm)) = run_as {
                    auth = auth.run_as(target, lookup_realm);
                }
                for (key, value) in metadata {
                    auth = auth.with_metadata(key, value);
                }
                auth
            })
    })
}

pub fn role_descriptor() -> impl Strategy<Value = RoleDescriptor> {
    (
        name(),
        prop::collection::vec(name(), 0..3),
        prop::option::of((
            prop::collection::vec(name(), 1..3),
            prop::collection::vec(name(), 1..3),
        )),
        prop::collection::vec(name(), 0..2),
        prop::option::of(text()),
    )
        .prop_map(|(role, cluster, index, run_as, note)| {
            let cluster: Vec<&str> = cluster.iter().map(String::as_str).collect();
            let run_as: Vec<&str> = run_as.iter().map(String::as_str).collect();
            let mut descriptor = RoleDescriptor::new(role).cluster(&cluster).run_as(&run_as);
            if let Some((names, privileges)) = index {
                let names: Vec<&str> = names.iter().map(String::as_str).collect();
                let privileges: Vec<&str> = privileges.iter().map(String::as_str).collect();
                descriptor = descriptor.index(&names, &privileges);
            }
            if let Some(note) = note {
                descriptor = descriptor.metadata("note", serde_json::Value::String(note));
            }
            descriptor
        })
}

/// Generate a permission set, possibly empty.
pub fn permission_set() -> impl Strategy<Value = PermissionSet<RoleDescriptor>> {
    prop::collection::vec(role_descriptor(), 0..4)
        .prop_map(|descriptors| descriptors.into_iter().collect())
}

/// Generate a permission intersection, possibly empty.
pub fn permission_intersection() -> impl Strategy<Value = PermissionIntersection<RoleDescriptor>>
{
    prop::collection::vec(permission_set(), 0..4).prop_map(PermissionIntersection::new)
}

/// Parameters for generating a token.
#[derive(Debug, Clone)]
pub struct TokenParams {
    pub authentication: Authentication,
    pub intersection: PermissionIntersection<RoleDescriptor>,
}

impl Arbitrary for TokenParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (authentication(), permission_intersection())
            .prop_map(|(authentication, intersection)| TokenParams {
                authentication,
                intersection,
            })
            .boxed()
    }
}
