//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use courier::{read_from_context, write_to_context, RemoteAccessAuthentication};
use courier_context::ThreadContext;
use courier_core::{
    Authentication, AuthenticationType, ProtocolVersion, RealmDomain, RealmIdentifier, RealmRef,
    User,
};
use courier_perms::{PermissionIntersection, PermissionSet, RoleDescriptor};

/// A realm user authenticated on `node-a`.
pub fn sample_authentication(principal: &str, version: ProtocolVersion) -> Authentication {
    Authentication::new(
        User::new(principal, &["viewer"]),
        RealmRef::new("file1", "file", "node-a"),
        version,
    )
}

/// `alice` running as `carol`, both in realms of the `shared` domain.
pub fn run_as_authentication(version: ProtocolVersion) -> Authentication {
    let domain = shared_domain();
    let alice = User::new("alice", &["admin"])
        .with_full_name("Alice Liddell")
        .with_email("alice@example.com")
        .with_metadata("department", "research");
    let carol = User::new("carol", &["analyst"]);

    Authentication::new(
        alice,
        RealmRef::new("native1", "native", "node-c").with_domain(domain.clone()),
        version,
    )
    .run_as(carol, RealmRef::new("ldap1", "ldap", "node-c").with_domain(domain))
    .with_type(AuthenticationType::ApiKey)
    .with_metadata("api_key_id", "k1")
}

/// The `shared` realm domain: `ldap1` and `native1`.
pub fn shared_domain() -> RealmDomain {
    RealmDomain::new(
        "shared",
        vec![
            RealmIdentifier::new("ldap1", "ldap"),
            RealmIdentifier::new("native1", "native"),
        ],
    )
}

/// Read access to `logs-*`.
pub fn read_role() -> RoleDescriptor {
    RoleDescriptor::new("read").index(&["logs-*"], &["read"])
}

/// `[{read}, {}]`: a read set intersected with an empty set.
pub fn sample_intersection() -> PermissionIntersection<RoleDescriptor> {
    PermissionIntersection::new(vec![
        [read_role()].into_iter().collect(),
        PermissionSet::new(),
    ])
}

/// A credential, the permissions it delegates, and a request context.
pub struct TestFixture {
    pub authentication: Authentication,
    pub intersection: PermissionIntersection<RoleDescriptor>,
    pub context: ThreadContext,
}

impl TestFixture {
    /// `alice` at the current version with [`sample_intersection`].
    pub fn new() -> Self {
        Self::for_user("alice")
    }

    pub fn for_user(principal: &str) -> Self {
        Self {
            authentication: sample_authentication(principal, ProtocolVersion::CURRENT),
            intersection: sample_intersection(),
            context: ThreadContext::new(),
        }
    }

    /// Write the fixture's token into its context.
    pub fn write(&self) -> courier::Result<()> {
        write_to_context(&self.context, &self.authentication, &self.intersection)
    }

    /// Read the token back from the context.
    pub fn read(&self) -> courier::Result<RemoteAccessAuthentication<Authentication>> {
        read_from_context(&self.context)
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// One fixture per hop of a delegation chain, each with its own user and context.
pub fn multi_hop_fixtures(count: usize) -> Vec<TestFixture> {
    (0..count)
        .map(|i| TestFixture::for_user(&format!("user-{i}")))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use courier::{CodecError, REMOTE_ACCESS_AUTHENTICATION_HEADER};
    use courier_context::ContextStore;

    #[test]
    fn test_fixture_round_trip() {
        let fixture = TestFixture::new();
        fixture.write().unwrap();

        let decoded = fixture.read().unwrap();
        assert_eq!(decoded.authentication(), &fixture.authentication);

        let sets: PermissionIntersection<RoleDescriptor> =
            decoded.parse_permission_sets().unwrap();
        assert_eq!(sets, fixture.intersection);
    }

    #[test]
    fn test_fixture_read_before_write() {
        let fixture = TestFixture::new();
        assert!(matches!(fixture.read(), Err(CodecError::NotPresent(_))));
    }

    #[test]
    fn test_run_as_fixture() {
        let auth = run_as_authentication(ProtocolVersion::CURRENT);
        assert!(auth.is_run_as());
        assert_eq!(auth.effective_subject().user.principal, "carol");
        assert_eq!(auth.authenticating_subject().user.principal, "alice");
    }

    #[test]
    fn test_multi_hop_contexts_are_isolated() {
        let hops = multi_hop_fixtures(3);
        hops[0].write().unwrap();

        assert!(hops[0]
            .context
            .get_header(REMOTE_ACCESS_AUTHENTICATION_HEADER)
            .is_some());
        assert!(hops[1]
            .context
            .get_header(REMOTE_ACCESS_AUTHENTICATION_HEADER)
            .is_none());
        assert_ne!(hops[1].authentication, hops[2].authentication);
    }
}
