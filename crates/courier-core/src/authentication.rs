//! Authentication: the authenticated identity propagated across clusters.
//!
//! An authentication has an *effective* subject (the identity whose
//! permissions apply) and, when one user runs as another, an *authenticating*
//! subject (the identity that actually presented credentials).
//!
//! Wire layout, at stream version V:
//!
//! ```text
//! effective subject        user, realm
//! run-as flag              bool
//! authenticating subject   user, realm          (only if run-as flag)
//! authentication type      u8
//! metadata                 string map
//! ```
//!
//! A subject's version is not written. It is the stream version, which the
//! codec has already fixed from the version tag.

use std::collections::BTreeMap;

use crate::credential::Credential;
use crate::error::{Result, StreamError};
use crate::stream::{StreamInput, StreamOutput};
use crate::version::ProtocolVersion;

/// A user principal with its assigned roles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub principal: String,
    pub roles: Vec<String>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub metadata: BTreeMap<String, String>,
    pub enabled: bool,
}

impl User {
    /// Create an enabled user with the given roles.
    pub fn new(principal: impl Into<String>, roles: &[&str]) -> Self {
        Self {
            principal: principal.into(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
            full_name: None,
            email: None,
            metadata: BTreeMap::new(),
            enabled: true,
        }
    }

    pub fn with_full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = Some(full_name.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    fn write_to(&self, out: &mut StreamOutput) -> Result<()> {
        out.write_string(&self.principal)?;
        out.write_string_list(&self.roles)?;
        out.write_optional_string(self.full_name.as_deref())?;
        out.write_optional_string(self.email.as_deref())?;
        out.write_string_map(&self.metadata)?;
        out.write_bool(self.enabled);
        Ok(())
    }

    fn read_from(input: &mut StreamInput) -> Result<Self> {
        Ok(Self {
            principal: input.read_string()?,
            roles: input.read_string_list()?,
            full_name: input.read_optional_string()?,
            email: input.read_optional_string()?,
            metadata: input.read_string_map()?,
            enabled: input.read_bool()?,
        })
    }
}

/// Identifies one realm by name and type.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RealmIdentifier {
    pub name: String,
    pub realm_type: String,
}

impl RealmIdentifier {
    pub fn new(name: impl Into<String>, realm_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            realm_type: realm_type.into(),
        }
    }
}

/// A group of realms that share user identities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RealmDomain {
    pub name: String,
    pub realms: Vec<RealmIdentifier>,
}

impl RealmDomain {
    pub fn new(name: impl Into<String>, realms: Vec<RealmIdentifier>) -> Self {
        Self {
            name: name.into(),
            realms,
        }
    }

    fn write_to(&self, out: &mut StreamOutput) -> Result<()> {
        out.write_string(&self.name)?;
        out.write_len(self.realms.len())?;
        for realm in &self.realms {
            out.write_string(&realm.name)?;
            out.write_string(&realm.realm_type)?;
        }
        Ok(())
    }

    fn read_from(input: &mut StreamInput) -> Result<Self> {
        let name = input.read_string()?;
        let count = input.read_len()?;
        let mut realms = Vec::with_capacity(count.min(input.remaining()));
        for _ in 0..count {
            let realm_name = input.read_string()?;
            let realm_type = input.read_string()?;
            realms.push(RealmIdentifier::new(realm_name, realm_type));
        }
        Ok(Self { name, realms })
    }
}

/// Reference to the realm that authenticated (or looked up) a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RealmRef {
    pub name: String,
    pub realm_type: String,
    pub node_name: String,
    /// Only carried on the wire since [`ProtocolVersion::V_8_2_0`].
    pub domain: Option<RealmDomain>,
}

impl RealmRef {
    pub fn new(
        name: impl Into<String>,
        realm_type: impl Into<String>,
        node_name: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            realm_type: realm_type.into(),
            node_name: node_name.into(),
            domain: None,
        }
    }

    pub fn with_domain(mut self, domain: RealmDomain) -> Self {
        self.domain = Some(domain);
        self
    }

    /// The realm identifier (name and type).
    pub fn identifier(&self) -> RealmIdentifier {
        RealmIdentifier::new(self.name.clone(), self.realm_type.clone())
    }

    fn write_to(&self, out: &mut StreamOutput) -> Result<()> {
        out.write_string(&self.name)?;
        out.write_string(&self.realm_type)?;
        out.write_string(&self.node_name)?;
        if out.version().on_or_after(ProtocolVersion::V_8_2_0) {
            match &self.domain {
                Some(domain) => {
                    out.write_bool(true);
                    domain.write_to(out)?;
                }
                None => out.write_bool(false),
            }
        }
        Ok(())
    }

    fn read_from(input: &mut StreamInput) -> Result<Self> {
        let name = input.read_string()?;
        let realm_type = input.read_string()?;
        let node_name = input.read_string()?;
        let domain = if input.version().on_or_after(ProtocolVersion::V_8_2_0) && input.read_bool()? {
            Some(RealmDomain::read_from(input)?)
        } else {
            None
        };
        Ok(Self {
            name,
            realm_type,
            node_name,
            domain,
        })
    }
}

/// A user, the realm that vouches for it, and the version it was issued at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    pub user: User,
    pub realm: RealmRef,
    pub version: ProtocolVersion,
}

impl Subject {
    pub fn new(user: User, realm: RealmRef, version: ProtocolVersion) -> Self {
        Self {
            user,
            realm,
            version,
        }
    }

    fn write_to(&self, out: &mut StreamOutput) -> Result<()> {
        self.user.write_to(out)?;
        self.realm.write_to(out)
    }

    fn read_from(input: &mut StreamInput) -> Result<Self> {
        let user = User::read_from(input)?;
        let realm = RealmRef::read_from(input)?;
        Ok(Self {
            user,
            realm,
            version: input.version(),
        })
    }
}

/// How the authenticating subject proved its identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum AuthenticationType {
    Realm = 0,
    ApiKey = 1,
    Token = 2,
    Anonymous = 3,
    Internal = 4,
}

impl AuthenticationType {
    pub fn to_u8(self) -> u8 {
        self as u8
    }

    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Realm),
            1 => Some(Self::ApiKey),
            2 => Some(Self::Token),
            3 => Some(Self::Anonymous),
            4 => Some(Self::Internal),
            _ => None,
        }
    }
}

/// An authenticated identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authentication {
    effective: Subject,
    authenticating: Option<Subject>,
    authentication_type: AuthenticationType,
    metadata: BTreeMap<String, String>,
}

impl Authentication {
    /// A user authenticated directly by a realm.
    pub fn new(user: User, realm: RealmRef, version: ProtocolVersion) -> Self {
        Self {
            effective: Subject::new(user, realm, version),
            authenticating: None,
            authentication_type: AuthenticationType::Realm,
            metadata: BTreeMap::new(),
        }
    }

    /// Run as `user`, looked up in `lookup_realm`.
    ///
    /// The current effective subject becomes the authenticating subject.
    pub fn run_as(mut self, user: User, lookup_realm: RealmRef) -> Self {
        let version = self.effective.version;
        let authenticating = std::mem::replace(
            &mut self.effective,
            Subject::new(user, lookup_realm, version),
        );
        self.authenticating = Some(authenticating);
        self
    }

    pub fn with_type(mut self, authentication_type: AuthenticationType) -> Self {
        self.authentication_type = authentication_type;
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Re-target every subject to `version`.
    pub fn with_version(mut self, version: ProtocolVersion) -> Self {
        self.effective.version = version;
        if let Some(subject) = self.authenticating.as_mut() {
            subject.version = version;
        }
        self
    }

    /// The subject whose permissions apply.
    pub fn effective_subject(&self) -> &Subject {
        &self.effective
    }

    /// The subject that presented credentials.
    ///
    /// Same as the effective subject unless running as another user.
    pub fn authenticating_subject(&self) -> &Subject {
        self.authenticating.as_ref().unwrap_or(&self.effective)
    }

    pub fn is_run_as(&self) -> bool {
        self.authenticating.is_some()
    }

    pub fn authentication_type(&self) -> AuthenticationType {
        self.authentication_type
    }

    pub fn metadata(&self) -> &BTreeMap<String, String> {
        &self.metadata
    }
}

impl Credential for Authentication {
    fn version(&self) -> ProtocolVersion {
        self.effective.version
    }

    fn write_to(&self, out: &mut StreamOutput) -> Result<()> {
        self.effective.write_to(out)?;
        match &self.authenticating {
            Some(subject) => {
                out.write_bool(true);
                subject.write_to(out)?;
            }
            None => out.write_bool(false),
        }
        out.write_u8(self.authentication_type.to_u8());
        out.write_string_map(&self.metadata)
    }

    fn read_from(input: &mut StreamInput) -> Result<Self> {
        let effective = Subject::read_from(input)?;
        let authenticating = if input.read_bool()? {
            Some(Subject::read_from(input)?)
        } else {
            None
        };
        let type_byte = input.read_u8()?;
        let authentication_type = AuthenticationType::from_u8(type_byte).ok_or_else(|| {
            StreamError::InvalidValue(format!("unknown authentication type: {type_byte}"))
        })?;
        let metadata = input.read_string_map()?;
        Ok(Self {
            effective,
            authenticating,
            authentication_type,
            metadata,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(version: ProtocolVersion) -> Authentication {
        let user = User::new("alice", &["viewer", "editor"])
            .with_full_name("Alice Liddell")
            .with_email("alice@example.com")
            .with_metadata("department", "research");
        let realm = RealmRef::new("file1", "file", "node-1");
        Authentication::new(user, realm, version).with_metadata("_source", "test")
    }

    fn write(auth: &Authentication) -> Vec<u8> {
        let mut out = StreamOutput::with_version(auth.version());
        auth.write_to(&mut out).unwrap();
        out.freeze().to_vec()
    }

    fn read(bytes: Vec<u8>, version: ProtocolVersion) -> Authentication {
        let mut input = StreamInput::new(bytes);
        input.set_version(version);
        let auth = Authentication::read_from(&mut input).unwrap();
        input.ensure_exhausted().unwrap();
        auth
    }

    #[test]
    fn test_roundtrip_every_version() {
        for &version in ProtocolVersion::known() {
            let auth = sample(version);
            let decoded = read(write(&auth), version);
            assert_eq!(decoded, auth);
            assert_eq!(decoded.version(), version);
        }
    }

    #[test]
    fn test_rewrite_is_byte_identical() {
        for &version in ProtocolVersion::known() {
            let bytes = write(&sample(version));
            let rewritten = write(&read(bytes.clone(), version));
            assert_eq!(bytes, rewritten);
        }
    }

    #[test]
    fn test_run_as_roundtrip() {
        let auth = sample(ProtocolVersion::CURRENT).run_as(
            User::new("bob", &["admin"]),
            RealmRef::new("native1", "native", "node-2"),
        );
        assert!(auth.is_run_as());
        assert_eq!(auth.effective_subject().user.principal, "bob");
        assert_eq!(auth.authenticating_subject().user.principal, "alice");

        let decoded = read(write(&auth), ProtocolVersion::CURRENT);
        assert_eq!(decoded, auth);
    }

    #[test]
    fn test_domain_is_version_gated() {
        let domain = RealmDomain::new("shared", vec![RealmIdentifier::new("file1", "file")]);
        let realm = RealmRef::new("file1", "file", "node-1").with_domain(domain.clone());
        let user = User::new("carol", &[]);

        let current = Authentication::new(user.clone(), realm.clone(), ProtocolVersion::V_8_2_0);
        let decoded = read(write(&current), ProtocolVersion::V_8_2_0);
        assert_eq!(decoded.effective_subject().realm.domain, Some(domain));

        let old = Authentication::new(user, realm, ProtocolVersion::V_8_0_0);
        let decoded = read(write(&old), ProtocolVersion::V_8_0_0);
        assert_eq!(decoded.effective_subject().realm.domain, None);
    }

    #[test]
    fn test_version_mismatch_misreads() {
        // Written without the domain flag, read expecting one.
        let bytes = write(&sample(ProtocolVersion::V_8_0_0));
        let mut input = StreamInput::new(bytes);
        input.set_version(ProtocolVersion::V_8_2_0);
        let result = Authentication::read_from(&mut input)
            .and_then(|_| input.ensure_exhausted());
        assert!(result.is_err());
    }

    #[test]
    fn test_with_version_retargets_all_subjects() {
        let auth = sample(ProtocolVersion::CURRENT)
            .run_as(User::new("bob", &[]), RealmRef::new("n", "native", "node"))
            .with_version(ProtocolVersion::V_7_17_0);
        assert_eq!(auth.effective_subject().version, ProtocolVersion::V_7_17_0);
        assert_eq!(auth.authenticating_subject().version, ProtocolVersion::V_7_17_0);
    }

    #[test]
    fn test_unknown_authentication_type() {
        let mut bytes = write(&sample(ProtocolVersion::CURRENT));
        // type byte sits right before the one-entry metadata map:
        // [type][0x01][len]_source[len]test
        let map_len = 1 + 1 + "_source".len() + 1 + "test".len();
        let type_index = bytes.len() - map_len - 1;
        bytes[type_index] = 9;

        let mut input = StreamInput::new(bytes);
        assert!(matches!(
            Authentication::read_from(&mut input),
            Err(StreamError::InvalidValue(_))
        ));
    }

    #[test]
    fn test_authentication_type_codes() {
        for t in [
            AuthenticationType::Realm,
            AuthenticationType::ApiKey,
            AuthenticationType::Token,
            AuthenticationType::Anonymous,
            AuthenticationType::Internal,
        ] {
            assert_eq!(AuthenticationType::from_u8(t.to_u8()), Some(t));
        }
        assert_eq!(AuthenticationType::from_u8(5), None);
    }
}
