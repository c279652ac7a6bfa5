//! Role descriptors: the concrete permission descriptor.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::descriptor::PermissionDescriptor;
use crate::error::{PermsError, Result};

/// Index-level privileges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IndicesPrivileges {
    pub names: Vec<String>,
    pub privileges: Vec<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub allow_restricted_indices: bool,
}

/// Application-level privileges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApplicationPrivileges {
    pub application: String,
    pub privileges: Vec<String>,
    pub resources: Vec<String>,
}

/// The JSON body of a role descriptor. Unknown fields are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoleBody {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cluster: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub indices: Vec<IndicesPrivileges>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub applications: Vec<ApplicationPrivileges>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub run_as: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, serde_json::Value>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// A named role: cluster, index and application privileges plus run-as targets.
#[derive(Debug, Clone, PartialEq)]
pub struct RoleDescriptor {
    name: String,
    body: RoleBody,
}

impl RoleDescriptor {
    /// A role that grants nothing.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: RoleBody::default(),
        }
    }

    pub fn with_body(name: impl Into<String>, body: RoleBody) -> Self {
        Self {
            name: name.into(),
            body,
        }
    }

    pub fn cluster(mut self, privileges: &[&str]) -> Self {
        self.body
            .cluster
            .extend(privileges.iter().map(|p| p.to_string()));
        self
    }

    pub fn index(mut self, names: &[&str], privileges: &[&str]) -> Self {
        self.body.indices.push(IndicesPrivileges {
            names: names.iter().map(|n| n.to_string()).collect(),
            privileges: privileges.iter().map(|p| p.to_string()).collect(),
            allow_restricted_indices: false,
        });
        self
    }

    pub fn application(mut self, application: &str, privileges: &[&str], resources: &[&str]) -> Self {
        self.body.applications.push(ApplicationPrivileges {
            application: application.to_string(),
            privileges: privileges.iter().map(|p| p.to_string()).collect(),
            resources: resources.iter().map(|r| r.to_string()).collect(),
        });
        self
    }

    pub fn run_as(mut self, users: &[&str]) -> Self {
        self.body.run_as.extend(users.iter().map(|u| u.to_string()));
        self
    }

    pub fn metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.body.metadata.insert(key.into(), value);
        self
    }

    pub fn role_body(&self) -> &RoleBody {
        &self.body
    }

    fn validate(name: &str, body: &RoleBody) -> Result<()> {
        for (i, indices) in body.indices.iter().enumerate() {
            if indices.names.is_empty() || indices.privileges.is_empty() {
                return Err(PermsError::MalformedPermissionData(format!(
                    "role [{name}]: indices[{i}] requires non-empty names and privileges"
                )));
            }
        }
        Ok(())
    }
}

impl PermissionDescriptor for RoleDescriptor {
    type Body = RoleBody;

    fn name(&self) -> &str {
        &self.name
    }

    fn body(&self) -> &RoleBody {
        &self.body
    }

    fn parse(name: &str, body: serde_json::Value) -> Result<Self> {
        let body: RoleBody = serde_json::from_value(body).map_err(|e| {
            PermsError::MalformedPermissionData(format!("failed to parse role [{name}]: {e}"))
        })?;
        Self::validate(name, &body)?;
        Ok(Self::with_body(name, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_body_serializes_to_empty_object() {
        let role = RoleDescriptor::new("nothing");
        assert_eq!(serde_json::to_string(role.body()).unwrap(), "{}");
    }

    #[test]
    fn test_body_field_order() {
        let role = RoleDescriptor::new("r")
            .cluster(&["monitor"])
            .index(&["logs-*"], &["read"])
            .run_as(&["bob"]);
        assert_eq!(
            serde_json::to_string(role.body()).unwrap(),
            r#"{"cluster":["monitor"],"indices":[{"names":["logs-*"],"privileges":["read"]}],"run_as":["bob"]}"#
        );
    }

    #[test]
    fn test_parse_full_body() {
        let body = json!({
            "cluster": ["monitor"],
            "indices": [{"names": ["a", "b"], "privileges": ["read"], "allow_restricted_indices": true}],
            "applications": [{"application": "kibana", "privileges": ["all"], "resources": ["*"]}],
            "run_as": ["carol"],
            "metadata": {"version": 1}
        });
        let role = RoleDescriptor::parse("full", body).unwrap();
        assert_eq!(role.name(), "full");
        assert!(role.body().indices[0].allow_restricted_indices);
        assert_eq!(role.body().applications[0].application, "kibana");
        assert_eq!(role.body().metadata["version"], json!(1));
    }

    #[test]
    fn test_parse_rejects_unknown_field() {
        let err = RoleDescriptor::parse("r", json!({"clustr": ["all"]})).unwrap_err();
        assert!(matches!(err, PermsError::MalformedPermissionData(_)));
    }

    #[test]
    fn test_parse_rejects_wrong_type() {
        let err = RoleDescriptor::parse("r", json!({"cluster": "all"})).unwrap_err();
        assert!(err.to_string().contains("role [r]"));
    }

    #[test]
    fn test_parse_rejects_non_object_body() {
        assert!(RoleDescriptor::parse("r", json!(["all"])).is_err());
    }

    #[test]
    fn test_parse_rejects_empty_index_privileges() {
        let body = json!({"indices": [{"names": ["a"], "privileges": []}]});
        assert!(matches!(
            RoleDescriptor::parse("r", body),
            Err(PermsError::MalformedPermissionData(_))
        ));
    }
}
