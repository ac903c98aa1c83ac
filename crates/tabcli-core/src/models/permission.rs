use serde::{Deserialize, Serialize};

use super::{one_or_many, NamedRef};

#[derive(Debug, Deserialize)]
pub struct PermissionsResponse {
    #[serde(default)]
    pub permissions: Permissions,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Permissions {
    #[serde(default, deserialize_with = "one_or_many")]
    pub grantee_capabilities: Vec<GranteeCapabilities>,
}

#[derive(Debug, Deserialize)]
pub struct GranteeCapabilities {
    pub user: Option<NamedRef>,
    pub group: Option<NamedRef>,
    #[serde(default)]
    pub capabilities: CapabilityItems,
}

#[derive(Debug, Default, Deserialize)]
pub struct CapabilityItems {
    #[serde(default, deserialize_with = "one_or_many")]
    pub capability: Vec<Capability>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Capability {
    pub name: Option<String>,
    pub mode: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PermissionList {
    pub permissions: Vec<GranteeSummary>,
}

#[derive(Debug, Serialize)]
pub struct GranteeSummary {
    pub user: Option<Grantee>,
    pub group: Option<Grantee>,
    pub capabilities: Vec<Capability>,
}

#[derive(Debug, Serialize)]
pub struct Grantee {
    pub id: Option<String>,
    pub name: Option<String>,
}

impl From<PermissionsResponse> for PermissionList {
    fn from(resp: PermissionsResponse) -> Self {
        Self {
            permissions: resp
                .permissions
                .grantee_capabilities
                .into_iter()
                .map(|gc| GranteeSummary {
                    user: gc.user.map(|u| Grantee { id: u.id, name: u.name }),
                    group: gc.group.map(|g| Grantee { id: g.id, name: g.name }),
                    capabilities: gc.capabilities.capability,
                })
                .collect(),
        }
    }
}

/// Result of a permission add/delete, echoing the server payload for adds.
#[derive(Debug, Serialize)]
pub struct PermissionChange {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

// Request payload for adding a user capability.

#[derive(Debug, Serialize)]
pub struct AddPermissionRequest {
    pub permissions: AddPermissions,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddPermissions {
    pub grantee_capabilities: Vec<AddGrantee>,
}

#[derive(Debug, Serialize)]
pub struct AddGrantee {
    pub user: IdOnly,
    pub capabilities: AddCapabilities,
}

#[derive(Debug, Serialize)]
pub struct IdOnly {
    pub id: String,
}

#[derive(Debug, Serialize)]
pub struct AddCapabilities {
    pub capability: Vec<Capability>,
}

impl AddPermissionRequest {
    pub fn for_user(user_id: &str, capability: &str, mode: &str) -> Self {
        Self {
            permissions: AddPermissions {
                grantee_capabilities: vec![AddGrantee {
                    user: IdOnly {
                        id: user_id.to_string(),
                    },
                    capabilities: AddCapabilities {
                        capability: vec![Capability {
                            name: Some(capability.to_string()),
                            mode: Some(mode.to_string()),
                        }],
                    },
                }],
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_permissions_response() {
        let json = r#"{"permissions": {"granteeCapabilities": [
            {"user": {"id": "u1", "name": "ops"},
             "capabilities": {"capability": [{"name": "Read", "mode": "Allow"}]}},
            {"group": {"id": "g1", "name": "Analysts"},
             "capabilities": {"capability": {"name": "Write", "mode": "Deny"}}}
        ]}}"#;
        let list: PermissionList = serde_json::from_str::<PermissionsResponse>(json)
            .expect("Failed to parse permissions test JSON")
            .into();
        assert_eq!(list.permissions.len(), 2);

        let user_grant = &list.permissions[0];
        assert_eq!(
            user_grant.user.as_ref().and_then(|u| u.name.as_deref()),
            Some("ops")
        );
        assert!(user_grant.group.is_none());
        assert_eq!(user_grant.capabilities[0].name.as_deref(), Some("Read"));

        // Single capability object is normalized to a one-element list
        let group_grant = &list.permissions[1];
        assert_eq!(group_grant.capabilities.len(), 1);
        assert_eq!(group_grant.capabilities[0].mode.as_deref(), Some("Deny"));
    }

    #[test]
    fn test_add_permission_request_shape() {
        let req = AddPermissionRequest::for_user("u1", "Read", "Allow");
        let value = serde_json::to_value(&req).expect("serialize failed");
        assert_eq!(
            value["permissions"]["granteeCapabilities"][0]["user"]["id"],
            "u1"
        );
        assert_eq!(
            value["permissions"]["granteeCapabilities"][0]["capabilities"]["capability"][0]
                ["name"],
            "Read"
        );
    }
}
