//! Wire models shared by the transport and the entities

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Authenticated user as returned by `/api/v2/me/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub is_superuser: bool,
    #[serde(default)]
    pub is_system_auditor: bool,
    #[serde(default)]
    pub email: String,
}

/// Request body for credential create and update
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CredentialBody {
    pub name: String,
    pub description: String,
    pub credential_type: i64,
    pub inputs: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_body_omits_unset_owner_fields() {
        let body = CredentialBody {
            name: "prod".to_string(),
            description: String::new(),
            credential_type: 4,
            inputs: Map::new(),
            user: None,
            organization: None,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert!(value.get("organization").is_none());
        assert!(value.get("user").is_none());
        assert_eq!(value["credential_type"], 4);
    }

    #[test]
    fn test_user_decodes_with_missing_optional_fields() {
        let user: User = serde_json::from_value(json!({"id": 3, "username": "admin"})).unwrap();
        assert_eq!(user.id, 3);
        assert!(!user.is_superuser);
    }
}
