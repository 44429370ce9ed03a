//! Session user record.

use serde::{Deserialize, Serialize};

use rethread_core::{Capability, Email, Role};

/// The signed-in user.
///
/// Persisted under [`super::session::keys::USER`]; absence means no session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: Email,
    /// Account role.
    pub role: Role,
}

impl User {
    /// Create a user record.
    #[must_use]
    pub fn new(name: impl Into<String>, email: Email, role: Role) -> Self {
        Self {
            name: name.into(),
            email,
            role,
        }
    }

    /// Whether this user's role grants `capability`.
    #[must_use]
    pub const fn can(&self, capability: Capability) -> bool {
        self.role.can(capability)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_user_json_shape() {
        let user = User::new(
            "Asha",
            Email::parse("asha@rethread.in").unwrap(),
            Role::Both,
        );
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "Asha", "email": "asha@rethread.in", "role": "both"})
        );
    }

    #[test]
    fn test_unknown_role_fails_to_decode() {
        let raw = r#"{"name":"Asha","email":"asha@rethread.in","role":"owner"}"#;
        assert!(serde_json::from_str::<User>(raw).is_err());
    }
}
