use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Authenticated identity for one request.
///
/// Derived from verified claims by the auth gate, handed to handlers through
/// the request, and dropped with it. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Principal {
    pub user_id: Uuid,
    pub email: String,
    pub roles: Vec<String>,
}

impl Principal {
    pub fn new(user_id: Uuid, email: &str, roles: Vec<String>) -> Self {
        Self {
            user_id,
            email: email.to_string(),
            roles,
        }
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}
