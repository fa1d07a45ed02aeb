use serde::{Deserialize, Serialize};

/// Payload for creating a new account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// The account email address.
    pub email: String,

    /// The account password.
    pub password: String,

    /// The student's display name.
    pub name: String,
}

impl RegisterRequest {
    /// Create a new `RegisterRequest`.
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            name: name.into(),
        }
    }
}
