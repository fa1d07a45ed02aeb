use serde::{Deserialize, Serialize};

/// Credentials posted to the login endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    /// The account email address.
    pub email: String,

    /// The account password.
    pub password: String,
}

impl LoginRequest {
    /// Create a new `LoginRequest`.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}
