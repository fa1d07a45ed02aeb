use serde::{Deserialize, Serialize};

/// Payload for exchanging a refresh token for a new token pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshTokenRequest {
    /// The stored refresh token.
    pub refresh_token: String,
}

impl RefreshTokenRequest {
    /// Create a new `RefreshTokenRequest`.
    pub fn new(refresh_token: impl Into<String>) -> Self {
        Self {
            refresh_token: refresh_token.into(),
        }
    }
}
