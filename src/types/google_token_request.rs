use serde::{Deserialize, Serialize};

/// Payload for the Google OAuth callback endpoint.
///
/// The token is the Google ID token obtained by the caller out of band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoogleTokenRequest {
    /// Google ID token.
    pub token: String,
}

impl GoogleTokenRequest {
    /// Create a new `GoogleTokenRequest`.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}
