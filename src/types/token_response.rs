use serde::{Deserialize, Serialize};

/// Token pair returned by the login, register, Google-callback, and refresh
/// endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Short-lived bearer credential authorizing API calls.
    pub access_token: String,

    /// Longer-lived credential used to obtain a new access token without
    /// re-authenticating.
    pub refresh_token: String,

    /// Token scheme.
    ///
    /// The backend always sends `"bearer"`.
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

impl TokenResponse {
    /// Create a new `TokenResponse` with the standard bearer token type.
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
            token_type: default_token_type(),
        }
    }
}
