use serde::{Deserialize, Serialize};

/// The assistant's reply to a chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    /// The reply text.
    pub response: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialization() {
        let json = serde_json::json!({"response": "Consider CS 340."});
        let reply: ChatResponse = serde_json::from_value(json).unwrap();
        assert_eq!(reply.response, "Consider CS 340.");
    }
}
