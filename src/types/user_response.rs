use serde::{Deserialize, Serialize};

/// The authenticated user's account summary, as returned by `/auth/me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    /// Campus network ID; the primary key for a student.
    pub netid: String,

    /// The student's display name.
    pub name: String,

    /// The account email address.
    pub email: String,

    /// Declared majors.
    pub majors: Vec<String>,

    /// Declared minors, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minors: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialization_with_minors() {
        let json = serde_json::json!({
            "netid": "jds1234",
            "name": "Jordan Smith",
            "email": "jds1234@example.edu",
            "majors": ["Computer Science"],
            "minors": ["Mathematics"]
        });
        let user: UserResponse = serde_json::from_value(json).unwrap();
        assert_eq!(user.netid, "jds1234");
        assert_eq!(user.majors, vec!["Computer Science"]);
        assert_eq!(user.minors, Some(vec!["Mathematics".to_string()]));
    }

    #[test]
    fn minors_are_optional() {
        let json = serde_json::json!({
            "netid": "jds1234",
            "name": "Jordan Smith",
            "email": "jds1234@example.edu",
            "majors": []
        });
        let user: UserResponse = serde_json::from_value(json).unwrap();
        assert_eq!(user.minors, None);
    }
}
