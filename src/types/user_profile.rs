use serde::{Deserialize, Serialize};

/// The extended student profile behind `/profile/me`.
///
/// Everything beyond the netid and majors is optional; the scheduling
/// assistant folds whatever is present into its recommendation context.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Campus network ID; the primary key for a student.
    pub netid: String,

    /// Declared majors.
    pub majors: Vec<String>,

    /// Declared minors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minors: Option<Vec<String>>,

    /// Courses already completed, by course code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classes_already_taken: Option<Vec<String>>,

    /// Career or vocational interests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vocational_interests: Option<Vec<String>>,

    /// Professors the student prefers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favorite_profs: Option<Vec<String>>,

    /// Professors the student would rather avoid.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disliked_profs: Option<Vec<String>>,

    /// Earliest acceptable class start time, e.g. "10:00".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub earliest_class_time: Option<String>,

    /// Courses pinned into every proposed schedule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locked_classes: Option<Vec<String>>,

    /// Free-form self description used as chat context.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub self_description: Option<String>,
}

impl UserProfile {
    /// Create a minimal profile with just the identity fields.
    pub fn new(netid: impl Into<String>, majors: Vec<String>) -> Self {
        Self {
            netid: netid.into(),
            majors,
            ..Self::default()
        }
    }
}

/// Acknowledgement returned when a profile is created or updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSaved {
    /// Human-readable confirmation.
    pub message: String,

    /// The profile as stored by the server.
    pub profile: UserProfile,
}
