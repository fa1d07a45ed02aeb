use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::types::UserProfile;

/// A message posted to the scheduling assistant, with whatever profile
/// context is available to steer recommendations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The user's message text.
    pub message: String,

    /// The netid of the student asking.
    pub user_id: String,

    /// When the message was sent.
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,

    /// Declared majors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub majors: Option<Vec<String>>,

    /// Declared minors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minors: Option<Vec<String>>,

    /// Free-form scheduling preferences, e.g. "no classes before 10am".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule_preferences: Option<String>,

    /// Free-form self description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub self_description: Option<String>,

    /// Courses pinned into every proposed schedule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locked_classes: Option<Vec<String>>,
}

impl ChatRequest {
    /// Create a new `ChatRequest` with no profile context.
    pub fn new(
        message: impl Into<String>,
        user_id: impl Into<String>,
        timestamp: OffsetDateTime,
    ) -> Self {
        Self {
            message: message.into(),
            user_id: user_id.into(),
            timestamp,
            majors: None,
            minors: None,
            schedule_preferences: None,
            self_description: None,
            locked_classes: None,
        }
    }

    /// Fold a stored profile into the request context.
    pub fn with_profile(mut self, profile: &UserProfile) -> Self {
        self.majors = Some(profile.majors.clone());
        self.minors = profile.minors.clone();
        self.self_description = profile.self_description.clone();
        self.locked_classes = profile.locked_classes.clone();
        self.schedule_preferences = profile
            .earliest_class_time
            .as_ref()
            .map(|t| format!("earliest class time {t}"));
        self
    }
}
