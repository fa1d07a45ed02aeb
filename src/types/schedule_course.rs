use serde::{Deserialize, Serialize};

/// A course section placed on a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleCourse {
    /// Server-assigned identifier; absent until first saved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// The schedule this course belongs to.
    pub schedule_id: i64,

    /// The catalog section being scheduled.
    pub section_id: String,
}

impl ScheduleCourse {
    /// Create a new, unsaved course entry for a schedule.
    pub fn new(schedule_id: i64, section_id: impl Into<String>) -> Self {
        Self {
            id: None,
            schedule_id,
            section_id: section_id.into(),
        }
    }
}
