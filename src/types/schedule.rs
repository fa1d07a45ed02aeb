use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A saved weekly schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    /// Server-assigned identifier; absent until first saved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// Campus network ID of the owner.
    pub netid: String,

    /// Display name; the server defaults this to "Schedule".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Academic term, e.g. "Fall 2025".
    pub term: String,

    /// When the schedule was created, if the server has recorded it.
    #[serde(
        with = "crate::utils::time",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub created: Option<OffsetDateTime>,

    /// When the schedule was last updated, if the server has recorded it.
    #[serde(
        with = "crate::utils::time",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub updated: Option<OffsetDateTime>,
}

impl Schedule {
    /// Create a new, unsaved schedule for a term.
    pub fn new(netid: impl Into<String>, term: impl Into<String>) -> Self {
        Self {
            id: None,
            netid: netid.into(),
            name: None,
            term: term.into(),
            created: None,
            updated: None,
        }
    }
}
