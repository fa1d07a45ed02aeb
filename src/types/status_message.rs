use serde::{Deserialize, Serialize};

/// Plain acknowledgement returned by the schedule mutation endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusMessage {
    /// Human-readable confirmation, e.g. "Schedule saved.".
    pub message: String,
}
