//! Task record definitions.

use jiff::{Timestamp, civil::Date};
use serde::{Deserialize, Serialize};

use super::DayPlan;

/// A dated task owned by the task store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskRecord {
    /// `"{YYYY-MM-DD}_{sequence}"`, unique within the store
    pub id: String,

    /// Calendar date the task is scheduled on
    pub date: Date,

    /// Short label
    pub title: String,

    /// Free-text details (may be empty for manual tasks)
    pub description: String,

    /// Completion flag, the only field mutable after insertion
    pub completed: bool,

    /// Timestamp when the task was inserted (UTC)
    pub created_at: Timestamp,
}

/// Data supplied by the caller when adding a task.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
}

impl NewTask {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

impl From<&DayPlan> for NewTask {
    fn from(day: &DayPlan) -> Self {
        Self {
            title: day.title.clone(),
            description: day.description.clone(),
        }
    }
}
