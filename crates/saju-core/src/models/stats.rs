//! Aggregate task statistics.

use serde::{Deserialize, Serialize};

/// Derived statistics over the task store and roadmap items.
///
/// `streak_days` is the store's monotonic completion counter: it grows by one
/// on every incomplete-to-complete transition and never shrinks. It does not
/// measure consecutive calendar days.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Stats {
    /// Number of tasks across all dates
    pub total_tasks: usize,
    /// Number of tasks currently marked complete
    pub completed_tasks: usize,
    /// Number of saved roadmap items
    pub ongoing_roadmaps: usize,
    /// Completion counter
    pub streak_days: u32,
}

impl Stats {
    /// Tasks not yet complete.
    pub fn pending_tasks(&self) -> usize {
        self.total_tasks.saturating_sub(self.completed_tasks)
    }
}
