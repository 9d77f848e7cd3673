//! Data models for plans, tasks, profiles and conversations.
//!
//! This module contains the core domain models. Display implementations for
//! these models are located in [`crate::display::models`] to keep data
//! structures separate from presentation logic.
//!
//! # Examples
//!
//! ```rust
//! use saju_core::models::{DayPlan, WeeklyPlan};
//!
//! let plan = WeeklyPlan::from_entries(
//!     vec![DayPlan::parsed(1, "명상", "10분 동안 조용히 앉아 있기")],
//!     None,
//! );
//! assert_eq!(plan.days.len(), 7);
//! assert!(plan.days[6].is_placeholder());
//! println!("{}", plan); // Formats each day as a markdown section
//! ```

pub mod chat;
pub mod plan;
pub mod profile;
pub mod stats;
pub mod task;

#[cfg(test)]
mod tests;

pub use chat::{ChatMessage, ChatRole, Concern, QaPair, QuickQuestion, RoadmapItem};
pub use plan::{DayPlan, EntryOrigin, PLAN_DAYS, WeeklyPlan};
pub use profile::{BirthHour, ProfileAnalysis, UserProfile};
pub use stats::Stats;
pub use task::{NewTask, TaskRecord};
