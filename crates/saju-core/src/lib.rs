//! Core library for the saju coaching application.
//!
//! The crate turns a user's birth data into prompts for a hosted text
//! generation model, turns the model's free-text answers into a structured
//! seven-day plan, and keeps the resulting tasks in a session-scoped,
//! date-keyed store.
//!
//! # Layers
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//! │   Session    │──▶│    Coach     │──▶│ TextGenerator│──▶│ Gemini REST  │
//! │ (per user)   │   │ (prompts)    │   │   (llm)      │   │              │
//! └──────┬───────┘   └──────┬───────┘   └──────────────┘   └──────────────┘
//!        │                  │ raw text
//!        ▼                  ▼
//! ┌──────────────┐   ┌──────────────┐
//! │  TaskStore   │◀──│  extractor   │
//! │ (store)      │   │ (7 DayPlans) │
//! └──────────────┘   └──────────────┘
//! ```
//!
//! - [`extractor`]: never-failing "Day N: title - description" parser
//! - [`store`]: task store with completion toggling and statistics
//! - [`calendar`]: Monday-first month grids and month navigation
//! - [`saju`]: symbolic birth-chart labels used in prompts
//! - [`coach`]: the four model-backed coaching calls
//! - [`session`]: the explicit per-user context object
//! - [`display`]: Markdown rendering of everything above
//!
//! # Quick Start
//!
//! ```rust
//! use saju_core::{extract_weekly_plan, TaskStore, models::NewTask};
//! use jiff::civil::date;
//!
//! let plan = extract_weekly_plan("Day 1: 산책 - 20분 걷기\nDay 2: 독서");
//! assert_eq!(plan.days[0].title, "산책");
//! assert_eq!(plan.days.len(), 7);
//!
//! let mut store = TaskStore::new();
//! let id = store.add_task(date(2025, 6, 1), NewTask::from(&plan.days[0]));
//! assert!(store.toggle_completion(&id));
//! assert_eq!(store.get_stats(0).completed_tasks, 1);
//! ```

pub mod calendar;
pub mod coach;
pub mod config;
pub mod display;
pub mod error;
pub mod extractor;
pub mod llm;
pub mod models;
pub mod params;
pub mod saju;
pub mod session;
pub mod store;

// Re-export commonly used types
pub use calendar::{MonthGrid, month_calendar};
pub use coach::{Coach, CoachBuilder};
pub use config::CoachConfig;
pub use display::{OperationStatus, ProfileReport, Tasks};
pub use error::{CoachError, Result};
pub use extractor::extract_weekly_plan;
pub use llm::{GeminiClient, TextGenerator};
pub use models::{
    BirthHour, ChatMessage, DayPlan, EntryOrigin, NewTask, ProfileAnalysis, QuickQuestion,
    Stats, TaskRecord, UserProfile, WeeklyPlan,
};
pub use saju::SajuElements;
pub use session::{PlanOutcome, RoadmapView, Session};
pub use store::TaskStore;
