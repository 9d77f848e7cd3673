//! Display formatting for models, collections and session views.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! groups of them and composite screens get small wrapper types here. All
//! output is Markdown, rendered by the CLI's terminal renderer or returned
//! verbatim over MCP.
//!
//! - [`collections`]: `Tasks`, `Transcript`, `Concerns`
//! - [`datetime`]: timestamp and Korean date formatting
//! - [`report`]: the exported Markdown report
//! - [`roadmap`]: the roadmap tab (`RoadmapView`, `RoadmapCard`)
//! - [`status`]: one-line confirmations
//!
//! ```rust
//! use saju_core::display::OperationStatus;
//!
//! let status = OperationStatus::success("Added task 2025-06-01_0");
//! assert_eq!(status.to_string(), "Success: Added task 2025-06-01_0\n");
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod report;
pub mod roadmap;
pub mod status;

pub use collections::{Concerns, Tasks, Transcript};
pub use datetime::{KoreanDate, LocalDateTime, MonthTitle};
pub use report::ProfileReport;
pub use status::{OperationStatus, StatusKind};
