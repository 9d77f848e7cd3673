//! Snapshot of the roadmap tab handed back after every mutation.

use jiff::civil::Date;
use serde::Serialize;

use crate::{
    calendar::MonthGrid,
    models::{RoadmapItem, Stats, TaskRecord},
};

/// Days a saved roadmap item is meant to be practised for.
pub const ROADMAP_TRACK_DAYS: u32 = 21;

const CARD_TITLE_CHARS: usize = 30;

/// One saved roadmap item as shown on its card.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RoadmapCard {
    /// Question truncated for the card header
    pub title: String,
    /// Pseudo progress in percent
    pub progress: u8,
    /// Days since the item was saved
    pub day: i32,
}

impl RoadmapCard {
    pub fn from_item(index: usize, item: &RoadmapItem, today: Date) -> Self {
        Self {
            title: truncate_chars(&item.question, CARD_TITLE_CHARS),
            progress: RoadmapItem::progress(index),
            day: item.days_since_added(today),
        }
    }
}

/// Shortens `text` to `max` characters, appending `...` when cut.
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Everything the roadmap tab renders.
#[derive(Debug, Clone, Serialize)]
pub struct RoadmapView {
    pub stats: Stats,
    pub grid: MonthGrid,
    /// Day numbers of the shown month that have tasks
    pub days_with_tasks: Vec<i8>,
    pub today: Date,
    pub selected_date: Date,
    pub selected_tasks: Vec<TaskRecord>,
    pub cards: Vec<RoadmapCard>,
}

impl RoadmapView {
    /// Whether `day` of the shown month is today.
    pub fn is_today(&self, day: u8) -> bool {
        self.today.year() == self.grid.year
            && self.today.month() == self.grid.month
            && self.today.day() == day as i8
    }

    pub fn has_tasks(&self, day: u8) -> bool {
        self.days_with_tasks.contains(&(day as i8))
    }

    /// Whether `day` of the shown month is the selected date.
    pub fn is_selected(&self, day: u8) -> bool {
        self.selected_date.year() == self.grid.year
            && self.selected_date.month() == self.grid.month
            && self.selected_date.day() == day as i8
    }
}
