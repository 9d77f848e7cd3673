//! Weekly plan model definitions.

use serde::{Deserialize, Serialize};

/// Number of day entries in every weekly plan.
pub const PLAN_DAYS: usize = 7;

/// Records whether a day entry came from model output or was synthesized.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum EntryOrigin {
    /// Extracted from the model's text
    #[default]
    Parsed,

    /// Generated because the model's text had nothing usable for this day
    Placeholder,
}

/// One structured activity of a weekly plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DayPlan {
    /// Position within the plan, 1-based (Day 1 executes first)
    pub day_index: u8,

    /// Short label, never empty
    pub title: String,

    /// Free-text description, never empty
    pub description: String,

    /// Where the entry came from
    #[serde(default)]
    pub origin: EntryOrigin,
}

impl DayPlan {
    /// Creates a parsed entry.
    pub fn parsed(day_index: u8, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            day_index,
            title: title.into(),
            description: description.into(),
            origin: EntryOrigin::Parsed,
        }
    }

    /// Creates a fully synthesized entry for the given day.
    pub fn placeholder(day_index: u8) -> Self {
        Self {
            day_index,
            title: Self::placeholder_title(day_index),
            description: Self::placeholder_description(day_index),
            origin: EntryOrigin::Placeholder,
        }
    }

    /// Title used when the model gave none for this day.
    pub fn placeholder_title(day_index: u8) -> String {
        format!("일일 계획 {day_index}")
    }

    /// Description used when the model gave none for this day.
    pub fn placeholder_description(day_index: u8) -> String {
        format!("{day_index}일차: 오늘의 기운에 맞는 작은 실천 하나를 정해 꾸준히 해 보세요.")
    }

    /// Whether this entry was synthesized.
    pub fn is_placeholder(&self) -> bool {
        self.origin == EntryOrigin::Placeholder
    }
}

/// Exactly seven day entries plus the model's optional extra explanation.
///
/// The fixed-size array carries the "always seven, indices 1..=7" invariant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WeeklyPlan {
    /// Day entries in execution order
    pub days: [DayPlan; PLAN_DAYS],

    /// Free text found after the `ADDITIONAL_EXPLANATION:` marker
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl WeeklyPlan {
    /// Builds a plan from the given entries, keeping the first seven and
    /// padding with placeholders. Day indices are reassigned by position.
    pub fn from_entries(entries: Vec<DayPlan>, explanation: Option<String>) -> Self {
        let mut entries = entries.into_iter();
        let days = std::array::from_fn(|i| {
            let day_index = (i + 1) as u8;
            match entries.next() {
                Some(entry) => DayPlan { day_index, ..entry },
                None => DayPlan::placeholder(day_index),
            }
        });
        Self { days, explanation }
    }

    /// A plan made only of placeholders.
    pub fn placeholders(explanation: Option<String>) -> Self {
        Self::from_entries(Vec::new(), explanation)
    }

    /// Iterates over the day entries in order.
    pub fn iter(&self) -> std::slice::Iter<'_, DayPlan> {
        self.days.iter()
    }

    /// Number of entries that came from model text.
    pub fn parsed_count(&self) -> usize {
        self.days.iter().filter(|day| !day.is_placeholder()).count()
    }
}

impl<'a> IntoIterator for &'a WeeklyPlan {
    type Item = &'a DayPlan;
    type IntoIter = std::slice::Iter<'a, DayPlan>;

    fn into_iter(self) -> Self::IntoIter {
        self.days.iter()
    }
}
