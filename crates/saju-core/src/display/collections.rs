//! Collection wrapper types for displaying groups of domain objects.

use std::{fmt, ops::Index};

use crate::models::{ChatMessage, Concern, TaskRecord};

/// Newtype wrapper for displaying the tasks of one date.
///
/// # Examples
///
/// ```rust
/// use jiff::{Timestamp, civil::date};
/// use saju_core::{display::Tasks, models::TaskRecord};
///
/// let task = TaskRecord {
///     id: "2025-06-01_0".to_string(),
///     date: date(2025, 6, 1),
///     title: "아침 산책".to_string(),
///     description: "20분".to_string(),
///     completed: false,
///     created_at: Timestamp::now(),
/// };
/// let output = Tasks(vec![task]).to_string();
/// assert!(output.contains("아침 산책"));
/// assert_eq!(Tasks(vec![]).to_string(), "예정된 태스크가 없습니다.\n");
/// ```
pub struct Tasks(pub Vec<TaskRecord>);

impl Tasks {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TaskRecord> {
        self.0.iter()
    }
}

impl From<&[TaskRecord]> for Tasks {
    fn from(tasks: &[TaskRecord]) -> Self {
        Self(tasks.to_vec())
    }
}

impl Index<usize> for Tasks {
    type Output = TaskRecord;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<'a> IntoIterator for &'a Tasks {
    type Item = &'a TaskRecord;
    type IntoIter = std::slice::Iter<'a, TaskRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Tasks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "예정된 태스크가 없습니다.")
        } else {
            for task in &self.0 {
                write!(f, "{task}")?;
            }
            Ok(())
        }
    }
}

/// The conversation so far.
pub struct Transcript<'a>(pub &'a [ChatMessage]);

impl fmt::Display for Transcript<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "아직 대화가 없습니다.");
        }
        for message in self.0 {
            write!(f, "{message}")?;
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Concerns plans were generated for, oldest first.
pub struct Concerns<'a>(pub &'a [Concern]);

impl fmt::Display for Concerns<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "이전 고민 기록이 없습니다.");
        }
        for concern in self.0 {
            write!(f, "{concern}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    #[test]
    fn test_transcript() {
        let messages = vec![ChatMessage::user("안녕"), ChatMessage::assistant("반가워요")];
        let output = Transcript(&messages).to_string();
        assert_eq!(output, "**나**: 안녕\n\n**코치**: 반가워요\n\n");
        assert!(Transcript(&[]).to_string().contains("아직 대화가 없습니다"));
    }

    #[test]
    fn test_concerns() {
        let concerns = vec![Concern {
            concern: "수면 부족".to_string(),
            created_at: date(2025, 6, 1),
        }];
        assert_eq!(Concerns(&concerns).to_string(), "- 수면 부족 (2025-06-01)\n");
    }
}
