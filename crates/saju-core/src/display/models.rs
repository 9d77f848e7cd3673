//! Display implementations for domain models.
//!
//! Everything renders as Markdown so the terminal renderer and the MCP
//! server can pass the text through unchanged.

use std::fmt;

use crate::{
    calendar::{MonthGrid, WEEKDAY_LABELS},
    models::{
        BirthHour, ChatMessage, ChatRole, Concern, DayPlan, ProfileAnalysis, QuickQuestion, Stats,
        TaskRecord, UserProfile, WeeklyPlan,
    },
    saju::SajuElements,
};

use super::datetime::KoreanDate;

impl fmt::Display for BirthHour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for ChatRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for QuickQuestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl fmt::Display for DayPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "### Day {}: {}", self.day_index, self.title)?;
        writeln!(f)?;
        writeln!(f, "{}", self.description)?;
        writeln!(f)
    }
}

impl fmt::Display for WeeklyPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for day in self {
            write!(f, "{day}")?;
        }
        if let Some(explanation) = &self.explanation {
            writeln!(f, "> {explanation}")?;
        }
        Ok(())
    }
}

impl fmt::Display for TaskRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let check = if self.completed { "x" } else { " " };
        writeln!(f, "- [{check}] **{}** `{}`", self.title, self.id)?;
        if !self.description.is_empty() {
            writeln!(f, "  {}", self.description)?;
        }
        Ok(())
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "- 진행 중인 로드맵: {}", self.ongoing_roadmaps)?;
        writeln!(
            f,
            "- 완료한 태스크: {}/{}",
            self.completed_tasks, self.total_tasks
        )?;
        writeln!(f, "- 연속 실천일수: {}", self.streak_days)
    }
}

impl MonthGrid {
    /// Writes the grid as a Markdown table, rendering each non-blank day
    /// through `cell`.
    pub fn fmt_with<F>(&self, f: &mut fmt::Formatter<'_>, cell: F) -> fmt::Result
    where
        F: Fn(u8) -> String,
    {
        writeln!(f, "| {} |", WEEKDAY_LABELS.join(" | "))?;
        writeln!(f, "|{}", "---|".repeat(WEEKDAY_LABELS.len()))?;
        for week in &self.weeks {
            let cells: Vec<String> = week
                .iter()
                .map(|&day| if day == 0 { String::new() } else { cell(day) })
                .collect();
            writeln!(f, "| {} |", cells.join(" | "))?;
        }
        Ok(())
    }
}

impl fmt::Display for MonthGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_with(f, |day| day.to_string())
    }
}

impl fmt::Display for UserProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "- 이름: {}", self.name)?;
        writeln!(f, "- 생년월일: {}", KoreanDate(self.birthdate))?;
        writeln!(f, "- 태어난 시간: {}", self.birth_hour)
    }
}

impl fmt::Display for ProfileAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "**핵심 특성**: {}", self.core_traits)?;
        writeln!(f)?;
        writeln!(f, "{}", self.full_analysis.trim_end())
    }
}

impl fmt::Display for SajuElements {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (label, value) in self.labelled() {
            writeln!(f, "- {label}: {value}")?;
        }
        Ok(())
    }
}

impl fmt::Display for ChatMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let speaker = match self.role {
            ChatRole::User => "나",
            ChatRole::Assistant => "코치",
        };
        writeln!(f, "**{speaker}**: {}", self.content.trim_end())
    }
}

impl fmt::Display for Concern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "- {} ({})", self.concern, self.created_at)
    }
}

#[cfg(test)]
mod tests {
    use jiff::{Timestamp, civil::date};

    use super::*;
    use crate::calendar::month_calendar;

    #[test]
    fn test_weekly_plan_display() {
        let plan = WeeklyPlan::from_entries(
            vec![DayPlan::parsed(1, "산책", "20분 걷기")],
            Some("목의 기운".to_string()),
        );
        let output = plan.to_string();

        assert!(output.starts_with("### Day 1: 산책\n\n20분 걷기\n"));
        assert!(output.contains("### Day 7: 일일 계획 7"));
        assert!(output.ends_with("> 목의 기운\n"));
    }

    #[test]
    fn test_task_display_shows_checkbox() {
        let mut task = TaskRecord {
            id: "2025-06-01_0".to_string(),
            date: date(2025, 6, 1),
            title: "명상".to_string(),
            description: String::new(),
            completed: false,
            created_at: Timestamp::now(),
        };
        assert_eq!(task.to_string(), "- [ ] **명상** `2025-06-01_0`\n");

        task.completed = true;
        task.description = "10분".to_string();
        assert_eq!(task.to_string(), "- [x] **명상** `2025-06-01_0`\n  10분\n");
    }

    #[test]
    fn test_stats_display() {
        let stats = Stats {
            total_tasks: 5,
            completed_tasks: 2,
            ongoing_roadmaps: 1,
            streak_days: 3,
        };
        let output = stats.to_string();
        assert!(output.contains("완료한 태스크: 2/5"));
        assert!(output.contains("연속 실천일수: 3"));
    }

    #[test]
    fn test_month_grid_table() {
        let output = month_calendar(2025, 2).unwrap().to_string();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "| 월 | 화 | 수 | 목 | 금 | 토 | 일 |");
        assert_eq!(lines.len(), 2 + 6);
        assert_eq!(lines[2], "|  |  |  |  |  | 1 | 2 |");
    }

    #[test]
    fn test_profile_display() {
        let profile = UserProfile {
            name: "하늘".to_string(),
            birthdate: date(1988, 2, 9),
            birth_hour: BirthHour::Unknown,
        };
        let output = profile.to_string();
        assert!(output.contains("1988년 02월 09일"));
        assert!(output.contains("태어난 시간: 모름"));
    }
}
