//! Roadmap tab rendering: statistics, calendar, selected day and cards.

use std::fmt;

use super::{
    collections::Tasks,
    datetime::KoreanDate,
};
use crate::session::{ROADMAP_TRACK_DAYS, RoadmapCard, RoadmapView};

impl fmt::Display for RoadmapCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "- 🎯 {} · 진행률 {}% · Day {}/{ROADMAP_TRACK_DAYS}",
            self.title, self.progress, self.day
        )
    }
}

impl fmt::Display for RoadmapView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## 나의 7일 계획")?;
        writeln!(f)?;
        write!(f, "{}", self.stats)?;
        writeln!(f)?;

        writeln!(f, "### {}년 {:02}월", self.grid.year, self.grid.month)?;
        writeln!(f)?;
        // today in bold, selected in brackets, a dot for days with tasks
        self.grid.fmt_with(f, |day| {
            let mut cell = day.to_string();
            if self.has_tasks(day) {
                cell.push('•');
            }
            if self.is_selected(day) {
                cell = format!("[{cell}]");
            }
            if self.is_today(day) {
                cell = format!("**{cell}**");
            }
            cell
        })?;
        writeln!(f)?;

        writeln!(f, "### {} 일정", KoreanDate(self.selected_date))?;
        writeln!(f)?;
        write!(f, "{}", Tasks(self.selected_tasks.clone()))?;

        if !self.cards.is_empty() {
            writeln!(f)?;
            writeln!(f, "### 내가 추가한 계획")?;
            writeln!(f)?;
            for card in &self.cards {
                write!(f, "{card}")?;
            }
        }
        Ok(())
    }
}
