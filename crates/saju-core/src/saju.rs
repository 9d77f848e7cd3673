//! Symbolic birth-chart labels used to flavour prompts.
//!
//! This is a deliberately simplified mapping from birth date and hour onto
//! five labels. No astronomical or lunar-calendar computation happens here;
//! the labels only give the model something to riff on.

use jiff::civil::Date;
use serde::Serialize;

use crate::models::BirthHour;

/// Heavenly stems.
pub const STEMS: [&str; 10] = ["갑", "을", "병", "정", "무", "기", "경", "신", "임", "계"];

/// Earthly branches, starting at 자.
pub const BRANCHES: [&str; 12] = [
    "자", "축", "인", "묘", "진", "사", "오", "미", "신", "유", "술", "해",
];

/// Earthly branches per calendar month, January mapping to 인.
pub const MONTH_BRANCHES: [&str; 12] = [
    "인", "묘", "진", "사", "오", "미", "신", "유", "술", "해", "자", "축",
];

/// The five labels derived from a birth date and hour.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct SajuElements {
    /// 천간
    pub year_stem: &'static str,
    /// 지지
    pub year_branch: &'static str,
    /// 월지
    pub month_branch: &'static str,
    /// 일간
    pub day_stem: &'static str,
    /// 시지
    pub hour_branch: &'static str,
}

impl SajuElements {
    /// Derives the labels for a birth date and hour.
    pub fn derive(birthdate: Date, birth_hour: BirthHour) -> Self {
        let year_offset = i32::from(birthdate.year()) - 4;
        Self {
            year_stem: STEMS[year_offset.rem_euclid(10) as usize],
            year_branch: BRANCHES[year_offset.rem_euclid(12) as usize],
            month_branch: MONTH_BRANCHES[(birthdate.month() - 1) as usize],
            day_stem: STEMS[((birthdate.day() - 1) % 10) as usize],
            hour_branch: birth_hour.branch(),
        }
    }

    /// Labelled pairs in prompt order.
    pub fn labelled(&self) -> [(&'static str, &'static str); 5] {
        [
            ("천간", self.year_stem),
            ("지지", self.year_branch),
            ("월지", self.month_branch),
            ("일간", self.day_stem),
            ("시지", self.hour_branch),
        ]
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    #[test]
    fn test_derive_1990() {
        let elements = SajuElements::derive(date(1990, 1, 1), BirthHour::Unknown);
        // (1990 - 4) % 10 = 6, (1990 - 4) % 12 = 6
        assert_eq!(elements.year_stem, "경");
        assert_eq!(elements.year_branch, "오");
        assert_eq!(elements.month_branch, "인");
        assert_eq!(elements.day_stem, "갑");
        assert_eq!(elements.hour_branch, "미정");
    }

    #[test]
    fn test_derive_month_day_and_hour() {
        let elements = SajuElements::derive(date(1984, 12, 25), BirthHour::Jin);
        assert_eq!(elements.year_stem, "갑");
        assert_eq!(elements.year_branch, "자");
        assert_eq!(elements.month_branch, "축");
        // (25 - 1) % 10 = 4
        assert_eq!(elements.day_stem, "무");
        assert_eq!(elements.hour_branch, "진");
    }

    #[test]
    fn test_years_before_offset_wrap() {
        let elements = SajuElements::derive(date(3, 1, 1), BirthHour::Ja);
        // (3 - 4) mod 10 = 9, (3 - 4) mod 12 = 11
        assert_eq!(elements.year_stem, "계");
        assert_eq!(elements.year_branch, "해");
    }

    #[test]
    fn test_labelled_order() {
        let elements = SajuElements::derive(date(2000, 5, 5), BirthHour::O);
        let labels: Vec<&str> = elements.labelled().iter().map(|(label, _)| *label).collect();
        assert_eq!(labels, vec!["천간", "지지", "월지", "일간", "시지"]);
    }
}
