//! Parameter structures shared by the front-ends.
//!
//! The CLI and the MCP server accept the same operations. Both build one of
//! these structures (the CLI through `From<...Args>` conversions, the MCP
//! server by deserializing tool arguments) and hand it to a [`Session`]
//! method. Dates travel as `YYYY-MM-DD` strings and are parsed here so every
//! interface reports malformed input the same way.
//!
//! JSON schema derives are only compiled with the `schema` feature.
//!
//! [`Session`]: crate::session::Session

use std::path::PathBuf;

use jiff::civil::Date;
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    calendar::parse_date,
    error::{CoachError, Result},
    models::{BirthHour, QuickQuestion, UserProfile},
};

fn parse_optional_date(value: Option<&str>) -> Result<Option<Date>> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(parse_date)
        .transpose()
}

fn required(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoachError::invalid_input(field).with_reason(format!("{field} must not be empty")));
    }
    Ok(trimmed.to_string())
}

/// Raw model output to run through the plan extractor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ExtractPlan {
    /// Free text containing "Day N: title - description" lines
    pub text: String,
}

/// Birth data for onboarding.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Onboard {
    /// Display name
    pub name: String,
    /// Date of birth as YYYY-MM-DD
    pub birthdate: String,
    /// Birth hour slot such as "07-09시", or "모름" when unknown
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_hour: Option<String>,
}

impl Onboard {
    pub fn name(&self) -> Result<String> {
        required("name", &self.name)
    }

    pub fn birthdate(&self) -> Result<Date> {
        parse_date(&self.birthdate)
    }

    /// Parsed birth hour; absent means unknown.
    pub fn birth_hour(&self) -> Result<BirthHour> {
        match self.birth_hour.as_deref().map(str::trim).filter(|h| !h.is_empty()) {
            Some(raw) => raw
                .parse()
                .map_err(|reason: String| CoachError::invalid_input("birth_hour").with_reason(reason)),
            None => Ok(BirthHour::Unknown),
        }
    }

    /// Validates every field and assembles the profile.
    pub fn profile(&self) -> Result<UserProfile> {
        Ok(UserProfile {
            name: self.name()?,
            birthdate: self.birthdate()?,
            birth_hour: self.birth_hour()?,
        })
    }
}

/// A free-form question for the coach.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Ask {
    pub question: String,
}

/// One of the canned quick questions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct QuickAsk {
    /// career, relationships, growth or stress
    pub topic: String,
}

impl QuickAsk {
    pub fn topic(&self) -> Result<QuickQuestion> {
        self.topic
            .parse()
            .map_err(|reason: String| CoachError::invalid_input("topic").with_reason(reason))
    }
}

/// An explicit concern to build a weekly plan for.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct PlanForConcern {
    pub concern: String,
}

/// A manual task.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct AddTask {
    /// YYYY-MM-DD; defaults to the selected date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl AddTask {
    pub fn date(&self) -> Result<Option<Date>> {
        parse_optional_date(self.date.as_deref())
    }
}

/// Identifies a task by its `YYYY-MM-DD_N` id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct TaskId {
    pub id: String,
}

/// Optional date argument.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct DateQuery {
    /// YYYY-MM-DD; defaults to the selected date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl DateQuery {
    pub fn date(&self) -> Result<Option<Date>> {
        parse_optional_date(self.date.as_deref())
    }
}

/// Month to lay out as a calendar grid.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct MonthQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i16>,
    /// 1-12
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<i8>,
}

impl MonthQuery {
    /// Fills missing parts from `today`.
    pub fn resolve(&self, today: Date) -> (i16, i8) {
        (
            self.year.unwrap_or_else(|| today.year()),
            self.month.unwrap_or_else(|| today.month()),
        )
    }
}

/// Direction for month navigation.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum MonthStep {
    Prev,
    #[default]
    Next,
}

/// Moves the calendar one month back or forward.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct NavigateMonth {
    pub direction: MonthStep,
}

/// Chooses which answer to save on the roadmap.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SaveRoadmapItem {
    /// 1-based position in the question history; defaults to the latest
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
}

/// 1-based position of a saved roadmap item.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct RoadmapIndex {
    pub index: usize,
}

/// Destination of the Markdown report.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ExportReport {
    /// File path; defaults to the XDG data directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl ExportReport {
    pub fn path(&self) -> Option<PathBuf> {
        self.path
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    #[test]
    fn test_onboard_parsing() {
        let params = Onboard {
            name: "  서연 ".to_string(),
            birthdate: "1992-11-03".to_string(),
            birth_hour: Some("19-21시".to_string()),
        };
        assert_eq!(params.name().unwrap(), "서연");
        assert_eq!(params.birthdate().unwrap(), date(1992, 11, 3));
        assert_eq!(params.birth_hour().unwrap(), BirthHour::Sul);
    }

    #[test]
    fn test_onboard_rejects_bad_input() {
        let params = Onboard {
            name: " ".to_string(),
            birthdate: "1992/11/03".to_string(),
            birth_hour: Some("noon".to_string()),
        };
        assert!(matches!(params.name(), Err(CoachError::InvalidInput { .. })));
        assert!(params.birthdate().is_err());
        assert!(matches!(
            params.birth_hour(),
            Err(CoachError::InvalidInput { ref field, .. }) if field == "birth_hour"
        ));
    }

    #[test]
    fn test_missing_birth_hour_is_unknown() {
        let params: Onboard =
            serde_json::from_str(r#"{"name": "a", "birthdate": "2000-01-01"}"#).unwrap();
        assert_eq!(params.birth_hour().unwrap(), BirthHour::Unknown);
    }

    #[test]
    fn test_optional_dates() {
        let query = DateQuery { date: None };
        assert_eq!(query.date().unwrap(), None);

        let task = AddTask {
            date: Some("2025-06-01".to_string()),
            title: "t".to_string(),
            description: None,
        };
        assert_eq!(task.date().unwrap(), Some(date(2025, 6, 1)));

        let blank = DateQuery {
            date: Some("  ".to_string()),
        };
        assert_eq!(blank.date().unwrap(), None);
    }

    #[test]
    fn test_quick_topic() {
        let ask = QuickAsk {
            topic: "stress".to_string(),
        };
        assert_eq!(ask.topic().unwrap(), QuickQuestion::Stress);
        assert!(QuickAsk::default().topic().is_err());
    }

    #[test]
    fn test_month_query_defaults_to_today() {
        let today = date(2025, 6, 28);
        assert_eq!(MonthQuery::default().resolve(today), (2025, 6));
        let query = MonthQuery {
            year: None,
            month: Some(2),
        };
        assert_eq!(query.resolve(today), (2025, 2));
    }

    #[test]
    fn test_onboard_profile() {
        let params = Onboard {
            name: "하늘".to_string(),
            birthdate: "2001-07-15".to_string(),
            birth_hour: None,
        };
        let profile = params.profile().unwrap();
        assert_eq!(profile.name, "하늘");
        assert_eq!(profile.birth_hour, BirthHour::Unknown);
    }

    #[test]
    fn test_month_step_serde() {
        let nav: NavigateMonth = serde_json::from_str(r#"{"direction": "prev"}"#).unwrap();
        assert_eq!(nav.direction, MonthStep::Prev);
    }
}
