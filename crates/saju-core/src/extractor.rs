//! Tolerant extraction of a seven-day plan from free-form model output.
//!
//! The model is asked for lines shaped like `Day N: title - description`,
//! optionally followed by an `ADDITIONAL_EXPLANATION:` line, but nothing
//! enforces that shape. [`extract_weekly_plan`] accepts whatever came back
//! and always produces a [`WeeklyPlan`] with exactly seven entries.
//!
//! Each selected line is run through an ordered list of rules. The first rule
//! that yields an entry wins; when none does, the line becomes a placeholder.
//!
//! | Priority | Rule                                   | Result                                   |
//! |----------|----------------------------------------|------------------------------------------|
//! | 1        | `title - description` separator        | split on the first separator             |
//! | 2        | remainder after `Day N:` is non-empty  | title, description from the next line    |
//! | 3        | remainder empty                        | whole line as description                |
//! | -        | nothing usable                         | placeholder entry                        |
//!
//! # Examples
//!
//! ```rust
//! use saju_core::extractor::extract_weekly_plan;
//!
//! let plan = extract_weekly_plan("Day 1: Meditate - Sit quietly for 10 minutes");
//! assert_eq!(plan.days[0].title, "Meditate");
//! assert_eq!(plan.days[0].description, "Sit quietly for 10 minutes");
//! assert!(plan.days[1].is_placeholder());
//! ```

use std::sync::OnceLock;

use log::debug;
use regex::Regex;

use crate::models::{DayPlan, PLAN_DAYS, WeeklyPlan};

/// Marker introducing the model's free-text explanation.
pub const EXPLANATION_MARKER: &str = "ADDITIONAL_EXPLANATION:";

fn day_line_regex() -> &'static Regex {
    static DAY_LINE_RE: OnceLock<Regex> = OnceLock::new();
    DAY_LINE_RE.get_or_init(|| {
        Regex::new(r"(?i)^\s*(?:[-*#>]+\s*)*(?:\d+[.)]\s*)?(?:\*\*|__)?day\s*\d+\s*(?:\*\*|__)?\s*[:：]\s*(?:\*\*|__)?")
            .expect("day line regex must compile")
    })
}

fn separator_regex() -> &'static Regex {
    static SEPARATOR_RE: OnceLock<Regex> = OnceLock::new();
    SEPARATOR_RE.get_or_init(|| Regex::new(r"(?:^|\s+)(?:--|[-–—])\s+").expect("separator regex must compile"))
}

fn explanation_regex() -> &'static Regex {
    static EXPLANATION_RE: OnceLock<Regex> = OnceLock::new();
    EXPLANATION_RE.get_or_init(|| {
        Regex::new(r"ADDITIONAL_EXPLANATION:[ \t]*([^\n]*)")
            .expect("explanation regex must compile")
    })
}

/// Outcome of running the rule list over one selected line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum LineParse {
    Parsed(DayPlan),
    Placeholder,
}

/// A selected `Day N:` line together with the context the rules need.
struct DayLine<'a> {
    day_index: u8,
    line: &'a str,
    remainder: &'a str,
    next: Option<&'a str>,
}

type Rule = fn(&DayLine<'_>) -> Option<DayPlan>;

/// Rules in strict priority order.
const RULES: [Rule; 3] = [
    split_on_separator,
    title_with_following_line,
    whole_line_as_description,
];

/// Extracts exactly seven day entries, plus the optional explanation, from
/// raw model output. Never fails.
pub fn extract_weekly_plan(raw_text: &str) -> WeeklyPlan {
    let (body, explanation) = split_explanation(raw_text);
    let lines: Vec<&str> = body.lines().collect();

    let entries: Vec<DayPlan> = lines
        .iter()
        .enumerate()
        .filter_map(|(line_no, &line)| day_remainder(line).map(|rest| (line_no, line, rest)))
        .take(PLAN_DAYS)
        .enumerate()
        .map(|(position, (line_no, line, remainder))| {
            let day_line = DayLine {
                day_index: (position + 1) as u8,
                line,
                remainder,
                next: lines.get(line_no + 1).copied(),
            };
            match parse_day_line(&day_line) {
                LineParse::Parsed(day) => day,
                LineParse::Placeholder => DayPlan::placeholder(day_line.day_index),
            }
        })
        .collect();

    if entries.len() < PLAN_DAYS {
        debug!(
            "Found {} day lines, padding with {} placeholders",
            entries.len(),
            PLAN_DAYS - entries.len()
        );
    }

    WeeklyPlan::from_entries(entries, explanation)
}

/// Removes the first explanation segment from the text and returns it
/// separately. An empty explanation is reported as `None`.
pub fn split_explanation(raw_text: &str) -> (String, Option<String>) {
    let Some(captures) = explanation_regex().captures(raw_text) else {
        return (raw_text.to_string(), None);
    };
    let Some(whole) = captures.get(0) else {
        return (raw_text.to_string(), None);
    };

    let explanation = captures
        .get(1)
        .map(|m| m.as_str().trim())
        .filter(|text| !text.is_empty())
        .map(str::to_string);

    let mut body = String::with_capacity(raw_text.len());
    body.push_str(&raw_text[..whole.start()]);
    body.push_str(&raw_text[whole.end()..]);

    (body, explanation)
}

/// Returns the text after the `Day N:` prefix when the line starts one.
fn day_remainder(line: &str) -> Option<&str> {
    day_line_regex()
        .find(line)
        .map(|prefix| line[prefix.end()..].trim())
}

fn is_day_line(line: &str) -> bool {
    day_line_regex().is_match(line)
}

fn parse_day_line(day_line: &DayLine<'_>) -> LineParse {
    RULES
        .iter()
        .find_map(|rule| rule(day_line))
        .map_or(LineParse::Placeholder, LineParse::Parsed)
}

/// Trims whitespace and unbalanced Markdown emphasis markers left over when
/// bold text spans the prefix and the title.
fn strip_emphasis(text: &str) -> &str {
    text.trim().trim_matches(|c: char| c == '*' || c == '_').trim()
}

fn split_on_separator(day_line: &DayLine<'_>) -> Option<DayPlan> {
    let separator = separator_regex().find(day_line.remainder)?;
    let title = strip_emphasis(&day_line.remainder[..separator.start()]);
    let description = strip_emphasis(&day_line.remainder[separator.end()..]);

    if description.is_empty() {
        return None;
    }

    let title = if title.is_empty() {
        DayPlan::placeholder_title(day_line.day_index)
    } else {
        title.to_string()
    };

    Some(DayPlan::parsed(day_line.day_index, title, description))
}

fn title_with_following_line(day_line: &DayLine<'_>) -> Option<DayPlan> {
    let title = strip_emphasis(
        day_line
            .remainder
            .trim_end_matches(|c: char| matches!(c, '-' | '–' | '—') || c.is_whitespace()),
    );
    if title.is_empty() {
        return None;
    }

    let description = day_line
        .next
        .map(str::trim)
        .filter(|next| !next.is_empty() && !is_day_line(next))
        .map_or_else(
            || DayPlan::placeholder_description(day_line.day_index),
            str::to_string,
        );

    Some(DayPlan::parsed(day_line.day_index, title, description))
}

fn whole_line_as_description(day_line: &DayLine<'_>) -> Option<DayPlan> {
    let description = day_line.line.trim();
    if description.is_empty() {
        return None;
    }

    Some(DayPlan::parsed(
        day_line.day_index,
        DayPlan::placeholder_title(day_line.day_index),
        description,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EntryOrigin;

    const WELL_FORMED: &str = "Day 1: Meditate - Sit quietly for 10 minutes
Day 2: Walk - Take a 20 min walk
Day 3: Journal - Write three things you are grateful for
Day 4: Call - Reach out to an old friend
Day 5: Read - Read one chapter of a book
Day 6: Cook - Prepare a healthy meal
Day 7: Rest - Go to bed an hour early";

    fn assert_seven_in_order(plan: &WeeklyPlan) {
        let indices: Vec<u8> = plan.iter().map(|d| d.day_index).collect();
        assert_eq!(indices, vec![1, 2, 3, 4, 5, 6, 7]);
        for day in plan {
            assert!(!day.title.is_empty());
            assert!(!day.description.is_empty());
        }
    }

    #[test]
    fn test_empty_input_yields_placeholders() {
        let plan = extract_weekly_plan("");
        assert_seven_in_order(&plan);
        assert!(plan.iter().all(DayPlan::is_placeholder));
        assert_eq!(plan.explanation, None);
        assert_eq!(plan.days[2].title, "일일 계획 3");
    }

    #[test]
    fn test_unparseable_input_yields_placeholders() {
        let plan = extract_weekly_plan("죄송합니다. 지금은 계획을 만들 수 없습니다.\n다시 시도해 주세요.");
        assert_seven_in_order(&plan);
        assert_eq!(plan.parsed_count(), 0);
    }

    #[test]
    fn test_well_formed_plan() {
        let plan = extract_weekly_plan(WELL_FORMED);
        assert_seven_in_order(&plan);
        assert_eq!(plan.parsed_count(), 7);
        assert_eq!(plan.days[0].title, "Meditate");
        assert_eq!(plan.days[0].description, "Sit quietly for 10 minutes");
        assert_eq!(plan.days[1].title, "Walk");
        assert_eq!(plan.days[1].description, "Take a 20 min walk");
        assert_eq!(plan.days[6].title, "Rest");
        assert_eq!(plan.days[6].description, "Go to bed an hour early");
    }

    #[test]
    fn test_three_lines_padded_with_placeholders() {
        let raw = "Here is your plan:\nDay 1: A - a\nDay 2: B - b\nDay 3: C - c\nGood luck!";
        let plan = extract_weekly_plan(raw);
        assert_seven_in_order(&plan);
        assert_eq!(plan.days[2].title, "C");
        assert_eq!(plan.days[2].origin, EntryOrigin::Parsed);
        assert!(plan.days[3..].iter().all(DayPlan::is_placeholder));
    }

    #[test]
    fn test_title_only_takes_following_line() {
        let raw = "Day 1: OnlyTitleNoDash\nSome free text\nDay 2: Another - desc";
        let plan = extract_weekly_plan(raw);
        assert_eq!(plan.days[0].title, "OnlyTitleNoDash");
        assert_eq!(plan.days[0].description, "Some free text");
        assert_eq!(plan.days[1].title, "Another");
        assert_eq!(plan.days[1].description, "desc");
    }

    #[test]
    fn test_title_only_does_not_steal_next_day_line() {
        let raw = "Day 1: Stretch\nDay 2: Walk - Around the park";
        let plan = extract_weekly_plan(raw);
        assert_eq!(plan.days[0].title, "Stretch");
        assert_eq!(plan.days[0].description, DayPlan::placeholder_description(1));
        assert_eq!(plan.days[0].origin, EntryOrigin::Parsed);
        assert_eq!(plan.days[1].title, "Walk");
    }

    #[test]
    fn test_title_only_skips_blank_following_line() {
        let plan = extract_weekly_plan("Day 1: Stretch\n\nStretch for five minutes");
        assert_eq!(plan.days[0].description, DayPlan::placeholder_description(1));
    }

    #[test]
    fn test_multiple_hyphens_split_on_first() {
        let plan = extract_weekly_plan("Day 1: Focus - Work 25 min - rest 5 min - repeat");
        assert_eq!(plan.days[0].title, "Focus");
        assert_eq!(plan.days[0].description, "Work 25 min - rest 5 min - repeat");
    }

    #[test]
    fn test_hyphenated_words_are_not_separators() {
        let plan = extract_weekly_plan("Day 1: Self-care - Take a long bath");
        assert_eq!(plan.days[0].title, "Self-care");
        assert_eq!(plan.days[0].description, "Take a long bath");
    }

    #[test]
    fn test_empty_remainder_uses_whole_line() {
        let plan = extract_weekly_plan("Day 3:");
        assert_eq!(plan.days[0].title, "일일 계획 1");
        assert_eq!(plan.days[0].description, "Day 3:");
        assert_eq!(plan.days[0].origin, EntryOrigin::Parsed);
    }

    #[test]
    fn test_missing_title_before_separator() {
        let plan = extract_weekly_plan("Day 1: - Drink more water");
        assert_eq!(plan.days[0].title, "일일 계획 1");
        assert_eq!(plan.days[0].description, "Drink more water");
    }

    #[test]
    fn test_trailing_separator_falls_back_to_title_rule() {
        let plan = extract_weekly_plan("Day 1: Hydrate -\nDrink 8 glasses of water");
        assert_eq!(plan.days[0].title, "Hydrate");
        assert_eq!(plan.days[0].description, "Drink 8 glasses of water");
    }

    #[test]
    fn test_position_determines_day_index() {
        let raw = "Day 5: A - a\nDay 5: B - b\nDay 42: C - c";
        let plan = extract_weekly_plan(raw);
        assert_eq!(plan.days[0].title, "A");
        assert_eq!(plan.days[1].title, "B");
        assert_eq!(plan.days[2].title, "C");
        assert_eq!(plan.days[2].day_index, 3);
    }

    #[test]
    fn test_more_than_seven_lines_truncated() {
        let raw = (1..=10)
            .map(|i| format!("Day {i}: T{i} - D{i}"))
            .collect::<Vec<_>>()
            .join("\n");
        let plan = extract_weekly_plan(&raw);
        assert_seven_in_order(&plan);
        assert_eq!(plan.days[6].title, "T7");
        assert!(plan.iter().all(|d| d.title != "T8"));
    }

    #[test]
    fn test_explanation_is_isolated() {
        let raw = format!("{WELL_FORMED}\nADDITIONAL_EXPLANATION: 당신의 일간은 갑목이라 꾸준함이 중요합니다.");
        let plan = extract_weekly_plan(&raw);
        assert_eq!(plan.parsed_count(), 7);
        assert_eq!(
            plan.explanation.as_deref(),
            Some("당신의 일간은 갑목이라 꾸준함이 중요합니다.")
        );
        assert!(plan.iter().all(|d| !d.description.contains(EXPLANATION_MARKER)));
    }

    #[test]
    fn test_explanation_stops_at_newline() {
        let (body, explanation) =
            split_explanation("ADDITIONAL_EXPLANATION: first line\nDay 1: A - a");
        assert_eq!(explanation.as_deref(), Some("first line"));
        assert_eq!(body, "\nDay 1: A - a");
    }

    #[test]
    fn test_empty_explanation_is_none() {
        let (_, explanation) = split_explanation("Day 1: A - a\nADDITIONAL_EXPLANATION:   ");
        assert_eq!(explanation, None);
    }

    #[test]
    fn test_explanation_is_not_used_as_description() {
        let plan = extract_weekly_plan("Day 1: Breathe\nADDITIONAL_EXPLANATION: why");
        assert_eq!(plan.days[0].description, DayPlan::placeholder_description(1));
        assert_eq!(plan.explanation.as_deref(), Some("why"));
    }

    #[test]
    fn test_markdown_decorated_lines() {
        let raw = "- **Day 1:** 명상 - 아침 10분 명상\n### Day 2: 산책 – 점심 후 20분 걷기\n* day 3 : 독서 — 30분 독서";
        let plan = extract_weekly_plan(raw);
        assert_eq!(plan.days[0].title, "명상");
        assert_eq!(plan.days[0].description, "아침 10분 명상");
        assert_eq!(plan.days[1].title, "산책");
        assert_eq!(plan.days[1].description, "점심 후 20분 걷기");
        assert_eq!(plan.days[2].title, "독서");
        assert_eq!(plan.days[2].description, "30분 독서");
    }

    #[test]
    fn test_bold_spanning_prefix_and_title() {
        let plan = extract_weekly_plan("**Day 1: Meditate** - Sit quietly\n**Day 2: Walk**\nTake a short walk");
        assert_eq!(plan.days[0].title, "Meditate");
        assert_eq!(plan.days[0].description, "Sit quietly");
        assert_eq!(plan.days[1].title, "Walk");
        assert_eq!(plan.days[1].description, "Take a short walk");
    }

    #[test]
    fn test_numbered_list_prefix() {
        let plan = extract_weekly_plan("1. Day 2: Walk - Park\n2) Day 3: Read - One chapter");
        assert_eq!(plan.parsed_count(), 2);
        assert_eq!(plan.days[0].day_index, 1);
        assert_eq!(plan.days[0].title, "Walk");
        assert_eq!(plan.days[0].description, "Park");
        assert_eq!(plan.days[1].title, "Read");
    }

    #[test]
    fn test_double_hyphen_separator() {
        let plan = extract_weekly_plan("Day 1: Run -- 5km");
        assert_eq!(plan.days[0].title, "Run");
        assert_eq!(plan.days[0].description, "5km");
    }

    #[test]
    fn test_crlf_line_endings() {
        let plan = extract_weekly_plan("Day 1: A - a\r\nDay 2: B\r\nnotes for b\r\n");
        assert_eq!(plan.days[0].description, "a");
        assert_eq!(plan.days[1].description, "notes for b");
    }

    #[test]
    fn test_words_starting_with_day_are_not_day_lines() {
        let plan = extract_weekly_plan("Daylight: enjoy it\nDay 1: A - a");
        assert_eq!(plan.days[0].title, "A");
        assert_eq!(plan.parsed_count(), 1);
    }

    #[test]
    fn test_parse_day_line_tags_placeholder() {
        let day_line = DayLine {
            day_index: 2,
            line: "",
            remainder: "",
            next: None,
        };
        assert_eq!(parse_day_line(&day_line), LineParse::Placeholder);
    }
}
