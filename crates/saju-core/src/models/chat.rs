//! Conversation and roadmap item definitions.

use std::str::FromStr;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

/// Author of a chat message.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }
}

/// One message of the coaching conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
    /// Set once a weekly plan has been generated from the conversation
    /// ending at this message
    #[serde(default)]
    pub added_to_roadmap: bool,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
            added_to_roadmap: false,
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
            added_to_roadmap: false,
        }
    }
}

/// A question and the answer the coach gave to it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QaPair {
    pub question: String,
    pub answer: String,
}

/// A saved question/answer pair tracked on the roadmap.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoadmapItem {
    pub question: String,
    pub answer: String,
    pub date_added: Date,
}

impl RoadmapItem {
    /// Pseudo progress shown on the roadmap card for the item at `index`.
    pub fn progress(index: usize) -> u8 {
        ((index * 17) % 100 + 10).min(100) as u8
    }

    /// Days elapsed since the item was saved, never negative.
    pub fn days_since_added(&self, today: Date) -> i32 {
        (today - self.date_added).get_days().max(0)
    }
}

/// A concern a weekly plan was generated for.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Concern {
    pub concern: String,
    pub created_at: Date,
}

/// Canned questions offered as one-tap chat starters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum QuickQuestion {
    Career,
    Relationships,
    Growth,
    Stress,
}

impl QuickQuestion {
    pub const ALL: [QuickQuestion; 4] = [
        QuickQuestion::Career,
        QuickQuestion::Relationships,
        QuickQuestion::Growth,
        QuickQuestion::Stress,
    ];

    /// Short label for the chip.
    pub fn label(&self) -> &'static str {
        match self {
            QuickQuestion::Career => "커리어 고민",
            QuickQuestion::Relationships => "인간관계",
            QuickQuestion::Growth => "자기계발",
            QuickQuestion::Stress => "스트레스 관리",
        }
    }

    /// The question sent to the coach.
    pub fn question(&self) -> &'static str {
        match self {
            QuickQuestion::Career => "제 적성에 맞는 커리어 방향은 무엇일까요?",
            QuickQuestion::Relationships => "인간관계에서 제가 개선해야 할 부분이 있을까요?",
            QuickQuestion::Growth => "제가 집중해서 발전시켜야 할 역량은 무엇인가요?",
            QuickQuestion::Stress => "제 사주를 고려할 때 스트레스를 줄이는 방법은 무엇인가요?",
        }
    }
}

impl FromStr for QuickQuestion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "career" | "커리어" | "커리어 고민" => Ok(QuickQuestion::Career),
            "relationships" | "relationship" | "인간관계" => Ok(QuickQuestion::Relationships),
            "growth" | "development" | "자기계발" => Ok(QuickQuestion::Growth),
            "stress" | "스트레스" | "스트레스 관리" => Ok(QuickQuestion::Stress),
            _ => Err(format!("Invalid quick question: {s}")),
        }
    }
}
