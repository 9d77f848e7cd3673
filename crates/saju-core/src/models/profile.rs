//! User profile and birth hour definitions.

use std::str::FromStr;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

/// Two-hour birth slot, or unknown.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(try_from = "String", into = "String")]
pub enum BirthHour {
    /// 23:00 - 01:00
    Ja,
    /// 01:00 - 03:00
    Chuk,
    /// 03:00 - 05:00
    In,
    /// 05:00 - 07:00
    Myo,
    /// 07:00 - 09:00
    Jin,
    /// 09:00 - 11:00
    Sa,
    /// 11:00 - 13:00
    O,
    /// 13:00 - 15:00
    Mi,
    /// 15:00 - 17:00
    Sin,
    /// 17:00 - 19:00
    Yu,
    /// 19:00 - 21:00
    Sul,
    /// 21:00 - 23:00
    Hae,
    /// Birth hour not known
    #[default]
    Unknown,
}

impl BirthHour {
    /// All slots in the order they are offered to the user.
    pub const ALL: [BirthHour; 13] = [
        BirthHour::Ja,
        BirthHour::Chuk,
        BirthHour::In,
        BirthHour::Myo,
        BirthHour::Jin,
        BirthHour::Sa,
        BirthHour::O,
        BirthHour::Mi,
        BirthHour::Sin,
        BirthHour::Yu,
        BirthHour::Sul,
        BirthHour::Hae,
        BirthHour::Unknown,
    ];

    /// Label as shown to the user, e.g. `"23-01시"` or `"모름"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            BirthHour::Ja => "23-01시",
            BirthHour::Chuk => "01-03시",
            BirthHour::In => "03-05시",
            BirthHour::Myo => "05-07시",
            BirthHour::Jin => "07-09시",
            BirthHour::Sa => "09-11시",
            BirthHour::O => "11-13시",
            BirthHour::Mi => "13-15시",
            BirthHour::Sin => "15-17시",
            BirthHour::Yu => "17-19시",
            BirthHour::Sul => "19-21시",
            BirthHour::Hae => "21-23시",
            BirthHour::Unknown => "모름",
        }
    }

    /// Earthly branch of the slot, `"미정"` when unknown.
    pub fn branch(&self) -> &'static str {
        match self {
            BirthHour::Ja => "자",
            BirthHour::Chuk => "축",
            BirthHour::In => "인",
            BirthHour::Myo => "묘",
            BirthHour::Jin => "진",
            BirthHour::Sa => "사",
            BirthHour::O => "오",
            BirthHour::Mi => "미",
            BirthHour::Sin => "신",
            BirthHour::Yu => "유",
            BirthHour::Sul => "술",
            BirthHour::Hae => "해",
            BirthHour::Unknown => "미정",
        }
    }
}

impl FromStr for BirthHour {
    type Err = String;

    /// Accepts the display label (`"07-09시"`), the label without the
    /// trailing `시` (`"07-09"`), `"모름"` or `"unknown"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("unknown") {
            return Ok(BirthHour::Unknown);
        }
        BirthHour::ALL
            .into_iter()
            .find(|slot| {
                let label = slot.as_str();
                label == trimmed || label.strip_suffix('시') == Some(trimmed)
            })
            .ok_or_else(|| format!("Invalid birth hour: {s}"))
    }
}

impl TryFrom<String> for BirthHour {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<BirthHour> for String {
    fn from(value: BirthHour) -> Self {
        value.as_str().to_string()
    }
}

/// Birth data collected at onboarding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    /// Display name
    pub name: String,

    /// Date of birth
    pub birthdate: Date,

    /// Birth hour slot
    #[serde(default)]
    pub birth_hour: BirthHour,
}

/// Result of the onboarding analysis.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProfileAnalysis {
    /// Full analysis text as returned by the model (or an error message)
    pub full_analysis: String,

    /// One-line summary of the user's core traits
    pub core_traits: String,
}
