//! High-level coaching API on top of the text generation client.
//!
//! [`Coach`] owns a [`TextGenerator`] and exposes the four calls the
//! front-ends need. None of them return an error: upstream failures are
//! logged and turned into text the user can read, so a broken network or a
//! missing key degrades the conversation instead of aborting it.
//!
//! ```rust
//! use saju_core::CoachBuilder;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let coach = CoachBuilder::new()
//!     .with_api_key(std::env::var("GEMINI_API_KEY").ok())
//!     .with_model(Some("gemini-1.5-flash"))
//!     .build()?;
//! # let _ = coach;
//! # Ok(())
//! # }
//! ```

mod builder;

use std::sync::Arc;

use jiff::civil::Date;
use log::{debug, warn};

pub use builder::CoachBuilder;

use crate::{
    error::CoachError,
    extractor::extract_weekly_plan,
    llm::{TextGenerator, prompts},
    models::{BirthHour, ChatMessage, ChatRole, ProfileAnalysis, UserProfile, WeeklyPlan},
};

/// Shown as `core_traits` when the analysis has no core trait line.
pub const CORE_TRAITS_PENDING: &str = "분석 중...";
/// Shown as `core_traits` when the analysis call failed.
pub const CORE_TRAITS_FAILED: &str = "분석 오류";
/// Concern used when there is nothing to summarize.
pub const EMPTY_CONVERSATION_CONCERN: &str = "아직 나눈 대화가 없어 일상의 작은 변화를 시작하고 싶습니다.";

/// Fortune-aware coaching calls.
#[derive(Clone)]
pub struct Coach {
    generator: Arc<dyn TextGenerator>,
}

impl std::fmt::Debug for Coach {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Coach").finish_non_exhaustive()
    }
}

impl Coach {
    pub(crate) fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// User-visible text for a failed generation call.
    pub fn describe_failure(error: &CoachError) -> String {
        match error {
            CoachError::MissingApiKey => format!("API 설정이 필요합니다: {error}"),
            _ => format!("생성 중 오류가 발생했습니다: {error}"),
        }
    }

    async fn generate(&self, purpose: &str, prompt: &str) -> Result<String, CoachError> {
        debug!("Generating {purpose}");
        self.generator.generate(prompt).await.inspect_err(|e| {
            warn!("Generating {purpose} failed: {e}");
        })
    }

    /// Answers `question` for the profile, or writes the general reading and
    /// growth roadmap when no question is given.
    pub async fn generate_insight(&self, profile: &UserProfile, question: Option<&str>) -> String {
        let question = question.map(str::trim).filter(|q| !q.is_empty());
        let (purpose, prompt) = match question {
            Some(question) => ("answer", prompts::question_prompt(profile, question)),
            None => ("roadmap insight", prompts::roadmap_prompt(profile)),
        };

        match self.generate(purpose, &prompt).await {
            Ok(text) => text.trim().to_string(),
            Err(e) => Self::describe_failure(&e),
        }
    }

    /// Condenses the conversation into a one-sentence core concern.
    ///
    /// Without any user message the model is not called. When the call fails
    /// the latest user message stands in for the summary, so a plan can
    /// still be generated from it.
    pub async fn summarize_conversation(&self, messages: &[ChatMessage]) -> String {
        let Some(latest) = messages
            .iter()
            .rev()
            .find(|m| m.role == ChatRole::User && !m.content.trim().is_empty())
        else {
            return EMPTY_CONVERSATION_CONCERN.to_string();
        };

        let fallback = || latest.content.trim().to_string();
        match self.generate("conversation summary", &prompts::summary_prompt(messages)).await {
            Ok(text) => text
                .lines()
                .map(str::trim)
                .find(|line| !line.is_empty())
                .map(str::to_string)
                .unwrap_or_else(fallback),
            Err(_) => fallback(),
        }
    }

    /// Asks for a 7-day plan addressing `concern` and extracts it.
    ///
    /// A failed call yields seven placeholder days with the failure text as
    /// the explanation.
    pub async fn generate_weekly_plan(&self, profile: &UserProfile, concern: &str) -> WeeklyPlan {
        let prompt = prompts::weekly_plan_prompt(profile, concern.trim());
        match self.generate("weekly plan", &prompt).await {
            Ok(text) => extract_weekly_plan(&text),
            Err(e) => WeeklyPlan::placeholders(Some(Self::describe_failure(&e))),
        }
    }

    /// Runs the structured onboarding analysis.
    pub async fn analyze_profile(
        &self,
        name: &str,
        birthdate: Date,
        birth_hour: BirthHour,
    ) -> ProfileAnalysis {
        let prompt = prompts::analysis_prompt(name, birthdate, birth_hour);
        match self.generate("profile analysis", &prompt).await {
            Ok(text) => ProfileAnalysis {
                core_traits: extract_core_traits(&text),
                full_analysis: text,
            },
            Err(e) => {
                let full_analysis = match e {
                    CoachError::MissingApiKey => Self::describe_failure(&e),
                    _ => format!("분석 중 오류가 발생했습니다: {e}"),
                };
                ProfileAnalysis {
                    full_analysis,
                    core_traits: CORE_TRAITS_FAILED.to_string(),
                }
            }
        }
    }
}

/// Text after the core trait marker on the first line containing it.
pub fn extract_core_traits(analysis: &str) -> String {
    analysis
        .lines()
        .find_map(|line| line.split_once(prompts::CORE_TRAITS_MARKER))
        .map(|(_, traits)| traits.trim().to_string())
        .unwrap_or_else(|| CORE_TRAITS_PENDING.to_string())
}
