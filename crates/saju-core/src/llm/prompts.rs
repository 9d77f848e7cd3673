//! Prompt templates sent to the text generation endpoint.

use std::fmt::Write;

use jiff::civil::Date;

use crate::{
    extractor::EXPLANATION_MARKER,
    models::{BirthHour, ChatMessage, ChatRole, UserProfile},
    saju::SajuElements,
};

/// Marker the analysis prompt asks the model to prefix the core trait line with.
pub const CORE_TRAITS_MARKER: &str = "핵심 특성:";

fn profile_block(name: &str, birthdate: Date, birth_hour: BirthHour) -> String {
    let elements = SajuElements::derive(birthdate, birth_hour);
    let mut block = format!(
        "사용자 정보:\n- 이름: {name}\n- 생년월일: {}\n- 태어난 시간: {}\n\n사주 정보:\n",
        birthdate.strftime("%Y년 %m월 %d일"),
        birth_hour.as_str(),
    );
    for (label, value) in elements.labelled() {
        let _ = writeln!(block, "- {label}: {value}");
    }
    block
}

/// Prompt for a personalised answer to `question`.
pub fn question_prompt(profile: &UserProfile, question: &str) -> String {
    format!(
        "{}\n사용자 질문: {question}\n\n\
         위 정보를 바탕으로 사용자의 질문에 대한 맞춤형 답변을 제공해주세요.\n\
         사주를 기반으로 한 인사이트와 실용적인 조언을 포함해 답변해주세요.\n\
         200자에서 300자 사이로 간결하게 답변해주세요.",
        profile_block(&profile.name, profile.birthdate, profile.birth_hour)
    )
}

/// Prompt for the general reading plus a growth roadmap.
pub fn roadmap_prompt(profile: &UserProfile) -> String {
    format!(
        "{}\n위 정보를 바탕으로 사용자의 사주를 분석하고 간략한 성장 로드맵을 제안해주세요.\n\
         사주의 특성을 바탕으로 한 성격, 장단점, 적성, 그리고 3개월/6개월/1년 단위의 간략한 성장 목표를 제안해주세요.\n\
         전체 400자에서 600자 사이로 작성해주세요.",
        profile_block(&profile.name, profile.birthdate, profile.birth_hour)
    )
}

/// Prompt for the structured onboarding analysis.
pub fn analysis_prompt(name: &str, birthdate: Date, birth_hour: BirthHour) -> String {
    format!(
        "{}\n위 정보를 바탕으로 사용자의 사주를 분석해주세요. 다음 구조로 답변해주세요:\n\n\
         1. {CORE_TRAITS_MARKER} (한 문장으로 간결하게)\n\
         2. 성격과 기질: (200자 내외)\n\
         3. 적성과 재능: (200자 내외)\n\
         4. 대인관계와 소통방식: (200자 내외)\n\
         5. 성장을 위한 제안: (200자 내외)",
        profile_block(name, birthdate, birth_hour)
    )
}

/// Prompt asking for the user's core concern in one sentence.
pub fn summary_prompt(messages: &[ChatMessage]) -> String {
    let mut transcript = String::new();
    for message in messages {
        let speaker = match message.role {
            ChatRole::User => "사용자",
            ChatRole::Assistant => "코치",
        };
        let _ = writeln!(transcript, "{speaker}: {}", message.content.trim());
    }
    format!(
        "다음은 사용자와 AI 코치의 대화입니다.\n\n{transcript}\n\
         위 대화에서 사용자의 핵심 고민을 한 문장으로 요약해주세요.\n\
         설명이나 인사말 없이 요약 문장만 답변해주세요."
    )
}

/// Prompt for a 7-day plan in the line format the extractor reads.
pub fn weekly_plan_prompt(profile: &UserProfile, concern: &str) -> String {
    format!(
        "{}\n사용자의 고민: {concern}\n\n\
         위 정보를 바탕으로 고민을 해결하기 위한 7일 실천 계획을 만들어주세요.\n\
         각 날짜는 반드시 아래 형식의 한 줄로 작성해주세요:\n\n\
         Day 1: 제목 - 구체적인 실천 내용\n\
         Day 2: 제목 - 구체적인 실천 내용\n\
         ...\n\
         Day 7: 제목 - 구체적인 실천 내용\n\n\
         마지막 줄에는 '{EXPLANATION_MARKER} '로 시작하는 한 줄 설명을 덧붙여주세요.",
        profile_block(&profile.name, profile.birthdate, profile.birth_hour)
    )
}
