use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use jiff::civil::{Date, date};
use saju_core::{BirthHour, Coach, CoachBuilder, CoachError, Result, Session, TextGenerator};

/// Text generator that replays canned replies and records every prompt.
#[derive(Clone, Default)]
pub struct ScriptedGenerator {
    replies: Arc<Mutex<VecDeque<Result<String>>>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl ScriptedGenerator {
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let generator = Self::default();
        for reply in replies {
            generator.push_ok(reply);
        }
        generator
    }

    pub fn push_ok(&self, reply: impl Into<String>) {
        self.replies.lock().unwrap().push_back(Ok(reply.into()));
    }

    pub fn push_err(&self, error: CoachError) {
        self.replies.lock().unwrap().push_back(Err(error));
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(CoachError::EmptyResponse))
    }
}

pub const ANALYSIS: &str = "1. 핵심 특성: 차분하고 성실한 노력가\n2. 성격과 기질: 신중합니다.";
pub const ROADMAP: &str = "3개월: 기초 다지기\n6개월: 확장\n1년: 결실";
pub const WEEKLY_PLAN: &str = "Day 1: 산책 - 아침 20분 걷기
Day 2: 독서 - 자기계발서 10쪽 읽기
Day 3: 정리 - 책상 정리하기
Day 4: 감사 - 감사한 일 세 가지 적기
Day 5: 연락 - 오랜 친구에게 안부 묻기
Day 6: 요리 - 건강한 한 끼 만들기
Day 7: 휴식 - 한 시간 일찍 잠들기
ADDITIONAL_EXPLANATION: 화의 기운을 차분하게 다스리는 한 주입니다.";

pub fn today() -> Date {
    date(2025, 6, 28)
}

/// Builds a coach over the scripted generator.
pub fn create_test_coach(generator: &ScriptedGenerator) -> Coach {
    CoachBuilder::new()
        .with_generator(generator.clone())
        .build()
        .expect("Failed to create coach")
}

/// Creates a session that has already been onboarded.
pub async fn create_onboarded_session(generator: &ScriptedGenerator) -> (Coach, Session) {
    generator.push_ok(ANALYSIS);
    generator.push_ok(ROADMAP);
    let coach = create_test_coach(generator);
    let mut session = Session::new(today());
    session
        .onboard(&coach, "지민", date(1993, 4, 12), BirthHour::Myo, today())
        .await
        .expect("Failed to onboard");
    (coach, session)
}
