//! Markdown report exported at the end of a session.

use std::fmt;

use crate::{
    models::{ProfileAnalysis, Stats, UserProfile, WeeklyPlan},
    saju::SajuElements,
};

/// A shareable summary of the session.
///
/// Sections without data (no analysis yet, no plan yet) are left out.
pub struct ProfileReport<'a> {
    pub profile: &'a UserProfile,
    pub analysis: Option<&'a ProfileAnalysis>,
    pub plan: Option<&'a WeeklyPlan>,
    pub concern: Option<&'a str>,
    pub stats: Stats,
}

impl fmt::Display for ProfileReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}님의 사주 코칭 리포트", self.profile.name)?;
        writeln!(f)?;
        write!(f, "{}", self.profile)?;
        writeln!(f)?;

        writeln!(f, "## 사주 정보")?;
        writeln!(f)?;
        write!(
            f,
            "{}",
            SajuElements::derive(self.profile.birthdate, self.profile.birth_hour)
        )?;
        writeln!(f)?;

        if let Some(analysis) = self.analysis {
            writeln!(f, "## 사주 분석")?;
            writeln!(f)?;
            write!(f, "{analysis}")?;
            writeln!(f)?;
        }

        if let Some(plan) = self.plan {
            writeln!(f, "## 7일 실천 계획")?;
            writeln!(f)?;
            if let Some(concern) = self.concern {
                writeln!(f, "고민: {concern}")?;
                writeln!(f)?;
            }
            write!(f, "{plan}")?;
            writeln!(f)?;
        }

        writeln!(f, "## 실천 현황")?;
        writeln!(f)?;
        write!(f, "{}", self.stats)
    }
}
