//! One user's coaching session.
//!
//! A [`Session`] is the explicit context object every front-end owns: the
//! profile and its analysis, the conversation, the roadmap, the current
//! weekly plan and the [`TaskStore`] the plan writes into. It lives for as
//! long as the process (or the interactive shell) does and is never
//! persisted.
//!
//! Operations that talk to the model take a [`Coach`]; operations that
//! depend on the current day take `today` so callers and tests control the
//! clock. Mutating calls are followed by [`Session::view`] to obtain a fresh
//! [`RoadmapView`] for rendering.

mod view;

use std::{
    fs,
    path::{Path, PathBuf},
};

use jiff::{ToSpan, civil::Date};
use log::{debug, info};

pub use view::{ROADMAP_TRACK_DAYS, RoadmapCard, RoadmapView, truncate_chars};

use crate::{
    calendar,
    coach::Coach,
    display::ProfileReport,
    error::{CoachError, Result},
    models::{
        BirthHour, ChatMessage, ChatRole, Concern, NewTask, ProfileAnalysis, QaPair, QuickQuestion,
        RoadmapItem, Stats, TaskRecord, UserProfile, WeeklyPlan,
    },
    store::TaskStore,
};

/// Earliest birth date accepted at onboarding.
pub const MIN_BIRTHDATE: Date = Date::constant(1920, 1, 1);

/// Result of generating a weekly plan and registering it as tasks.
#[derive(Debug, Clone)]
pub struct PlanOutcome {
    pub concern: String,
    pub plan: WeeklyPlan,
    /// Ids of the seven tasks, day 1 first
    pub task_ids: Vec<String>,
}

/// Session-scoped state of one user.
#[derive(Debug, Clone)]
pub struct Session {
    profile: Option<UserProfile>,
    analysis: Option<ProfileAnalysis>,
    messages: Vec<ChatMessage>,
    chat_history: Vec<QaPair>,
    roadmap: Option<String>,
    roadmap_items: Vec<RoadmapItem>,
    weekly_plan: Option<WeeklyPlan>,
    current_concern: Option<String>,
    previous_concerns: Vec<Concern>,
    tasks: TaskStore,
    current_month: Date,
    selected_date: Date,
    has_initial_greeting: bool,
}

impl Session {
    /// Starts an empty session with the calendar on `today`.
    pub fn new(today: Date) -> Self {
        Self {
            profile: None,
            analysis: None,
            messages: Vec::new(),
            chat_history: Vec::new(),
            roadmap: None,
            roadmap_items: Vec::new(),
            weekly_plan: None,
            current_concern: None,
            previous_concerns: Vec::new(),
            tasks: TaskStore::new(),
            current_month: today.first_of_month(),
            selected_date: today,
            has_initial_greeting: false,
        }
    }

    /// Drops everything and starts over.
    pub fn reset(&mut self, today: Date) {
        info!("Resetting session");
        *self = Self::new(today);
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    pub fn analysis(&self) -> Option<&ProfileAnalysis> {
        self.analysis.as_ref()
    }

    pub fn is_onboarded(&self) -> bool {
        self.profile.is_some() && self.analysis.is_some()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn chat_history(&self) -> &[QaPair] {
        &self.chat_history
    }

    pub fn roadmap(&self) -> Option<&str> {
        self.roadmap.as_deref()
    }

    pub fn roadmap_items(&self) -> &[RoadmapItem] {
        &self.roadmap_items
    }

    pub fn weekly_plan(&self) -> Option<&WeeklyPlan> {
        self.weekly_plan.as_ref()
    }

    pub fn current_concern(&self) -> Option<&str> {
        self.current_concern.as_deref()
    }

    pub fn previous_concerns(&self) -> &[Concern] {
        &self.previous_concerns
    }

    pub fn tasks(&self) -> &TaskStore {
        &self.tasks
    }

    pub fn current_month(&self) -> Date {
        self.current_month
    }

    pub fn selected_date(&self) -> Date {
        self.selected_date
    }

    fn require_profile(&self) -> Result<UserProfile> {
        self.profile.clone().ok_or_else(|| {
            CoachError::invalid_input("profile").with_reason("onboarding has not been completed")
        })
    }

    /// Stores the profile, runs the analysis and the initial roadmap, and
    /// greets the user.
    ///
    /// # Errors
    ///
    /// Returns `CoachError::InvalidInput` for an empty name or a birth date
    /// outside 1920-01-01..=today.
    pub async fn onboard(
        &mut self,
        coach: &Coach,
        name: &str,
        birthdate: Date,
        birth_hour: BirthHour,
        today: Date,
    ) -> Result<&ProfileAnalysis> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CoachError::invalid_input("name").with_reason("이름을 입력해주세요."));
        }
        if birthdate < MIN_BIRTHDATE || birthdate > today {
            return Err(CoachError::invalid_input("birthdate")
                .with_reason(format!("must be between {MIN_BIRTHDATE} and {today}")));
        }

        info!("Onboarding {name}");
        let profile = UserProfile {
            name: name.to_string(),
            birthdate,
            birth_hour,
        };

        let analysis = coach.analyze_profile(name, birthdate, birth_hour).await;
        self.roadmap = Some(coach.generate_insight(&profile, None).await);
        self.profile = Some(profile);

        if !self.has_initial_greeting {
            self.messages.push(ChatMessage::assistant(format!(
                "안녕하세요 {name}님! 당신을 위한 AI 코치입니다. 어떤 고민이 있으신가요?"
            )));
            self.has_initial_greeting = true;
        }

        Ok(self.analysis.insert(analysis))
    }

    /// Sends a free-form question and records the exchange.
    pub async fn ask(&mut self, coach: &Coach, question: &str) -> Result<String> {
        let question = question.trim();
        if question.is_empty() {
            return Err(CoachError::invalid_input("question").with_reason("question must not be empty"));
        }
        let answer = self.exchange(coach, question).await?;
        self.chat_history.push(QaPair {
            question: question.to_string(),
            answer: answer.clone(),
        });
        Ok(answer)
    }

    /// Sends one of the canned questions. Quick questions are part of the
    /// conversation but not of the saved question history.
    pub async fn ask_quick(&mut self, coach: &Coach, topic: QuickQuestion) -> Result<String> {
        self.exchange(coach, topic.question()).await
    }

    async fn exchange(&mut self, coach: &Coach, question: &str) -> Result<String> {
        let profile = self.require_profile()?;
        self.messages.push(ChatMessage::user(question));
        let answer = coach.generate_insight(&profile, Some(question)).await;
        self.messages.push(ChatMessage::assistant(answer.clone()));
        Ok(answer)
    }

    /// Whether the conversation ends in an answer to a user message, which
    /// is when a plan can be generated from it.
    pub fn can_plan_from_conversation(&self) -> bool {
        match self.messages.as_slice() {
            [.., question, answer] => {
                question.role == ChatRole::User && answer.role == ChatRole::Assistant
            }
            _ => false,
        }
    }

    /// Summarizes the conversation into a concern and plans for it.
    ///
    /// # Errors
    ///
    /// Returns `CoachError::InvalidInput` before onboarding or when the
    /// conversation does not end in an answered question.
    pub async fn plan_from_conversation(&mut self, coach: &Coach, today: Date) -> Result<PlanOutcome> {
        let profile = self.require_profile()?;
        if !self.can_plan_from_conversation() {
            return Err(CoachError::invalid_input("conversation")
                .with_reason("ask a question first; a plan is built from the latest answer"));
        }

        let concern = coach.summarize_conversation(&self.messages).await;
        let outcome = self.plan_and_register(coach, &profile, concern, today).await;
        if let Some(last) = self.messages.last_mut() {
            last.added_to_roadmap = true;
        }
        Ok(outcome)
    }

    /// Plans for an explicit concern.
    pub async fn plan_for_concern(
        &mut self,
        coach: &Coach,
        concern: &str,
        today: Date,
    ) -> Result<PlanOutcome> {
        let profile = self.require_profile()?;
        let concern = concern.trim();
        if concern.is_empty() {
            return Err(CoachError::invalid_input("concern").with_reason("concern must not be empty"));
        }
        Ok(self
            .plan_and_register(coach, &profile, concern.to_string(), today)
            .await)
    }

    async fn plan_and_register(
        &mut self,
        coach: &Coach,
        profile: &UserProfile,
        concern: String,
        today: Date,
    ) -> PlanOutcome {
        let plan = coach.generate_weekly_plan(profile, &concern).await;

        let mut task_ids = Vec::with_capacity(plan.days.len());
        let mut date = today;
        for day in &plan {
            task_ids.push(self.tasks.add_task(date, NewTask::from(day)));
            date = date.saturating_add(1.day());
        }
        debug!("Registered {} plan tasks starting {today}", task_ids.len());

        if !self.previous_concerns.iter().any(|c| c.concern == concern) {
            self.previous_concerns.push(Concern {
                concern: concern.clone(),
                created_at: today,
            });
        }
        self.current_concern = Some(concern.clone());
        self.weekly_plan = Some(plan.clone());

        PlanOutcome {
            concern,
            plan,
            task_ids,
        }
    }

    /// Adds a manual task on `date`, or on the selected date.
    ///
    /// # Errors
    ///
    /// Returns `CoachError::InvalidInput` for an empty title.
    pub fn add_task(&mut self, date: Option<Date>, title: &str, description: &str) -> Result<String> {
        let title = title.trim();
        if title.is_empty() {
            return Err(CoachError::invalid_input("title").with_reason("task title must not be empty"));
        }
        let date = date.unwrap_or(self.selected_date);
        Ok(self.tasks.add_task(date, NewTask::new(title, description.trim())))
    }

    /// Flips a task's completion flag; unknown ids report `false`.
    pub fn toggle_task(&mut self, task_id: &str) -> bool {
        self.tasks.toggle_completion(task_id.trim())
    }

    pub fn tasks_on(&self, date: Date) -> &[TaskRecord] {
        self.tasks.get_tasks(date)
    }

    pub fn stats(&self) -> Stats {
        self.tasks.get_stats(self.roadmap_items.len())
    }

    pub fn prev_month(&mut self) -> Result<Date> {
        self.current_month = calendar::prev_month(self.current_month)?;
        Ok(self.current_month)
    }

    pub fn next_month(&mut self) -> Result<Date> {
        self.current_month = calendar::next_month(self.current_month)?;
        Ok(self.current_month)
    }

    /// Jumps the calendar to the month of `year`-`month`.
    pub fn show_month(&mut self, year: i16, month: i8) -> Result<Date> {
        self.current_month = calendar::month_calendar(year, month)?.first_day()?;
        Ok(self.current_month)
    }

    /// Selects `date` and moves the calendar to its month.
    pub fn select_date(&mut self, date: Date) {
        self.selected_date = date;
        self.current_month = date.first_of_month();
    }

    /// Saves an answered question on the roadmap. `index` is 1-based into
    /// the question history; `None` saves the latest one.
    ///
    /// # Errors
    ///
    /// Returns `CoachError::InvalidInput` when there is no such entry.
    pub fn save_roadmap_item(&mut self, index: Option<usize>, today: Date) -> Result<&RoadmapItem> {
        let position = match index {
            Some(0) => None,
            Some(n) => Some(n - 1),
            None => self.chat_history.len().checked_sub(1),
        };
        let pair = position
            .and_then(|i| self.chat_history.get(i))
            .ok_or_else(|| {
                CoachError::invalid_input("index").with_reason(format!(
                    "no question #{} in a history of {}",
                    index.unwrap_or(self.chat_history.len()),
                    self.chat_history.len()
                ))
            })?;

        self.roadmap_items.push(RoadmapItem {
            question: pair.question.clone(),
            answer: pair.answer.clone(),
            date_added: today,
        });
        Ok(&self.roadmap_items[self.roadmap_items.len() - 1])
    }

    /// Removes the roadmap item at 1-based `index`.
    pub fn remove_roadmap_item(&mut self, index: usize) -> Result<RoadmapItem> {
        if index == 0 || index > self.roadmap_items.len() {
            return Err(CoachError::invalid_input("index").with_reason(format!(
                "no roadmap item #{index} among {}",
                self.roadmap_items.len()
            )));
        }
        Ok(self.roadmap_items.remove(index - 1))
    }

    /// Removes every roadmap item and returns how many there were.
    pub fn clear_roadmap_items(&mut self) -> usize {
        let removed = self.roadmap_items.len();
        self.roadmap_items.clear();
        removed
    }

    /// Regenerates the roadmap insight text.
    pub async fn regenerate_roadmap(&mut self, coach: &Coach) -> Result<&str> {
        let profile = self.require_profile()?;
        let roadmap = coach.generate_insight(&profile, None).await;
        Ok(self.roadmap.insert(roadmap).as_str())
    }

    /// Builds the roadmap tab for the current month and selection.
    pub fn view(&self, today: Date) -> Result<RoadmapView> {
        let year = self.current_month.year();
        let month = self.current_month.month();
        Ok(RoadmapView {
            stats: self.stats(),
            grid: calendar::month_calendar(year, month)?,
            days_with_tasks: self.tasks.dates_with_tasks(year, month),
            today,
            selected_date: self.selected_date,
            selected_tasks: self.tasks.get_tasks(self.selected_date).to_vec(),
            cards: self
                .roadmap_items
                .iter()
                .enumerate()
                .map(|(index, item)| RoadmapCard::from_item(index, item, today))
                .collect(),
        })
    }

    /// Markdown report of the profile, the analysis, the current plan and
    /// the statistics.
    pub fn report(&self) -> Result<ProfileReport<'_>> {
        let profile = self.profile.as_ref().ok_or_else(|| {
            CoachError::invalid_input("profile").with_reason("onboarding has not been completed")
        })?;
        Ok(ProfileReport {
            profile,
            analysis: self.analysis.as_ref(),
            plan: self.weekly_plan.as_ref(),
            concern: self.current_concern.as_deref(),
            stats: self.stats(),
        })
    }

    /// Writes the report to `path`, or to
    /// `$XDG_DATA_HOME/saju-coach/report-YYYYMMDD.md`, and returns the path.
    ///
    /// # Errors
    ///
    /// Returns `CoachError::InvalidInput` before onboarding,
    /// `CoachError::XdgDirectory` if no default location is available and
    /// `CoachError::FileSystem` if the file cannot be written.
    pub fn export_report(&self, path: Option<&Path>, today: Date) -> Result<PathBuf> {
        let report = self.report()?.to_string();
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => default_report_path(today)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| CoachError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        fs::write(&path, report).map_err(|e| CoachError::FileSystem {
            path: path.clone(),
            source: e,
        })?;

        info!("Exported report to {}", path.display());
        Ok(path)
    }
}

/// Default report location following the XDG Base Directory specification.
pub fn default_report_path(today: Date) -> Result<PathBuf> {
    let file_name = format!("report-{}.md", today.strftime("%Y%m%d"));
    xdg::BaseDirectories::with_prefix("saju-coach")
        .place_data_file(file_name)
        .map_err(|e| CoachError::XdgDirectory(e.to_string()))
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    #[test]
    fn test_new_session_starts_on_today() {
        let session = Session::new(date(2025, 6, 18));
        assert_eq!(session.current_month(), date(2025, 6, 1));
        assert_eq!(session.selected_date(), date(2025, 6, 18));
        assert!(!session.is_onboarded());
        assert!(session.messages().is_empty());
    }

    #[test]
    fn test_add_task_defaults_to_selected_date() {
        let mut session = Session::new(date(2025, 6, 18));
        session.select_date(date(2025, 7, 2));

        let id = session.add_task(None, " 일기 쓰기 ", "").unwrap();
        assert_eq!(id, "2025-07-02_0");
        assert_eq!(session.current_month(), date(2025, 7, 1));
        assert_eq!(session.tasks_on(date(2025, 7, 2))[0].title, "일기 쓰기");
    }

    #[test]
    fn test_add_task_rejects_empty_title() {
        let mut session = Session::new(date(2025, 6, 18));
        assert!(matches!(
            session.add_task(None, "   ", "desc"),
            Err(CoachError::InvalidInput { .. })
        ));
        assert!(session.tasks().is_empty());
    }

    #[test]
    fn test_month_navigation() {
        let mut session = Session::new(date(2025, 1, 10));
        assert_eq!(session.prev_month().unwrap(), date(2024, 12, 1));
        assert_eq!(session.next_month().unwrap(), date(2025, 1, 1));
        assert_eq!(session.next_month().unwrap(), date(2025, 2, 1));
        assert_eq!(session.show_month(2030, 4).unwrap(), date(2030, 4, 1));
        assert!(session.show_month(2030, 13).is_err());
    }

    #[test]
    fn test_view_marks_days() {
        let today = date(2025, 6, 18);
        let mut session = Session::new(today);
        session.add_task(Some(date(2025, 6, 20)), "a", "").unwrap();
        session.add_task(Some(date(2025, 7, 1)), "b", "").unwrap();

        let view = session.view(today).unwrap();
        assert_eq!(view.days_with_tasks, vec![20]);
        assert!(view.is_today(18));
        assert!(view.is_selected(18));
        assert!(view.has_tasks(20));
        assert!(view.selected_tasks.is_empty());
        assert_eq!(view.stats.total_tasks, 2);
    }

    #[test]
    fn test_roadmap_items_require_history() {
        let mut session = Session::new(date(2025, 6, 18));
        assert!(session.save_roadmap_item(None, date(2025, 6, 18)).is_err());
        assert!(session.remove_roadmap_item(1).is_err());
        assert_eq!(session.clear_roadmap_items(), 0);
    }

    #[test]
    fn test_conversation_planning_requires_answered_question() {
        let mut session = Session::new(date(2025, 6, 18));
        assert!(!session.can_plan_from_conversation());

        session.messages.push(ChatMessage::assistant("안녕하세요"));
        assert!(!session.can_plan_from_conversation());

        session.messages.push(ChatMessage::user("질문"));
        assert!(!session.can_plan_from_conversation());

        session.messages.push(ChatMessage::assistant("답변"));
        assert!(session.can_plan_from_conversation());
    }

    #[test]
    fn test_report_requires_profile() {
        let session = Session::new(date(2025, 6, 18));
        assert!(matches!(session.report(), Err(CoachError::InvalidInput { .. })));
    }
}
