//! Interactive shell over one coaching session.
//!
//! Each input line is parsed into a [`ReplCommand`] and applied to the
//! in-memory [`Session`]. Commands that change tasks, the calendar or the
//! roadmap print the refreshed roadmap view afterwards. Errors are reported
//! and the shell keeps running; `quit` or end of input ends the session.

use std::{io::Write, path::PathBuf, str::FromStr};

use anyhow::{Context, Result};
use jiff::civil::Date;
use log::{debug, info};
use saju_core::{
    Coach, QuickQuestion, Session,
    calendar::parse_date,
    display::{Concerns, KoreanDate, OperationStatus, Tasks, Transcript},
    params::{AddTask, MonthQuery, Onboard, QuickAsk},
    session::truncate_chars,
};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::{cli::today, renderer::TerminalRenderer};

const PROMPT: &str = "saju> ";

const HELP: &str = "\
## 명령어

| 명령 | 설명 |
|---|---|
| `onboard <이름> <YYYY-MM-DD> [시간]` | 프로필 등록 및 사주 분석 |
| `ask <질문>` | 코치에게 질문 |
| `quick <career/relationships/growth/stress>` | 빠른 질문 |
| `plan` | 대화 내용으로 7일 계획 만들기 |
| `concern <고민>` | 고민을 직접 입력해 7일 계획 만들기 |
| `add [YYYY-MM-DD] <제목> [-- 설명]` | 태스크 추가 |
| `tasks [YYYY-MM-DD]` | 날짜별 태스크 |
| `toggle <id>` | 태스크 완료 표시/해제 |
| `stats` | 실천 현황 |
| `calendar [연 월]` | 달력 보기 |
| `prev` / `next` | 이전 달 / 다음 달 |
| `select <YYYY-MM-DD>` | 날짜 선택 |
| `save [번호]` | 질문과 답변을 로드맵에 저장 |
| `unsave <번호>` | 저장한 계획 삭제 |
| `clear-saved` | 저장한 계획 모두 삭제 |
| `roadmap` | 성장 로드맵 보기 |
| `regenerate` | 성장 로드맵 다시 만들기 |
| `export [경로]` | 리포트 저장 |
| `history` / `concerns` | 대화 기록 / 이전 고민 |
| `reset` | 처음으로 |
| `help` / `quit` | 도움말 / 종료 |
";

/// One line of shell input
#[derive(Debug, Clone)]
pub enum ReplCommand {
    Onboard(Onboard),
    Ask(String),
    Quick(QuickQuestion),
    Plan,
    Concern(String),
    AddTask(AddTask),
    Tasks(Option<Date>),
    Toggle(String),
    Stats,
    Calendar(MonthQuery),
    Prev,
    Next,
    Select(Date),
    Save(Option<usize>),
    Unsave(usize),
    ClearSaved,
    Roadmap,
    Regenerate,
    Export(Option<PathBuf>),
    History,
    Concerns,
    Reset,
    Help,
    Quit,
}

fn required<'a>(command: &str, rest: &'a str, what: &str) -> Result<&'a str, String> {
    if rest.is_empty() {
        Err(format!("'{command}' needs {what}"))
    } else {
        Ok(rest)
    }
}

fn parse_index(raw: &str) -> Result<usize, String> {
    raw.parse()
        .map_err(|_| format!("'{raw}' is not a number"))
}

fn parse_add(rest: &str) -> Result<AddTask, String> {
    let (head, description) = match rest.split_once(" -- ") {
        Some((head, description)) => (head.trim(), Some(description.trim().to_string())),
        None => (rest, None),
    };
    // a lone date is a date without a title, not a title
    let (date, title) = match head.split_once(char::is_whitespace) {
        Some((first, title)) if parse_date(first).is_ok() => (Some(first.to_string()), title.trim()),
        None if parse_date(head).is_ok() => (Some(head.to_string()), ""),
        _ => (None, head),
    };
    Ok(AddTask {
        date,
        title: required("add", title, "a title")?.to_string(),
        description,
    })
}

fn parse_onboard(rest: &str) -> Result<Onboard, String> {
    let parts: Vec<&str> = rest.split_whitespace().collect();
    match parts.as_slice() {
        [name, birthdate] => Ok(Onboard {
            name: (*name).to_string(),
            birthdate: (*birthdate).to_string(),
            birth_hour: None,
        }),
        [name, birthdate, hour] => Ok(Onboard {
            name: (*name).to_string(),
            birthdate: (*birthdate).to_string(),
            birth_hour: Some((*hour).to_string()),
        }),
        _ => Err("usage: onboard <name> <YYYY-MM-DD> [hour]".to_string()),
    }
}

fn parse_month(rest: &str) -> Result<MonthQuery, String> {
    let parts: Vec<&str> = rest.split_whitespace().collect();
    let number = |raw: &str| format!("'{raw}' is not a number");
    match parts.as_slice() {
        [] => Ok(MonthQuery::default()),
        [year, month] => Ok(MonthQuery {
            year: Some(year.parse().map_err(|_| number(*year))?),
            month: Some(month.parse().map_err(|_| number(*month))?),
        }),
        _ => Err("usage: calendar [YEAR MONTH]".to_string()),
    }
}

impl FromStr for ReplCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (command, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(c, r)| (c, r.trim()));

        let parsed = match command.to_lowercase().as_str() {
            "onboard" => ReplCommand::Onboard(parse_onboard(rest)?),
            "ask" => ReplCommand::Ask(required(command, rest, "a question")?.to_string()),
            "quick" => {
                let ask = QuickAsk {
                    topic: required(command, rest, "a topic")?.to_string(),
                };
                ReplCommand::Quick(ask.topic().map_err(|e| e.to_string())?)
            }
            "plan" => ReplCommand::Plan,
            "concern" => ReplCommand::Concern(required(command, rest, "a concern")?.to_string()),
            "add" => ReplCommand::AddTask(parse_add(rest)?),
            "tasks" if rest.is_empty() => ReplCommand::Tasks(None),
            "tasks" => ReplCommand::Tasks(Some(parse_date(rest).map_err(|e| e.to_string())?)),
            "toggle" => ReplCommand::Toggle(required(command, rest, "a task id")?.to_string()),
            "stats" => ReplCommand::Stats,
            "calendar" | "cal" => ReplCommand::Calendar(parse_month(rest)?),
            "prev" => ReplCommand::Prev,
            "next" => ReplCommand::Next,
            "select" => {
                let raw = required(command, rest, "a date")?;
                ReplCommand::Select(parse_date(raw).map_err(|e| e.to_string())?)
            }
            "save" if rest.is_empty() => ReplCommand::Save(None),
            "save" => ReplCommand::Save(Some(parse_index(rest)?)),
            "unsave" => ReplCommand::Unsave(parse_index(required(command, rest, "a number")?)?),
            "clear-saved" => ReplCommand::ClearSaved,
            "roadmap" => ReplCommand::Roadmap,
            "regenerate" => ReplCommand::Regenerate,
            "export" if rest.is_empty() => ReplCommand::Export(None),
            "export" => ReplCommand::Export(Some(PathBuf::from(rest))),
            "history" => ReplCommand::History,
            "concerns" => ReplCommand::Concerns,
            "reset" => ReplCommand::Reset,
            "help" | "?" => ReplCommand::Help,
            "quit" | "exit" | "q" => ReplCommand::Quit,
            _ => return Err(format!("Unknown command '{command}'; type 'help'")),
        };
        Ok(parsed)
    }
}

/// The interactive shell
pub struct Repl {
    coach: Coach,
    session: Session,
    renderer: TerminalRenderer,
}

impl Repl {
    pub fn new(coach: Coach, renderer: TerminalRenderer) -> Self {
        Self {
            coach,
            session: Session::new(today()),
            renderer,
        }
    }

    /// Reads commands from stdin until `quit` or end of input.
    pub async fn run(mut self) -> Result<()> {
        self.renderer.render(
            "# 사주 코치\n\n`onboard <이름> <YYYY-MM-DD> [시간]`으로 시작하세요. 명령어 목록은 `help`.\n",
        )?;

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            if self.renderer.is_rich() {
                print!("{PROMPT}");
                std::io::stdout().flush()?;
            }

            let Some(line) = lines.next_line().await.context("Failed to read input")? else {
                break;
            };
            if line.trim().is_empty() {
                continue;
            }

            let command = match line.parse::<ReplCommand>() {
                Ok(command) => command,
                Err(message) => {
                    self.renderer.show(&OperationStatus::failure(message))?;
                    continue;
                }
            };
            debug!("repl command: {command:?}");
            if matches!(command, ReplCommand::Quit) {
                break;
            }
            if let Err(e) = self.execute(command).await {
                self.renderer
                    .show(&OperationStatus::failure(format!("{e:#}")))?;
            }
        }

        info!("Session ended");
        Ok(())
    }

    fn show_view(&self) -> Result<()> {
        self.renderer.show(&self.session.view(today())?)
    }

    fn show_last_message(&self) -> Result<()> {
        if let Some(message) = self.session.messages().last() {
            self.renderer.show(message)?;
        }
        Ok(())
    }

    async fn execute(&mut self, command: ReplCommand) -> Result<()> {
        match command {
            ReplCommand::Onboard(params) => {
                let profile = params.profile()?;
                let analysis = self
                    .session
                    .onboard(
                        &self.coach,
                        &profile.name,
                        profile.birthdate,
                        profile.birth_hour,
                        today(),
                    )
                    .await?
                    .clone();
                self.renderer
                    .render(&format!("## {}님의 사주 분석\n\n{analysis}\n", profile.name))?;
                self.show_roadmap()?;
                self.show_last_message()
            }
            ReplCommand::Ask(question) => {
                self.session.ask(&self.coach, &question).await?;
                self.show_last_message()
            }
            ReplCommand::Quick(topic) => {
                self.session.ask_quick(&self.coach, topic).await?;
                self.show_last_message()
            }
            ReplCommand::Plan => {
                let outcome = self
                    .session
                    .plan_from_conversation(&self.coach, today())
                    .await?;
                self.show_plan(&outcome.concern, outcome.task_ids.len())
            }
            ReplCommand::Concern(concern) => {
                let outcome = self
                    .session
                    .plan_for_concern(&self.coach, &concern, today())
                    .await?;
                self.show_plan(&outcome.concern, outcome.task_ids.len())
            }
            ReplCommand::AddTask(params) => {
                let id = self.session.add_task(
                    params.date()?,
                    &params.title,
                    params.description.as_deref().unwrap_or_default(),
                )?;
                self.renderer
                    .show(&OperationStatus::success(format!("Added task {id}")))?;
                self.show_view()
            }
            ReplCommand::Tasks(date) => {
                let date = date.unwrap_or_else(|| self.session.selected_date());
                self.renderer.render(&format!(
                    "### {} 일정\n\n{}",
                    KoreanDate(date),
                    Tasks::from(self.session.tasks_on(date))
                ))
            }
            ReplCommand::Toggle(id) => {
                let status = if self.session.tasks().task(&id).is_none() {
                    OperationStatus::notice(format!("No task with id {id}"))
                } else if self.session.toggle_task(&id) {
                    OperationStatus::success(format!("Completed task {id}"))
                } else {
                    OperationStatus::success(format!("Reopened task {id}"))
                };
                self.renderer.show(&status)?;
                self.show_view()
            }
            ReplCommand::Stats => self.renderer.show(&self.session.stats()),
            ReplCommand::Calendar(query) => {
                if query.year.is_some() || query.month.is_some() {
                    let (year, month) = query.resolve(self.session.current_month());
                    self.session.show_month(year, month)?;
                }
                self.show_view()
            }
            ReplCommand::Prev => {
                self.session.prev_month()?;
                self.show_view()
            }
            ReplCommand::Next => {
                self.session.next_month()?;
                self.show_view()
            }
            ReplCommand::Select(date) => {
                self.session.select_date(date);
                self.show_view()
            }
            ReplCommand::Save(index) => {
                let item = self.session.save_roadmap_item(index, today())?;
                let message = format!("Saved '{}' to the roadmap", truncate_chars(&item.question, 30));
                self.renderer.show(&OperationStatus::success(message))?;
                self.show_view()
            }
            ReplCommand::Unsave(index) => {
                let item = self.session.remove_roadmap_item(index)?;
                self.renderer.show(&OperationStatus::success(format!(
                    "Removed '{}' from the roadmap",
                    truncate_chars(&item.question, 30)
                )))?;
                self.show_view()
            }
            ReplCommand::ClearSaved => {
                let removed = self.session.clear_roadmap_items();
                self.renderer.show(&OperationStatus::success(format!(
                    "Removed {removed} roadmap item(s)"
                )))?;
                self.show_view()
            }
            ReplCommand::Roadmap => {
                self.show_roadmap()?;
                self.show_view()
            }
            ReplCommand::Regenerate => {
                self.session.regenerate_roadmap(&self.coach).await?;
                self.show_roadmap()
            }
            ReplCommand::Export(path) => {
                let written = self.session.export_report(path.as_deref(), today())?;
                self.renderer.show(&OperationStatus::success(format!(
                    "Report written to {}",
                    written.display()
                )))
            }
            ReplCommand::History => self.renderer.show(&Transcript(self.session.messages())),
            ReplCommand::Concerns => self
                .renderer
                .show(&Concerns(self.session.previous_concerns())),
            ReplCommand::Reset => {
                self.session.reset(today());
                self.renderer
                    .show(&OperationStatus::notice("Session cleared; onboard to start again"))
            }
            ReplCommand::Help => self.renderer.render(HELP),
            ReplCommand::Quit => Ok(()),
        }
    }

    fn show_roadmap(&self) -> Result<()> {
        match self.session.roadmap() {
            Some(roadmap) => self
                .renderer
                .render(&format!("## 성장 로드맵\n\n{}\n\n", roadmap.trim_end())),
            None => self
                .renderer
                .show(&OperationStatus::notice("No roadmap yet; onboard first")),
        }
    }

    fn show_plan(&self, concern: &str, task_count: usize) -> Result<()> {
        if let Some(plan) = self.session.weekly_plan() {
            self.renderer
                .render(&format!("## 7일 실천 계획\n\n고민: {concern}\n\n{plan}\n"))?;
        }
        self.renderer.show(&OperationStatus::success(format!(
            "Added {task_count} tasks starting today"
        )))?;
        self.show_view()
    }
}
