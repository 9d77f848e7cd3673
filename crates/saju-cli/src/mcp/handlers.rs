//! MCP tool handlers implementation

use std::sync::Arc;

use log::debug;
use rmcp::{
    ErrorData,
    handler::server::tool::Parameters,
    model::{CallToolResult, Content},
};
use saju_core::{
    Coach, Session,
    display::{OperationStatus, Tasks, Transcript},
    extract_weekly_plan,
    params::{self as core, MonthStep},
    session::truncate_chars,
};
use schemars::JsonSchema;
use serde::Deserialize;
use tokio::sync::Mutex;

use super::errors::to_mcp_error;
use crate::cli::today;

// ============================================================================
// Generic Parameter Wrapper
// ============================================================================
//
// Core parameter types are wrapped in a transparent serde container so the
// MCP layer can attach the derives it needs without the core depending on
// rmcp. Deserialization and schema generation pass straight through.

/// Generic MCP wrapper for core parameter types
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct McpParams<T>(T)
where
    T: JsonSchema;

impl<T> JsonSchema for McpParams<T>
where
    T: JsonSchema,
{
    fn schema_name() -> std::borrow::Cow<'static, str> {
        T::schema_name()
    }

    fn json_schema(g: &mut schemars::SchemaGenerator) -> schemars::Schema {
        T::json_schema(g)
    }
}

impl<T> AsRef<T> for McpParams<T>
where
    T: JsonSchema,
{
    fn as_ref(&self) -> &T {
        &self.0
    }
}

pub type ExtractPlan = McpParams<core::ExtractPlan>;
pub type Onboard = McpParams<core::Onboard>;
pub type Ask = McpParams<core::Ask>;
pub type QuickAsk = McpParams<core::QuickAsk>;
pub type PlanForConcern = McpParams<core::PlanForConcern>;
pub type AddTask = McpParams<core::AddTask>;
pub type TaskId = McpParams<core::TaskId>;
pub type DateQuery = McpParams<core::DateQuery>;
pub type MonthQuery = McpParams<core::MonthQuery>;
pub type NavigateMonth = McpParams<core::NavigateMonth>;
pub type SaveRoadmapItem = McpParams<core::SaveRoadmapItem>;
pub type RoadmapIndex = McpParams<core::RoadmapIndex>;
pub type ExportReport = McpParams<core::ExportReport>;

pub type McpResult = Result<CallToolResult, ErrorData>;

fn markdown(text: impl ToString) -> McpResult {
    Ok(CallToolResult::success(vec![Content::text(text.to_string())]))
}

/// Handler implementations for the MCP server
pub struct McpHandlers {
    coach: Coach,
    session: Arc<Mutex<Session>>,
}

impl McpHandlers {
    pub fn new(coach: Coach, session: Arc<Mutex<Session>>) -> Self {
        Self { coach, session }
    }

    pub async fn extract_plan(&self, Parameters(params): Parameters<ExtractPlan>) -> McpResult {
        debug!("extract_plan: {} bytes", params.as_ref().text.len());
        markdown(extract_weekly_plan(&params.as_ref().text))
    }

    pub async fn onboard(&self, Parameters(params): Parameters<Onboard>) -> McpResult {
        debug!("onboard: {:?}", params);

        let profile = params
            .as_ref()
            .profile()
            .map_err(|e| to_mcp_error("Invalid profile", &e))?;

        let mut session = self.session.lock().await;
        let analysis = session
            .onboard(
                &self.coach,
                &profile.name,
                profile.birthdate,
                profile.birth_hour,
                today(),
            )
            .await
            .map_err(|e| to_mcp_error("Failed to onboard", &e))?
            .clone();

        let mut output = format!("## {}님의 사주 분석\n\n{analysis}\n", profile.name);
        if let Some(roadmap) = session.roadmap() {
            output.push_str(&format!("## 성장 로드맵\n\n{}\n\n", roadmap.trim_end()));
        }
        if let Some(greeting) = session.messages().last() {
            output.push_str(&greeting.to_string());
        }
        markdown(output)
    }

    pub async fn ask(&self, Parameters(params): Parameters<Ask>) -> McpResult {
        debug!("ask: {:?}", params);

        let answer = self
            .session
            .lock()
            .await
            .ask(&self.coach, &params.as_ref().question)
            .await
            .map_err(|e| to_mcp_error("Failed to ask", &e))?;
        markdown(answer)
    }

    pub async fn quick_ask(&self, Parameters(params): Parameters<QuickAsk>) -> McpResult {
        debug!("quick_ask: {:?}", params);

        let topic = params
            .as_ref()
            .topic()
            .map_err(|e| to_mcp_error("Invalid topic", &e))?;
        let answer = self
            .session
            .lock()
            .await
            .ask_quick(&self.coach, topic)
            .await
            .map_err(|e| to_mcp_error("Failed to ask", &e))?;
        markdown(answer)
    }

    pub async fn plan_from_conversation(&self) -> McpResult {
        debug!("plan_from_conversation");

        let outcome = self
            .session
            .lock()
            .await
            .plan_from_conversation(&self.coach, today())
            .await
            .map_err(|e| to_mcp_error("Failed to create plan", &e))?;
        markdown(format!(
            "## 7일 실천 계획\n\n고민: {}\n\n{}\n{}",
            outcome.concern,
            outcome.plan,
            OperationStatus::success(format!("Added tasks {}", outcome.task_ids.join(", ")))
        ))
    }

    pub async fn plan_for_concern(&self, Parameters(params): Parameters<PlanForConcern>) -> McpResult {
        debug!("plan_for_concern: {:?}", params);

        let outcome = self
            .session
            .lock()
            .await
            .plan_for_concern(&self.coach, &params.as_ref().concern, today())
            .await
            .map_err(|e| to_mcp_error("Failed to create plan", &e))?;
        markdown(format!(
            "## 7일 실천 계획\n\n고민: {}\n\n{}\n{}",
            outcome.concern,
            outcome.plan,
            OperationStatus::success(format!("Added tasks {}", outcome.task_ids.join(", ")))
        ))
    }

    pub async fn add_task(&self, Parameters(params): Parameters<AddTask>) -> McpResult {
        debug!("add_task: {:?}", params);

        let params = params.as_ref();
        let date = params
            .date()
            .map_err(|e| to_mcp_error("Invalid date", &e))?;
        let id = self
            .session
            .lock()
            .await
            .add_task(
                date,
                &params.title,
                params.description.as_deref().unwrap_or_default(),
            )
            .map_err(|e| to_mcp_error("Failed to add task", &e))?;
        markdown(OperationStatus::success(format!("Added task {id}")))
    }

    pub async fn toggle_task(&self, Parameters(params): Parameters<TaskId>) -> McpResult {
        debug!("toggle_task: {:?}", params);

        let id = params.as_ref().id.trim();
        let mut session = self.session.lock().await;
        let status = if session.tasks().task(id).is_none() {
            OperationStatus::notice(format!("No task with id {id}"))
        } else if session.toggle_task(id) {
            OperationStatus::success(format!("Completed task {id}"))
        } else {
            OperationStatus::success(format!("Reopened task {id}"))
        };
        markdown(status)
    }

    pub async fn list_tasks(&self, Parameters(params): Parameters<DateQuery>) -> McpResult {
        debug!("list_tasks: {:?}", params);

        let date = params
            .as_ref()
            .date()
            .map_err(|e| to_mcp_error("Invalid date", &e))?;
        let session = self.session.lock().await;
        let date = date.unwrap_or_else(|| session.selected_date());
        markdown(format!("### {date}\n\n{}", Tasks::from(session.tasks_on(date))))
    }

    pub async fn get_stats(&self) -> McpResult {
        markdown(self.session.lock().await.stats())
    }

    pub async fn show_calendar(&self, Parameters(params): Parameters<MonthQuery>) -> McpResult {
        debug!("show_calendar: {:?}", params);

        let query = params.as_ref();
        let mut session = self.session.lock().await;
        if query.year.is_some() || query.month.is_some() {
            let (year, month) = query.resolve(session.current_month());
            session
                .show_month(year, month)
                .map_err(|e| to_mcp_error("Failed to show month", &e))?;
        }
        let view = session
            .view(today())
            .map_err(|e| to_mcp_error("Failed to build view", &e))?;
        markdown(view)
    }

    pub async fn navigate_month(&self, Parameters(params): Parameters<NavigateMonth>) -> McpResult {
        debug!("navigate_month: {:?}", params);

        let mut session = self.session.lock().await;
        let moved = match params.as_ref().direction {
            MonthStep::Prev => session.prev_month(),
            MonthStep::Next => session.next_month(),
        };
        moved.map_err(|e| to_mcp_error("Failed to change month", &e))?;
        let view = session
            .view(today())
            .map_err(|e| to_mcp_error("Failed to build view", &e))?;
        markdown(view)
    }

    pub async fn select_date(&self, Parameters(params): Parameters<DateQuery>) -> McpResult {
        debug!("select_date: {:?}", params);

        let date = params
            .as_ref()
            .date()
            .map_err(|e| to_mcp_error("Invalid date", &e))?
            .unwrap_or_else(today);
        let mut session = self.session.lock().await;
        session.select_date(date);
        let view = session
            .view(today())
            .map_err(|e| to_mcp_error("Failed to build view", &e))?;
        markdown(view)
    }

    pub async fn save_roadmap_item(&self, Parameters(params): Parameters<SaveRoadmapItem>) -> McpResult {
        debug!("save_roadmap_item: {:?}", params);

        let mut session = self.session.lock().await;
        let item = session
            .save_roadmap_item(params.as_ref().index, today())
            .map_err(|e| to_mcp_error("Failed to save roadmap item", &e))?;
        markdown(OperationStatus::success(format!(
            "Saved '{}' to the roadmap",
            truncate_chars(&item.question, 30)
        )))
    }

    pub async fn remove_roadmap_item(&self, Parameters(params): Parameters<RoadmapIndex>) -> McpResult {
        debug!("remove_roadmap_item: {:?}", params);

        let item = self
            .session
            .lock()
            .await
            .remove_roadmap_item(params.as_ref().index)
            .map_err(|e| to_mcp_error("Failed to remove roadmap item", &e))?;
        markdown(OperationStatus::success(format!(
            "Removed '{}' from the roadmap",
            truncate_chars(&item.question, 30)
        )))
    }

    pub async fn clear_roadmap_items(&self) -> McpResult {
        let removed = self.session.lock().await.clear_roadmap_items();
        markdown(OperationStatus::success(format!(
            "Removed {removed} roadmap item(s)"
        )))
    }

    pub async fn regenerate_roadmap(&self) -> McpResult {
        let mut session = self.session.lock().await;
        let roadmap = session
            .regenerate_roadmap(&self.coach)
            .await
            .map_err(|e| to_mcp_error("Failed to regenerate roadmap", &e))?;
        markdown(format!("## 성장 로드맵\n\n{}\n", roadmap.trim_end()))
    }

    pub async fn show_roadmap(&self) -> McpResult {
        let session = self.session.lock().await;
        let view = session
            .view(today())
            .map_err(|e| to_mcp_error("Failed to build view", &e))?;
        let roadmap = session
            .roadmap()
            .map(|r| format!("## 성장 로드맵\n\n{}\n\n", r.trim_end()))
            .unwrap_or_default();
        markdown(format!("{roadmap}{view}"))
    }

    pub async fn show_conversation(&self) -> McpResult {
        let session = self.session.lock().await;
        markdown(Transcript(session.messages()))
    }

    pub async fn show_report(&self) -> McpResult {
        let session = self.session.lock().await;
        let report = session
            .report()
            .map_err(|e| to_mcp_error("Failed to build report", &e))?;
        markdown(report)
    }

    pub async fn export_report(&self, Parameters(params): Parameters<ExportReport>) -> McpResult {
        debug!("export_report: {:?}", params);

        let path = params.as_ref().path();
        let written = self
            .session
            .lock()
            .await
            .export_report(path.as_deref(), today())
            .map_err(|e| to_mcp_error("Failed to export report", &e))?;
        markdown(OperationStatus::success(format!(
            "Report written to {}",
            written.display()
        )))
    }
}
