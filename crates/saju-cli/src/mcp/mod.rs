//! MCP server for the saju coach
//!
//! Hosts one coaching session for the lifetime of the stdio connection and
//! exposes its operations as tools. Every tool answers with Markdown.

use std::{future::Future, sync::Arc};

use anyhow::Result;
use log::{debug, error, info};
use rmcp::{
    ServerHandler,
    handler::server::{router::tool::ToolRouter, tool::Parameters},
    model::{Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};
use saju_core::{Coach, Session};
use tokio::{
    signal::unix::{SignalKind, signal},
    sync::Mutex,
};

pub mod errors;
pub mod handlers;

pub use handlers::{
    AddTask, Ask, DateQuery, ExportReport, ExtractPlan, McpResult, MonthQuery, NavigateMonth,
    Onboard, PlanForConcern, QuickAsk, RoadmapIndex, SaveRoadmapItem, TaskId,
};

use crate::cli::today;

/// MCP server holding one session
#[derive(Clone)]
pub struct SajuMcpServer {
    coach: Coach,
    session: Arc<Mutex<Session>>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl SajuMcpServer {
    pub fn new(coach: Coach) -> Self {
        Self {
            coach,
            session: Arc::new(Mutex::new(Session::new(today()))),
            tool_router: Self::tool_router(),
        }
    }

    fn handlers(&self) -> handlers::McpHandlers {
        handlers::McpHandlers::new(self.coach.clone(), self.session.clone())
    }

    #[tool(
        name = "extract_plan",
        description = "Parse free text into a seven-day plan. Lines starting with 'Day <number>:' are taken in order of appearance and the written number is ignored: the first such line becomes day 1, the second day 2, and so on. Each line is split into title and description at the first ' - ', ' -- ' or spaced en/em dash. Lines beyond the seventh are dropped and missing days are filled with placeholders. Does not touch the session."
    )]
    async fn extract_plan(&self, params: Parameters<ExtractPlan>) -> McpResult {
        self.handlers().extract_plan(params).await
    }

    #[tool(
        name = "onboard",
        description = "Start the session: provide name, birthdate (YYYY-MM-DD, between 1920-01-01 and today) and optional birth_hour slot such as '07-09시'. Returns the personality analysis, the growth roadmap and the coach's greeting. Required before asking questions or planning."
    )]
    async fn onboard(&self, params: Parameters<Onboard>) -> McpResult {
        self.handlers().onboard(params).await
    }

    #[tool(
        name = "ask",
        description = "Ask the coach a free-form question. The exchange is added to the conversation and to the question history that roadmap items are saved from."
    )]
    async fn ask(&self, params: Parameters<Ask>) -> McpResult {
        self.handlers().ask(params).await
    }

    #[tool(
        name = "quick_ask",
        description = "Ask one of the canned questions: topic is 'career', 'relationships', 'growth' or 'stress'. Added to the conversation but not to the question history."
    )]
    async fn quick_ask(&self, params: Parameters<QuickAsk>) -> McpResult {
        self.handlers().quick_ask(params).await
    }

    #[tool(
        name = "plan_from_conversation",
        description = "Summarize the conversation into one concern and build a seven-day plan for it. The seven entries are added as tasks starting today. Requires the last exchange to be an answered question."
    )]
    async fn plan_from_conversation(&self) -> McpResult {
        self.handlers().plan_from_conversation().await
    }

    #[tool(
        name = "plan_for_concern",
        description = "Build a seven-day plan for an explicit concern and add its entries as tasks starting today."
    )]
    async fn plan_for_concern(&self, params: Parameters<PlanForConcern>) -> McpResult {
        self.handlers().plan_for_concern(params).await
    }

    #[tool(
        name = "add_task",
        description = "Add a task with a title and optional description on a date (YYYY-MM-DD, defaults to the selected date). Returns the task id 'YYYY-MM-DD_N'."
    )]
    async fn add_task(&self, params: Parameters<AddTask>) -> McpResult {
        self.handlers().add_task(params).await
    }

    #[tool(
        name = "toggle_task",
        description = "Flip a task between completed and open by its id. Completing a task extends the practice streak."
    )]
    async fn toggle_task(&self, params: Parameters<TaskId>) -> McpResult {
        self.handlers().toggle_task(params).await
    }

    #[tool(
        name = "list_tasks",
        description = "List the tasks of a date (YYYY-MM-DD, defaults to the selected date) in insertion order with their ids and completion state."
    )]
    async fn list_tasks(&self, params: Parameters<DateQuery>) -> McpResult {
        self.handlers().list_tasks(params).await
    }

    #[tool(
        name = "get_stats",
        description = "Show ongoing roadmap items, completed and total tasks, and the practice streak."
    )]
    async fn get_stats(&self) -> McpResult {
        self.handlers().get_stats().await
    }

    #[tool(
        name = "show_calendar",
        description = "Show the roadmap view for a month: statistics, a Monday-first calendar marking days with tasks, the selected day's tasks and saved roadmap items. Without year/month the current calendar month is shown."
    )]
    async fn show_calendar(&self, params: Parameters<MonthQuery>) -> McpResult {
        self.handlers().show_calendar(params).await
    }

    #[tool(
        name = "navigate_month",
        description = "Move the calendar one month back ('prev') or forward ('next') and show the view."
    )]
    async fn navigate_month(&self, params: Parameters<NavigateMonth>) -> McpResult {
        self.handlers().navigate_month(params).await
    }

    #[tool(
        name = "select_date",
        description = "Select a date (YYYY-MM-DD, defaults to today); the calendar moves to its month and the view shows its tasks."
    )]
    async fn select_date(&self, params: Parameters<DateQuery>) -> McpResult {
        self.handlers().select_date(params).await
    }

    #[tool(
        name = "save_roadmap_item",
        description = "Save an answered question on the roadmap. index is the 1-based position in the question history; omit it to save the latest."
    )]
    async fn save_roadmap_item(&self, params: Parameters<SaveRoadmapItem>) -> McpResult {
        self.handlers().save_roadmap_item(params).await
    }

    #[tool(
        name = "remove_roadmap_item",
        description = "Remove a saved roadmap item by its 1-based position."
    )]
    async fn remove_roadmap_item(&self, params: Parameters<RoadmapIndex>) -> McpResult {
        self.handlers().remove_roadmap_item(params).await
    }

    #[tool(name = "clear_roadmap_items", description = "Remove every saved roadmap item.")]
    async fn clear_roadmap_items(&self) -> McpResult {
        self.handlers().clear_roadmap_items().await
    }

    #[tool(
        name = "regenerate_roadmap",
        description = "Ask the coach for a fresh 3-month, 6-month and 1-year growth roadmap."
    )]
    async fn regenerate_roadmap(&self) -> McpResult {
        self.handlers().regenerate_roadmap().await
    }

    #[tool(
        name = "show_roadmap",
        description = "Show the growth roadmap text followed by the roadmap view."
    )]
    async fn show_roadmap(&self) -> McpResult {
        self.handlers().show_roadmap().await
    }

    #[tool(name = "show_conversation", description = "Show the conversation so far.")]
    async fn show_conversation(&self) -> McpResult {
        self.handlers().show_conversation().await
    }

    #[tool(
        name = "show_report",
        description = "Show the Markdown report: profile, birth-chart labels, analysis, current plan and statistics."
    )]
    async fn show_report(&self) -> McpResult {
        self.handlers().show_report().await
    }

    #[tool(
        name = "export_report",
        description = "Write the Markdown report to path, or to $XDG_DATA_HOME/saju-coach/report-YYYYMMDD.md when omitted. Returns the written path."
    )]
    async fn export_report(&self, params: Parameters<ExportReport>) -> McpResult {
        self.handlers().export_report(params).await
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for SajuMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "saju-coach".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: Some(r#"Saju coach turns birth data into a personality analysis and seven-day action plans whose entries become calendar tasks.

## Workflow
1. `onboard` with name, birthdate and optional birth hour
2. `ask` or `quick_ask` to talk with the coach
3. `plan_from_conversation` (or `plan_for_concern`) to add a seven-day plan as tasks
4. `toggle_task` as tasks get done; `get_stats` and `show_calendar` to review
5. `export_report` to save a Markdown summary

Tasks and the calendar work without onboarding. Text generation failures are reported inside the answer text rather than as tool errors."#.to_string()),
        }
    }
}

/// Run the MCP server over stdio until the client disconnects or a signal
/// arrives.
pub async fn run_stdio_server(server: SajuMcpServer) -> Result<()> {
    use rmcp::{ServiceExt, transport::stdio};

    info!("Starting MCP server on stdio");
    debug!(
        "Server created with {} tools",
        server.tool_router.list_all().len()
    );

    let service = server.serve(stdio()).await.inspect_err(|e| {
        error!("Failed to start MCP server: {e}");
    })?;

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        result = service.waiting() => {
            result?;
            info!("MCP client disconnected");
        }
        _ = sigint.recv() => info!("Received SIGINT, shutting down"),
        _ = sigterm.recv() => info!("Received SIGTERM, shutting down"),
    }

    Ok(())
}
