use clap::{Parser, Subcommand};

use crate::cli::{AnalyzeArgs, AskArgs, CalendarArgs, ElementsArgs, ExtractArgs, PlanArgs};

/// Birth-chart flavoured life coaching in the terminal
///
/// Turns a name, birth date and birth hour into a personality analysis, a
/// growth roadmap and a seven-day action plan whose entries land on a task
/// calendar. Text generation is delegated to the Gemini API; everything else
/// (plan extraction, tasks, calendar) runs locally. The `serve` command
/// exposes the same session over MCP for AI assistants.
#[derive(Parser)]
#[command(version, about, name = "saju")]
pub struct Args {
    /// Gemini API key. Also read from a .env file
    #[arg(long, global = true, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Gemini model name (default: gemini-1.5-flash)
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
///
/// One-shot commands (`extract`, `calendar`, `elements`) never contact the
/// model. `analyze`, `ask` and `plan` make a single call each. `session`
/// opens an interactive shell over one coaching session and is the default.
#[derive(Subcommand)]
pub enum Commands {
    /// Extract a seven-day plan from text (file or stdin)
    #[command(alias = "x")]
    Extract(ExtractArgs),
    /// Print a Monday-first month calendar
    #[command(alias = "cal")]
    Calendar(CalendarArgs),
    /// Show the symbolic birth-chart labels for a birth date
    Elements(ElementsArgs),
    /// Analyze a personality from birth data
    Analyze(AnalyzeArgs),
    /// Ask the coach a single question
    Ask(AskArgs),
    /// Generate a seven-day plan for a concern
    Plan(PlanArgs),
    /// Start an interactive coaching session
    #[command(alias = "s")]
    Session,
    /// Start the MCP server
    Serve,
}
