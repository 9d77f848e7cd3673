//! Command-line argument wrappers and one-shot command handlers.
//!
//! Every clap `...Args` struct converts into the matching
//! `saju_core::params` structure, so the CLI and the MCP server validate
//! input through the same code:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Coach / Session
//! ```
//!
//! The handlers on [`Cli`] run a single operation and print its Markdown
//! through the [`TerminalRenderer`].

use std::{fs, io, path::PathBuf};

use anyhow::{Context, Result, anyhow};
use clap::Args;
use jiff::{Zoned, civil::Date};
use log::debug;
use saju_core::{
    BirthHour, Coach, SajuElements,
    calendar::{month_calendar, parse_date},
    display::MonthTitle,
    extract_weekly_plan,
    params::{ExtractPlan, MonthQuery, Onboard},
};

use crate::renderer::TerminalRenderer;

/// Birth data shared by the model-backed commands
#[derive(Args)]
pub struct ProfileArgs {
    /// Display name
    pub name: String,
    /// Date of birth (YYYY-MM-DD)
    pub birthdate: String,
    #[arg(
        long,
        help = "Birth hour slot such as 07-09 or 07-09시; omit when unknown"
    )]
    pub hour: Option<String>,
}

impl From<ProfileArgs> for Onboard {
    fn from(val: ProfileArgs) -> Self {
        Onboard {
            name: val.name,
            birthdate: val.birthdate,
            birth_hour: val.hour,
        }
    }
}

/// Extract a seven-day plan from model output
///
/// Reads the text from FILE, or from stdin when no file is given, and prints
/// the seven day entries. Lines that do not match "Day N: title - description"
/// are ignored and missing days are filled with placeholders.
#[derive(Args)]
pub struct ExtractArgs {
    #[arg(help = "File containing the text; reads stdin when omitted")]
    pub file: Option<PathBuf>,
    #[arg(long, help = "Print the plan as JSON instead of Markdown")]
    pub json: bool,
}

/// Print a month calendar
#[derive(Args)]
pub struct CalendarArgs {
    #[arg(help = "Year; defaults to the current year")]
    pub year: Option<i16>,
    #[arg(help = "Month 1-12; defaults to the current month")]
    pub month: Option<i8>,
}

impl From<CalendarArgs> for MonthQuery {
    fn from(val: CalendarArgs) -> Self {
        MonthQuery {
            year: val.year,
            month: val.month,
        }
    }
}

/// Show the birth-chart labels
#[derive(Args)]
pub struct ElementsArgs {
    #[arg(help = "Date of birth (YYYY-MM-DD)")]
    pub birthdate: String,
    #[arg(long, help = "Birth hour slot such as 07-09; omit when unknown")]
    pub hour: Option<String>,
}

/// Analyze a personality
#[derive(Args)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub profile: ProfileArgs,
}

/// Ask one question
#[derive(Args)]
pub struct AskArgs {
    #[command(flatten)]
    pub profile: ProfileArgs,
    #[arg(long, short, help = "The question to ask the coach")]
    pub question: String,
}

/// Generate a seven-day plan
#[derive(Args)]
pub struct PlanArgs {
    #[command(flatten)]
    pub profile: ProfileArgs,
    #[arg(long, short, help = "The concern the plan should address")]
    pub concern: String,
}

/// Today's date in the system time zone.
pub fn today() -> Date {
    Zoned::now().date()
}

/// Handler for the one-shot commands
pub struct Cli {
    coach: Coach,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(coach: Coach, renderer: TerminalRenderer) -> Self {
        Self { coach, renderer }
    }

    pub fn extract(&self, args: ExtractArgs) -> Result<()> {
        let text = match &args.file {
            Some(path) => fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?,
            None => io::read_to_string(io::stdin()).context("Failed to read stdin")?,
        };
        let params = ExtractPlan { text };
        let plan = extract_weekly_plan(&params.text);
        debug!("Extracted {} parsed entries", plan.parsed_count());

        if args.json {
            println!("{}", serde_json::to_string_pretty(&plan)?);
            return Ok(());
        }
        self.renderer.show(&plan)
    }

    pub fn calendar(&self, args: CalendarArgs) -> Result<()> {
        let (year, month) = MonthQuery::from(args).resolve(today());
        let grid = month_calendar(year, month).context("Failed to lay out calendar")?;
        self.renderer
            .render(&format!("## {}\n\n{grid}", MonthTitle(grid.first_day()?)))
    }

    pub fn elements(&self, args: ElementsArgs) -> Result<()> {
        let birthdate = parse_date(&args.birthdate)?;
        let birth_hour = match args.hour.as_deref() {
            Some(raw) => raw.parse::<BirthHour>().map_err(|e| anyhow!(e))?,
            None => BirthHour::Unknown,
        };
        self.renderer
            .show(&SajuElements::derive(birthdate, birth_hour))
    }

    pub async fn analyze(&self, args: AnalyzeArgs) -> Result<()> {
        let profile = Onboard::from(args.profile).profile()?;
        let analysis = self
            .coach
            .analyze_profile(&profile.name, profile.birthdate, profile.birth_hour)
            .await;
        self.renderer.render(&format!(
            "# {}님의 사주 분석\n\n{profile}\n{}\n{analysis}",
            profile.name,
            SajuElements::derive(profile.birthdate, profile.birth_hour)
        ))
    }

    pub async fn ask(&self, args: AskArgs) -> Result<()> {
        let profile = Onboard::from(args.profile).profile()?;
        let answer = self
            .coach
            .generate_insight(&profile, Some(&args.question))
            .await;
        self.renderer.render(&format!("{answer}\n"))
    }

    pub async fn plan(&self, args: PlanArgs) -> Result<()> {
        let profile = Onboard::from(args.profile).profile()?;
        let plan = self
            .coach
            .generate_weekly_plan(&profile, &args.concern)
            .await;
        self.renderer.render(&format!(
            "## 7일 실천 계획\n\n고민: {}\n\n{plan}",
            args.concern.trim()
        ))
    }
}
