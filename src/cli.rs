//! Command-line entry points: the terminal UI by default, plus `list` and
//! `run` for driving tools from scripts.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};

use crate::config::SessionConfig;
use crate::dispatcher::Dispatcher;
use crate::session::Session;
use crate::tools::ToolCatalog;
use crate::types::{Mode, RawInput, Report};

#[derive(Debug, Parser)]
#[command(name = "minitools", version, about = "Small calculators and games for the terminal")]
pub struct Cli {
    /// Config file to use instead of ~/.minitools/config.toml
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Open the terminal UI (default)
    Tui,
    /// List the available tools
    List {
        /// Print tool definitions as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run one tool without the UI
    Run(RunArgs),
}

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Tool id or menu label, e.g. `atm` or "ATM Cash Dispenser"
    pub tool: String,

    /// Form field for modal tools, repeatable
    #[arg(short = 'f', long = "field", value_name = "NAME=VALUE", value_parser = parse_key_val)]
    pub fields: Vec<(String, String)>,

    /// One move for an interactive game, repeatable
    #[arg(short = 's', long = "step", value_name = "VALUE")]
    pub steps: Vec<String>,

    /// Seed the games for a reproducible run
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print each report as a JSON line
    #[arg(long)]
    pub json: bool,
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{}'", s))?;
    if name.trim().is_empty() {
        return Err(format!("missing field name in '{}'", s));
    }
    Ok((name.trim().to_string(), value.to_string()))
}

pub fn run_list(json: bool) -> Result<()> {
    let definitions = ToolCatalog::definitions();
    if json {
        let out = serde_json::to_string_pretty(&definitions)
            .context("Failed to serialize tool definitions")?;
        println!("{}", out);
        return Ok(());
    }
    for def in definitions {
        println!(
            "{:<9} {:<26} {:<12} {}",
            def.id,
            def.name,
            def.mode.to_string(),
            def.description
        );
    }
    Ok(())
}

/// Run one tool and print its reports. Returns `false` when the last report
/// is a failure.
pub fn run_tool(args: &RunArgs, settings: &SessionConfig) -> Result<bool> {
    let reports = collect_reports(args, settings)?;
    for report in &reports {
        if args.json {
            println!(
                "{}",
                serde_json::to_string(report).context("Failed to serialize report")?
            );
        } else {
            print!("{}", report.to_text());
        }
    }
    Ok(!reports.last().is_some_and(Report::is_failure))
}

fn collect_reports(args: &RunArgs, settings: &SessionConfig) -> Result<Vec<Report>> {
    let mut settings = settings.clone();
    if args.seed.is_some() {
        settings.seed = args.seed;
    }
    let mut dispatcher = Dispatcher::new(Session::new(&settings), Vec::new());

    let Ok(tool) = ToolCatalog::resolve_label(&args.tool) else {
        dispatcher.dispatch_label(&args.tool);
        return Ok(dispatcher.into_sink());
    };
    let command = tool.command();
    if tool.mode() != Mode::Modal && !args.fields.is_empty() {
        bail!("{} has no form; use --step for games", command.label());
    }
    if tool.mode() != Mode::Interactive && !args.steps.is_empty() {
        bail!("{} is not a game; --step does not apply", command.label());
    }

    dispatcher.dispatch(command);
    if dispatcher.modal().is_some() {
        let input: RawInput = args.fields.iter().cloned().collect();
        dispatcher.submit(&input);
    }
    if let Some(field) = tool.fields().first() {
        for step in &args.steps {
            dispatcher.step(&RawInput::new().with(field.name, step.as_str()));
        }
    }
    Ok(dispatcher.into_sink())
}
