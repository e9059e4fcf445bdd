//! Tool System module.
//!
//! This module defines the `Tool` trait and the `ToolCatalog` that
//! together form the tool framework.
//!
//! Key concepts:
//! - **Tool trait**: every tool implements this trait, providing its
//!   command, its form (`FieldSpec`), its mode, and a compute method
//! - **Mode**: immediate tools run on dispatch, modal tools run once after
//!   a form is submitted, interactive tools start a game and then answer
//!   each step action
//! - **ToolCatalog**: a static registry; `resolve` is an exhaustive match
//!   over `Command`, so a new command cannot be added without a tool

pub mod atm;
pub mod bmi;
pub mod days;
pub mod fizzbuzz;
pub mod grade;
pub mod guess;
pub mod login;
pub mod reverse;
pub mod rps;
pub mod tip;

use thiserror::Error;

use crate::session::Session;
use crate::types::{
    spec_schema, Command, FieldSpec, Mode, Report, ToolDefinition, UnknownCommand, Values,
};
use crate::validate::ValidationError;

/// Currency sign used in money reports.
pub const CURRENCY: &str = "₹";

/// Why a tool refused to produce a result.
///
/// The messages are shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ToolError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Insufficient balance. Cannot withdraw ₹{requested} from ₹{balance}.")]
    InsufficientBalance { requested: u64, balance: u64 },

    /// Same message for an unknown user and a wrong password.
    #[error("Invalid username or password.")]
    InvalidCredentials,

    #[error("No game in progress. Start a new game first.")]
    GameNotStarted,

    #[error("You already found the number. Start a new game to play again.")]
    GameOver,
}

/// Trait that all tools must implement.
pub trait Tool: Send + Sync {
    /// The command this tool answers to.
    fn command(&self) -> Command;

    /// Title shown on the modal and on reports.
    fn title(&self) -> &str {
        self.command().label()
    }

    /// One-line description for listings.
    fn description(&self) -> &str;

    fn mode(&self) -> Mode;

    /// The form for modal tools, or the step action for interactive ones.
    /// Empty for immediate tools.
    fn fields(&self) -> FieldSpec;

    /// Extra lines shown above the form (balance, demo accounts, ...).
    fn notes(&self, _session: &Session) -> Vec<String> {
        Vec::new()
    }

    /// Begin an interactive tool. The default only introduces it.
    fn start(&self, _session: &mut Session) -> Report {
        Report::prompt(self.command(), self.title()).line(self.description())
    }

    /// Compute the report from validated input.
    ///
    /// For interactive tools this is one step of the game.
    fn execute(&self, values: &Values, session: &mut Session) -> Result<Report, ToolError>;

    /// JSON Schema describing `fields()`.
    fn parameters_schema(&self) -> serde_json::Value {
        spec_schema(self.fields())
    }

    fn to_definition(&self) -> ToolDefinition {
        ToolDefinition {
            id: self.command().id().to_string(),
            name: self.title().to_string(),
            description: self.description().to_string(),
            mode: self.mode(),
            input_schema: self.parameters_schema(),
        }
    }
}

/// Static registry mapping each `Command` to its tool.
pub struct ToolCatalog;

impl ToolCatalog {
    pub fn resolve(command: Command) -> &'static dyn Tool {
        match command {
            Command::Bmi => &bmi::BmiTool,
            Command::Tip => &tip::TipTool,
            Command::FizzBuzz => &fizzbuzz::FizzBuzzTool,
            Command::Reverse => &reverse::ReverseTool,
            Command::Days => &days::DaysTool,
            Command::Guess => &guess::GuessTool,
            Command::Grade => &grade::GradeTool,
            Command::Rps => &rps::RpsTool,
            Command::Atm => &atm::AtmTool,
            Command::Login => &login::LoginTool,
        }
    }

    /// Resolve a menu label or short id.
    pub fn resolve_label(label: &str) -> Result<&'static dyn Tool, UnknownCommand> {
        label.parse::<Command>().map(Self::resolve)
    }

    /// Every tool, in menu order.
    pub fn tools() -> impl Iterator<Item = &'static dyn Tool> {
        Command::ALL.into_iter().map(Self::resolve)
    }

    pub fn definitions() -> Vec<ToolDefinition> {
        Self::tools().map(|t| t.to_definition()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_command_resolves_to_its_own_tool() {
        for command in Command::ALL {
            let tool = ToolCatalog::resolve(command);
            assert_eq!(tool.command(), command);
            assert!(!tool.description().is_empty());
        }
        assert_eq!(ToolCatalog::tools().count(), 10);
    }

    #[test]
    fn test_resolve_label() {
        let tool = ToolCatalog::resolve_label("Student Grade Calculator").unwrap();
        assert_eq!(tool.command(), Command::Grade);
        assert_eq!(tool.fields().len(), 5);
        assert!(ToolCatalog::resolve_label("calculator").is_err());
    }

    #[test]
    fn test_modes_match_their_forms() {
        for tool in ToolCatalog::tools() {
            match tool.mode() {
                Mode::Immediate => assert!(tool.fields().is_empty()),
                Mode::Modal | Mode::Interactive => assert!(!tool.fields().is_empty()),
            }
        }
        assert_eq!(ToolCatalog::resolve(Command::FizzBuzz).mode(), Mode::Immediate);
        assert_eq!(ToolCatalog::resolve(Command::Guess).mode(), Mode::Interactive);
        assert_eq!(ToolCatalog::resolve(Command::Rps).mode(), Mode::Interactive);
        assert_eq!(ToolCatalog::resolve(Command::Atm).mode(), Mode::Modal);
    }

    #[test]
    fn test_definitions() {
        let defs = ToolCatalog::definitions();
        assert_eq!(defs.len(), 10);
        let atm = defs.iter().find(|d| d.id == "atm").unwrap();
        assert_eq!(atm.name, "ATM Cash Dispenser");
        assert_eq!(atm.input_schema["required"][0], "amount");
        let json = serde_json::to_value(&defs).unwrap();
        assert_eq!(json[2]["mode"], "immediate");
    }
}
