//! Core data types used throughout minitools.
//!
//! This module defines the command set, the declarative field specs that
//! describe each tool's form, the raw and validated input containers,
//! and the `Report` that every tool hands to an output sink.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

use crate::validate::ValidationError;

// --- Commands ---

/// One tool in the box.
///
/// The set is closed: every variant resolves to exactly one tool in the
/// catalog, and the compiler checks that mapping for us.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Command {
    Bmi,
    Tip,
    FizzBuzz,
    Reverse,
    Days,
    Guess,
    Grade,
    Rps,
    Atm,
    Login,
}

impl Command {
    /// All commands, in menu order.
    pub const ALL: [Command; 10] = [
        Command::Bmi,
        Command::Tip,
        Command::FizzBuzz,
        Command::Reverse,
        Command::Days,
        Command::Guess,
        Command::Grade,
        Command::Rps,
        Command::Atm,
        Command::Login,
    ];

    /// Short identifier used on the command line.
    pub fn id(self) -> &'static str {
        match self {
            Command::Bmi => "bmi",
            Command::Tip => "tip",
            Command::FizzBuzz => "fizzbuzz",
            Command::Reverse => "reverse",
            Command::Days => "days",
            Command::Guess => "guess",
            Command::Grade => "grade",
            Command::Rps => "rps",
            Command::Atm => "atm",
            Command::Login => "login",
        }
    }

    /// Display label, as shown in the menu.
    pub fn label(self) -> &'static str {
        match self {
            Command::Bmi => "BMI Calculator",
            Command::Tip => "Tip Calculator",
            Command::FizzBuzz => "FizzBuzz",
            Command::Reverse => "Reverse a Number",
            Command::Days => "Days Converter",
            Command::Guess => "Number Guessing Game",
            Command::Grade => "Student Grade Calculator",
            Command::Rps => "Rock, Paper, Scissors",
            Command::Atm => "ATM Cash Dispenser",
            Command::Login => "Login System",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A label that does not name any tool.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown tool: '{0}'")]
pub struct UnknownCommand(pub String);

impl FromStr for Command {
    type Err = UnknownCommand;

    /// Matches either the short id or the display label, ignoring case
    /// and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Command::ALL
            .into_iter()
            .find(|c| c.id() == wanted || c.label().to_lowercase() == wanted)
            .ok_or_else(|| UnknownCommand(s.trim().to_string()))
    }
}

// --- Modes ---

/// How the dispatcher drives a tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Runs as soon as it is dispatched, no input.
    Immediate,
    /// Collects one form through the modal, then runs once.
    Modal,
    /// Starts a game, then keeps answering step actions.
    Interactive,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Mode::Immediate => "immediate",
            Mode::Modal => "modal",
            Mode::Interactive => "interactive",
        };
        f.write_str(s)
    }
}

// --- Field Specs ---

/// What a field holds and how its raw text is parsed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    /// Any finite number.
    Decimal,
    /// A whole number.
    Integer,
    /// Numeric text kept verbatim (digits are not reinterpreted).
    Numeric,
    /// Free text kept as typed.
    Text,
    /// Free text kept as typed; rendered masked.
    Secret,
    /// One of a fixed set of words.
    Choice(&'static [&'static str]),
}

/// One declared input field and its constraints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Field {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    /// Inclusive bounds.
    pub range: Option<(f64, f64)>,
    pub positive: bool,
    pub non_negative: bool,
    pub multiple_of: Option<i64>,
}

/// The ordered form of one tool. Immutable once declared.
pub type FieldSpec = &'static [Field];

impl Field {
    const fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            range: None,
            positive: false,
            non_negative: false,
            multiple_of: None,
        }
    }

    pub const fn decimal(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Decimal)
    }

    pub const fn integer(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Integer)
    }

    pub const fn numeric(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Numeric)
    }

    pub const fn text(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Text)
    }

    pub const fn secret(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Secret)
    }

    pub const fn choice(
        name: &'static str,
        label: &'static str,
        options: &'static [&'static str],
    ) -> Self {
        Self::new(name, label, FieldKind::Choice(options))
    }

    pub const fn range(mut self, min: f64, max: f64) -> Self {
        self.range = Some((min, max));
        self
    }

    pub const fn positive(mut self) -> Self {
        self.positive = true;
        self
    }

    pub const fn non_negative(mut self) -> Self {
        self.non_negative = true;
        self
    }

    pub const fn multiple_of(mut self, step: i64) -> Self {
        self.multiple_of = Some(step);
        self
    }

    pub fn is_secret(&self) -> bool {
        matches!(self.kind, FieldKind::Secret)
    }

    /// JSON Schema fragment for this field (used by `list --json`).
    pub fn schema(&self) -> serde_json::Value {
        let mut schema = match self.kind {
            FieldKind::Decimal => json!({ "type": "number" }),
            FieldKind::Integer => json!({ "type": "integer" }),
            FieldKind::Numeric => json!({ "type": "string", "format": "numeric" }),
            FieldKind::Text => json!({ "type": "string" }),
            FieldKind::Secret => json!({ "type": "string", "format": "password" }),
            FieldKind::Choice(options) => json!({ "type": "string", "enum": options }),
        };
        schema["description"] = json!(self.label);
        if let Some((min, max)) = self.range {
            schema["minimum"] = json!(min);
            schema["maximum"] = json!(max);
        }
        if self.positive {
            schema["exclusiveMinimum"] = json!(0);
        }
        if self.non_negative {
            schema["minimum"] = json!(0);
        }
        if let Some(step) = self.multiple_of {
            schema["multipleOf"] = json!(step);
        }
        schema
    }
}

/// JSON Schema for a whole form.
pub fn spec_schema(spec: FieldSpec) -> serde_json::Value {
    let properties: serde_json::Map<String, serde_json::Value> = spec
        .iter()
        .map(|field| (field.name.to_string(), field.schema()))
        .collect();
    let required: Vec<&str> = spec.iter().map(|field| field.name).collect();
    json!({
        "type": "object",
        "properties": properties,
        "required": required
    })
}

// --- Tool Definition ---

/// Describes a tool for listings (`minitools list`).
#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    pub id: String,
    pub name: String,
    pub description: String,
    pub mode: Mode,
    pub input_schema: serde_json::Value,
}

// --- Input ---

/// Field values exactly as the user typed them, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawInput {
    fields: BTreeMap<String, String>,
}

impl RawInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawInput {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut input = RawInput::new();
        for (name, value) in iter {
            input.set(name, value);
        }
        input
    }
}

/// One validated value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Decimal(f64),
    Integer(i64),
    Text(String),
}

/// The typed result of a successful validation, in declared field order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Values {
    entries: Vec<(&'static str, Value)>,
}

impl Values {
    pub fn push(&mut self, name: &'static str, value: Value) {
        self.entries.push((name, value));
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v)
    }

    pub fn decimal(&self, name: &str) -> Result<f64, ValidationError> {
        match self.get(name) {
            Some(Value::Decimal(n)) => Ok(*n),
            Some(Value::Integer(n)) => Ok(*n as f64),
            _ => Err(ValidationError::Missing {
                field: name.to_string(),
            }),
        }
    }

    pub fn integer(&self, name: &str) -> Result<i64, ValidationError> {
        match self.get(name) {
            Some(Value::Integer(n)) => Ok(*n),
            _ => Err(ValidationError::Missing {
                field: name.to_string(),
            }),
        }
    }

    pub fn text(&self, name: &str) -> Result<&str, ValidationError> {
        match self.get(name) {
            Some(Value::Text(s)) => Ok(s),
            _ => Err(ValidationError::Missing {
                field: name.to_string(),
            }),
        }
    }
}

// --- Report ---

/// How a report should be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// The tool produced its result.
    Success,
    /// The input was rejected; the lines carry the reason.
    Failure,
    /// An interactive tool is waiting for the next action.
    Prompt,
    /// Feedback inside a running game ("too low", "too high").
    Hint,
}

/// Immutable result of one tool computation, destined for an output sink.
///
/// Built with the consuming builder methods below, then handed over by
/// value; nothing mutates it afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    tool: Option<Command>,
    outcome: Outcome,
    title: String,
    lines: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    values: BTreeMap<String, serde_json::Value>,
}

impl Report {
    fn new(tool: Option<Command>, outcome: Outcome, title: impl Into<String>) -> Self {
        Self {
            tool,
            outcome,
            title: title.into(),
            lines: Vec::new(),
            values: BTreeMap::new(),
        }
    }

    pub fn success(tool: Command, title: impl Into<String>) -> Self {
        Self::new(Some(tool), Outcome::Success, title)
    }

    pub fn prompt(tool: Command, title: impl Into<String>) -> Self {
        Self::new(Some(tool), Outcome::Prompt, title)
    }

    pub fn hint(tool: Command, title: impl Into<String>) -> Self {
        Self::new(Some(tool), Outcome::Hint, title)
    }

    pub fn failure(
        tool: Option<Command>,
        title: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::new(tool, Outcome::Failure, title).line(reason)
    }

    /// The report written when a label names no tool.
    pub fn unknown_tool() -> Self {
        Self::failure(None, "Unknown tool", "Unknown tool.")
    }

    pub fn line(mut self, text: impl Into<String>) -> Self {
        self.lines.push(text.into());
        self
    }

    pub fn value(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn tool(&self) -> Option<Command> {
        self.tool
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    #[cfg(test)]
    pub fn value_of(&self, key: &str) -> Option<&serde_json::Value> {
        self.values.get(key)
    }

    pub fn is_failure(&self) -> bool {
        self.outcome == Outcome::Failure
    }

    /// Plain-text rendering: the title, then one line per entry.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let marker = match self.outcome {
            Outcome::Failure => "! ",
            _ => "",
        };
        out.push_str(&format!("{}{}\n", marker, self.title));
        for line in &self.lines {
            out.push_str("  ");
            out.push_str(line);
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_from_label_and_id() {
        assert_eq!("bmi".parse::<Command>().unwrap(), Command::Bmi);
        assert_eq!("  BMI Calculator ".parse::<Command>().unwrap(), Command::Bmi);
        assert_eq!(
            "rock, paper, scissors".parse::<Command>().unwrap(),
            Command::Rps
        );
        assert_eq!(
            "ATM CASH DISPENSER".parse::<Command>().unwrap(),
            Command::Atm
        );
        let err = "theme toggle".parse::<Command>().unwrap_err();
        assert_eq!(err, UnknownCommand("theme toggle".to_string()));
    }

    #[test]
    fn test_every_command_round_trips_through_its_label() {
        for command in Command::ALL {
            assert_eq!(command.label().parse::<Command>().unwrap(), command);
            assert_eq!(command.id().parse::<Command>().unwrap(), command);
        }
    }

    #[test]
    fn test_spec_schema_lists_required_fields() {
        const SPEC: FieldSpec = &[
            Field::integer("amount", "Amount").positive().multiple_of(100),
            Field::secret("password", "Password"),
        ];
        let schema = spec_schema(SPEC);
        assert_eq!(schema["required"][0], "amount");
        assert_eq!(schema["properties"]["amount"]["multipleOf"], 100);
        assert_eq!(schema["properties"]["password"]["format"], "password");
    }

    #[test]
    fn test_values_accessors() {
        let mut values = Values::default();
        values.push("n", Value::Integer(4));
        values.push("name", Value::Text("ann".into()));
        assert_eq!(values.integer("n").unwrap(), 4);
        assert_eq!(values.decimal("n").unwrap(), 4.0);
        assert_eq!(values.text("name").unwrap(), "ann");
        assert!(matches!(
            values.text("n"),
            Err(ValidationError::Missing { .. })
        ));
    }

    #[test]
    fn test_report_text_and_json() {
        let report = Report::success(Command::Tip, "Tip Calculator")
            .line("Tip: ₹10.00")
            .value("tip", 10.0);
        assert_eq!(report.to_text(), "Tip Calculator\n  Tip: ₹10.00\n");
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["tool"], "tip");
        assert_eq!(json["outcome"], "success");
        assert_eq!(json["values"]["tip"], 10.0);

        let failure = Report::unknown_tool();
        assert!(failure.is_failure());
        assert!(failure.to_text().starts_with("! Unknown tool"));
    }
}
