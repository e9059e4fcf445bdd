//! Tip calculator.

use super::{Tool, ToolError, CURRENCY};
use crate::session::Session;
use crate::types::{Command, Field, FieldSpec, Mode, Report, Values};

const FIELDS: FieldSpec = &[
    Field::decimal("bill", "Bill amount").positive(),
    Field::decimal("tip", "Tip %").non_negative(),
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TipSplit {
    pub tip: f64,
    pub total: f64,
}

pub fn split(bill: f64, tip_percent: f64) -> TipSplit {
    let tip = bill * tip_percent / 100.0;
    TipSplit {
        tip,
        total: bill + tip,
    }
}

pub struct TipTool;

impl Tool for TipTool {
    fn command(&self) -> Command {
        Command::Tip
    }

    fn description(&self) -> &str {
        "Tip amount and total for a bill."
    }

    fn mode(&self) -> Mode {
        Mode::Modal
    }

    fn fields(&self) -> FieldSpec {
        FIELDS
    }

    fn execute(&self, values: &Values, _session: &mut Session) -> Result<Report, ToolError> {
        let bill = values.decimal("bill")?;
        let percent = values.decimal("tip")?;
        let result = split(bill, percent);

        Ok(Report::success(Command::Tip, self.title())
            .line(format!("Tip: {}{:.2}", CURRENCY, result.tip))
            .line(format!("Total: {}{:.2}", CURRENCY, result.total))
            .value("tip", result.tip)
            .value("total", result.total))
    }
}
