//! Reverse the characters of a number.
//!
//! The input only has to be numeric; sign and leading zeros are kept as
//! plain characters, so "12300" becomes "00321" and "-12" becomes "21-".

use super::{Tool, ToolError};
use crate::session::Session;
use crate::types::{Command, Field, FieldSpec, Mode, Report, Values};

const FIELDS: FieldSpec = &[Field::numeric("number", "Number")];

pub fn reverse_digits(number: &str) -> String {
    number.chars().rev().collect()
}

pub struct ReverseTool;

impl Tool for ReverseTool {
    fn command(&self) -> Command {
        Command::Reverse
    }

    fn description(&self) -> &str {
        "Reverse the digits of a number."
    }

    fn mode(&self) -> Mode {
        Mode::Modal
    }

    fn fields(&self) -> FieldSpec {
        FIELDS
    }

    fn execute(&self, values: &Values, _session: &mut Session) -> Result<Report, ToolError> {
        let original = values.text("number")?;
        let reversed = reverse_digits(original);
        Ok(Report::success(Command::Reverse, self.title())
            .line(format!("Original: {}", original))
            .line(format!("Reversed: {}", reversed))
            .value("original", original)
            .value("reversed", reversed))
    }
}
