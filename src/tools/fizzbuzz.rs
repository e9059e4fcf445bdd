//! FizzBuzz over 1..=100. Needs no input.

use std::ops::RangeInclusive;

use super::{Tool, ToolError};
use crate::session::Session;
use crate::types::{Command, FieldSpec, Mode, Report, Values};

const RANGE: RangeInclusive<u32> = 1..=100;

pub fn token(n: u32) -> String {
    match (n % 3, n % 5) {
        (0, 0) => "FizzBuzz".to_string(),
        (0, _) => "Fizz".to_string(),
        (_, 0) => "Buzz".to_string(),
        _ => n.to_string(),
    }
}

pub fn fizzbuzz(range: RangeInclusive<u32>) -> Vec<String> {
    range.map(token).collect()
}

pub struct FizzBuzzTool;

impl Tool for FizzBuzzTool {
    fn command(&self) -> Command {
        Command::FizzBuzz
    }

    fn description(&self) -> &str {
        "FizzBuzz from 1 to 100."
    }

    fn mode(&self) -> Mode {
        Mode::Immediate
    }

    fn fields(&self) -> FieldSpec {
        &[]
    }

    fn execute(&self, _values: &Values, _session: &mut Session) -> Result<Report, ToolError> {
        let tokens = fizzbuzz(RANGE);
        Ok(Report::success(Command::FizzBuzz, "FizzBuzz Output")
            .line(tokens.join(" "))
            .value("count", tokens.len()))
    }
}
