//! Days converter.
//!
//! Two independent breakdowns of the same total: years/months/days using
//! 365-day years and 30-day months, and weeks/days. They are reported side
//! by side and are not reconciled with each other.

use super::{Tool, ToolError};
use crate::session::Session;
use crate::types::{Command, Field, FieldSpec, Mode, Report, Values};
use crate::validate::ValidationError;

const FIELDS: FieldSpec = &[Field::integer("days", "Days").non_negative()];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaysBreakdown {
    pub years: u64,
    pub months: u64,
    pub days: u64,
    pub weeks: u64,
    pub week_days: u64,
}

pub fn convert(total: u64) -> DaysBreakdown {
    DaysBreakdown {
        years: total / 365,
        months: (total % 365) / 30,
        days: (total % 365) % 30,
        weeks: total / 7,
        week_days: total % 7,
    }
}

pub struct DaysTool;

impl Tool for DaysTool {
    fn command(&self) -> Command {
        Command::Days
    }

    fn description(&self) -> &str {
        "Express a number of days as years, months and days, and as weeks."
    }

    fn mode(&self) -> Mode {
        Mode::Modal
    }

    fn fields(&self) -> FieldSpec {
        FIELDS
    }

    fn execute(&self, values: &Values, _session: &mut Session) -> Result<Report, ToolError> {
        let total = u64::try_from(values.integer("days")?).map_err(|_| {
            ValidationError::NonNegativeRequired {
                field: FIELDS[0].label.to_string(),
            }
        })?;
        let b = convert(total);

        Ok(Report::success(Command::Days, self.title())
            .line(format!("{} days equals:", total))
            .line(format!(
                "{} years, {} months, {} days",
                b.years, b.months, b.days
            ))
            .line(format!("{} weeks and {} days", b.weeks, b.week_days))
            .value("years", b.years)
            .value("months", b.months)
            .value("days", b.days)
            .value("weeks", b.weeks)
            .value("week_days", b.week_days))
    }
}
