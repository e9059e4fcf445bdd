//! ATM cash dispenser.
//!
//! Withdrawals come off the session balance and are paid out greedily in
//! 500, 200 and 100 notes. Amounts are multiples of 100, so the greedy
//! breakdown is always exact.

use serde_json::json;

use super::{Tool, ToolError, CURRENCY};
use crate::session::Session;
use crate::types::{Command, Field, FieldSpec, Mode, Report, Values};
use crate::validate::ValidationError;

/// Note values, largest first.
pub const DENOMINATIONS: [u64; 3] = [500, 200, 100];

const FIELDS: FieldSpec = &[Field::integer("amount", "Amount")
    .positive()
    .multiple_of(100)];

/// `(denomination, count)` for every denomination, zero counts included.
pub fn dispense(amount: u64) -> Vec<(u64, u64)> {
    let mut remaining = amount;
    DENOMINATIONS
        .iter()
        .map(|&note| {
            let count = remaining / note;
            remaining %= note;
            (note, count)
        })
        .collect()
}

pub struct AtmTool;

impl Tool for AtmTool {
    fn command(&self) -> Command {
        Command::Atm
    }

    fn description(&self) -> &str {
        "Withdraw cash from a simulated account and see the notes dispensed."
    }

    fn mode(&self) -> Mode {
        Mode::Modal
    }

    fn fields(&self) -> FieldSpec {
        FIELDS
    }

    fn notes(&self, session: &Session) -> Vec<String> {
        vec![
            format!("Current Balance: {}{}", CURRENCY, session.atm_balance()),
            format!("Minimum: {}100, Multiple of 100", CURRENCY),
        ]
    }

    fn execute(&self, values: &Values, session: &mut Session) -> Result<Report, ToolError> {
        let amount = u64::try_from(values.integer("amount")?).map_err(|_| {
            ValidationError::NonPositive {
                field: FIELDS[0].label.to_string(),
            }
        })?;
        let balance = session.atm_balance();
        let remaining = session
            .debit(amount)
            .ok_or(ToolError::InsufficientBalance {
                requested: amount,
                balance,
            })?;

        let notes = dispense(amount);
        let mut report = Report::success(Command::Atm, "Transaction Successful!")
            .line(format!("Withdrawn: {}{}", CURRENCY, amount))
            .line(format!("Remaining Balance: {}{}", CURRENCY, remaining))
            .line("Notes Dispensed:");
        for &(note, count) in notes.iter().filter(|(_, count)| *count > 0) {
            report = report.line(format!("{}{} × {}", CURRENCY, note, count));
        }
        let breakdown: serde_json::Map<String, serde_json::Value> = notes
            .iter()
            .map(|(note, count)| (note.to_string(), json!(count)))
            .collect();

        Ok(report
            .value("amount", amount)
            .value("balance", remaining)
            .value("notes", breakdown))
    }
}
