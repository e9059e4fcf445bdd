//! The output panel model.
//!
//! Each new report replaces what is on the panel, except while an
//! interactive tool runs: its opening prompt stays pinned above the result
//! of the latest action, the way a game board stays on screen between moves.

use crate::dispatcher::OutputSink;
use crate::types::{Outcome, Report};

#[derive(Debug, Clone, Default)]
pub struct OutputPanel {
    pinned: Option<Report>,
    current: Option<Report>,
}

impl OutputPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports on screen, top to bottom.
    pub fn reports(&self) -> impl Iterator<Item = &Report> {
        self.pinned.iter().chain(self.current.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.pinned.is_none() && self.current.is_none()
    }

    #[cfg(test)]
    pub fn latest(&self) -> Option<&Report> {
        self.current.as_ref().or(self.pinned.as_ref())
    }
}

impl OutputSink for OutputPanel {
    fn write(&mut self, report: Report) {
        if report.outcome() == Outcome::Prompt {
            self.pinned = Some(report);
            self.current = None;
            return;
        }
        let same_tool = report.tool().is_some()
            && self.pinned.as_ref().and_then(Report::tool) == report.tool();
        if !same_tool {
            self.pinned = None;
        }
        self.current = Some(report);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Command;

    #[test]
    fn test_reports_replace_each_other() {
        let mut panel = OutputPanel::new();
        assert!(panel.is_empty());
        panel.write(Report::success(Command::Tip, "Tip Calculator"));
        panel.write(Report::success(Command::Bmi, "BMI Calculator"));
        let titles: Vec<&str> = panel.reports().map(Report::title).collect();
        assert_eq!(titles, ["BMI Calculator"]);
    }

    #[test]
    fn test_game_prompt_stays_pinned() {
        let mut panel = OutputPanel::new();
        panel.write(Report::prompt(Command::Guess, "Number Guessing Game"));
        panel.write(Report::hint(Command::Guess, "Too low"));
        panel.write(Report::failure(Some(Command::Guess), "Number Guessing Game", "bad"));
        let outcomes: Vec<Outcome> = panel.reports().map(Report::outcome).collect();
        assert_eq!(outcomes, [Outcome::Prompt, Outcome::Failure]);

        // another tool's report clears the board
        panel.write(Report::success(Command::Days, "Days Converter"));
        assert_eq!(panel.reports().count(), 1);

        panel.write(Report::prompt(Command::Rps, "Rock, Paper, Scissors"));
        assert_eq!(panel.latest().unwrap().outcome(), Outcome::Prompt);
        panel.write(Report::unknown_tool());
        assert_eq!(panel.reports().count(), 1);
        assert!(panel.latest().unwrap().is_failure());
    }
}
