//! Number guessing game.
//!
//! Starting the tool draws a secret in 1..=100 from the session's random
//! source. Each valid guess counts as an attempt; rejected input does not.

use std::cmp::Ordering;

use super::{Tool, ToolError};
use crate::session::Session;
use crate::types::{Command, Field, FieldSpec, Mode, Report, Values};

pub const LOWEST: u32 = 1;
pub const HIGHEST: u32 = 100;

const FIELDS: FieldSpec = &[Field::integer("guess", "Guess").range(LOWEST as f64, HIGHEST as f64)];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    TooLow,
    TooHigh,
    Correct,
}

impl GuessOutcome {
    pub fn name(self) -> &'static str {
        match self {
            GuessOutcome::TooLow => "too_low",
            GuessOutcome::TooHigh => "too_high",
            GuessOutcome::Correct => "correct",
        }
    }
}

/// State of one round, kept in the session between guesses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessGame {
    secret: u32,
    attempts: u32,
    solved: bool,
}

impl GuessGame {
    pub fn new(secret: u32) -> Self {
        Self {
            secret,
            attempts: 0,
            solved: false,
        }
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Record one guess. A solved game accepts no more guesses.
    pub fn guess(&mut self, n: u32) -> Result<GuessOutcome, ToolError> {
        if self.solved {
            return Err(ToolError::GameOver);
        }
        self.attempts += 1;
        let outcome = match n.cmp(&self.secret) {
            Ordering::Less => GuessOutcome::TooLow,
            Ordering::Greater => GuessOutcome::TooHigh,
            Ordering::Equal => GuessOutcome::Correct,
        };
        self.solved = outcome == GuessOutcome::Correct;
        Ok(outcome)
    }
}

pub struct GuessTool;

impl Tool for GuessTool {
    fn command(&self) -> Command {
        Command::Guess
    }

    fn description(&self) -> &str {
        "Guess the number between 1 and 100 in as few attempts as you can."
    }

    fn mode(&self) -> Mode {
        Mode::Interactive
    }

    fn fields(&self) -> FieldSpec {
        FIELDS
    }

    fn start(&self, session: &mut Session) -> Report {
        let secret = session.random().draw(LOWEST..=HIGHEST);
        session.set_guess_game(GuessGame::new(secret));
        Report::prompt(Command::Guess, self.title())
            .line(format!(
                "I'm thinking of a number between {} and {}!",
                LOWEST, HIGHEST
            ))
            .line("Enter your guess.")
            .value("attempts", 0)
    }

    fn execute(&self, values: &Values, session: &mut Session) -> Result<Report, ToolError> {
        // range-checked by the field spec
        let n = values.integer("guess")? as u32;
        let game = session
            .guess_game_mut()
            .ok_or(ToolError::GameNotStarted)?;
        let outcome = game.guess(n)?;
        let attempts = game.attempts();

        let report = match outcome {
            GuessOutcome::Correct => Report::success(Command::Guess, self.title()).line(format!(
                "Congratulations! You guessed {} correctly in {} attempts!",
                n, attempts
            )),
            GuessOutcome::TooLow => Report::hint(Command::Guess, self.title())
                .line(format!("Too low! Try again. (Attempt {})", attempts)),
            GuessOutcome::TooHigh => Report::hint(Command::Guess, self.title())
                .line(format!("Too high! Try again. (Attempt {})", attempts)),
        };
        Ok(report
            .value("guess", n)
            .value("attempts", attempts)
            .value("outcome", outcome.name()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::testing;
    use crate::types::{Outcome, RawInput};
    use crate::validate::validate;

    fn guess(session: &mut Session, raw: &str) -> Result<Report, ToolError> {
        let values = validate(FIELDS, &RawInput::new().with("guess", raw))?;
        GuessTool.execute(&values, session)
    }

    #[test]
    fn test_game_with_scripted_secret() {
        let mut session = testing::session([42]);
        let intro = GuessTool.start(&mut session);
        assert_eq!(intro.outcome(), Outcome::Prompt);
        assert_eq!(session.guess_game().unwrap().secret, 42);

        let low = guess(&mut session, "10").unwrap();
        assert_eq!(low.outcome(), Outcome::Hint);
        assert_eq!(low.lines()[0], "Too low! Try again. (Attempt 1)");

        // rejected input does not count
        assert!(guess(&mut session, "101").is_err());
        assert!(guess(&mut session, "abc").is_err());
        assert!(guess(&mut session, "0").is_err());
        assert_eq!(session.guess_game().unwrap().attempts(), 1);

        let high = guess(&mut session, "50").unwrap();
        assert_eq!(high.value_of("outcome").unwrap(), "too_high");

        let win = guess(&mut session, "42").unwrap();
        assert_eq!(win.outcome(), Outcome::Success);
        assert_eq!(
            win.lines()[0],
            "Congratulations! You guessed 42 correctly in 3 attempts!"
        );
        assert_eq!(win.value_of("attempts").unwrap(), 3);

        assert_eq!(guess(&mut session, "42").unwrap_err(), ToolError::GameOver);
    }

    #[test]
    fn test_restart_resets_attempts() {
        let mut session = testing::session([7, 93]);
        GuessTool.start(&mut session);
        guess(&mut session, "1").unwrap();
        guess(&mut session, "2").unwrap();
        GuessTool.start(&mut session);
        let game = session.guess_game().unwrap();
        assert_eq!(game.secret, 93);
        assert_eq!(game.attempts(), 0);
    }

    #[test]
    fn test_guess_without_game() {
        let mut session = testing::session([]);
        assert_eq!(
            guess(&mut session, "5").unwrap_err(),
            ToolError::GameNotStarted
        );
    }

    #[test]
    fn test_bounds_are_valid_guesses() {
        let mut session = testing::session([1]);
        GuessTool.start(&mut session);
        assert_eq!(
            guess(&mut session, "100").unwrap().outcome(),
            Outcome::Hint
        );
        assert_eq!(
            guess(&mut session, "1").unwrap().outcome(),
            Outcome::Success
        );
    }
}
