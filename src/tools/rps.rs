//! Rock, paper, scissors against the session's random source.

use std::fmt;

use super::{Tool, ToolError};
use crate::session::Session;
use crate::types::{Command, Field, FieldSpec, Mode, Report, Values};

const OPTIONS: &[&str] = &["rock", "paper", "scissors"];

const FIELDS: FieldSpec = &[Field::choice("choice", "Your move", OPTIONS)];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Rock,
    Paper,
    Scissors,
}

impl Choice {
    pub const ALL: [Choice; 3] = [Choice::Rock, Choice::Paper, Choice::Scissors];

    pub fn name(self) -> &'static str {
        match self {
            Choice::Rock => "rock",
            Choice::Paper => "paper",
            Choice::Scissors => "scissors",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(name.trim()))
    }

    pub fn beats(self, other: Choice) -> bool {
        matches!(
            (self, other),
            (Choice::Rock, Choice::Scissors)
                | (Choice::Paper, Choice::Rock)
                | (Choice::Scissors, Choice::Paper)
        )
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundResult {
    Win,
    Lose,
    Tie,
}

impl RoundResult {
    fn message(self) -> &'static str {
        match self {
            RoundResult::Win => "You win!",
            RoundResult::Lose => "Computer wins!",
            RoundResult::Tie => "It's a tie!",
        }
    }

    fn name(self) -> &'static str {
        match self {
            RoundResult::Win => "win",
            RoundResult::Lose => "lose",
            RoundResult::Tie => "tie",
        }
    }
}

pub fn play(player: Choice, computer: Choice) -> RoundResult {
    if player == computer {
        RoundResult::Tie
    } else if player.beats(computer) {
        RoundResult::Win
    } else {
        RoundResult::Lose
    }
}

pub struct RpsTool;

impl Tool for RpsTool {
    fn command(&self) -> Command {
        Command::Rps
    }

    fn description(&self) -> &str {
        "Play rock, paper, scissors against the computer."
    }

    fn mode(&self) -> Mode {
        Mode::Interactive
    }

    fn fields(&self) -> FieldSpec {
        FIELDS
    }

    fn start(&self, _session: &mut Session) -> Report {
        Report::prompt(Command::Rps, self.title())
            .line("Choose your weapon: rock, paper or scissors.")
    }

    fn execute(&self, values: &Values, session: &mut Session) -> Result<Report, ToolError> {
        let name = values.text("choice")?;
        let player = Choice::from_name(name).ok_or_else(|| {
            crate::validate::ValidationError::UnknownChoice {
                field: FIELDS[0].label.to_string(),
                options: OPTIONS.join(", "),
            }
        })?;
        let last = Choice::ALL.len() as u32 - 1;
        let computer = Choice::ALL[session.random().draw(0..=last) as usize];
        let result = play(player, computer);

        Ok(Report::success(Command::Rps, self.title())
            .line(format!("You: {}", player))
            .line(format!("Computer: {}", computer))
            .line(format!("Result: {}", result.message()))
            .value("player", player.name())
            .value("computer", computer.name())
            .value("result", result.name()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::testing;
    use crate::types::RawInput;
    use crate::validate::validate;

    #[test]
    fn test_every_pairing() {
        use Choice::*;
        let expected = [
            (Rock, Rock, RoundResult::Tie),
            (Rock, Paper, RoundResult::Lose),
            (Rock, Scissors, RoundResult::Win),
            (Paper, Rock, RoundResult::Win),
            (Paper, Paper, RoundResult::Tie),
            (Paper, Scissors, RoundResult::Lose),
            (Scissors, Rock, RoundResult::Lose),
            (Scissors, Paper, RoundResult::Win),
            (Scissors, Scissors, RoundResult::Tie),
        ];
        for (player, computer, result) in expected {
            assert_eq!(play(player, computer), result, "{} vs {}", player, computer);
        }
    }

    #[test]
    fn test_round_uses_random_source() {
        // draws index into [rock, paper, scissors]
        let mut session = testing::session([2, 1]);
        let values = validate(FIELDS, &RawInput::new().with("choice", "Rock")).unwrap();

        let report = RpsTool.execute(&values, &mut session).unwrap();
        assert_eq!(report.value_of("computer").unwrap(), "scissors");
        assert_eq!(report.lines()[2], "Result: You win!");

        let report = RpsTool.execute(&values, &mut session).unwrap();
        assert_eq!(report.value_of("computer").unwrap(), "paper");
        assert_eq!(report.value_of("result").unwrap(), "lose");
    }

    #[test]
    fn test_unknown_move_rejected() {
        let err = validate(FIELDS, &RawInput::new().with("choice", "spock")).unwrap_err();
        assert!(err.to_string().contains("rock, paper, scissors"));
    }
}
