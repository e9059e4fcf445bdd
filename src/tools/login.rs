//! Login demo against the session's fixed account table.

use super::{Tool, ToolError};
use crate::session::{now_timestamp, Session};
use crate::types::{Command, Field, FieldSpec, Mode, Report, Values};

const FIELDS: FieldSpec = &[
    Field::text("username", "Username"),
    Field::secret("password", "Password"),
];

pub struct LoginTool;

impl Tool for LoginTool {
    fn command(&self) -> Command {
        Command::Login
    }

    fn description(&self) -> &str {
        "Sign in with one of the demo accounts."
    }

    fn mode(&self) -> Mode {
        Mode::Modal
    }

    fn fields(&self) -> FieldSpec {
        FIELDS
    }

    fn notes(&self, session: &Session) -> Vec<String> {
        let mut notes = vec!["Demo accounts:".to_string()];
        notes.extend(
            session
                .accounts()
                .map(|(user, pass)| format!("{}/{}", user, pass)),
        );
        notes
    }

    fn execute(&self, values: &Values, session: &mut Session) -> Result<Report, ToolError> {
        let username = values.text("username")?;
        let password = values.text("password")?;
        if !session.check_credentials(username, password) {
            return Err(ToolError::InvalidCredentials);
        }
        let login_time = now_timestamp();
        Ok(Report::success(Command::Login, "Login Successful!")
            .line(format!("Welcome, {}!", username))
            .line(format!("Login time: {}", login_time))
            .value("username", username)
            .value("login_time", login_time))
    }
}
