//! Dispatcher - routes commands to tools and reports to the output sink.
//!
//! ```text
//! command ──> ToolCatalog ──┬─ immediate ───> execute ──────────────┐
//!                           ├─ modal ───────> ModalController       │
//!                           │                   └ submit: validate  │
//!                           │                       then execute ───┤
//!                           └─ interactive ─> start; step: validate │
//!                                                 then execute ─────┴─> OutputSink
//! ```
//!
//! Every error is turned into a failure `Report`; nothing is retried.

use tracing::{debug, info};

use crate::modal::{ModalController, ModalPrompt};
use crate::session::Session;
use crate::tools::{Tool, ToolCatalog, ToolError};
use crate::types::{Command, Mode, RawInput, Report, Values};
use crate::validate::validate;

/// Whatever owns the output region.
pub trait OutputSink {
    fn write(&mut self, report: Report);
}

/// Collects every report, in order.
impl OutputSink for Vec<Report> {
    fn write(&mut self, report: Report) {
        self.push(report);
    }
}

pub struct Dispatcher<S: OutputSink> {
    session: Session,
    modal: ModalController<Session, Report>,
    /// Interactive tool that receives `step` actions.
    active: Option<Command>,
    sink: S,
}

impl<S: OutputSink> Dispatcher<S> {
    pub fn new(session: Session, sink: S) -> Self {
        Self {
            session,
            modal: ModalController::new(),
            active: None,
            sink,
        }
    }

    /// Run `command`. Replaces any modal that is still open.
    pub fn dispatch(&mut self, command: Command) {
        let tool = ToolCatalog::resolve(command);
        info!(
            session = %self.session.id(),
            tool = command.id(),
            mode = %tool.mode(),
            "dispatch"
        );
        match tool.mode() {
            Mode::Immediate => {
                self.modal.cancel();
                self.active = None;
                let result = tool.execute(&Values::default(), &mut self.session);
                self.sink.write(into_report(tool, result));
            }
            Mode::Modal => {
                self.active = None;
                let prompt =
                    ModalPrompt::new(tool.title(), tool.fields(), tool.notes(&self.session));
                self.modal.open(prompt, move |raw: &RawInput, session: &mut Session| {
                    run_validated(tool, raw, session)
                });
            }
            Mode::Interactive => {
                self.modal.cancel();
                self.active = Some(command);
                let report = tool.start(&mut self.session);
                self.sink.write(report);
            }
        }
    }

    /// Run the tool named by a menu label or short id.
    /// Unknown labels produce a generic failure report and nothing else.
    pub fn dispatch_label(&mut self, label: &str) {
        match label.parse::<Command>() {
            Ok(command) => self.dispatch(command),
            Err(e) => {
                debug!(error = %e, "unknown command");
                self.sink.write(Report::unknown_tool());
            }
        }
    }

    /// Submit the open modal with `input`. Returns `false` when no modal
    /// was open (nothing is written).
    pub fn submit(&mut self, input: &RawInput) -> bool {
        match self.modal.submit(input, &mut self.session) {
            Some(report) => {
                self.sink.write(report);
                true
            }
            None => false,
        }
    }

    /// Dismiss the open modal without running it.
    pub fn cancel(&mut self) -> bool {
        self.modal.cancel()
    }

    /// Feed one action to the active interactive tool.
    pub fn step(&mut self, input: &RawInput) {
        let Some(command) = self.active else {
            self.sink.write(Report::failure(
                None,
                "No game running",
                "Start the number guessing game or rock, paper, scissors first.",
            ));
            return;
        };
        let tool = ToolCatalog::resolve(command);
        debug!(session = %self.session.id(), tool = command.id(), "step");
        let report = run_validated(tool, input, &mut self.session);
        self.sink.write(report);
    }

    pub fn modal(&self) -> Option<&ModalPrompt> {
        self.modal.prompt()
    }

    pub fn active_tool(&self) -> Option<Command> {
        self.active
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}

fn run_validated(tool: &dyn Tool, raw: &RawInput, session: &mut Session) -> Report {
    let result = validate(tool.fields(), raw)
        .map_err(ToolError::from)
        .and_then(|values| tool.execute(&values, session));
    into_report(tool, result)
}

fn into_report(tool: &dyn Tool, result: Result<Report, ToolError>) -> Report {
    match result {
        Ok(report) => report,
        Err(e) => {
            debug!(tool = tool.command().id(), error = %e, "input rejected");
            Report::failure(Some(tool.command()), tool.title(), e.to_string())
        }
    }
}
