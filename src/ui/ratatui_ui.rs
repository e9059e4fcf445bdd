//! Full-screen TUI built on ratatui: tool menu on the left, output panel on
//! the right, and a centered modal dialog for tools that take a form.

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use tracing::info;

use crate::dispatcher::Dispatcher;
use crate::modal::ModalPrompt;
use crate::output::OutputPanel;
use crate::tools::ToolCatalog;
use crate::types::{Command, Outcome, RawInput, Report};
use crate::ui::{Palette, Theme, UiExitAction};

const MENU_WIDTH: u16 = 28;
const MODAL_WIDTH: u16 = 56;

// ── Terminal lifecycle ──────────────────────────────────────

struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = crossterm::execute!(std::io::stdout(), crossterm::event::DisableMouseCapture);
        ratatui::restore();
    }
}

// ── Modal form buffers ──────────────────────────────────────

/// Text typed into the open modal, one buffer per field.
struct ModalForm {
    values: Vec<String>,
    focus: usize,
}

impl ModalForm {
    fn new(len: usize) -> Self {
        Self {
            values: vec![String::new(); len],
            focus: 0,
        }
    }

    fn focus_next(&mut self) {
        if !self.values.is_empty() {
            self.focus = (self.focus + 1) % self.values.len();
        }
    }

    fn focus_prev(&mut self) {
        if !self.values.is_empty() {
            self.focus = (self.focus + self.values.len() - 1) % self.values.len();
        }
    }

    fn focused_mut(&mut self) -> Option<&mut String> {
        self.values.get_mut(self.focus)
    }
}

// ── Main UI state ───────────────────────────────────────────

pub struct RatatuiUi {
    dispatcher: Dispatcher<OutputPanel>,
    theme: Theme,
    tick: Duration,
    selected: usize,
    form: Option<ModalForm>,
    /// Typed guess for the number guessing game.
    step_input: String,
    menu_rect: Rect,
    modal_rect: Option<Rect>,
}

impl RatatuiUi {
    pub fn new(dispatcher: Dispatcher<OutputPanel>, theme: Theme, tick: Duration) -> Self {
        Self {
            dispatcher,
            theme,
            tick,
            selected: 0,
            form: None,
            step_input: String::new(),
            menu_rect: Rect::default(),
            modal_rect: None,
        }
    }

    fn open(&mut self, command: Command) {
        self.dispatcher.dispatch(command);
        self.step_input.clear();
        self.form = self
            .dispatcher
            .modal()
            .map(|prompt| ModalForm::new(prompt.fields.len()));
    }

    fn submit_form(&mut self) {
        let Some(form) = self.form.take() else {
            return;
        };
        let Some(prompt) = self.dispatcher.modal() else {
            return;
        };
        let raw: RawInput = prompt
            .fields
            .iter()
            .zip(form.values)
            .map(|(field, value)| (field.name, value))
            .collect();
        self.dispatcher.submit(&raw);
    }

    fn cancel_form(&mut self) {
        self.form = None;
        self.dispatcher.cancel();
    }

    /// Send one action to the running game, keyed by the game's input field.
    fn step(&mut self, value: String) {
        let Some(command) = self.dispatcher.active_tool() else {
            return;
        };
        let Some(field) = ToolCatalog::resolve(command).fields().first() else {
            return;
        };
        self.dispatcher.step(&RawInput::new().with(field.name, value));
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<UiExitAction> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(UiExitAction::Quit);
        }
        if self.form.is_some() {
            self.handle_modal_key(key);
            return None;
        }

        match (self.dispatcher.active_tool(), key.code) {
            (Some(Command::Guess), KeyCode::Char(c)) if c.is_ascii_digit() => {
                self.step_input.push(c);
                return None;
            }
            (Some(Command::Guess), KeyCode::Backspace) => {
                self.step_input.pop();
                return None;
            }
            (Some(Command::Guess), KeyCode::Enter) => {
                let guess = std::mem::take(&mut self.step_input);
                self.step(guess);
                return None;
            }
            (Some(Command::Rps), KeyCode::Char(c @ ('r' | 'p' | 's'))) => {
                let choice = match c {
                    'r' => "rock",
                    'p' => "paper",
                    _ => "scissors",
                };
                self.step(choice.to_string());
                return None;
            }
            _ => {}
        }

        let count = Command::ALL.len();
        match key.code {
            KeyCode::Char('q') => return Some(UiExitAction::Quit),
            KeyCode::Char('t') => {
                self.theme = self.theme.toggled();
                info!(theme = %self.theme, "theme toggled");
            }
            KeyCode::Up | KeyCode::Char('k') => self.selected = (self.selected + count - 1) % count,
            KeyCode::Down | KeyCode::Char('j') => self.selected = (self.selected + 1) % count,
            KeyCode::Home => self.selected = 0,
            KeyCode::End => self.selected = count - 1,
            KeyCode::Enter => self.open(Command::ALL[self.selected]),
            _ => {}
        }
        None
    }

    fn handle_modal_key(&mut self, key: KeyEvent) {
        let Some(form) = self.form.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Esc => self.cancel_form(),
            KeyCode::Enter => self.submit_form(),
            KeyCode::Tab | KeyCode::Down => form.focus_next(),
            KeyCode::BackTab | KeyCode::Up => form.focus_prev(),
            KeyCode::Backspace => {
                if let Some(value) = form.focused_mut() {
                    value.pop();
                }
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                if let Some(value) = form.focused_mut() {
                    value.push(c);
                }
            }
            _ => {}
        }
    }

    /// Left clicks only. Outside an open modal they dismiss it; on a menu
    /// row they open that tool.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        if self.form.is_some() {
            if let Some(rect) = self.modal_rect {
                if !contains(rect, mouse.column, mouse.row) {
                    self.cancel_form();
                }
            }
            return;
        }
        let menu = self.menu_rect;
        if contains(menu, mouse.column, mouse.row) && mouse.row > menu.y {
            let index = (mouse.row - menu.y - 1) as usize;
            if index < Command::ALL.len() {
                self.selected = index;
                self.open(Command::ALL[index]);
            }
        }
    }

    // ── Rendering ───────────────────────────────────────────

    fn draw_ui(&mut self, f: &mut Frame) {
        let palette = self.theme.palette();
        let area = f.area();
        f.render_widget(
            Block::default().style(Style::default().bg(palette.background).fg(palette.foreground)),
            area,
        );

        let rows = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(area);
        let cols = Layout::horizontal([Constraint::Length(MENU_WIDTH), Constraint::Min(20)])
            .split(rows[1]);

        self.render_header(f, rows[0], &palette);
        self.menu_rect = cols[0];
        self.render_menu(f, cols[0], &palette);
        self.render_output(f, cols[1], &palette);
        self.render_footer(f, rows[2], &palette);

        self.modal_rect = match self.dispatcher.modal() {
            Some(prompt) if self.form.is_some() => Some(self.render_modal(f, prompt, &palette)),
            _ => None,
        };
    }

    fn render_header(&self, f: &mut Frame, area: Rect, palette: &Palette) {
        let line = Line::from(vec![
            Span::styled(
                " Mini Tools ",
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(
                    "│ session {} since {} ",
                    self.dispatcher.session().id(),
                    self.dispatcher.session().created_at()
                ),
                Style::default().fg(palette.muted),
            ),
        ]);
        let theme = Paragraph::new(Line::from(Span::styled(
            format!("{} ", self.theme.label()),
            Style::default().fg(palette.accent),
        )))
        .alignment(Alignment::Right);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.muted));
        let inner = block.inner(area);
        f.render_widget(block, area);
        f.render_widget(Paragraph::new(line), inner);
        f.render_widget(theme, inner);
    }

    fn render_menu(&self, f: &mut Frame, area: Rect, palette: &Palette) {
        let lines: Vec<Line> = Command::ALL
            .iter()
            .enumerate()
            .map(|(i, command)| {
                if i == self.selected {
                    Line::from(Span::styled(
                        format!("▶ {}", command.label()),
                        Style::default()
                            .bg(palette.selection_bg)
                            .fg(palette.selection_fg)
                            .add_modifier(Modifier::BOLD),
                    ))
                } else {
                    Line::from(Span::raw(format!("  {}", command.label())))
                }
            })
            .collect();

        let menu = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.muted))
                .title(" Tools "),
        );
        f.render_widget(menu, area);
    }

    fn render_output(&self, f: &mut Frame, area: Rect, palette: &Palette) {
        let panel = self.dispatcher.sink();
        let mut lines: Vec<Line> = Vec::new();
        if panel.is_empty() {
            lines.push(Line::from(Span::styled(
                "Pick a tool from the menu and press Enter.",
                Style::default().fg(palette.muted),
            )));
        }
        for report in panel.reports() {
            lines.extend(report_lines(report, palette));
        }

        match self.dispatcher.active_tool() {
            Some(Command::Guess) => {
                let attempts = self
                    .dispatcher
                    .session()
                    .guess_game()
                    .map_or(0, |game| game.attempts());
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("Guess #{} > ", attempts + 1),
                        Style::default().fg(palette.accent),
                    ),
                    Span::raw(format!("{}_", self.step_input)),
                ]));
            }
            Some(Command::Rps) => lines.push(Line::from(Span::styled(
                "Press r for rock, p for paper, s for scissors.",
                Style::default().fg(palette.accent),
            ))),
            _ => {}
        }

        let output = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(palette.muted))
                    .title(" Output "),
            );
        f.render_widget(output, area);
    }

    fn render_footer(&self, f: &mut Frame, area: Rect, palette: &Palette) {
        let help = if self.form.is_some() {
            " Tab next field  Enter submit  Esc cancel"
        } else {
            " ↑/↓ select  Enter open  t theme  q quit"
        };
        f.render_widget(
            Paragraph::new(Span::styled(help, Style::default().fg(palette.muted))),
            area,
        );
    }

    /// Draw the dialog centered on screen; returns where it landed.
    fn render_modal(&self, f: &mut Frame, prompt: &ModalPrompt, palette: &Palette) -> Rect {
        let area = f.area();
        let mut lines: Vec<Line> = prompt
            .notes
            .iter()
            .map(|note| {
                Line::from(Span::styled(
                    note.clone(),
                    Style::default().fg(palette.muted),
                ))
            })
            .collect();
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }

        let focus = self.form.as_ref().map_or(0, |form| form.focus);
        for (i, field) in prompt.fields.iter().enumerate() {
            let value = self
                .form
                .as_ref()
                .and_then(|form| form.values.get(i))
                .map(String::as_str)
                .unwrap_or("");
            let shown = if field.is_secret() {
                "*".repeat(value.chars().count())
            } else {
                value.to_string()
            };
            let (label_style, cursor) = if i == focus {
                (
                    Style::default()
                        .fg(palette.accent)
                        .add_modifier(Modifier::BOLD),
                    "_",
                )
            } else {
                (Style::default().fg(palette.foreground), "")
            };
            lines.push(Line::from(vec![
                Span::styled(format!("{}: ", field.label), label_style),
                Span::raw(format!("{}{}", shown, cursor)),
            ]));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Enter submit  Esc cancel",
            Style::default().fg(palette.muted),
        )));

        let popup_h = (lines.len() as u16 + 2).min(area.height);
        let popup_w = MODAL_WIDTH.min(area.width);
        let popup_area = Rect {
            x: area.x + (area.width - popup_w) / 2,
            y: area.y + (area.height - popup_h) / 2,
            width: popup_w,
            height: popup_h,
        };

        f.render_widget(Clear, popup_area);
        let popup = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .style(Style::default().bg(palette.background).fg(palette.foreground))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(palette.accent))
                    .title(format!(" {} ", prompt.title))
                    .title_style(
                        Style::default()
                            .fg(palette.accent)
                            .add_modifier(Modifier::BOLD),
                    ),
            );
        f.render_widget(popup, popup_area);
        popup_area
    }

    // ── Event loop ──────────────────────────────────────────

    pub fn run(mut self) -> Result<UiExitAction> {
        crossterm::execute!(std::io::stdout(), crossterm::event::EnableMouseCapture)?;
        let mut terminal = ratatui::init();
        let _guard = TerminalGuard;
        info!(session = %self.dispatcher.session().id(), "terminal ui started");

        loop {
            terminal.draw(|f| self.draw_ui(f))?;
            if !event::poll(self.tick)? {
                continue;
            }
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if let Some(action) = self.handle_key(key) {
                        info!("terminal ui closed");
                        return Ok(action);
                    }
                }
                Event::Mouse(mouse) => self.handle_mouse(mouse),
                _ => {}
            }
        }
    }
}

// ── Helpers ─────────────────────────────────────────────────

fn report_lines(report: &Report, palette: &Palette) -> Vec<Line<'static>> {
    let (marker, color) = match report.outcome() {
        Outcome::Success => ("✓ ", palette.success),
        Outcome::Failure => ("⚠ ", palette.failure),
        Outcome::Prompt => ("", palette.accent),
        Outcome::Hint => ("→ ", palette.hint),
    };
    let mut lines = vec![Line::from(Span::styled(
        format!("{}{}", marker, report.title()),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))];
    lines.extend(
        report
            .lines()
            .iter()
            .map(|line| Line::from(format!("  {}", line))),
    );
    lines.push(Line::from(""));
    lines
}

fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x && column < rect.x + rect.width && row >= rect.y && row < rect.y + rect.height
}
