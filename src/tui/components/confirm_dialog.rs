//! # Confirm and Error Dialogs
//!
//! The yes/no prompt in front of `rm`, `prune` and `system-prune`, and the
//! error box every failure lands in. Both are small fixed-size overlays.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Clear, Paragraph, Wrap};

use crate::core::feedback::ConfirmPrompt;
use crate::tui::event::TuiEvent;
use crate::tui::style::DialogStyle;

use super::overlay::{centered_fixed, dialog_block};

const CONFIRM_WIDTH: u16 = 60;
const CONFIRM_HEIGHT: u16 = 9;
const ERROR_WIDTH: u16 = 64;
const ERROR_HEIGHT: u16 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmEvent {
    Accept,
    Decline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Choice {
    Yes,
    No,
}

pub struct ConfirmDialogState {
    choice: Choice,
    open: bool,
}

impl Default for ConfirmDialogState {
    fn default() -> Self {
        Self {
            choice: Choice::No,
            open: false,
        }
    }
}

impl ConfirmDialogState {
    /// Every new prompt starts on "No".
    pub fn sync(&mut self, prompt: Option<&ConfirmPrompt>) {
        match prompt {
            Some(_) if !self.open => {
                self.open = true;
                self.choice = Choice::No;
            }
            Some(_) => {}
            None => self.open = false,
        }
    }

    pub fn handle_event(&mut self, event: &TuiEvent) -> Option<ConfirmEvent> {
        match event {
            TuiEvent::Escape | TuiEvent::InputChar('n') => Some(ConfirmEvent::Decline),
            TuiEvent::InputChar('y') => Some(ConfirmEvent::Accept),
            TuiEvent::Enter => Some(match self.choice {
                Choice::Yes => ConfirmEvent::Accept,
                Choice::No => ConfirmEvent::Decline,
            }),
            TuiEvent::Left | TuiEvent::Right | TuiEvent::Tab | TuiEvent::BackTab => {
                self.choice = match self.choice {
                    Choice::Yes => Choice::No,
                    Choice::No => Choice::Yes,
                };
                None
            }
            _ => None,
        }
    }
}

/// Transient render wrapper for the confirmation prompt.
pub struct ConfirmDialog<'a> {
    state: &'a ConfirmDialogState,
    prompt: &'a ConfirmPrompt,
    style: &'a DialogStyle,
}

impl<'a> ConfirmDialog<'a> {
    pub fn new(state: &'a ConfirmDialogState, prompt: &'a ConfirmPrompt, style: &'a DialogStyle) -> Self {
        Self {
            state,
            prompt,
            style,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let overlay = centered_fixed(CONFIRM_WIDTH, CONFIRM_HEIGHT, area);
        frame.render_widget(Clear, overlay);

        let block = dialog_block(&self.prompt.title, None, self.style);
        let inner = block.inner(overlay);
        frame.render_widget(block, overlay);

        let [text, buttons] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);
        frame.render_widget(
            Paragraph::new(self.prompt.text.as_str())
                .style(self.style.base())
                .centered()
                .wrap(Wrap { trim: true }),
            text,
        );

        let button = |label: &'static str, choice: Choice| {
            let style = if self.state.choice == choice {
                self.style.accent
            } else {
                Style::default().fg(self.style.text).bg(self.style.muted)
            };
            Span::styled(format!("  {label}  "), style)
        };
        let line = Line::from(vec![
            button("Yes", Choice::Yes),
            Span::raw("    "),
            button("No", Choice::No),
        ])
        .centered();
        frame.render_widget(Paragraph::new(line).style(self.style.base()), buttons);
    }
}

/// Events emitted by the error dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorEvent {
    Dismiss,
}

pub fn handle_error_event(event: &TuiEvent) -> Option<ErrorEvent> {
    match event {
        TuiEvent::Enter | TuiEvent::Escape => Some(ErrorEvent::Dismiss),
        _ => None,
    }
}

/// Stateless error box.
pub struct ErrorDialog<'a> {
    pub text: &'a str,
    pub style: &'a DialogStyle,
}

impl ErrorDialog<'_> {
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let overlay = centered_fixed(ERROR_WIDTH, ERROR_HEIGHT, area);
        frame.render_widget(Clear, overlay);

        let block = dialog_block("ERROR", Some(" Enter/Esc close "), self.style)
            .border_style(Style::default().fg(self.style.error).bg(self.style.background))
            .title_style(
                Style::default()
                    .fg(self.style.error)
                    .add_modifier(Modifier::BOLD),
            );
        frame.render_widget(
            Paragraph::new(self.text)
                .style(self.style.base())
                .centered()
                .wrap(Wrap { trim: true })
                .block(block),
            overlay,
        );
    }
}
