//! # Input Prompt Dialog
//!
//! One-line text prompt used for the rename target and the image reference
//! to pull. The prompt's wording comes from `Feedback::prompt`; the typed
//! text lives here until it is submitted.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::core::feedback::InputPrompt;
use crate::tui::event::TuiEvent;
use crate::tui::style::DialogStyle;

use super::create_dialog::field::{TextInput, visible_tail};
use super::overlay::{centered_fixed, dialog_block};

const WIDTH: u16 = 64;
const HEIGHT: u16 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptEvent {
    Submit(String),
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PromptFocus {
    Input,
    Button,
}

pub struct PromptDialogState {
    input: TextInput,
    focus: PromptFocus,
    open: bool,
}

impl Default for PromptDialogState {
    fn default() -> Self {
        Self {
            input: TextInput::default(),
            focus: PromptFocus::Input,
            open: false,
        }
    }
}

impl PromptDialogState {
    /// Clears the input whenever a new prompt appears.
    pub fn sync(&mut self, prompt: Option<&InputPrompt>) {
        match prompt {
            Some(_) if !self.open => {
                self.open = true;
                self.input = TextInput::default();
                self.focus = PromptFocus::Input;
            }
            Some(_) => {}
            None => self.open = false,
        }
    }

    pub fn value(&self) -> &str {
        self.input.value()
    }

    pub fn handle_event(&mut self, event: &TuiEvent) -> Option<PromptEvent> {
        match event {
            TuiEvent::Escape => Some(PromptEvent::Cancel),
            TuiEvent::Enter => Some(PromptEvent::Submit(self.input.value().to_string())),
            TuiEvent::Tab | TuiEvent::BackTab => {
                self.focus = match self.focus {
                    PromptFocus::Input => PromptFocus::Button,
                    PromptFocus::Button => PromptFocus::Input,
                };
                None
            }
            _ if self.focus == PromptFocus::Input => {
                self.input.handle(event);
                None
            }
            _ => None,
        }
    }
}

/// Transient render wrapper for the input prompt.
pub struct PromptDialog<'a> {
    state: &'a PromptDialogState,
    prompt: &'a InputPrompt,
    style: &'a DialogStyle,
}

impl<'a> PromptDialog<'a> {
    pub fn new(state: &'a PromptDialogState, prompt: &'a InputPrompt, style: &'a DialogStyle) -> Self {
        Self {
            state,
            prompt,
            style,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let overlay = centered_fixed(WIDTH, HEIGHT, area);
        frame.render_widget(Clear, overlay);

        let block = dialog_block(&self.prompt.title, None, self.style);
        let inner = block.inner(overlay);
        frame.render_widget(block, overlay);

        let [description, _, input_row, _, button_row] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(inner);

        frame.render_widget(
            Paragraph::new(self.prompt.description.as_str()).style(self.style.base()),
            description,
        );

        let label = format!("{}: ", self.prompt.label);
        let label_width = (label.width() as u16).min(input_row.width);
        let input_x = input_row.x + label_width;
        let input_width = input_row.right().saturating_sub(input_x);
        let focused = self.state.focus == PromptFocus::Input;
        let value = visible_tail(self.state.input.value(), (input_width as usize).saturating_sub(1));
        if focused && input_width > 0 {
            let skipped = self.state.input.value().width() - value.width();
            let col = self.state.input.cursor_column().saturating_sub(skipped) as u16;
            frame.set_cursor_position(Position::new(input_x + col.min(input_width - 1), input_row.y));
        }
        let line = Line::from(vec![
            Span::styled(label, self.style.base()),
            Span::styled(
                format!("{value:<width$}", width = input_width as usize),
                self.style.input(focused),
            ),
        ]);
        frame.render_widget(Paragraph::new(line), input_row);

        let button_style = if self.state.focus == PromptFocus::Button {
            self.style.accent
        } else {
            Style::default().fg(self.style.text).bg(self.style.muted)
        };
        let button = Line::from(Span::styled(format!(" {} ", self.prompt.button), button_style))
            .right_aligned();
        frame.render_widget(Paragraph::new(button).style(self.style.base()), button_row);
    }
}
