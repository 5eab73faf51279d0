//! # Progress Indicator
//!
//! A one-line spinner box shown while at least one job is running. It does
//! not capture keys; the list stays usable underneath.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::Component;
use crate::tui::style::DialogStyle;

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub struct ProgressIndicator<'a> {
    pub title: &'a str,
    pub spinner_frame: usize,
    pub style: &'a DialogStyle,
}

impl Component for ProgressIndicator<'_> {
    /// Anchored to the bottom-right corner, above the help line.
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let text = format!(" {} {} ", SPINNER[self.spinner_frame % SPINNER.len()], self.title);
        let width = (text.width() as u16 + 2).min(area.width);
        let height = 3.min(area.height);
        let overlay = Rect {
            x: area.right().saturating_sub(width + 1),
            y: area.bottom().saturating_sub(height + 1),
            width,
            height,
        };
        frame.render_widget(Clear, overlay);
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(text, self.style.base()))).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(self.style.border_style()),
            ),
            overlay,
        );
    }
}
