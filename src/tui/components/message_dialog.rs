//! # Message Dialog
//!
//! Scrollable read-only text: inspect output, logs, diff and port listings,
//! create warnings and the system prune report.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `MessageDialogState` lives in `TuiState` and keeps the scroll offset
//! - `MessageDialog` is created each frame with the report from `Feedback`

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use ratatui::text::{Line, Text};
use ratatui::widgets::{Clear, Paragraph};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};
use unicode_width::UnicodeWidthStr;

use crate::core::feedback::MessageReport;
use crate::tui::event::TuiEvent;
use crate::tui::style::DialogStyle;

use super::overlay::{centered_rect, dialog_block};

const HELP: &str = " ↑↓ PgUp PgDn scroll  Enter/Esc close ";
const HELP_QUEUED: &str = " ↑↓ PgUp PgDn scroll  Enter/Esc next ";

/// Events emitted by the message dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageEvent {
    Dismiss,
}

#[derive(Default)]
pub struct MessageDialogState {
    pub scroll_state: ScrollViewState,
    /// Sequence number of the report on screen.
    shown: Option<u64>,
    /// Jump to the last line on the next render.
    follow_end: bool,
    content_height: u16,
    viewport_height: u16,
}

impl MessageDialogState {
    /// Tracks the report slot. A report not seen before starts at the top,
    /// or at the bottom when it asks for it.
    pub fn sync(&mut self, report: Option<&MessageReport>) {
        match report {
            Some(report) if self.shown != Some(report.seq) => {
                self.shown = Some(report.seq);
                self.follow_end = report.scroll_to_end;
                self.scroll_state.set_offset(Position::ORIGIN);
            }
            Some(_) => {}
            None => self.shown = None,
        }
    }

    pub fn handle_event(&mut self, event: &TuiEvent) -> Option<MessageEvent> {
        match event {
            TuiEvent::Escape | TuiEvent::Enter => return Some(MessageEvent::Dismiss),
            TuiEvent::Up => self.scroll_state.scroll_up(),
            TuiEvent::Down => self.scroll_state.scroll_down(),
            TuiEvent::PageUp => self.scroll_state.scroll_page_up(),
            TuiEvent::PageDown => self.scroll_state.scroll_page_down(),
            TuiEvent::Home => self.scroll_state.scroll_to_top(),
            TuiEvent::End => self.follow_end = true,
            _ => {}
        }
        self.clamp();
        None
    }

    fn max_offset(&self) -> u16 {
        self.content_height.saturating_sub(self.viewport_height)
    }

    fn clamp(&mut self) {
        let max = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y > max {
            self.scroll_state.set_offset(Position { x: 0, y: max });
        }
    }
}

/// Transient render wrapper for the message dialog.
pub struct MessageDialog<'a> {
    state: &'a mut MessageDialogState,
    report: &'a MessageReport,
    /// Reports waiting behind this one.
    queued: usize,
    style: &'a DialogStyle,
}

impl<'a> MessageDialog<'a> {
    pub fn new(
        state: &'a mut MessageDialogState,
        report: &'a MessageReport,
        style: &'a DialogStyle,
    ) -> Self {
        Self {
            state,
            report,
            queued: 0,
            style,
        }
    }

    pub fn queued(mut self, queued: usize) -> Self {
        self.queued = queued;
        self
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(80, 80, area);
        frame.render_widget(Clear, overlay);

        let title = match self.queued {
            0 => self.report.title.clone(),
            n => format!("{} (+{n} more)", self.report.title),
        };
        let help = if self.queued == 0 { HELP } else { HELP_QUEUED };
        let block = dialog_block(&title, Some(help), self.style);
        let inner = block.inner(overlay);
        frame.render_widget(block, overlay);

        let lines: Vec<Line> = self.report.text.lines().map(Line::raw).collect();
        let content_height = lines.len() as u16;
        let content_width = self
            .report
            .text
            .lines()
            .map(|l| l.width())
            .max()
            .unwrap_or(0)
            .max(inner.width.saturating_sub(1) as usize) as u16;

        self.state.content_height = content_height;
        self.state.viewport_height = inner.height;
        if self.state.follow_end {
            let y = self.state.max_offset();
            self.state.scroll_state.set_offset(Position { x: 0, y });
            self.state.follow_end = false;
        }
        self.state.clamp();

        let mut scroll_view = ScrollView::new(Size::new(content_width, content_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);
        scroll_view.render_widget(
            Paragraph::new(Text::from(lines)).style(self.style.base()),
            Rect::new(0, 0, content_width, content_height),
        );
        frame.render_stateful_widget(scroll_view, inner, &mut self.state.scroll_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn report(seq: u64, text: &str, scroll_to_end: bool) -> MessageReport {
        MessageReport {
            seq,
            title: "podman container logs".into(),
            text: text.into(),
            scroll_to_end,
        }
    }

    fn draw(state: &mut MessageDialogState, report: &MessageReport) -> String {
        let backend = TestBackend::new(60, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        let style = DialogStyle::default();
        terminal
            .draw(|f| MessageDialog::new(state, report, &style).render(f, f.area()))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn shows_title_and_text() {
        let report = report(1, "INFO ok\nWARN slow", false);
        let mut state = MessageDialogState::default();
        state.sync(Some(&report));
        let screen = draw(&mut state, &report);
        assert!(screen.contains("podman container logs"));
        assert!(screen.contains("INFO ok"));
        assert!(screen.contains("WARN slow"));
    }

    #[test]
    fn scroll_to_end_starts_at_last_line() {
        let text: Vec<String> = (0..100).map(|i| format!("line {i}")).collect();
        let report = report(1, &text.join("\n"), true);
        let mut state = MessageDialogState::default();
        state.sync(Some(&report));
        let screen = draw(&mut state, &report);
        assert!(screen.contains("line 99"));
        assert!(!screen.contains("line 0 "));
        assert!(state.scroll_state.offset().y > 0);
    }

    #[test]
    fn new_report_resets_offset() {
        let text: Vec<String> = (0..100).map(|i| format!("line {i}")).collect();
        let long = report(1, &text.join("\n"), true);
        let mut state = MessageDialogState::default();
        state.sync(Some(&long));
        draw(&mut state, &long);

        state.sync(None);
        let short = report(2, "inspect output", false);
        state.sync(Some(&short));
        assert_eq!(state.scroll_state.offset().y, 0);
    }

    #[test]
    fn replacing_an_open_report_rearms_scroll_to_end() {
        let inspect = MessageReport {
            title: "podman container inspect".into(),
            ..report(1, "{}", false)
        };
        let mut state = MessageDialogState::default();
        state.sync(Some(&inspect));
        draw(&mut state, &inspect);

        // The next report lands without the slot closing in between.
        let text: Vec<String> = (0..100).map(|i| format!("line {i}")).collect();
        let logs = report(2, &text.join("\n"), true);
        state.sync(Some(&logs));
        let screen = draw(&mut state, &logs);
        assert!(screen.contains("line 99"));
    }

    #[test]
    fn redraw_of_same_report_keeps_offset() {
        let text: Vec<String> = (0..100).map(|i| format!("line {i}")).collect();
        let report = report(1, &text.join("\n"), false);
        let mut state = MessageDialogState::default();
        state.sync(Some(&report));
        draw(&mut state, &report);
        state.handle_event(&TuiEvent::PageDown);
        let offset = state.scroll_state.offset().y;
        assert!(offset > 0);

        state.sync(Some(&report));
        draw(&mut state, &report);
        assert_eq!(state.scroll_state.offset().y, offset);
    }

    #[test]
    fn queued_reports_show_in_title() {
        let report = report(1, "INFO ok", false);
        let mut state = MessageDialogState::default();
        state.sync(Some(&report));
        let backend = TestBackend::new(60, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        let style = DialogStyle::default();
        terminal
            .draw(|f| {
                MessageDialog::new(&mut state, &report, &style)
                    .queued(2)
                    .render(f, f.area())
            })
            .unwrap();
        let screen: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(screen.contains("(+2 more)"));
        assert!(screen.contains("Enter/Esc next"));
    }

    #[test]
    fn scrolling_is_clamped_to_content() {
        let report = report(1, "one\ntwo", false);
        let mut state = MessageDialogState::default();
        state.sync(Some(&report));
        draw(&mut state, &report);
        for _ in 0..10 {
            state.handle_event(&TuiEvent::Down);
        }
        assert_eq!(state.scroll_state.offset().y, 0);
    }

    #[test]
    fn enter_and_escape_dismiss() {
        let mut state = MessageDialogState::default();
        assert_eq!(
            state.handle_event(&TuiEvent::Escape),
            Some(MessageEvent::Dismiss)
        );
        assert_eq!(
            state.handle_event(&TuiEvent::Enter),
            Some(MessageEvent::Dismiss)
        );
        assert_eq!(state.handle_event(&TuiEvent::Down), None);
    }
}
