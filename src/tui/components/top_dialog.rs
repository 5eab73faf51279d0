//! # Top Dialog
//!
//! The process table of `podman container top`, one row per process with
//! the engine's column titles as the header.

use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Clear, Row, Table, TableState};
use unicode_width::UnicodeWidthStr;

use crate::core::feedback::TopView;
use crate::tui::event::TuiEvent;
use crate::tui::style::DialogStyle;

use super::overlay::{centered_rect, dialog_block};

const HELP: &str = " ↑↓ select  Enter/Esc close ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopEvent {
    Dismiss,
}

#[derive(Default)]
pub struct TopDialogState {
    pub table_state: TableState,
    rows: usize,
    /// Sequence number of the view on screen.
    shown: Option<u64>,
}

impl TopDialogState {
    pub fn sync(&mut self, view: Option<&TopView>) {
        match view {
            Some(view) => {
                self.rows = view.report.processes.len();
                if self.shown != Some(view.seq) {
                    self.shown = Some(view.seq);
                    self.table_state = TableState::default();
                    if self.rows > 0 {
                        self.table_state.select(Some(0));
                    }
                }
            }
            None => self.shown = None,
        }
    }

    pub fn handle_event(&mut self, event: &TuiEvent) -> Option<TopEvent> {
        let last = self.rows.saturating_sub(1);
        let selected = self.table_state.selected().unwrap_or(0);
        match event {
            TuiEvent::Escape | TuiEvent::Enter => return Some(TopEvent::Dismiss),
            TuiEvent::Up => self.table_state.select(Some(selected.saturating_sub(1))),
            TuiEvent::Down => self.table_state.select(Some((selected + 1).min(last))),
            TuiEvent::Home => self.table_state.select(Some(0)),
            TuiEvent::End => self.table_state.select(Some(last)),
            _ => {}
        }
        None
    }
}

/// Transient render wrapper for the top table.
pub struct TopDialog<'a> {
    state: &'a mut TopDialogState,
    view: &'a TopView,
    style: &'a DialogStyle,
}

impl<'a> TopDialog<'a> {
    pub fn new(state: &'a mut TopDialogState, view: &'a TopView, style: &'a DialogStyle) -> Self {
        Self { state, view, style }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(90, 80, area);
        frame.render_widget(Clear, overlay);

        let report = &self.view.report;
        let widths: Vec<Constraint> = (0..report.titles.len())
            .map(|col| {
                let widest = report
                    .processes
                    .iter()
                    .filter_map(|row| row.get(col))
                    .chain(std::iter::once(&report.titles[col]))
                    .map(|cell| cell.width())
                    .max()
                    .unwrap_or(0);
                Constraint::Length(widest as u16)
            })
            .collect();

        let header = Row::new(report.titles.iter().map(String::as_str))
            .style(self.style.base().add_modifier(Modifier::BOLD));
        let rows = report
            .processes
            .iter()
            .map(|process| Row::new(process.iter().map(String::as_str)));

        let table = Table::new(rows, widths)
            .header(header)
            .column_spacing(2)
            .style(self.style.base())
            .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .block(dialog_block(&self.view.title, Some(HELP), self.style));
        frame.render_stateful_widget(table, overlay, &mut self.state.table_state);
    }
}
