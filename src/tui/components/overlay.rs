//! # Overlay Geometry
//!
//! Shared placement and chrome for the modal dialogs drawn over the
//! container list.

use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Padding};

use crate::tui::style::DialogStyle;

/// Compute a centered rect using percentage of the outer rect.
pub fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}

/// A `width`×`height` rect centered in `outer`, shrunk to fit.
pub fn centered_fixed(width: u16, height: u16, outer: Rect) -> Rect {
    let width = width.min(outer.width);
    let height = height.min(outer.height);
    Rect {
        x: outer.x + (outer.width - width) / 2,
        y: outer.y + (outer.height - height) / 2,
        width,
        height,
    }
}

/// Bordered dialog frame with a centered title and an optional help line
/// along the bottom border.
pub fn dialog_block<'a>(title: &str, help: Option<&'a str>, style: &DialogStyle) -> Block<'a> {
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(style.border_style())
        .title(format!(" {title} "))
        .title_alignment(Alignment::Center)
        .padding(Padding::horizontal(1))
        .style(style.base());
    if let Some(help) = help {
        block = block.title_bottom(Line::from(help).centered());
    }
    block
}
