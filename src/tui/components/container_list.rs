//! # Container List
//!
//! The main view: every container the engine reports, one row each, with the
//! selected row highlighted and a key help line underneath. Selection lives
//! in `App::selection`; this component only draws it.

use chrono::{DateTime, Local, Utc};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table, TableState, Wrap};

use crate::core::command::Command;
use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::style::DialogStyle;

const HEADER: [&str; 6] = ["ID", "IMAGE", "POD", "CREATED", "STATUS", "NAMES"];

/// Transient render wrapper; borrows the app for the frame.
pub struct ContainerList<'a> {
    pub app: &'a App,
    pub style: &'a DialogStyle,
}

impl Component for ContainerList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let help = help_line(self.style);
        let help_height = 2.min(area.height);
        let [table_area, help_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(help_height)]).areas(area);

        let now = Utc::now().timestamp();
        let rows: Vec<Row> = self
            .app
            .containers
            .iter()
            .map(|c| {
                Row::new(vec![
                    c.short_id().to_string(),
                    c.image.clone(),
                    c.pod_name.clone(),
                    format_created(c.created, now),
                    c.status.clone(),
                    c.display_name().to_string(),
                ])
            })
            .collect();

        let widths = [
            Constraint::Length(12),
            Constraint::Fill(3),
            Constraint::Fill(1),
            Constraint::Length(16),
            Constraint::Fill(2),
            Constraint::Fill(2),
        ];
        let title = format!(" CONTAINERS [{}] ", self.app.containers.len());
        let table = Table::new(rows, widths)
            .header(
                Row::new(HEADER)
                    .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            )
            .column_spacing(1)
            .row_highlight_style(self.style.accent)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(self.style.border))
                    .title(title),
            );

        let mut table_state = TableState::default().with_selected(self.app.selected_index());
        frame.render_stateful_widget(table, table_area, &mut table_state);

        if self.app.containers.is_empty() && table_area.height > 3 {
            let empty = Rect::new(table_area.x + 2, table_area.y + 2, table_area.width.saturating_sub(4), 1);
            frame.render_widget(
                Paragraph::new("No containers.").style(Style::default().fg(self.style.muted)),
                empty,
            );
        }

        frame.render_widget(Paragraph::new(help).wrap(Wrap { trim: true }), help_area);
    }
}

/// `s start  S stop  ...` for every command, plus refresh and quit.
fn help_line(style: &DialogStyle) -> Line<'static> {
    let key_style = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let text_style = Style::default().fg(style.muted);
    let mut spans = Vec::new();
    for command in Command::ALL {
        spans.push(Span::styled(command.key().to_string(), key_style));
        spans.push(Span::styled(format!(" {}  ", command.name()), text_style));
    }
    for (key, label) in [("R", "refresh"), ("q", "quit")] {
        spans.push(Span::styled(key, key_style));
        spans.push(Span::styled(format!(" {label}  "), text_style));
    }
    Line::from(spans)
}

/// Relative age for recent containers, a date for older ones.
fn format_created(created: i64, now: i64) -> String {
    if created <= 0 {
        return String::new();
    }
    let age = (now - created).max(0);
    match age {
        0..60 => plural(age, "second"),
        60..3_600 => plural(age / 60, "minute"),
        3_600..86_400 => plural(age / 3_600, "hour"),
        86_400..2_592_000 => plural(age / 86_400, "day"),
        _ => DateTime::<Utc>::from_timestamp(created, 0)
            .unwrap_or_default()
            .with_timezone(&Local)
            .format("%Y-%m-%d")
            .to_string(),
    }
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{n} {unit}s ago")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::SelectionContext;
    use crate::test_support::{container, test_app};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn screen(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn created_is_humanized() {
        let now = 1_700_000_000;
        assert_eq!(format_created(now - 1, now), "1 second ago");
        assert_eq!(format_created(now - 125, now), "2 minutes ago");
        assert_eq!(format_created(now - 3 * 3_600, now), "3 hours ago");
        assert_eq!(format_created(now - 86_400, now), "1 day ago");
        assert_eq!(format_created(0, now), "");
        assert_eq!(format_created(now - 40 * 86_400, now).len(), "2023-10-05".len());
    }

    #[test]
    fn renders_rows_and_help() {
        let (mut app, _engine) = test_app();
        app.containers = vec![
            container("0123456789abcdef", "web"),
            container("fedcba9876543210", "db"),
        ];
        app.selection = SelectionContext::of(&app.containers[1]);

        let backend = TestBackend::new(140, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        let style = DialogStyle::default();
        terminal
            .draw(|f| {
                ContainerList {
                    app: &app,
                    style: &style,
                }
                .render(f, f.area())
            })
            .unwrap();
        let text = screen(&terminal);
        assert!(text.contains("CONTAINERS [2]"));
        assert!(text.contains("0123456789ab"));
        assert!(text.contains("web"));
        assert!(text.contains("db"));
        assert!(text.contains("s start"));
        assert!(text.contains("q quit"));
    }

    #[test]
    fn empty_list_says_so() {
        let (app, _engine) = test_app();
        let backend = TestBackend::new(100, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        let style = DialogStyle::default();
        terminal
            .draw(|f| {
                ContainerList {
                    app: &app,
                    style: &style,
                }
                .render(f, f.area())
            })
            .unwrap();
        assert!(screen(&terminal).contains("No containers."));
    }
}
