//! # TitleBar Component
//!
//! Top status bar: which engine podterm talks to and the latest status
//! (container count, refresh failures).
//!
//! Stateless. It receives all data as props and renders one line:
//!
//! 1. **Status message**: `"podterm (podman: http://localhost:8888) | 3 containers"`
//! 2. **Default**: `"podterm (podman: http://localhost:8888)"`

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;

pub struct TitleBar {
    /// Engine kind, e.g. "podman"
    pub engine_name: String,
    /// Base URL of the engine API.
    pub engine_url: String,
    /// Status message (e.g., "Connecting...", "3 containers")
    pub status_message: String,
}

impl TitleBar {
    pub fn new(engine_name: String, engine_url: String, status_message: String) -> Self {
        Self {
            engine_name,
            engine_url,
            status_message,
        }
    }

    fn text(&self) -> String {
        if self.status_message.is_empty() {
            format!("podterm ({}: {})", self.engine_name, self.engine_url)
        } else {
            format!(
                "podterm ({}: {}) | {}",
                self.engine_name, self.engine_url, self.status_message
            )
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(
            Span::styled(self.text(), Style::default().add_modifier(Modifier::BOLD)),
            area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn rendered(title_bar: &mut TitleBar) -> String {
        let backend = TestBackend::new(80, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                title_bar.render(f, f.area());
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_title_bar_with_status_message() {
        let mut title_bar = TitleBar::new(
            "podman".to_string(),
            "http://localhost:8888".to_string(),
            "3 containers".to_string(),
        );
        let text = rendered(&mut title_bar);

        assert!(text.contains("podterm"));
        assert!(text.contains("http://localhost:8888"));
        assert!(text.contains("| 3 containers"));
    }

    #[test]
    fn test_title_bar_default_no_status() {
        let mut title_bar = TitleBar::new(
            "podman".to_string(),
            "http://localhost:8888".to_string(),
            "".to_string(),
        );
        let text = rendered(&mut title_bar);

        assert!(text.contains("podterm (podman: http://localhost:8888)"));
        assert!(!text.contains('|'));
    }

    #[test]
    fn test_title_bar_props_are_mutable() {
        let mut title_bar = TitleBar::new("podman".to_string(), "http://a".to_string(), "".to_string());
        title_bar.status_message = "refresh failed: connection refused".to_string();
        let text = rendered(&mut title_bar);

        assert!(text.contains("refresh failed: connection refused"));
    }
}
