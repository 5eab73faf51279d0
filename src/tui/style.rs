//! # Dialog Styling
//!
//! Colours come from `[ui]` in the config file and are resolved once at
//! startup into a `DialogStyle`, which every dialog receives at
//! construction.

use std::str::FromStr;

use log::warn;
use ratatui::style::{Color, Modifier, Style};

use crate::core::config::StyleConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialogStyle {
    /// Highlight for the active category, the focused field and button.
    pub accent: Style,
    pub background: Color,
    pub border: Color,
    pub text: Color,
    pub muted: Color,
    pub error: Color,
}

impl Default for DialogStyle {
    fn default() -> Self {
        Self::from_config(&StyleConfig::default())
    }
}

impl DialogStyle {
    pub fn from_config(config: &StyleConfig) -> Self {
        let accent_fg = parse_color(&config.accent_fg, Color::White);
        let accent_bg = parse_color(&config.accent_bg, Color::Blue);
        Self {
            accent: Style::default()
                .fg(accent_fg)
                .bg(accent_bg)
                .add_modifier(Modifier::BOLD),
            background: parse_color(&config.dialog_bg, Color::Black),
            border: parse_color(&config.border, Color::Gray),
            text: Color::White,
            muted: Color::DarkGray,
            error: Color::Red,
        }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border).bg(self.background)
    }

    /// Style for an input widget, highlighted when focused.
    pub fn input(&self, focused: bool) -> Style {
        if focused {
            self.accent
        } else {
            Style::default().fg(self.text).bg(Color::DarkGray)
        }
    }
}

fn parse_color(name: &str, fallback: Color) -> Color {
    Color::from_str(name).unwrap_or_else(|_| {
        warn!("Unknown colour {name:?} in config, using {fallback}");
        fallback
    })
}
