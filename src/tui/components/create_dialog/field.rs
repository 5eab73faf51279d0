//! # Field Registry
//!
//! The typed input slots of the create dialog: single-line text inputs,
//! drop-downs and checkboxes. Pages reference fields by `FieldId`; the
//! registry owns them.

use log::warn;
use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::tui::event::TuiEvent;
use crate::tui::style::DialogStyle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    Name,
    Image,
    Pod,
    Labels,
    Remove,
    Hostname,
    IpAddress,
    MacAddress,
    Network,
    Publish,
    PublishAll,
    Expose,
    DnsServers,
    DnsOptions,
    DnsSearch,
    Volume,
    VolumeDest,
    ImageVolume,
}

/// Single-line editable text with a character cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    value: String,
    /// Cursor position in chars, `0..=value.chars().count()`.
    cursor: usize,
}

impl TextInput {
    pub fn value(&self) -> &str {
        &self.value
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    fn insert_str(&mut self, text: &str) {
        let at = self.byte_index(self.cursor);
        self.value.insert_str(at, text);
        self.cursor += text.chars().count();
    }

    /// Returns whether the key was consumed.
    pub fn handle(&mut self, event: &TuiEvent) -> bool {
        let len = self.value.chars().count();
        match event {
            TuiEvent::InputChar(c) => {
                self.insert_str(c.encode_utf8(&mut [0; 4]));
            }
            TuiEvent::Paste(text) => {
                let single_line: String = text.chars().filter(|c| !c.is_control()).collect();
                self.insert_str(&single_line);
            }
            TuiEvent::Backspace if self.cursor > 0 => {
                let at = self.byte_index(self.cursor - 1);
                self.value.remove(at);
                self.cursor -= 1;
            }
            TuiEvent::Delete if self.cursor < len => {
                let at = self.byte_index(self.cursor);
                self.value.remove(at);
            }
            TuiEvent::Left => self.cursor = self.cursor.saturating_sub(1),
            TuiEvent::Right => self.cursor = (self.cursor + 1).min(len),
            TuiEvent::Home => self.cursor = 0,
            TuiEvent::End => self.cursor = len,
            TuiEvent::Backspace | TuiEvent::Delete => {}
            _ => return false,
        }
        true
    }

    /// Display width of the text before the cursor.
    pub fn cursor_column(&self) -> usize {
        self.value[..self.byte_index(self.cursor)].width()
    }
}

/// Drop-down: a list of options with slot 0 reserved for the empty placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Select {
    options: Vec<String>,
    selected: usize,
}

impl Default for Select {
    fn default() -> Self {
        Self {
            options: vec![String::new()],
            selected: 0,
        }
    }
}

impl Select {
    /// Replaces the options with `[""] + items` and selects the placeholder.
    pub fn set_options(&mut self, items: impl IntoIterator<Item = String>) {
        self.options = std::iter::once(String::new()).chain(items).collect();
        self.selected = 0;
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn set_selected(&mut self, index: usize) {
        if index < self.options.len() {
            self.selected = index;
        } else {
            warn!("Option {index} out of range ({} options)", self.options.len());
        }
    }

    pub fn selected_text(&self) -> &str {
        self.options
            .get(self.selected)
            .map(String::as_str)
            .unwrap_or_default()
    }

    fn handle(&mut self, event: &TuiEvent) -> bool {
        let last = self.options.len().saturating_sub(1);
        match event {
            TuiEvent::Down | TuiEvent::Right => self.selected = (self.selected + 1).min(last),
            TuiEvent::Up | TuiEvent::Left => self.selected = self.selected.saturating_sub(1),
            TuiEvent::Home => self.selected = 0,
            TuiEvent::End => self.selected = last,
            _ => return false,
        }
        true
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text(TextInput),
    Select(Select),
    Toggle(bool),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub label: &'static str,
    pub kind: FieldKind,
    /// Disabled fields are skipped by Tab and ignore input.
    pub enabled: bool,
}

impl Field {
    pub fn text(label: &'static str) -> Self {
        Self::new(label, FieldKind::Text(TextInput::default()))
    }

    pub fn select(label: &'static str) -> Self {
        Self::new(label, FieldKind::Select(Select::default()))
    }

    pub fn toggle(label: &'static str) -> Self {
        Self::new(label, FieldKind::Toggle(false))
    }

    fn new(label: &'static str, kind: FieldKind) -> Self {
        Self {
            label,
            kind,
            enabled: true,
        }
    }

    /// Clears text, unchecks toggles and moves drop-downs to the placeholder.
    pub fn reset(&mut self) {
        match &mut self.kind {
            FieldKind::Text(input) => *input = TextInput::default(),
            FieldKind::Select(select) => select.selected = 0,
            FieldKind::Toggle(checked) => *checked = false,
        }
    }

    pub fn text_value(&self) -> &str {
        match &self.kind {
            FieldKind::Text(input) => input.value(),
            _ => "",
        }
    }

    pub fn selected(&self) -> usize {
        match &self.kind {
            FieldKind::Select(select) => select.selected(),
            _ => 0,
        }
    }

    pub fn checked(&self) -> bool {
        matches!(self.kind, FieldKind::Toggle(true))
    }

    /// The field's own key handling. Returns whether the key was consumed.
    pub fn handle_event(&mut self, event: &TuiEvent) -> bool {
        if !self.enabled {
            return false;
        }
        match &mut self.kind {
            FieldKind::Text(input) => input.handle(event),
            FieldKind::Select(select) => select.handle(event),
            FieldKind::Toggle(checked) => match event {
                TuiEvent::InputChar(' ') | TuiEvent::Enter => {
                    *checked = !*checked;
                    true
                }
                _ => false,
            },
        }
    }

    /// Draws `label` right-padded to `label_width`, then the input widget.
    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        label_width: u16,
        focused: bool,
        style: &DialogStyle,
    ) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let label_style = if self.enabled {
            style.base()
        } else {
            style.base().fg(style.muted)
        };
        let label = format!("{:<width$}", self.label, width = label_width as usize);
        let input_x = area.x + (label.width() as u16).min(area.width);
        let input_width = area.right().saturating_sub(input_x);
        let input_style = if self.enabled {
            style.input(focused)
        } else {
            Style::default().fg(style.muted).bg(style.background)
        };

        let widget: Span = match &self.kind {
            FieldKind::Text(input) => {
                let width = input_width as usize;
                let value = visible_tail(input.value(), width.saturating_sub(1));
                if focused && input_width > 0 {
                    let skipped = input.value().width() - value.width();
                    let col = input.cursor_column().saturating_sub(skipped) as u16;
                    frame.set_cursor_position(Position::new(
                        input_x + col.min(input_width - 1),
                        area.y,
                    ));
                }
                Span::styled(format!("{value:<width$}"), input_style)
            }
            FieldKind::Select(select) => {
                let text = format!(" {} ▼", select.selected_text());
                Span::styled(
                    format!("{text:<width$}", width = input_width as usize),
                    input_style,
                )
            }
            FieldKind::Toggle(checked) => {
                let mark = if *checked { "[X]" } else { "[ ]" };
                Span::styled(mark, input_style)
            }
        };

        let line = Line::from(vec![Span::styled(label, label_style), widget]);
        frame.render_widget(Paragraph::new(line).style(style.base()), area);
    }
}

/// The longest suffix of `text` whose display width fits in `max`.
pub fn visible_tail(text: &str, max: usize) -> &str {
    if text.width() <= max {
        return text;
    }
    let mut start = text.len();
    let mut width = 0;
    for (i, c) in text.char_indices().rev() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if width + w > max {
            break;
        }
        width += w;
        start = i;
    }
    &text[start..]
}

/// Ordered catalog of fields, in registration order.
#[derive(Debug, Default)]
pub struct FieldRegistry {
    fields: Vec<(FieldId, Field)>,
}

impl FieldRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `field` under `id`. A second registration replaces the first.
    pub fn register(&mut self, id: FieldId, field: Field) {
        match self.get_mut(id) {
            Some(existing) => {
                warn!("Field {id:?} registered twice");
                *existing = field;
            }
            None => self.fields.push((id, field)),
        }
    }

    pub fn get(&self, id: FieldId) -> Option<&Field> {
        self.fields.iter().find(|(f, _)| *f == id).map(|(_, field)| field)
    }

    pub fn get_mut(&mut self, id: FieldId) -> Option<&mut Field> {
        self.fields
            .iter_mut()
            .find(|(f, _)| *f == id)
            .map(|(_, field)| field)
    }

    pub fn is_enabled(&self, id: FieldId) -> bool {
        self.get(id).is_some_and(|f| f.enabled)
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Field> {
        self.fields.iter_mut().map(|(_, field)| field)
    }

    pub fn text(&self, id: FieldId) -> &str {
        self.get(id).map(Field::text_value).unwrap_or_default()
    }

    pub fn selected(&self, id: FieldId) -> usize {
        self.get(id).map(Field::selected).unwrap_or_default()
    }

    pub fn checked(&self, id: FieldId) -> bool {
        self.get(id).is_some_and(Field::checked)
    }

    pub fn set_options(&mut self, id: FieldId, items: impl IntoIterator<Item = String>) {
        match self.get_mut(id).map(|f| &mut f.kind) {
            Some(FieldKind::Select(select)) => select.set_options(items),
            _ => warn!("Field {id:?} is not a drop-down"),
        }
    }
}
