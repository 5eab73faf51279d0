//! # Category Page Set
//!
//! Named pages, each an ordered list of fields and spacers. Exactly one page
//! is active; the category list on the left of the dialog mirrors it.

use log::warn;
use ratatui::style::Style;
use ratatui::text::Line;
use unicode_width::UnicodeWidthStr;

use super::field::FieldId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Field(FieldId),
    /// One empty row.
    Spacer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub label: &'static str,
    pub items: Vec<PageItem>,
    /// Column width reserved for field labels on this page.
    pub label_width: u16,
}

impl Page {
    /// Field ids in declared order.
    pub fn fields(&self) -> impl Iterator<Item = FieldId> + '_ {
        self.items.iter().filter_map(|item| match item {
            PageItem::Field(id) => Some(*id),
            PageItem::Spacer => None,
        })
    }
}

#[derive(Debug)]
pub struct CategoryPages {
    pages: Vec<Page>,
    active: usize,
    accent: Style,
    /// Rendered category list, rebuilt on every active-page change.
    category_lines: Vec<Line<'static>>,
}

impl CategoryPages {
    pub fn new(accent: Style) -> Self {
        Self {
            pages: Vec::new(),
            active: 0,
            accent,
            category_lines: Vec::new(),
        }
    }

    /// Registers a page. Labels are unique; a duplicate is ignored.
    pub fn add_page(&mut self, label: &'static str, items: Vec<PageItem>, label_width: u16) {
        if self.pages.iter().any(|p| p.label == label) {
            warn!("Page {label:?} already registered");
            return;
        }
        self.pages.push(Page {
            label,
            items,
            label_width,
        });
        self.refresh_labels();
    }

    /// Makes the page named `label` active. Unknown labels are ignored.
    pub fn switch_to(&mut self, label: &str) {
        if let Some(index) = self.pages.iter().position(|p| p.label == label) {
            self.set_active_index(index);
        }
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    /// Out-of-range indices are ignored.
    pub fn set_active_index(&mut self, index: usize) {
        if index >= self.pages.len() {
            return;
        }
        self.active = index;
        self.refresh_labels();
    }

    pub fn next(&mut self) {
        if !self.pages.is_empty() {
            self.set_active_index((self.active + 1) % self.pages.len());
        }
    }

    pub fn previous(&mut self) {
        if !self.pages.is_empty() {
            let len = self.pages.len();
            self.set_active_index((self.active + len - 1) % len);
        }
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn active(&self) -> Option<&Page> {
        self.pages.get(self.active)
    }

    /// Index of the page that declares `field`.
    pub fn page_of(&self, field: FieldId) -> Option<usize> {
        self.pages.iter().position(|p| p.fields().any(|f| f == field))
    }

    pub fn category_lines(&self) -> &[Line<'static>] {
        &self.category_lines
    }

    /// Width of the category list including marker and padding.
    pub fn category_width(&self) -> u16 {
        let widest = self.pages.iter().map(|p| p.label.width()).max().unwrap_or(0);
        (widest + 4) as u16
    }

    fn refresh_labels(&mut self) {
        let width = self.pages.iter().map(|p| p.label.width()).max().unwrap_or(0);
        self.category_lines = self
            .pages
            .iter()
            .enumerate()
            .map(|(i, page)| {
                let aligned = format!("{:<width$}", page.label);
                if i == self.active {
                    Line::styled(format!("-> {aligned} "), self.accent)
                } else {
                    Line::raw(format!("   {aligned} "))
                }
            })
            .collect();
    }
}
