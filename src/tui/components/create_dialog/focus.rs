//! # Focus Traversal
//!
//! Which element of the create dialog receives keys, and where each key
//! moves it. `transition` is a pure function; the dialog applies the result.
//!
//! ```text
//!            Tab                 Tab                    Tab (after last field)
//! Categories ───▶ Pages ───▶ Field ─▶ … ─▶ Field ──────────────▶ Buttons
//!     ▲                                                             │
//!     └──────────────────────────── Tab ────────────────────────────┘
//! ```
//!
//! BackTab walks the same ring in reverse. Esc cancels from anywhere.

use super::field::{FieldId, FieldRegistry};
use super::pages::CategoryPages;
use crate::tui::event::TuiEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionButton {
    Cancel,
    Create,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusPointer {
    /// The Cancel/Create row.
    Buttons(ActionButton),
    /// The category list on the left.
    Categories,
    /// The active page as a whole.
    Pages,
    /// One field of the active page.
    Field(FieldId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Focus(FocusPointer),
    NextCategory,
    PreviousCategory,
    /// Hand the key to this field and focus it.
    Forward(FieldId),
    Submit,
    Cancel,
    /// Swallowed.
    Ignore,
}

/// Enabled fields of the active page, in declared order.
fn page_fields(pages: &CategoryPages, fields: &FieldRegistry) -> Vec<FieldId> {
    pages
        .active()
        .map(|page| page.fields().filter(|id| fields.is_enabled(*id)).collect())
        .unwrap_or_default()
}

pub fn transition(
    focus: FocusPointer,
    event: &TuiEvent,
    pages: &CategoryPages,
    fields: &FieldRegistry,
) -> Transition {
    use FocusPointer::*;

    if matches!(event, TuiEvent::Escape) {
        return Transition::Cancel;
    }

    let order = page_fields(pages, fields);
    let first = order.first().copied();
    let last = order.last().copied();

    match (focus, event) {
        (Field(current), TuiEvent::Tab) => {
            let next = order
                .iter()
                .position(|f| *f == current)
                .and_then(|i| order.get(i + 1));
            Transition::Focus(next.map_or(Buttons(ActionButton::Create), |f| Field(*f)))
        }
        (Field(current), TuiEvent::BackTab) => {
            let previous = order
                .iter()
                .position(|f| *f == current)
                .and_then(|i| i.checked_sub(1))
                .and_then(|i| order.get(i));
            Transition::Focus(previous.map_or(Pages, |f| Field(*f)))
        }
        (Field(current), _) => Transition::Forward(current),

        (Categories, TuiEvent::Tab) => Transition::Focus(Pages),
        (Categories, TuiEvent::BackTab) => Transition::Focus(Buttons(ActionButton::Create)),
        (Categories, TuiEvent::Down) => Transition::NextCategory,
        (Categories, TuiEvent::Up) => Transition::PreviousCategory,
        (Categories, _) => Transition::Ignore,

        (Pages, TuiEvent::Tab) => {
            Transition::Focus(first.map_or(Buttons(ActionButton::Create), Field))
        }
        (Pages, TuiEvent::BackTab) => Transition::Focus(Categories),
        (Pages, _) => first.map_or(Transition::Ignore, Transition::Forward),

        (Buttons(_), TuiEvent::Tab) => Transition::Focus(Categories),
        (Buttons(_), TuiEvent::BackTab) => Transition::Focus(last.map_or(Pages, Field)),
        (Buttons(ActionButton::Create), TuiEvent::Left) => {
            Transition::Focus(Buttons(ActionButton::Cancel))
        }
        (Buttons(ActionButton::Cancel), TuiEvent::Right) => {
            Transition::Focus(Buttons(ActionButton::Create))
        }
        (Buttons(ActionButton::Create), TuiEvent::Enter) => Transition::Submit,
        (Buttons(ActionButton::Cancel), TuiEvent::Enter) => Transition::Cancel,
        (Buttons(_), _) => Transition::Ignore,
    }
}
