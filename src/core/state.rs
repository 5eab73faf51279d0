//! # Application State
//!
//! Core business state for podterm. This module contains domain logic only,
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── engine: Arc<dyn EngineClient>       // remote engine
//! ├── engine_url: String                  // shown in the title bar
//! ├── containers: Vec<ContainerSummary>   // last refresh
//! ├── selection: SelectionContext         // selected container
//! ├── feedback: Feedback                  // dialog content slots
//! ├── pending: PendingConfirmation        // rm / prune awaiting yes
//! ├── status_message: String              // status bar text
//! ├── running: Vec<Command>               // commands still running, oldest first
//! └── create_loading: bool                // create dialog data on its way
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::sync::Arc;

use crate::core::command::{Command, PendingConfirmation};
use crate::core::feedback::Feedback;
use crate::engine::{ContainerSummary, EngineClient};

/// The container the list view has selected. Empty when the list is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionContext {
    pub id: String,
    pub name: String,
}

impl SelectionContext {
    pub fn of(container: &ContainerSummary) -> Self {
        Self {
            id: container.id.clone(),
            name: container.display_name().to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_empty()
    }
}

pub struct App {
    pub engine: Arc<dyn EngineClient>,
    pub engine_url: String,
    pub containers: Vec<ContainerSummary>,
    pub selection: SelectionContext,
    pub feedback: Feedback,
    pub pending: PendingConfirmation,
    pub status_message: String,
    pub running: Vec<Command>,
    /// Set while `Job::LoadReferenceData` runs, so `c` cannot stack loads.
    pub create_loading: bool,
}

impl App {
    pub fn new(engine: Arc<dyn EngineClient>, engine_url: String) -> Self {
        Self {
            engine,
            engine_url,
            containers: Vec::new(),
            selection: SelectionContext::default(),
            feedback: Feedback::default(),
            pending: PendingConfirmation::None,
            status_message: String::from("Connecting..."),
            running: Vec::new(),
            create_loading: false,
        }
    }

    /// Commands dispatched and not yet finished.
    pub fn in_flight(&self) -> usize {
        self.running.len()
    }

    /// Row of the selected container in `containers`.
    pub fn selected_index(&self) -> Option<usize> {
        if self.selection.is_empty() {
            return None;
        }
        self.containers
            .iter()
            .position(|c| c.id == self.selection.id)
    }
}
