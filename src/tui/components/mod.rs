//! # TUI Components
//!
//! Every visible surface of the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Receive all data as struct fields and draw it:
//! - `TitleBar`: engine URL and status
//! - `ContainerList`: the container table and key help
//! - `ProgressIndicator`: spinner while jobs run
//! - `ErrorDialog`: the error box
//!
//! ### Stateful Components (Event-Driven)
//!
//! Keep presentation state between frames and emit events on keys:
//! - `ContainerCreateDialog`: the five-page create form
//! - `MessageDialogState`: scroll offset of the message dialog
//! - `TopDialogState`: selected row of the process table
//! - `ConfirmDialogState`: the yes/no choice
//! - `PromptDialogState`: the text typed into an input prompt
//!
//! The feedback dialogs follow the persistent state + transient wrapper
//! pattern: the state struct lives in `TuiState`, the wrapper is built each
//! frame with the content from `core::feedback::Feedback`. Each state has a
//! `sync()` that resets it when its slot goes from empty to filled.
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs             (this file)
//! ├── overlay.rs         (placement helpers shared by dialogs)
//! ├── title_bar.rs
//! ├── container_list.rs
//! ├── progress.rs
//! ├── message_dialog.rs
//! ├── top_dialog.rs
//! ├── confirm_dialog.rs  (confirm + error)
//! ├── prompt_dialog.rs
//! └── create_dialog/     (fields, pages, focus, controller)
//! ```

pub mod confirm_dialog;
pub mod container_list;
pub mod create_dialog;
pub mod message_dialog;
pub mod overlay;
pub mod progress;
pub mod prompt_dialog;
pub mod title_bar;
pub mod top_dialog;

pub use confirm_dialog::{ConfirmDialog, ConfirmDialogState, ConfirmEvent, ErrorDialog, ErrorEvent};
pub use container_list::ContainerList;
pub use create_dialog::{ContainerCreateDialog, CreateDialogEvent};
pub use message_dialog::{MessageDialog, MessageDialogState, MessageEvent};
pub use progress::ProgressIndicator;
pub use prompt_dialog::{PromptDialog, PromptDialogState, PromptEvent};
pub use title_bar::TitleBar;
pub use top_dialog::{TopDialog, TopDialogState, TopEvent};
