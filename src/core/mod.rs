//! # Core Application Logic
//!
//! This module contains podterm's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No UI. Jobs do the I/O │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┴───────────────────┐
//!            ▼                                       ▼
//!     ┌────────────┐                          ┌────────────┐
//!     │    TUI     │                          │   Engine   │
//!     │  Adapter   │                          │  (libpod)  │
//!     │ (ratatui)  │                          │            │
//!     └────────────┘                          └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`command`]: The container commands and their texts
//! - [`job`]: Background jobs and `spawn_job`
//! - [`feedback`]: Result slots rendered as dialogs
//! - [`payload`]: `CreateOptions` and its parsing helpers
//! - [`config`]: Layered configuration

pub mod action;
pub mod command;
pub mod config;
pub mod feedback;
pub mod job;
pub mod payload;
pub mod state;
