//! # Feedback Slots
//!
//! Where finished work lands. Each slot holds the content of one modal
//! surface; the TUI renders whatever is set and clears it through an
//! `Action` when the user dismisses it.
//!
//! ```text
//! Feedback
//! ├── progress: Option<String>        // "container stop in progress"
//! ├── error: Option<String>           // engine or precondition error
//! ├── message: Option<MessageReport>  // inspect, logs, diff, warnings
//! ├── top: Option<TopView>            // process table
//! ├── queued_messages / queued_tops   // reports waiting behind the open one
//! ├── confirm: Option<ConfirmPrompt>  // rm / prune yes-no
//! └── prompt: Option<InputPrompt>     // rename target, image reference
//! ```
//!
//! Reports never overwrite each other. A report that arrives while another
//! is open waits in a queue and is shown when the open one is dismissed.
//! Every report carries a sequence number so the dialog state can tell a
//! new report from a redraw of the current one.

use std::collections::VecDeque;

use crate::engine::TopReport;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageReport {
    /// Assigned by `Feedback` when the report is queued.
    pub seq: u64,
    pub title: String,
    pub text: String,
    /// Start the view at the last line (logs).
    pub scroll_to_end: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmPrompt {
    pub title: String,
    pub text: String,
}

/// What a submitted input prompt feeds into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptKind {
    Rename { id: String },
    PullImage,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputPrompt {
    pub kind: PromptKind,
    pub title: String,
    pub description: String,
    pub label: String,
    pub button: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopView {
    pub seq: u64,
    pub title: String,
    pub report: TopReport,
}

#[derive(Debug, Default)]
pub struct Feedback {
    pub progress: Option<String>,
    pub error: Option<String>,
    pub message: Option<MessageReport>,
    pub top: Option<TopView>,
    pub confirm: Option<ConfirmPrompt>,
    pub prompt: Option<InputPrompt>,
    queued_messages: VecDeque<MessageReport>,
    queued_tops: VecDeque<TopView>,
    next_seq: u64,
}

impl Feedback {
    pub fn show_error(&mut self, text: impl Into<String>) {
        self.error = Some(text.into());
    }

    pub fn show_message(&mut self, title: impl Into<String>, text: impl Into<String>) {
        self.push_message(title.into(), text.into(), false);
    }

    /// Like `show_message`, but the view starts at the last line.
    pub fn show_logs(&mut self, title: impl Into<String>, text: impl Into<String>) {
        self.push_message(title.into(), text.into(), true);
    }

    fn push_message(&mut self, title: String, text: String, scroll_to_end: bool) {
        let report = MessageReport {
            seq: self.bump_seq(),
            title,
            text,
            scroll_to_end,
        };
        if self.message.is_some() {
            self.queued_messages.push_back(report);
        } else {
            self.message = Some(report);
        }
    }

    pub fn show_top(&mut self, title: impl Into<String>, report: TopReport) {
        let view = TopView {
            seq: self.bump_seq(),
            title: title.into(),
            report,
        };
        if self.top.is_some() {
            self.queued_tops.push_back(view);
        } else {
            self.top = Some(view);
        }
    }

    /// Closes the open message and shows the next queued one, if any.
    pub fn dismiss_message(&mut self) {
        self.message = self.queued_messages.pop_front();
    }

    pub fn dismiss_top(&mut self) {
        self.top = self.queued_tops.pop_front();
    }

    pub fn queued_message_count(&self) -> usize {
        self.queued_messages.len()
    }

    fn bump_seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    /// True when a surface that captures keyboard input is open.
    pub fn is_modal_open(&self) -> bool {
        self.error.is_some()
            || self.message.is_some()
            || self.top.is_some()
            || self.confirm.is_some()
            || self.prompt.is_some()
    }
}

/// Joins log lines for display, dropping `[` and `]`.
pub fn format_logs(lines: &[String]) -> String {
    lines.join("\n").replace(['[', ']'], "")
}
