//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Routing
//!
//! Exactly one surface receives each key, in this order:
//!
//! ```text
//! error > message > top > confirm > prompt > create dialog > container list
//! ```
//!
//! Ctrl+C quits from anywhere. The progress indicator never takes keys.
//!
//! ## Redraw Strategy
//!
//! - **Busy** (a job is running): draws every ~100ms to animate the spinner.
//! - **Idle**: sleeps up to 500ms, only redraws on events, job outcomes or
//!   terminal resize.

pub mod component;
pub mod components;
pub mod event;
pub mod style;
mod ui;

use log::{debug, error, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::command::Command;
use crate::core::config::ResolvedConfig;
use crate::core::job::{JobKind, spawn_job};
use crate::core::state::App;
use crate::engine::{EngineClient, PodmanClient};
use crate::tui::component::EventHandler;
use crate::tui::components::{
    ConfirmDialogState, ConfirmEvent, ContainerCreateDialog, CreateDialogEvent, ErrorEvent,
    MessageDialogState, MessageEvent, PromptDialogState, PromptEvent, TopDialogState, TopEvent,
    confirm_dialog::handle_error_event,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::tui::style::DialogStyle;

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub style: DialogStyle,
    pub create_dialog: ContainerCreateDialog,
    pub message_dialog: MessageDialogState,
    pub top_dialog: TopDialogState,
    pub confirm_dialog: ConfirmDialogState,
    pub prompt_dialog: PromptDialogState,
    pub spinner_frame: usize,
}

impl TuiState {
    pub fn new(style: DialogStyle) -> Self {
        Self {
            style,
            create_dialog: ContainerCreateDialog::new(style),
            message_dialog: MessageDialogState::default(),
            top_dialog: TopDialogState::default(),
            confirm_dialog: ConfirmDialogState::default(),
            prompt_dialog: PromptDialogState::default(),
            spinner_frame: 0,
        }
    }

    /// Lets each dialog state notice its feedback slot opening or closing.
    pub fn sync(&mut self, app: &App) {
        let feedback = &app.feedback;
        self.message_dialog.sync(feedback.message.as_ref());
        self.top_dialog.sync(feedback.top.as_ref());
        self.confirm_dialog.sync(feedback.confirm.as_ref());
        self.prompt_dialog.sync(feedback.prompt.as_ref());
    }
}

/// Routes one key to the surface that owns it and returns the resulting
/// action, if any.
pub fn route_event(app: &App, tui: &mut TuiState, event: &TuiEvent) -> Option<Action> {
    let feedback = &app.feedback;

    if matches!(event, TuiEvent::ForceQuit) {
        return Some(Action::Quit);
    }

    if feedback.error.is_some() {
        return handle_error_event(event).map(|ErrorEvent::Dismiss| Action::DismissError);
    }
    if feedback.message.is_some() {
        return tui
            .message_dialog
            .handle_event(event)
            .map(|MessageEvent::Dismiss| Action::DismissMessage);
    }
    if feedback.top.is_some() {
        return tui
            .top_dialog
            .handle_event(event)
            .map(|TopEvent::Dismiss| Action::DismissTop);
    }
    if feedback.confirm.is_some() {
        return tui.confirm_dialog.handle_event(event).map(|e| match e {
            ConfirmEvent::Accept => Action::ConfirmAccepted,
            ConfirmEvent::Decline => Action::ConfirmDeclined,
        });
    }
    if feedback.prompt.is_some() {
        return tui.prompt_dialog.handle_event(event).map(|e| match e {
            PromptEvent::Submit(text) => Action::PromptSubmitted(text),
            PromptEvent::Cancel => Action::PromptCancelled,
        });
    }
    if tui.create_dialog.is_display() {
        return match tui.create_dialog.handle_event(event)? {
            CreateDialogEvent::Cancel => {
                tui.create_dialog.hide();
                None
            }
            CreateDialogEvent::Create => {
                tui.create_dialog.hide();
                Some(Action::CreateSubmitted(tui.create_dialog.create_options()))
            }
        };
    }

    match event {
        TuiEvent::Up => Some(Action::SelectPrevious),
        TuiEvent::Down => Some(Action::SelectNext),
        TuiEvent::InputChar('q') => Some(Action::Quit),
        TuiEvent::InputChar('R') => Some(Action::Refresh),
        TuiEvent::InputChar(c) => Command::from_key(*c).map(Action::Run),
        _ => None,
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock // Non-blinking: avoids blink timer reset from continuous redraws
        )?;
        info!("Terminal modes enabled (bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableBracketedPaste, Hide);
    }
}

/// Build the engine client from a resolved config.
pub fn build_engine(config: &ResolvedConfig) -> std::io::Result<Arc<dyn EngineClient>> {
    let client = PodmanClient::new(
        &config.engine_url,
        &config.api_version,
        config.request_timeout,
    )
    .map_err(|e| {
        error!("Cannot build engine client: {e}");
        std::io::Error::other(e.to_string())
    })?;
    Ok(Arc::new(client))
}

/// Carries out an effect. Returns true when the app should quit.
fn perform(effect: Effect, app: &App, tui: &mut TuiState, tx: &mpsc::Sender<Action>) -> bool {
    match effect {
        Effect::None => false,
        Effect::Quit => true,
        Effect::Spawn(job) => {
            spawn_job(app.engine.clone(), job, tx.clone());
            false
        }
        Effect::OpenCreateDialog(references) => {
            if tui.create_dialog.is_display() {
                warn!("Create dialog already open, keeping its fields");
            } else {
                tui.create_dialog.display(references);
            }
            false
        }
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let engine = build_engine(&config)?;
    let mut app = App::new(engine, config.engine_url.clone());
    let mut tui = TuiState::new(DialogStyle::from_config(&config.style));

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for outcomes from background jobs
    let (tx, rx) = mpsc::channel();

    let start_time = Instant::now();
    // Due immediately so the first frame is followed by a load.
    let mut last_refresh: Option<Instant> = None;
    let mut refresh_in_flight = false;
    let mut needs_redraw = true;

    'main: loop {
        if !refresh_in_flight
            && last_refresh.is_none_or(|t| t.elapsed() >= config.refresh_interval)
        {
            debug!("Periodic refresh");
            last_refresh = Some(Instant::now());
            refresh_in_flight = true;
            perform(update(&mut app, Action::Refresh), &app, &mut tui, &tx);
        }

        let busy = app.feedback.progress.is_some();
        if busy {
            needs_redraw = true;
        }

        if needs_redraw {
            tui.spinner_frame = (start_time.elapsed().as_millis() / 100) as usize;
            tui.sync(&app);
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        let timeout = if busy {
            Duration::from_millis(100)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if matches!(event, TuiEvent::Resize) {
                continue;
            }
            // Dialog states must see slots opened by the previous key.
            tui.sync(&app);
            let Some(action) = route_event(&app, &mut tui, &event) else {
                continue;
            };
            debug!("Key {event:?} -> {action:?}");
            if matches!(action, Action::Refresh) {
                last_refresh = Some(Instant::now());
                refresh_in_flight = true;
            }
            let effect = update(&mut app, action);
            if perform(effect, &app, &mut tui, &tx) {
                break 'main;
            }
        }

        // Handle background job outcomes
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            if let Action::JobFinished(outcome) = &action {
                debug!("Event loop received outcome of job {}", outcome.id);
                if outcome.kind == JobKind::Refresh {
                    refresh_in_flight = false;
                }
            }
            let effect = update(&mut app, action);
            if perform(effect, &app, &mut tui, &tx) {
                break 'main;
            }
        }
    }

    info!("podterm shutting down");
    ratatui::restore();
    Ok(())
}
