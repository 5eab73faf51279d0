//! # Actions
//!
//! Everything that can happen in podterm becomes an `Action`.
//! User presses `s`? That's `Action::Run(Command::Start)`.
//! A background job finishes? That's `Action::JobFinished(outcome)`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state and returns an `Effect` for the event loop to carry out. No I/O
//! happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! A command goes through:
//!
//! ```text
//! Idle → [AwaitingConfirmation → Confirmed] → InProgress → Succeeded | Failed → Idle
//! ```
//!
//! Preconditions (selection, create payload validity) are checked here,
//! before any `Effect::Spawn`, so a failed precondition never reaches the
//! engine.

use log::{debug, info, warn};

use crate::core::command::{Command, PendingConfirmation};
use crate::core::feedback::{ConfirmPrompt, InputPrompt, PromptKind, format_logs};
use crate::core::job::{Job, JobKind, JobOutcome, JobOutput};
use crate::core::payload::CreateOptions;
use crate::core::state::{App, SelectionContext};
use crate::engine::{ContainerSummary, ReferenceData};

#[derive(Debug)]
pub enum Action {
    /// Run a command against the current selection.
    Run(Command),
    SelectNext,
    SelectPrevious,
    Refresh,
    ConfirmAccepted,
    ConfirmDeclined,
    PromptSubmitted(String),
    PromptCancelled,
    /// The create dialog was submitted and has already hidden itself.
    CreateSubmitted(CreateOptions),
    DismissError,
    DismissMessage,
    DismissTop,
    JobFinished(JobOutcome),
    Quit,
}

/// What the event loop must do after `update()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Spawn(Job),
    OpenCreateDialog(ReferenceData),
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Run(command) => run_command(app, command),
        Action::SelectNext => {
            move_selection(app, 1);
            Effect::None
        }
        Action::SelectPrevious => {
            move_selection(app, -1);
            Effect::None
        }
        Action::Refresh => Effect::Spawn(Job::RefreshContainers),
        Action::ConfirmAccepted => {
            app.feedback.confirm = None;
            match std::mem::take(&mut app.pending) {
                PendingConfirmation::None => {
                    warn!("Confirmation accepted with nothing pending");
                    Effect::None
                }
                PendingConfirmation::Remove { id } => dispatch(app, Job::Remove(id)),
                PendingConfirmation::Prune => dispatch(app, Job::Prune),
                PendingConfirmation::SystemPrune => dispatch(app, Job::SystemPrune),
            }
        }
        Action::ConfirmDeclined => {
            debug!("Confirmation declined: {:?}", app.pending);
            app.feedback.confirm = None;
            app.pending = PendingConfirmation::None;
            Effect::None
        }
        Action::PromptSubmitted(text) => {
            let Some(prompt) = app.feedback.prompt.take() else {
                return Effect::None;
            };
            match prompt.kind {
                PromptKind::Rename { id } => dispatch(app, Job::Rename { id, name: text }),
                PromptKind::PullImage => {
                    let reference = text.trim();
                    if reference.is_empty() {
                        app.feedback.show_error("there is no image name to pull");
                        return Effect::None;
                    }
                    dispatch(app, Job::Pull(reference.to_string()))
                }
            }
        }
        Action::PromptCancelled => {
            app.feedback.prompt = None;
            Effect::None
        }
        Action::CreateSubmitted(options) => {
            if let Err(e) = options.validate() {
                app.feedback.show_error(e.to_string());
                return Effect::None;
            }
            dispatch(app, Job::Create(options))
        }
        Action::DismissError => {
            app.feedback.error = None;
            Effect::None
        }
        Action::DismissMessage => {
            app.feedback.dismiss_message();
            Effect::None
        }
        Action::DismissTop => {
            app.feedback.dismiss_top();
            Effect::None
        }
        Action::JobFinished(outcome) => complete(app, outcome),
        Action::Quit => Effect::Quit,
    }
}

fn run_command(app: &mut App, command: Command) -> Effect {
    if let Some(message) = command.no_selection_message()
        && app.selection.is_empty()
    {
        debug!("{} rejected: nothing selected", command.name());
        app.feedback.show_error(message);
        return Effect::None;
    }

    let id = app.selection.id.clone();
    match command {
        Command::Create => {
            // One load at a time; its outcome opens the dialog.
            if app.create_loading {
                debug!("create ignored: reference data still loading");
                return Effect::None;
            }
            app.create_loading = true;
            app.status_message = "Loading images, pods, networks and volumes...".into();
            Effect::Spawn(Job::LoadReferenceData)
        }
        Command::Remove => request_confirmation(
            app,
            PendingConfirmation::Remove { id: id.clone() },
            format!(
                "Are you sure you want to remove following container ? \n\nCONTAINER ID : {id}"
            ),
        ),
        Command::Prune => request_confirmation(
            app,
            PendingConfirmation::Prune,
            "Are you sure you want to remove all unused containers ?".into(),
        ),
        Command::SystemPrune => request_confirmation(
            app,
            PendingConfirmation::SystemPrune,
            "Are you sure you want to remove all unused pods, containers, images and volumes ?"
                .into(),
        ),
        Command::Rename => {
            let description = format!(
                "container name : {}\ncontainer ID   : {}",
                app.selection.name, app.selection.id
            );
            app.feedback.prompt = Some(InputPrompt {
                kind: PromptKind::Rename { id },
                title: "podman container rename".into(),
                description,
                label: "target name".into(),
                button: "rename".into(),
            });
            Effect::None
        }
        Command::Pull => {
            app.feedback.prompt = Some(InputPrompt {
                kind: PromptKind::PullImage,
                title: "podman image pull".into(),
                description: String::new(),
                label: "image name".into(),
                button: "pull".into(),
            });
            Effect::None
        }
        Command::Start => dispatch(app, Job::Start(id)),
        Command::Stop => dispatch(app, Job::Stop(id)),
        Command::Kill => dispatch(app, Job::Kill(id)),
        Command::Pause => dispatch(app, Job::Pause(id)),
        Command::Unpause => dispatch(app, Job::Unpause(id)),
        Command::Inspect => dispatch(app, Job::Inspect(id)),
        Command::Logs => dispatch(app, Job::Logs(id)),
        Command::Diff => dispatch(app, Job::Diff(id)),
        Command::Port => dispatch(app, Job::Port(id)),
        Command::Top => dispatch(app, Job::Top(id)),
    }
}

/// Opens the yes/no prompt. A newer request replaces an unanswered one.
fn request_confirmation(app: &mut App, pending: PendingConfirmation, text: String) -> Effect {
    let title = match pending {
        PendingConfirmation::SystemPrune => "podman system prune",
        PendingConfirmation::Prune => "podman container prune",
        _ => "podman container remove",
    };
    if app.pending.is_pending() {
        warn!("Replacing unanswered confirmation {:?}", app.pending);
    }
    app.pending = pending;
    app.feedback.confirm = Some(ConfirmPrompt {
        title: title.into(),
        text,
    });
    Effect::None
}

/// Shows the progress indicator and hands the job to the event loop.
fn dispatch(app: &mut App, job: Job) -> Effect {
    if let JobKind::Command(command) = job.kind() {
        app.running.push(command);
        app.feedback.progress = Some(command.progress_title());
        info!("Dispatching {}", command.name());
    }
    Effect::Spawn(job)
}

/// Drops one running instance of `command`. The indicator then names the
/// most recently dispatched command still running, or hides.
fn finish_running(app: &mut App, command: Command) {
    match app.running.iter().rposition(|c| *c == command) {
        Some(index) => {
            app.running.remove(index);
        }
        None => warn!("{} finished but was not running", command.name()),
    }
    app.feedback.progress = app.running.last().map(|c| c.progress_title());
}

fn complete(app: &mut App, outcome: JobOutcome) -> Effect {
    let JobOutcome { id, kind, result } = outcome;
    debug!("Job {id} completed: {kind:?}");

    match kind {
        JobKind::Refresh => {
            match result {
                Ok(JobOutput::Containers(containers)) => set_containers(app, containers),
                Ok(other) => warn!("Refresh returned unexpected output: {other:?}"),
                Err(e) => {
                    warn!("Container refresh failed: {e}");
                    app.status_message = format!("Refresh failed: {e}");
                }
            }
            Effect::None
        }
        JobKind::ReferenceData => {
            app.create_loading = false;
            match result {
                Ok(JobOutput::ReferenceData(references)) => {
                    app.status_message = "Ready".into();
                    Effect::OpenCreateDialog(references)
                }
                Ok(other) => {
                    warn!("Reference data job returned unexpected output: {other:?}");
                    Effect::None
                }
                Err(e) => {
                    app.feedback.show_error(e.to_string());
                    Effect::None
                }
            }
        }
        JobKind::Command(command) => {
            finish_running(app, command);
            match result {
                Ok(output) => route_output(app, command, output),
                Err(e) => {
                    app.feedback.show_error(e.to_string());
                    Effect::None
                }
            }
        }
    }
}

/// Sends a successful command's output to its feedback surface.
fn route_output(app: &mut App, command: Command, output: JobOutput) -> Effect {
    match output {
        JobOutput::Warnings(warnings) if !warnings.is_empty() => {
            app.feedback
                .show_message(command.message_title(), warnings.join("\n"));
        }
        JobOutput::PruneErrors(errors) if !errors.is_empty() => {
            app.feedback.show_error(errors.join("\n"));
        }
        JobOutput::Lines(lines) if command == Command::Logs => {
            app.feedback
                .show_logs(command.message_title(), format_logs(&lines));
        }
        JobOutput::Lines(lines) => {
            app.feedback
                .show_message(command.message_title(), lines.join("\n"));
        }
        JobOutput::Text(text) => {
            app.feedback.show_message(command.message_title(), text);
        }
        JobOutput::Top(report) => {
            app.feedback.show_top(command.message_title(), report);
        }
        JobOutput::Done | JobOutput::Warnings(_) | JobOutput::PruneErrors(_) => {}
        JobOutput::Containers(_) | JobOutput::ReferenceData(_) => {
            warn!("{} returned unexpected output", command.name());
        }
    }

    if command == Command::Pull {
        app.status_message = "Image pulled".into();
    }
    if command.is_mutating() {
        Effect::Spawn(Job::RefreshContainers)
    } else {
        Effect::None
    }
}

/// Replaces the list, keeping the selection on the same container if it
/// still exists and falling back to the first row otherwise.
fn set_containers(app: &mut App, containers: Vec<ContainerSummary>) {
    app.containers = containers;
    let still_there = app
        .containers
        .iter()
        .find(|c| c.id == app.selection.id)
        .or_else(|| app.containers.first());
    app.selection = still_there.map(SelectionContext::of).unwrap_or_default();
    app.status_message = format!("{} containers", app.containers.len());
}

fn move_selection(app: &mut App, delta: isize) {
    if app.containers.is_empty() {
        return;
    }
    let last = app.containers.len() - 1;
    let next = match app.selected_index() {
        None => 0,
        Some(current) => current.saturating_add_signed(delta).min(last),
    };
    app.selection = SelectionContext::of(&app.containers[next]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{EngineError, ImageSummary, TopReport};
    use crate::test_support::{container, test_app, test_app_with_selection};
    use uuid::Uuid;

    fn finished(kind: JobKind, result: Result<JobOutput, EngineError>) -> Action {
        Action::JobFinished(JobOutcome {
            id: Uuid::new_v4(),
            kind,
            result,
        })
    }

    fn finished_ok(command: Command, output: JobOutput) -> Action {
        finished(JobKind::Command(command), Ok(output))
    }

    #[test]
    fn selected_commands_fail_fast_without_selection() {
        for command in Command::ALL.into_iter().filter(|c| c.needs_selection()) {
            let (mut app, engine) = test_app();
            let effect = update(&mut app, Action::Run(command));
            assert_eq!(effect, Effect::None, "{command:?}");
            assert_eq!(
                app.feedback.error.as_deref(),
                command.no_selection_message()
            );
            assert!(app.feedback.progress.is_none());
            assert!(engine.calls().is_empty());
        }
    }

    #[test]
    fn stop_without_selection_shows_error() {
        let (mut app, _) = test_app();
        update(&mut app, Action::Run(Command::Stop));
        assert_eq!(
            app.feedback.error.as_deref(),
            Some("there is no container to stop")
        );
    }

    #[test]
    fn stop_with_selection_spawns_job_with_progress() {
        let (mut app, _) = test_app_with_selection();
        let effect = update(&mut app, Action::Run(Command::Stop));
        assert_eq!(effect, Effect::Spawn(Job::Stop("0123456789abcdef".into())));
        assert_eq!(
            app.feedback.progress.as_deref(),
            Some("container stop in progress")
        );
        assert_eq!(app.in_flight(), 1);
    }

    #[test]
    fn remove_waits_for_confirmation() {
        let (mut app, engine) = test_app_with_selection();
        let effect = update(&mut app, Action::Run(Command::Remove));
        assert_eq!(effect, Effect::None);
        assert_eq!(
            app.pending,
            PendingConfirmation::Remove {
                id: "0123456789abcdef".into()
            }
        );
        let prompt = app.feedback.confirm.as_ref().unwrap();
        assert_eq!(prompt.title, "podman container remove");
        assert!(prompt.text.ends_with("CONTAINER ID : 0123456789abcdef"));
        assert!(app.feedback.progress.is_none());
        assert!(engine.calls().is_empty());

        let effect = update(&mut app, Action::ConfirmAccepted);
        assert_eq!(effect, Effect::Spawn(Job::Remove("0123456789abcdef".into())));
        assert!(!app.pending.is_pending());
        assert!(app.feedback.confirm.is_none());
    }

    #[test]
    fn remove_targets_id_captured_at_prompt_time() {
        let (mut app, _) = test_app_with_selection();
        update(&mut app, Action::Run(Command::Remove));
        app.selection = SelectionContext {
            id: "other".into(),
            name: "other".into(),
        };
        let effect = update(&mut app, Action::ConfirmAccepted);
        assert_eq!(effect, Effect::Spawn(Job::Remove("0123456789abcdef".into())));
    }

    #[test]
    fn declining_prune_returns_to_idle() {
        let (mut app, engine) = test_app();
        update(&mut app, Action::Run(Command::Prune));
        assert_eq!(app.pending, PendingConfirmation::Prune);
        assert_eq!(
            app.feedback.confirm.as_ref().unwrap().text,
            "Are you sure you want to remove all unused containers ?"
        );

        let effect = update(&mut app, Action::ConfirmDeclined);
        assert_eq!(effect, Effect::None);
        assert!(!app.pending.is_pending());
        assert!(app.feedback.confirm.is_none());
        assert!(app.feedback.progress.is_none());
        assert!(engine.calls().is_empty());

        // A stray accept after declining does nothing.
        assert_eq!(update(&mut app, Action::ConfirmAccepted), Effect::None);
    }

    #[test]
    fn only_one_confirmation_is_pending() {
        let (mut app, _) = test_app_with_selection();
        update(&mut app, Action::Run(Command::Remove));
        update(&mut app, Action::Run(Command::SystemPrune));
        assert_eq!(app.pending, PendingConfirmation::SystemPrune);
        assert_eq!(
            update(&mut app, Action::ConfirmAccepted),
            Effect::Spawn(Job::SystemPrune)
        );
    }

    #[test]
    fn rename_prompts_then_dispatches() {
        let (mut app, _) = test_app_with_selection();
        assert_eq!(update(&mut app, Action::Run(Command::Rename)), Effect::None);
        let prompt = app.feedback.prompt.as_ref().unwrap();
        assert_eq!(prompt.title, "podman container rename");
        assert_eq!(prompt.label, "target name");
        assert_eq!(prompt.button, "rename");
        assert!(prompt.description.contains("web"));

        let effect = update(&mut app, Action::PromptSubmitted("api".into()));
        assert_eq!(
            effect,
            Effect::Spawn(Job::Rename {
                id: "0123456789abcdef".into(),
                name: "api".into()
            })
        );
        assert!(app.feedback.prompt.is_none());
        assert_eq!(
            app.feedback.progress.as_deref(),
            Some("container rename in progress")
        );
    }

    #[test]
    fn pull_rejects_empty_reference() {
        let (mut app, _) = test_app();
        update(&mut app, Action::Run(Command::Pull));
        let effect = update(&mut app, Action::PromptSubmitted("   ".into()));
        assert_eq!(effect, Effect::None);
        assert!(app.feedback.error.is_some());

        update(&mut app, Action::Run(Command::Pull));
        let effect = update(&mut app, Action::PromptSubmitted(" alpine ".into()));
        assert_eq!(effect, Effect::Spawn(Job::Pull("alpine".into())));
    }

    #[test]
    fn create_loads_reference_data_then_opens_dialog() {
        let (mut app, _) = test_app();
        assert_eq!(
            update(&mut app, Action::Run(Command::Create)),
            Effect::Spawn(Job::LoadReferenceData)
        );

        let references = ReferenceData {
            images: vec![ImageSummary {
                id: "img1".into(),
                repository: "alpine".into(),
                tag: "3".into(),
            }],
            ..Default::default()
        };
        let effect = update(
            &mut app,
            finished(
                JobKind::ReferenceData,
                Ok(JobOutput::ReferenceData(references.clone())),
            ),
        );
        assert_eq!(effect, Effect::OpenCreateDialog(references));
    }

    #[test]
    fn create_does_not_stack_reference_loads() {
        let (mut app, _) = test_app();
        assert_eq!(
            update(&mut app, Action::Run(Command::Create)),
            Effect::Spawn(Job::LoadReferenceData)
        );
        assert_eq!(update(&mut app, Action::Run(Command::Create)), Effect::None);

        let effect = update(
            &mut app,
            finished(
                JobKind::ReferenceData,
                Ok(JobOutput::ReferenceData(ReferenceData::default())),
            ),
        );
        assert_eq!(effect, Effect::OpenCreateDialog(ReferenceData::default()));
        assert!(!app.create_loading);
    }

    #[test]
    fn failed_reference_load_allows_another_try() {
        let (mut app, _) = test_app();
        update(&mut app, Action::Run(Command::Create));
        update(
            &mut app,
            finished(
                JobKind::ReferenceData,
                Err(EngineError::Network("connection refused".into())),
            ),
        );
        assert!(app.feedback.error.is_some());
        assert_eq!(
            update(&mut app, Action::Run(Command::Create)),
            Effect::Spawn(Job::LoadReferenceData)
        );
    }

    #[test]
    fn invalid_create_payload_never_spawns() {
        let (mut app, _) = test_app();
        let options = CreateOptions {
            name: "web".into(),
            ..Default::default()
        };
        assert_eq!(update(&mut app, Action::CreateSubmitted(options)), Effect::None);
        assert_eq!(
            app.feedback.error.as_deref(),
            Some("container name or image name is empty")
        );
        assert!(app.feedback.progress.is_none());
    }

    #[test]
    fn valid_create_payload_spawns_create() {
        let (mut app, _) = test_app();
        let options = CreateOptions {
            name: "web".into(),
            image: Some("img1".into()),
            ..Default::default()
        };
        let effect = update(&mut app, Action::CreateSubmitted(options.clone()));
        assert_eq!(effect, Effect::Spawn(Job::Create(options)));
        assert_eq!(
            app.feedback.progress.as_deref(),
            Some("container create in progress")
        );
    }

    #[test]
    fn logs_are_stripped_and_scrolled_to_end() {
        let (mut app, _) = test_app_with_selection();
        update(&mut app, Action::Run(Command::Logs));
        let effect = update(
            &mut app,
            finished_ok(Command::Logs, JobOutput::Lines(vec!["[INFO] ok".into()])),
        );
        assert_eq!(effect, Effect::None);
        assert!(app.feedback.progress.is_none());
        let message = app.feedback.message.as_ref().unwrap();
        assert_eq!(message.title, "podman container logs");
        assert_eq!(message.text, "INFO ok");
        assert!(message.scroll_to_end);
    }

    #[test]
    fn failure_shows_engine_text_verbatim() {
        let (mut app, _) = test_app_with_selection();
        update(&mut app, Action::Run(Command::Kill));
        let effect = update(
            &mut app,
            finished(
                JobKind::Command(Command::Kill),
                Err(EngineError::Api {
                    status: 409,
                    message: "container is not running".into(),
                }),
            ),
        );
        assert_eq!(effect, Effect::None);
        assert!(app.feedback.progress.is_none());
        assert_eq!(app.feedback.error.as_deref(), Some("container is not running"));
        assert_eq!(app.in_flight(), 0);
    }

    #[test]
    fn successful_mutation_refreshes_list() {
        let (mut app, _) = test_app_with_selection();
        update(&mut app, Action::Run(Command::Start));
        let effect = update(&mut app, finished_ok(Command::Start, JobOutput::Done));
        assert_eq!(effect, Effect::Spawn(Job::RefreshContainers));
        assert!(app.feedback.error.is_none());
        assert!(app.feedback.message.is_none());
    }

    #[test]
    fn progress_stays_while_other_commands_run() {
        let (mut app, _) = test_app_with_selection();
        update(&mut app, Action::Run(Command::Start));
        update(&mut app, Action::Run(Command::Inspect));
        update(&mut app, finished_ok(Command::Start, JobOutput::Done));
        assert!(app.feedback.progress.is_some());
        update(&mut app, finished_ok(Command::Inspect, JobOutput::Text("{}".into())));
        assert!(app.feedback.progress.is_none());
    }

    #[test]
    fn progress_names_a_command_still_running() {
        let (mut app, _) = test_app_with_selection();
        update(&mut app, Action::Run(Command::Start));
        update(&mut app, Action::Run(Command::Inspect));
        assert_eq!(
            app.feedback.progress.as_deref(),
            Some("container inspect in progress")
        );

        // The later command finishes first.
        update(&mut app, finished_ok(Command::Inspect, JobOutput::Text("{}".into())));
        assert_eq!(
            app.feedback.progress.as_deref(),
            Some("container start in progress")
        );
        assert_eq!(app.running, vec![Command::Start]);

        update(&mut app, finished_ok(Command::Start, JobOutput::Done));
        assert!(app.feedback.progress.is_none());
    }

    #[test]
    fn overlapping_reports_queue_instead_of_overwriting() {
        let (mut app, _) = test_app_with_selection();
        update(&mut app, Action::Run(Command::Inspect));
        update(&mut app, Action::Run(Command::Logs));
        update(&mut app, finished_ok(Command::Inspect, JobOutput::Text("{}".into())));
        update(
            &mut app,
            finished_ok(Command::Logs, JobOutput::Lines(vec!["[INFO] ok".into()])),
        );

        assert_eq!(
            app.feedback.message.as_ref().unwrap().title,
            "podman container inspect"
        );
        update(&mut app, Action::DismissMessage);
        let logs = app.feedback.message.as_ref().unwrap();
        assert_eq!(logs.title, "podman container logs");
        assert!(logs.scroll_to_end);
        update(&mut app, Action::DismissMessage);
        assert!(app.feedback.message.is_none());
    }

    #[test]
    fn create_warnings_open_message_dialog() {
        let (mut app, _) = test_app();
        let effect = update(
            &mut app,
            finished_ok(
                Command::Create,
                JobOutput::Warnings(vec!["a".into(), "b".into()]),
            ),
        );
        assert_eq!(effect, Effect::Spawn(Job::RefreshContainers));
        let message = app.feedback.message.as_ref().unwrap();
        assert_eq!(message.title, "CONTAINER CREATE WARNINGS");
        assert_eq!(message.text, "a\nb");
    }

    #[test]
    fn create_without_warnings_is_silent() {
        let (mut app, _) = test_app();
        update(&mut app, finished_ok(Command::Create, JobOutput::Warnings(vec![])));
        assert!(!app.feedback.is_modal_open());
    }

    #[test]
    fn prune_errors_open_error_dialog() {
        let (mut app, _) = test_app();
        update(
            &mut app,
            finished_ok(
                Command::Prune,
                JobOutput::PruneErrors(vec!["a: busy".into(), "b: busy".into()]),
            ),
        );
        assert_eq!(app.feedback.error.as_deref(), Some("a: busy\nb: busy"));
    }

    #[test]
    fn read_only_outputs_route_to_message_and_top() {
        let (mut app, _) = test_app_with_selection();
        let effect = update(
            &mut app,
            finished_ok(Command::Diff, JobOutput::Lines(vec!["C /etc".into(), "A /x".into()])),
        );
        assert_eq!(effect, Effect::None);
        let message = app.feedback.message.take().unwrap();
        assert_eq!(message.title, "podman container diff");
        assert_eq!(message.text, "C /etc\nA /x");
        assert!(!message.scroll_to_end);

        update(
            &mut app,
            finished_ok(Command::Top, JobOutput::Top(TopReport::default())),
        );
        assert_eq!(app.feedback.top.as_ref().unwrap().title, "podman container top");
    }

    #[test]
    fn refresh_keeps_selection_by_id() {
        let (mut app, _) = test_app_with_selection();
        let containers = vec![container("aaaa", "first"), container("0123456789abcdef", "web")];
        update(
            &mut app,
            finished(JobKind::Refresh, Ok(JobOutput::Containers(containers))),
        );
        assert_eq!(app.selection.id, "0123456789abcdef");
        assert_eq!(app.selected_index(), Some(1));
    }

    #[test]
    fn refresh_selects_first_when_selection_vanished() {
        let (mut app, _) = test_app_with_selection();
        update(
            &mut app,
            finished(
                JobKind::Refresh,
                Ok(JobOutput::Containers(vec![container("aaaa", "first")])),
            ),
        );
        assert_eq!(app.selection.name, "first");

        update(
            &mut app,
            finished(JobKind::Refresh, Ok(JobOutput::Containers(vec![]))),
        );
        assert!(app.selection.is_empty());
    }

    #[test]
    fn refresh_failure_goes_to_status_bar() {
        let (mut app, _) = test_app();
        update(
            &mut app,
            finished(
                JobKind::Refresh,
                Err(EngineError::Network("connection refused".into())),
            ),
        );
        assert!(app.feedback.error.is_none());
        assert!(app.status_message.contains("connection refused"));
    }

    #[test]
    fn selection_moves_within_bounds() {
        let (mut app, _) = test_app();
        app.containers = vec![container("a", "one"), container("b", "two")];
        update(&mut app, Action::SelectPrevious);
        assert_eq!(app.selection.id, "a");
        update(&mut app, Action::SelectNext);
        update(&mut app, Action::SelectNext);
        assert_eq!(app.selection.id, "b");
        update(&mut app, Action::SelectPrevious);
        assert_eq!(app.selection.id, "a");
    }

    #[test]
    fn dismiss_actions_clear_slots() {
        let (mut app, _) = test_app();
        app.feedback.show_error("x");
        app.feedback.show_message("t", "y");
        update(&mut app, Action::DismissError);
        update(&mut app, Action::DismissMessage);
        assert!(!app.feedback.is_modal_open());
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }
}
