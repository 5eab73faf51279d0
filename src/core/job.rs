//! # Background Jobs
//!
//! A `Job` is one remote operation. `spawn_job` runs it on its own tokio
//! task and sends the outcome back to the UI thread as
//! `Action::JobFinished`. The task never touches `App`; the UI thread
//! applies the outcome through `update()`.
//!
//! Contract:
//! - one task per job, no pooling;
//! - no cancellation: once spawned, a job runs until the engine answers or
//!   the client times out;
//! - no retry: a failed job reports its error once and is done.
//!
//! Completion order across jobs is unspecified.

use std::sync::{Arc, mpsc};
use std::time::Instant;

use log::{debug, error, info, warn};
use uuid::Uuid;

use crate::core::action::Action;
use crate::core::command::Command;
use crate::core::payload::CreateOptions;
use crate::engine::{ContainerSummary, EngineClient, EngineError, ReferenceData, TopReport};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Job {
    RefreshContainers,
    /// Images, pods, networks and volumes for the create dialog.
    LoadReferenceData,
    Create(CreateOptions),
    Start(String),
    Stop(String),
    Kill(String),
    Pause(String),
    Unpause(String),
    Remove(String),
    Rename { id: String, name: String },
    Inspect(String),
    Logs(String),
    Diff(String),
    Port(String),
    Top(String),
    Prune,
    SystemPrune,
    Pull(String),
}

/// Which routing rule applies to a finished job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobKind {
    Refresh,
    ReferenceData,
    Command(Command),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutput {
    Containers(Vec<ContainerSummary>),
    ReferenceData(ReferenceData),
    /// Success with nothing to show.
    Done,
    Warnings(Vec<String>),
    Lines(Vec<String>),
    Text(String),
    Top(TopReport),
    PruneErrors(Vec<String>),
}

#[derive(Debug)]
pub struct JobOutcome {
    pub id: Uuid,
    pub kind: JobKind,
    pub result: Result<JobOutput, EngineError>,
}

impl Job {
    pub fn kind(&self) -> JobKind {
        let command = match self {
            Job::RefreshContainers => return JobKind::Refresh,
            Job::LoadReferenceData => return JobKind::ReferenceData,
            Job::Create(_) => Command::Create,
            Job::Start(_) => Command::Start,
            Job::Stop(_) => Command::Stop,
            Job::Kill(_) => Command::Kill,
            Job::Pause(_) => Command::Pause,
            Job::Unpause(_) => Command::Unpause,
            Job::Remove(_) => Command::Remove,
            Job::Rename { .. } => Command::Rename,
            Job::Inspect(_) => Command::Inspect,
            Job::Logs(_) => Command::Logs,
            Job::Diff(_) => Command::Diff,
            Job::Port(_) => Command::Port,
            Job::Top(_) => Command::Top,
            Job::Prune => Command::Prune,
            Job::SystemPrune => Command::SystemPrune,
            Job::Pull(_) => Command::Pull,
        };
        JobKind::Command(command)
    }

    /// Performs the remote call(s). Runs inside the spawned task.
    pub async fn run(self, engine: &dyn EngineClient) -> Result<JobOutput, EngineError> {
        let output = match self {
            Job::RefreshContainers => JobOutput::Containers(engine.list_containers().await?),
            Job::LoadReferenceData => JobOutput::ReferenceData(load_reference_data(engine).await),
            Job::Create(options) => JobOutput::Warnings(engine.create_container(&options).await?),
            Job::Start(id) => {
                engine.start_container(&id).await?;
                JobOutput::Done
            }
            Job::Stop(id) => {
                engine.stop_container(&id).await?;
                JobOutput::Done
            }
            Job::Kill(id) => {
                engine.kill_container(&id).await?;
                JobOutput::Done
            }
            Job::Pause(id) => {
                engine.pause_container(&id).await?;
                JobOutput::Done
            }
            Job::Unpause(id) => {
                engine.unpause_container(&id).await?;
                JobOutput::Done
            }
            Job::Remove(id) => {
                engine.remove_container(&id).await?;
                JobOutput::Done
            }
            Job::Rename { id, name } => {
                engine.rename_container(&id, &name).await?;
                JobOutput::Done
            }
            Job::Inspect(id) => JobOutput::Text(engine.inspect_container(&id).await?),
            Job::Logs(id) => JobOutput::Lines(engine.container_logs(&id).await?),
            Job::Diff(id) => JobOutput::Lines(engine.container_diff(&id).await?),
            Job::Port(id) => JobOutput::Lines(engine.container_port(&id).await?),
            Job::Top(id) => JobOutput::Top(engine.container_top(&id).await?),
            Job::Prune => JobOutput::PruneErrors(engine.prune_containers().await?),
            Job::SystemPrune => JobOutput::Text(engine.system_prune().await?),
            Job::Pull(reference) => {
                engine.pull_image(&reference).await?;
                JobOutput::Done
            }
        };
        Ok(output)
    }
}

/// Fetches the four lists concurrently. A failed list degrades to empty.
async fn load_reference_data(engine: &dyn EngineClient) -> ReferenceData {
    let (images, pods, networks, volumes) = tokio::join!(
        engine.list_images(),
        engine.list_pods(),
        engine.list_networks(),
        engine.list_volumes(),
    );
    ReferenceData {
        images: or_empty("images", images),
        pods: or_empty("pods", pods),
        networks: or_empty("networks", networks),
        volumes: or_empty("volumes", volumes),
    }
}

fn or_empty<T>(what: &str, result: Result<Vec<T>, EngineError>) -> Vec<T> {
    result.unwrap_or_else(|e| {
        warn!("Failed to list {what} for create dialog: {e}");
        Vec::new()
    })
}

/// Spawns `job` on the tokio runtime and returns its id.
///
/// The outcome arrives on `tx` as `Action::JobFinished`. There is no handle
/// to cancel the job and it is never retried.
pub fn spawn_job(engine: Arc<dyn EngineClient>, job: Job, tx: mpsc::Sender<Action>) -> Uuid {
    let id = Uuid::new_v4();
    let kind = job.kind();
    info!("Spawning job {id}: {kind:?}");

    tokio::spawn(async move {
        let started = Instant::now();
        let result = job.run(engine.as_ref()).await;
        let elapsed_ms = started.elapsed().as_millis();
        match &result {
            Ok(_) => debug!("Job {id} ({kind:?}) finished in {elapsed_ms}ms"),
            Err(e) => error!("Job {id} ({kind:?}) failed after {elapsed_ms}ms: {e}"),
        }
        if tx
            .send(Action::JobFinished(JobOutcome { id, kind, result }))
            .is_err()
        {
            warn!("Failed to send outcome of job {id}: receiver dropped");
        }
    });

    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{ImageSummary, NetworkSummary, PodSummary, VolumeSummary};
    use crate::test_support::{RecordingEngine, container};
    use std::time::Duration;

    #[test]
    fn kinds_map_to_commands() {
        assert_eq!(Job::RefreshContainers.kind(), JobKind::Refresh);
        assert_eq!(Job::LoadReferenceData.kind(), JobKind::ReferenceData);
        assert_eq!(
            Job::Rename {
                id: "a".into(),
                name: "b".into()
            }
            .kind(),
            JobKind::Command(Command::Rename)
        );
    }

    #[tokio::test]
    async fn run_routes_to_engine_call() {
        let engine = RecordingEngine::new();
        let output = Job::Stop("abc".into()).run(&engine).await.unwrap();
        assert_eq!(output, JobOutput::Done);
        assert_eq!(engine.calls(), vec!["stop abc"]);
    }

    #[test]
    fn rename_passes_target_name() {
        let engine = RecordingEngine::new();
        let job = Job::Rename {
            id: "abc".into(),
            name: "api".into(),
        };
        let output = tokio_test::block_on(job.run(&engine)).unwrap();
        assert_eq!(output, JobOutput::Done);
        assert_eq!(engine.calls(), vec!["rename abc api"]);
    }

    #[tokio::test]
    async fn refresh_returns_listed_containers() {
        let rows = vec![container("abc", "web"), container("def", "db")];
        let engine = RecordingEngine::new().with_containers(rows.clone());
        let output = Job::RefreshContainers.run(&engine).await.unwrap();
        assert_eq!(output, JobOutput::Containers(rows));
    }

    #[tokio::test]
    async fn create_returns_engine_warnings() {
        let engine = RecordingEngine::new().with_warnings(vec!["kernel lacks memory limit"]);
        let options = CreateOptions {
            name: "web".into(),
            image: Some("img1".into()),
            ..Default::default()
        };
        let output = Job::Create(options).run(&engine).await.unwrap();
        assert_eq!(
            output,
            JobOutput::Warnings(vec!["kernel lacks memory limit".to_string()])
        );
        assert_eq!(engine.calls(), vec!["create web"]);
    }

    #[tokio::test]
    async fn prune_returns_per_container_errors() {
        let engine = RecordingEngine::new().with_prune_errors(vec!["abc: container is running"]);
        let output = Job::Prune.run(&engine).await.unwrap();
        assert_eq!(
            output,
            JobOutput::PruneErrors(vec!["abc: container is running".to_string()])
        );
    }

    #[tokio::test]
    async fn reference_data_collects_all_four_lists() {
        let references = ReferenceData {
            images: vec![ImageSummary {
                id: "img1".into(),
                repository: "alpine".into(),
                tag: "3".into(),
            }],
            pods: vec![PodSummary {
                id: "pod1".into(),
                name: "backend".into(),
            }],
            networks: vec![NetworkSummary {
                name: "podman".into(),
            }],
            volumes: vec![VolumeSummary {
                name: "data".into(),
            }],
        };
        let engine = RecordingEngine::new().with_references(references.clone());
        let output = Job::LoadReferenceData.run(&engine).await.unwrap();
        assert_eq!(output, JobOutput::ReferenceData(references));
    }

    #[tokio::test]
    async fn run_propagates_engine_error() {
        let engine = RecordingEngine::new().failing("no such container");
        let err = Job::Kill("abc".into()).run(&engine).await.unwrap_err();
        assert_eq!(err.to_string(), "no such container");
    }

    #[tokio::test]
    async fn reference_data_swallows_failures() {
        let engine = RecordingEngine::new().failing("engine down");
        let output = Job::LoadReferenceData.run(&engine).await.unwrap();
        assert_eq!(output, JobOutput::ReferenceData(ReferenceData::default()));
        let mut calls = engine.calls();
        calls.sort();
        assert_eq!(
            calls,
            vec!["list images", "list networks", "list pods", "list volumes"]
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn spawn_job_sends_outcome() {
        let engine = Arc::new(RecordingEngine::new().with_logs(vec!["[INFO] ok"]));
        let (tx, rx) = mpsc::channel();
        let id = spawn_job(engine.clone(), Job::Logs("abc".into()), tx);

        let action = tokio::task::spawn_blocking(move || rx.recv_timeout(Duration::from_secs(5)))
            .await
            .unwrap()
            .unwrap();
        match action {
            Action::JobFinished(outcome) => {
                assert_eq!(outcome.id, id);
                assert_eq!(outcome.kind, JobKind::Command(Command::Logs));
                assert_eq!(
                    outcome.result.unwrap(),
                    JobOutput::Lines(vec!["[INFO] ok".to_string()])
                );
            }
            other => panic!("unexpected action: {other:?}"),
        }
        assert_eq!(engine.calls(), vec!["logs abc"]);
    }
}
