//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::core::payload::CreateOptions;
use crate::core::state::{App, SelectionContext};
use crate::engine::{
    ContainerSummary, EngineClient, EngineError, ImageSummary, NetworkSummary, PodSummary,
    ReferenceData, TopReport, VolumeSummary,
};

/// An engine that records every call and answers from canned data.
///
/// With `failing`, every call returns `EngineError::Api` with that message.
#[derive(Default)]
pub struct RecordingEngine {
    calls: Mutex<Vec<String>>,
    fail_with: Option<String>,
    containers: Vec<ContainerSummary>,
    references: ReferenceData,
    logs: Vec<String>,
    warnings: Vec<String>,
    prune_errors: Vec<String>,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(mut self, message: &str) -> Self {
        self.fail_with = Some(message.to_string());
        self
    }

    pub fn with_containers(mut self, containers: Vec<ContainerSummary>) -> Self {
        self.containers = containers;
        self
    }

    pub fn with_references(mut self, references: ReferenceData) -> Self {
        self.references = references;
        self
    }

    pub fn with_logs(mut self, lines: Vec<&str>) -> Self {
        self.logs = lines.into_iter().map(str::to_string).collect();
        self
    }

    pub fn with_warnings(mut self, warnings: Vec<&str>) -> Self {
        self.warnings = warnings.into_iter().map(str::to_string).collect();
        self
    }

    pub fn with_prune_errors(mut self, errors: Vec<&str>) -> Self {
        self.prune_errors = errors.into_iter().map(str::to_string).collect();
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record<T>(&self, call: String, value: T) -> Result<T, EngineError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
        match &self.fail_with {
            Some(message) => Err(EngineError::Api {
                status: 500,
                message: message.clone(),
            }),
            None => Ok(value),
        }
    }
}

#[async_trait]
impl EngineClient for RecordingEngine {
    fn name(&self) -> &str {
        "recording"
    }

    async fn list_containers(&self) -> Result<Vec<ContainerSummary>, EngineError> {
        self.record("list containers".into(), self.containers.clone())
    }

    async fn list_images(&self) -> Result<Vec<ImageSummary>, EngineError> {
        self.record("list images".into(), self.references.images.clone())
    }

    async fn list_pods(&self) -> Result<Vec<PodSummary>, EngineError> {
        self.record("list pods".into(), self.references.pods.clone())
    }

    async fn list_networks(&self) -> Result<Vec<NetworkSummary>, EngineError> {
        self.record("list networks".into(), self.references.networks.clone())
    }

    async fn list_volumes(&self) -> Result<Vec<VolumeSummary>, EngineError> {
        self.record("list volumes".into(), self.references.volumes.clone())
    }

    async fn create_container(&self, options: &CreateOptions) -> Result<Vec<String>, EngineError> {
        self.record(format!("create {}", options.name), self.warnings.clone())
    }

    async fn start_container(&self, id: &str) -> Result<(), EngineError> {
        self.record(format!("start {id}"), ())
    }

    async fn stop_container(&self, id: &str) -> Result<(), EngineError> {
        self.record(format!("stop {id}"), ())
    }

    async fn kill_container(&self, id: &str) -> Result<(), EngineError> {
        self.record(format!("kill {id}"), ())
    }

    async fn pause_container(&self, id: &str) -> Result<(), EngineError> {
        self.record(format!("pause {id}"), ())
    }

    async fn unpause_container(&self, id: &str) -> Result<(), EngineError> {
        self.record(format!("unpause {id}"), ())
    }

    async fn remove_container(&self, id: &str) -> Result<(), EngineError> {
        self.record(format!("remove {id}"), ())
    }

    async fn rename_container(&self, id: &str, new_name: &str) -> Result<(), EngineError> {
        self.record(format!("rename {id} {new_name}"), ())
    }

    async fn inspect_container(&self, id: &str) -> Result<String, EngineError> {
        self.record(format!("inspect {id}"), format!("{{\"Id\": \"{id}\"}}"))
    }

    async fn container_logs(&self, id: &str) -> Result<Vec<String>, EngineError> {
        self.record(format!("logs {id}"), self.logs.clone())
    }

    async fn container_diff(&self, id: &str) -> Result<Vec<String>, EngineError> {
        self.record(format!("diff {id}"), vec!["C /etc".to_string()])
    }

    async fn container_port(&self, id: &str) -> Result<Vec<String>, EngineError> {
        self.record(
            format!("port {id}"),
            vec!["80/tcp -> 0.0.0.0:8080".to_string()],
        )
    }

    async fn container_top(&self, id: &str) -> Result<TopReport, EngineError> {
        let report = TopReport {
            titles: vec!["PID".into(), "COMMAND".into()],
            processes: vec![vec!["1".into(), "nginx".into()]],
        };
        self.record(format!("top {id}"), report)
    }

    async fn prune_containers(&self) -> Result<Vec<String>, EngineError> {
        self.record("prune".into(), self.prune_errors.clone())
    }

    async fn system_prune(&self) -> Result<String, EngineError> {
        self.record("system prune".into(), "{}".to_string())
    }

    async fn pull_image(&self, reference: &str) -> Result<(), EngineError> {
        self.record(format!("pull {reference}"), ())
    }
}

pub fn container(id: &str, name: &str) -> ContainerSummary {
    ContainerSummary {
        id: id.to_string(),
        names: vec![name.to_string()],
        image: "docker.io/library/nginx:latest".to_string(),
        state: "running".to_string(),
        status: "Up 2 minutes".to_string(),
        ..Default::default()
    }
}

/// Creates a test App backed by a fresh RecordingEngine.
pub fn test_app() -> (App, Arc<RecordingEngine>) {
    let engine = Arc::new(RecordingEngine::new());
    (App::new(engine.clone(), "http://localhost:8888".into()), engine)
}

/// Creates a test App with one container selected.
pub fn test_app_with_selection() -> (App, Arc<RecordingEngine>) {
    let (mut app, engine) = test_app();
    app.containers = vec![container("0123456789abcdef", "web")];
    app.selection = SelectionContext {
        id: "0123456789abcdef".into(),
        name: "web".into(),
    };
    (app, engine)
}
