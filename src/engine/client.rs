use async_trait::async_trait;
use thiserror::Error;

use super::types::{
    ContainerSummary, ImageSummary, NetworkSummary, PodSummary, TopReport, VolumeSummary,
};
use crate::core::payload::CreateOptions;

/// Errors that can occur while talking to the engine.
///
/// `Display` is what the user sees in the error dialog, so `Api` renders the
/// engine's own message verbatim.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Client misconfigured (bad URL, unsupported transport).
    #[error("engine configuration error: {0}")]
    Config(String),
    /// Network-level failure (timeout, connection refused).
    #[error("cannot reach engine: {0}")]
    Network(String),
    /// The engine answered with a non-success status.
    #[error("{message}")]
    Api { status: u16, message: String },
    /// The engine's response did not have the expected shape.
    #[error("unexpected engine response: {0}")]
    Parse(String),
    /// The request could not be built from user input.
    #[error("{0}")]
    InvalidRequest(String),
}

/// The remote engine, as consumed by the command dispatcher.
///
/// Calls are only ever awaited from background jobs, never on the UI thread.
#[async_trait]
pub trait EngineClient: Send + Sync {
    /// Short name shown in the title bar.
    fn name(&self) -> &str;

    async fn list_containers(&self) -> Result<Vec<ContainerSummary>, EngineError>;
    async fn list_images(&self) -> Result<Vec<ImageSummary>, EngineError>;
    async fn list_pods(&self) -> Result<Vec<PodSummary>, EngineError>;
    async fn list_networks(&self) -> Result<Vec<NetworkSummary>, EngineError>;
    async fn list_volumes(&self) -> Result<Vec<VolumeSummary>, EngineError>;

    /// Creates a container, returning the engine's warnings.
    async fn create_container(&self, options: &CreateOptions) -> Result<Vec<String>, EngineError>;

    async fn start_container(&self, id: &str) -> Result<(), EngineError>;
    async fn stop_container(&self, id: &str) -> Result<(), EngineError>;
    async fn kill_container(&self, id: &str) -> Result<(), EngineError>;
    async fn pause_container(&self, id: &str) -> Result<(), EngineError>;
    async fn unpause_container(&self, id: &str) -> Result<(), EngineError>;
    async fn remove_container(&self, id: &str) -> Result<(), EngineError>;
    async fn rename_container(&self, id: &str, new_name: &str) -> Result<(), EngineError>;

    /// Pretty-printed inspect document.
    async fn inspect_container(&self, id: &str) -> Result<String, EngineError>;
    async fn container_logs(&self, id: &str) -> Result<Vec<String>, EngineError>;
    /// Filesystem changes, one `"<kind> <path>"` line each.
    async fn container_diff(&self, id: &str) -> Result<Vec<String>, EngineError>;
    /// Port mappings, one `"<container port> -> <host>:<port>"` line each.
    async fn container_port(&self, id: &str) -> Result<Vec<String>, EngineError>;
    async fn container_top(&self, id: &str) -> Result<TopReport, EngineError>;

    /// Removes stopped containers, returning per-container error messages.
    async fn prune_containers(&self) -> Result<Vec<String>, EngineError>;
    /// Removes all unused pods, containers, images and volumes; returns the report.
    async fn system_prune(&self) -> Result<String, EngineError>;
    async fn pull_image(&self, reference: &str) -> Result<(), EngineError>;
}
