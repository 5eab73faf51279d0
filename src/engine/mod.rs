pub mod client;
pub mod podman;
pub mod types;

pub use client::{EngineClient, EngineError};
pub use podman::PodmanClient;
pub use types::{
    ContainerSummary, ImageSummary, NetworkSummary, PodSummary, ReferenceData, TopReport,
    VolumeSummary,
};
