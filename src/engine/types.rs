//! Domain types returned by the engine.
//!
//! These are the shapes the rest of the crate works with. The libpod wire
//! structs live privately in `podman.rs` and are translated into these.

/// One row of the container list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContainerSummary {
    pub id: String,
    pub names: Vec<String>,
    pub image: String,
    pub pod_name: String,
    pub state: String,
    pub status: String,
    /// Unix timestamp (seconds).
    pub created: i64,
}

impl ContainerSummary {
    /// First container name without the leading slash docker-style APIs add.
    pub fn display_name(&self) -> &str {
        self.names
            .first()
            .map(|n| n.trim_start_matches('/'))
            .unwrap_or("")
    }

    /// The 12-character short id used in tables and prompts.
    pub fn short_id(&self) -> &str {
        short_id(&self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImageSummary {
    pub id: String,
    pub repository: String,
    pub tag: String,
}

impl ImageSummary {
    /// Label shown in the image drop-down.
    ///
    /// Dangling images (`<none>` repository) fall back to their short id.
    pub fn display_name(&self) -> String {
        if self.repository == "<none>" || self.repository.is_empty() {
            return short_id(&self.id).to_string();
        }
        format!("{}:{}", self.repository, self.tag)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PodSummary {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NetworkSummary {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VolumeSummary {
    pub name: String,
}

/// Output of `top` for one container: column titles plus one row per process.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TopReport {
    pub titles: Vec<String>,
    pub processes: Vec<Vec<String>>,
}

/// Lists backing the create dialog's drop-downs, fetched fresh on every display.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReferenceData {
    pub images: Vec<ImageSummary>,
    pub pods: Vec<PodSummary>,
    pub networks: Vec<NetworkSummary>,
    pub volumes: Vec<VolumeSummary>,
}

/// Truncates an engine id to 12 characters.
pub fn short_id(id: &str) -> &str {
    let id = id.strip_prefix("sha256:").unwrap_or(id);
    match id.char_indices().nth(12) {
        Some((idx, _)) => &id[..idx],
        None => id,
    }
}
