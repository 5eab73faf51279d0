//! Podman engine client speaking the libpod REST API.
//!
//! Requests go to `{base_url}/{api_version}/libpod/...`. The service must be
//! exposed over TCP (`podman system service tcp:localhost:8888`); unix
//! sockets are rejected when the client is built.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use log::{debug, info, warn};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::client::{EngineClient, EngineError};
use super::types::{
    ContainerSummary, ImageSummary, NetworkSummary, PodSummary, TopReport, VolumeSummary,
};
use crate::core::payload::CreateOptions;

pub const DEFAULT_API_VERSION: &str = "v3.0.0";

// ============================================================================
// libpod wire types
// ============================================================================

#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct ListContainer {
    id: String,
    #[serde(default)]
    names: Vec<String>,
    #[serde(default)]
    image: String,
    #[serde(default)]
    pod_name: String,
    #[serde(default)]
    state: String,
    #[serde(default)]
    status: String,
    /// Unix seconds on older services, RFC 3339 on newer ones.
    #[serde(default)]
    created: Value,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct ListImage {
    id: String,
    #[serde(default)]
    repo_tags: Option<Vec<String>>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct ListPod {
    id: String,
    name: String,
}

#[derive(Deserialize, Debug)]
struct ListNetwork {
    #[serde(rename = "Name", alias = "name")]
    name: String,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct ListVolume {
    name: String,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct CreateResponse {
    id: String,
    #[serde(default)]
    warnings: Option<Vec<String>>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct FileChange {
    path: String,
    kind: u8,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "PascalCase")]
struct TopResponse {
    #[serde(default)]
    titles: Vec<String>,
    #[serde(default)]
    processes: Vec<Vec<String>>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct PruneReport {
    id: String,
    #[serde(default)]
    err: Option<Value>,
}

/// libpod error body: `{"cause": "...", "message": "...", "response": 404}`.
#[derive(Deserialize, Debug, Default)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    cause: String,
}

/// The subset of libpod's `SpecGenerator` the create dialog can fill in.
#[derive(Serialize, Debug, Default, PartialEq)]
struct SpecGenerator {
    name: String,
    image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pod: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    labels: BTreeMap<String, String>,
    remove: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    hostname: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    static_ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    static_mac: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    cni_networks: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    portmappings: Vec<PortMapping>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    expose: BTreeMap<u16, String>,
    publish_image_ports: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    dns_server: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    dns_option: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    dns_search: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    volumes: Vec<NamedVolume>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_volume_mode: Option<String>,
}

#[derive(Serialize, Debug, PartialEq)]
struct PortMapping {
    #[serde(skip_serializing_if = "String::is_empty")]
    host_ip: String,
    container_port: u16,
    #[serde(skip_serializing_if = "is_zero")]
    host_port: u16,
    protocol: String,
}

#[derive(Serialize, Debug, PartialEq)]
#[serde(rename_all = "PascalCase")]
struct NamedVolume {
    name: String,
    dest: String,
}

fn is_zero(port: &u16) -> bool {
    *port == 0
}

// ============================================================================
// Translation Layer
// ============================================================================

/// Accepts `http(s)://`, `tcp://` (rewritten to http) and bare `host:port`.
pub fn normalize_base_url(url: &str) -> Result<String, EngineError> {
    let url = url.trim().trim_end_matches('/');
    if url.is_empty() {
        return Err(EngineError::Config("engine URL is empty".into()));
    }
    if url.starts_with("unix://") || url.starts_with('/') {
        return Err(EngineError::Config(format!(
            "unix socket {url} is not supported, expose the service over tcp \
             (podman system service tcp:localhost:8888)"
        )));
    }
    if let Some(rest) = url.strip_prefix("tcp://") {
        return Ok(format!("http://{rest}"));
    }
    if url.starts_with("http://") || url.starts_with("https://") {
        return Ok(url.to_string());
    }
    Ok(format!("http://{url}"))
}

fn parse_created(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n.as_i64().unwrap_or_default(),
        Value::String(s) => chrono::DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.timestamp())
            .unwrap_or_default(),
        _ => 0,
    }
}

/// Splits `registry:5000/repo:tag` into repository and tag.
fn split_repo_tag(repo_tag: &str) -> (String, String) {
    match repo_tag.rsplit_once(':') {
        Some((repo, tag)) if !tag.contains('/') => (repo.to_string(), tag.to_string()),
        _ => (repo_tag.to_string(), "latest".to_string()),
    }
}

fn images_from_wire(list: Vec<ListImage>) -> Vec<ImageSummary> {
    let mut images = Vec::new();
    for image in list {
        let tags = image.repo_tags.unwrap_or_default();
        if tags.is_empty() {
            images.push(ImageSummary {
                id: image.id,
                repository: "<none>".into(),
                tag: "<none>".into(),
            });
            continue;
        }
        for repo_tag in tags {
            let (repository, tag) = split_repo_tag(&repo_tag);
            images.push(ImageSummary {
                id: image.id.clone(),
                repository,
                tag,
            });
        }
    }
    images
}

/// Parses `[[ip:]host:]container[/protocol]`.
fn parse_publish(spec: &str) -> Result<PortMapping, EngineError> {
    let invalid = || EngineError::InvalidRequest(format!("invalid publish port: {spec}"));
    let (ports, protocol) = spec.split_once('/').unwrap_or((spec, "tcp"));
    let parse_port = |s: &str| s.parse::<u16>().map_err(|_| invalid());
    let parts: Vec<&str> = ports.split(':').collect();
    let (host_ip, host_port, container_port) = match parts.as_slice() {
        [container] => (String::new(), 0, parse_port(container)?),
        [host, container] => (String::new(), parse_port(host)?, parse_port(container)?),
        [ip, host, container] => {
            let host = if host.is_empty() { 0 } else { parse_port(host)? };
            (ip.to_string(), host, parse_port(container)?)
        }
        _ => return Err(invalid()),
    };
    if protocol.is_empty() {
        return Err(invalid());
    }
    Ok(PortMapping {
        host_ip,
        container_port,
        host_port,
        protocol: protocol.to_string(),
    })
}

/// Parses `port[/protocol]`.
fn parse_expose(spec: &str) -> Result<(u16, String), EngineError> {
    let (port, protocol) = spec.split_once('/').unwrap_or((spec, "tcp"));
    let port = port
        .parse::<u16>()
        .map_err(|_| EngineError::InvalidRequest(format!("invalid expose port: {spec}")))?;
    Ok((port, protocol.to_string()))
}

fn spec_from_options(options: &CreateOptions) -> Result<SpecGenerator, EngineError> {
    // Unparseable port tokens are dropped like any other malformed token.
    let portmappings = options
        .publish
        .iter()
        .filter_map(|p| parse_publish(p).inspect_err(|e| warn!("Dropping {e}")).ok())
        .collect();
    let expose = options
        .expose
        .iter()
        .filter_map(|e| parse_expose(e).inspect_err(|e| warn!("Dropping {e}")).ok())
        .collect();

    let volumes = match &options.volume {
        Some(name) if options.volume_dest.is_empty() => {
            return Err(EngineError::InvalidRequest(format!(
                "volume {name} needs a destination path"
            )));
        }
        Some(name) => vec![NamedVolume {
            name: name.clone(),
            dest: options.volume_dest.clone(),
        }],
        None => Vec::new(),
    };

    let non_empty = |s: &str| (!s.is_empty()).then(|| s.to_string());

    Ok(SpecGenerator {
        name: options.name.clone(),
        image: options.image.clone().unwrap_or_default(),
        pod: options.pod.clone(),
        labels: options.labels.clone(),
        remove: options.remove,
        hostname: options.hostname.clone(),
        static_ip: non_empty(&options.ip_address),
        static_mac: non_empty(&options.mac_address),
        cni_networks: options.network.iter().cloned().collect(),
        portmappings,
        expose,
        publish_image_ports: options.publish_all,
        dns_server: options.dns_servers.clone(),
        dns_option: options.dns_options.clone(),
        dns_search: options.dns_search.clone(),
        volumes,
        image_volume_mode: options.image_volume.clone(),
    })
}

fn diff_lines(changes: Vec<FileChange>) -> Vec<String> {
    changes
        .into_iter()
        .map(|change| {
            let kind = match change.kind {
                0 => "C",
                1 => "A",
                2 => "D",
                _ => "?",
            };
            format!("{kind} {}", change.path)
        })
        .collect()
}

/// Reads `NetworkSettings.Ports` from an inspect document.
fn port_lines(inspect: &Value) -> Vec<String> {
    let Some(ports) = inspect
        .pointer("/NetworkSettings/Ports")
        .and_then(Value::as_object)
    else {
        return Vec::new();
    };

    let mut lines = Vec::new();
    for (container_port, bindings) in ports {
        let Some(bindings) = bindings.as_array() else {
            continue;
        };
        for binding in bindings {
            let host_ip = binding
                .get("HostIp")
                .and_then(Value::as_str)
                .filter(|ip| !ip.is_empty())
                .unwrap_or("0.0.0.0");
            let host_port = binding
                .get("HostPort")
                .and_then(Value::as_str)
                .unwrap_or_default();
            lines.push(format!("{container_port} -> {host_ip}:{host_port}"));
        }
    }
    lines
}

fn prune_errors(reports: Vec<PruneReport>) -> Vec<String> {
    reports
        .into_iter()
        .filter_map(|report| {
            let err = match report.err? {
                Value::String(s) => s,
                Value::Null => return None,
                other => other.to_string(),
            };
            (!err.is_empty()).then(|| format!("{}: {err}", report.id))
        })
        .collect()
}

/// Splits a log body into lines, stripping stream frame headers if present.
///
/// Non-tty containers return stdout/stderr multiplexed in frames of
/// `[stream, 0, 0, 0, size_be_u32]` followed by `size` bytes.
pub fn demux_log_lines(raw: &[u8]) -> Vec<String> {
    let multiplexed = raw.len() >= 8 && raw[0] <= 2 && raw[1..4] == [0, 0, 0];
    let payload = if multiplexed {
        let mut out = Vec::with_capacity(raw.len());
        let mut rest = raw;
        while rest.len() >= 8 {
            let size = u32::from_be_bytes([rest[4], rest[5], rest[6], rest[7]]) as usize;
            let end = (8 + size).min(rest.len());
            out.extend_from_slice(&rest[8..end]);
            rest = &rest[end..];
        }
        out
    } else {
        raw.to_vec()
    };
    String::from_utf8_lossy(&payload)
        .lines()
        .map(str::to_string)
        .collect()
}

// ============================================================================
// Client Implementation
// ============================================================================

pub struct PodmanClient {
    base_url: String,
    api_version: String,
    client: reqwest::Client,
}

impl PodmanClient {
    pub fn new(base_url: &str, api_version: &str, timeout: Duration) -> Result<Self, EngineError> {
        let base_url = normalize_base_url(base_url)?;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| EngineError::Config(e.to_string()))?;
        info!("Podman client targeting {base_url} (api {api_version})");
        Ok(Self {
            base_url,
            api_version: api_version.trim_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{}/libpod{}", self.base_url, self.api_version, path);
        debug!("engine request: {method} {url}");
        self.client.request(method, url)
    }

    /// Sends a request, mapping transport failures and non-success statuses.
    ///
    /// 3xx counts as success: libpod answers 304 when a container is already
    /// in the requested state.
    async fn send(&self, request: RequestBuilder) -> Result<Response, EngineError> {
        let response = request
            .send()
            .await
            .map_err(|e| EngineError::Network(e.to_string()))?;
        let status = response.status();
        if status.is_success() || status.is_redirection() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let parsed = serde_json::from_str::<ErrorBody>(&body).unwrap_or_default();
        let message = [parsed.message, parsed.cause, body.trim().to_string()]
            .into_iter()
            .find(|m| !m.is_empty())
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            });
        warn!("engine error: {} - {}", status.as_u16(), message);
        Err(EngineError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, EngineError> {
        let response = self.send(self.request(Method::GET, path)).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| EngineError::Parse(e.to_string()))
    }

    async fn post_action(&self, path: &str) -> Result<(), EngineError> {
        self.send(self.request(Method::POST, path)).await?;
        Ok(())
    }

    async fn inspect_value(&self, id: &str) -> Result<Value, EngineError> {
        self.get_json(&format!("/containers/{id}/json")).await
    }
}

#[async_trait]
impl EngineClient for PodmanClient {
    fn name(&self) -> &str {
        "podman"
    }

    async fn list_containers(&self) -> Result<Vec<ContainerSummary>, EngineError> {
        let list: Vec<ListContainer> = self.get_json("/containers/json?all=true").await?;
        Ok(list
            .into_iter()
            .map(|c| ContainerSummary {
                created: parse_created(&c.created),
                id: c.id,
                names: c.names,
                image: c.image,
                pod_name: c.pod_name,
                state: c.state,
                status: c.status,
            })
            .collect())
    }

    async fn list_images(&self) -> Result<Vec<ImageSummary>, EngineError> {
        let list: Vec<ListImage> = self.get_json("/images/json").await?;
        Ok(images_from_wire(list))
    }

    async fn list_pods(&self) -> Result<Vec<PodSummary>, EngineError> {
        let list: Vec<ListPod> = self.get_json("/pods/json").await?;
        Ok(list
            .into_iter()
            .map(|p| PodSummary {
                id: p.id,
                name: p.name,
            })
            .collect())
    }

    async fn list_networks(&self) -> Result<Vec<NetworkSummary>, EngineError> {
        let list: Vec<ListNetwork> = self.get_json("/networks/json").await?;
        Ok(list
            .into_iter()
            .map(|n| NetworkSummary { name: n.name })
            .collect())
    }

    async fn list_volumes(&self) -> Result<Vec<VolumeSummary>, EngineError> {
        let list: Vec<ListVolume> = self.get_json("/volumes/json").await?;
        Ok(list
            .into_iter()
            .map(|v| VolumeSummary { name: v.name })
            .collect())
    }

    async fn create_container(&self, options: &CreateOptions) -> Result<Vec<String>, EngineError> {
        let spec = spec_from_options(options)?;
        info!(
            "Creating container: name={}, image={}",
            spec.name, spec.image
        );
        let response = self
            .send(self.request(Method::POST, "/containers/create").json(&spec))
            .await?;
        let created: CreateResponse = response
            .json()
            .await
            .map_err(|e| EngineError::Parse(e.to_string()))?;
        info!("Created container {}", created.id);
        Ok(created.warnings.unwrap_or_default())
    }

    async fn start_container(&self, id: &str) -> Result<(), EngineError> {
        self.post_action(&format!("/containers/{id}/start")).await
    }

    async fn stop_container(&self, id: &str) -> Result<(), EngineError> {
        self.post_action(&format!("/containers/{id}/stop")).await
    }

    async fn kill_container(&self, id: &str) -> Result<(), EngineError> {
        self.post_action(&format!("/containers/{id}/kill")).await
    }

    async fn pause_container(&self, id: &str) -> Result<(), EngineError> {
        self.post_action(&format!("/containers/{id}/pause")).await
    }

    async fn unpause_container(&self, id: &str) -> Result<(), EngineError> {
        self.post_action(&format!("/containers/{id}/unpause")).await
    }

    async fn remove_container(&self, id: &str) -> Result<(), EngineError> {
        self.send(self.request(Method::DELETE, &format!("/containers/{id}")))
            .await?;
        Ok(())
    }

    async fn rename_container(&self, id: &str, new_name: &str) -> Result<(), EngineError> {
        let request = self
            .request(Method::POST, &format!("/containers/{id}/rename"))
            .query(&[("name", new_name)]);
        self.send(request).await?;
        Ok(())
    }

    async fn inspect_container(&self, id: &str) -> Result<String, EngineError> {
        let value = self.inspect_value(id).await?;
        serde_json::to_string_pretty(&value).map_err(|e| EngineError::Parse(e.to_string()))
    }

    async fn container_logs(&self, id: &str) -> Result<Vec<String>, EngineError> {
        let request = self
            .request(Method::GET, &format!("/containers/{id}/logs"))
            .query(&[("stdout", "true"), ("stderr", "true")]);
        let response = self.send(request).await?;

        let mut raw = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| EngineError::Network(e.to_string()))?;
            raw.extend_from_slice(&chunk);
        }
        debug!("Read {} log bytes for {id}", raw.len());
        Ok(demux_log_lines(&raw))
    }

    async fn container_diff(&self, id: &str) -> Result<Vec<String>, EngineError> {
        let changes: Option<Vec<FileChange>> =
            self.get_json(&format!("/containers/{id}/changes")).await?;
        Ok(diff_lines(changes.unwrap_or_default()))
    }

    async fn container_port(&self, id: &str) -> Result<Vec<String>, EngineError> {
        let value = self.inspect_value(id).await?;
        Ok(port_lines(&value))
    }

    async fn container_top(&self, id: &str) -> Result<TopReport, EngineError> {
        let top: TopResponse = self.get_json(&format!("/containers/{id}/top")).await?;
        Ok(TopReport {
            titles: top.titles,
            processes: top.processes,
        })
    }

    async fn prune_containers(&self) -> Result<Vec<String>, EngineError> {
        let response = self
            .send(self.request(Method::POST, "/containers/prune"))
            .await?;
        let reports: Option<Vec<PruneReport>> = response
            .json()
            .await
            .map_err(|e| EngineError::Parse(e.to_string()))?;
        Ok(prune_errors(reports.unwrap_or_default()))
    }

    async fn system_prune(&self) -> Result<String, EngineError> {
        let request = self
            .request(Method::POST, "/system/prune")
            .query(&[("all", "true"), ("volumes", "true")]);
        let response = self.send(request).await?;
        let report: Value = response
            .json()
            .await
            .map_err(|e| EngineError::Parse(e.to_string()))?;
        serde_json::to_string_pretty(&report).map_err(|e| EngineError::Parse(e.to_string()))
    }

    async fn pull_image(&self, reference: &str) -> Result<(), EngineError> {
        let request = self
            .request(Method::POST, "/images/pull")
            .query(&[("reference", reference), ("quiet", "true")]);
        let response = self.send(request).await?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| EngineError::Network(e.to_string()))?;

        // The pull endpoint streams JSON progress lines and reports failures
        // inline with a 200 status.
        for line in body.lines() {
            if let Ok(event) = serde_json::from_str::<Value>(line)
                && let Some(error) = event.get("error").and_then(Value::as_str)
                && !error.is_empty()
            {
                return Err(EngineError::Api {
                    status,
                    message: error.to_string(),
                });
            }
        }
        info!("Pulled image {reference}");
        Ok(())
    }
}
