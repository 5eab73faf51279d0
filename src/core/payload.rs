//! # Command Payloads
//!
//! `CreateOptions` is the immutable value the create dialog hands to the
//! dispatcher. The parsing helpers here are deliberately lenient: malformed
//! tokens are dropped, never reported.

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

/// Everything needed to create a container.
///
/// Optional selections (`image`, `pod`, `network`, `volume`, `image_volume`)
/// are `None` when the drop-down sits on its empty placeholder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CreateOptions {
    pub name: String,
    pub image: Option<String>,
    pub pod: Option<String>,
    pub labels: BTreeMap<String, String>,
    pub remove: bool,
    pub hostname: String,
    pub ip_address: String,
    pub mac_address: String,
    pub network: Option<String>,
    pub publish: Vec<String>,
    pub expose: Vec<String>,
    pub publish_all: bool,
    pub dns_servers: Vec<String>,
    pub dns_options: Vec<String>,
    pub dns_search: Vec<String>,
    pub volume: Option<String>,
    pub volume_dest: String,
    pub image_volume: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("container name or image name is empty")]
    MissingNameOrImage,
}

impl CreateOptions {
    /// Checks the fields the engine cannot do without.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let image_missing = self.image.as_deref().is_none_or(str::is_empty);
        if self.name.is_empty() || image_missing {
            return Err(ValidationError::MissingNameOrImage);
        }
        Ok(())
    }
}

/// Splits a free-text list field on whitespace, discarding empty tokens.
pub fn split_tokens(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

/// Parses `key=value` tokens into a label map.
///
/// Each token is split once on `=`. Tokens without `=`, or with an empty key
/// or value, are dropped.
pub fn parse_labels(text: &str) -> BTreeMap<String, String> {
    text.split_whitespace()
        .filter_map(|token| token.split_once('='))
        .filter(|(key, value)| !key.is_empty() && !value.is_empty())
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

/// Maps a drop-down index onto the list it was built from.
///
/// Slot 0 is always the empty placeholder, so index `n > 0` refers to
/// `items[n - 1]`.
pub fn pick_option<T>(items: &[T], selected: usize) -> Option<&T> {
    selected.checked_sub(1).and_then(|i| items.get(i))
}
