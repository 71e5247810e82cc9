//! Contract models for user settings
//!
//! These models double as the wire format of the cached snapshot, so they carry
//! serde derives with the JSON field names used by the settings templates.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::error::UserSettingsError;

/// One flat setting row as stored by the record store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingRecord {
    /// Row identifier, unique within a user's set
    #[serde(default)]
    pub id: String,
    /// Identifier of the parent row ("" for top-level rows)
    #[serde(rename = "pid", default)]
    pub parent_id: String,
    /// Logical setting key, not unique across the tree
    pub name: String,
    /// Display/default value
    #[serde(default)]
    pub value: String,
    /// JSON-encoded configuration value
    #[serde(rename = "setting", default)]
    pub setting_payload: String,
    /// Grouping/namespace tag
    #[serde(default)]
    pub tool_id: String,
}

/// A record together with its ordered children
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingNode {
    #[serde(rename = "entity")]
    pub record: SettingRecord,
    #[serde(default)]
    pub children: Vec<SettingNode>,
}

impl SettingNode {
    /// Decode the setting payload into the caller's type
    pub fn decode_setting<T: DeserializeOwned>(&self) -> Result<T, UserSettingsError> {
        serde_json::from_str(&self.record.setting_payload).map_err(|e| UserSettingsError::Decode {
            message: format!("setting '{}' payload: {}", self.record.name, e),
        })
    }

    /// Depth-first, pre-order search for the first node named `name`
    pub fn find(&self, name: &str) -> Option<&SettingNode> {
        if self.record.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(name))
    }

    /// Number of nodes in this subtree, including the node itself
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(SettingNode::node_count).sum::<usize>()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Search a forest in order, returning the first node named `name`
pub fn find_setting<'a>(nodes: &'a [SettingNode], name: &str) -> Option<&'a SettingNode> {
    nodes.iter().find_map(|node| node.find(name))
}

/// Record store query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsFilter {
    /// Owner of the records
    pub user_id: String,
    /// Restrict to one tool namespace
    pub tool_id: Option<String>,
}

impl SettingsFilter {
    pub fn for_user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            tool_id: None,
        }
    }

    pub fn with_tool(mut self, tool_id: impl Into<String>) -> Self {
        self.tool_id = Some(tool_id.into());
        self
    }
}

/// Result of rebuilding a user's snapshot from the record store
///
/// `snapshot` is always the freshly computed data. `cache_error` is set when the
/// snapshot could not be written back; the next read will then miss and reload again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReloadOutcome {
    pub snapshot: String,
    pub cache_error: Option<UserSettingsError>,
}

impl ReloadOutcome {
    pub fn is_cached(&self) -> bool {
        self.cache_error.is_none()
    }
}
