//! Flat-to-tree materialization of setting records

use crate::contract::{SettingNode, SettingRecord, UserSettingsError};
use std::collections::{HashMap, HashSet};

/// Root selector used when assembling a user's snapshot
pub const ROOT_PARENT_ID: &str = "";

/// Upper bound on nesting; real trees are two or three levels deep
pub const MAX_TREE_DEPTH: usize = 64;

/// Build an ordered forest out of flat records
///
/// Top-level nodes are the records whose `parent_id` equals `root_id`, followed in
/// input order by records whose `parent_id` names no record in the batch. Children
/// are attached by looking up each record's own id as a parent key, keeping input
/// order among siblings. Every record lands in the forest exactly once.
///
/// Cyclic parent links and nesting deeper than [`MAX_TREE_DEPTH`] are rejected.
pub fn build_tree(
    root_id: &str,
    records: &[SettingRecord],
) -> Result<Vec<SettingNode>, UserSettingsError> {
    let mut buckets: HashMap<&str, Vec<usize>> = HashMap::new();
    for (idx, record) in records.iter().enumerate() {
        buckets
            .entry(record.parent_id.as_str())
            .or_default()
            .push(idx);
    }
    let ids: HashSet<&str> = records.iter().map(|r| r.id.as_str()).collect();

    let mut builder = TreeBuilder {
        records,
        buckets,
        placed: vec![false; records.len()],
        ancestors: HashSet::from([root_id]),
    };

    let mut forest = builder.attach_children(root_id, 0)?;
    builder.ancestors.clear();

    for (idx, record) in records.iter().enumerate() {
        let parent = record.parent_id.as_str();
        if parent == root_id || ids.contains(parent) || builder.placed[idx] {
            continue;
        }
        tracing::debug!(
            id = %record.id,
            parent_id = parent,
            "Promoting setting with unknown parent to top level"
        );
        forest.push(builder.attach_node(idx, 0)?);
    }

    if let Some(idx) = builder.placed.iter().position(|placed| !placed) {
        let record = &records[idx];
        return Err(UserSettingsError::DataIntegrity {
            message: format!(
                "setting '{}' is part of a parent cycle (parent '{}')",
                record.id, record.parent_id
            ),
        });
    }

    Ok(forest)
}

struct TreeBuilder<'a> {
    records: &'a [SettingRecord],
    buckets: HashMap<&'a str, Vec<usize>>,
    placed: Vec<bool>,
    ancestors: HashSet<&'a str>,
}

impl TreeBuilder<'_> {
    fn attach_children(
        &mut self,
        parent_id: &str,
        depth: usize,
    ) -> Result<Vec<SettingNode>, UserSettingsError> {
        let Some(children) = self.buckets.get(parent_id).cloned() else {
            return Ok(Vec::new());
        };

        if depth >= MAX_TREE_DEPTH {
            return Err(UserSettingsError::DataIntegrity {
                message: format!(
                    "setting tree exceeds maximum depth ({MAX_TREE_DEPTH}) below '{parent_id}'"
                ),
            });
        }

        let records = self.records;
        let mut nodes = Vec::with_capacity(children.len());
        for idx in children {
            let id = records[idx].id.as_str();
            if self.ancestors.contains(id) {
                return Err(UserSettingsError::DataIntegrity {
                    message: format!("cyclic parent link at setting '{id}' (parent '{parent_id}')"),
                });
            }
            if self.placed[idx] {
                continue;
            }
            nodes.push(self.attach_node(idx, depth)?);
        }
        Ok(nodes)
    }

    fn attach_node(&mut self, idx: usize, depth: usize) -> Result<SettingNode, UserSettingsError> {
        let records = self.records;
        let record = &records[idx];
        self.placed[idx] = true;
        self.ancestors.insert(record.id.as_str());
        let children = self.attach_children(&record.id, depth + 1);
        self.ancestors.remove(record.id.as_str());

        Ok(SettingNode {
            record: record.clone(),
            children: children?,
        })
    }
}

/// Canonical string form of a forest
pub fn encode_snapshot(nodes: &[SettingNode]) -> Result<String, UserSettingsError> {
    serde_json::to_string(nodes).map_err(UserSettingsError::decode)
}

/// Parse a snapshot produced by [`encode_snapshot`]
pub fn decode_snapshot(snapshot: &str) -> Result<Vec<SettingNode>, UserSettingsError> {
    serde_json::from_str(snapshot).map_err(|e| UserSettingsError::Decode {
        message: format!("cached snapshot: {e}"),
    })
}
