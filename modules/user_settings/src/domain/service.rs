//! Domain service - cache-aside orchestration of user settings

use super::cache::{CacheError, SettingsCache};
use super::repository::SettingRecordRepository;
use super::template::{parse_template, TemplateSource};
use super::tree::{build_tree, decode_snapshot, encode_snapshot, ROOT_PARENT_ID};
use crate::config::Config;
use crate::contract::{
    find_setting, ReloadOutcome, SettingNode, SettingRecord, SettingsFilter, UserSettingsError,
};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

/// Domain service for user settings
///
/// The cache holds the only long-lived copy of a user's snapshot; every call either
/// reads it from the cache or rebuilds it from the record store.
pub struct Service {
    records: Arc<dyn SettingRecordRepository>,
    cache: Arc<dyn SettingsCache>,
    templates: Arc<dyn TemplateSource>,
    config: Config,
}

impl Service {
    /// Create a new service instance
    pub fn new(
        records: Arc<dyn SettingRecordRepository>,
        cache: Arc<dyn SettingsCache>,
        templates: Arc<dyn TemplateSource>,
        config: &Config,
    ) -> Self {
        Self {
            records,
            cache,
            templates,
            config: config.clone(),
        }
    }

    // ===== Reads =====

    /// Decode the first setting named `setting_name` in the user's tree
    ///
    /// Returns `Ok(None)` when the user has no such setting.
    pub async fn get_user_setting<T: DeserializeOwned>(
        &self,
        user_id: &str,
        setting_name: &str,
    ) -> Result<Option<T>, UserSettingsError> {
        let nodes = self.query_user_setting(user_id).await?;

        let Some(node) = find_setting(&nodes, setting_name) else {
            tracing::debug!(user_id, setting_name, "Setting not present in user tree");
            return Ok(None);
        };

        node.decode_setting().map(Some).inspect_err(|e| {
            tracing::error!(user_id, setting_name, error = %e, "Failed to decode setting payload");
        })
    }

    /// Like [`Service::get_user_setting`], falling back to `T::default()` on a miss
    pub async fn get_user_setting_or_default<T: DeserializeOwned + Default>(
        &self,
        user_id: &str,
        setting_name: &str,
    ) -> Result<T, UserSettingsError> {
        Ok(self
            .get_user_setting(user_id, setting_name)
            .await?
            .unwrap_or_default())
    }

    /// The user's full settings tree
    pub async fn query_user_setting(
        &self,
        user_id: &str,
    ) -> Result<Vec<SettingNode>, UserSettingsError> {
        let snapshot = self.query_user_setting_raw(user_id).await?;
        decode_snapshot(&snapshot).inspect_err(|e| {
            tracing::error!(user_id, error = %e, "Cached user settings are malformed");
        })
    }

    /// The user's snapshot in its serialized form
    ///
    /// Only a missing key triggers a reload; any other cache failure is returned.
    pub async fn query_user_setting_raw(&self, user_id: &str) -> Result<String, UserSettingsError> {
        let key = self.config.cache_key(user_id);
        match self.cache.get(&key).await {
            Ok(snapshot) => Ok(snapshot),
            Err(CacheError::NotFound) => {
                tracing::debug!(user_id, key = %key, "User settings cache miss, reloading");
                Ok(self.reload_user_setting(user_id).await?.snapshot)
            }
            Err(e) => {
                tracing::error!(user_id, key = %key, error = %e, "Failed to read user settings cache");
                Err(UserSettingsError::cache(e))
            }
        }
    }

    // ===== Writes =====

    /// Encode a settings tree and store it as the user's snapshot
    ///
    /// Already-serialized snapshots go through [`Service::update_user_setting_raw`],
    /// which stores them verbatim.
    pub async fn update_user_setting(
        &self,
        user_id: &str,
        nodes: &[SettingNode],
    ) -> Result<(), UserSettingsError> {
        let snapshot = encode_snapshot(nodes)?;
        self.update_user_setting_raw(user_id, &snapshot).await
    }

    /// Store a pre-serialized snapshot for the user
    ///
    /// The entry is deleted before it is written, so a concurrent reader sees either a
    /// miss or the complete new value. A failed write after a successful delete leaves
    /// the entry empty until the next reload.
    pub async fn update_user_setting_raw(
        &self,
        user_id: &str,
        snapshot: &str,
    ) -> Result<(), UserSettingsError> {
        let key = self.config.cache_key(user_id);

        self.cache.delete(&key).await.map_err(|e| {
            tracing::error!(user_id, key = %key, error = %e, "Failed to invalidate user settings cache");
            UserSettingsError::cache(e)
        })?;

        self.cache
            .set_with_expiry(&key, snapshot, self.config.cache_ttl)
            .await
            .map_err(|e| {
                tracing::error!(user_id, key = %key, error = %e, "Failed to write user settings cache");
                UserSettingsError::cache(e)
            })
    }

    /// Rebuild the user's snapshot from the record store and cache it
    ///
    /// The default user-info record always comes first, followed by the user's own
    /// records. A failed cache write is reported in the outcome while the snapshot
    /// is still returned.
    pub async fn reload_user_setting(
        &self,
        user_id: &str,
    ) -> Result<ReloadOutcome, UserSettingsError> {
        let user_records = self
            .records
            .list_settings(&SettingsFilter::for_user(user_id))
            .await
            .map_err(|e| {
                tracing::error!(user_id, error = %e, "Failed to list user settings");
                UserSettingsError::record_store(format!("{e:#}"))
            })?;

        let default_record = self
            .records
            .get_default_user_info_setting()
            .await
            .map_err(|e| {
                tracing::error!(user_id, error = %e, "Failed to load default user-info setting");
                UserSettingsError::record_store(format!("{e:#}"))
            })?;

        let mut merged = Vec::with_capacity(user_records.len() + 1);
        merged.push(default_record);
        merged.extend(user_records);

        let tree = build_tree(ROOT_PARENT_ID, &merged).inspect_err(|e| {
            tracing::error!(user_id, error = %e, "Failed to build user settings tree");
        })?;
        let snapshot = encode_snapshot(&tree).inspect_err(|e| {
            tracing::error!(user_id, error = %e, "Failed to serialize user settings tree");
        })?;

        let cache_error = match self.update_user_setting_raw(user_id, &snapshot).await {
            Ok(()) => None,
            Err(e) => {
                tracing::error!(user_id, error = %e, "Reloaded user settings were not cached");
                Some(e)
            }
        };

        tracing::debug!(user_id, records = merged.len(), "User settings reloaded");
        Ok(ReloadOutcome {
            snapshot,
            cache_error,
        })
    }

    /// Persist a changed record and refresh the user's snapshot
    pub async fn save_user_setting(
        &self,
        user_id: &str,
        record: &SettingRecord,
    ) -> Result<ReloadOutcome, UserSettingsError> {
        self.records
            .update_setting(user_id, record)
            .await
            .map_err(|e| {
                tracing::error!(user_id, setting_id = %record.id, error = %e, "Failed to update setting");
                UserSettingsError::record_store(format!("{e:#}"))
            })?;

        self.reload_user_setting(user_id).await
    }

    // ===== Templates =====

    /// Built-in default settings, parsed from the template source
    pub async fn get_setting_template(&self) -> Result<Vec<SettingRecord>, UserSettingsError> {
        let files = self.templates.load().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to read setting templates");
            UserSettingsError::TemplateParse {
                file: "<template source>".to_string(),
                reason: format!("{e:#}"),
            }
        })?;

        files
            .iter()
            .map(parse_template)
            .collect::<Result<Vec<_>, _>>()
            .inspect_err(|e| {
                tracing::error!(error = %e, "Malformed setting template");
            })
    }

    /// Give a user their own copy of every template and refresh their snapshot
    ///
    /// Each copy gets a fresh id. A template whose `pid` names another template is
    /// re-parented onto that template's new id.
    pub async fn seed_user_settings(
        &self,
        user_id: &str,
    ) -> Result<ReloadOutcome, UserSettingsError> {
        let mut records = self.get_setting_template().await?;

        let mut ids: HashMap<String, String> = HashMap::with_capacity(records.len());
        for record in &mut records {
            record.id = Uuid::new_v4().to_string();
            ids.entry(record.name.clone())
                .or_insert_with(|| record.id.clone());
        }
        for record in &mut records {
            if let Some(parent) = ids.get(&record.parent_id) {
                record.parent_id.clone_from(parent);
            }
        }

        self.records
            .add_settings(user_id, &records)
            .await
            .map_err(|e| {
                tracing::error!(user_id, error = %e, "Failed to seed user settings");
                UserSettingsError::record_store(format!("{e:#}"))
            })?;
        tracing::info!(user_id, count = records.len(), "Seeded user settings from templates");

        self.reload_user_setting(user_id).await
    }
}
