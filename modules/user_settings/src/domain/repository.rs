//! Repository traits for data access
//!
//! These traits define the interface for data access operations.
//! Implementations are in infra/storage/repositories.rs

use crate::contract::{SettingRecord, SettingsFilter};
use anyhow::Result;
use async_trait::async_trait;

/// Repository for flat setting records
#[async_trait]
pub trait SettingRecordRepository: Send + Sync {
    /// List the records matching a filter, in stored order
    async fn list_settings(&self, filter: &SettingsFilter) -> Result<Vec<SettingRecord>>;

    /// The shared "user-info" record placed at the top of every user's tree
    async fn get_default_user_info_setting(&self) -> Result<SettingRecord>;

    /// Overwrite an existing record of a user
    async fn update_setting(&self, user_id: &str, record: &SettingRecord) -> Result<()>;

    /// Insert records for a user, all or nothing
    async fn add_settings(&self, user_id: &str, records: &[SettingRecord]) -> Result<()>;
}
