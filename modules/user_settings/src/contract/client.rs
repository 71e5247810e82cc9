//! Native client trait for inter-module communication
//!
//! This trait defines the API that other modules use to read and write user settings.
//! NO HTTP - direct function calls for performance.

use super::{
    error::UserSettingsError,
    model::{SettingNode, SettingRecord},
};
use async_trait::async_trait;

/// User settings API for inter-module communication
#[async_trait]
pub trait UserSettingsApi: Send + Sync {
    /// Full settings tree of a user
    async fn query_user_setting(&self, user_id: &str)
        -> Result<Vec<SettingNode>, UserSettingsError>;

    /// Payload of the first setting named `setting_name`, as untyped JSON
    async fn get_user_setting_value(
        &self,
        user_id: &str,
        setting_name: &str,
    ) -> Result<Option<serde_json::Value>, UserSettingsError>;

    /// Replace the cached snapshot of a user with a pre-serialized value
    async fn update_user_setting(&self, user_id: &str, snapshot: &str)
        -> Result<(), UserSettingsError>;

    /// Rebuild the cached snapshot of a user from the record store
    async fn reload_user_setting(&self, user_id: &str) -> Result<(), UserSettingsError>;

    /// Built-in default settings
    async fn get_setting_template(&self) -> Result<Vec<SettingRecord>, UserSettingsError>;
}
