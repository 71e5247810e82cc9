//! Native client implementation - wraps domain service for in-process calls

use crate::contract::{SettingNode, SettingRecord, UserSettingsApi, UserSettingsError};
use crate::domain::Service;
use async_trait::async_trait;
use std::sync::Arc;

/// Native client implementation that directly calls the domain service
///
/// This client is used for in-process communication without HTTP overhead.
#[derive(Clone)]
pub struct NativeClient {
    service: Arc<Service>,
}

impl NativeClient {
    /// Create a new native client
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl UserSettingsApi for NativeClient {
    async fn query_user_setting(
        &self,
        user_id: &str,
    ) -> Result<Vec<SettingNode>, UserSettingsError> {
        self.service.query_user_setting(user_id).await
    }

    async fn get_user_setting_value(
        &self,
        user_id: &str,
        setting_name: &str,
    ) -> Result<Option<serde_json::Value>, UserSettingsError> {
        self.service.get_user_setting(user_id, setting_name).await
    }

    async fn update_user_setting(
        &self,
        user_id: &str,
        snapshot: &str,
    ) -> Result<(), UserSettingsError> {
        self.service.update_user_setting_raw(user_id, snapshot).await
    }

    async fn reload_user_setting(&self, user_id: &str) -> Result<(), UserSettingsError> {
        let outcome = self.service.reload_user_setting(user_id).await?;
        match outcome.cache_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    async fn get_setting_template(&self) -> Result<Vec<SettingRecord>, UserSettingsError> {
        self.service.get_setting_template().await
    }
}
