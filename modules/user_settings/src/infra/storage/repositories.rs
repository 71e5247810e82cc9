//! SeaORM repository implementations

use crate::contract::{SettingRecord, SettingsFilter};
use crate::domain::repository::SettingRecordRepository;
use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, TransactionTrait,
};
use std::sync::Arc;

use super::entity;
use super::mapper::{new_active_model, update_active_model};

// ===== Setting Record Repository =====

pub struct SeaOrmSettingRecordRepository {
    db: Arc<DatabaseConnection>,
    default_user_info_name: String,
}

impl SeaOrmSettingRecordRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            db,
            default_user_info_name: "user-info".to_string(),
        }
    }

    /// Name of the shared record served by `get_default_user_info_setting`
    pub fn with_default_user_info_name(mut self, name: impl Into<String>) -> Self {
        self.default_user_info_name = name.into();
        self
    }

    /// Insert the shared user-info record unless it already exists
    pub async fn ensure_default_user_info(&self) -> Result<SettingRecord> {
        if let Some(existing) = self.find_default_user_info().await? {
            return Ok(existing);
        }

        let record = SettingRecord {
            id: self.default_user_info_name.clone(),
            parent_id: String::new(),
            name: self.default_user_info_name.clone(),
            value: "User info".to_string(),
            setting_payload: "{}".to_string(),
            tool_id: "system".to_string(),
        };
        entity::Entity::insert(new_active_model(&record, None, 0))
            .exec_without_returning(&*self.db)
            .await?;
        tracing::info!(name = %record.name, "Created default user-info setting");
        Ok(record)
    }

    /// Insert records for a user on an existing connection or transaction
    pub async fn add_settings_in<C: ConnectionTrait>(
        conn: &C,
        user_id: &str,
        records: &[SettingRecord],
    ) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }

        let existing = entity::Entity::find()
            .filter(entity::Column::UserId.eq(user_id))
            .count(conn)
            .await?;
        let start = i32::try_from(existing)?;

        let mut models = Vec::with_capacity(records.len());
        for (offset, record) in records.iter().enumerate() {
            let position = start
                .checked_add(i32::try_from(offset)?)
                .ok_or_else(|| anyhow!("setting position overflow for user {user_id}"))?;
            models.push(new_active_model(record, Some(user_id), position));
        }

        entity::Entity::insert_many(models)
            .exec_without_returning(conn)
            .await?;
        Ok(())
    }

    async fn find_default_user_info(&self) -> Result<Option<SettingRecord>> {
        let result = entity::Entity::find()
            .filter(entity::Column::UserId.is_null())
            .filter(entity::Column::Name.eq(self.default_user_info_name.as_str()))
            .order_by_asc(entity::Column::Position)
            .one(&*self.db)
            .await?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl SettingRecordRepository for SeaOrmSettingRecordRepository {
    async fn list_settings(&self, filter: &SettingsFilter) -> Result<Vec<SettingRecord>> {
        let mut query = entity::Entity::find()
            .filter(entity::Column::UserId.eq(filter.user_id.as_str()));

        if let Some(tool_id) = &filter.tool_id {
            query = query.filter(entity::Column::ToolId.eq(tool_id.as_str()));
        }

        let results = query
            .order_by_asc(entity::Column::Position)
            .order_by_asc(entity::Column::Id)
            .all(&*self.db)
            .await?;

        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn get_default_user_info_setting(&self) -> Result<SettingRecord> {
        self.find_default_user_info().await?.ok_or_else(|| {
            anyhow!(
                "default user-info setting '{}' not found",
                self.default_user_info_name
            )
        })
    }

    async fn update_setting(&self, user_id: &str, record: &SettingRecord) -> Result<()> {
        let result = entity::Entity::update_many()
            .set(update_active_model(record))
            .filter(entity::Column::Id.eq(record.id.as_str()))
            .filter(entity::Column::UserId.eq(user_id))
            .exec(&*self.db)
            .await?;

        if result.rows_affected == 0 {
            bail!("setting '{}' not found for user {}", record.id, user_id);
        }
        Ok(())
    }

    async fn add_settings(&self, user_id: &str, records: &[SettingRecord]) -> Result<()> {
        let txn = self.db.begin().await?;
        Self::add_settings_in(&txn, user_id, records).await?;
        txn.commit().await?;
        Ok(())
    }
}
