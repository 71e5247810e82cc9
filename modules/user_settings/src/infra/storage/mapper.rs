//! Entity to model mappers
//!
//! Conversions between SeaORM entities and contract models

use super::entity;
use crate::contract::SettingRecord;

impl From<entity::Model> for SettingRecord {
    fn from(entity: entity::Model) -> Self {
        Self {
            id: entity.id,
            parent_id: entity.parent_id,
            name: entity.name,
            value: entity.value,
            setting_payload: entity.setting,
            tool_id: entity.tool_id,
        }
    }
}

/// Active model for inserting `record` as a row owned by `user_id`
pub(crate) fn new_active_model(
    record: &SettingRecord,
    user_id: Option<&str>,
    position: i32,
) -> entity::ActiveModel {
    use sea_orm::ActiveValue::Set;

    let now = chrono::Utc::now();
    entity::ActiveModel {
        id: Set(record.id.clone()),
        user_id: Set(user_id.map(str::to_string)),
        parent_id: Set(record.parent_id.clone()),
        name: Set(record.name.clone()),
        value: Set(record.value.clone()),
        setting: Set(record.setting_payload.clone()),
        tool_id: Set(record.tool_id.clone()),
        position: Set(position),
        created_at: Set(now),
        updated_at: Set(now),
    }
}

/// Active model touching only the content columns of an existing row
///
/// Meant for `update_many().set(..)` filtered by id, so the key stays unset.
pub(crate) fn update_active_model(record: &SettingRecord) -> entity::ActiveModel {
    use sea_orm::ActiveValue::{NotSet, Set};

    entity::ActiveModel {
        id: NotSet,
        user_id: NotSet,
        parent_id: Set(record.parent_id.clone()),
        name: Set(record.name.clone()),
        value: Set(record.value.clone()),
        setting: Set(record.setting_payload.clone()),
        tool_id: Set(record.tool_id.clone()),
        position: NotSet,
        created_at: NotSet,
        updated_at: Set(chrono::Utc::now()),
    }
}
