//! SeaORM entities for database tables

use sea_orm::entity::prelude::*;

/// App settings table entity
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "app_setting")]
pub struct Model {
    /// Row identifier
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Owning user; NULL for shared rows such as the default user-info record
    pub user_id: Option<String>,

    /// Parent row identifier ("" for top-level rows)
    pub parent_id: String,

    /// Logical setting key
    pub name: String,

    /// Display/default value
    pub value: String,

    /// JSON-encoded configuration value
    #[sea_orm(column_type = "Text")]
    pub setting: String,

    /// Grouping/namespace tag
    pub tool_id: String,

    /// Position among the user's rows
    pub position: i32,

    /// Creation timestamp
    pub created_at: DateTimeUtc,

    /// Last update timestamp
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
