//! Database migrations for user settings

use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20250301_000001_create_app_setting::Migration)]
    }
}

mod m20250301_000001_create_app_setting {
    use super::*;

    #[derive(DeriveMigrationName)]
    pub struct Migration;

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(AppSetting::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(AppSetting::Id)
                                .string()
                                .not_null()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(AppSetting::UserId).string())
                        .col(
                            ColumnDef::new(AppSetting::ParentId)
                                .string()
                                .not_null()
                                .default(""),
                        )
                        .col(ColumnDef::new(AppSetting::Name).string().not_null())
                        .col(
                            ColumnDef::new(AppSetting::Value)
                                .string()
                                .not_null()
                                .default(""),
                        )
                        .col(ColumnDef::new(AppSetting::Setting).text().not_null())
                        .col(
                            ColumnDef::new(AppSetting::ToolId)
                                .string()
                                .not_null()
                                .default(""),
                        )
                        .col(
                            ColumnDef::new(AppSetting::Position)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(AppSetting::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .col(
                            ColumnDef::new(AppSetting::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_app_setting_user")
                        .table(AppSetting::Table)
                        .col(AppSetting::UserId)
                        .col(AppSetting::Position)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(AppSetting::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum AppSetting {
        Table,
        Id,
        UserId,
        ParentId,
        Name,
        Value,
        Setting,
        ToolId,
        Position,
        CreatedAt,
        UpdatedAt,
    }
}
