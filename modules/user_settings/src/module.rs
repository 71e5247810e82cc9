//! Module declaration and lifecycle implementation

use crate::api::native::NativeClient;
use crate::config::Config;
use crate::contract::UserSettingsApi;
use crate::domain::{Service, SettingsCache, TemplateSource};
use crate::infra::storage::SeaOrmSettingRecordRepository;
use crate::infra::templates::{DirTemplateSource, EmbeddedTemplateSource};
use anyhow::Result;
use parking_lot::RwLock;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// User settings module
///
/// Built once at startup; hands out the shared service and its native client.
#[derive(Default)]
pub struct UserSettingsModule {
    service: RwLock<Option<Arc<Service>>>,
}

impl UserSettingsModule {
    /// Run migrations and wire repositories, cache and templates into the service
    pub async fn init(
        &self,
        config: Config,
        db: Arc<DatabaseConnection>,
        cache: Arc<dyn SettingsCache>,
    ) -> Result<()> {
        self.migrate(&db).await?;

        // Build repositories
        let records = SeaOrmSettingRecordRepository::new(db)
            .with_default_user_info_name(config.default_user_info_name.clone());
        records.ensure_default_user_info().await?;

        let templates: Arc<dyn TemplateSource> = match &config.template_dir {
            Some(dir) => Arc::new(DirTemplateSource::new(dir.clone())),
            None => Arc::new(EmbeddedTemplateSource),
        };

        // Build domain service
        let service = Arc::new(Service::new(Arc::new(records), cache, templates, &config));
        *self.service.write() = Some(service);

        tracing::info!("User settings module initialized");
        Ok(())
    }

    /// Apply pending database migrations
    pub async fn migrate(&self, db: &DatabaseConnection) -> Result<()> {
        use crate::infra::storage::migrations::Migrator;
        use sea_orm_migration::MigratorTrait;

        Migrator::up(db, None).await?;
        tracing::info!("User settings migrations completed");
        Ok(())
    }

    /// The shared domain service
    pub fn service(&self) -> Result<Arc<Service>> {
        self.service
            .read()
            .as_ref()
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Service not initialized"))
    }

    /// In-process client over the shared service
    pub fn client(&self) -> Result<Arc<dyn UserSettingsApi>> {
        Ok(Arc::new(NativeClient::new(self.service()?)))
    }
}
