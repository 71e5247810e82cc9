//! Common test utilities: mock record store, instrumented cache and static templates

#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use user_settings::config::Config;
use user_settings::domain::cache::{CacheError, SettingsCache};
use user_settings::domain::repository::SettingRecordRepository;
use user_settings::domain::template::{TemplateFile, TemplateSource};
use user_settings::domain::Service;
use user_settings::{SettingRecord, SettingsFilter};

pub fn print_test_header(test_name: &str, purpose: &[&str]) {
    println!("\n🧪 TEST: {}", test_name);
    if let Some(first) = purpose.first() {
        println!("📋 PURPOSE: {}", first);
    }
    for line in purpose.iter().skip(1) {
        println!("   {}", line);
    }
}

pub fn record(id: &str, parent_id: &str, name: &str, payload: &str) -> SettingRecord {
    SettingRecord {
        id: id.to_string(),
        parent_id: parent_id.to_string(),
        name: name.to_string(),
        value: name.to_string(),
        setting_payload: payload.to_string(),
        tool_id: "system".to_string(),
    }
}

/// The shared user-info record used by most tests
pub fn default_user_info() -> SettingRecord {
    record("root", "", "user-info", r#"{"nickname":"guest"}"#)
}

// ===== Record store =====

#[derive(Clone)]
pub struct MockRecordRepo {
    user_records: Arc<RwLock<HashMap<String, Vec<SettingRecord>>>>,
    default_record: Arc<RwLock<Option<SettingRecord>>>,
    list_calls: Arc<AtomicUsize>,
    default_calls: Arc<AtomicUsize>,
    fail_list: Arc<RwLock<bool>>,
}

impl MockRecordRepo {
    pub fn new() -> Self {
        Self {
            user_records: Arc::new(RwLock::new(HashMap::new())),
            default_record: Arc::new(RwLock::new(Some(default_user_info()))),
            list_calls: Arc::new(AtomicUsize::new(0)),
            default_calls: Arc::new(AtomicUsize::new(0)),
            fail_list: Arc::new(RwLock::new(false)),
        }
    }

    pub fn set_user_records(&self, user_id: &str, records: Vec<SettingRecord>) {
        self.user_records
            .write()
            .insert(user_id.to_string(), records);
    }

    pub fn user_records(&self, user_id: &str) -> Vec<SettingRecord> {
        self.user_records
            .read()
            .get(user_id)
            .cloned()
            .unwrap_or_default()
    }

    pub fn set_default(&self, record: Option<SettingRecord>) {
        *self.default_record.write() = record;
    }

    pub fn fail_list(&self, fail: bool) {
        *self.fail_list.write() = fail;
    }

    /// Number of `list_settings` calls, i.e. reloads that reached the store
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn default_calls(&self) -> usize {
        self.default_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SettingRecordRepository for MockRecordRepo {
    async fn list_settings(&self, filter: &SettingsFilter) -> anyhow::Result<Vec<SettingRecord>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if *self.fail_list.read() {
            anyhow::bail!("connection refused");
        }
        Ok(self
            .user_records(&filter.user_id)
            .into_iter()
            .filter(|r| filter.tool_id.as_ref().map_or(true, |t| &r.tool_id == t))
            .collect())
    }

    async fn get_default_user_info_setting(&self) -> anyhow::Result<SettingRecord> {
        self.default_calls.fetch_add(1, Ordering::SeqCst);
        self.default_record
            .read()
            .clone()
            .ok_or_else(|| anyhow::anyhow!("default user-info setting not found"))
    }

    async fn update_setting(&self, user_id: &str, record: &SettingRecord) -> anyhow::Result<()> {
        let mut data = self.user_records.write();
        let existing = data
            .get_mut(user_id)
            .and_then(|rows| rows.iter_mut().find(|r| r.id == record.id))
            .ok_or_else(|| anyhow::anyhow!("setting '{}' not found", record.id))?;
        *existing = record.clone();
        Ok(())
    }

    async fn add_settings(&self, user_id: &str, records: &[SettingRecord]) -> anyhow::Result<()> {
        self.user_records
            .write()
            .entry(user_id.to_string())
            .or_default()
            .extend(records.iter().cloned());
        Ok(())
    }
}

// ===== Cache =====

/// Cache operation as seen by the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheOp {
    Get(String),
    Set(String, Duration),
    Delete(String),
}

/// Expiring cache on the tokio clock that records every call and can be told to fail
///
/// Expiry follows `tokio::time`, so tests may pause and advance the clock.
#[derive(Clone)]
pub struct InstrumentedCache {
    entries: Arc<Mutex<HashMap<String, (String, Instant)>>>,
    ops: Arc<Mutex<Vec<CacheOp>>>,
    fail_get: Arc<RwLock<bool>>,
    fail_set: Arc<RwLock<bool>>,
    fail_delete: Arc<RwLock<bool>>,
}

impl InstrumentedCache {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            ops: Arc::new(Mutex::new(Vec::new())),
            fail_get: Arc::new(RwLock::new(false)),
            fail_set: Arc::new(RwLock::new(false)),
            fail_delete: Arc::new(RwLock::new(false)),
        }
    }

    pub fn fail_get(&self, fail: bool) {
        *self.fail_get.write() = fail;
    }

    pub fn fail_set(&self, fail: bool) {
        *self.fail_set.write() = fail;
    }

    pub fn fail_delete(&self, fail: bool) {
        *self.fail_delete.write() = fail;
    }

    pub fn ops(&self) -> Vec<CacheOp> {
        self.ops.lock().clone()
    }

    pub fn clear_ops(&self) {
        self.ops.lock().clear();
    }

    /// Value currently stored, bypassing the failure switches
    pub async fn peek(&self, key: &str) -> Option<String> {
        self.live(key)
    }

    fn live(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .get(key)
            .filter(|(_, expires_at)| *expires_at > Instant::now())
            .map(|(value, _)| value.clone())
    }
}

#[async_trait]
impl SettingsCache for InstrumentedCache {
    async fn get(&self, key: &str) -> Result<String, CacheError> {
        self.ops.lock().push(CacheOp::Get(key.to_string()));
        if *self.fail_get.read() {
            return Err(CacheError::Backend("read timed out".to_string()));
        }
        self.live(key).ok_or(CacheError::NotFound)
    }

    async fn set_with_expiry(
        &self,
        key: &str,
        value: &str,
        ttl: Duration,
    ) -> Result<(), CacheError> {
        self.ops.lock().push(CacheOp::Set(key.to_string(), ttl));
        if *self.fail_set.read() {
            return Err(CacheError::Backend("out of memory".to_string()));
        }
        self.entries
            .lock()
            .insert(key.to_string(), (value.to_string(), Instant::now() + ttl));
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.ops.lock().push(CacheOp::Delete(key.to_string()));
        if *self.fail_delete.read() {
            return Err(CacheError::Backend("connection reset".to_string()));
        }
        self.entries.lock().remove(key);
        Ok(())
    }
}

// ===== Templates =====

#[derive(Clone, Default)]
pub struct StaticTemplates {
    files: Vec<TemplateFile>,
}

impl StaticTemplates {
    pub fn new(files: &[(&str, &str)]) -> Self {
        Self {
            files: files
                .iter()
                .map(|(name, contents)| TemplateFile {
                    file_name: (*name).to_string(),
                    contents: (*contents).to_string(),
                })
                .collect(),
        }
    }
}

#[async_trait]
impl TemplateSource for StaticTemplates {
    async fn load(&self) -> anyhow::Result<Vec<TemplateFile>> {
        Ok(self.files.clone())
    }
}

// ===== Fixture =====

pub struct Fixture {
    pub repo: MockRecordRepo,
    pub cache: InstrumentedCache,
    pub service: Service,
    pub config: Config,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_templates(StaticTemplates::default())
    }

    pub fn with_templates(templates: StaticTemplates) -> Self {
        let repo = MockRecordRepo::new();
        let cache = InstrumentedCache::new();
        let config = Config::default();
        let service = Service::new(
            Arc::new(repo.clone()),
            Arc::new(cache.clone()),
            Arc::new(templates),
            &config,
        );
        Self {
            repo,
            cache,
            service,
            config,
        }
    }
}
