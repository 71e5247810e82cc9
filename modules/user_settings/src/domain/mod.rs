//! Domain layer - business logic and services

pub mod cache;
pub mod repository;
pub mod service;
pub mod template;
pub mod tree;

pub use cache::{CacheError, SettingsCache};
pub use repository::SettingRecordRepository;
pub use service::Service;
pub use template::{TemplateFile, TemplateSource};
pub use tree::build_tree;
