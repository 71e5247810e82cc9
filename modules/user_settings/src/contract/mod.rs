//! Contract layer - public API for inter-module communication
//!
//! This layer contains the setting record/tree models, the error type and the
//! native client trait.

pub mod client;
pub mod error;
pub mod model;

pub use client::UserSettingsApi;
pub use error::UserSettingsError;
pub use model::{find_setting, ReloadOutcome, SettingNode, SettingRecord, SettingsFilter};
