//! User Settings Module
//!
//! Cache-aside store of per-user settings. A user's settings are materialized as a
//! tree merged from a shared default "user-info" record and the user's own records,
//! cached as a serialized snapshot and rebuilt from the record store on a miss.

// Public exports
pub mod contract;
pub use contract::{
    client::UserSettingsApi, error::UserSettingsError, ReloadOutcome, SettingNode, SettingRecord,
    SettingsFilter,
};

pub mod module;
pub use module::UserSettingsModule;

// Internal modules (hidden from public API)
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
