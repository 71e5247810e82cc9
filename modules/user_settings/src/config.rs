//! Configuration for user settings module

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// User settings configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Lifetime of a cached user snapshot
    #[serde(default = "default_cache_ttl", with = "humantime_serde")]
    pub cache_ttl: Duration,

    /// Namespace prefix of snapshot cache keys
    #[serde(default = "default_cache_key_prefix")]
    pub cache_key_prefix: String,

    /// Name of the shared record placed at the top of every user's tree
    #[serde(default = "default_user_info_name")]
    pub default_user_info_name: String,

    /// Directory of `*-template.json` files; bundled templates are used when unset
    #[serde(default)]
    pub template_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_ttl: default_cache_ttl(),
            cache_key_prefix: default_cache_key_prefix(),
            default_user_info_name: default_user_info_name(),
            template_dir: None,
        }
    }
}

impl Config {
    /// Parse a YAML document holding the module section
    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Cache key of a user's snapshot
    pub fn cache_key(&self, user_id: &str) -> String {
        format!("{}:{}", self.cache_key_prefix, user_id)
    }
}

fn default_cache_ttl() -> Duration {
    Duration::from_secs(30 * 60)
}

fn default_cache_key_prefix() -> String {
    "USER_SETTING".to_string()
}

fn default_user_info_name() -> String {
    "user-info".to_string()
}
