//! Built-in setting templates
//!
//! Template files are JSON objects of the form
//! `{"name": .., "pid": .., "value": .., "toolId": .., "setting": {..}}`.
//! Sources live in infra/templates.rs.

use crate::contract::{SettingRecord, UserSettingsError};
use async_trait::async_trait;
use serde_json::{Map, Value};

/// File name suffix every template file carries
pub const TEMPLATE_SUFFIX: &str = "-template.json";

/// Raw contents of one template file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFile {
    pub file_name: String,
    pub contents: String,
}

/// Supplier of template files
#[async_trait]
pub trait TemplateSource: Send + Sync {
    /// All template files, in a stable order
    async fn load(&self) -> anyhow::Result<Vec<TemplateFile>>;
}

/// Turn one template file into a setting record
///
/// Every field is required. The `setting` value is re-serialized to its canonical
/// string form and becomes the record payload. Template records have no id yet.
pub fn parse_template(file: &TemplateFile) -> Result<SettingRecord, UserSettingsError> {
    let fail = |reason: String| UserSettingsError::TemplateParse {
        file: file.file_name.clone(),
        reason,
    };

    let value: Value =
        serde_json::from_str(&file.contents).map_err(|e| fail(format!("invalid JSON: {e}")))?;
    let Value::Object(object) = value else {
        return Err(fail("expected a JSON object".to_string()));
    };

    let setting = object
        .get("setting")
        .ok_or_else(|| fail("missing field 'setting'".to_string()))?;
    let setting_payload = serde_json::to_string(setting)
        .map_err(|e| fail(format!("cannot serialize 'setting': {e}")))?;

    Ok(SettingRecord {
        id: String::new(),
        parent_id: required_str(&object, "pid").map_err(fail)?,
        name: required_str(&object, "name").map_err(fail)?,
        value: required_str(&object, "value").map_err(fail)?,
        setting_payload,
        tool_id: required_str(&object, "toolId").map_err(fail)?,
    })
}

fn required_str(object: &Map<String, Value>, field: &str) -> Result<String, String> {
    match object.get(field) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(format!(
            "field '{field}' must be a string, got {}",
            json_kind(other)
        )),
        None => Err(format!("missing field '{field}'")),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
