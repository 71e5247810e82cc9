//! Template sources: a directory on disk, or the templates bundled with the crate

use crate::domain::template::{TemplateFile, TemplateSource, TEMPLATE_SUFFIX};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;

const BUNDLED: &[(&str, &str)] = &[
    (
        "editor-template.json",
        include_str!("../../setting_template/editor-template.json"),
    ),
    (
        "general-template.json",
        include_str!("../../setting_template/general-template.json"),
    ),
    (
        "notification-template.json",
        include_str!("../../setting_template/notification-template.json"),
    ),
    (
        "theme-template.json",
        include_str!("../../setting_template/theme-template.json"),
    ),
];

/// Templates compiled into the crate
#[derive(Clone, Copy, Default)]
pub struct EmbeddedTemplateSource;

#[async_trait]
impl TemplateSource for EmbeddedTemplateSource {
    async fn load(&self) -> Result<Vec<TemplateFile>> {
        Ok(BUNDLED
            .iter()
            .map(|(file_name, contents)| TemplateFile {
                file_name: (*file_name).to_string(),
                contents: (*contents).to_string(),
            })
            .collect())
    }
}

/// Templates read from `*-template.json` files in a directory, ordered by file name
#[derive(Clone)]
pub struct DirTemplateSource {
    dir: PathBuf,
}

impl DirTemplateSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl TemplateSource for DirTemplateSource {
    async fn load(&self) -> Result<Vec<TemplateFile>> {
        let mut entries = tokio::fs::read_dir(&self.dir)
            .await
            .with_context(|| format!("reading template directory {}", self.dir.display()))?;

        let mut paths = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let is_template = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.ends_with(TEMPLATE_SUFFIX));
            if is_template && entry.file_type().await?.is_file() {
                paths.push(path);
            }
        }
        paths.sort();

        let mut files = Vec::with_capacity(paths.len());
        for path in paths {
            let contents = tokio::fs::read_to_string(&path)
                .await
                .with_context(|| format!("reading template {}", path.display()))?;
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            files.push(TemplateFile {
                file_name,
                contents,
            });
        }

        tracing::debug!(dir = %self.dir.display(), count = files.len(), "Loaded setting templates");
        Ok(files)
    }
}
