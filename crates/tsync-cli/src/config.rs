use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::debug;
use tsync_source::{
    FileTableSource, HtmlTableExtractor, HttpTableSource, SourceTableProvider, DEFAULT_TABLE_CLASS,
};
use tsync_store::JsonDocumentTable;
use tsync_sync::SyncOptions;

pub const DEFAULT_CONFIG_PATH: &str = "tsync.toml";

/// Top-level `tsync.toml`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub source: SourceConfig,
    pub remote: RemoteConfig,
    pub sync: SyncOptions,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub url: String,
    pub table_class: String,
    pub timeout_secs: u64,
    /// Read a saved page from disk instead of fetching `url`.
    pub file: Option<PathBuf>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: "https://confluence.hflabs.ru/pages/viewpage.action?pageId=1181220999".into(),
            table_class: DEFAULT_TABLE_CLASS.into(),
            timeout_secs: 15,
            file: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// JSON document holding the remote table.
    pub document: PathBuf,
    pub table_index: usize,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self { document: PathBuf::from("document.json"), table_index: 0 }
    }
}

impl Config {
    /// Load `path`, or `tsync.toml` if no path is given.
    ///
    /// A missing default file yields the built-in defaults; a missing
    /// explicit file is an error.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let (path, explicit) = match path {
            Some(p) => (p, true),
            None => (Path::new(DEFAULT_CONFIG_PATH), false),
        };
        if !explicit && !path.exists() {
            debug!("no {} found; using defaults", DEFAULT_CONFIG_PATH);
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn parse(text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn source(&self) -> anyhow::Result<Box<dyn SourceTableProvider>> {
        let extractor = HtmlTableExtractor::new(self.source.table_class.clone());
        Ok(match &self.source.file {
            Some(file) => Box::new(FileTableSource::new(file, extractor)),
            None => Box::new(HttpTableSource::new(
                self.source.url.clone(),
                extractor,
                Duration::from_secs(self.source.timeout_secs),
            )?),
        })
    }

    pub fn remote(&self) -> JsonDocumentTable {
        JsonDocumentTable::new(self.remote.document.clone(), self.remote.table_index)
    }
}
