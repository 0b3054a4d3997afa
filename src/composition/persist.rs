//! Image persistence across sessions.
//!
//! Uploaded images survive restarts through a small key-value vault. The
//! stored value is the image's full data URI; an empty string means the
//! slot was cleared.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::foundation::error::DesignResult;

/// Vault key for the candidate portrait.
pub const CANDIDATE_IMAGE_KEY: &str = "savedCandidateImage";
/// Vault key for the logo.
pub const LOGO_IMAGE_KEY: &str = "savedLogo";

/// String key-value store for persisted images.
pub trait ImageVault {
    /// Read a stored value. `None` when the key was never written or was
    /// cleared.
    fn get(&self, key: &str) -> Option<String>;
    /// Write a value; an empty string clears the key.
    fn set(&mut self, key: &str, value: &str) -> DesignResult<()>;
}

/// Vault backed by a single pretty-printed JSON file.
pub struct JsonFileVault {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileVault {
    /// Open a vault at `path`, starting empty when the file does not exist.
    pub fn open(path: impl Into<PathBuf>) -> DesignResult<Self> {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw)
                .with_context(|| format!("parse vault file {}", path.display()))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(anyhow::Error::new(e)
                    .context(format!("read vault file {}", path.display()))
                    .into());
            }
        };
        Ok(Self { path, entries })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> DesignResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create vault dir {}", parent.display()))?;
        }
        let raw = serde_json::to_string_pretty(&self.entries).context("serialize vault")?;
        std::fs::write(&self.path, raw)
            .with_context(|| format!("write vault file {}", self.path.display()))?;
        Ok(())
    }
}

impl ImageVault for JsonFileVault {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).filter(|v| !v.is_empty()).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> DesignResult<()> {
        self.entries.insert(key.to_owned(), value.to_owned());
        self.flush()
    }
}

/// In-memory vault for tests.
#[derive(Default)]
pub struct MemoryVault {
    entries: BTreeMap<String, String>,
}

impl MemoryVault {
    /// Empty vault.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ImageVault for MemoryVault {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).filter(|v| !v.is_empty()).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> DesignResult<()> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/persist.rs"]
mod tests;
