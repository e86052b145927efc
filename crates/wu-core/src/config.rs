use crate::error::{Result, WuError};
use crate::types::{BuildMode, SizePolicy};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_BANNER: &str = "/*! WebHaru Utils v1 - Refactored | MIT License */";
pub const RELEASE_SIZE_LIMIT: usize = 12 * 1024;
pub const DEV_SIZE_WARNING: usize = 16 * 1024;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WuConfig {
    pub build: BuildConfig,
    pub archive: ArchiveConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// License comment prepended to both artifacts.
    pub banner: String,
    pub mode: BuildMode,
    pub release_limit: usize,
    pub dev_warn_limit: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchiveConfig {
    /// Directory every bundled entry is placed under.
    pub prefix: String,
    pub download_name: String,
    pub readme_lines: usize,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            banner: DEFAULT_BANNER.into(),
            mode: BuildMode::Release,
            release_limit: RELEASE_SIZE_LIMIT,
            dev_warn_limit: DEV_SIZE_WARNING,
        }
    }
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            prefix: "your-snippet".into(),
            download_name: "wu-snippet.zip".into(),
            readme_lines: 80,
        }
    }
}

impl BuildConfig {
    /// Size gate for the given mode.
    pub fn policy(&self, mode: BuildMode) -> SizePolicy {
        match mode {
            BuildMode::Release => SizePolicy { hard_limit: Some(self.release_limit), warn_limit: None },
            BuildMode::Dev => SizePolicy { hard_limit: None, warn_limit: Some(self.dev_warn_limit) },
        }
    }
}

impl WuConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config file. Missing keys fall back to defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| WuError::io(path.display().to_string(), e))?;
        tracing::debug!(path = %path.display(), "loaded config");
        Self::from_json(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if self.archive.prefix.starts_with('/') {
            return Err(WuError::Config(format!(
                "archive prefix must be relative, got '{}'",
                self.archive.prefix
            )));
        }
        if self.archive.readme_lines == 0 {
            return Err(WuError::Config("readme_lines must be at least 1".into()));
        }
        if !self.build.banner.is_empty() && !self.build.banner.starts_with("/*!") {
            return Err(WuError::Config("banner must be a /*! license comment */".into()));
        }
        Ok(())
    }
}
