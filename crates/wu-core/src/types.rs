use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One named blob destined for an archive.
///
/// `name` is stored byte-for-byte; no path normalization is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub name: Vec<u8>,
    pub content: Vec<u8>,
}

impl FileEntry {
    pub fn new(name: impl Into<Vec<u8>>, content: impl Into<Vec<u8>>) -> Self {
        Self { name: name.into(), content: content.into() }
    }

    /// Entry whose name and content are both UTF-8 text.
    pub fn text(name: &str, content: &str) -> Self {
        Self::new(name.as_bytes(), content.as_bytes())
    }

    pub fn name_lossy(&self) -> String {
        String::from_utf8_lossy(&self.name).into_owned()
    }
}

/// Which size gate the build applies to the minified artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    /// Oversized output fails the build.
    #[default]
    Release,
    /// Oversized output only warns.
    Dev,
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Release => f.write_str("release"),
            Self::Dev => f.write_str("dev"),
        }
    }
}

impl FromStr for BuildMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "release" => Ok(Self::Release),
            "dev" => Ok(Self::Dev),
            other => Err(format!("unknown build mode '{other}' (expected release or dev)")),
        }
    }
}

/// Byte limits applied to a built artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SizePolicy {
    pub hard_limit: Option<usize>,
    pub warn_limit: Option<usize>,
}

/// Outcome of checking a size against a [`SizePolicy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeCheck {
    Within,
    Warn { actual: usize, limit: usize },
    Exceeded { actual: usize, limit: usize },
}

impl SizePolicy {
    pub fn unlimited() -> Self {
        Self::default()
    }

    pub fn check(&self, actual: usize) -> SizeCheck {
        if let Some(limit) = self.hard_limit {
            if actual > limit {
                return SizeCheck::Exceeded { actual, limit };
            }
        }
        if let Some(limit) = self.warn_limit {
            if actual > limit {
                return SizeCheck::Warn { actual, limit };
            }
        }
        SizeCheck::Within
    }
}
