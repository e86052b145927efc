//! Artifact build: banner, minify, size gate, write.

use crate::lexer::{self, MinifyStats};
use std::path::{Path, PathBuf};
use wu_core::{BuildConfig, BuildMode, Result, SizeCheck, SizePolicy, WuError};

/// Build output with statistics.
#[derive(Debug, Clone)]
pub struct BuildResult {
    /// Banner followed by the minified source.
    pub minified: String,
    /// Banner, a newline, then the untouched source.
    pub readable: String,
    pub stats: MinifyStats,
    pub mode: BuildMode,
    pub size_check: SizeCheck,
}

impl BuildResult {
    /// Byte length of the minified artifact, banner included.
    pub fn size(&self) -> usize {
        self.minified.len()
    }

    pub fn ratio(&self) -> f64 {
        if self.readable.is_empty() { return 1.0; }
        self.minified.len() as f64 / self.readable.len() as f64
    }
}

/// Where the two artifacts are written.
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    pub minified: PathBuf,
    pub readable: PathBuf,
}

/// The build pipeline.
#[derive(Debug, Clone)]
pub struct BuildPipeline {
    pub banner: String,
    pub mode: BuildMode,
    pub policy: SizePolicy,
}

impl BuildPipeline {
    pub fn new(mode: BuildMode) -> Self {
        Self::from_config(&BuildConfig::default(), mode)
    }

    pub fn release() -> Self { Self::new(BuildMode::Release) }
    pub fn dev() -> Self { Self::new(BuildMode::Dev) }

    pub fn from_config(config: &BuildConfig, mode: BuildMode) -> Self {
        Self {
            banner: config.banner.clone(),
            mode,
            policy: config.policy(mode),
        }
    }

    pub fn with_banner(mut self, banner: impl Into<String>) -> Self {
        self.banner = banner.into();
        self
    }

    pub fn with_policy(mut self, policy: SizePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Produce both artifacts in memory and apply the size gate.
    pub fn build(&self, src: &str) -> Result<BuildResult> {
        let (body, stats) = lexer::minify_with_stats(src);

        let mut minified = String::with_capacity(self.banner.len() + body.len());
        minified.push_str(&self.banner);
        minified.push_str(&body);

        let readable = if self.banner.is_empty() {
            src.to_string()
        } else {
            format!("{}\n{}", self.banner, src)
        };

        let size_check = self.policy.check(minified.len());
        match size_check {
            SizeCheck::Exceeded { actual, limit } => {
                return Err(WuError::SizeLimitExceeded { actual, limit });
            }
            SizeCheck::Warn { actual, limit } => {
                tracing::warn!(actual, limit, mode = %self.mode, "minified output exceeds size warning threshold");
            }
            SizeCheck::Within => {}
        }

        tracing::debug!(
            input = stats.input_bytes,
            output = minified.len(),
            comments = stats.comments_removed,
            "minified source"
        );

        Ok(BuildResult { minified, readable, stats, mode: self.mode, size_check })
    }

    /// Read `src_path`, build, and write both artifacts.
    ///
    /// Nothing is written when the hard size limit is exceeded.
    pub fn run(&self, src_path: &Path, paths: &ArtifactPaths) -> Result<BuildResult> {
        let src = std::fs::read_to_string(src_path)
            .map_err(|e| WuError::io(src_path.display().to_string(), e))?;
        let result = self.build(&src)?;
        write_artifact(&paths.minified, &result.minified)?;
        write_artifact(&paths.readable, &result.readable)?;
        tracing::info!(path = %paths.minified.display(), bytes = result.size(), "built minified");
        tracing::info!(path = %paths.readable.display(), "built readable");
        Ok(result)
    }
}

impl Default for BuildPipeline {
    fn default() -> Self {
        Self::release()
    }
}

fn write_artifact(path: &Path, text: &str) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|e| WuError::io(dir.display().to_string(), e))?;
    }
    std::fs::write(path, text).map_err(|e| WuError::io(path.display().to_string(), e))
}
