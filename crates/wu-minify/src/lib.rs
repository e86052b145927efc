//! WebHaru minifier: comment/whitespace stripping for the utility script.
//!
//! - [`lexer`]: the character-stream minifier
//! - [`pipeline`]: banner, size gate and artifact writing for `wu build`

pub mod lexer;
pub mod pipeline;

pub use lexer::{minify, minify_with_stats, LexState, MinifyStats};
pub use pipeline::{ArtifactPaths, BuildPipeline, BuildResult};
