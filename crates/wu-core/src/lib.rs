//! Shared types for the WebHaru snippet toolchain.

pub mod config;
pub mod error;
pub mod types;

pub use config::{ArchiveConfig, BuildConfig, WuConfig};
pub use error::{Result, WuError};
pub use types::{BuildMode, FileEntry, SizeCheck, SizePolicy};
