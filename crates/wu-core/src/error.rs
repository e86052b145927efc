use thiserror::Error;

#[derive(Error, Debug)]
pub enum WuError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Minified output is {actual} bytes, allowed maximum is {limit} bytes")]
    SizeLimitExceeded { actual: usize, limit: usize },
    #[error("Archive error: {0}")]
    Archive(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl WuError {
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}

pub type Result<T> = std::result::Result<T, WuError>;
