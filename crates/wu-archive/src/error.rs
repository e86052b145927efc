use thiserror::Error;
use wu_core::WuError;

#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("Entry {index} has an empty name")]
    EmptyName { index: usize },
    #[error("Entry name is {len} bytes, limit is 65535: {name}")]
    NameTooLong { name: String, len: usize },
    #[error("Entry {name} is {size} bytes, limit is 4294967295")]
    EntryTooLarge { name: String, size: u64 },
    #[error("Archive has {0} entries, limit is 65535")]
    TooManyEntries(usize),
    #[error("Archive offset {0} does not fit in 32 bits")]
    ArchiveTooLarge(u64),
    #[error("Malformed archive: {0}")]
    Malformed(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ArchiveError> for WuError {
    fn from(err: ArchiveError) -> Self {
        match err {
            ArchiveError::Io(source) => WuError::io("<archive>", source),
            other => WuError::Archive(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ArchiveError>;
