//! WebHaru archive: CRC-32 and a store-only ZIP encoder.
//!
//! Archives are assembled entirely in memory; writing them out is left to
//! the caller.

pub mod bundle;
pub mod crc32;
pub mod error;
pub mod zip;

pub use bundle::SnippetBundle;
pub use crc32::{crc32, Crc32};
pub use error::{ArchiveError, Result};
pub use self::zip::{encode_archive, list_entries, read_end_record, write_archive, ArchiveWriter, DirectoryEntry, EndRecord};
