//! Store-only ZIP encoder.
//!
//! Layout: one local header + raw data per entry, then one central directory
//! record per entry in the same order, then the end-of-central-directory
//! record. All integers are little-endian. Nothing is compressed.

use crate::crc32::crc32;
use crate::error::{ArchiveError, Result};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Cursor, ErrorKind, Read, Write};
use wu_core::FileEntry;

pub const LOCAL_HEADER_SIGNATURE: u32 = 0x0403_4b50;
pub const CENTRAL_HEADER_SIGNATURE: u32 = 0x0201_4b50;
pub const END_RECORD_SIGNATURE: u32 = 0x0605_4b50;

pub const LOCAL_HEADER_LEN: usize = 30;
pub const CENTRAL_HEADER_LEN: usize = 46;
pub const END_RECORD_LEN: usize = 22;

const VERSION_NEEDED: u16 = 10;
/// Unix host, APPNOTE version 2.3.
const VERSION_MADE_BY: u16 = 0x0317;
const METHOD_STORE: u16 = 0;

/// Per-entry values shared by the local header and the central record.
#[derive(Debug, Clone, Copy)]
struct Planned<'a> {
    name: &'a [u8],
    content: &'a [u8],
    crc: u32,
    size: u32,
    local_header_offset: u32,
}

/// The fixed-size record closing every archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndRecord {
    pub entry_count: u16,
    pub directory_size: u32,
    pub directory_offset: u32,
}

/// One central directory record, as read back from an archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub name: Vec<u8>,
    pub crc32: u32,
    pub size: u32,
    pub local_header_offset: u32,
}

fn to_u32(value: u64) -> Result<u32> {
    u32::try_from(value).map_err(|_| ArchiveError::ArchiveTooLarge(value))
}

/// Compute checksums, offsets and the end record, rejecting anything the
/// 32-bit format cannot represent.
fn plan(entries: &[FileEntry]) -> Result<(Vec<Planned<'_>>, EndRecord)> {
    if entries.len() > u16::MAX as usize {
        return Err(ArchiveError::TooManyEntries(entries.len()));
    }

    let mut planned = Vec::with_capacity(entries.len());
    let mut offset: u64 = 0;
    let mut directory_size: u64 = 0;
    for (index, entry) in entries.iter().enumerate() {
        if entry.name.is_empty() {
            return Err(ArchiveError::EmptyName { index });
        }
        if entry.name.len() > u16::MAX as usize {
            return Err(ArchiveError::NameTooLong { name: entry.name_lossy(), len: entry.name.len() });
        }
        let size = u32::try_from(entry.content.len()).map_err(|_| ArchiveError::EntryTooLarge {
            name: entry.name_lossy(),
            size: entry.content.len() as u64,
        })?;

        planned.push(Planned {
            name: &entry.name,
            content: &entry.content,
            crc: crc32(&entry.content),
            size,
            local_header_offset: to_u32(offset)?,
        });
        offset += (LOCAL_HEADER_LEN + entry.name.len() + entry.content.len()) as u64;
        directory_size += (CENTRAL_HEADER_LEN + entry.name.len()) as u64;
    }
    let end = end_record_for(planned.len() as u16, offset, directory_size)?;
    Ok((planned, end))
}

/// End record for a directory of `directory_size` bytes starting at `directory_offset`.
pub(crate) fn end_record_for(entry_count: u16, directory_offset: u64, directory_size: u64) -> Result<EndRecord> {
    Ok(EndRecord {
        entry_count,
        directory_size: to_u32(directory_size)?,
        directory_offset: to_u32(directory_offset)?,
    })
}

/// Exact byte length of the archive [`encode_archive`] would produce.
pub fn archive_len(entries: &[FileEntry]) -> u64 {
    let per_entry: u64 = entries
        .iter()
        .map(|e| (LOCAL_HEADER_LEN + CENTRAL_HEADER_LEN + 2 * e.name.len() + e.content.len()) as u64)
        .sum();
    per_entry + END_RECORD_LEN as u64
}

/// Encode `entries` into an in-memory archive, preserving their order.
pub fn encode_archive(entries: &[FileEntry]) -> Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(usize::try_from(archive_len(entries)).unwrap_or(0));
    write_archive(entries, &mut buf)?;
    Ok(buf)
}

/// Encode `entries` into any writer. Returns the number of bytes written.
///
/// Validation happens before the first byte is written.
pub fn write_archive<W: Write>(entries: &[FileEntry], w: &mut W) -> Result<u64> {
    let (planned, end) = plan(entries)?;

    for p in &planned {
        write_local_header(w, p)?;
        w.write_all(p.content)?;
        tracing::debug!(
            name = %String::from_utf8_lossy(p.name),
            size = p.size,
            crc = p.crc,
            offset = p.local_header_offset,
            "stored entry"
        );
    }
    for p in &planned {
        write_central_header(w, p)?;
    }
    write_end_record(w, &end)?;

    let total = end.directory_offset as u64 + end.directory_size as u64 + END_RECORD_LEN as u64;
    tracing::debug!(entries = planned.len(), bytes = total, "archive written");
    Ok(total)
}

fn write_local_header<W: Write>(w: &mut W, p: &Planned<'_>) -> std::io::Result<()> {
    w.write_u32::<LittleEndian>(LOCAL_HEADER_SIGNATURE)?;
    w.write_u16::<LittleEndian>(VERSION_NEEDED)?;
    w.write_u16::<LittleEndian>(0)?; // flags
    w.write_u16::<LittleEndian>(METHOD_STORE)?;
    w.write_u16::<LittleEndian>(0)?; // mtime
    w.write_u16::<LittleEndian>(0)?; // mdate
    w.write_u32::<LittleEndian>(p.crc)?;
    w.write_u32::<LittleEndian>(p.size)?; // compressed
    w.write_u32::<LittleEndian>(p.size)?; // uncompressed
    w.write_u16::<LittleEndian>(p.name.len() as u16)?;
    w.write_u16::<LittleEndian>(0)?; // extra
    w.write_all(p.name)
}

fn write_central_header<W: Write>(w: &mut W, p: &Planned<'_>) -> std::io::Result<()> {
    w.write_u32::<LittleEndian>(CENTRAL_HEADER_SIGNATURE)?;
    w.write_u16::<LittleEndian>(VERSION_MADE_BY)?;
    w.write_u16::<LittleEndian>(VERSION_NEEDED)?;
    w.write_u16::<LittleEndian>(0)?; // flags
    w.write_u16::<LittleEndian>(METHOD_STORE)?;
    w.write_u16::<LittleEndian>(0)?; // mtime
    w.write_u16::<LittleEndian>(0)?; // mdate
    w.write_u32::<LittleEndian>(p.crc)?;
    w.write_u32::<LittleEndian>(p.size)?;
    w.write_u32::<LittleEndian>(p.size)?;
    w.write_u16::<LittleEndian>(p.name.len() as u16)?;
    w.write_u16::<LittleEndian>(0)?; // extra
    w.write_u16::<LittleEndian>(0)?; // comment
    w.write_u16::<LittleEndian>(0)?; // disk number start
    w.write_u16::<LittleEndian>(0)?; // internal attributes
    w.write_u32::<LittleEndian>(0)?; // external attributes
    w.write_u32::<LittleEndian>(p.local_header_offset)?;
    w.write_all(p.name)
}

fn write_end_record<W: Write>(w: &mut W, end: &EndRecord) -> std::io::Result<()> {
    w.write_u32::<LittleEndian>(END_RECORD_SIGNATURE)?;
    w.write_u16::<LittleEndian>(0)?; // this disk
    w.write_u16::<LittleEndian>(0)?; // disk with directory
    w.write_u16::<LittleEndian>(end.entry_count)?;
    w.write_u16::<LittleEndian>(end.entry_count)?;
    w.write_u32::<LittleEndian>(end.directory_size)?;
    w.write_u32::<LittleEndian>(end.directory_offset)?;
    w.write_u16::<LittleEndian>(0) // comment length
}

/// Read the end record of an archive without a trailing comment.
pub fn read_end_record(archive: &[u8]) -> Result<EndRecord> {
    if archive.len() < END_RECORD_LEN {
        return Err(ArchiveError::Malformed(format!("{} bytes is shorter than an end record", archive.len())));
    }
    let mut cursor = Cursor::new(&archive[archive.len() - END_RECORD_LEN..]);
    let signature = cursor.read_u32::<LittleEndian>()?;
    if signature != END_RECORD_SIGNATURE {
        return Err(ArchiveError::Malformed(format!("bad end record signature {signature:#010x}")));
    }
    let _this_disk = cursor.read_u16::<LittleEndian>()?;
    let _directory_disk = cursor.read_u16::<LittleEndian>()?;
    let _disk_entries = cursor.read_u16::<LittleEndian>()?;
    let entry_count = cursor.read_u16::<LittleEndian>()?;
    let directory_size = cursor.read_u32::<LittleEndian>()?;
    let directory_offset = cursor.read_u32::<LittleEndian>()?;
    Ok(EndRecord { entry_count, directory_size, directory_offset })
}

/// Walk the central directory and return its records in order.
///
/// A directory that runs past the end of `archive` is reported as
/// [`ArchiveError::Malformed`].
pub fn list_entries(archive: &[u8]) -> Result<Vec<DirectoryEntry>> {
    let end = read_end_record(archive)?;
    let mut cursor = Cursor::new(archive);
    cursor.set_position(end.directory_offset as u64);

    let mut entries = Vec::with_capacity(end.entry_count as usize);
    for _ in 0..end.entry_count {
        let at = cursor.position();
        let entry = read_central_record(&mut cursor).map_err(|err| match err {
            ArchiveError::Io(e) if e.kind() == ErrorKind::UnexpectedEof => {
                ArchiveError::Malformed(format!("central record at {at} is truncated"))
            }
            other => other,
        })?;
        entries.push(entry);
    }
    Ok(entries)
}

fn read_central_record(cursor: &mut Cursor<&[u8]>) -> Result<DirectoryEntry> {
    let signature = cursor.read_u32::<LittleEndian>()?;
    if signature != CENTRAL_HEADER_SIGNATURE {
        return Err(ArchiveError::Malformed(format!(
            "bad central header signature {signature:#010x} at {}",
            cursor.position() - 4
        )));
    }
    let _made_by = cursor.read_u16::<LittleEndian>()?;
    let _needed = cursor.read_u16::<LittleEndian>()?;
    let _flags = cursor.read_u16::<LittleEndian>()?;
    let method = cursor.read_u16::<LittleEndian>()?;
    if method != METHOD_STORE {
        return Err(ArchiveError::Malformed(format!("unsupported compression method {method}")));
    }
    let _mtime = cursor.read_u16::<LittleEndian>()?;
    let _mdate = cursor.read_u16::<LittleEndian>()?;
    let crc32 = cursor.read_u32::<LittleEndian>()?;
    let _compressed = cursor.read_u32::<LittleEndian>()?;
    let size = cursor.read_u32::<LittleEndian>()?;
    let name_len = cursor.read_u16::<LittleEndian>()? as usize;
    let extra_len = cursor.read_u16::<LittleEndian>()? as u64;
    let comment_len = cursor.read_u16::<LittleEndian>()? as u64;
    let _disk = cursor.read_u16::<LittleEndian>()?;
    let _internal = cursor.read_u16::<LittleEndian>()?;
    let _external = cursor.read_u32::<LittleEndian>()?;
    let local_header_offset = cursor.read_u32::<LittleEndian>()?;

    let mut name = vec![0u8; name_len];
    cursor.read_exact(&mut name)?;
    cursor.set_position(cursor.position() + extra_len + comment_len);

    Ok(DirectoryEntry { name, crc32, size, local_header_offset })
}

/// Builder collecting entries in insertion order.
#[derive(Debug, Default, Clone)]
pub struct ArchiveWriter {
    entries: Vec<FileEntry>,
}

impl ArchiveWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, name: impl Into<Vec<u8>>, content: impl Into<Vec<u8>>) -> &mut Self {
        self.entries.push(FileEntry::new(name, content));
        self
    }

    pub fn add_text(&mut self, name: &str, content: &str) -> &mut Self {
        self.entries.push(FileEntry::text(name, content));
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    pub fn finish(&self) -> Result<Vec<u8>> {
        encode_archive(&self.entries)
    }
}
