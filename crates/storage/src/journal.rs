//! Append-only commit journal
//!
//! Each committed batch is one framed record appended before the
//! in-memory apply; the append's fsync is the durability point. On open
//! the journal is replayed to rebuild the tables. A torn or corrupt tail
//! frame ends replay and is truncated away, so a crash mid-append never
//! poisons the store.
//!
//! ## Frame layout
//!
//! ```text
//! [magic: 8 bytes, file header only]
//! [len: u32 LE][crc32: u32 LE][payload: bincode JournalRecord]
//! ```

use crate::ops::RowOp;
use crate::row::RowData;
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use catalog_core::{EntityRef, Error, Result};
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;

const MAGIC: &[u8; 8] = b"CATJRNL1";

/// Upper bound on a single frame payload. A frame claiming more is
/// treated as a corrupt tail.
const MAX_FRAME_LEN: usize = 16 * 1024 * 1024;

/// One applied operation as journaled.
///
/// Inserts and updates both journal the full replacement row; replay is a
/// plain put either way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum JournalOp {
    /// Write (insert or whole-row replace) of a row.
    Put(RowData),
    /// Removal of a row.
    Remove(EntityRef),
}

/// One committed batch as journaled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalRecord {
    /// Commit version assigned to the batch.
    pub version: u64,
    /// Microsecond timestamp of the commit.
    pub timestamp: i64,
    /// The applied operations, in staging order.
    pub ops: Vec<JournalOp>,
}

impl JournalRecord {
    /// Build the journal form of a validated batch.
    pub fn from_ops(version: u64, timestamp: i64, ops: &[RowOp]) -> Self {
        let ops = ops
            .iter()
            .map(|op| match op {
                RowOp::Insert { row } | RowOp::Update { row, .. } => JournalOp::Put(row.clone()),
                RowOp::Remove { entity, .. } => JournalOp::Remove(*entity),
            })
            .collect();
        Self {
            version,
            timestamp,
            ops,
        }
    }
}

/// Handle to the open journal file, positioned at the end for appends.
pub struct Journal {
    file: File,
}

impl Journal {
    /// Open (or create) the journal at `path` and replay its records.
    ///
    /// Replay stops at the first torn or corrupt frame; anything after it
    /// is truncated away.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Storage`] when the file header is not a journal
    /// header, and [`Error::Io`] for underlying file failures.
    pub fn open(path: &Path) -> Result<(Self, Vec<JournalRecord>)> {
        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(path)?;

        let len = file.metadata()?.len();
        if len == 0 {
            file.write_all(MAGIC)?;
            file.sync_data()?;
            return Ok((Journal { file }, Vec::new()));
        }

        file.seek(SeekFrom::Start(0))?;
        let mut magic = [0u8; 8];
        file.read_exact(&mut magic).map_err(|_| {
            Error::Storage(format!("journal {} is too short for its header", path.display()))
        })?;
        if magic != *MAGIC {
            return Err(Error::Storage(format!(
                "journal {} has an unrecognized header",
                path.display()
            )));
        }

        let mut records = Vec::new();
        let mut good_end = MAGIC.len() as u64;
        loop {
            match read_frame(&mut file) {
                Ok(Some(record)) => {
                    records.push(record);
                    good_end = file.stream_position()?;
                }
                Ok(None) => break,
                Err(e) => {
                    tracing::warn!(
                        offset = good_end,
                        error = %e,
                        "journal replay stopped at corrupt tail frame"
                    );
                    break;
                }
            }
        }

        if file.metadata()?.len() > good_end {
            file.set_len(good_end)?;
        }
        file.seek(SeekFrom::End(0))?;

        tracing::info!(records = records.len(), "journal replay complete");
        Ok((Journal { file }, records))
    }

    /// Append one record and fsync it. This is the durability point of a
    /// commit: once `append` returns, the batch survives a crash.
    pub fn append(&mut self, record: &JournalRecord) -> Result<()> {
        let payload =
            bincode::serialize(record).map_err(|e| Error::Serialization(e.to_string()))?;
        self.file.write_u32::<LittleEndian>(payload.len() as u32)?;
        self.file.write_u32::<LittleEndian>(crc32fast::hash(&payload))?;
        self.file.write_all(&payload)?;
        self.file.sync_data()?;
        Ok(())
    }

    /// Force pending file data to disk.
    pub fn sync(&mut self) -> Result<()> {
        self.file.sync_data()?;
        Ok(())
    }
}

fn read_frame(file: &mut File) -> io::Result<Option<JournalRecord>> {
    let len = match file.read_u32::<LittleEndian>() {
        Ok(len) => len as usize,
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => return Ok(None),
        Err(e) => return Err(e),
    };
    if len > MAX_FRAME_LEN {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("frame claims {} bytes", len),
        ));
    }
    let expected_crc = file.read_u32::<LittleEndian>()?;
    let mut payload = vec![0u8; len];
    file.read_exact(&mut payload)?;
    if crc32fast::hash(&payload) != expected_crc {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "frame checksum mismatch",
        ));
    }
    bincode::deserialize(&payload)
        .map(Some)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
