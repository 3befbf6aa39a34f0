//! Persistence - the flat data file behind the store.
//!
//! Writers mirror store mutations into durable storage. Rooms and guests are
//! appended one line at a time; only guest deletion rewrites the whole file.
//! A failed write never rolls back the store, the caller gets a
//! [`WriteStatus::Failed`] to warn the user with instead.
//!
//! ## Example
//!
//! ```ignore
//! use guest_book::{FlatFileWriter, RecordWriter};
//!
//! let mut writer = FlatFileWriter::new("guests.dat");
//! writer.append_room(RoomNumber(5))?;
//! writer.append_guest(&guest)?;
//! ```

mod flat_file;
mod in_memory;
mod loader;

use std::fmt;

use crate::guest::{Guest, RecordError, RecordLine, RoomNumber};
use crate::store::GuestStore;

pub use flat_file::FlatFileWriter;
pub use in_memory::InMemoryWriter;
pub use loader::{load_into, parse_into, LoadSummary};

/// Mirrors store mutations into durable storage.
pub trait RecordWriter {
    /// Append a room sentinel line. Never touches earlier content.
    fn append_room(&mut self, room: RoomNumber) -> Result<(), WriteError>;

    /// Append one guest line. Never touches earlier content.
    fn append_guest(&mut self, guest: &Guest) -> Result<(), WriteError>;

    /// Replace everything with the current store content.
    fn rewrite(&mut self, store: &GuestStore) -> Result<(), WriteError>;
}

/// Error type for writer operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteError {
    /// The underlying file operation failed.
    Io(String),
    /// The record could not be encoded as a line.
    Record(RecordError),
    /// An in-memory buffer lock was poisoned.
    BufferPoisoned,
    /// A rewrite was refused because the data file was never read; replacing
    /// it would drop whatever it holds.
    UnreadData(String),
}

impl fmt::Display for WriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteError::Io(msg) => write!(f, "write failed: {}", msg),
            WriteError::Record(err) => write!(f, "could not encode record: {}", err),
            WriteError::BufferPoisoned => write!(f, "write buffer poisoned"),
            WriteError::UnreadData(reason) => {
                write!(f, "data file was not loaded ({}), refusing to rewrite it", reason)
            }
        }
    }
}

impl std::error::Error for WriteError {}

impl From<RecordError> for WriteError {
    fn from(err: RecordError) -> Self {
        WriteError::Record(err)
    }
}

impl From<std::io::Error> for WriteError {
    fn from(err: std::io::Error) -> Self {
        WriteError::Io(err.to_string())
    }
}

/// Error type for loading the data file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// The data file does not exist.
    Missing(String),
    /// The data file exists but could not be read.
    Io(String),
    /// A line could not be parsed. `line` is 1-based.
    Parse { line: usize, source: RecordError },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Missing(path) => write!(f, "data file not found: {}", path),
            LoadError::Io(msg) => write!(f, "could not read data file: {}", msg),
            LoadError::Parse { line, source } => write!(f, "line {}: {}", line, source),
        }
    }
}

impl std::error::Error for LoadError {}

/// Outcome of the persistence step of a mutation.
///
/// The store and tree are already updated either way.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteStatus {
    Written,
    Failed(WriteError),
}

impl WriteStatus {
    pub fn is_written(&self) -> bool {
        matches!(self, WriteStatus::Written)
    }

    pub fn error(&self) -> Option<&WriteError> {
        match self {
            WriteStatus::Written => None,
            WriteStatus::Failed(err) => Some(err),
        }
    }
}

impl From<Result<(), WriteError>> for WriteStatus {
    fn from(result: Result<(), WriteError>) -> Self {
        match result {
            Ok(()) => WriteStatus::Written,
            Err(err) => WriteStatus::Failed(err),
        }
    }
}

/// Store content as data file lines: a sentinel for each empty room, guest
/// lines for the others. Rooms keep store order. Empty seeded rooms are
/// left out, configuration brings them back.
pub(crate) fn store_lines(store: &GuestStore) -> Result<Vec<String>, RecordError> {
    let mut lines = Vec::new();
    for room in store.entries() {
        if room.is_empty() && !room.is_seeded() {
            lines.push(RecordLine::Room(room.number()).to_line()?);
        }
        for stored in room.guests() {
            lines.push(stored.guest.to_line()?);
        }
    }
    Ok(lines)
}
