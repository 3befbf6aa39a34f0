use std::sync::{Arc, Mutex};

use super::{store_lines, RecordWriter, WriteError};
use crate::guest::{Guest, RecordLine, RoomNumber};
use crate::store::GuestStore;

/// Writer that keeps lines in a shared buffer instead of a file.
///
/// Clones share the buffer, so a test can hold on to one while the guest
/// book owns another.
#[derive(Debug, Clone, Default)]
pub struct InMemoryWriter {
    lines: Arc<Mutex<Vec<String>>>,
}

impl InMemoryWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_buffer(lines: Arc<Mutex<Vec<String>>>) -> Self {
        Self { lines }
    }

    /// Lines written so far, without terminators.
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .map(|lines| lines.clone())
            .unwrap_or_default()
    }

    /// Buffer content as it would appear in a data file.
    pub fn contents(&self) -> String {
        self.lines()
            .into_iter()
            .map(|line| line + "\n")
            .collect()
    }

    fn push(&self, line: String) -> Result<(), WriteError> {
        let mut lines = self.lines.lock().map_err(|_| WriteError::BufferPoisoned)?;
        lines.push(line.trim_end_matches('\n').to_string());
        Ok(())
    }
}

impl RecordWriter for InMemoryWriter {
    fn append_room(&mut self, room: RoomNumber) -> Result<(), WriteError> {
        self.push(RecordLine::Room(room).to_line()?)
    }

    fn append_guest(&mut self, guest: &Guest) -> Result<(), WriteError> {
        self.push(guest.to_line()?)
    }

    fn rewrite(&mut self, store: &GuestStore) -> Result<(), WriteError> {
        let fresh: Vec<String> = store_lines(store)?
            .into_iter()
            .map(|line| line.trim_end_matches('\n').to_string())
            .collect();
        let mut lines = self.lines.lock().map_err(|_| WriteError::BufferPoisoned)?;
        *lines = fresh;
        Ok(())
    }
}
