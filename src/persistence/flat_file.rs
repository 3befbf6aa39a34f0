use std::fs::{self, File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::{store_lines, RecordWriter, WriteError};
use crate::guest::{Guest, RecordLine, RoomNumber};
use crate::store::GuestStore;

/// Appends records to a data file on disk.
#[derive(Debug, Clone)]
pub struct FlatFileWriter {
    path: PathBuf,
}

impl FlatFileWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append_line(&self, line: &str) -> Result<(), WriteError> {
        let mut file = OpenOptions::new()
            .read(true)
            .append(true)
            .create(true)
            .open(&self.path)?;
        // Older files end without a newline; keep records on their own lines.
        let separator = if ends_without_newline(&mut file)? {
            "\n"
        } else {
            ""
        };
        file.write_all(format!("{}{}", separator, line).as_bytes())?;
        file.flush()?;
        debug!(path = %self.path.display(), line = line.trim_end(), "appended record");
        Ok(())
    }
}

fn ends_without_newline(file: &mut File) -> Result<bool, WriteError> {
    if file.metadata()?.len() == 0 {
        return Ok(false);
    }
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] != b'\n')
}

impl RecordWriter for FlatFileWriter {
    fn append_room(&mut self, room: RoomNumber) -> Result<(), WriteError> {
        self.append_line(&RecordLine::Room(room).to_line()?)
    }

    fn append_guest(&mut self, guest: &Guest) -> Result<(), WriteError> {
        self.append_line(&guest.to_line()?)
    }

    fn rewrite(&mut self, store: &GuestStore) -> Result<(), WriteError> {
        let content = store_lines(store)?.concat();
        let mut staging = self.path.clone().into_os_string();
        staging.push(".tmp");
        let staging = PathBuf::from(staging);

        let replaced = fs::write(&staging, content).and_then(|()| fs::rename(&staging, &self.path));
        if let Err(err) = replaced {
            let _ = fs::remove_file(&staging);
            return Err(err.into());
        }
        info!(
            path = %self.path.display(),
            rooms = store.room_count(),
            guests = store.guest_count(),
            "rewrote data file"
        );
        Ok(())
    }
}
