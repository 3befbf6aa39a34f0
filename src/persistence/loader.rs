use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::debug;

use super::LoadError;
use crate::guest::RecordLine;
use crate::store::GuestStore;

/// What a load added to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadSummary {
    pub rooms: usize,
    pub guests: usize,
}

/// Read the data file at `path` into `store`.
pub fn load_into(store: &mut GuestStore, path: impl AsRef<Path>) -> Result<LoadSummary, LoadError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => LoadError::Missing(path.display().to_string()),
        _ => LoadError::Io(e.to_string()),
    })?;
    parse_into(store, &content)
}

/// Parse data file content into `store`.
///
/// Blank lines are skipped. Sentinel lines declare rooms, guest lines
/// declare their room implicitly, and declaring a room twice is harmless.
/// Nothing is added unless every line parses.
pub fn parse_into(store: &mut GuestStore, content: &str) -> Result<LoadSummary, LoadError> {
    let records = content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            RecordLine::parse(line).map_err(|source| LoadError::Parse {
                line: i + 1,
                source,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut summary = LoadSummary::default();
    for record in records {
        match record {
            RecordLine::Room(room) => {
                if store.ensure_room(room) {
                    summary.rooms += 1;
                }
            }
            RecordLine::Guest(guest) => {
                if store.ensure_room(guest.room) {
                    summary.rooms += 1;
                }
                // The room exists now, so this cannot fail.
                if store.add_guest(guest).is_ok() {
                    summary.guests += 1;
                }
            }
        }
    }
    debug!(rooms = summary.rooms, guests = summary.guests, "loaded records");
    Ok(summary)
}
