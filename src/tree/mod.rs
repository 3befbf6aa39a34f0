//! Tree presentation - the room -> guest hierarchy shown to the user.
//!
//! The tree is a projection of the [`GuestStore`](crate::GuestStore): it is
//! built once from the store and then patched in place as rooms and guests
//! come and go. Rows only hold display strings; the store stays the source of
//! truth.
//!
//! ## Example
//!
//! ```ignore
//! use guest_book::{DisplayFormat, GuestStore, GuestTree};
//!
//! let tree = GuestTree::build(&store, standard_columns(DEFAULT_COLUMN_WIDTHS), DisplayFormat::default());
//! for row in tree.render() {
//!     // hand row.cells to the toolkit
//! }
//! ```

mod column;
mod guest_tree;
mod row;

use serde::Serialize;
use std::fmt;

use crate::guest::RoomNumber;
use crate::store::GuestSlot;

pub use column::{
    standard_columns, CellRenderer, CellStyle, Column, ColumnField, DisplayFormat, RenderedCell,
    COLUMN_COUNT, DEFAULT_COLUMN_WIDTHS, SORT_FIELD,
};
pub use guest_tree::{GuestTree, RenderedRow};
pub use row::TreeRow;

/// Address of a row: the room's position among the headers and, for detail
/// rows, the guest's position under that header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TreePath {
    pub room: usize,
    pub guest: Option<usize>,
}

impl TreePath {
    pub fn header(room: usize) -> Self {
        Self { room, guest: None }
    }

    pub fn detail(room: usize, guest: usize) -> Self {
        Self {
            room,
            guest: Some(guest),
        }
    }

    pub fn is_header(&self) -> bool {
        self.guest.is_none()
    }

    /// Nesting level: 0 for headers, 1 for guests.
    pub fn depth(&self) -> usize {
        if self.is_header() {
            0
        } else {
            1
        }
    }
}

impl fmt::Display for TreePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.guest {
            Some(guest) => write!(f, "{}:{}", self.room, guest),
            None => write!(f, "{}", self.room),
        }
    }
}

/// Error type for tree patches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// No header row exists for the room.
    UnknownRoom(RoomNumber),
    /// A header row for the room is already present.
    DuplicateRoom(RoomNumber),
    /// No detail row for this guest under the room.
    UnknownRow { room: RoomNumber, slot: GuestSlot },
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeError::UnknownRoom(room) => write!(f, "no header row for room {}", room),
            TreeError::DuplicateRoom(room) => write!(f, "header row for room {} already exists", room),
            TreeError::UnknownRow { room, slot } => {
                write!(f, "no row for guest {} in room {}", slot, room)
            }
        }
    }
}

impl std::error::Error for TreeError {}
