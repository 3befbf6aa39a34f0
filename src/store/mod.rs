//! Store - the authoritative in-memory room -> guests mapping.
//!
//! Rooms keep their insertion order. Every guest gets a [`GuestSlot`] when it
//! is inserted; slots only grow, so they double as "insertion order" for
//! anything that needs to tell two otherwise identical guests apart.

mod guest_store;

use serde::Serialize;
use std::fmt;

use crate::guest::RoomNumber;

pub use guest_store::{GuestStore, Room, StoredGuest};

/// Position of a guest in the store, assigned on insertion and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct GuestSlot(pub(crate) u64);

impl GuestSlot {
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for GuestSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Error type for store mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The room number is already present.
    DuplicateRoom(RoomNumber),
    /// The operation references a room that was never added.
    UnknownRoom(RoomNumber),
    /// No guest with this slot lives in the room.
    UnknownGuest { room: RoomNumber, slot: GuestSlot },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::DuplicateRoom(room) => write!(f, "room {} already exists", room),
            StoreError::UnknownRoom(room) => write!(f, "room {} does not exist", room),
            StoreError::UnknownGuest { room, slot } => {
                write!(f, "no guest {} in room {}", slot, room)
            }
        }
    }
}

impl std::error::Error for StoreError {}
