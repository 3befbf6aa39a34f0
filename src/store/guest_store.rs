use std::collections::HashMap;

use super::{GuestSlot, StoreError};
use crate::guest::{Guest, RoomNumber};

/// A guest together with the slot the store assigned to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredGuest {
    pub slot: GuestSlot,
    pub guest: Guest,
}

/// A room and its guests, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    number: RoomNumber,
    guests: Vec<StoredGuest>,
    seeded: bool,
}

impl Room {
    pub fn number(&self) -> RoomNumber {
        self.number
    }

    pub fn guests(&self) -> &[StoredGuest] {
        &self.guests
    }

    pub fn is_empty(&self) -> bool {
        self.guests.is_empty()
    }

    /// Exists only because configuration lists it; no record declares it.
    pub fn is_seeded(&self) -> bool {
        self.seeded
    }
}

/// Insertion-ordered room -> guests mapping.
#[derive(Debug, Clone, Default)]
pub struct GuestStore {
    rooms: Vec<Room>,
    index: HashMap<RoomNumber, usize>,
    next_slot: u64,
}

impl GuestStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an empty room. Fails if the number is taken.
    pub fn add_room(&mut self, number: RoomNumber) -> Result<(), StoreError> {
        if self.index.contains_key(&number) {
            return Err(StoreError::DuplicateRoom(number));
        }
        self.push_room(number, false);
        Ok(())
    }

    /// Insert the room unless it already exists. Returns true if it was added.
    ///
    /// A seeded room declared this way stops being seeded.
    pub fn ensure_room(&mut self, number: RoomNumber) -> bool {
        match self.index.get(&number) {
            Some(&position) => {
                self.rooms[position].seeded = false;
                false
            }
            None => {
                self.push_room(number, false);
                true
            }
        }
    }

    /// Insert a configured room that no record has declared yet.
    pub fn seed_room(&mut self, number: RoomNumber) -> bool {
        if self.index.contains_key(&number) {
            return false;
        }
        self.push_room(number, true);
        true
    }

    fn push_room(&mut self, number: RoomNumber, seeded: bool) {
        self.index.insert(number, self.rooms.len());
        self.rooms.push(Room {
            number,
            guests: Vec::new(),
            seeded,
        });
    }

    /// Append a guest to its room and return the slot it was given.
    pub fn add_guest(&mut self, guest: Guest) -> Result<GuestSlot, StoreError> {
        let position = *self
            .index
            .get(&guest.room)
            .ok_or(StoreError::UnknownRoom(guest.room))?;
        let slot = GuestSlot(self.next_slot);
        self.next_slot += 1;
        self.rooms[position].guests.push(StoredGuest { slot, guest });
        Ok(slot)
    }

    /// Remove a guest and hand it back.
    pub fn remove_guest(&mut self, number: RoomNumber, slot: GuestSlot) -> Result<Guest, StoreError> {
        let position = *self
            .index
            .get(&number)
            .ok_or(StoreError::UnknownRoom(number))?;
        let guests = &mut self.rooms[position].guests;
        let at = guests
            .iter()
            .position(|stored| stored.slot == slot)
            .ok_or(StoreError::UnknownGuest { room: number, slot })?;
        Ok(guests.remove(at).guest)
    }

    /// All rooms with their guests, in insertion order.
    pub fn rooms(&self) -> impl Iterator<Item = (RoomNumber, &[StoredGuest])> + '_ {
        self.rooms
            .iter()
            .map(|room| (room.number, room.guests.as_slice()))
    }

    /// Rooms with their flags, in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = &Room> + '_ {
        self.rooms.iter()
    }

    pub fn room(&self, number: RoomNumber) -> Option<&Room> {
        self.index.get(&number).map(|&position| &self.rooms[position])
    }

    pub fn guest(&self, number: RoomNumber, slot: GuestSlot) -> Option<&Guest> {
        self.room(number)?
            .guests
            .iter()
            .find(|stored| stored.slot == slot)
            .map(|stored| &stored.guest)
    }

    pub fn contains_room(&self, number: RoomNumber) -> bool {
        self.index.contains_key(&number)
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn guest_count(&self) -> usize {
        self.rooms.iter().map(|room| room.guests.len()).sum()
    }
}
