use serde::Serialize;
use tracing::debug;

use super::column::{Column, DisplayFormat, RenderedCell};
use super::row::TreeRow;
use super::{TreeError, TreePath};
use crate::guest::{Guest, RoomNumber};
use crate::store::{GuestSlot, GuestStore};

#[derive(Debug, Clone)]
struct RoomNode {
    header: TreeRow,
    expanded: bool,
    guests: Vec<TreeRow>,
}

impl RoomNode {
    fn new(room: RoomNumber) -> Self {
        Self {
            header: TreeRow::header(room),
            expanded: true,
            guests: Vec::new(),
        }
    }

    /// Insert after every row that sorts before or equal to the new one.
    fn insert_sorted(&mut self, row: TreeRow) -> usize {
        let at = self
            .guests
            .partition_point(|existing| existing.sort_cmp(&row).is_le());
        self.guests.insert(at, row);
        at
    }
}

/// One row ready for the toolkit: where it sits and what each column shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedRow {
    pub path: TreePath,
    pub depth: usize,
    pub is_header: bool,
    pub cells: Vec<RenderedCell>,
}

/// Room -> guest hierarchy projected from a [`GuestStore`].
#[derive(Debug, Clone)]
pub struct GuestTree {
    columns: Vec<Column>,
    format: DisplayFormat,
    rooms: Vec<RoomNode>,
}

impl GuestTree {
    /// An empty tree.
    pub fn new(columns: Vec<Column>, format: DisplayFormat) -> Self {
        Self {
            columns,
            format,
            rooms: Vec::new(),
        }
    }

    /// Build the whole tree: rooms in store order, guests sorted per room.
    pub fn build(store: &GuestStore, columns: Vec<Column>, format: DisplayFormat) -> Self {
        let mut tree = Self::new(columns, format);
        for (room, guests) in store.rooms() {
            let mut node = RoomNode::new(room);
            node.guests = guests
                .iter()
                .map(|stored| TreeRow::detail(stored.slot, &stored.guest, &tree.format))
                .collect();
            node.guests.sort_by(TreeRow::sort_cmp);
            tree.rooms.push(node);
        }
        debug!(rooms = tree.rooms.len(), "built guest tree");
        tree
    }

    /// Append a header row for a new room.
    pub fn add_room(&mut self, room: RoomNumber) -> Result<TreePath, TreeError> {
        if self.room_index(room).is_some() {
            return Err(TreeError::DuplicateRoom(room));
        }
        self.rooms.push(RoomNode::new(room));
        debug!(%room, "appended room header");
        Ok(TreePath::header(self.rooms.len() - 1))
    }

    /// Insert a detail row under the guest's room, in sorted position.
    ///
    /// Only the room's own children are touched.
    pub fn add_guest(&mut self, slot: GuestSlot, guest: &Guest) -> Result<TreePath, TreeError> {
        let room_index = self
            .room_index(guest.room)
            .ok_or(TreeError::UnknownRoom(guest.room))?;
        let row = TreeRow::detail(slot, guest, &self.format);
        let at = self.rooms[room_index].insert_sorted(row);
        self.expand_all();
        debug!(room = %guest.room, %slot, position = at, "inserted guest row");
        Ok(TreePath::detail(room_index, at))
    }

    /// Drop the detail row of a guest.
    pub fn remove_guest(&mut self, room: RoomNumber, slot: GuestSlot) -> Result<TreeRow, TreeError> {
        let room_index = self.room_index(room).ok_or(TreeError::UnknownRoom(room))?;
        let guests = &mut self.rooms[room_index].guests;
        let at = guests
            .iter()
            .position(|row| row.slot() == Some(slot))
            .ok_or(TreeError::UnknownRow { room, slot })?;
        debug!(%room, %slot, "removed guest row");
        Ok(guests.remove(at))
    }

    pub fn row(&self, path: TreePath) -> Option<&TreeRow> {
        let node = self.rooms.get(path.room)?;
        match path.guest {
            Some(guest) => node.guests.get(guest),
            None => Some(&node.header),
        }
    }

    pub fn header_path(&self, room: RoomNumber) -> Option<TreePath> {
        self.room_index(room).map(TreePath::header)
    }

    /// Header rows, in display order.
    pub fn headers(&self) -> impl Iterator<Item = &TreeRow> + '_ {
        self.rooms.iter().map(|node| &node.header)
    }

    /// Detail rows under a room, in display order.
    pub fn guests(&self, room: RoomNumber) -> Option<&[TreeRow]> {
        self.room_index(room)
            .map(|index| self.rooms[index].guests.as_slice())
    }

    /// Paths of the rows a user can currently see, top to bottom.
    pub fn visible_rows(&self) -> Vec<TreePath> {
        let mut paths = Vec::new();
        for (room_index, node) in self.rooms.iter().enumerate() {
            paths.push(TreePath::header(room_index));
            if node.expanded {
                paths.extend((0..node.guests.len()).map(|guest| TreePath::detail(room_index, guest)));
            }
        }
        paths
    }

    pub fn expand_all(&mut self) {
        for node in &mut self.rooms {
            node.expanded = true;
        }
    }

    pub fn expand(&mut self, room: RoomNumber) -> Result<(), TreeError> {
        self.set_expanded(room, true)
    }

    pub fn collapse(&mut self, room: RoomNumber) -> Result<(), TreeError> {
        self.set_expanded(room, false)
    }

    pub fn is_expanded(&self, room: RoomNumber) -> Option<bool> {
        self.room_index(room).map(|index| self.rooms[index].expanded)
    }

    /// Every visible row, run through the column renderers.
    pub fn render(&self) -> Vec<RenderedRow> {
        self.visible_rows()
            .into_iter()
            .filter_map(|path| {
                let row = self.row(path)?;
                Some(RenderedRow {
                    path,
                    depth: path.depth(),
                    is_header: row.is_header(),
                    cells: self
                        .columns
                        .iter()
                        .map(|column| column.render(row, &self.format))
                        .collect(),
                })
            })
            .collect()
    }

    /// Rendered rows as JSON, for front ends that consume the tree remotely.
    pub fn render_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.render())
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn format(&self) -> &DisplayFormat {
        &self.format
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn row_count(&self) -> usize {
        self.rooms.iter().map(|node| 1 + node.guests.len()).sum()
    }

    fn room_index(&self, room: RoomNumber) -> Option<usize> {
        self.rooms.iter().position(|node| node.header.room() == room)
    }

    fn set_expanded(&mut self, room: RoomNumber, expanded: bool) -> Result<(), TreeError> {
        let index = self.room_index(room).ok_or(TreeError::UnknownRoom(room))?;
        self.rooms[index].expanded = expanded;
        Ok(())
    }
}
