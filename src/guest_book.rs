//! GuestBook - the application-facing facade.
//!
//! Owns the store, the tree projected from it, the writer mirroring it to
//! disk and the interaction state. Every mutation runs in the same order:
//! store first (failing fast), then the tree, then the writer. A failed write
//! is reported, not rolled back.

use std::fmt;

use tracing::{info, warn};

use crate::config::GuestBookConfig;
use crate::guest::{Guest, RecordError, RoomNumber};
use crate::interaction::{
    ContextMenu, Handled, InteractionHandler, MenuAction, PointerEvent, RowIdentity,
};
use crate::persistence::{
    load_into, FlatFileWriter, LoadError, LoadSummary, RecordWriter, WriteError, WriteStatus,
};
use crate::store::{GuestSlot, GuestStore, StoreError};
use crate::tree::{GuestTree, TreeError, TreePath};

/// Error type for guest book operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuestBookError {
    Store(StoreError),
    Tree(TreeError),
    Record(RecordError),
    /// A menu action was dispatched with no context menu open.
    NoContextTarget,
    /// The action needs a guest row but targets a room header.
    NotAGuestRow(RoomNumber),
}

impl fmt::Display for GuestBookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GuestBookError::Store(err) => write!(f, "{}", err),
            GuestBookError::Tree(err) => write!(f, "{}", err),
            GuestBookError::Record(err) => write!(f, "{}", err),
            GuestBookError::NoContextTarget => write!(f, "no row targeted by a context menu"),
            GuestBookError::NotAGuestRow(room) => {
                write!(f, "row for room {} is not a guest row", room)
            }
        }
    }
}

impl std::error::Error for GuestBookError {}

impl From<StoreError> for GuestBookError {
    fn from(err: StoreError) -> Self {
        GuestBookError::Store(err)
    }
}

impl From<TreeError> for GuestBookError {
    fn from(err: TreeError) -> Self {
        GuestBookError::Tree(err)
    }
}

impl From<RecordError> for GuestBookError {
    fn from(err: RecordError) -> Self {
        GuestBookError::Record(err)
    }
}

/// Result of reading the data file at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Loaded(LoadSummary),
    /// The book started without the file's content.
    Failed(LoadError),
}

impl LoadStatus {
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadStatus::Loaded(_))
    }
}

pub struct GuestBook<W: RecordWriter = FlatFileWriter> {
    store: GuestStore,
    tree: GuestTree,
    writer: W,
    interaction: InteractionHandler,
    /// Set when the data file exists but could not be loaded.
    unread: Option<LoadError>,
}

impl GuestBook<FlatFileWriter> {
    /// Seed the configured rooms, load the data file and write back to it.
    ///
    /// A data file that cannot be read leaves the book with the seeded rooms
    /// only; the returned status says why. Appends still go to the file, but
    /// it is never rewritten until it loads cleanly.
    pub fn open(config: &GuestBookConfig) -> (Self, LoadStatus) {
        let mut store = GuestStore::new();
        for room in &config.rooms {
            store.seed_room(*room);
        }
        let status = match load_into(&mut store, &config.data_file) {
            Ok(summary) => {
                info!(
                    path = %config.data_file.display(),
                    rooms = store.room_count(),
                    guests = store.guest_count(),
                    "opened guest book"
                );
                LoadStatus::Loaded(summary)
            }
            Err(err) => {
                warn!(path = %config.data_file.display(), error = %err, "could not load guest data");
                LoadStatus::Failed(err)
            }
        };
        let writer = FlatFileWriter::new(&config.data_file);
        let mut book = Self::new(store, writer, config);
        if let LoadStatus::Failed(err) = &status {
            if !matches!(err, LoadError::Missing(_)) {
                book.unread = Some(err.clone());
            }
        }
        (book, status)
    }
}

impl<W: RecordWriter> GuestBook<W> {
    pub fn new(store: GuestStore, writer: W, config: &GuestBookConfig) -> Self {
        let tree = GuestTree::build(&store, config.columns(), config.display.clone());
        Self {
            store,
            tree,
            writer,
            interaction: InteractionHandler::new(config.tree_layout()),
            unread: None,
        }
    }

    /// Add an empty room: store, header row, sentinel line.
    pub fn add_room(&mut self, room: RoomNumber) -> Result<WriteStatus, GuestBookError> {
        self.store.add_room(room)?;
        self.tree.add_room(room)?;
        let status = WriteStatus::from(self.writer.append_room(room));
        Ok(self.report("add room", status))
    }

    /// Add a guest to an existing room: store, detail row, guest line.
    pub fn add_guest(&mut self, guest: Guest) -> Result<WriteStatus, GuestBookError> {
        guest.validate()?;
        let slot = self.store.add_guest(guest.clone())?;
        self.tree.add_guest(slot, &guest)?;
        let status = WriteStatus::from(self.writer.append_guest(&guest));
        Ok(self.report("add guest", status))
    }

    /// Remove a guest and rewrite the data file from the store.
    pub fn delete_guest(
        &mut self,
        room: RoomNumber,
        slot: GuestSlot,
    ) -> Result<WriteStatus, GuestBookError> {
        let guest = self.store.remove_guest(room, slot)?;
        self.tree.remove_guest(room, slot)?;
        self.interaction.forget(room, Some(slot));
        info!(%room, %slot, last_name = %guest.last_name, "deleted guest");
        let status = match &self.unread {
            Some(err) => WriteStatus::Failed(WriteError::UnreadData(err.to_string())),
            None => WriteStatus::from(self.writer.rewrite(&self.store)),
        };
        Ok(self.report("delete guest", status))
    }

    /// Double click on a row.
    pub fn activate(&mut self, path: TreePath) -> Option<RowIdentity> {
        self.interaction.on_row_activated(&self.tree, path)
    }

    /// Pointer button released over the tree.
    pub fn button_released(&mut self, event: &PointerEvent) -> Handled {
        self.interaction.on_button_released(&self.tree, event)
    }

    /// Run a context menu action against the row the menu was opened on.
    pub fn dispatch(&mut self, action: MenuAction) -> Result<WriteStatus, GuestBookError> {
        let target = self
            .interaction
            .context_target()
            .cloned()
            .ok_or(GuestBookError::NoContextTarget)?;
        let result = match action {
            MenuAction::Delete => match target.slot {
                Some(slot) => self.delete_guest(target.room, slot),
                None => Err(GuestBookError::NotAGuestRow(target.room)),
            },
        };
        self.interaction.dismiss_menu();
        result
    }

    pub fn on_activate<F>(&mut self, listener: F)
    where
        F: Fn(&RowIdentity) + Send + Sync + 'static,
    {
        self.interaction.on_activate(listener);
    }

    pub fn selected(&self) -> Option<&RowIdentity> {
        self.interaction.selected()
    }

    pub fn context_target(&self) -> Option<&RowIdentity> {
        self.interaction.context_target()
    }

    pub fn context_menu(&self) -> Option<&ContextMenu> {
        self.interaction.context_menu()
    }

    pub fn dismiss_menu(&mut self) {
        self.interaction.dismiss_menu();
    }

    pub fn expand_all(&mut self) {
        self.tree.expand_all();
    }

    pub fn collapse(&mut self, room: RoomNumber) -> Result<(), GuestBookError> {
        Ok(self.tree.collapse(room)?)
    }

    pub fn expand(&mut self, room: RoomNumber) -> Result<(), GuestBookError> {
        Ok(self.tree.expand(room)?)
    }

    pub fn store(&self) -> &GuestStore {
        &self.store
    }

    pub fn tree(&self) -> &GuestTree {
        &self.tree
    }

    pub fn interaction(&self) -> &InteractionHandler {
        &self.interaction
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    fn report(&self, operation: &'static str, status: WriteStatus) -> WriteStatus {
        if let WriteStatus::Failed(err) = &status {
            warn!(operation, error = %err, "change kept in memory but not saved");
        }
        status
    }
}
