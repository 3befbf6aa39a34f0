mod config;
mod guest;
mod guest_book;
mod interaction;
mod persistence;
mod store;
mod tree;

pub use config::{ConfigError, GuestBookConfig, LayoutConfig};
pub use guest::{
    Gender, Guest, Payment, RecordError, RecordLine, RoomNumber, DATE_FORMAT, VOID_MARK,
};
pub use guest_book::{GuestBook, GuestBookError, LoadStatus};
pub use interaction::{
    ActivationListeners, ContextMenu, Handled, InteractionHandler, MenuAction, MouseButton,
    PointerEvent, PointerEventKind, RowIdentity, TreeLayout, DEFAULT_HEADER_HEIGHT,
    DEFAULT_ROW_HEIGHT,
};
pub use persistence::{
    load_into, parse_into, FlatFileWriter, InMemoryWriter, LoadError, LoadSummary, RecordWriter,
    WriteError, WriteStatus,
};
pub use store::{GuestSlot, GuestStore, Room, StoreError, StoredGuest};
pub use tree::{
    standard_columns, CellRenderer, CellStyle, Column, ColumnField, DisplayFormat, GuestTree,
    RenderedCell, RenderedRow, TreeError, TreePath, TreeRow, COLUMN_COUNT,
    DEFAULT_COLUMN_WIDTHS, SORT_FIELD,
};
