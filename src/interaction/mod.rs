//! Interaction - pointer gestures on the guest tree.
//!
//! Two gestures matter: activating a row (double click) and releasing the
//! secondary button over a row, which opens a context menu. Gestures that
//! miss every row are not errors, they are simply not handled so outer
//! dispatch can try something else.

mod handler;
mod layout;
mod listeners;

use serde::Serialize;

use crate::guest::RoomNumber;
use crate::store::GuestSlot;
use crate::tree::{TreePath, TreeRow};

pub use handler::InteractionHandler;
pub use layout::{TreeLayout, DEFAULT_HEADER_HEIGHT, DEFAULT_ROW_HEIGHT};
pub use listeners::ActivationListeners;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Primary,
    Middle,
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEventKind {
    Press,
    Release,
}

/// A pointer event in tree-view coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub button: MouseButton,
    pub x: f64,
    pub y: f64,
}

impl PointerEvent {
    pub fn release(button: MouseButton, x: f64, y: f64) -> Self {
        Self {
            kind: PointerEventKind::Release,
            button,
            x,
            y,
        }
    }

    pub fn press(button: MouseButton, x: f64, y: f64) -> Self {
        Self {
            kind: PointerEventKind::Press,
            button,
            x,
            y,
        }
    }
}

/// Whether a gesture was consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    Yes,
    No,
}

impl Handled {
    pub fn is_handled(self) -> bool {
        self == Handled::Yes
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MenuAction {
    Delete,
}

impl MenuAction {
    pub fn label(self) -> &'static str {
        match self {
            MenuAction::Delete => "Delete",
        }
    }
}

/// Identifies a row independently of its current position.
///
/// `path` is where the row was when the gesture happened; `room` and `slot`
/// stay valid after other rows move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowIdentity {
    pub path: TreePath,
    pub room: RoomNumber,
    pub slot: Option<GuestSlot>,
    pub label: String,
}

impl RowIdentity {
    pub(crate) fn of(path: TreePath, row: &TreeRow) -> Self {
        Self {
            path,
            room: row.room(),
            slot: row.slot(),
            label: row.label().to_string(),
        }
    }

    pub fn is_header(&self) -> bool {
        self.slot.is_none()
    }
}

/// An open context menu anchored to a row.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextMenu {
    pub target: RowIdentity,
    pub actions: Vec<MenuAction>,
    pub anchor: (f64, f64),
}
