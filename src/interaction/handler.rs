use tracing::{debug, info};

use super::{
    ActivationListeners, ContextMenu, Handled, MenuAction, MouseButton, PointerEvent,
    PointerEventKind, RowIdentity, TreeLayout,
};
use crate::guest::RoomNumber;
use crate::store::GuestSlot;
use crate::tree::{GuestTree, TreePath};

/// Turns gestures on the tree into a selection and context menus.
///
/// Never mutates the tree; acting on a menu is up to the caller.
#[derive(Debug, Default)]
pub struct InteractionHandler {
    layout: TreeLayout,
    selected: Option<RowIdentity>,
    context_menu: Option<ContextMenu>,
    listeners: ActivationListeners,
}

impl InteractionHandler {
    pub fn new(layout: TreeLayout) -> Self {
        Self {
            layout,
            ..Self::default()
        }
    }

    pub fn layout(&self) -> &TreeLayout {
        &self.layout
    }

    /// Register a callback for row activation.
    pub fn on_activate<F>(&mut self, listener: F)
    where
        F: Fn(&RowIdentity) + Send + Sync + 'static,
    {
        self.listeners.on(listener);
    }

    /// A row was double clicked. Selects it and notifies listeners.
    pub fn on_row_activated(&mut self, tree: &GuestTree, path: TreePath) -> Option<RowIdentity> {
        let row = tree.row(path)?;
        let identity = RowIdentity::of(path, row);
        info!(label = %identity.label, room = %identity.room, "row activated");
        self.listeners.emit(&identity);
        self.selected = Some(identity.clone());
        Some(identity)
    }

    /// Secondary button released: open a context menu if a row is under the
    /// pointer. Anything else is left for other handlers.
    pub fn on_button_released(&mut self, tree: &GuestTree, event: &PointerEvent) -> Handled {
        if event.kind != PointerEventKind::Release || event.button != MouseButton::Secondary {
            return Handled::No;
        }
        let Some(path) = self.layout.row_at(tree, event.x, event.y) else {
            debug!(x = event.x, y = event.y, "context click outside rows");
            return Handled::No;
        };
        let Some(row) = tree.row(path) else {
            return Handled::No;
        };

        let target = RowIdentity::of(path, row);
        debug!(%path, label = %target.label, "context menu opened");
        self.context_menu = Some(ContextMenu {
            target,
            actions: vec![MenuAction::Delete],
            anchor: (event.x, event.y),
        });
        Handled::Yes
    }

    pub fn selected(&self) -> Option<&RowIdentity> {
        self.selected.as_ref()
    }

    pub fn context_menu(&self) -> Option<&ContextMenu> {
        self.context_menu.as_ref()
    }

    /// The row the open context menu targets.
    pub fn context_target(&self) -> Option<&RowIdentity> {
        self.context_menu.as_ref().map(|menu| &menu.target)
    }

    pub fn dismiss_menu(&mut self) -> Option<ContextMenu> {
        self.context_menu.take()
    }

    /// Forget a row that no longer exists.
    pub(crate) fn forget(&mut self, room: RoomNumber, slot: Option<GuestSlot>) {
        let same = |other: &RowIdentity| other.room == room && other.slot == slot;
        if self.selected.as_ref().is_some_and(same) {
            self.selected = None;
        }
        if self.context_target().is_some_and(same) {
            self.context_menu = None;
        }
    }
}
