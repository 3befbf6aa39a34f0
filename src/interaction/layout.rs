use serde::{Deserialize, Serialize};

use crate::tree::{GuestTree, TreePath};

pub const DEFAULT_HEADER_HEIGHT: f64 = 28.0;
pub const DEFAULT_ROW_HEIGHT: f64 = 24.0;

/// Geometry used to resolve pointer coordinates to rows.
///
/// Rows are stacked below the column title bar at a fixed height; the view
/// is as wide as its columns.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TreeLayout {
    pub header_height: f64,
    pub row_height: f64,
}

impl Default for TreeLayout {
    fn default() -> Self {
        Self {
            header_height: DEFAULT_HEADER_HEIGHT,
            row_height: DEFAULT_ROW_HEIGHT,
        }
    }
}

impl TreeLayout {
    pub fn new(header_height: f64, row_height: f64) -> Self {
        Self {
            header_height,
            row_height,
        }
    }

    pub fn width(&self, tree: &GuestTree) -> f64 {
        tree.columns()
            .iter()
            .map(|column| f64::from(column.width))
            .sum()
    }

    /// The visible row under `(x, y)`, if any.
    pub fn row_at(&self, tree: &GuestTree, x: f64, y: f64) -> Option<TreePath> {
        if !(self.row_height > 0.0) {
            return None;
        }
        if !(x >= 0.0 && x < self.width(tree) && y >= self.header_height) {
            return None;
        }
        let index = ((y - self.header_height) / self.row_height).floor() as usize;
        tree.visible_rows().get(index).copied()
    }

    /// Top and bottom edge of a visible row.
    pub fn row_bounds(&self, tree: &GuestTree, path: TreePath) -> Option<(f64, f64)> {
        let index = tree.visible_rows().iter().position(|p| *p == path)?;
        let top = self.header_height + index as f64 * self.row_height;
        Some((top, top + self.row_height))
    }
}
