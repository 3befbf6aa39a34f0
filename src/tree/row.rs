use chrono::NaiveDate;
use std::cmp::Ordering;
use std::fmt::Write as _;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use super::column::{CellStyle, ColumnField, DisplayFormat, COLUMN_COUNT};
use crate::guest::{Guest, RoomNumber, DATE_FORMAT};
use crate::store::GuestSlot;

/// A display row: either a room header or one guest.
///
/// Styling follows `is_header` alone. An empty room is still a header even
/// though it has no children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRow {
    cells: [String; COLUMN_COUNT],
    is_header: bool,
    room: RoomNumber,
    slot: Option<GuestSlot>,
}

impl TreeRow {
    /// Header row: room number in the first cell, the rest blank.
    pub fn header(room: RoomNumber) -> Self {
        let mut cells: [String; COLUMN_COUNT] = Default::default();
        cells[ColumnField::FirstName.index()] = room.to_string();
        Self {
            cells,
            is_header: true,
            room,
            slot: None,
        }
    }

    /// Detail row projected from a stored guest.
    pub fn detail(slot: GuestSlot, guest: &Guest, format: &DisplayFormat) -> Self {
        Self {
            cells: [
                guest.first_name.clone(),
                guest.last_name.clone(),
                guest.gender.display_name().to_string(),
                format_date(guest.start_date, &format.date_format),
                format_date(guest.end_date, &format.date_format),
                guest.payment.display_name().to_string(),
            ],
            is_header: false,
            room: guest.room,
            slot: Some(slot),
        }
    }

    pub fn cell(&self, field: ColumnField) -> &str {
        &self.cells[field.index()]
    }

    pub fn cells(&self) -> &[String; COLUMN_COUNT] {
        &self.cells
    }

    /// Identifying text: the room number for headers, the first name otherwise.
    pub fn label(&self) -> &str {
        self.cell(ColumnField::FirstName)
    }

    pub fn is_header(&self) -> bool {
        self.is_header
    }

    pub fn room(&self) -> RoomNumber {
        self.room
    }

    pub fn slot(&self) -> Option<GuestSlot> {
        self.slot
    }

    pub fn style(&self) -> CellStyle {
        if self.is_header {
            CellStyle::Emphasized
        } else {
            CellStyle::Normal
        }
    }

    /// Detail row order: last name, first name, then insertion order.
    ///
    /// Names compare case- and accent-insensitively first, so "adams" and
    /// "Émile" land among their capitalized neighbours.
    pub(crate) fn sort_cmp(&self, other: &TreeRow) -> Ordering {
        compare_names(
            self.cell(ColumnField::LastName),
            other.cell(ColumnField::LastName),
        )
        .then_with(|| {
            compare_names(
                self.cell(ColumnField::FirstName),
                other.cell(ColumnField::FirstName),
            )
        })
        .then_with(|| self.slot.cmp(&other.slot))
    }
}

fn compare_names(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}

/// Lowercase with combining marks stripped after canonical decomposition.
fn collation_key(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

fn format_date(date: NaiveDate, pattern: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", date.format(pattern)).is_err() {
        return date.format(DATE_FORMAT).to_string();
    }
    out
}
