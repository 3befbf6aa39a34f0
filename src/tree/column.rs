use serde::{Deserialize, Serialize};

use super::row::TreeRow;
use crate::guest::DATE_FORMAT;

pub const COLUMN_COUNT: usize = 6;

pub const DEFAULT_COLUMN_WIDTHS: [u32; COLUMN_COUNT] = [160, 160, 100, 120, 120, 120];

/// Column the detail rows are ordered by.
pub const SORT_FIELD: ColumnField = ColumnField::LastName;

/// The guest field a column shows, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnField {
    FirstName,
    LastName,
    Gender,
    StartDate,
    EndDate,
    Payment,
}

impl ColumnField {
    pub const ALL: [ColumnField; COLUMN_COUNT] = [
        ColumnField::FirstName,
        ColumnField::LastName,
        ColumnField::Gender,
        ColumnField::StartDate,
        ColumnField::EndDate,
        ColumnField::Payment,
    ];

    pub fn index(self) -> usize {
        match self {
            ColumnField::FirstName => 0,
            ColumnField::LastName => 1,
            ColumnField::Gender => 2,
            ColumnField::StartDate => 3,
            ColumnField::EndDate => 4,
            ColumnField::Payment => 5,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ColumnField::FirstName => "First Name",
            ColumnField::LastName => "Last Name",
            ColumnField::Gender => "Gender",
            ColumnField::StartDate => "Start Date",
            ColumnField::EndDate => "End Date",
            ColumnField::Payment => "Payment",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellStyle {
    Emphasized,
    Normal,
}

/// How a column turns a row into a cell. Chosen when the column is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellRenderer {
    /// Shows the row label; emphasized for room headers.
    RoomLabel,
    /// Plain text in the normal style.
    Text,
}

/// Formatting knobs shared by every column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayFormat {
    pub date_format: String,
    pub room_font: String,
    pub normal_font: String,
}

impl Default for DisplayFormat {
    fn default() -> Self {
        Self {
            date_format: DATE_FORMAT.to_string(),
            room_font: "Sans Bold 11".to_string(),
            normal_font: "Sans 10".to_string(),
        }
    }
}

impl DisplayFormat {
    pub fn font(&self, style: CellStyle) -> &str {
        match style {
            CellStyle::Emphasized => &self.room_font,
            CellStyle::Normal => &self.normal_font,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedCell {
    pub text: String,
    pub style: CellStyle,
    pub font: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub field: ColumnField,
    pub renderer: CellRenderer,
    pub width: u32,
    pub sortable: bool,
}

impl Column {
    pub fn title(&self) -> &'static str {
        self.field.title()
    }

    pub fn render(&self, row: &TreeRow, format: &DisplayFormat) -> RenderedCell {
        let style = match self.renderer {
            CellRenderer::RoomLabel => row.style(),
            CellRenderer::Text => CellStyle::Normal,
        };
        RenderedCell {
            text: row.cell(self.field).to_string(),
            style,
            font: format.font(style).to_string(),
        }
    }
}

/// The six guest columns; the first one labels room headers.
pub fn standard_columns(widths: [u32; COLUMN_COUNT]) -> Vec<Column> {
    ColumnField::ALL
        .into_iter()
        .zip(widths)
        .map(|(field, width)| Column {
            field,
            renderer: if field == ColumnField::FirstName {
                CellRenderer::RoomLabel
            } else {
                CellRenderer::Text
            },
            width,
            sortable: field == SORT_FIELD,
        })
        .collect()
}
