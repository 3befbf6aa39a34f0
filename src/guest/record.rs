use chrono::NaiveDate;
use std::fmt;

use super::{Gender, Guest, Payment, RoomNumber};

/// First field of a line that declares a room without guests.
pub const VOID_MARK: &str = "%void%";

/// Date format used in the data file.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const GUEST_FIELDS: usize = 7;
const ROOM_FIELDS: usize = 2;

/// Error type for encoding and parsing data file lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// The line has the wrong number of comma separated fields.
    FieldCount { expected: usize, found: usize },
    /// A field holds a value the line format cannot carry.
    InvalidField { field: &'static str, value: String },
    /// A numeric field did not parse.
    InvalidNumber { field: &'static str, value: String },
    /// A date field did not match [`DATE_FORMAT`].
    InvalidDate { field: &'static str, value: String },
    /// A gender or payment code outside the known range.
    UnknownCode { field: &'static str, code: String },
    /// The csv layer failed to read or write the line.
    Csv(String),
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordError::FieldCount { expected, found } => {
                write!(f, "expected {} fields, found {}", expected, found)
            }
            RecordError::InvalidField { field, value } => {
                write!(f, "invalid value for {}: {:?}", field, value)
            }
            RecordError::InvalidNumber { field, value } => {
                write!(f, "invalid number for {}: {:?}", field, value)
            }
            RecordError::InvalidDate { field, value } => {
                write!(f, "invalid date for {}: {:?}", field, value)
            }
            RecordError::UnknownCode { field, code } => {
                write!(f, "unknown {} code: {:?}", field, code)
            }
            RecordError::Csv(msg) => write!(f, "csv error: {}", msg),
        }
    }
}

impl std::error::Error for RecordError {}

/// One line of the data file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordLine {
    /// `%void%,<room>`
    Room(RoomNumber),
    /// `<first>,<last>,<gender>,<start>,<end>,<payment>,<room>`
    Guest(Guest),
}

impl RecordLine {
    /// Parse a single line (without its terminator).
    pub fn parse(line: &str) -> Result<Self, RecordError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(line.as_bytes());
        let record = match reader.records().next() {
            Some(record) => record.map_err(|e| RecordError::Csv(e.to_string()))?,
            None => {
                return Err(RecordError::FieldCount {
                    expected: GUEST_FIELDS,
                    found: 0,
                })
            }
        };

        if record.get(0) == Some(VOID_MARK) {
            if record.len() != ROOM_FIELDS {
                return Err(RecordError::FieldCount {
                    expected: ROOM_FIELDS,
                    found: record.len(),
                });
            }
            return Ok(RecordLine::Room(parse_room(record.get(1).unwrap_or(""))?));
        }

        if record.len() != GUEST_FIELDS {
            return Err(RecordError::FieldCount {
                expected: GUEST_FIELDS,
                found: record.len(),
            });
        }

        let field = |i: usize| record.get(i).unwrap_or("");
        Ok(RecordLine::Guest(Guest {
            first_name: field(0).to_string(),
            last_name: field(1).to_string(),
            gender: parse_code(field(2), "gender", Gender::from_code)?,
            start_date: parse_date(field(3), "start_date")?,
            end_date: parse_date(field(4), "end_date")?,
            payment: parse_code(field(5), "payment", Payment::from_code)?,
            room: parse_room(field(6))?,
        }))
    }

    /// Encode as a line, including the trailing newline.
    pub fn to_line(&self) -> Result<String, RecordError> {
        match self {
            RecordLine::Room(room) => encode(&[VOID_MARK, room.to_string().as_str()]),
            RecordLine::Guest(guest) => guest.to_line(),
        }
    }
}

impl Guest {
    /// Encode this guest as a data file line, including the trailing newline.
    pub fn to_line(&self) -> Result<String, RecordError> {
        self.validate()?;
        encode(&[
            self.first_name.as_str(),
            self.last_name.as_str(),
            self.gender.code().to_string().as_str(),
            self.start_date.format(DATE_FORMAT).to_string().as_str(),
            self.end_date.format(DATE_FORMAT).to_string().as_str(),
            self.payment.code().to_string().as_str(),
            self.room.to_string().as_str(),
        ])
    }
}

fn encode(fields: &[&str]) -> Result<String, RecordError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_writer(Vec::new());
    writer
        .write_record(fields)
        .map_err(|e| RecordError::Csv(e.to_string()))?;
    let bytes = writer
        .into_inner()
        .map_err(|e| RecordError::Csv(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| RecordError::Csv(e.to_string()))
}

fn parse_room(raw: &str) -> Result<RoomNumber, RecordError> {
    raw.trim()
        .parse::<u32>()
        .map(RoomNumber)
        .map_err(|_| RecordError::InvalidNumber {
            field: "room",
            value: raw.to_string(),
        })
}

fn parse_date(raw: &str, field: &'static str) -> Result<NaiveDate, RecordError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|_| RecordError::InvalidDate {
        field,
        value: raw.to_string(),
    })
}

fn parse_code<T>(
    raw: &str,
    field: &'static str,
    from_code: fn(u8) -> Option<T>,
) -> Result<T, RecordError> {
    raw.trim()
        .parse::<u8>()
        .ok()
        .and_then(from_code)
        .ok_or_else(|| RecordError::UnknownCode {
            field,
            code: raw.to_string(),
        })
}
