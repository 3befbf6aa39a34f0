//! Guest records - the value types the store owns.
//!
//! A [`Guest`] knows how to render itself as a flat-file line and how to be
//! parsed back from one (see [`RecordLine`]). Gender and payment are persisted
//! as numeric codes and displayed through their human readable names.

mod record;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use record::{RecordError, RecordLine, DATE_FORMAT, VOID_MARK};

/// Room number, the unique key of a room in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomNumber(pub u32);

impl fmt::Display for RoomNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for RoomNumber {
    fn from(value: u32) -> Self {
        RoomNumber(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Gender {
    #[default]
    Unselected,
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 4] = [Gender::Unselected, Gender::Male, Gender::Female, Gender::Other];

    /// Code written to the data file.
    pub fn code(self) -> u8 {
        match self {
            Gender::Unselected => 0,
            Gender::Male => 1,
            Gender::Female => 2,
            Gender::Other => 3,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|gender| gender.code() == code)
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Gender::Unselected => "Unselected",
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Payment {
    #[default]
    Unselected,
    Unpaid,
    Cash,
    CreditCard,
    Other,
}

impl Payment {
    pub const ALL: [Payment; 5] = [
        Payment::Unselected,
        Payment::Unpaid,
        Payment::Cash,
        Payment::CreditCard,
        Payment::Other,
    ];

    /// Code written to the data file.
    pub fn code(self) -> u8 {
        match self {
            Payment::Unselected => 0,
            Payment::Unpaid => 1,
            Payment::Cash => 2,
            Payment::CreditCard => 3,
            Payment::Other => 4,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|payment| payment.code() == code)
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Payment::Unselected => "Unselected",
            Payment::Unpaid => "Unpaid",
            Payment::Cash => "Cash",
            Payment::CreditCard => "Credit Card",
            Payment::Other => "Other",
        }
    }
}

impl fmt::Display for Payment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A guest staying in a room.
///
/// Guests carry no identity of their own: two guests with identical fields in
/// the same room are both kept, and the store tells them apart by insertion
/// order only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guest {
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub payment: Payment,
    pub room: RoomNumber,
}

impl Guest {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        room: impl Into<RoomNumber>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            gender: Gender::Unselected,
            start_date,
            end_date,
            payment: Payment::Unselected,
            room: room.into(),
        }
    }

    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = gender;
        self
    }

    pub fn with_payment(mut self, payment: Payment) -> Self {
        self.payment = payment;
        self
    }

    /// Reject field values the line format cannot carry.
    pub fn validate(&self) -> Result<(), RecordError> {
        for (field, value) in [
            ("first_name", &self.first_name),
            ("last_name", &self.last_name),
        ] {
            if value.contains(['\n', '\r']) {
                return Err(RecordError::InvalidField {
                    field,
                    value: value.clone(),
                });
            }
        }
        if self.first_name == VOID_MARK {
            return Err(RecordError::InvalidField {
                field: "first_name",
                value: self.first_name.clone(),
            });
        }
        Ok(())
    }
}
