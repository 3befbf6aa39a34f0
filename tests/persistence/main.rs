//! Integration tests for the data file behind a guest book.

use chrono::NaiveDate;
use guest_book::{
    Gender, Guest, GuestBook, GuestBookConfig, LoadError, LoadStatus, LoadSummary, MenuAction,
    MouseButton, Payment, PointerEvent, RecordError, RoomNumber, WriteError, WriteStatus,
    DEFAULT_HEADER_HEIGHT, DEFAULT_ROW_HEIGHT,
};
use std::fs;
use std::path::Path;

fn config(data_file: &Path, rooms: &[u32]) -> GuestBookConfig {
    GuestBookConfig {
        data_file: data_file.to_path_buf(),
        rooms: rooms.iter().copied().map(RoomNumber).collect(),
        ..GuestBookConfig::default()
    }
}

fn grace(room: u32) -> Guest {
    Guest::new(
        "Grace",
        "Hopper",
        room,
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
    )
    .with_gender(Gender::Female)
    .with_payment(Payment::CreditCard)
}

fn room_labels(book: &GuestBook) -> Vec<String> {
    book.tree()
        .headers()
        .map(|row| row.label().to_string())
        .collect()
}

#[test]
fn missing_file_starts_with_seeded_rooms() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("guests.dat");
    let config = config(&path, &[101, 102]);

    let (mut book, status) = GuestBook::open(&config);

    assert!(matches!(status, LoadStatus::Failed(LoadError::Missing(_))));
    assert_eq!(room_labels(&book), vec!["101", "102"]);

    assert!(book.add_guest(grace(101)).unwrap().is_written());
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "Grace,Hopper,2,2024-03-01,2024-03-04,3,101\n"
    );

    let (reopened, status) = GuestBook::open(&config);
    assert_eq!(
        status,
        LoadStatus::Loaded(LoadSummary {
            rooms: 0,
            guests: 1
        })
    );
    assert_eq!(room_labels(&reopened), vec!["101", "102"]);
    assert_eq!(reopened.store().guest_count(), 1);
}

#[test]
fn changes_survive_a_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("guests.dat");
    let config = config(&path, &[]);

    let (mut book, _) = GuestBook::open(&config);
    let _ = book.add_room(RoomNumber(5)).unwrap();
    let _ = book.add_guest(grace(5)).unwrap();
    let _ = book.add_room(RoomNumber(7)).unwrap();
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "%void%,5\nGrace,Hopper,2,2024-03-01,2024-03-04,3,5\n%void%,7\n"
    );

    let (mut book, status) = GuestBook::open(&config);
    assert!(status.is_loaded());
    assert_eq!(room_labels(&book), vec!["5", "7"]);
    let guests = book.tree().guests(RoomNumber(5)).unwrap();
    assert_eq!(guests.len(), 1);
    assert_eq!(guests[0].cells()[2], "Female");
    assert_eq!(guests[0].cells()[5], "Credit Card");

    let y = DEFAULT_HEADER_HEIGHT + DEFAULT_ROW_HEIGHT * 1.5;
    assert!(book
        .button_released(&PointerEvent::release(MouseButton::Secondary, 10.0, y))
        .is_handled());
    assert!(book.dispatch(MenuAction::Delete).unwrap().is_written());
    assert_eq!(fs::read_to_string(&path).unwrap(), "%void%,5\n%void%,7\n");

    let (book, _) = GuestBook::open(&config);
    assert_eq!(room_labels(&book), vec!["5", "7"]);
    assert_eq!(book.store().guest_count(), 0);
}

#[test]
fn appends_after_a_file_without_trailing_newline() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("guests.dat");
    fs::write(&path, "\n%void%,3").unwrap();

    let (mut book, status) = GuestBook::open(&config(&path, &[]));
    assert!(status.is_loaded());
    let _ = book.add_room(RoomNumber(4)).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "\n%void%,3\n%void%,4\n");
    let (book, _) = GuestBook::open(&config(&path, &[]));
    assert_eq!(room_labels(&book), vec!["3", "4"]);
}

#[test]
fn unreadable_lines_leave_the_store_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("guests.dat");
    fs::write(&path, "%void%,1\nnot a record\n").unwrap();

    let (book, status) = GuestBook::open(&config(&path, &[9]));

    match status {
        LoadStatus::Failed(LoadError::Parse { line, .. }) => assert_eq!(line, 2),
        other => panic!("unexpected status: {:?}", other),
    }
    assert_eq!(room_labels(&book), vec!["9"]);
}

#[test]
fn unreadable_file_is_never_rewritten() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("guests.dat");
    let original = "%void%,1\n\
                    Ada,Lovelace,2,2024-03-01,2024-03-04,3,1\n\
                    Bad,Gender,9,2024-03-01,2024-03-04,0,1\n";
    fs::write(&path, original).unwrap();

    let (mut book, status) = GuestBook::open(&config(&path, &[]));
    match status {
        LoadStatus::Failed(LoadError::Parse { line, source }) => {
            assert_eq!(line, 3);
            assert!(matches!(source, RecordError::UnknownCode { field: "gender", .. }));
        }
        other => panic!("unexpected status: {:?}", other),
    }

    let _ = book.add_room(RoomNumber(2)).unwrap();
    let _ = book.add_guest(grace(2)).unwrap();
    let y = DEFAULT_HEADER_HEIGHT + DEFAULT_ROW_HEIGHT * 1.5;
    assert!(book
        .button_released(&PointerEvent::release(MouseButton::Secondary, 10.0, y))
        .is_handled());

    let status = book.dispatch(MenuAction::Delete).unwrap();

    assert!(matches!(
        status,
        WriteStatus::Failed(WriteError::UnreadData(_))
    ));
    assert_eq!(book.store().guest_count(), 0);
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        format!(
            "{}%void%,2\nGrace,Hopper,2,2024-03-01,2024-03-04,3,2\n",
            original
        )
    );
}

#[test]
fn empty_seeded_rooms_stay_out_of_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("guests.dat");
    let config = config(&path, &[101, 102]);

    let (mut book, _) = GuestBook::open(&config);
    let _ = book.add_guest(grace(102)).unwrap();
    let y = DEFAULT_HEADER_HEIGHT + DEFAULT_ROW_HEIGHT * 2.5;
    assert!(book
        .button_released(&PointerEvent::release(MouseButton::Secondary, 10.0, y))
        .is_handled());
    assert!(book.dispatch(MenuAction::Delete).unwrap().is_written());

    assert_eq!(fs::read_to_string(&path).unwrap(), "");
    let (book, _) = GuestBook::open(&config);
    assert_eq!(room_labels(&book), vec!["101", "102"]);
}
