//! Integration tests for the guest book facade.


use chrono::NaiveDate;
use guest_book::{
    GuestBook, GuestBookConfig, GuestBookError, GuestStore, Guest, Handled, InMemoryWriter,
    MenuAction, MouseButton, PointerEvent, RecordError, RecordWriter, RoomNumber, StoreError,
    TreePath, WriteStatus, DEFAULT_HEADER_HEIGHT, DEFAULT_ROW_HEIGHT,
};
use std::sync::{Arc, Mutex};
use writers::FailingWriter;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 9, d).unwrap()
}

fn guest(first: &str, last: &str, room: u32) -> Guest {
    Guest::new(first, last, room, day(1), day(3))
}

fn book<W: RecordWriter>(writer: W) -> GuestBook<W> {
    GuestBook::new(GuestStore::new(), writer, &GuestBookConfig::default())
}

/// Secondary button release over the n-th visible row.
fn right_click_row(n: usize) -> PointerEvent {
    let y = DEFAULT_HEADER_HEIGHT + DEFAULT_ROW_HEIGHT * n as f64 + DEFAULT_ROW_HEIGHT / 2.0;
    PointerEvent::release(MouseButton::Secondary, 40.0, y)
}

#[test]
fn new_room_with_guest_shows_header_and_child() {
    let writer = InMemoryWriter::new();
    let mut book = book(writer.clone());

    assert!(book.add_room(RoomNumber(5)).unwrap().is_written());
    assert!(book.add_guest(guest("Ann", "Smith", 5)).unwrap().is_written());

    let headers: Vec<_> = book.tree().headers().map(|row| row.label().to_string()).collect();
    assert_eq!(headers, vec!["5"]);
    let children = book.tree().guests(RoomNumber(5)).unwrap();
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].label(), "Ann");

    assert_eq!(book.store().guest_count(), 1);
    assert_eq!(
        writer.lines(),
        vec![
            "%void%,5".to_string(),
            "Ann,Smith,0,2024-09-01,2024-09-03,0,5".to_string(),
        ]
    );

    let rendered: serde_json::Value =
        serde_json::from_str(&book.tree().render_json().unwrap()).unwrap();
    assert_eq!(rendered[0]["is_header"], true);
    assert_eq!(rendered[0]["cells"][0]["text"], "5");
    assert_eq!(rendered[0]["cells"][0]["style"], "emphasized");
    assert_eq!(rendered[1]["depth"], 1);
    assert_eq!(rendered[1]["cells"][1]["text"], "Smith");
}

#[test]
fn guests_are_listed_by_last_name() {
    let mut book = book(InMemoryWriter::new());
    let _ = book.add_room(RoomNumber(1)).unwrap();

    for (first, last) in [("Sam", "Smith"), ("Ann", "Adams"), ("Jo", "Jones")] {
        let _ = book.add_guest(guest(first, last, 1)).unwrap();
    }

    let order: Vec<_> = book
        .tree()
        .guests(RoomNumber(1))
        .unwrap()
        .iter()
        .map(|row| row.label().to_string())
        .collect();
    assert_eq!(order, vec!["Ann", "Jo", "Sam"]);
}

#[test]
fn rejected_mutations_change_nothing() {
    let writer = InMemoryWriter::new();
    let mut book = book(writer.clone());
    let _ = book.add_room(RoomNumber(5)).unwrap();

    assert_eq!(
        book.add_room(RoomNumber(5)).unwrap_err(),
        GuestBookError::Store(StoreError::DuplicateRoom(RoomNumber(5)))
    );
    assert_eq!(
        book.add_guest(guest("Ann", "Adams", 9)).unwrap_err(),
        GuestBookError::Store(StoreError::UnknownRoom(RoomNumber(9)))
    );
    assert!(matches!(
        book.add_guest(guest("Ann\nB", "Adams", 5)),
        Err(GuestBookError::Record(RecordError::InvalidField { .. }))
    ));

    assert_eq!(book.store().room_count(), 1);
    assert_eq!(book.store().guest_count(), 0);
    assert_eq!(book.tree().row_count(), 1);
    assert_eq!(writer.lines(), vec!["%void%,5".to_string()]);
}

#[test]
fn right_click_opens_menu_only_over_rows() {
    let mut book = book(InMemoryWriter::new());
    let _ = book.add_room(RoomNumber(1)).unwrap();
    let _ = book.add_guest(guest("Ann", "Adams", 1)).unwrap();

    let below_rows = PointerEvent::release(MouseButton::Secondary, 40.0, 400.0);
    assert_eq!(book.button_released(&below_rows), Handled::No);
    assert!(book.context_menu().is_none());

    assert_eq!(book.button_released(&right_click_row(1)), Handled::Yes);
    let menu = book.context_menu().unwrap();
    assert_eq!(menu.actions, vec![MenuAction::Delete]);
    assert_eq!(menu.target.label, "Ann");
    assert_eq!(menu.target.path, TreePath::detail(0, 0));
}

#[test]
fn delete_from_menu_rewrites_the_file() {
    let writer = InMemoryWriter::new();
    let mut book = book(writer.clone());
    let _ = book.add_room(RoomNumber(1)).unwrap();
    let _ = book.add_guest(guest("Ann", "Adams", 1)).unwrap();
    let _ = book.add_guest(guest("Sam", "Smith", 1)).unwrap();
    let _ = book.add_room(RoomNumber(2)).unwrap();

    // Rows: header 1, Adams, Smith, header 2.
    assert!(book.button_released(&right_click_row(2)).is_handled());
    assert_eq!(book.context_target().unwrap().label, "Sam");

    let status = book.dispatch(MenuAction::Delete).unwrap();

    assert_eq!(status, WriteStatus::Written);
    assert!(book.context_menu().is_none());
    assert_eq!(book.tree().guests(RoomNumber(1)).unwrap().len(), 1);
    assert_eq!(book.store().guest_count(), 1);
    assert_eq!(
        writer.lines(),
        vec![
            "Ann,Adams,0,2024-09-01,2024-09-03,0,1".to_string(),
            "%void%,2".to_string(),
        ]
    );

    assert_eq!(
        book.dispatch(MenuAction::Delete).unwrap_err(),
        GuestBookError::NoContextTarget
    );
}

#[test]
fn deleting_the_last_guest_keeps_the_room() {
    let writer = InMemoryWriter::new();
    let mut book = book(writer.clone());
    let _ = book.add_room(RoomNumber(4)).unwrap();
    let _ = book.add_guest(guest("Ann", "Adams", 4)).unwrap();

    assert!(book.button_released(&right_click_row(1)).is_handled());
    let _ = book.dispatch(MenuAction::Delete).unwrap();

    assert!(book.store().contains_room(RoomNumber(4)));
    assert_eq!(book.tree().headers().count(), 1);
    assert_eq!(writer.lines(), vec!["%void%,4".to_string()]);
}

#[test]
fn delete_on_a_room_header_is_refused() {
    let writer = InMemoryWriter::new();
    let mut book = book(writer.clone());
    let _ = book.add_room(RoomNumber(3)).unwrap();

    assert!(book.button_released(&right_click_row(0)).is_handled());
    assert!(book.context_target().unwrap().is_header());

    assert_eq!(
        book.dispatch(MenuAction::Delete).unwrap_err(),
        GuestBookError::NotAGuestRow(RoomNumber(3))
    );
    assert!(book.context_menu().is_none());
    assert!(book.store().contains_room(RoomNumber(3)));
    assert_eq!(writer.lines(), vec!["%void%,3".to_string()]);
}

#[test]
fn identical_guests_are_kept_apart() {
    let writer = InMemoryWriter::new();
    let mut book = book(writer.clone());
    let _ = book.add_room(RoomNumber(6)).unwrap();
    let _ = book.add_guest(guest("Ann", "Adams", 6)).unwrap();
    let _ = book.add_guest(guest("Ann", "Adams", 6)).unwrap();

    assert_eq!(book.tree().guests(RoomNumber(6)).unwrap().len(), 2);

    assert!(book.button_released(&right_click_row(2)).is_handled());
    let _ = book.dispatch(MenuAction::Delete).unwrap();

    assert_eq!(book.tree().guests(RoomNumber(6)).unwrap().len(), 1);
    assert_eq!(book.store().guest_count(), 1);
    assert_eq!(
        writer.lines(),
        vec!["Ann,Adams,0,2024-09-01,2024-09-03,0,6".to_string()]
    );
}

#[test]
fn activation_notifies_listeners_and_selects() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let mut book = book(InMemoryWriter::new());
    let sink = seen.clone();
    book.on_activate(move |row| sink.lock().unwrap().push(row.label.clone()));

    let _ = book.add_room(RoomNumber(1)).unwrap();
    let _ = book.add_guest(guest("Ann", "Adams", 1)).unwrap();

    let header = book.activate(TreePath::header(0)).unwrap();
    assert!(header.is_header());
    let row = book.activate(TreePath::detail(0, 0)).unwrap();
    assert_eq!(book.selected(), Some(&row));
    assert!(book.activate(TreePath::detail(0, 7)).is_none());
    assert_eq!(*seen.lock().unwrap(), vec!["1".to_string(), "Ann".to_string()]);

    assert!(book.button_released(&right_click_row(1)).is_handled());
    let _ = book.dispatch(MenuAction::Delete).unwrap();
    assert!(book.selected().is_none());
}

#[test]
fn failed_writes_keep_memory_state() {
    let writer = FailingWriter::new();
    let mut book = book(writer.clone());

    let status = book.add_room(RoomNumber(8)).unwrap();
    assert!(!status.is_written());
    assert!(status.error().is_some());

    let status = book.add_guest(guest("Ann", "Adams", 8)).unwrap();
    assert!(matches!(status, WriteStatus::Failed(_)));

    assert!(book.store().contains_room(RoomNumber(8)));
    assert_eq!(book.store().guest_count(), 1);
    assert_eq!(book.tree().guests(RoomNumber(8)).unwrap().len(), 1);
    assert_eq!(writer.attempts(), 2);
}

#[test]
fn collapsed_rooms_hide_their_guests_from_hit_testing() {
    let mut book = book(InMemoryWriter::new());
    let _ = book.add_room(RoomNumber(1)).unwrap();
    let _ = book.add_guest(guest("Ann", "Adams", 1)).unwrap();
    let _ = book.add_room(RoomNumber(2)).unwrap();

    book.collapse(RoomNumber(1)).unwrap();
    assert!(book.button_released(&right_click_row(1)).is_handled());
    assert_eq!(book.context_target().unwrap().room, RoomNumber(2));
    book.dismiss_menu();

    // Adding a guest expands everything again.
    let _ = book.add_guest(guest("Bo", "Brown", 2)).unwrap();
    assert_eq!(book.tree().is_expanded(RoomNumber(1)), Some(true));
    assert_eq!(book.tree().visible_rows().len(), 4);
}
