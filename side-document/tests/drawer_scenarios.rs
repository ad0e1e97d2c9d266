use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use side_document::storage::{self, PersistedState};
use side_document::{
    ChangeKind, DrawerChange, DrawerCommand, DrawerFields, DrawerPosition,
    FileStore, MemoryStore, PersistField, PointerEvent, ResizeController,
    SideDocument, SideDocumentOptions, StateStore, StorageError,
    ToggleButtonPosition,
};

#[derive(Default)]
struct CountingStore {
    inner: MemoryStore,
    writes: usize,
}

impl StateStore for CountingStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.read(key)
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.writes += 1;
        self.inner.write(key, value)
    }
}

fn bounded_options() -> SideDocumentOptions {
    SideDocumentOptions {
        drawer_width: Some(320.0),
        drawer_min_width: Some(200.0),
        drawer_max_width: Some(600.0),
        ..SideDocumentOptions::default()
    }
}

fn stored_blob(store: &MemoryStore, key: &str) -> serde_json::Value {
    let raw = store.get(key).expect("state blob should be stored");
    serde_json::from_str(raw).expect("state blob should be valid json")
}

#[test]
fn given_any_command_sequence_when_applied_then_width_stays_in_bounds() {
    let mut doc = SideDocument::builder(bounded_options())
        .initialize()
        .expect("options should resolve");
    let commands = [
        DrawerCommand::SetWidth(10.0),
        DrawerCommand::Toggle,
        DrawerCommand::SetWidth(5000.0),
        DrawerCommand::SetPosition(DrawerPosition::Left),
        DrawerCommand::SetWidth(f32::NAN),
        DrawerCommand::Pin,
        DrawerCommand::SetWidth(-40.0),
        DrawerCommand::OutsideClick,
        DrawerCommand::SetWidth(450.0),
    ];

    for command in commands {
        doc.apply(command);
        let width = doc.state().width_px();
        assert!(
            (200.0..=600.0).contains(&width),
            "width {width} escaped bounds"
        );
    }
    assert_eq!(doc.state().width_px(), 450.0);
}

#[test]
fn given_opened_drawer_when_toggled_twice_then_state_and_content_restored() {
    let mut doc = SideDocument::builder(SideDocumentOptions::default())
        .initialize()
        .expect("options should resolve");
    doc.open(Some("https://example.com/x"));

    doc.toggle();
    assert!(!doc.state().is_opened());
    doc.toggle();

    assert!(doc.state().is_opened());
    assert_eq!(doc.state().frame_src(), Some("https://example.com/x"));
}

#[test]
fn given_closed_drawer_when_toggled_twice_then_state_and_content_restored() {
    let mut doc = SideDocument::builder(SideDocumentOptions::default())
        .initialize()
        .expect("options should resolve");
    let src = doc.state().frame_src().map(String::from);

    doc.toggle();
    assert!(doc.state().is_opened());
    doc.toggle();

    assert!(!doc.state().is_opened());
    assert_eq!(doc.state().frame_src(), src.as_deref());
}

#[test]
fn given_persisted_state_when_reinitialized_then_visible_fields_restored() {
    let options = SideDocumentOptions {
        ignore_persist_props: Some(vec![
            PersistField::IsPinned,
            PersistField::FrameSrc,
        ]),
        ..bounded_options()
    };
    let mut first = SideDocument::builder(options.clone())
        .initialize()
        .expect("options should resolve");
    first.open(Some("https://example.com/guide"));
    first.pin();
    first.set_position(DrawerPosition::Left);
    first.set_width(480.0);

    let blob = stored_blob(first.store(), first.storage_key());
    assert!(blob.get("isPinned").is_none());
    assert!(blob.get("frameSrc").is_none());

    let second = SideDocument::builder(options)
        .with_store(first.store().clone())
        .initialize()
        .expect("options should resolve");

    assert!(second.state().is_opened());
    assert_eq!(second.state().position(), DrawerPosition::Left);
    assert_eq!(second.state().width_px(), 480.0);
    assert!(!second.state().is_pinned());
    assert_eq!(second.state().frame_src(), second.config().default_src());
}

#[test]
fn given_drag_with_many_moves_when_ended_then_exactly_one_write() {
    let mut doc = SideDocument::initialize(
        bounded_options(),
        CountingStore::default(),
    )
    .expect("options should resolve");
    let mut resize =
        ResizeController::attach(&doc).expect("resizing is enabled");

    resize
        .begin_drag(&doc, PointerEvent::new(7, 1000.0))
        .expect("drag should start");
    for step in 1..=25 {
        resize.on_drag_move(
            &mut doc,
            PointerEvent::new(7, 1000.0 - step as f32 * 4.0),
        );
    }
    assert_eq!(doc.store().writes, 0);

    let committed = resize.end_drag(&mut doc).expect("drag was active");

    assert!(committed.persisted());
    assert_eq!(doc.store().writes, 1);
    assert_eq!(doc.state().width_px(), 420.0);
    assert_eq!(doc.committed_width_px(), 420.0);
}

#[test]
fn given_bounded_width_when_dragged_past_max_then_width_clamped() {
    let mut doc = SideDocument::builder(bounded_options())
        .initialize()
        .expect("options should resolve");
    let mut resize = ResizeController::default();

    resize
        .begin_drag(&doc, PointerEvent::new(1, 1000.0))
        .expect("drag should start");
    let moved = resize
        .on_drag_move(&mut doc, PointerEvent::new(1, 420.0))
        .expect("move should apply");
    resize.end_drag(&mut doc);

    let out_of_range = moved.out_of_range().expect("900 exceeds the max");
    assert_eq!(out_of_range.requested, 900.0);
    assert_eq!(out_of_range.applied, 600.0);
    assert_eq!(doc.state().width_px(), 600.0);
    assert_eq!(
        stored_blob(doc.store(), doc.storage_key())["drawerWidthPx"],
        600.0
    );
}

#[test]
fn given_pinned_open_drawer_when_clicked_outside_then_only_close_closes() {
    let mut doc = SideDocument::builder(SideDocumentOptions::default())
        .initialize()
        .expect("options should resolve");
    doc.open(None);
    doc.pin();

    let outside = doc.outside_click();
    assert!(outside.is_noop());
    assert!(doc.state().is_opened());

    doc.close();
    assert!(!doc.state().is_opened());
}

#[test]
fn given_stored_width_when_initialized_then_stored_width_wins() {
    let mut store = MemoryStore::new();
    storage::save(
        &mut store,
        "sd--state",
        &PersistedState {
            drawer_width_px: Some(450.0),
            ..PersistedState::default()
        },
    )
    .expect("save should succeed");

    let doc = SideDocument::builder(bounded_options())
        .with_store(store)
        .initialize()
        .expect("options should resolve");

    assert_eq!(doc.state().width_px(), 450.0);
    assert_eq!(doc.committed_width_px(), 450.0);
}

#[test]
fn given_stored_width_outside_bounds_when_initialized_then_clamped() {
    let mut store = MemoryStore::new();
    store.insert("sd--state", r#"{ "drawerWidthPx": 9000 }"#);

    let doc = SideDocument::builder(bounded_options())
        .with_store(store)
        .initialize()
        .expect("options should resolve");

    assert_eq!(doc.state().width_px(), 600.0);
}

#[test]
fn given_following_button_when_moved_left_then_corner_follows() {
    let mut doc = SideDocument::builder(SideDocumentOptions {
        toggle_button_position: Some(ToggleButtonPosition::BottomRight),
        ..SideDocumentOptions::default()
    })
    .initialize()
    .expect("options should resolve");

    let transition = doc.set_position(DrawerPosition::Left);

    assert_eq!(
        transition.changed(),
        DrawerFields::POSITION | DrawerFields::TOGGLE_BUTTON
    );
    assert_eq!(
        doc.state().toggle_button_position(),
        ToggleButtonPosition::BottomLeft
    );
    let blob = stored_blob(doc.store(), doc.storage_key());
    assert_eq!(blob["drawerPosition"], "left");
    assert_eq!(blob["toggleButtonPosition"], "bottom-left");
}

#[test]
fn given_two_prefixes_when_used_side_by_side_then_states_are_isolated() {
    let mut docs = SideDocument::builder(SideDocumentOptions {
        storage_key_prefix: Some(String::from("docs")),
        ..SideDocumentOptions::default()
    })
    .initialize()
    .expect("options should resolve");
    docs.open(None);
    let shared = docs.store().clone();

    let help = SideDocument::builder(SideDocumentOptions {
        storage_key_prefix: Some(String::from("help")),
        ..SideDocumentOptions::default()
    })
    .with_store(shared.clone())
    .initialize()
    .expect("options should resolve");
    let docs_again = SideDocument::builder(SideDocumentOptions {
        storage_key_prefix: Some(String::from("docs")),
        ..SideDocumentOptions::default()
    })
    .with_store(shared)
    .initialize()
    .expect("options should resolve");

    assert_eq!(help.storage_key(), "help-state");
    assert!(!help.state().is_opened());
    assert!(docs_again.state().is_opened());
}

#[test]
fn given_observer_when_drawer_used_then_sees_every_effective_change() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let mut doc = SideDocument::builder(SideDocumentOptions::default())
        .with_observer(move |change: &DrawerChange<'_>| {
            sink.borrow_mut().push((change.kind, change.changed));
        })
        .initialize()
        .expect("options should resolve");

    doc.open(None);
    doc.open(None);
    doc.pin();

    let seen = seen.borrow();
    assert_eq!(
        seen.as_slice(),
        &[
            (ChangeKind::Initial, DrawerFields::all()),
            (ChangeKind::Committed, DrawerFields::OPENED),
            (ChangeKind::Committed, DrawerFields::PINNED),
        ]
    );
}

#[test]
fn given_file_store_when_reopened_then_state_survives_restart() {
    let root = test_temp_dir("restart");
    let mut first = SideDocument::initialize(
        SideDocumentOptions::default(),
        FileStore::new(root.clone()),
    )
    .expect("options should resolve");
    first.open(Some("https://example.com/changelog"));
    first.set_position(DrawerPosition::Left);

    let second = SideDocument::initialize(
        SideDocumentOptions::default(),
        FileStore::new(root.clone()),
    )
    .expect("options should resolve");

    assert!(second.state().is_opened());
    assert_eq!(second.state().position(), DrawerPosition::Left);
    assert_eq!(
        second.state().frame_src(),
        Some("https://example.com/changelog")
    );
    fs::remove_dir_all(&root).expect("temporary directory should be removed");
}

fn test_temp_dir(test_name: &str) -> PathBuf {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be monotonic")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!(
        "side-document-scenario-{test_name}-{stamp}-{}",
        std::process::id()
    ));

    fs::create_dir_all(&dir).expect("temporary directory should be created");
    dir
}
