//! End-to-end drag sessions against a registry, the way the draggable and
//! droppable collaborators drive it.

use std::cell::RefCell;
use std::rc::Rc;

use dropkit_core::{ElementId, Offset, Rect};
use dropkit_registry::{
    DragDropRegistry, DragPhase, DropBinding, DropTarget, RegistryConfig, RegistryEvent,
};

fn id(raw: u64) -> ElementId {
    ElementId::from_raw(raw)
}

#[test]
fn single_target_session() {
    let reg = DragDropRegistry::new();
    let card = id(1);
    reg.register_draggable(card, Rect::new(0.0, 0.0, 100.0, 100.0));
    reg.register_droppable(card, Rect::new(150.0, 0.0, 100.0, 100.0), false);

    // Gesture moves toward the slot.
    for step in [10.0, 30.0, 50.0] {
        reg.report_drag_offset(card, Offset::new(step, 0.0));
        assert!(!reg.is_colliding_as_drag(card));
        assert!(!reg.is_colliding_as_drop(card));
    }
    reg.report_drag_offset(card, Offset::new(75.0, 10.0));
    assert!(reg.is_colliding_as_drag(card));
    assert!(reg.is_colliding_as_drop(card));

    // Gesture ends over the slot.
    let release = Offset::new(75.0, 10.0);
    assert!(reg.can_drop(card, release));
    assert_eq!(reg.commit_drop(card, release), Some(DropTarget::Exclusive(card)));
    reg.end_drag();

    assert_eq!(reg.drop_outcome(), Some(card));
    assert_eq!(reg.phase(), DragPhase::Dropped);
}

#[test]
fn missed_drop_springs_back() {
    let reg = DragDropRegistry::new();
    let card = id(1);
    reg.register_draggable(card, Rect::new(0.0, 0.0, 100.0, 100.0));
    reg.register_droppable(card, Rect::new(150.0, 0.0, 100.0, 100.0), false);

    reg.report_drag_offset(card, Offset::new(20.0, 0.0));
    let release = Offset::new(20.0, 0.0);
    assert!(!reg.can_drop(card, release));
    assert!(reg.end_drag());

    assert_eq!(reg.phase(), DragPhase::Idle);
    assert_eq!(reg.drop_outcome(), None);
}

#[test]
fn multi_target_board() {
    let reg = DragDropRegistry::new();
    let (a, b) = (id(1), id(2));
    let (todo, doing, done) = (id(10), id(11), id(12));
    reg.register_draggable(a, Rect::new(0.0, 0.0, 40.0, 20.0));
    reg.register_draggable(b, Rect::new(0.0, 30.0, 40.0, 20.0));
    reg.register_droppable(todo, Rect::new(0.0, 0.0, 50.0, 300.0), true);
    reg.register_droppable(doing, Rect::new(100.0, 0.0, 50.0, 300.0), true);
    reg.register_droppable(done, Rect::new(200.0, 0.0, 50.0, 300.0), true);

    reg.report_drag_offset(a, Offset::new(105.0, 0.0));
    assert!(reg.is_colliding_as_drop(doing));
    assert!(!reg.is_colliding_as_drop(todo));
    assert!(!reg.is_colliding_as_drop(done));

    assert_eq!(
        reg.commit_drop(a, Offset::new(105.0, 0.0)),
        Some(DropTarget::Wildcard(doing))
    );
    assert_eq!(reg.drop_outcome(), Some(doing));

    reg.report_drag_offset(b, Offset::new(210.0, 0.0));
    reg.commit_drop(b, Offset::new(210.0, 0.0));
    assert_eq!(reg.drop_outcome(), Some(done), "next drop overwrites outcome");
}

#[test]
fn relayout_moves_targets() {
    let reg = DragDropRegistry::new();
    let a = id(1);
    let slot = id(5);
    reg.register_draggable(a, Rect::new(0.0, 0.0, 10.0, 10.0));
    reg.register_droppable(slot, Rect::new(100.0, 0.0, 10.0, 10.0), true);
    assert!(reg.can_drop(a, Offset::new(95.0, 0.0)));

    reg.register_droppable(slot, Rect::new(300.0, 0.0, 10.0, 10.0), true);
    assert!(!reg.can_drop(a, Offset::new(95.0, 0.0)));
    assert_eq!(reg.droppable_count(), 1);

    reg.register_draggable(a, Rect::new(200.0, 0.0, 10.0, 10.0));
    assert!(reg.can_drop(a, Offset::new(95.0, 0.0)));
    assert_eq!(reg.draggable_count(), 1);
}

#[test]
fn mode_change_is_last_write_wins() {
    let reg = DragDropRegistry::new();
    let x = id(3);
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    let _sub = reg.subscribe(move |e| sink.borrow_mut().push(*e));

    reg.register_droppable(x, Rect::from_size(10.0, 10.0), false);
    reg.register_droppable(x, Rect::from_size(10.0, 10.0), true);

    assert_eq!(reg.droppable_binding(x), Some(DropBinding::Wildcard));
    assert!(matches!(
        events.borrow()[1],
        RegistryEvent::DroppableRegistered { rebound: true, .. }
    ));
}

#[test]
fn independent_scopes_do_not_share_ids() {
    let outer = DragDropRegistry::new();
    let inner = DragDropRegistry::with_config(RegistryConfig::default());
    let a = id(1);
    outer.register_draggable(a, Rect::from_size(10.0, 10.0));
    outer.register_droppable(a, Rect::from_size(10.0, 10.0), false);

    assert!(outer.can_drop(a, Offset::ZERO));
    assert!(!inner.can_drop(a, Offset::ZERO));
    inner.report_drag_offset(a, Offset::ZERO);
    assert_eq!(outer.phase(), DragPhase::Idle);
}

#[test]
fn logging_paths_run_under_a_subscriber() {
    let subscriber = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::TRACE)
        .finish();
    tracing::subscriber::with_default(subscriber, || {
        let reg = DragDropRegistry::new();
        let _sub = reg.subscribe(|_| {});
        let a = id(1);
        reg.register_draggable(a, Rect::from_size(10.0, 10.0));
        reg.register_droppable(id(2), Rect::from_size(10.0, 10.0), true);
        reg.report_drag_offset(a, Offset::new(1.0, 1.0));
        assert!(reg.commit_drop(a, Offset::new(1.0, 1.0)).is_some());
        reg.clear();
        assert_eq!(reg.version(), 5);
    });
}
