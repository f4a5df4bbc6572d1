#![no_main]

use arbitrary::Arbitrary;
use dropkit_core::{ElementId, Offset, Rect};
use dropkit_registry::{DragDropRegistry, DragPhase, DropTarget, OverlapPolicy, RegistryConfig};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Op {
    Draggable { id: u8, rect: [i16; 4] },
    Droppable { id: u8, rect: [i16; 4], accepts_any: bool },
    Report { id: u8, dx: i16, dy: i16 },
    EndDrag,
    EndDragFor { id: u8 },
    Commit { id: u8, dx: i16, dy: i16 },
    RemoveDraggable { id: u8 },
    RemoveDroppable { id: u8 },
    Clear,
}

#[derive(Debug, Arbitrary)]
struct Input {
    inclusive: bool,
    hit_slop: u8,
    purge_on_rebind: bool,
    ops: Vec<Op>,
}

fn rect([x, y, w, h]: [i16; 4]) -> Rect {
    Rect::new(f64::from(x), f64::from(y), f64::from(w), f64::from(h))
}

fn eid(id: u8) -> ElementId {
    // Small id space so ops frequently hit the same elements.
    ElementId::from_raw(u64::from(id % 16))
}

fuzz_target!(|input: Input| {
    let overlap = if input.inclusive {
        OverlapPolicy::Inclusive
    } else {
        OverlapPolicy::Strict
    };
    let config = RegistryConfig::default()
        .with_overlap(overlap)
        .with_hit_slop(f64::from(input.hit_slop))
        .with_purge_on_rebind(input.purge_on_rebind);
    let reg = DragDropRegistry::with_config(config);

    for op in input.ops.into_iter().take(256) {
        match op {
            Op::Draggable { id, rect: r } => reg.register_draggable(eid(id), rect(r)),
            Op::Droppable {
                id,
                rect: r,
                accepts_any,
            } => reg.register_droppable(eid(id), rect(r), accepts_any),
            Op::Report { id, dx, dy } => {
                let offset = Offset::new(f64::from(dx), f64::from(dy));
                reg.report_drag_offset(eid(id), offset);
                assert_eq!(
                    reg.is_colliding_as_drag(eid(id)),
                    reg.can_drop(eid(id), offset)
                );
            }
            Op::EndDrag => {
                reg.end_drag();
                assert_ne!(reg.phase(), DragPhase::Dragging);
            }
            Op::EndDragFor { id } => {
                let before = reg.session();
                let ended = reg.end_drag_for(eid(id));
                if ended {
                    assert_eq!(reg.session(), None);
                } else {
                    assert_eq!(reg.session(), before);
                }
            }
            Op::Commit { id, dx, dy } => {
                let offset = Offset::new(f64::from(dx), f64::from(dy));
                let before = reg.drop_outcome();
                let can = reg.can_drop(eid(id), offset);
                match reg.commit_drop(eid(id), offset) {
                    Some(DropTarget::Exclusive(target)) => {
                        assert!(can);
                        assert_eq!(target, eid(id));
                    }
                    Some(target @ DropTarget::Wildcard(_)) => {
                        assert!(can);
                        assert_eq!(reg.drop_outcome(), Some(target.outcome_id()));
                    }
                    None => {
                        assert!(!can);
                        assert_eq!(reg.drop_outcome(), before);
                    }
                }
            }
            Op::RemoveDraggable { id } => {
                reg.remove_draggable(eid(id));
                assert!(reg.draggable_rect(eid(id)).is_none());
            }
            Op::RemoveDroppable { id } => {
                reg.remove_droppable(eid(id));
                assert!(reg.droppable(eid(id)).is_none());
            }
            Op::Clear => reg.clear(),
        }
    }
});
