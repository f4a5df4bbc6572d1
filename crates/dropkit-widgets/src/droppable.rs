#![forbid(unsafe_code)]

//! Headless droppable target.
//!
//! A [`Droppable`] subscribes to its scope's registry when it is created and
//! unsubscribes when it is dropped. When a committed drop is addressed to it
//! (its own id for a wildcard target, the bound draggable's id for an
//! exclusive one, which is the same id it was declared with) it switches to
//! the received state and runs its `on_received` action with the id of the
//! draggable that landed. Drops that arrive while the action is running
//! (because the action itself committed one) are queued and delivered, in
//! order, once it returns.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use dropkit_core::{ElementId, Rect, Subscription};
use dropkit_registry::{DropBinding, RegistryEvent};
use tracing::debug;

use crate::container::DragDropContainer;

/// Snapshot handed to the view's content builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DropInfo {
    pub did_drop: bool,
    /// A draggable is currently hovering over this target.
    pub is_colliding: bool,
}

type ReceivedAction = Box<dyn FnMut(ElementId)>;

#[derive(Default)]
struct ReceiveState {
    received_from: Cell<Option<ElementId>>,
    action: RefCell<Option<ReceivedAction>>,
    pending: RefCell<VecDeque<ElementId>>,
    delivering: Cell<bool>,
}

impl ReceiveState {
    fn receive(&self, draggable: ElementId) {
        self.received_from.set(Some(draggable));
        self.pending.borrow_mut().push_back(draggable);
        if self.delivering.replace(true) {
            // The outer call drains the queue once the running action returns.
            return;
        }
        loop {
            let next = self.pending.borrow_mut().pop_front();
            let Some(from) = next else { break };
            let taken = self.action.borrow_mut().take();
            if let Some(mut action) = taken {
                action(from);
                let mut slot = self.action.borrow_mut();
                if slot.is_none() {
                    *slot = Some(action);
                }
            }
        }
        self.delivering.set(false);
    }
}

/// View-side state for one droppable target.
pub struct Droppable {
    id: ElementId,
    binding: DropBinding,
    scope: DragDropContainer,
    state: Rc<ReceiveState>,
    _subscription: Subscription,
}

impl std::fmt::Debug for Droppable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Droppable")
            .field("id", &self.id)
            .field("binding", &self.binding)
            .field("received_from", &self.state.received_from.get())
            .finish_non_exhaustive()
    }
}

impl Droppable {
    pub(crate) fn new(id: ElementId, accepts_any: bool, scope: DragDropContainer) -> Self {
        let binding = DropBinding::from_accepts_any(accepts_any);
        let state = Rc::new(ReceiveState::default());

        let observer = Rc::clone(&state);
        let subscription = scope.registry().subscribe(move |event| {
            if let RegistryEvent::Dropped { draggable, target } = *event
                && target.outcome_id() == id
                && target.binding() == binding
            {
                debug!(droppable = %id, draggable = %draggable, "drop received");
                observer.receive(draggable);
            }
        });

        Self {
            id,
            binding,
            scope,
            state,
            _subscription: subscription,
        }
    }

    /// Run `action` with the dropped draggable's id each time a drop lands
    /// here.
    #[must_use]
    pub fn on_received(self, action: impl FnMut(ElementId) + 'static) -> Self {
        *self.state.action.borrow_mut() = Some(Box::new(action));
        self
    }

    #[must_use]
    pub fn id(&self) -> ElementId {
        self.id
    }

    #[must_use]
    pub fn binding(&self) -> DropBinding {
        self.binding
    }

    /// Register (or refresh) the target's window-space frame.
    pub fn layout(&self, frame: Rect) {
        self.scope.registry().register_droppable(
            self.id,
            self.scope.to_local(frame),
            self.binding.accepts_any(),
        );
    }

    /// Render-time query.
    #[must_use]
    pub fn info(&self) -> DropInfo {
        DropInfo {
            did_drop: self.state.received_from.get().is_some(),
            is_colliding: self.scope.registry().is_colliding_as_drop(self.id),
        }
    }

    /// The draggable that most recently landed here.
    #[must_use]
    pub fn received_from(&self) -> Option<ElementId> {
        self.state.received_from.get()
    }

    /// Remove the target from the scope's registry and stop observing it.
    pub fn unmount(self) {
        self.scope.registry().remove_droppable(self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dropkit_core::Offset;

    #[test]
    fn wildcard_receives_drop_addressed_to_it() {
        let scope = DragDropContainer::new();
        let hits = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&hits);
        let zone = scope
            .droppable(ElementId::from_raw(10), true)
            .on_received(move |from| sink.borrow_mut().push(from));
        zone.layout(Rect::new(0.0, 0.0, 50.0, 50.0));
        let other = scope.droppable(ElementId::from_raw(11), true);
        other.layout(Rect::new(200.0, 0.0, 50.0, 50.0));

        let a = ElementId::from_raw(1);
        scope
            .registry()
            .register_draggable(a, Rect::new(0.0, 100.0, 20.0, 20.0));
        scope.registry().report_drag_offset(a, Offset::new(10.0, -90.0));
        assert!(zone.info().is_colliding);
        assert!(!other.info().is_colliding);

        scope.registry().commit_drop(a, Offset::new(10.0, -90.0));
        assert_eq!(*hits.borrow(), vec![a]);
        assert!(zone.info().did_drop);
        assert_eq!(zone.received_from(), Some(a));
        assert!(!other.info().did_drop);
    }

    #[test]
    fn exclusive_receives_its_bound_draggable() {
        let scope = DragDropContainer::new();
        let a = ElementId::from_raw(1);
        let slot = scope.droppable(a, false);
        slot.layout(Rect::new(150.0, 0.0, 100.0, 100.0));
        assert_eq!(slot.binding(), DropBinding::Exclusive);

        scope
            .registry()
            .register_draggable(a, Rect::new(0.0, 0.0, 100.0, 100.0));
        scope.registry().commit_drop(a, Offset::new(100.0, 0.0));
        assert_eq!(slot.received_from(), Some(a));
    }

    #[test]
    fn dropping_wrapper_unsubscribes() {
        let scope = DragDropContainer::new();
        let zone = scope.droppable(ElementId::from_raw(10), true);
        zone.layout(Rect::from_size(10.0, 10.0));
        assert_eq!(scope.registry().droppable_count(), 1);
        assert_eq!(scope.registry().subscriber_count(), 1);
        zone.unmount();
        assert_eq!(scope.registry().droppable_count(), 0);

        // The dead subscriber is pruned on the next emit.
        scope
            .registry()
            .register_draggable(ElementId::from_raw(1), Rect::from_size(1.0, 1.0));
        assert_eq!(scope.registry().subscriber_count(), 0);
    }

    #[test]
    fn received_action_may_start_another_drop() {
        let scope = DragDropContainer::new();
        let a = ElementId::from_raw(1);
        let b = ElementId::from_raw(2);
        let registry = scope.registry().clone();
        registry.register_draggable(a, Rect::from_size(10.0, 10.0));
        registry.register_draggable(b, Rect::from_size(10.0, 10.0));

        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&calls);
        let zone = scope
            .droppable(ElementId::from_raw(10), true)
            .on_received(move |from| {
                sink.borrow_mut().push(from);
                if from == a {
                    registry.commit_drop(b, Offset::ZERO);
                    // The nested drop is queued until this call returns.
                    assert_eq!(sink.borrow().len(), 1);
                }
            });
        zone.layout(Rect::from_size(10.0, 10.0));

        scope.registry().commit_drop(a, Offset::ZERO);
        assert_eq!(*calls.borrow(), vec![a, b]);
        assert_eq!(zone.received_from(), Some(b));
    }
}
