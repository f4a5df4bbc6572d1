#![forbid(unsafe_code)]

//! The drag/drop registry: registration, live tracking, and resolution.
//!
//! # Design
//!
//! [`DragDropRegistry`] is a cheap-to-clone handle over shared,
//! single-threaded state (`Rc<RefCell<..>>`). One container scope owns one
//! registry and passes clones of the handle to its draggables and
//! droppables; sibling or nested scopes use independent registries.
//!
//! Three stores hold geometry, all in the container's coordinate space:
//!
//! - draggables, keyed by draggable id;
//! - exclusive droppables, keyed by the id of the **draggable** they accept;
//! - wildcard droppables, keyed by their **own** id and kept in registration
//!   order.
//!
//! # Invariants
//!
//! 1. A draggable id maps to at most one rectangle; re-registration
//!    overwrites it.
//! 2. With `purge_on_rebind` (the default) a droppable id lives in at most
//!    one binding store: the last registration wins.
//! 3. At most one drag session exists; reporting for a different id
//!    replaces it.
//! 4. Wildcard resolution scans in first-registration order, so "first
//!    match" is deterministic. Re-registering keeps the original position.
//! 5. Every state-changing call emits exactly one [`RegistryEvent`] to live
//!    subscribers before it returns. Calls that change nothing emit nothing.
//!
//! # Failure Modes
//!
//! None are fatal. Unknown ids resolve to `false` / `None` / no-op, and an
//! offset reported for an unregistered draggable is accepted silently; later
//! geometry queries just fail to find its rectangle.

use std::cell::RefCell;
use std::rc::Rc;

use ahash::AHashMap;
use dropkit_core::{ElementId, Notifier, Offset, Rect, Subscription};
use tracing::{debug, trace, warn};

use crate::config::RegistryConfig;
use crate::event::{DropBinding, DropTarget, RegistryEvent};
use crate::session::{DragPhase, DragSession};

struct RegistryState {
    config: RegistryConfig,
    draggables: AHashMap<ElementId, Rect>,
    exclusive: AHashMap<ElementId, Rect>,
    /// Registration order is the wildcard scan order.
    wildcard: Vec<(ElementId, Rect)>,
    session: Option<DragSession>,
    outcome: Option<ElementId>,
}

impl RegistryState {
    fn new(config: RegistryConfig) -> Self {
        Self {
            config,
            draggables: AHashMap::new(),
            exclusive: AHashMap::new(),
            wildcard: Vec::new(),
            session: None,
            outcome: None,
        }
    }

    fn wildcard_rect(&self, id: ElementId) -> Option<Rect> {
        self.wildcard
            .iter()
            .find_map(|&(wid, rect)| (wid == id).then_some(rect))
    }

    fn remove_wildcard(&mut self, id: ElementId) -> bool {
        let before = self.wildcard.len();
        self.wildcard.retain(|&(wid, _)| wid != id);
        self.wildcard.len() != before
    }

    fn collides(&self, moved: &Rect, target: &Rect) -> bool {
        let target = if self.config.hit_slop > 0.0 {
            target.expand(self.config.hit_slop)
        } else {
            *target
        };
        self.config.overlap.collides(moved, &target)
    }

    fn landing_target(&self, id: ElementId, offset: Offset) -> Option<DropTarget> {
        let moved = self.draggables.get(&id)?.offset_by(offset);

        if let Some(target) = self.exclusive.get(&id) {
            return self
                .collides(&moved, target)
                .then_some(DropTarget::Exclusive(id));
        }

        self.wildcard
            .iter()
            .find(|(_, rect)| self.collides(&moved, rect))
            .map(|&(wid, _)| DropTarget::Wildcard(wid))
    }

    fn dragging_session(&self) -> Option<DragSession> {
        self.session.filter(DragSession::is_dragging)
    }
}

/// Shared drag/drop engine for one container scope.
///
/// Cloning yields another handle to the **same** registry.
#[derive(Clone)]
pub struct DragDropRegistry {
    state: Rc<RefCell<RegistryState>>,
    notifier: Notifier<RegistryEvent>,
}

impl std::fmt::Debug for DragDropRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("DragDropRegistry")
            .field("draggables", &state.draggables.len())
            .field("exclusive", &state.exclusive.len())
            .field("wildcard", &state.wildcard.len())
            .field("session", &state.session)
            .field("outcome", &state.outcome)
            .field("version", &self.notifier.version())
            .finish()
    }
}

impl Default for DragDropRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl DragDropRegistry {
    /// Create an empty registry with the default policy.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Create an empty registry with an explicit policy.
    ///
    /// The policy is not rejected when [`RegistryConfig::validate`] reports
    /// problems: a negative or non-finite `hit_slop` is treated as zero and a
    /// warning is logged.
    #[must_use]
    pub fn with_config(config: RegistryConfig) -> Self {
        let errors = config.validate();
        if !errors.is_empty() {
            warn!(?errors, "invalid registry config; hit_slop falls back to 0");
        }
        Self {
            state: Rc::new(RefCell::new(RegistryState::new(config))),
            notifier: Notifier::new(),
        }
    }

    #[must_use]
    pub fn config(&self) -> RegistryConfig {
        self.state.borrow().config.clone()
    }

    /// True if both handles point at the same registry.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }

    // ── Registration ────────────────────────────────────────────────────

    /// Insert or replace the rectangle of draggable `id`.
    pub fn register_draggable(&self, id: ElementId, rect: Rect) {
        self.state.borrow_mut().draggables.insert(id, rect);
        debug!(id = %id, ?rect, "draggable registered");
        self.emit(RegistryEvent::DraggableRegistered { id, rect });
    }

    /// Insert or replace a droppable.
    ///
    /// With `accepts_any == false` the droppable is exclusive and `id` must be
    /// the id of the one draggable it accepts. Otherwise it is a wildcard
    /// keyed by its own id.
    pub fn register_droppable(&self, id: ElementId, rect: Rect, accepts_any: bool) {
        let binding = DropBinding::from_accepts_any(accepts_any);
        let rebound = {
            let mut state = self.state.borrow_mut();
            let purge = state.config.purge_on_rebind;
            match binding {
                DropBinding::Exclusive => {
                    state.exclusive.insert(id, rect);
                    purge && state.remove_wildcard(id)
                }
                DropBinding::Wildcard => {
                    let existing = state.wildcard.iter().position(|&(wid, _)| wid == id);
                    match existing {
                        Some(i) => state.wildcard[i].1 = rect,
                        None => state.wildcard.push((id, rect)),
                    }
                    purge && state.exclusive.remove(&id).is_some()
                }
            }
        };
        debug!(id = %id, ?rect, ?binding, rebound, "droppable registered");
        self.emit(RegistryEvent::DroppableRegistered {
            id,
            rect,
            binding,
            rebound,
        });
    }

    /// Forget draggable `id`. Ends the session if it belongs to `id`.
    ///
    /// Returns `false` (and emits nothing) if `id` was not registered.
    pub fn remove_draggable(&self, id: ElementId) -> bool {
        let removed = {
            let mut state = self.state.borrow_mut();
            let removed = state.draggables.remove(&id).is_some();
            if removed && state.session.is_some_and(|s| s.id == id) {
                state.session = None;
            }
            removed
        };
        if removed {
            debug!(id = %id, "draggable removed");
            self.emit(RegistryEvent::DraggableRemoved { id });
        }
        removed
    }

    /// Forget droppable `id` from whichever binding store holds it.
    ///
    /// Returns `false` (and emits nothing) if `id` was not registered.
    pub fn remove_droppable(&self, id: ElementId) -> bool {
        let removed = {
            let mut state = self.state.borrow_mut();
            let exclusive = state.exclusive.remove(&id).is_some();
            let wildcard = state.remove_wildcard(id);
            exclusive || wildcard
        };
        if removed {
            debug!(id = %id, "droppable removed");
            self.emit(RegistryEvent::DroppableRemoved { id });
        }
        removed
    }

    /// Reset every registration, the session, and the drop outcome.
    pub fn clear(&self) {
        {
            let mut state = self.state.borrow_mut();
            state.draggables.clear();
            state.exclusive.clear();
            state.wildcard.clear();
            state.session = None;
            state.outcome = None;
        }
        debug!("registry cleared");
        self.emit(RegistryEvent::Cleared);
    }

    // ── Live tracking ───────────────────────────────────────────────────

    /// Record the running offset of draggable `id`, starting or replacing
    /// the drag session.
    pub fn report_drag_offset(&self, id: ElementId, offset: Offset) {
        self.state.borrow_mut().session = Some(DragSession::dragging(id, offset));
        trace!(id = %id, dx = offset.dx, dy = offset.dy, "drag offset reported");
        self.emit(RegistryEvent::DragMoved { id, offset });
    }

    /// End a dragging session without a drop (gesture end or cancel).
    ///
    /// A session already in `Dropped` is kept as the record of the drop.
    /// Returns `false` if there was no dragging session.
    pub fn end_drag(&self) -> bool {
        self.end_drag_matching(|_| true)
    }

    /// Like [`end_drag`](Self::end_drag), but only if the dragging session
    /// belongs to `id`. A late end from a draggable whose session was
    /// already replaced leaves the newer session alone.
    pub fn end_drag_for(&self, id: ElementId) -> bool {
        self.end_drag_matching(|session| session.id == id)
    }

    fn end_drag_matching(&self, owns: impl Fn(&DragSession) -> bool) -> bool {
        let ended = {
            let mut state = self.state.borrow_mut();
            match state.dragging_session().filter(|s| owns(s)) {
                Some(session) => {
                    state.session = None;
                    Some(session.id)
                }
                None => None,
            }
        };
        match ended {
            Some(id) => {
                trace!(id = %id, "drag ended");
                self.emit(RegistryEvent::DragEnded { id });
                true
            }
            None => false,
        }
    }

    // ── Resolution ──────────────────────────────────────────────────────

    /// Where draggable `id` lands if released at `offset`.
    ///
    /// An exclusive binding for `id` is authoritative: if it exists, wildcard
    /// droppables are never considered. Otherwise the first wildcard (in
    /// registration order) that collides wins.
    #[must_use]
    pub fn landing_target(&self, id: ElementId, offset: Offset) -> Option<DropTarget> {
        self.state.borrow().landing_target(id, offset)
    }

    /// True if draggable `id`, translated by `offset`, collides with its
    /// exclusive target or with any wildcard droppable.
    #[must_use]
    pub fn can_drop(&self, id: ElementId, offset: Offset) -> bool {
        self.landing_target(id, offset).is_some()
    }

    /// Highlight query for a draggable: true only while `id` is the dragging
    /// session and can drop at the session offset.
    #[must_use]
    pub fn is_colliding_as_drag(&self, id: ElementId) -> bool {
        let state = self.state.borrow();
        state
            .dragging_session()
            .is_some_and(|s| s.id == id && state.landing_target(id, s.offset).is_some())
    }

    /// Highlight query for a droppable.
    ///
    /// The candidate rectangle is the exclusive target registered for the
    /// **session draggable's** id if there is one, otherwise the wildcard
    /// registered under **this droppable's** id.
    #[must_use]
    pub fn is_colliding_as_drop(&self, droppable: ElementId) -> bool {
        let state = self.state.borrow();
        let Some(session) = state.dragging_session() else {
            return false;
        };
        let Some(drag_rect) = state.draggables.get(&session.id) else {
            return false;
        };
        let candidate = state
            .exclusive
            .get(&session.id)
            .copied()
            .or_else(|| state.wildcard_rect(droppable));
        let moved = drag_rect.offset_by(session.offset);
        candidate.is_some_and(|target| state.collides(&moved, &target))
    }

    /// Finalize a drop of draggable `id` released at `offset`.
    ///
    /// On a hit the drop outcome becomes the draggable's id (exclusive) or
    /// the droppable's id (wildcard), the session moves to `Dropped`, and the
    /// landing target is returned. On a miss nothing changes.
    pub fn commit_drop(&self, id: ElementId, offset: Offset) -> Option<DropTarget> {
        let target = {
            let mut state = self.state.borrow_mut();
            let target = state.landing_target(id, offset)?;
            state.outcome = Some(target.outcome_id());
            state.session = Some(DragSession::dropped(id, offset));
            target
        };
        debug!(
            draggable = %id,
            outcome = %target.outcome_id(),
            binding = ?target.binding(),
            "drop committed"
        );
        self.emit(RegistryEvent::Dropped {
            draggable: id,
            target,
        });
        Some(target)
    }

    // ── Reporting ───────────────────────────────────────────────────────

    /// Id recorded by the most recent successful drop.
    #[must_use]
    pub fn drop_outcome(&self) -> Option<ElementId> {
        self.state.borrow().outcome
    }

    #[must_use]
    pub fn session(&self) -> Option<DragSession> {
        self.state.borrow().session
    }

    #[must_use]
    pub fn phase(&self) -> DragPhase {
        self.state
            .borrow()
            .session
            .map_or(DragPhase::Idle, |s| s.phase)
    }

    #[must_use]
    pub fn draggable_rect(&self, id: ElementId) -> Option<Rect> {
        self.state.borrow().draggables.get(&id).copied()
    }

    /// Rectangle and binding of droppable `id`. Exclusive entries take
    /// precedence if the id is present in both stores.
    #[must_use]
    pub fn droppable(&self, id: ElementId) -> Option<(Rect, DropBinding)> {
        let state = self.state.borrow();
        state
            .exclusive
            .get(&id)
            .map(|&rect| (rect, DropBinding::Exclusive))
            .or_else(|| state.wildcard_rect(id).map(|rect| (rect, DropBinding::Wildcard)))
    }

    #[must_use]
    pub fn droppable_binding(&self, id: ElementId) -> Option<DropBinding> {
        self.droppable(id).map(|(_, binding)| binding)
    }

    /// Wildcard droppable ids in scan order.
    #[must_use]
    pub fn wildcard_ids(&self) -> Vec<ElementId> {
        self.state.borrow().wildcard.iter().map(|&(id, _)| id).collect()
    }

    #[must_use]
    pub fn draggable_count(&self) -> usize {
        self.state.borrow().draggables.len()
    }

    /// Number of droppable entries across both binding stores.
    #[must_use]
    pub fn droppable_count(&self) -> usize {
        let state = self.state.borrow();
        state.exclusive.len() + state.wildcard.len()
    }

    // ── Observation ─────────────────────────────────────────────────────

    /// Observe every mutation. The callback runs synchronously inside the
    /// mutating call, after the registry state has been updated, so it may
    /// query (or mutate) the registry.
    pub fn subscribe(&self, callback: impl Fn(&RegistryEvent) + 'static) -> Subscription {
        self.notifier.subscribe(callback)
    }

    /// Number of events emitted so far.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.notifier.version()
    }

    /// Registered subscribers, including dropped ones not yet pruned.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.notifier.subscriber_count()
    }

    fn emit(&self, event: RegistryEvent) {
        self.notifier.emit(&event);
    }
}
