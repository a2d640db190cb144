//! # LayerStack: ordered, consumption-aware propagation.
//!
//! [`LayerStack`] keeps an ordered sequence of layer handles partitioned
//! into **layers** and **overlays** and turns registry broadcasts into
//! ordered propagation: events walk the sequence top-to-bottom and stop at
//! the first consumer, while update/render walk bottom-to-top and always
//! visit everything enabled.
//!
//! ## Ordering
//! ```text
//! index:      0 ─────────► boundary ─────────► len
//! partition:  [ layers            ][ overlays      ]
//!
//! on_event:                 ◄──── visits right-to-left, stops on consume
//! on_update / on_render:    ────► visits left-to-right, unconditional
//! ```
//!
//! Overlays therefore always see input before ordinary layers, and within
//! each partition the most recently pushed entry sees it first.
//!
//! ## Registry wiring
//! Construction subscribes exactly one listener whose callback forwards
//! broadcasts into the stack's event walk, so any
//! [`Event::dispatch`](crate::Event::dispatch) reaching the registry flows
//! into the pipeline automatically. [`release`](LayerStack::release) ends
//! that subscription; dropping the stack without releasing leaves an inert
//! subscription behind (the callback detects the dead stack and does
//! nothing).
//!
//! ## Rules
//! - Handles are compared by identity (`Rc::ptr_eq`); pushing a handle
//!   already present anywhere in the stack warns and no-ops.
//! - `pop_layer` searches only the layer partition, `pop_overlay` only the
//!   overlay partition; a miss warns and no-ops.
//! - The stack holds shared handles, never exclusive ownership: dropping
//!   the stack detaches the remaining entries in stored order but does not
//!   destroy the layer objects.
//! - Passes hold the sequence borrow for their duration. Structural
//!   mutation (push/pop) or a re-entrant dispatch into a layer that is
//!   currently executing its hook is a caller bug and panics instead of
//!   corrupting the walk; serialize such mutation outside the pass.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::diag::Misuse;
use crate::events::envelope::Event;
use crate::events::registry::{EventRegistry, ListenerToken};
use crate::layers::layer::LayerRef;

/// Sequence state shared between the stack and its registry callback.
#[derive(Default)]
struct Entries {
    entries: Vec<LayerRef>,
    /// Partition point: layers occupy `[0, boundary)`, overlays the rest.
    boundary: usize,
}

impl Entries {
    fn position_of(&self, layer: &LayerRef) -> Option<usize> {
        self.entries.iter().position(|e| Rc::ptr_eq(e, layer))
    }
}

/// Ordered collection of layers and overlays, registered as one listener.
pub struct LayerStack {
    shared: Rc<RefCell<Entries>>,
    /// `Some` until [`release`](Self::release) hands the token back.
    token: Option<ListenerToken>,
}

impl LayerStack {
    /// Creates an empty stack and subscribes its propagation callback.
    #[must_use]
    pub fn new(registry: &mut EventRegistry) -> Self {
        Self::with_capacity(registry, 0)
    }

    /// Creates an empty stack with room for `capacity` entries before
    /// reallocation.
    #[must_use]
    pub fn with_capacity(registry: &mut EventRegistry, capacity: usize) -> Self {
        let shared = Rc::new(RefCell::new(Entries {
            entries: Vec::with_capacity(capacity),
            boundary: 0,
        }));
        let hook = Rc::downgrade(&shared);
        let token = registry.subscribe(move |event| {
            // A stack dropped without release() leaves this callback
            // behind; the dead weak makes it a no-op.
            if let Some(shared) = hook.upgrade() {
                propagate(&shared, event);
            }
        });
        Self {
            shared,
            token: Some(token),
        }
    }

    /// Inserts `layer` at the top of the layer partition and attaches it.
    ///
    /// Rejects a handle already present anywhere in the stack (warn,
    /// no-op).
    pub fn push_layer(&mut self, layer: &LayerRef) {
        {
            let mut shared = self.shared.borrow_mut();
            if shared.position_of(layer).is_some() {
                drop(shared);
                Misuse::DuplicateLayer {
                    name: name_of(layer),
                }
                .warn();
                return;
            }
            let at = shared.boundary;
            shared.entries.insert(at, Rc::clone(layer));
            shared.boundary += 1;
        }
        layer.borrow_mut().on_attach();
        tracing::trace!(target: "layercast", layer = %name_of(layer), "pushed layer");
    }

    /// Detaches and removes `layer` from the layer partition.
    ///
    /// Searches `[0, boundary)` only; a miss warns and no-ops.
    pub fn pop_layer(&mut self, layer: &LayerRef) {
        let found = {
            let shared = self.shared.borrow();
            let boundary = shared.boundary;
            shared.entries[..boundary]
                .iter()
                .position(|e| Rc::ptr_eq(e, layer))
        };
        let Some(index) = found else {
            Misuse::AbsentLayer {
                name: name_of(layer),
                partition: "layers",
            }
            .warn();
            return;
        };

        layer.borrow_mut().on_detach();
        let mut shared = self.shared.borrow_mut();
        shared.entries.remove(index);
        shared.boundary -= 1;
        drop(shared);
        tracing::trace!(target: "layercast", layer = %name_of(layer), "popped layer");
    }

    /// Appends `overlay` after the overlay partition and attaches it.
    ///
    /// Rejects a handle already present anywhere in the stack (warn,
    /// no-op).
    pub fn push_overlay(&mut self, overlay: &LayerRef) {
        {
            let mut shared = self.shared.borrow_mut();
            if shared.position_of(overlay).is_some() {
                drop(shared);
                Misuse::DuplicateLayer {
                    name: name_of(overlay),
                }
                .warn();
                return;
            }
            shared.entries.push(Rc::clone(overlay));
        }
        overlay.borrow_mut().on_attach();
        tracing::trace!(target: "layercast", layer = %name_of(overlay), "pushed overlay");
    }

    /// Detaches and removes `overlay` from the overlay partition.
    ///
    /// Searches `[boundary, len)` only; a miss warns and no-ops.
    pub fn pop_overlay(&mut self, overlay: &LayerRef) {
        let found = {
            let shared = self.shared.borrow();
            let boundary = shared.boundary;
            shared.entries[boundary..]
                .iter()
                .position(|e| Rc::ptr_eq(e, overlay))
                .map(|i| boundary + i)
        };
        let Some(index) = found else {
            Misuse::AbsentLayer {
                name: name_of(overlay),
                partition: "overlays",
            }
            .warn();
            return;
        };

        overlay.borrow_mut().on_detach();
        self.shared.borrow_mut().entries.remove(index);
        tracing::trace!(target: "layercast", layer = %name_of(overlay), "popped overlay");
    }

    /// Propagates `event` top-to-bottom: overlays before layers, most
    /// recently pushed first within each partition, stopping as soon as a
    /// handler consumes it. Disabled entries are skipped.
    ///
    /// Also reached automatically through the stack's registry
    /// subscription.
    pub fn on_event(&self, event: &mut Event<'_>) {
        propagate(&self.shared, event);
    }

    /// Updates every enabled entry bottom-to-top. Never short-circuited.
    pub fn on_update(&self, delta: Duration) {
        for layer in &self.shared.borrow().entries {
            let mut layer = layer.borrow_mut();
            if layer.is_enabled() {
                layer.on_update(delta);
            }
        }
    }

    /// Renders every enabled entry bottom-to-top. Never short-circuited.
    pub fn on_render(&self) {
        for layer in &self.shared.borrow().entries {
            let mut layer = layer.borrow_mut();
            if layer.is_enabled() {
                layer.on_render();
            }
        }
    }

    /// Debug-render pass, bottom-to-top over enabled entries.
    pub fn on_debug_render(&self) {
        for layer in &self.shared.borrow().entries {
            let mut layer = layer.borrow_mut();
            if layer.is_enabled() {
                layer.on_debug_render();
            }
        }
    }

    /// Number of entries (layers plus overlays).
    #[must_use]
    pub fn len(&self) -> usize {
        self.shared.borrow().entries.len()
    }

    /// True if the stack holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shared.borrow().entries.is_empty()
    }

    /// Partition point: layers occupy `[0, boundary)`, overlays
    /// `[boundary, len)`.
    #[must_use]
    pub fn boundary(&self) -> usize {
        self.shared.borrow().boundary
    }

    /// True if `layer` is present in either partition.
    #[must_use]
    pub fn contains(&self, layer: &LayerRef) -> bool {
        self.shared.borrow().position_of(layer).is_some()
    }

    /// Explicit teardown: removes the stack's subscription from
    /// `registry`, then detaches the remaining entries (via drop).
    pub fn release(mut self, registry: &mut EventRegistry) {
        if let Some(token) = self.token.take() {
            registry.unsubscribe(token);
        }
    }
}

impl Drop for LayerStack {
    fn drop(&mut self) {
        // Detach in stored (forward) order. Taking the vec releases the
        // borrow before any hook runs.
        let entries = {
            let mut shared = self.shared.borrow_mut();
            shared.boundary = 0;
            std::mem::take(&mut shared.entries)
        };
        for layer in &entries {
            layer.borrow_mut().on_detach();
        }
    }
}

impl std::fmt::Debug for LayerStack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let shared = self.shared.borrow();
        f.debug_struct("LayerStack")
            .field("entries", &shared.entries.len())
            .field("boundary", &shared.boundary)
            .finish()
    }
}

fn propagate(shared: &RefCell<Entries>, event: &mut Event<'_>) {
    let shared = shared.borrow();
    for layer in shared.entries.iter().rev() {
        if event.is_consumed() {
            break;
        }
        let mut layer = layer.borrow_mut();
        if layer.is_enabled() {
            layer.on_event(event);
        }
    }
}

fn name_of(layer: &LayerRef) -> String {
    layer.borrow().name().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::events::category::CategoryMask;
    use crate::events::kind::KindId;
    use crate::layers::layer::{layer_ref, Layer};

    /// Shared journal recording hook invocations as `(layer, hook)` pairs.
    type Journal = Rc<RefCell<Vec<(String, &'static str)>>>;

    struct Recorder {
        name: String,
        journal: Journal,
        enabled: bool,
        consume: bool,
    }

    impl Recorder {
        fn push(journal: &Journal, name: &str) -> LayerRef {
            layer_ref(Self {
                name: name.to_string(),
                journal: Rc::clone(journal),
                enabled: true,
                consume: false,
            })
        }

        fn consuming(journal: &Journal, name: &str) -> LayerRef {
            layer_ref(Self {
                name: name.to_string(),
                journal: Rc::clone(journal),
                enabled: true,
                consume: true,
            })
        }

        fn disabled(journal: &Journal, name: &str) -> LayerRef {
            layer_ref(Self {
                name: name.to_string(),
                journal: Rc::clone(journal),
                enabled: false,
                consume: false,
            })
        }

        fn record(&self, hook: &'static str) {
            self.journal.borrow_mut().push((self.name.clone(), hook));
        }
    }

    impl Layer for Recorder {
        fn name(&self) -> &str {
            &self.name
        }

        fn is_enabled(&self) -> bool {
            self.enabled
        }

        fn on_attach(&mut self) {
            self.record("attach");
        }

        fn on_detach(&mut self) {
            self.record("detach");
        }

        fn on_event(&mut self, event: &mut Event<'_>) {
            self.record("event");
            if self.consume {
                event.consume();
            }
        }

        fn on_update(&mut self, _delta: Duration) {
            self.record("update");
        }

        fn on_render(&mut self) {
            self.record("render");
        }
    }

    fn probe() -> Event<'static> {
        Event::new(KindId::KEY_PRESSED, CategoryMask::INPUT)
    }

    fn taken(journal: &Journal) -> Vec<(String, &'static str)> {
        std::mem::take(&mut *journal.borrow_mut())
    }

    fn entry(name: &str, hook: &'static str) -> (String, &'static str) {
        (name.to_string(), hook)
    }

    #[test]
    fn test_event_visits_overlays_then_layers_in_reverse() {
        let mut registry = EventRegistry::new();
        let mut stack = LayerStack::new(&mut registry);
        let journal: Journal = Journal::default();

        let l1 = Recorder::push(&journal, "l1");
        let l2 = Recorder::push(&journal, "l2");
        let overlay = Recorder::push(&journal, "o");
        stack.push_layer(&l1);
        stack.push_layer(&l2);
        stack.push_overlay(&overlay);
        taken(&journal);

        stack.on_event(&mut probe());
        assert_eq!(
            taken(&journal),
            vec![
                entry("o", "event"),
                entry("l2", "event"),
                entry("l1", "event")
            ]
        );
    }

    #[test]
    fn test_consumption_stops_propagation() {
        let mut registry = EventRegistry::new();
        let mut stack = LayerStack::new(&mut registry);
        let journal: Journal = Journal::default();

        let l1 = Recorder::push(&journal, "l1");
        let l2 = Recorder::push(&journal, "l2");
        let overlay = Recorder::consuming(&journal, "o");
        stack.push_layer(&l1);
        stack.push_layer(&l2);
        stack.push_overlay(&overlay);
        taken(&journal);

        let mut event = probe();
        stack.on_event(&mut event);
        assert!(event.is_consumed());
        assert_eq!(
            taken(&journal),
            vec![entry("o", "event")],
            "layers below the consumer must not see the event"
        );
    }

    #[test]
    fn test_update_and_render_run_forward_and_unconditionally() {
        let mut registry = EventRegistry::new();
        let mut stack = LayerStack::new(&mut registry);
        let journal: Journal = Journal::default();

        let l1 = Recorder::consuming(&journal, "l1");
        let l2 = Recorder::push(&journal, "l2");
        stack.push_layer(&l1);
        stack.push_layer(&l2);
        taken(&journal);

        // A consumed event pass must not affect the frame passes.
        stack.on_event(&mut probe());
        taken(&journal);

        stack.on_update(Duration::from_millis(16));
        stack.on_render();
        assert_eq!(
            taken(&journal),
            vec![
                entry("l1", "update"),
                entry("l2", "update"),
                entry("l1", "render"),
                entry("l2", "render"),
            ]
        );
    }

    #[test]
    fn test_push_pop_layer_tracks_boundary() {
        let mut registry = EventRegistry::new();
        let mut stack = LayerStack::new(&mut registry);
        let journal: Journal = Journal::default();

        let l1 = Recorder::push(&journal, "l1");
        let l2 = Recorder::push(&journal, "l2");
        stack.push_layer(&l1);
        stack.push_layer(&l2);
        assert_eq!(stack.boundary(), 2);
        assert_eq!(
            taken(&journal),
            vec![entry("l1", "attach"), entry("l2", "attach")]
        );

        stack.pop_layer(&l1);
        assert_eq!(stack.len(), 1);
        assert_eq!(stack.boundary(), 1);
        assert!(stack.contains(&l2));
        assert!(!stack.contains(&l1));
        assert_eq!(taken(&journal), vec![entry("l1", "detach")]);
    }

    #[test]
    fn test_overlay_push_pop_leaves_boundary_alone() {
        let mut registry = EventRegistry::new();
        let mut stack = LayerStack::new(&mut registry);
        let journal: Journal = Journal::default();

        let l1 = Recorder::push(&journal, "l1");
        let overlay = Recorder::push(&journal, "o");
        stack.push_layer(&l1);
        stack.push_overlay(&overlay);
        assert_eq!(stack.boundary(), 1);
        assert_eq!(stack.len(), 2);

        stack.pop_overlay(&overlay);
        assert_eq!(stack.boundary(), 1);
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn test_duplicate_push_is_rejected_unchanged() {
        let mut registry = EventRegistry::new();
        let mut stack = LayerStack::new(&mut registry);
        let journal: Journal = Journal::default();

        let l1 = Recorder::push(&journal, "l1");
        stack.push_layer(&l1);
        taken(&journal);

        stack.push_overlay(&l1);
        assert_eq!(stack.len(), 1, "duplicate must not be inserted");
        assert_eq!(stack.boundary(), 1);
        assert_eq!(taken(&journal), vec![], "no second attach");

        stack.push_layer(&l1);
        assert_eq!(stack.len(), 1);
        assert_eq!(taken(&journal), vec![]);
    }

    #[test]
    fn test_pop_searches_only_its_partition() {
        let mut registry = EventRegistry::new();
        let mut stack = LayerStack::new(&mut registry);
        let journal: Journal = Journal::default();

        let l1 = Recorder::push(&journal, "l1");
        let overlay = Recorder::push(&journal, "o");
        stack.push_layer(&l1);
        stack.push_overlay(&overlay);
        taken(&journal);

        // Wrong partition: warn + no-op, nothing detached.
        stack.pop_layer(&overlay);
        stack.pop_overlay(&l1);
        assert_eq!(stack.len(), 2);
        assert_eq!(stack.boundary(), 1);
        assert_eq!(taken(&journal), vec![]);
    }

    #[test]
    fn test_disabled_layer_skipped_but_still_detached() {
        let mut registry = EventRegistry::new();
        let mut stack = LayerStack::new(&mut registry);
        let journal: Journal = Journal::default();

        let off = Recorder::disabled(&journal, "off");
        stack.push_layer(&off);
        assert_eq!(
            taken(&journal),
            vec![entry("off", "attach")],
            "attach fires regardless of enabled"
        );

        stack.on_event(&mut probe());
        stack.on_update(Duration::from_millis(16));
        stack.on_render();
        assert_eq!(taken(&journal), vec![]);

        stack.pop_layer(&off);
        assert_eq!(taken(&journal), vec![entry("off", "detach")]);
    }

    #[test]
    fn test_drop_detaches_in_stored_order() {
        let mut registry = EventRegistry::new();
        let journal: Journal = Journal::default();

        let l1 = Recorder::push(&journal, "l1");
        let l2 = Recorder::push(&journal, "l2");
        let overlay = Recorder::push(&journal, "o");
        {
            let mut stack = LayerStack::new(&mut registry);
            stack.push_layer(&l1);
            stack.push_layer(&l2);
            stack.push_overlay(&overlay);
            taken(&journal);
        }
        assert_eq!(
            taken(&journal),
            vec![
                entry("l1", "detach"),
                entry("l2", "detach"),
                entry("o", "detach"),
            ]
        );
        // The stack held shared handles only; the layers survive it.
        assert_eq!(Rc::strong_count(&l1), 1);
    }

    #[test]
    fn test_broadcast_flows_into_stack() {
        let mut registry = EventRegistry::new();
        let mut stack = LayerStack::new(&mut registry);
        let journal: Journal = Journal::default();

        let l1 = Recorder::push(&journal, "l1");
        stack.push_layer(&l1);
        taken(&journal);

        let mut event = probe();
        event.dispatch(&mut registry);
        assert_eq!(taken(&journal), vec![entry("l1", "event")]);
    }

    #[test]
    fn test_release_ends_the_subscription() {
        let mut registry = EventRegistry::new();
        let journal: Journal = Journal::default();

        let stack = LayerStack::new(&mut registry);
        let l1 = Recorder::push(&journal, "l1");
        {
            let mut stack = stack;
            stack.push_layer(&l1);
            taken(&journal);
            stack.release(&mut registry);
        }
        assert_eq!(
            taken(&journal),
            vec![entry("l1", "detach")],
            "release must still detach remaining entries"
        );
        assert!(registry.is_empty());

        let mut event = probe();
        event.dispatch(&mut registry);
        assert_eq!(taken(&journal), vec![]);
    }

    #[test]
    fn test_dropped_stack_leaves_inert_subscription() {
        let mut registry = EventRegistry::new();
        let journal: Journal = Journal::default();

        let l1 = Recorder::push(&journal, "l1");
        {
            let mut stack = LayerStack::new(&mut registry);
            stack.push_layer(&l1);
            taken(&journal);
        }
        assert_eq!(registry.len(), 1, "subscription outlives the stack");

        // Broadcasting into the dead subscription must be harmless.
        let mut event = probe();
        event.dispatch(&mut registry);
        assert_eq!(taken(&journal), vec![entry("l1", "detach")]);
    }
}
