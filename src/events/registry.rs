//! # Listener registry: broadcast dispatch to registered callbacks.
//!
//! [`EventRegistry`] owns the set of registered listener callbacks and
//! broadcasts every dispatched event to all of them. It is an explicitly
//! constructed object — create one at startup and pass it by `&mut`
//! wherever dispatch happens — not a process-wide singleton.
//!
//! ## Architecture
//! ```text
//! Producers:                          Registry:
//!   window backend ──┐
//!   game code      ──┼── dispatch ──► broadcast ──► slot 0: callback
//!   timers         ──┘                         ├──► slot 1: empty (skipped)
//!                                              └──► slot 2: LayerStack hook
//! ```
//!
//! ## Rules
//! - **Per-listener reset**: the consumed flag is cleared immediately
//!   before every callback, so each listener observes an unconsumed event
//!   no matter what earlier listeners in the same broadcast did.
//! - **No cross-listener ordering guarantee**: listeners run in slot
//!   order, which is an implementation detail.
//! - **Misuse is non-fatal**: stale tokens warn and no-op (see
//!   [`Misuse`](crate::Misuse)).
//! - **Synchronous**: broadcast is an ordinary nested call tree. No
//!   queueing, no suspension, no internal locking; multi-thread use
//!   requires external serialization by construction (`&mut` receivers).
//!
//! ## Subscription lifecycle
//! [`subscribe`](EventRegistry::subscribe) returns a [`ListenerToken`] —
//! an opaque slot + generation pair. The token is the subscription: it is
//! not copyable, moving it transfers the subscription, and
//! [`unsubscribe`](EventRegistry::unsubscribe) consumes it. Dropping a
//! token without unsubscribing leaves the callback registered for the
//! registry's remaining lifetime.

use std::fmt;

use crate::diag::Misuse;
use crate::events::envelope::Event;

/// Boxed listener callback invoked on every broadcast.
pub type ListenerFn = Box<dyn FnMut(&mut Event<'_>)>;

/// Opaque subscription handle issued by [`EventRegistry`].
///
/// Identity is a slot index plus a generation counter, so a token that
/// outlives its subscription is detected once the slot is reused instead
/// of silently addressing the new occupant. Deliberately neither `Copy`
/// nor `Clone`: a subscription has exactly one owner, and handing the
/// subscription to someone else means moving the token.
#[derive(PartialEq, Eq, Hash)]
pub struct ListenerToken {
    slot: u32,
    generation: u32,
}

impl ListenerToken {
    /// Raw slot index (diagnostics only).
    #[inline]
    #[must_use]
    pub const fn slot(&self) -> u32 {
        self.slot
    }

    /// Generation counter (diagnostics only).
    #[inline]
    #[must_use]
    pub const fn generation(&self) -> u32 {
        self.generation
    }

    fn stale(&self, op: &'static str) -> Misuse {
        Misuse::StaleToken {
            slot: self.slot,
            generation: self.generation,
            op,
        }
    }
}

impl fmt::Debug for ListenerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ListenerToken({}@gen{})", self.slot, self.generation)
    }
}

enum SlotState {
    /// Free for reuse.
    Vacant,
    /// Registered without a callback; broadcast skips it silently.
    Empty,
    /// Registered with a callback.
    Active(ListenerFn),
}

struct Slot {
    generation: u32,
    state: SlotState,
}

/// Broadcast registry of listener callbacks.
///
/// ### Properties
/// - **Explicit lifetime**: constructed once, passed by `&mut`.
/// - **Duplicate-free**: every subscription occupies a fresh slot and
///   generation, so the same subscription can never be registered twice.
/// - **Slot reuse**: unsubscribing vacates the slot and bumps its
///   generation; tokens from the previous tenancy are rejected.
pub struct EventRegistry {
    slots: Vec<Slot>,
    free: Vec<u32>,
    live: usize,
}

impl EventRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty registry with room for `capacity` listeners before
    /// reallocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            live: 0,
        }
    }

    /// Registers `callback` and returns the token owning the subscription.
    pub fn subscribe(&mut self, callback: impl FnMut(&mut Event<'_>) + 'static) -> ListenerToken {
        self.occupy(SlotState::Active(Box::new(callback)))
    }

    /// Registers a listener with no callback. Broadcast skips it without
    /// diagnostics until [`set_callback`](Self::set_callback) activates it.
    pub fn subscribe_empty(&mut self) -> ListenerToken {
        self.occupy(SlotState::Empty)
    }

    /// Replaces the subscription's callback without touching its
    /// registration. Stale token: warns and no-ops.
    pub fn set_callback(
        &mut self,
        token: &ListenerToken,
        callback: impl FnMut(&mut Event<'_>) + 'static,
    ) {
        match self.occupied_mut(token) {
            Some(state) => *state = SlotState::Active(Box::new(callback)),
            None => token.stale("set_callback").warn(),
        }
    }

    /// Removes the subscription's callback, leaving it registered but
    /// empty. Stale token: warns and no-ops.
    pub fn clear_callback(&mut self, token: &ListenerToken) {
        match self.occupied_mut(token) {
            Some(state) => *state = SlotState::Empty,
            None => token.stale("clear_callback").warn(),
        }
    }

    /// Ends the subscription, consuming its token. The slot is vacated for
    /// reuse under a new generation. Stale token: warns and no-ops.
    pub fn unsubscribe(&mut self, token: ListenerToken) {
        if self.occupied_mut(&token).is_none() {
            token.stale("unsubscribe").warn();
            return;
        }
        let slot = &mut self.slots[token.slot as usize];
        slot.state = SlotState::Vacant;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(token.slot);
        self.live -= 1;
    }

    /// Broadcasts `event` to every registered listener.
    ///
    /// Listeners run in slot order (implementation-defined; do not rely on
    /// it). The consumed flag is reset to false immediately before each
    /// callback, so consumption by one listener is invisible to the next;
    /// it only short-circuits ordered passes *inside* a listener, such as
    /// a layer stack walk. Empty listeners are skipped without error.
    pub fn broadcast(&mut self, event: &mut Event<'_>) {
        for slot in &mut self.slots {
            if let SlotState::Active(callback) = &mut slot.state {
                event.reset_consumed();
                callback(event);
            }
        }
    }

    /// True while `token` names a live subscription in this registry.
    #[must_use]
    pub fn contains(&self, token: &ListenerToken) -> bool {
        self.slots
            .get(token.slot as usize)
            .is_some_and(|slot| {
                slot.generation == token.generation && !matches!(slot.state, SlotState::Vacant)
            })
    }

    /// Number of live subscriptions (empty ones included).
    #[must_use]
    pub fn len(&self) -> usize {
        self.live
    }

    /// True if no subscriptions are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    fn occupy(&mut self, state: SlotState) -> ListenerToken {
        self.live += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.state = state;
            return ListenerToken {
                slot: index,
                generation: slot.generation,
            };
        }
        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            state,
        });
        ListenerToken {
            slot: index,
            generation: 0,
        }
    }

    /// Mutable access to the slot state behind a live token, or `None` for
    /// stale/foreign tokens.
    fn occupied_mut(&mut self, token: &ListenerToken) -> Option<&mut SlotState> {
        let slot = self.slots.get_mut(token.slot as usize)?;
        if slot.generation != token.generation || matches!(slot.state, SlotState::Vacant) {
            return None;
        }
        Some(&mut slot.state)
    }
}

impl Default for EventRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EventRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventRegistry")
            .field("listeners", &self.live)
            .field("slots", &self.slots.len())
            .finish()
    }
}
