//! # The event envelope passed through a dispatch.
//!
//! [`Event`] is the ephemeral value handed to every listener during one
//! dispatch: a fixed [`KindId`], a fixed [`CategoryMask`], a mutable
//! consumed flag, and an optional borrowed payload. It is built on the
//! caller's stack, passed by `&mut` through the whole call tree, and gone
//! when the dispatch returns — neither the registry nor the layer stack
//! ever stores one.
//!
//! ## Consumption
//! A handler calls [`Event::consume`] to stop further visitation in the
//! current ordered pass. The flag is one-shot within a pass; the registry
//! resets it before every listener so each broadcast recipient sees an
//! unconsumed event (see
//! [`EventRegistry::broadcast`](crate::EventRegistry::broadcast)).
//!
//! ## Payload access
//! Listeners that need more than kind/category check the id, then downcast:
//!
//! ```rust
//! use layercast::{payloads::KeyPressed, Kind, KindId};
//!
//! let payload = KeyPressed { key_code: 65, repeat: false };
//! let event = payload.envelope();
//!
//! if event.kind() == KindId::KEY_PRESSED {
//!     let key = event.payload::<KeyPressed>().unwrap();
//!     assert_eq!(key.key_code, 65);
//! }
//! ```

use std::any::Any;
use std::fmt;

use crate::events::category::CategoryMask;
use crate::events::kind::{kind_id, Kind, KindId};
use crate::events::registry::EventRegistry;

/// Ephemeral envelope for one dispatched occurrence.
///
/// Kind and categories are fixed at construction; only the consumed flag
/// mutates. The payload borrow keeps the envelope tied to the dispatch
/// call's stack frame.
pub struct Event<'a> {
    kind: KindId,
    categories: CategoryMask,
    consumed: bool,
    payload: Option<&'a dyn Any>,
}

impl<'a> Event<'a> {
    /// Builds a payload-less envelope. The consumed flag starts false.
    #[must_use]
    pub const fn new(kind: KindId, categories: CategoryMask) -> Self {
        Self {
            kind,
            categories,
            consumed: false,
            payload: None,
        }
    }

    /// Builds an envelope for kind type `K` with no payload attached.
    #[must_use]
    pub fn of<K: Kind>() -> Self {
        Self::new(kind_id::<K>(), K::CATEGORIES)
    }

    /// Builds an envelope carrying `payload` for downcast access. Usually
    /// reached through [`Kind::envelope`].
    #[must_use]
    pub fn with_payload(kind: KindId, categories: CategoryMask, payload: &'a dyn Any) -> Self {
        Self {
            kind,
            categories,
            consumed: false,
            payload: Some(payload),
        }
    }

    /// The kind id fixed at construction.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> KindId {
        self.kind
    }

    /// The category mask fixed at construction.
    #[inline]
    #[must_use]
    pub const fn categories(&self) -> CategoryMask {
        self.categories
    }

    /// Bit-AND membership test against the fixed category mask.
    #[inline]
    #[must_use]
    pub const fn is_in_category(&self, mask: CategoryMask) -> bool {
        self.categories.contains(mask)
    }

    /// Marks the event consumed. Idempotent; only the registry's
    /// per-listener reset clears it.
    #[inline]
    pub fn consume(&mut self) {
        self.consumed = true;
    }

    /// True once a handler consumed the event in the current pass.
    #[inline]
    #[must_use]
    pub const fn is_consumed(&self) -> bool {
        self.consumed
    }

    /// Downcasts the attached payload. `None` if no payload was attached
    /// or the type does not match.
    #[must_use]
    pub fn payload<T: 'static>(&self) -> Option<&'a T> {
        self.payload?.downcast_ref::<T>()
    }

    /// Broadcasts this event to every listener registered in `registry`.
    ///
    /// The sole bridge from a single event instance to every independent
    /// subscriber; equivalent to `registry.broadcast(self)`.
    pub fn dispatch(&mut self, registry: &mut EventRegistry) {
        registry.broadcast(self);
    }

    pub(crate) fn reset_consumed(&mut self) {
        self.consumed = false;
    }
}

impl fmt::Debug for Event<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("kind", &self.kind)
            .field("categories", &self.categories)
            .field("consumed", &self.consumed)
            .field("payload", &self.payload.map(|_| "..."))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_binds_kind_and_categories() {
        let event = Event::new(
            KindId::WINDOW_RESIZED,
            CategoryMask::WINDOW,
        );
        assert_eq!(event.kind(), KindId::WINDOW_RESIZED);
        assert!(event.is_in_category(CategoryMask::WINDOW));
        assert!(!event.is_in_category(CategoryMask::INPUT));
        assert!(!event.is_consumed());
    }

    #[test]
    fn test_consume_is_idempotent() {
        let mut event = Event::new(KindId::APP_RENDER, CategoryMask::APPLICATION);
        event.consume();
        assert!(event.is_consumed());
        event.consume();
        assert!(event.is_consumed());
    }

    #[test]
    fn test_payload_downcast() {
        struct Score(u32);
        impl Kind for Score {}

        let score = Score(42);
        let event = score.envelope();
        assert_eq!(event.payload::<Score>().map(|s| s.0), Some(42));
        assert!(event.payload::<String>().is_none());

        let bare = Event::of::<Score>();
        assert!(bare.payload::<Score>().is_none());
    }
}
