//! # Stable numeric identifiers for event kinds.
//!
//! Every event kind — built-in or user-defined — owns a [`KindId`] that is
//! stable for the life of the process. Built-in kinds use pinned literals
//! partitioned by range:
//!
//! ```text
//! 100-199  keyboard        300-399  window        500-599  application
//! 200-299  mouse           400-499  controller    1000+    custom
//! ```
//!
//! User-defined kinds implement [`Kind`] and keep the default
//! `PINNED = None`: their id is allocated lazily from a single shared
//! monotonic counter starting at [`KindId::CUSTOM_START`], assigned on the
//! first request for that type and memoized thereafter. Ids are never
//! reused and never collide.
//!
//! ## Example
//! ```rust
//! use layercast::{kind_id, Kind, KindId};
//!
//! struct SaveRequested;
//! impl Kind for SaveRequested {}
//!
//! let id = kind_id::<SaveRequested>();
//! assert!(id.is_custom());
//! assert_eq!(kind_id::<SaveRequested>(), id);
//! assert_eq!(kind_id::<layercast::payloads::WindowClosed>(), KindId::WINDOW_CLOSED);
//! ```

use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Mutex, OnceLock, PoisonError};

use crate::events::category::CategoryMask;

/// Stable numeric identifier for an event kind.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KindId(u32);

impl KindId {
    // Keyboard (100-199)
    pub const KEY_PRESSED: Self = Self(100);
    pub const KEY_RELEASED: Self = Self(101);
    pub const KEY_TYPED: Self = Self(102);

    // Mouse (200-299)
    pub const MOUSE_BUTTON_PRESSED: Self = Self(200);
    pub const MOUSE_BUTTON_RELEASED: Self = Self(201);
    pub const MOUSE_MOVED: Self = Self(202);
    pub const MOUSE_SCROLLED: Self = Self(203);
    pub const MOUSE_ENTERED: Self = Self(204);
    pub const MOUSE_EXITED: Self = Self(205);

    // Window (300-399)
    pub const WINDOW_RESIZED: Self = Self(300);
    pub const WINDOW_MINIMIZED: Self = Self(301);
    pub const WINDOW_MAXIMIZED: Self = Self(302);
    pub const WINDOW_RESTORED: Self = Self(303);
    pub const WINDOW_MOVED: Self = Self(304);
    pub const WINDOW_FOCUSED: Self = Self(305);
    pub const WINDOW_CLOSED: Self = Self(306);
    pub const FRAMEBUFFER_RESIZED: Self = Self(307);
    pub const CONTENT_SCALE_CHANGED: Self = Self(308);
    pub const FILE_DROPPED: Self = Self(309);

    // Controller (400-499)
    pub const CONTROLLER_CONNECTED: Self = Self(400);
    pub const CONTROLLER_DISCONNECTED: Self = Self(401);

    // Application (500-599)
    pub const APP_UPDATE: Self = Self(500);
    pub const APP_RENDER: Self = Self(501);

    /// First id of the custom range. Everything below is reserved for
    /// built-in kinds.
    pub const CUSTOM_START: Self = Self(1000);

    /// Raw numeric value, for diagnostics and range checks.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// True for ids allocated from the custom range.
    #[inline]
    #[must_use]
    pub const fn is_custom(self) -> bool {
        self.0 >= Self::CUSTOM_START.0
    }
}

impl fmt::Debug for KindId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KindId({})", self.0)
    }
}

/// Implemented by event kind marker types.
///
/// Built-in kinds (the carriers in [`payloads`](crate::payloads)) pin their
/// id and categories; user-defined kinds keep the defaults and receive a
/// lazily allocated custom id on first use:
///
/// ```rust
/// use layercast::{CategoryMask, Event, Kind};
///
/// struct MatchEnded {
///     winner: u32,
/// }
/// impl Kind for MatchEnded {}
///
/// let payload = MatchEnded { winner: 7 };
/// let event: Event<'_> = payload.envelope();
/// assert!(event.kind().is_custom());
/// assert!(event.is_in_category(CategoryMask::CUSTOM));
/// ```
pub trait Kind: 'static {
    /// Pinned id for built-in kinds; `None` allocates from the custom range.
    const PINNED: Option<KindId> = None;

    /// Category bits stamped on envelopes of this kind.
    const CATEGORIES: CategoryMask = CategoryMask::CUSTOM;

    /// Builds the broadcast envelope for this value, carrying it as the
    /// downcastable payload.
    fn envelope(&self) -> crate::Event<'_>
    where
        Self: Sized,
    {
        crate::Event::with_payload(kind_id::<Self>(), Self::CATEGORIES, self)
    }
}

/// Returns the stable id for kind `K`.
///
/// Pinned ids return as-is. Custom kinds allocate once from the shared
/// monotonic counter and memoize the result per type: repeated calls for
/// the same type return the same id, distinct types never collide, and
/// ids increase in first-use order.
#[must_use]
pub fn kind_id<K: Kind>() -> KindId {
    match K::PINNED {
        Some(id) => id,
        None => custom_kind_id(TypeId::of::<K>()),
    }
}

static NEXT_CUSTOM: AtomicU32 = AtomicU32::new(KindId::CUSTOM_START.0);
static ASSIGNED: OnceLock<Mutex<HashMap<TypeId, KindId>>> = OnceLock::new();

fn custom_kind_id(ty: TypeId) -> KindId {
    let table = ASSIGNED.get_or_init(|| Mutex::new(HashMap::new()));
    // The table never panics while locked, but recover from poisoning
    // anyway instead of propagating an unrelated panic.
    let mut table = table.lock().unwrap_or_else(PoisonError::into_inner);
    *table
        .entry(ty)
        .or_insert_with(|| KindId(NEXT_CUSTOM.fetch_add(1, Ordering::Relaxed)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_ids_are_pinned() {
        assert_eq!(KindId::KEY_PRESSED.raw(), 100);
        assert_eq!(KindId::MOUSE_SCROLLED.raw(), 203);
        assert_eq!(KindId::WINDOW_CLOSED.raw(), 306);
        assert_eq!(KindId::CONTROLLER_CONNECTED.raw(), 400);
        assert_eq!(KindId::APP_RENDER.raw(), 501);
        assert!(!KindId::APP_RENDER.is_custom());
    }

    #[test]
    fn test_custom_ids_unique_and_stable() {
        struct A;
        struct B;
        struct C;
        impl Kind for A {}
        impl Kind for B {}
        impl Kind for C {}

        let a = kind_id::<A>();
        let b = kind_id::<B>();
        let c = kind_id::<C>();

        assert!(a.is_custom(), "custom id {a:?} below CUSTOM_START");
        assert!(b.is_custom());
        assert!(c.is_custom());
        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_ne!(a, c);

        assert_eq!(kind_id::<A>(), a, "repeated call must be memoized");
        assert_eq!(kind_id::<B>(), b);
        assert_eq!(kind_id::<C>(), c);
    }

    #[test]
    fn test_custom_ids_increase_in_first_use_order() {
        struct First;
        struct Second;
        impl Kind for First {}
        impl Kind for Second {}

        let first = kind_id::<First>();
        let second = kind_id::<Second>();
        assert!(
            second > first,
            "second-used kind {second:?} must exceed first-used {first:?}"
        );
    }

    #[test]
    fn test_pinned_kind_returns_pinned_id() {
        struct Pinned;
        impl Kind for Pinned {
            const PINNED: Option<KindId> = Some(KindId::WINDOW_MOVED);
        }

        assert_eq!(kind_id::<Pinned>(), KindId::WINDOW_MOVED);
        assert_eq!(kind_id::<Pinned>(), KindId::WINDOW_MOVED);
    }
}
