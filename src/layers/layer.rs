//! # Core layer trait.
//!
//! `Layer` is the extension point for plugging ordered participants into a
//! [`LayerStack`](crate::LayerStack). Every hook defaults to a no-op, so an
//! implementor overrides only what it needs.
//!
//! ## Contract
//! - `on_attach`/`on_detach` track stack **membership** and fire even for
//!   disabled layers.
//! - `on_event` runs top-to-bottom during propagation; call
//!   [`Event::consume`](crate::Event::consume) to stop layers below from
//!   seeing the event.
//! - `on_update`/`on_render`/`on_debug_render` run bottom-to-top every
//!   frame and are never short-circuited.
//! - A layer that reports `is_enabled() == false` is skipped by all
//!   per-event and per-frame hooks.
//!
//! ## Example (skeleton)
//! ```rust
//! use layercast::{Event, KindId, Layer};
//!
//! struct PauseMenu {
//!     open: bool,
//! }
//!
//! impl Layer for PauseMenu {
//!     fn name(&self) -> &str {
//!         "pause-menu"
//!     }
//!
//!     fn on_event(&mut self, event: &mut Event<'_>) {
//!         if self.open && event.kind() == KindId::KEY_PRESSED {
//!             event.consume();
//!         }
//!     }
//! }
//! ```

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::events::envelope::Event;

/// An ordered participant in event propagation and per-frame passes.
pub trait Layer {
    /// Human-readable name, used only in diagnostics.
    fn name(&self) -> &str {
        "layer"
    }

    /// Disabled layers are skipped by event/update/render passes but still
    /// receive attach/detach, since those represent membership rather than
    /// per-frame activity.
    fn is_enabled(&self) -> bool {
        true
    }

    /// The layer joined a stack.
    fn on_attach(&mut self) {}

    /// The layer left a stack (pop or stack teardown).
    fn on_detach(&mut self) {}

    /// Ordered event hook. Consume the event to stop propagation to the
    /// layers below.
    fn on_event(&mut self, event: &mut Event<'_>) {
        let _ = event;
    }

    /// Per-frame update, visited bottom-to-top.
    fn on_update(&mut self, delta: Duration) {
        let _ = delta;
    }

    /// Per-frame render, visited bottom-to-top.
    fn on_render(&mut self) {}

    /// Auxiliary debug-render pass for tooling overlays.
    fn on_debug_render(&mut self) {}
}

/// Shared handle to a layer.
///
/// The stack stores clones of the handle and never owns the layer
/// exclusively; the owning context keeps its own clone and controls the
/// layer's lifetime.
pub type LayerRef = Rc<RefCell<dyn Layer>>;

/// Wraps a layer into the shared handle form the stack stores.
#[must_use]
pub fn layer_ref<L: Layer + 'static>(layer: L) -> LayerRef {
    Rc::new(RefCell::new(layer))
}
