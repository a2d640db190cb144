//! # layercast
//!
//! **Layercast** is a synchronous in-process event system for application
//! and game runtimes.
//!
//! It broadcasts discrete occurrences (input, window, lifecycle,
//! user-defined) to registered listeners and routes them through an
//! ordered pipeline of stateful layers that can intercept input and stop
//! further propagation. Dispatch is immediate and single-threaded: no
//! queueing, no threads, just nested calls.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!  ┌─────────────┐  ┌─────────────┐  ┌──────────────┐
//!  │  KeyPressed │  │ WindowClosed│  │ custom kinds │   (payload carriers)
//!  └──────┬──────┘  └──────┬──────┘  └──────┬───────┘
//!         └── envelope() ──┴── envelope() ──┘
//!                          ▼
//!                 Event { kind, categories, consumed }
//!                          │ dispatch(&mut registry)
//!                          ▼
//! ┌───────────────────────────────────────────────────────────┐
//! │  EventRegistry (broadcast)                                │
//! │  - slot arena of callbacks, generational ListenerTokens   │
//! │  - consumed flag reset before every listener              │
//! └───────┬──────────────────────┬────────────────────┬───────┘
//!         ▼                      ▼                    ▼
//!   ad hoc listener        ad hoc listener      LayerStack hook
//!                                                     │
//!                                                     ▼
//!                       ┌─────────────────────────────────────┐
//!                       │  LayerStack                         │
//!                       │  [ layers │ overlays ]              │
//!                       │  on_event: top → bottom, stops at   │
//!                       │            the first consumer       │
//!                       │  on_update/on_render: bottom → top, │
//!                       │            always visits everything │
//!                       └─────────────────────────────────────┘
//! ```
//!
//! ### Event flow
//! ```text
//! carrier.envelope() ──► Event ──► dispatch ──► EventRegistry::broadcast
//!
//! for each registered listener:
//!   ├─► reset consumed flag
//!   └─► callback(&mut event)
//!         └─ LayerStack hook walks overlays, then layers, newest first:
//!              ├─ skip disabled entries
//!              ├─ layer.on_event(&mut event)
//!              └─ event consumed? stop the walk
//! ```
//!
//! ## Features
//! | Area            | Description                                                  | Key types / traits            |
//! |-----------------|--------------------------------------------------------------|-------------------------------|
//! | **Kinds**       | Stable ids, pinned for built-ins, lazy for user kinds.       | [`KindId`], [`Kind`], [`kind_id`] |
//! | **Categories**  | Bitset classification for cross-cutting filtering.           | [`CategoryMask`]              |
//! | **Envelope**    | Ephemeral per-dispatch event with consumed flag and payload. | [`Event`]                     |
//! | **Broadcast**   | Explicit registry, generational subscription tokens.         | [`EventRegistry`], [`ListenerToken`] |
//! | **Layers**      | Hook set with no-op defaults, enable/disable, naming.        | [`Layer`], [`LayerRef`]       |
//! | **Ordering**    | Layer/overlay partition, consumption short-circuit.          | [`LayerStack`]                |
//! | **Payloads**    | Built-in keyboard/mouse/window/controller/app carriers.      | [`payloads`]                  |
//! | **Diagnostics** | Misuse taxonomy logged through `tracing`, always non-fatal.  | [`Misuse`]                    |
//!
//! ## Example
//! ```rust
//! use layercast::{
//!     payloads::KeyPressed, Event, EventRegistry, Kind, KindId, Layer, LayerStack,
//! };
//!
//! struct Hud;
//!
//! impl Layer for Hud {
//!     fn name(&self) -> &str {
//!         "hud"
//!     }
//!
//!     fn on_event(&mut self, event: &mut Event<'_>) {
//!         if event.kind() == KindId::KEY_PRESSED {
//!             // Top-most handler wins: layers below never see this key.
//!             event.consume();
//!         }
//!     }
//! }
//!
//! let mut registry = EventRegistry::new();
//! let mut stack = LayerStack::new(&mut registry);
//!
//! let hud = layercast::layer_ref(Hud);
//! stack.push_overlay(&hud);
//!
//! KeyPressed { key_code: 256, repeat: false }
//!     .envelope()
//!     .dispatch(&mut registry);
//!
//! stack.release(&mut registry);
//! ```

mod diag;
mod events;
mod layers;

// ---- Public re-exports ----

pub use diag::Misuse;
pub use events::{
    kind_id, CategoryMask, Event, EventRegistry, Kind, KindId, ListenerFn, ListenerToken,
};
pub use events::payloads;
pub use layers::{layer_ref, Layer, LayerRef, LayerStack};
