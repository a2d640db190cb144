//! Event model: kinds, categories, envelope and broadcast registry.
//!
//! This module groups the event **data model** and the **registry** used
//! to broadcast occurrences to registered listeners.
//!
//! ## Contents
//! - [`KindId`], [`Kind`], [`kind_id`] — stable per-kind identifiers
//! - [`CategoryMask`] — cross-cutting bitset classification
//! - [`Event`] — the ephemeral envelope passed through one dispatch
//! - [`EventRegistry`], [`ListenerToken`] — broadcast subscription set
//! - [`payloads`] — built-in data carriers (keyboard/mouse/window/...)
//!
//! ## Quick reference
//! - **Producers**: windowing backends and game code build a carrier,
//!   call [`Kind::envelope`] and [`Event::dispatch`].
//! - **Consumers**: anything holding a [`ListenerToken`]; typically the
//!   [`LayerStack`](crate::LayerStack) through its own subscription.

pub mod category;
pub mod envelope;
pub mod kind;
pub mod payloads;
pub mod registry;

pub use category::CategoryMask;
pub use envelope::Event;
pub use kind::{kind_id, Kind, KindId};
pub use registry::{EventRegistry, ListenerFn, ListenerToken};
