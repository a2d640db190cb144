//! Misuse diagnostics.
//!
//! Every recoverable API misuse — a stale listener token, a duplicate layer
//! push, a pop that found nothing — is described by [`Misuse`] and reported
//! as a `tracing` warning, then treated as a no-op. Nothing here returns an
//! error or panics: with no subscriber installed the warnings vanish, and
//! control flow is identical either way.

use thiserror::Error;

/// Non-fatal API misuse, reported through `tracing` warnings.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Misuse {
    /// A listener token that no longer (or never) named a live slot.
    #[error("stale listener token (slot {slot}, generation {generation}) passed to {op}")]
    StaleToken {
        /// Slot index carried by the token.
        slot: u32,
        /// Generation carried by the token.
        generation: u32,
        /// Operation that received the token.
        op: &'static str,
    },

    /// A layer handle pushed while already present anywhere in the stack.
    #[error("layer '{name}' is already in the stack")]
    DuplicateLayer {
        /// The layer's reported name.
        name: String,
    },

    /// A pop that searched its partition without finding the handle.
    #[error("layer '{name}' not found among {partition}")]
    AbsentLayer {
        /// The layer's reported name.
        name: String,
        /// Which partition was searched (`"layers"` or `"overlays"`).
        partition: &'static str,
    },
}

impl Misuse {
    /// Short stable label (snake_case) for log filtering.
    #[must_use]
    pub fn as_label(&self) -> &'static str {
        match self {
            Misuse::StaleToken { .. } => "stale_token",
            Misuse::DuplicateLayer { .. } => "duplicate_layer",
            Misuse::AbsentLayer { .. } => "absent_layer",
        }
    }

    /// Emits the warning. Single choke point so every misuse logs the same
    /// shape.
    pub(crate) fn warn(&self) {
        tracing::warn!(target: "layercast", label = self.as_label(), "{}", self);
    }
}
