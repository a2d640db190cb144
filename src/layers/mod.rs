//! Ordered layer pipeline.
//!
//! The [`Layer`] trait is the participant contract; [`LayerStack`] owns
//! the ordering, the layer/overlay partition, and the registry wiring that
//! turns broadcasts into top-to-bottom propagation.

pub mod layer;
pub mod stack;

pub use layer::{layer_ref, Layer, LayerRef};
pub use stack::LayerStack;
