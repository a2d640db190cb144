//! # Example: input_routing
//!
//! Demonstrates the full dispatch pipeline: payload carriers, the
//! broadcast registry, and top-to-bottom routing through a layer stack.
//!
//! Shows how to:
//! - Implement the [`Layer`] trait for a game layer and a UI overlay.
//! - Wire a [`LayerStack`] into an [`EventRegistry`].
//! - Consume an event in the overlay so layers below never see it.
//! - Drive the forward update/render passes.
//!
//! ## Flow
//! ```text
//! KeyPressed.envelope() ──► dispatch ──► EventRegistry::broadcast
//!     └─► LayerStack hook
//!           ├─► GameOverlay::on_event   (overlay, sees input first)
//!           └─► InputLayer::on_event    (layer, unless consumed above)
//! ```
//!
//! ## Run
//! ```bash
//! RUST_LOG=layercast=trace cargo run --example input_routing
//! ```

use std::time::Duration;

use layercast::{
    payloads::{KeyPressed, MouseMoved, WindowResized},
    Event, EventRegistry, Kind, KindId, Layer, LayerStack,
};

const KEY_A: i32 = 65;
const KEY_ESCAPE: i32 = 256;

/// Bottom layer: handles raw input and consumes the escape key.
struct InputLayer;

impl Layer for InputLayer {
    fn name(&self) -> &str {
        "input"
    }

    fn on_event(&mut self, event: &mut Event<'_>) {
        if event.kind() == KindId::KEY_PRESSED {
            let key = event.payload::<KeyPressed>().expect("key payload");
            println!("[input] key pressed: {} (repeat: {})", key.key_code, key.repeat);

            if key.key_code == KEY_ESCAPE {
                println!("[input] escape consumed, opening pause menu");
                event.consume();
            }
        }

        if event.kind() == KindId::MOUSE_MOVED {
            let cursor = event.payload::<MouseMoved>().expect("mouse payload");
            println!("[input] mouse moved to ({}, {})", cursor.x, cursor.y);
        }
    }

    fn on_update(&mut self, delta: Duration) {
        println!("[input] update: {:.1}ms", delta.as_secs_f64() * 1000.0);
    }
}

/// Overlay: sees every event before the layers underneath.
struct DebugOverlay;

impl Layer for DebugOverlay {
    fn name(&self) -> &str {
        "debug-overlay"
    }

    fn on_event(&mut self, event: &mut Event<'_>) {
        println!(
            "[overlay] saw {:?} in {:?} (passing through)",
            event.kind(),
            event.categories()
        );
    }

    fn on_render(&mut self) {
        println!("[overlay] render");
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut registry = EventRegistry::new();
    let mut stack = LayerStack::new(&mut registry);

    let input = layercast::layer_ref(InputLayer);
    let overlay = layercast::layer_ref(DebugOverlay);
    stack.push_layer(&input);
    stack.push_overlay(&overlay);

    println!("--- dispatching events ---");
    KeyPressed { key_code: KEY_A, repeat: false }
        .envelope()
        .dispatch(&mut registry);
    MouseMoved { x: 100.0, y: 200.0 }
        .envelope()
        .dispatch(&mut registry);

    println!("--- event consumption ---");
    // The overlay passes the escape key through; the input layer consumes
    // it. Had the overlay consumed it, the input layer would never run.
    KeyPressed { key_code: KEY_ESCAPE, repeat: false }
        .envelope()
        .dispatch(&mut registry);

    println!("--- category filtering ---");
    let resize = WindowResized { width: 1920, height: 1080 }.envelope();
    println!(
        "WindowResized: window={} input={}",
        resize.is_in_category(layercast::CategoryMask::WINDOW),
        resize.is_in_category(layercast::CategoryMask::INPUT),
    );

    println!("--- frame passes ---");
    stack.on_update(Duration::from_millis(16));
    stack.on_render();

    // Explicit teardown: unsubscribes the stack, detaches both layers.
    stack.release(&mut registry);
    println!("done");
}
