//! # Example: custom_kinds
//!
//! Demonstrates user-defined event kinds: lazily allocated ids, custom
//! category bits, and payload downcasting from an ad hoc listener.
//!
//! ## Run
//! ```bash
//! cargo run --example custom_kinds
//! ```

use layercast::{kind_id, CategoryMask, EventRegistry, Kind, KindId};

/// Game-specific occurrence; gets an id from the custom range (1000+) on
/// first use.
struct PlayerDied {
    player_id: u32,
}

impl Kind for PlayerDied {}

/// A second custom kind with an extra category bit for filtering.
struct MatchEnded {
    winner: u32,
}

impl Kind for MatchEnded {
    const CATEGORIES: CategoryMask = CategoryMask::CUSTOM.union(CategoryMask::APPLICATION);
}

fn main() {
    let mut registry = EventRegistry::new();

    let died = kind_id::<PlayerDied>();
    let ended = kind_id::<MatchEnded>();
    println!("PlayerDied id: {died:?} (custom: {})", died.is_custom());
    println!("MatchEnded id: {ended:?} (custom: {})", ended.is_custom());
    assert_eq!(kind_id::<PlayerDied>(), died, "ids are memoized per type");

    let _scoreboard = registry.subscribe(move |event| {
        if event.kind() == kind_id::<PlayerDied>() {
            let death = event.payload::<PlayerDied>().expect("payload attached");
            println!("[scoreboard] player {} died", death.player_id);
        }
        if event.is_in_category(CategoryMask::APPLICATION) {
            let end = event.payload::<MatchEnded>().expect("payload attached");
            println!("[scoreboard] match over, winner: player {}", end.winner);
        }
    });

    PlayerDied { player_id: 42 }.envelope().dispatch(&mut registry);
    MatchEnded { winner: 7 }.envelope().dispatch(&mut registry);

    // Built-in ids stay out of the custom range.
    assert!(KindId::KEY_PRESSED < KindId::CUSTOM_START);
    println!("done");
}
