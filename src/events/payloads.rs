//! # Built-in payload carriers.
//!
//! Pure data structs for the occurrences an input/windowing source
//! produces: keyboard, mouse, window, controller, and application ticks.
//! Each carrier pins its [`KindId`] and [`CategoryMask`] through its
//! [`Kind`] impl and turns into a broadcast envelope with
//! [`Kind::envelope`]; the envelope borrows the carrier so listeners can
//! downcast back to it (see [`Event::payload`](crate::Event::payload)).
//!
//! Carriers have no behavior beyond that — construction is the windowing
//! backend's business, field access is the listener's.
//!
//! ## Example
//! ```rust
//! use layercast::{payloads::MouseMoved, EventRegistry, Kind};
//!
//! let mut registry = EventRegistry::new();
//! MouseMoved { x: 100.0, y: 200.0 }.envelope().dispatch(&mut registry);
//! ```

use std::path::PathBuf;
use std::time::Duration;

use crate::events::category::CategoryMask;
use crate::events::kind::{Kind, KindId};

const INPUT_KEYBOARD: CategoryMask = CategoryMask::INPUT.union(CategoryMask::KEYBOARD);
const INPUT_MOUSE: CategoryMask = CategoryMask::INPUT.union(CategoryMask::MOUSE);
const INPUT_CONTROLLER: CategoryMask = CategoryMask::INPUT.union(CategoryMask::CONTROLLER);

// === Keyboard ===

/// A key went down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPressed {
    /// Platform key code.
    pub key_code: i32,
    /// True for auto-repeat presses while the key is held.
    pub repeat: bool,
}

impl Kind for KeyPressed {
    const PINNED: Option<KindId> = Some(KindId::KEY_PRESSED);
    const CATEGORIES: CategoryMask = INPUT_KEYBOARD;
}

/// A key came back up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyReleased {
    /// Platform key code.
    pub key_code: i32,
}

impl Kind for KeyReleased {
    const PINNED: Option<KindId> = Some(KindId::KEY_RELEASED);
    const CATEGORIES: CategoryMask = INPUT_KEYBOARD;
}

/// Text input: a translated character, after layout and modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyTyped {
    /// Unicode scalar value produced by the keystroke.
    pub character: char,
}

impl Kind for KeyTyped {
    const PINNED: Option<KindId> = Some(KindId::KEY_TYPED);
    const CATEGORIES: CategoryMask = INPUT_KEYBOARD;
}

// === Mouse ===

/// A mouse button went down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseButtonPressed {
    /// Platform button index.
    pub button: i32,
}

impl Kind for MouseButtonPressed {
    const PINNED: Option<KindId> = Some(KindId::MOUSE_BUTTON_PRESSED);
    const CATEGORIES: CategoryMask = INPUT_MOUSE;
}

/// A mouse button came back up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseButtonReleased {
    /// Platform button index.
    pub button: i32,
}

impl Kind for MouseButtonReleased {
    const PINNED: Option<KindId> = Some(KindId::MOUSE_BUTTON_RELEASED);
    const CATEGORIES: CategoryMask = INPUT_MOUSE;
}

/// Cursor moved to a new position, in window coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseMoved {
    pub x: f32,
    pub y: f32,
}

impl Kind for MouseMoved {
    const PINNED: Option<KindId> = Some(KindId::MOUSE_MOVED);
    const CATEGORIES: CategoryMask = INPUT_MOUSE;
}

/// Scroll wheel or trackpad offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseScrolled {
    pub x_offset: f32,
    pub y_offset: f32,
}

impl Kind for MouseScrolled {
    const PINNED: Option<KindId> = Some(KindId::MOUSE_SCROLLED);
    const CATEGORIES: CategoryMask = INPUT_MOUSE;
}

/// Cursor entered the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEntered;

impl Kind for MouseEntered {
    const PINNED: Option<KindId> = Some(KindId::MOUSE_ENTERED);
    const CATEGORIES: CategoryMask = INPUT_MOUSE;
}

/// Cursor left the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseExited;

impl Kind for MouseExited {
    const PINNED: Option<KindId> = Some(KindId::MOUSE_EXITED);
    const CATEGORIES: CategoryMask = INPUT_MOUSE;
}

// === Window ===

/// Window client area resized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowResized {
    pub width: u32,
    pub height: u32,
}

impl Kind for WindowResized {
    const PINNED: Option<KindId> = Some(KindId::WINDOW_RESIZED);
    const CATEGORIES: CategoryMask = CategoryMask::WINDOW;
}

/// Window minimized to the taskbar/dock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowMinimized;

impl Kind for WindowMinimized {
    const PINNED: Option<KindId> = Some(KindId::WINDOW_MINIMIZED);
    const CATEGORIES: CategoryMask = CategoryMask::WINDOW;
}

/// Window maximized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowMaximized;

impl Kind for WindowMaximized {
    const PINNED: Option<KindId> = Some(KindId::WINDOW_MAXIMIZED);
    const CATEGORIES: CategoryMask = CategoryMask::WINDOW;
}

/// Window restored from the minimized or maximized state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowRestored;

impl Kind for WindowRestored {
    const PINNED: Option<KindId> = Some(KindId::WINDOW_RESTORED);
    const CATEGORIES: CategoryMask = CategoryMask::WINDOW;
}

/// Window moved, position in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowMoved {
    pub x: i32,
    pub y: i32,
}

impl Kind for WindowMoved {
    const PINNED: Option<KindId> = Some(KindId::WINDOW_MOVED);
    const CATEGORIES: CategoryMask = CategoryMask::WINDOW;
}

/// Window gained or lost input focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowFocused {
    pub focused: bool,
}

impl Kind for WindowFocused {
    const PINNED: Option<KindId> = Some(KindId::WINDOW_FOCUSED);
    const CATEGORIES: CategoryMask = CategoryMask::WINDOW;
}

/// Close requested (close button, Cmd-W, etc.).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowClosed;

impl Kind for WindowClosed {
    const PINNED: Option<KindId> = Some(KindId::WINDOW_CLOSED);
    const CATEGORIES: CategoryMask = CategoryMask::WINDOW;
}

/// Framebuffer resized; may differ from the client area on high-DPI
/// displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FramebufferResized {
    pub width: u32,
    pub height: u32,
}

impl Kind for FramebufferResized {
    const PINNED: Option<KindId> = Some(KindId::FRAMEBUFFER_RESIZED);
    const CATEGORIES: CategoryMask = CategoryMask::WINDOW;
}

/// Content scale (DPI factor) changed, e.g. after moving between monitors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContentScaleChanged {
    pub x_scale: f32,
    pub y_scale: f32,
}

impl Kind for ContentScaleChanged {
    const PINNED: Option<KindId> = Some(KindId::CONTENT_SCALE_CHANGED);
    const CATEGORIES: CategoryMask = CategoryMask::WINDOW;
}

/// Files dropped onto the window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDropped {
    pub paths: Vec<PathBuf>,
}

impl FileDropped {
    /// Number of dropped files.
    #[must_use]
    pub fn count(&self) -> usize {
        self.paths.len()
    }
}

impl Kind for FileDropped {
    const PINNED: Option<KindId> = Some(KindId::FILE_DROPPED);
    const CATEGORIES: CategoryMask = CategoryMask::WINDOW;
}

// === Controller ===

/// A controller was plugged in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerConnected {
    pub controller_id: i32,
}

impl Kind for ControllerConnected {
    const PINNED: Option<KindId> = Some(KindId::CONTROLLER_CONNECTED);
    const CATEGORIES: CategoryMask = INPUT_CONTROLLER;
}

/// A controller was unplugged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerDisconnected {
    pub controller_id: i32,
}

impl Kind for ControllerDisconnected {
    const PINNED: Option<KindId> = Some(KindId::CONTROLLER_DISCONNECTED);
    const CATEGORIES: CategoryMask = INPUT_CONTROLLER;
}

// === Application ===

/// Per-frame update tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppUpdate {
    /// Time elapsed since the previous update.
    pub delta: Duration,
}

impl Kind for AppUpdate {
    const PINNED: Option<KindId> = Some(KindId::APP_UPDATE);
    const CATEGORIES: CategoryMask = CategoryMask::APPLICATION;
}

/// Per-frame render tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppRender;

impl Kind for AppRender {
    const PINNED: Option<KindId> = Some(KindId::APP_RENDER);
    const CATEGORIES: CategoryMask = CategoryMask::APPLICATION;
}
