//! # Category bitmask for cross-cutting event classification.
//!
//! [`CategoryMask`] tags every event with a set of independent flag bits so
//! listeners can filter on broad classes (all input, all window traffic)
//! without enumerating kind ids. A mask may carry several bits at once: a
//! key press is both [`CategoryMask::INPUT`] and [`CategoryMask::KEYBOARD`].
//!
//! The mask is a plain `u8` newtype with `const fn` set algebra — union,
//! intersect, complement, contains — so masks compose in const context
//! (category tables, [`Kind::CATEGORIES`](crate::Kind::CATEGORIES)).
//!
//! ## Example
//! ```rust
//! use layercast::CategoryMask;
//!
//! let keys = CategoryMask::INPUT.union(CategoryMask::KEYBOARD);
//! assert!(keys.contains(CategoryMask::INPUT));
//! assert!(!keys.contains(CategoryMask::MOUSE));
//! ```

use std::fmt;

/// Set of independent classification bits carried by every event.
///
/// ### Properties
/// - **Composable**: all operations are `const fn`.
/// - **Cheap**: one byte, `Copy`.
/// - **Non-exclusive**: an event may set several bits simultaneously.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CategoryMask(u8);

impl CategoryMask {
    /// The empty mask. No event matches it.
    pub const NONE: Self = Self(0);
    /// Any input device activity (set alongside KEYBOARD/MOUSE/CONTROLLER).
    pub const INPUT: Self = Self(1 << 0);
    /// Keyboard activity.
    pub const KEYBOARD: Self = Self(1 << 1);
    /// Mouse activity.
    pub const MOUSE: Self = Self(1 << 2);
    /// Controller/gamepad activity.
    pub const CONTROLLER: Self = Self(1 << 3);
    /// Window lifecycle and geometry.
    pub const WINDOW: Self = Self(1 << 4);
    /// Application-level ticks (update/render).
    pub const APPLICATION: Self = Self(1 << 5);
    /// User-defined kinds.
    pub const CUSTOM: Self = Self(1 << 6);

    /// Set union of two masks.
    #[inline]
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Set intersection of two masks.
    #[inline]
    #[must_use]
    pub const fn intersect(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    /// Bitwise complement.
    #[inline]
    #[must_use]
    pub const fn complement(self) -> Self {
        Self(!self.0)
    }

    /// Membership test: true if the two masks share at least one bit.
    #[inline]
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// True for the empty mask.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for CategoryMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [(CategoryMask, &str); 7] = [
            (CategoryMask::INPUT, "INPUT"),
            (CategoryMask::KEYBOARD, "KEYBOARD"),
            (CategoryMask::MOUSE, "MOUSE"),
            (CategoryMask::CONTROLLER, "CONTROLLER"),
            (CategoryMask::WINDOW, "WINDOW"),
            (CategoryMask::APPLICATION, "APPLICATION"),
            (CategoryMask::CUSTOM, "CUSTOM"),
        ];

        if self.is_empty() {
            return f.write_str("NONE");
        }

        let mut first = true;
        for (bit, name) in NAMES {
            if self.contains(bit) {
                if !first {
                    f.write_str("|")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        // Bits outside the named range (complement spill) are shown raw.
        let spill = self.0 & !0x7f;
        if spill != 0 {
            if !first {
                f.write_str("|")?;
            }
            write!(f, "{spill:#04x}")?;
        }
        Ok(())
    }
}
