//! Recognized construct subsets.

use std::ops::{BitOr, BitOrAssign};

/// Set of optional dialect constructs the parser recognizes.
///
/// Core constructs (headings, emphasis/strong, lists, inline and fenced
/// code, blockquotes, links, images, rules) are always on; the flags here
/// gate the extended marks. Disabled constructs pass through as literal
/// text.
///
/// ```
/// use notemark_renderer::Features;
///
/// let features = Features::TABLES | Features::TASK_LISTS;
/// assert!(features.contains(Features::TABLES));
/// assert!(!features.contains(Features::CALLOUTS));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Features(u16);

impl Features {
    /// Header + separator + body tables.
    pub const TABLES: Self = Self(1);
    /// `- [ ]` / `- [x]` checkbox items.
    pub const TASK_LISTS: Self = Self(1 << 1);
    /// `> [!NOTE]`-style callout blockquotes.
    pub const CALLOUTS: Self = Self(1 << 2);
    /// `~~text~~`.
    pub const STRIKETHROUGH: Self = Self(1 << 3);
    /// `==text==`.
    pub const HIGHLIGHT: Self = Self(1 << 4);
    /// `^text^` and `~text~`.
    pub const SUPER_SUB: Self = Self(1 << 5);

    /// Restricted core dialect only.
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Every recognized construct.
    #[must_use]
    pub const fn all() -> Self {
        Self(0b11_1111)
    }

    /// Whether every flag in `other` is enabled.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Set union.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Flags in `self` that are not in `other`.
    #[must_use]
    pub const fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }
}

impl Default for Features {
    fn default() -> Self {
        Self::all()
    }
}

impl BitOr for Features {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitOrAssign for Features {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}
