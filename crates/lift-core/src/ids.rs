//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.  The inner integer is `pub`; callers
//! should still prefer the helpers (`slot`, `distance`) for clarity.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID" — equivalent to `MAX` of the inner type.
            pub const INVALID: $name = $name(<$inner>::MAX);
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

typed_id! {
    /// Identifier of one elevator car.  Ids are 1-based (`1..=num_units`) and
    /// double as the assignment tie-breaker: lower id wins.
    pub struct UnitId(u32);
}

typed_id! {
    /// A floor index in `[0, num_floors)`.  Floor 0 is the ground floor.
    pub struct Floor(u32);
}

impl UnitId {
    /// The id of the unit stored at 0-based position `slot` in the fleet.
    #[inline]
    pub fn from_slot(slot: usize) -> UnitId {
        UnitId(slot as u32 + 1)
    }

    /// 0-based position of this unit in the fleet `Vec`.
    ///
    /// Returns `None` for id 0 and for `INVALID`.
    #[inline]
    pub fn slot(self) -> Option<usize> {
        match self.0 {
            0 | u32::MAX => None,
            n => Some((n - 1) as usize),
        }
    }
}

impl Floor {
    pub const GROUND: Floor = Floor(0);

    /// Number of floors between `self` and `other`.
    #[inline]
    pub fn distance(self, other: Floor) -> u32 {
        self.0.abs_diff(other.0)
    }
}
