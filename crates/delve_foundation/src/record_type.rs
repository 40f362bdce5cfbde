//! Role tags for action snapshot rows.

use std::fmt;

/// Why a snapshot row exists for an action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RecordType {
    /// The acting entity, or an object it holds.
    Source,
    /// The entity the action was aimed at.
    Target,
    /// An entity present at a location the action touched.
    Occupant,
    /// The object equipped by the action (or wielded as a weapon).
    Equipped,
    /// The object stashed by the action.
    Stashed,
    /// The object dropped by the action.
    Dropped,
}

impl RecordType {
    /// Returns the lower-case tag name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Source => "source",
            Self::Target => "target",
            Self::Occupant => "occupant",
            Self::Equipped => "equipped",
            Self::Stashed => "stashed",
            Self::Dropped => "dropped",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
