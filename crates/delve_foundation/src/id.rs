//! Typed record identifiers.
//!
//! Every record kind gets its own newtype over a UUID so that a location
//! instance ID can never be passed where an object instance ID is expected.
//! The nil UUID means "not yet assigned"; the store replaces it on create.

use std::fmt;
use std::hash::Hash;

use uuid::Uuid;

/// Common behaviour of all record identifiers.
pub trait RecordId: Copy + Eq + Ord + Hash + fmt::Debug + fmt::Display + Default {
    /// Wraps an existing UUID.
    fn from_uuid(uuid: Uuid) -> Self;

    /// Returns the underlying UUID.
    fn as_uuid(&self) -> Uuid;

    /// Generates a fresh random identifier.
    #[must_use]
    fn generate() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    /// Returns true if this identifier has not been assigned yet.
    fn is_nil(&self) -> bool {
        self.as_uuid().is_nil()
    }
}

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a nil (unassigned) identifier.
            #[must_use]
            pub const fn nil() -> Self {
                Self(Uuid::nil())
            }
        }

        impl RecordId for $name {
            fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.0.is_nil() {
                    write!(f, "{}(nil)", stringify!($name))
                } else {
                    write!(f, "{}({})", stringify!($name), &self.0.simple().to_string()[..8])
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

define_id!(
    /// Identifier of a dungeon template.
    DungeonId
);
define_id!(
    /// Identifier of a location template.
    LocationId
);
define_id!(
    /// Identifier of a player character template.
    CharacterId
);
define_id!(
    /// Identifier of a monster template.
    MonsterId
);
define_id!(
    /// Identifier of an object template.
    ObjectId
);
define_id!(
    /// Identifier of one playthrough of a dungeon.
    DungeonInstanceId
);
define_id!(
    /// Identifier of a location within a dungeon instance.
    LocationInstanceId
);
define_id!(
    /// Identifier of a character placed in a dungeon instance.
    CharacterInstanceId
);
define_id!(
    /// Identifier of a monster placed in a dungeon instance.
    MonsterInstanceId
);
define_id!(
    /// Identifier of an object within a dungeon instance.
    ObjectInstanceId
);
define_id!(
    /// Identifier of a performed action.
    ActionId
);
define_id!(
    /// Identifier of a character snapshot row.
    ActionCharacterId
);
define_id!(
    /// Identifier of a monster snapshot row.
    ActionMonsterId
);
define_id!(
    /// Identifier of an object snapshot row.
    ActionObjectId
);
