//! The fixed command vocabulary and actor kinds.

use std::fmt;

/// The kind of a command, without its resolved targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CommandKind {
    /// Move to a neighbouring location.
    Move,
    /// Look at a location, object, monster or character.
    Look,
    /// Pick up (or unequip) an object into the pack.
    Stash,
    /// Wear or wield an object.
    Equip,
    /// Put a held object down.
    Drop,
    /// Attack a monster or character.
    Attack,
}

impl CommandKind {
    /// All commands in keyword priority order.
    pub const PRIORITY: [CommandKind; 6] = [
        CommandKind::Move,
        CommandKind::Look,
        CommandKind::Stash,
        CommandKind::Equip,
        CommandKind::Drop,
        CommandKind::Attack,
    ];

    /// Returns the keyword that introduces this command in a sentence.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Move => "move",
            Self::Look => "look",
            Self::Stash => "stash",
            Self::Equip => "equip",
            Self::Drop => "drop",
            Self::Attack => "attack",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Whether an action was issued by a character or a monster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActorKind {
    /// A player character.
    Character,
    /// A monster.
    Monster,
}

impl fmt::Display for ActorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Character => f.write_str("character"),
            Self::Monster => f.write_str("monster"),
        }
    }
}
