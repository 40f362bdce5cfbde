//! Directional exits between locations.

use std::fmt;

/// One of the ten exits a location may have.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// North
    North,
    /// Northeast
    Northeast,
    /// East
    East,
    /// Southeast
    Southeast,
    /// South
    South,
    /// Southwest
    Southwest,
    /// West
    West,
    /// Northwest
    Northwest,
    /// Up
    Up,
    /// Down
    Down,
}

impl Direction {
    /// All directions in compass order, vertical exits last.
    pub const ALL: [Direction; 10] = [
        Direction::North,
        Direction::Northeast,
        Direction::East,
        Direction::Southeast,
        Direction::South,
        Direction::Southwest,
        Direction::West,
        Direction::Northwest,
        Direction::Up,
        Direction::Down,
    ];

    /// The order in which direction tokens are searched for in a sentence.
    ///
    /// Compound directions come before the simple directions they contain,
    /// so "northeast" is never read as "north".
    pub const MATCH_ORDER: [Direction; 10] = [
        Direction::Northeast,
        Direction::Northwest,
        Direction::Southeast,
        Direction::Southwest,
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
        Direction::Up,
        Direction::Down,
    ];

    /// Returns the canonical lower-case name of this direction.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::North => "north",
            Self::Northeast => "northeast",
            Self::East => "east",
            Self::Southeast => "southeast",
            Self::South => "south",
            Self::Southwest => "southwest",
            Self::West => "west",
            Self::Northwest => "northwest",
            Self::Up => "up",
            Self::Down => "down",
        }
    }

    /// Returns the direction leading back.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::Northeast => Self::Southwest,
            Self::East => Self::West,
            Self::Southeast => Self::Northwest,
            Self::South => Self::North,
            Self::Southwest => Self::Northeast,
            Self::West => Self::East,
            Self::Northwest => Self::Southeast,
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }

    /// Looks up a direction by its canonical name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.name() == name)
    }

    /// Finds the first direction token contained in `text`, in match order.
    ///
    /// `text` is expected to already be lower-case.
    #[must_use]
    pub fn find_in(text: &str) -> Option<Self> {
        Self::MATCH_ORDER
            .into_iter()
            .find(|d| text.contains(d.name()))
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
