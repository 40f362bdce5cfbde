//! Character and monster attributes.

/// The five attributes carried by characters and monsters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attributes {
    /// Physical power.
    pub strength: u32,
    /// Agility and reflexes.
    pub dexterity: u32,
    /// Wits and learning.
    pub intelligence: u32,
    /// Hit points.
    pub health: u32,
    /// Stamina.
    pub fatigue: u32,
}

impl Attributes {
    /// Creates an attribute set.
    #[must_use]
    pub const fn new(
        strength: u32,
        dexterity: u32,
        intelligence: u32,
        health: u32,
        fatigue: u32,
    ) -> Self {
        Self {
            strength,
            dexterity,
            intelligence,
            health,
            fatigue,
        }
    }
}
