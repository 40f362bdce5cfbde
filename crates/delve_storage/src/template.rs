//! Authored dungeon templates.
//!
//! Templates describe a dungeon once; every playthrough copies them into
//! instance records.

use chrono::{DateTime, Utc};
use delve_foundation::{CharacterId, DungeonId, LocationId, MonsterId, ObjectId};

use crate::attributes::Attributes;
use crate::neighbors::Neighbors;
use crate::record::{Filter, field_matches, impl_record};

/// A static, authored dungeon map.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dungeon {
    /// Identifier.
    pub id: DungeonId,
    /// Display name.
    pub name: String,
    /// Flavour text.
    pub description: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: Option<DateTime<Utc>>,
}

/// Filter for [`Dungeon`] records.
#[derive(Clone, Debug, Default)]
pub struct DungeonFilter {
    /// Exact name.
    pub name: Option<String>,
}

impl Filter<Dungeon> for DungeonFilter {
    fn matches(&self, record: &Dungeon) -> bool {
        field_matches(self.name.as_ref(), &record.name)
    }
}

impl_record!(Dungeon, DungeonId, DungeonFilter, "dungeon");

/// A location template with exits to other templates of the same dungeon.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    /// Identifier.
    pub id: LocationId,
    /// Owning dungeon.
    pub dungeon_id: DungeonId,
    /// Display name.
    pub name: String,
    /// Flavour text.
    pub description: String,
    /// Whether new characters enter the dungeon here.
    pub is_default: bool,
    /// Exits to other location templates.
    pub neighbors: Neighbors<LocationId>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: Option<DateTime<Utc>>,
}

/// Filter for [`Location`] records.
#[derive(Clone, Debug, Default)]
pub struct LocationFilter {
    /// Owning dungeon.
    pub dungeon_id: Option<DungeonId>,
    /// Entry location flag.
    pub is_default: Option<bool>,
}

impl Filter<Location> for LocationFilter {
    fn matches(&self, record: &Location) -> bool {
        field_matches(self.dungeon_id.as_ref(), &record.dungeon_id)
            && field_matches(self.is_default.as_ref(), &record.is_default)
    }
}

impl_record!(Location, LocationId, LocationFilter, "location");

/// A player's persistent character.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Character {
    /// Identifier.
    pub id: CharacterId,
    /// Display name, unique per player base.
    pub name: String,
    /// Maximum attributes.
    pub attributes: Attributes,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: Option<DateTime<Utc>>,
}

/// Filter for [`Character`] records.
#[derive(Clone, Debug, Default)]
pub struct CharacterFilter {
    /// Exact name.
    pub name: Option<String>,
}

impl Filter<Character> for CharacterFilter {
    fn matches(&self, record: &Character) -> bool {
        field_matches(self.name.as_ref(), &record.name)
    }
}

impl_record!(Character, CharacterId, CharacterFilter, "character");

/// A monster template placed at a starting location.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Monster {
    /// Identifier.
    pub id: MonsterId,
    /// Owning dungeon.
    pub dungeon_id: DungeonId,
    /// Starting location.
    pub location_id: LocationId,
    /// Display name.
    pub name: String,
    /// Flavour text.
    pub description: String,
    /// Maximum attributes.
    pub attributes: Attributes,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: Option<DateTime<Utc>>,
}

/// Filter for [`Monster`] records.
#[derive(Clone, Debug, Default)]
pub struct MonsterFilter {
    /// Owning dungeon.
    pub dungeon_id: Option<DungeonId>,
}

impl Filter<Monster> for MonsterFilter {
    fn matches(&self, record: &Monster) -> bool {
        field_matches(self.dungeon_id.as_ref(), &record.dungeon_id)
    }
}

impl_record!(Monster, MonsterId, MonsterFilter, "monster");

/// An object template, starting on the floor or carried by a monster.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Object {
    /// Identifier.
    pub id: ObjectId,
    /// Owning dungeon.
    pub dungeon_id: DungeonId,
    /// Display name.
    pub name: String,
    /// Flavour text.
    pub description: String,
    /// Starting location, when lying on the floor.
    pub location_id: Option<LocationId>,
    /// Starting holder, when carried by a monster.
    pub monster_id: Option<MonsterId>,
    /// Carried in the holder's pack.
    pub is_stashed: bool,
    /// Worn or wielded by the holder.
    pub is_equipped: bool,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: Option<DateTime<Utc>>,
}

/// Filter for [`Object`] records.
#[derive(Clone, Debug, Default)]
pub struct ObjectFilter {
    /// Owning dungeon.
    pub dungeon_id: Option<DungeonId>,
}

impl Filter<Object> for ObjectFilter {
    fn matches(&self, record: &Object) -> bool {
        field_matches(self.dungeon_id.as_ref(), &record.dungeon_id)
    }
}

impl_record!(Object, ObjectId, ObjectFilter, "object");
