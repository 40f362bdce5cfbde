//! Per-playthrough instance records.

use chrono::{DateTime, Utc};
use delve_foundation::{
    CharacterId, CharacterInstanceId, DungeonId, DungeonInstanceId, Error, LocationId,
    LocationInstanceId, MonsterId, MonsterInstanceId, ObjectId, ObjectInstanceId, Result,
};

use crate::attributes::Attributes;
use crate::neighbors::Neighbors;
use crate::record::{Filter, field_matches, impl_record, optional_field_matches};

/// One playthrough of a dungeon.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DungeonInstance {
    /// Identifier.
    pub id: DungeonInstanceId,
    /// The template this playthrough was copied from.
    pub dungeon_id: DungeonId,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: Option<DateTime<Utc>>,
}

/// Filter for [`DungeonInstance`] records.
#[derive(Clone, Debug, Default)]
pub struct DungeonInstanceFilter {
    /// Template dungeon.
    pub dungeon_id: Option<DungeonId>,
}

impl Filter<DungeonInstance> for DungeonInstanceFilter {
    fn matches(&self, record: &DungeonInstance) -> bool {
        field_matches(self.dungeon_id.as_ref(), &record.dungeon_id)
    }
}

impl_record!(
    DungeonInstance,
    DungeonInstanceId,
    DungeonInstanceFilter,
    "dungeon instance"
);

/// One node of a playthrough's location graph.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocationInstance {
    /// Identifier.
    pub id: LocationInstanceId,
    /// Owning playthrough.
    pub dungeon_instance_id: DungeonInstanceId,
    /// Template location.
    pub location_id: LocationId,
    /// Exits to locations of the same playthrough.
    pub neighbors: Neighbors<LocationInstanceId>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: Option<DateTime<Utc>>,
}

/// Filter for [`LocationInstance`] records and views.
#[derive(Clone, Debug, Default)]
pub struct LocationInstanceFilter {
    /// Owning playthrough.
    pub dungeon_instance_id: Option<DungeonInstanceId>,
    /// Template location.
    pub location_id: Option<LocationId>,
}

impl Filter<LocationInstance> for LocationInstanceFilter {
    fn matches(&self, record: &LocationInstance) -> bool {
        field_matches(self.dungeon_instance_id.as_ref(), &record.dungeon_instance_id)
            && field_matches(self.location_id.as_ref(), &record.location_id)
    }
}

impl_record!(
    LocationInstance,
    LocationInstanceId,
    LocationInstanceFilter,
    "location instance"
);

/// A character placed in a playthrough.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterInstance {
    /// Identifier.
    pub id: CharacterInstanceId,
    /// Owning playthrough.
    pub dungeon_instance_id: DungeonInstanceId,
    /// The player's character.
    pub character_id: CharacterId,
    /// Where the character currently stands.
    pub location_instance_id: LocationInstanceId,
    /// Current attributes.
    pub current: Attributes,
    /// Maximum attributes.
    pub maximum: Attributes,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: Option<DateTime<Utc>>,
}

/// Filter for [`CharacterInstance`] records and views.
#[derive(Clone, Debug, Default)]
pub struct CharacterInstanceFilter {
    /// Owning playthrough.
    pub dungeon_instance_id: Option<DungeonInstanceId>,
    /// The player's character.
    pub character_id: Option<CharacterId>,
    /// Current location.
    pub location_instance_id: Option<LocationInstanceId>,
}

impl Filter<CharacterInstance> for CharacterInstanceFilter {
    fn matches(&self, record: &CharacterInstance) -> bool {
        field_matches(self.dungeon_instance_id.as_ref(), &record.dungeon_instance_id)
            && field_matches(self.character_id.as_ref(), &record.character_id)
            && field_matches(
                self.location_instance_id.as_ref(),
                &record.location_instance_id,
            )
    }
}

impl_record!(
    CharacterInstance,
    CharacterInstanceId,
    CharacterInstanceFilter,
    "character instance"
);

/// A monster placed in a playthrough.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonsterInstance {
    /// Identifier.
    pub id: MonsterInstanceId,
    /// Owning playthrough.
    pub dungeon_instance_id: DungeonInstanceId,
    /// Template monster.
    pub monster_id: MonsterId,
    /// Where the monster currently stands.
    pub location_instance_id: LocationInstanceId,
    /// Current attributes.
    pub current: Attributes,
    /// Maximum attributes.
    pub maximum: Attributes,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: Option<DateTime<Utc>>,
}

/// Filter for [`MonsterInstance`] records and views.
#[derive(Clone, Debug, Default)]
pub struct MonsterInstanceFilter {
    /// Owning playthrough.
    pub dungeon_instance_id: Option<DungeonInstanceId>,
    /// Current location.
    pub location_instance_id: Option<LocationInstanceId>,
}

impl Filter<MonsterInstance> for MonsterInstanceFilter {
    fn matches(&self, record: &MonsterInstance) -> bool {
        field_matches(self.dungeon_instance_id.as_ref(), &record.dungeon_instance_id)
            && field_matches(
                self.location_instance_id.as_ref(),
                &record.location_instance_id,
            )
    }
}

impl_record!(
    MonsterInstance,
    MonsterInstanceId,
    MonsterInstanceFilter,
    "monster instance"
);

/// Who is holding an object.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Holder {
    /// Held by a character.
    Character(CharacterInstanceId),
    /// Held by a monster.
    Monster(MonsterInstanceId),
}

/// How a held object is carried.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Carry {
    /// Packed away.
    Stashed,
    /// Worn or wielded.
    Equipped,
}

/// An object within a playthrough.
///
/// At most one of `location_instance_id`, `character_instance_id` and
/// `monster_instance_id` is set. A held object is either stashed or
/// equipped; an unheld object is neither.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectInstance {
    /// Identifier.
    pub id: ObjectInstanceId,
    /// Owning playthrough.
    pub dungeon_instance_id: DungeonInstanceId,
    /// Template object.
    pub object_id: ObjectId,
    /// Location, when lying on the floor.
    pub location_instance_id: Option<LocationInstanceId>,
    /// Holder, when carried by a character.
    pub character_instance_id: Option<CharacterInstanceId>,
    /// Holder, when carried by a monster.
    pub monster_instance_id: Option<MonsterInstanceId>,
    /// Packed away by the holder.
    pub is_stashed: bool,
    /// Worn or wielded by the holder.
    pub is_equipped: bool,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: Option<DateTime<Utc>>,
}

impl ObjectInstance {
    /// Returns the current holder, if any.
    #[must_use]
    pub fn holder(&self) -> Option<Holder> {
        match (self.character_instance_id, self.monster_instance_id) {
            (Some(id), _) => Some(Holder::Character(id)),
            (None, Some(id)) => Some(Holder::Monster(id)),
            (None, None) => None,
        }
    }

    /// Returns how the object is carried, if it is held.
    #[must_use]
    pub fn carry(&self) -> Option<Carry> {
        match (self.is_stashed, self.is_equipped) {
            (true, false) => Some(Carry::Stashed),
            (false, true) => Some(Carry::Equipped),
            _ => None,
        }
    }

    /// Puts the object on the floor of a location.
    pub fn place_at(&mut self, location_instance_id: LocationInstanceId) {
        self.location_instance_id = Some(location_instance_id);
        self.character_instance_id = None;
        self.monster_instance_id = None;
        self.is_stashed = false;
        self.is_equipped = false;
    }

    /// Hands the object to a holder.
    pub fn give_to(&mut self, holder: Holder, carry: Carry) {
        self.location_instance_id = None;
        match holder {
            Holder::Character(id) => {
                self.character_instance_id = Some(id);
                self.monster_instance_id = None;
            }
            Holder::Monster(id) => {
                self.character_instance_id = None;
                self.monster_instance_id = Some(id);
            }
        }
        self.is_stashed = carry == Carry::Stashed;
        self.is_equipped = carry == Carry::Equipped;
    }

    /// Checks the placement invariant.
    ///
    /// # Errors
    ///
    /// Returns a validation error if more than one place is set, if a held
    /// object is not exactly one of stashed/equipped, or if an unheld object
    /// carries either flag.
    pub fn check_placement(&self) -> Result<()> {
        let places = usize::from(self.location_instance_id.is_some())
            + usize::from(self.character_instance_id.is_some())
            + usize::from(self.monster_instance_id.is_some());
        if places > 1 {
            return Err(Error::validation(format!(
                "object instance {} is in {places} places at once",
                self.id
            )));
        }
        let held = self.holder().is_some();
        if held && self.carry().is_none() {
            return Err(Error::validation(format!(
                "held object instance {} must be exactly one of stashed or equipped",
                self.id
            )));
        }
        if !held && (self.is_stashed || self.is_equipped) {
            return Err(Error::validation(format!(
                "unheld object instance {} cannot be stashed or equipped",
                self.id
            )));
        }
        Ok(())
    }
}

/// Filter for [`ObjectInstance`] records and views.
#[derive(Clone, Debug, Default)]
pub struct ObjectInstanceFilter {
    /// Owning playthrough.
    pub dungeon_instance_id: Option<DungeonInstanceId>,
    /// Floor location.
    pub location_instance_id: Option<LocationInstanceId>,
    /// Character holder.
    pub character_instance_id: Option<CharacterInstanceId>,
    /// Monster holder.
    pub monster_instance_id: Option<MonsterInstanceId>,
}

impl Filter<ObjectInstance> for ObjectInstanceFilter {
    fn matches(&self, record: &ObjectInstance) -> bool {
        field_matches(self.dungeon_instance_id.as_ref(), &record.dungeon_instance_id)
            && optional_field_matches(
                self.location_instance_id.as_ref(),
                record.location_instance_id.as_ref(),
            )
            && optional_field_matches(
                self.character_instance_id.as_ref(),
                record.character_instance_id.as_ref(),
            )
            && optional_field_matches(
                self.monster_instance_id.as_ref(),
                record.monster_instance_id.as_ref(),
            )
    }
}

impl_record!(
    ObjectInstance,
    ObjectInstanceId,
    ObjectInstanceFilter,
    "object instance"
);
