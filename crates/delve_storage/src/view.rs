//! Read-only views joining instances with their templates.
//!
//! Views carry the template's name and description alongside the instance's
//! live state. They share the instance's identifier and filter type.

use chrono::{DateTime, Utc};
use delve_foundation::{
    CharacterId, CharacterInstanceId, DungeonInstanceId, LocationId, LocationInstanceId,
    MonsterId, MonsterInstanceId, ObjectId, ObjectInstanceId,
};

use crate::attributes::Attributes;
use crate::instance::{
    CharacterInstance, CharacterInstanceFilter, Holder, LocationInstance, LocationInstanceFilter,
    MonsterInstance, MonsterInstanceFilter, ObjectInstance, ObjectInstanceFilter,
};
use crate::neighbors::Neighbors;
use crate::record::{Filter, View, field_matches, optional_field_matches};
use crate::template::{Character, Location, Monster, Object};

/// A location instance with its template's name and description.
#[derive(Clone, Debug, PartialEq)]
pub struct LocationInstanceView {
    /// Identifier.
    pub id: LocationInstanceId,
    /// Owning playthrough.
    pub dungeon_instance_id: DungeonInstanceId,
    /// Template location.
    pub location_id: LocationId,
    /// Template name.
    pub name: String,
    /// Template description.
    pub description: String,
    /// Whether this is the dungeon's entry location.
    pub is_default: bool,
    /// Exits to other location instances.
    pub neighbors: Neighbors<LocationInstanceId>,
    /// Instance creation time.
    pub created_at: DateTime<Utc>,
    /// Instance update time.
    pub updated_at: Option<DateTime<Utc>>,
}

impl LocationInstanceView {
    /// Joins an instance with its template.
    #[must_use]
    pub fn join(instance: &LocationInstance, template: &Location) -> Self {
        Self {
            id: instance.id,
            dungeon_instance_id: instance.dungeon_instance_id,
            location_id: instance.location_id,
            name: template.name.clone(),
            description: template.description.clone(),
            is_default: template.is_default,
            neighbors: instance.neighbors,
            created_at: instance.created_at,
            updated_at: instance.updated_at,
        }
    }
}

impl View for LocationInstanceView {
    type Id = LocationInstanceId;
    type Filter = LocationInstanceFilter;

    const KIND: &'static str = "location instance view";

    fn id(&self) -> Self::Id {
        self.id
    }
}

impl Filter<LocationInstanceView> for LocationInstanceFilter {
    fn matches(&self, view: &LocationInstanceView) -> bool {
        field_matches(self.dungeon_instance_id.as_ref(), &view.dungeon_instance_id)
            && field_matches(self.location_id.as_ref(), &view.location_id)
    }
}

/// A character instance with its character's name.
#[derive(Clone, Debug, PartialEq)]
pub struct CharacterInstanceView {
    /// Identifier.
    pub id: CharacterInstanceId,
    /// Owning playthrough.
    pub dungeon_instance_id: DungeonInstanceId,
    /// The player's character.
    pub character_id: CharacterId,
    /// Current location.
    pub location_instance_id: LocationInstanceId,
    /// Character name.
    pub name: String,
    /// Current attributes.
    pub current: Attributes,
    /// Maximum attributes.
    pub maximum: Attributes,
    /// Instance creation time.
    pub created_at: DateTime<Utc>,
    /// Instance update time.
    pub updated_at: Option<DateTime<Utc>>,
}

impl CharacterInstanceView {
    /// Joins an instance with its template.
    #[must_use]
    pub fn join(instance: &CharacterInstance, template: &Character) -> Self {
        Self {
            id: instance.id,
            dungeon_instance_id: instance.dungeon_instance_id,
            character_id: instance.character_id,
            location_instance_id: instance.location_instance_id,
            name: template.name.clone(),
            current: instance.current,
            maximum: instance.maximum,
            created_at: instance.created_at,
            updated_at: instance.updated_at,
        }
    }
}

impl View for CharacterInstanceView {
    type Id = CharacterInstanceId;
    type Filter = CharacterInstanceFilter;

    const KIND: &'static str = "character instance view";

    fn id(&self) -> Self::Id {
        self.id
    }
}

impl Filter<CharacterInstanceView> for CharacterInstanceFilter {
    fn matches(&self, view: &CharacterInstanceView) -> bool {
        field_matches(self.dungeon_instance_id.as_ref(), &view.dungeon_instance_id)
            && field_matches(self.character_id.as_ref(), &view.character_id)
            && field_matches(self.location_instance_id.as_ref(), &view.location_instance_id)
    }
}

/// A monster instance with its template's name and description.
#[derive(Clone, Debug, PartialEq)]
pub struct MonsterInstanceView {
    /// Identifier.
    pub id: MonsterInstanceId,
    /// Owning playthrough.
    pub dungeon_instance_id: DungeonInstanceId,
    /// Template monster.
    pub monster_id: MonsterId,
    /// Current location.
    pub location_instance_id: LocationInstanceId,
    /// Template name.
    pub name: String,
    /// Template description.
    pub description: String,
    /// Current attributes.
    pub current: Attributes,
    /// Maximum attributes.
    pub maximum: Attributes,
    /// Instance creation time.
    pub created_at: DateTime<Utc>,
    /// Instance update time.
    pub updated_at: Option<DateTime<Utc>>,
}

impl MonsterInstanceView {
    /// Joins an instance with its template.
    #[must_use]
    pub fn join(instance: &MonsterInstance, template: &Monster) -> Self {
        Self {
            id: instance.id,
            dungeon_instance_id: instance.dungeon_instance_id,
            monster_id: instance.monster_id,
            location_instance_id: instance.location_instance_id,
            name: template.name.clone(),
            description: template.description.clone(),
            current: instance.current,
            maximum: instance.maximum,
            created_at: instance.created_at,
            updated_at: instance.updated_at,
        }
    }
}

impl View for MonsterInstanceView {
    type Id = MonsterInstanceId;
    type Filter = MonsterInstanceFilter;

    const KIND: &'static str = "monster instance view";

    fn id(&self) -> Self::Id {
        self.id
    }
}

impl Filter<MonsterInstanceView> for MonsterInstanceFilter {
    fn matches(&self, view: &MonsterInstanceView) -> bool {
        field_matches(self.dungeon_instance_id.as_ref(), &view.dungeon_instance_id)
            && field_matches(self.location_instance_id.as_ref(), &view.location_instance_id)
    }
}

/// An object instance with its template's name and description.
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectInstanceView {
    /// Identifier.
    pub id: ObjectInstanceId,
    /// Owning playthrough.
    pub dungeon_instance_id: DungeonInstanceId,
    /// Template object.
    pub object_id: ObjectId,
    /// Floor location.
    pub location_instance_id: Option<LocationInstanceId>,
    /// Character holder.
    pub character_instance_id: Option<CharacterInstanceId>,
    /// Monster holder.
    pub monster_instance_id: Option<MonsterInstanceId>,
    /// Packed away by the holder.
    pub is_stashed: bool,
    /// Worn or wielded by the holder.
    pub is_equipped: bool,
    /// Template name.
    pub name: String,
    /// Template description.
    pub description: String,
    /// Instance creation time.
    pub created_at: DateTime<Utc>,
    /// Instance update time.
    pub updated_at: Option<DateTime<Utc>>,
}

impl ObjectInstanceView {
    /// Joins an instance with its template.
    #[must_use]
    pub fn join(instance: &ObjectInstance, template: &Object) -> Self {
        Self {
            id: instance.id,
            dungeon_instance_id: instance.dungeon_instance_id,
            object_id: instance.object_id,
            location_instance_id: instance.location_instance_id,
            character_instance_id: instance.character_instance_id,
            monster_instance_id: instance.monster_instance_id,
            is_stashed: instance.is_stashed,
            is_equipped: instance.is_equipped,
            name: template.name.clone(),
            description: template.description.clone(),
            created_at: instance.created_at,
            updated_at: instance.updated_at,
        }
    }

    /// Returns the current holder, if any.
    #[must_use]
    pub fn holder(&self) -> Option<Holder> {
        match (self.character_instance_id, self.monster_instance_id) {
            (Some(id), _) => Some(Holder::Character(id)),
            (None, Some(id)) => Some(Holder::Monster(id)),
            (None, None) => None,
        }
    }
}

impl View for ObjectInstanceView {
    type Id = ObjectInstanceId;
    type Filter = ObjectInstanceFilter;

    const KIND: &'static str = "object instance view";

    fn id(&self) -> Self::Id {
        self.id
    }
}

impl Filter<ObjectInstanceView> for ObjectInstanceFilter {
    fn matches(&self, view: &ObjectInstanceView) -> bool {
        field_matches(self.dungeon_instance_id.as_ref(), &view.dungeon_instance_id)
            && optional_field_matches(
                self.location_instance_id.as_ref(),
                view.location_instance_id.as_ref(),
            )
            && optional_field_matches(
                self.character_instance_id.as_ref(),
                view.character_instance_id.as_ref(),
            )
            && optional_field_matches(
                self.monster_instance_id.as_ref(),
                view.monster_instance_id.as_ref(),
            )
    }
}
