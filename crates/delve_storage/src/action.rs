//! Append-only action history.
//!
//! An [`Action`] is one resolved, performed command. Each action is followed
//! by snapshot rows ([`ActionCharacter`], [`ActionMonster`],
//! [`ActionObject`]) recording every entity it touched, tagged with a
//! [`RecordType`] explaining why the row exists.

use chrono::{DateTime, Utc};
use delve_foundation::{
    ActionCharacterId, ActionId, ActionMonsterId, ActionObjectId, ActorKind, CharacterInstanceId,
    CommandKind, Direction, DungeonInstanceId, LocationInstanceId, MonsterInstanceId,
    ObjectInstanceId, RecordType,
};

use crate::attributes::Attributes;
use crate::record::{Filter, field_matches, impl_record};
use crate::view::{CharacterInstanceView, MonsterInstanceView, ObjectInstanceView};

/// The entity that performed an action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActorRef {
    /// A player character.
    Character(CharacterInstanceId),
    /// A monster.
    Monster(MonsterInstanceId),
}

impl ActorRef {
    /// Returns the kind of actor.
    #[must_use]
    pub const fn kind(self) -> ActorKind {
        match self {
            Self::Character(_) => ActorKind::Character,
            Self::Monster(_) => ActorKind::Monster,
        }
    }

    /// Returns the character instance, if the actor is a character.
    #[must_use]
    pub const fn character(self) -> Option<CharacterInstanceId> {
        match self {
            Self::Character(id) => Some(id),
            Self::Monster(_) => None,
        }
    }

    /// Returns the monster instance, if the actor is a monster.
    #[must_use]
    pub const fn monster(self) -> Option<MonsterInstanceId> {
        match self {
            Self::Character(_) => None,
            Self::Monster(id) => Some(id),
        }
    }
}

/// What a `look` command is looking at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LookTarget {
    /// A location: the current one, or a neighbor in a direction.
    Location {
        /// The location looked at.
        location_instance_id: LocationInstanceId,
        /// The direction looked in, if not the current location.
        direction: Option<Direction>,
    },
    /// An object on the floor.
    Object(ObjectInstanceId),
    /// A monster.
    Monster(MonsterInstanceId),
    /// Another character.
    Character(CharacterInstanceId),
}

/// Who an `attack` command targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackTarget {
    /// A monster.
    Monster(MonsterInstanceId),
    /// A character.
    Character(CharacterInstanceId),
}

/// A fully resolved command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Command {
    /// Move through an exit.
    Move {
        /// The exit taken.
        direction: Direction,
        /// The destination.
        location_instance_id: LocationInstanceId,
    },
    /// Look at something.
    Look(LookTarget),
    /// Put an object in the pack.
    Stash {
        /// The object stashed.
        object_instance_id: ObjectInstanceId,
    },
    /// Wear or wield an object.
    Equip {
        /// The object equipped.
        object_instance_id: ObjectInstanceId,
    },
    /// Drop a held object on the floor.
    Drop {
        /// The object dropped.
        object_instance_id: ObjectInstanceId,
    },
    /// Attack a monster or character.
    Attack {
        /// Who is attacked.
        target: AttackTarget,
        /// The equipped weapon named in the sentence, if any.
        weapon: Option<ObjectInstanceId>,
    },
}

impl Command {
    /// Returns the command's vocabulary kind.
    #[must_use]
    pub const fn kind(&self) -> CommandKind {
        match self {
            Self::Move { .. } => CommandKind::Move,
            Self::Look(_) => CommandKind::Look,
            Self::Stash { .. } => CommandKind::Stash,
            Self::Equip { .. } => CommandKind::Equip,
            Self::Drop { .. } => CommandKind::Drop,
            Self::Attack { .. } => CommandKind::Attack,
        }
    }

    /// Returns the location this command targets.
    #[must_use]
    pub const fn target_location(&self) -> Option<LocationInstanceId> {
        match self {
            Self::Move {
                location_instance_id,
                ..
            }
            | Self::Look(LookTarget::Location {
                location_instance_id,
                ..
            }) => Some(*location_instance_id),
            _ => None,
        }
    }

    /// Returns the direction this command targets.
    #[must_use]
    pub const fn target_direction(&self) -> Option<Direction> {
        match self {
            Self::Move { direction, .. } => Some(*direction),
            Self::Look(LookTarget::Location { direction, .. }) => *direction,
            _ => None,
        }
    }

    /// Returns the character this command targets.
    #[must_use]
    pub const fn target_character(&self) -> Option<CharacterInstanceId> {
        match self {
            Self::Look(LookTarget::Character(id))
            | Self::Attack {
                target: AttackTarget::Character(id),
                ..
            } => Some(*id),
            _ => None,
        }
    }

    /// Returns the monster this command targets.
    #[must_use]
    pub const fn target_monster(&self) -> Option<MonsterInstanceId> {
        match self {
            Self::Look(LookTarget::Monster(id))
            | Self::Attack {
                target: AttackTarget::Monster(id),
                ..
            } => Some(*id),
            _ => None,
        }
    }

    /// Returns the object looked at.
    #[must_use]
    pub const fn target_object(&self) -> Option<ObjectInstanceId> {
        match self {
            Self::Look(LookTarget::Object(id)) => Some(*id),
            _ => None,
        }
    }

    /// Returns the object stashed.
    #[must_use]
    pub const fn stashed_object(&self) -> Option<ObjectInstanceId> {
        match self {
            Self::Stash { object_instance_id } => Some(*object_instance_id),
            _ => None,
        }
    }

    /// Returns the object equipped, or the weapon used in an attack.
    #[must_use]
    pub const fn equipped_object(&self) -> Option<ObjectInstanceId> {
        match self {
            Self::Equip { object_instance_id } => Some(*object_instance_id),
            Self::Attack { weapon, .. } => *weapon,
            _ => None,
        }
    }

    /// Returns the object dropped.
    #[must_use]
    pub const fn dropped_object(&self) -> Option<ObjectInstanceId> {
        match self {
            Self::Drop { object_instance_id } => Some(*object_instance_id),
            _ => None,
        }
    }
}

/// One resolved, performed command. Immutable once created.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Action {
    /// Identifier, assigned on create.
    pub id: ActionId,
    /// Playthrough the action happened in.
    pub dungeon_instance_id: DungeonInstanceId,
    /// Where the actor stood; the destination once a move is performed.
    pub location_instance_id: LocationInstanceId,
    /// Who performed it.
    pub actor: ActorRef,
    /// What was done, with resolved targets.
    pub command: Command,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl Action {
    /// Creates an unsaved action.
    #[must_use]
    pub fn new(
        dungeon_instance_id: DungeonInstanceId,
        location_instance_id: LocationInstanceId,
        actor: ActorRef,
        command: Command,
    ) -> Self {
        Self {
            id: ActionId::nil(),
            dungeon_instance_id,
            location_instance_id,
            actor,
            command,
            created_at: DateTime::default(),
        }
    }
}

/// Filter for [`Action`] records.
#[derive(Clone, Debug, Default)]
pub struct ActionFilter {
    /// Playthrough.
    pub dungeon_instance_id: Option<DungeonInstanceId>,
    /// Actor.
    pub actor: Option<ActorRef>,
}

impl Filter<Action> for ActionFilter {
    fn matches(&self, record: &Action) -> bool {
        field_matches(self.dungeon_instance_id.as_ref(), &record.dungeon_instance_id)
            && field_matches(self.actor.as_ref(), &record.actor)
    }
}

impl_record!(append_only Action, ActionId, ActionFilter, "action");

/// A character as it was right after an action.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionCharacter {
    /// Identifier.
    pub id: ActionCharacterId,
    /// Owning action.
    pub action_id: ActionId,
    /// Why this row exists.
    pub record_type: RecordType,
    /// The character snapshotted.
    pub character_instance_id: CharacterInstanceId,
    /// Where the character was.
    pub location_instance_id: LocationInstanceId,
    /// Name at the time.
    pub name: String,
    /// Current attributes at the time.
    pub current: Attributes,
    /// Maximum attributes at the time.
    pub maximum: Attributes,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl ActionCharacter {
    /// Snapshots a character view.
    #[must_use]
    pub fn snapshot(
        action_id: ActionId,
        record_type: RecordType,
        view: &CharacterInstanceView,
    ) -> Self {
        Self {
            id: ActionCharacterId::nil(),
            action_id,
            record_type,
            character_instance_id: view.id,
            location_instance_id: view.location_instance_id,
            name: view.name.clone(),
            current: view.current,
            maximum: view.maximum,
            created_at: DateTime::default(),
        }
    }
}

/// Filter for [`ActionCharacter`] records.
#[derive(Clone, Debug, Default)]
pub struct ActionCharacterFilter {
    /// Owning action.
    pub action_id: Option<ActionId>,
    /// Role tag.
    pub record_type: Option<RecordType>,
}

impl Filter<ActionCharacter> for ActionCharacterFilter {
    fn matches(&self, record: &ActionCharacter) -> bool {
        field_matches(self.action_id.as_ref(), &record.action_id)
            && field_matches(self.record_type.as_ref(), &record.record_type)
    }
}

impl_record!(append_only ActionCharacter, ActionCharacterId, ActionCharacterFilter, "action character");

/// A monster as it was right after an action.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionMonster {
    /// Identifier.
    pub id: ActionMonsterId,
    /// Owning action.
    pub action_id: ActionId,
    /// Why this row exists.
    pub record_type: RecordType,
    /// The monster snapshotted.
    pub monster_instance_id: MonsterInstanceId,
    /// Where the monster was.
    pub location_instance_id: LocationInstanceId,
    /// Name at the time.
    pub name: String,
    /// Description at the time.
    pub description: String,
    /// Current attributes at the time.
    pub current: Attributes,
    /// Maximum attributes at the time.
    pub maximum: Attributes,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl ActionMonster {
    /// Snapshots a monster view.
    #[must_use]
    pub fn snapshot(action_id: ActionId, record_type: RecordType, view: &MonsterInstanceView) -> Self {
        Self {
            id: ActionMonsterId::nil(),
            action_id,
            record_type,
            monster_instance_id: view.id,
            location_instance_id: view.location_instance_id,
            name: view.name.clone(),
            description: view.description.clone(),
            current: view.current,
            maximum: view.maximum,
            created_at: DateTime::default(),
        }
    }
}

/// Filter for [`ActionMonster`] records.
#[derive(Clone, Debug, Default)]
pub struct ActionMonsterFilter {
    /// Owning action.
    pub action_id: Option<ActionId>,
    /// Role tag.
    pub record_type: Option<RecordType>,
}

impl Filter<ActionMonster> for ActionMonsterFilter {
    fn matches(&self, record: &ActionMonster) -> bool {
        field_matches(self.action_id.as_ref(), &record.action_id)
            && field_matches(self.record_type.as_ref(), &record.record_type)
    }
}

impl_record!(append_only ActionMonster, ActionMonsterId, ActionMonsterFilter, "action monster");

/// An object as it was right after an action.
///
/// `location_instance_id` is where the object was: its floor, or its
/// holder's location when carried.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionObject {
    /// Identifier.
    pub id: ActionObjectId,
    /// Owning action.
    pub action_id: ActionId,
    /// Why this row exists.
    pub record_type: RecordType,
    /// The object snapshotted.
    pub object_instance_id: ObjectInstanceId,
    /// Where the object was.
    pub location_instance_id: LocationInstanceId,
    /// Character holder at the time.
    pub character_instance_id: Option<CharacterInstanceId>,
    /// Monster holder at the time.
    pub monster_instance_id: Option<MonsterInstanceId>,
    /// Stashed at the time.
    pub is_stashed: bool,
    /// Equipped at the time.
    pub is_equipped: bool,
    /// Name at the time.
    pub name: String,
    /// Description at the time.
    pub description: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl ActionObject {
    /// Snapshots an object view found at `location_instance_id`.
    #[must_use]
    pub fn snapshot(
        action_id: ActionId,
        record_type: RecordType,
        view: &ObjectInstanceView,
        location_instance_id: LocationInstanceId,
    ) -> Self {
        Self {
            id: ActionObjectId::nil(),
            action_id,
            record_type,
            object_instance_id: view.id,
            location_instance_id,
            character_instance_id: view.character_instance_id,
            monster_instance_id: view.monster_instance_id,
            is_stashed: view.is_stashed,
            is_equipped: view.is_equipped,
            name: view.name.clone(),
            description: view.description.clone(),
            created_at: DateTime::default(),
        }
    }
}

/// Filter for [`ActionObject`] records.
#[derive(Clone, Debug, Default)]
pub struct ActionObjectFilter {
    /// Owning action.
    pub action_id: Option<ActionId>,
    /// Role tag.
    pub record_type: Option<RecordType>,
}

impl Filter<ActionObject> for ActionObjectFilter {
    fn matches(&self, record: &ActionObject) -> bool {
        field_matches(self.action_id.as_ref(), &record.action_id)
            && field_matches(self.record_type.as_ref(), &record.record_type)
    }
}

impl_record!(append_only ActionObject, ActionObjectId, ActionObjectFilter, "action object");
