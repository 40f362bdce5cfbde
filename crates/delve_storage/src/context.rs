//! Per-action read context: the acting entity and its surroundings.

use delve_foundation::{ActorKind, Direction, DungeonInstanceId, LocationInstanceId, Result};

use crate::action::ActorRef;
use crate::instance::{CharacterInstanceFilter, Holder, MonsterInstanceFilter, ObjectInstanceFilter};
use crate::record::Lock;
use crate::repository::{InstanceStore, ViewRepository};
use crate::view::{CharacterInstanceView, LocationInstanceView, MonsterInstanceView, ObjectInstanceView};

/// The entity issuing a command, loaded as a view.
#[derive(Clone, Debug, PartialEq)]
pub enum Actor {
    /// A player character.
    Character(CharacterInstanceView),
    /// A monster.
    Monster(MonsterInstanceView),
}

impl Actor {
    /// Loads the acting entity's view.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the entity or its template is missing.
    pub fn load<S: InstanceStore + ?Sized>(
        store: &mut S,
        actor: ActorRef,
        lock: Lock,
    ) -> Result<Self> {
        Ok(match actor {
            ActorRef::Character(id) => Self::Character(
                ViewRepository::<CharacterInstanceView>::get_view(store, id, lock)?,
            ),
            ActorRef::Monster(id) => {
                Self::Monster(ViewRepository::<MonsterInstanceView>::get_view(store, id, lock)?)
            }
        })
    }

    /// Returns a reference to the acting entity.
    #[must_use]
    pub fn actor_ref(&self) -> ActorRef {
        match self {
            Self::Character(view) => ActorRef::Character(view.id),
            Self::Monster(view) => ActorRef::Monster(view.id),
        }
    }

    /// Returns the kind of actor.
    #[must_use]
    pub fn kind(&self) -> ActorKind {
        self.actor_ref().kind()
    }

    /// Returns the actor as an object holder.
    #[must_use]
    pub fn as_holder(&self) -> Holder {
        match self {
            Self::Character(view) => Holder::Character(view.id),
            Self::Monster(view) => Holder::Monster(view.id),
        }
    }

    /// Returns the actor's name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Character(view) => &view.name,
            Self::Monster(view) => &view.name,
        }
    }

    /// Returns where the actor stands.
    #[must_use]
    pub fn location_instance_id(&self) -> LocationInstanceId {
        match self {
            Self::Character(view) => view.location_instance_id,
            Self::Monster(view) => view.location_instance_id,
        }
    }

    /// Returns the playthrough the actor belongs to.
    #[must_use]
    pub fn dungeon_instance_id(&self) -> DungeonInstanceId {
        match self {
            Self::Character(view) => view.dungeon_instance_id,
            Self::Monster(view) => view.dungeon_instance_id,
        }
    }

    /// Returns true if the actor is holding `object`.
    #[must_use]
    pub fn holds(&self, object: &ObjectInstanceView) -> bool {
        object.holder() == Some(self.as_holder())
    }

    /// Loads every object the actor is holding, stashed or equipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub fn held_objects<S: InstanceStore + ?Sized>(
        &self,
        store: &mut S,
    ) -> Result<Vec<ObjectInstanceView>> {
        let mut filter = ObjectInstanceFilter {
            dungeon_instance_id: Some(self.dungeon_instance_id()),
            ..ObjectInstanceFilter::default()
        };
        match self.as_holder() {
            Holder::Character(id) => filter.character_instance_id = Some(id),
            Holder::Monster(id) => filter.monster_instance_id = Some(id),
        }
        ViewRepository::<ObjectInstanceView>::get_views(store, &filter, Lock::None)
    }
}

/// A location with everything currently in it.
#[derive(Clone, Debug, PartialEq)]
pub struct LocationContext {
    /// The location itself, including its exits.
    pub location: LocationInstanceView,
    /// Characters standing here.
    pub characters: Vec<CharacterInstanceView>,
    /// Monsters standing here.
    pub monsters: Vec<MonsterInstanceView>,
    /// Objects lying on the floor.
    pub objects: Vec<ObjectInstanceView>,
}

impl LocationContext {
    /// Loads a location and its occupants.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the location or a template is missing.
    pub fn load<S: InstanceStore + ?Sized>(
        store: &mut S,
        location_instance_id: LocationInstanceId,
    ) -> Result<Self> {
        let location = ViewRepository::<LocationInstanceView>::get_view(
            store,
            location_instance_id,
            Lock::None,
        )?;
        let dungeon_instance_id = Some(location.dungeon_instance_id);

        let characters = ViewRepository::<CharacterInstanceView>::get_views(
            store,
            &CharacterInstanceFilter {
                dungeon_instance_id,
                location_instance_id: Some(location_instance_id),
                ..CharacterInstanceFilter::default()
            },
            Lock::None,
        )?;
        let monsters = ViewRepository::<MonsterInstanceView>::get_views(
            store,
            &MonsterInstanceFilter {
                dungeon_instance_id,
                location_instance_id: Some(location_instance_id),
            },
            Lock::None,
        )?;
        let objects = ViewRepository::<ObjectInstanceView>::get_views(
            store,
            &ObjectInstanceFilter {
                dungeon_instance_id,
                location_instance_id: Some(location_instance_id),
                ..ObjectInstanceFilter::default()
            },
            Lock::None,
        )?;

        Ok(Self {
            location,
            characters,
            monsters,
            objects,
        })
    }

    /// Returns the location's identifier.
    #[must_use]
    pub fn id(&self) -> LocationInstanceId {
        self.location.id
    }

    /// Returns the exit in `direction`, if any.
    #[must_use]
    pub fn neighbor(&self, direction: Direction) -> Option<LocationInstanceId> {
        self.location.neighbors.get(direction)
    }
}
