//! Dungeon instantiation.
//!
//! Copies a dungeon template into a fresh playthrough. Location instances
//! are created first with no exits, then wired up once every template has an
//! instance to point at.

use std::collections::HashMap;

use delve_foundation::{
    CharacterId, DungeonId, DungeonInstanceId, Error, LocationId, LocationInstanceId, MonsterId,
    MonsterInstanceId, Result,
};
use delve_storage::{
    Carry, Character, CharacterInstance, CharacterInstanceFilter, Dungeon, DungeonInstance,
    Holder, InstanceStore, Location, LocationFilter, LocationInstance, LocationInstanceFilter,
    Lock, Monster, MonsterFilter, MonsterInstance, Object, ObjectFilter, ObjectInstance,
    Repository,
};
use tracing::info;

/// Creates a playable copy of a dungeon template.
///
/// # Errors
///
/// Returns `NotFound` if the dungeon does not exist and `Validation` if a
/// template refers outside the dungeon or places an object inconsistently.
/// Nothing is committed here; the caller's transaction decides.
pub(crate) fn create_dungeon_instance<S: InstanceStore + ?Sized>(
    store: &mut S,
    dungeon_id: DungeonId,
) -> Result<DungeonInstance> {
    let dungeon = Repository::<Dungeon>::get_one(store, dungeon_id, Lock::None)?;
    let mut dungeon_instance = DungeonInstance {
        dungeon_id,
        ..DungeonInstance::default()
    };
    Repository::<DungeonInstance>::create_one(store, &mut dungeon_instance)?;
    let dungeon_instance_id = dungeon_instance.id;

    let locations = create_locations(store, dungeon_id, dungeon_instance_id)?;
    let monsters = create_monsters(store, dungeon_id, dungeon_instance_id, &locations)?;
    let objects = create_objects(store, dungeon_id, dungeon_instance_id, &locations, &monsters)?;

    info!(
        dungeon = %dungeon.name,
        dungeon_instance = %dungeon_instance_id,
        locations = locations.len(),
        monsters = monsters.len(),
        objects,
        "dungeon_instance_created"
    );
    Ok(dungeon_instance)
}

fn create_locations<S: InstanceStore + ?Sized>(
    store: &mut S,
    dungeon_id: DungeonId,
    dungeon_instance_id: DungeonInstanceId,
) -> Result<HashMap<LocationId, LocationInstanceId>> {
    let templates = Repository::<Location>::get_many(
        store,
        &LocationFilter {
            dungeon_id: Some(dungeon_id),
            ..LocationFilter::default()
        },
        Lock::None,
    )?;

    // Pass 1: one instance per template, exits unset.
    let mut created = Vec::with_capacity(templates.len());
    let mut lookup = HashMap::with_capacity(templates.len());
    for template in &templates {
        let mut instance = LocationInstance {
            dungeon_instance_id,
            location_id: template.id,
            ..LocationInstance::default()
        };
        Repository::<LocationInstance>::create_one(store, &mut instance)?;
        lookup.insert(template.id, instance.id);
        created.push(instance);
    }

    // Pass 2: map every template exit through the lookup.
    for (template, mut instance) in templates.iter().zip(created) {
        instance.neighbors = template.neighbors.try_map(|direction, neighbor| {
            lookup.get(&neighbor).copied().ok_or_else(|| {
                Error::validation(format!(
                    "location {:?} leads {direction} to {neighbor}, which is outside dungeon {dungeon_id}",
                    template.name
                ))
            })
        })?;
        Repository::<LocationInstance>::update_one(store, &mut instance)?;
    }

    Ok(lookup)
}

fn create_monsters<S: InstanceStore + ?Sized>(
    store: &mut S,
    dungeon_id: DungeonId,
    dungeon_instance_id: DungeonInstanceId,
    locations: &HashMap<LocationId, LocationInstanceId>,
) -> Result<HashMap<MonsterId, MonsterInstanceId>> {
    let templates = Repository::<Monster>::get_many(
        store,
        &MonsterFilter {
            dungeon_id: Some(dungeon_id),
        },
        Lock::None,
    )?;

    let mut lookup = HashMap::with_capacity(templates.len());
    for template in &templates {
        let location_instance_id = locations.get(&template.location_id).copied().ok_or_else(|| {
            Error::validation(format!(
                "monster {:?} starts at {}, which is outside dungeon {dungeon_id}",
                template.name, template.location_id
            ))
        })?;
        let mut instance = MonsterInstance {
            dungeon_instance_id,
            monster_id: template.id,
            location_instance_id,
            current: template.attributes,
            maximum: template.attributes,
            ..MonsterInstance::default()
        };
        Repository::<MonsterInstance>::create_one(store, &mut instance)?;
        lookup.insert(template.id, instance.id);
    }
    Ok(lookup)
}

fn create_objects<S: InstanceStore + ?Sized>(
    store: &mut S,
    dungeon_id: DungeonId,
    dungeon_instance_id: DungeonInstanceId,
    locations: &HashMap<LocationId, LocationInstanceId>,
    monsters: &HashMap<MonsterId, MonsterInstanceId>,
) -> Result<usize> {
    let templates = Repository::<Object>::get_many(
        store,
        &ObjectFilter {
            dungeon_id: Some(dungeon_id),
        },
        Lock::None,
    )?;

    for template in &templates {
        let mut instance = ObjectInstance {
            dungeon_instance_id,
            object_id: template.id,
            ..ObjectInstance::default()
        };
        let misplaced = || {
            Error::validation(format!(
                "object {:?} must start on the floor or carried (stashed or equipped) by one monster of dungeon {dungeon_id}",
                template.name
            ))
        };
        match (template.location_id, template.monster_id) {
            (Some(location_id), None) if !template.is_stashed && !template.is_equipped => {
                let location = locations.get(&location_id).copied().ok_or_else(misplaced)?;
                instance.place_at(location);
            }
            (None, Some(monster_id)) => {
                let monster = monsters.get(&monster_id).copied().ok_or_else(misplaced)?;
                let carry = match (template.is_stashed, template.is_equipped) {
                    (true, false) => Carry::Stashed,
                    (false, true) => Carry::Equipped,
                    _ => return Err(misplaced()),
                };
                instance.give_to(Holder::Monster(monster), carry);
            }
            _ => return Err(misplaced()),
        }
        instance.check_placement()?;
        Repository::<ObjectInstance>::create_one(store, &mut instance)?;
    }
    Ok(templates.len())
}

/// Places a character in a playthrough at the dungeon's entry location.
///
/// # Errors
///
/// Returns `NotFound` if the playthrough or character does not exist and
/// `Validation` if the character is already there or the dungeon has no
/// entry location.
pub(crate) fn create_character_instance<S: InstanceStore + ?Sized>(
    store: &mut S,
    dungeon_instance_id: DungeonInstanceId,
    character_id: CharacterId,
) -> Result<CharacterInstance> {
    let dungeon_instance =
        Repository::<DungeonInstance>::get_one(store, dungeon_instance_id, Lock::None)?;
    let character = Repository::<Character>::get_one(store, character_id, Lock::None)?;

    let existing = Repository::<CharacterInstance>::get_many(
        store,
        &CharacterInstanceFilter {
            dungeon_instance_id: Some(dungeon_instance_id),
            character_id: Some(character_id),
            ..CharacterInstanceFilter::default()
        },
        Lock::None,
    )?;
    if !existing.is_empty() {
        return Err(Error::validation(format!(
            "character {:?} is already in dungeon instance {dungeon_instance_id}",
            character.name
        )));
    }

    let entry = Repository::<Location>::get_many(
        store,
        &LocationFilter {
            dungeon_id: Some(dungeon_instance.dungeon_id),
            is_default: Some(true),
        },
        Lock::None,
    )?
    .into_iter()
    .next()
    .ok_or_else(|| {
        Error::validation(format!(
            "dungeon {} has no default location",
            dungeon_instance.dungeon_id
        ))
    })?;
    let location_instance = Repository::<LocationInstance>::get_many(
        store,
        &LocationInstanceFilter {
            dungeon_instance_id: Some(dungeon_instance_id),
            location_id: Some(entry.id),
        },
        Lock::None,
    )?
    .into_iter()
    .next()
    .ok_or_else(|| Error::not_found("location instance", entry.id))?;

    let mut instance = CharacterInstance {
        dungeon_instance_id,
        character_id,
        location_instance_id: location_instance.id,
        current: character.attributes,
        maximum: character.attributes,
        ..CharacterInstance::default()
    };
    Repository::<CharacterInstance>::create_one(store, &mut instance)?;

    info!(
        character = %character.name,
        character_instance = %instance.id,
        dungeon_instance = %dungeon_instance_id,
        location = %entry.name,
        "character_instance_created"
    );
    Ok(instance)
}
