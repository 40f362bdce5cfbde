//! The action performer.
//!
//! Applies the single state mutation a resolved command implies. Runs inside
//! the caller's transaction and never commits or rolls back.

use delve_foundation::{
    CharacterInstanceId, CommandKind, Error, LocationInstanceId, ObjectInstanceId, Result,
};
use delve_storage::{
    Action, Actor, Carry, CharacterInstance, Command, Holder, InstanceStore, LocationContext,
    LocationInstance, Lock, ObjectInstance, Repository,
};
use tracing::debug;

/// Performs a resolved action and returns it as it should be recorded.
///
/// `move`, `stash`, `equip` and `drop` are only supported for characters.
/// `look` and `attack` change nothing. After a `move` the returned action's
/// location is the destination.
///
/// # Errors
///
/// Returns `Unsupported` for monster-initiated mutations, `Validation` if a
/// precondition fails, and any store error unchanged.
pub fn perform_action<S: InstanceStore + ?Sized>(
    store: &mut S,
    actor: &Actor,
    action: &Action,
    location: &LocationContext,
) -> Result<Action> {
    match action.command {
        Command::Look(_) | Command::Attack { .. } => {}
        Command::Move {
            location_instance_id,
            ..
        } => {
            let character = character_actor(actor, CommandKind::Move)?;
            move_character(store, character, action.location_instance_id, location_instance_id)?;
            return Ok(Action {
                location_instance_id,
                ..action.clone()
            });
        }
        Command::Stash { object_instance_id } => {
            let character = character_actor(actor, CommandKind::Stash)?;
            take_object(store, character, location, object_instance_id, Carry::Stashed)?;
        }
        Command::Equip { object_instance_id } => {
            let character = character_actor(actor, CommandKind::Equip)?;
            take_object(store, character, location, object_instance_id, Carry::Equipped)?;
        }
        Command::Drop { object_instance_id } => {
            let character = character_actor(actor, CommandKind::Drop)?;
            drop_object(store, character, location.id(), object_instance_id)?;
        }
    }
    Ok(action.clone())
}

fn character_actor(actor: &Actor, command: CommandKind) -> Result<CharacterInstanceId> {
    match actor {
        Actor::Character(view) => Ok(view.id),
        Actor::Monster(_) => Err(Error::unsupported(command, actor.kind())),
    }
}

fn move_character<S: InstanceStore + ?Sized>(
    store: &mut S,
    character_instance_id: CharacterInstanceId,
    from: LocationInstanceId,
    to: LocationInstanceId,
) -> Result<()> {
    let mut character =
        Repository::<CharacterInstance>::get_one(store, character_instance_id, Lock::ForUpdate)?;
    if character.location_instance_id != from {
        return Err(Error::validation(format!(
            "character instance {character_instance_id} is no longer at {from}"
        )));
    }
    let target = Repository::<LocationInstance>::get_one(store, to, Lock::None)?;
    if target.dungeon_instance_id != character.dungeon_instance_id {
        return Err(Error::validation(format!(
            "location instance {to} is outside dungeon instance {}",
            character.dungeon_instance_id
        )));
    }

    character.location_instance_id = to;
    Repository::<CharacterInstance>::update_one(store, &mut character)?;
    debug!(character = %character_instance_id, %from, %to, "character_moved");
    Ok(())
}

fn take_object<S: InstanceStore + ?Sized>(
    store: &mut S,
    character_instance_id: CharacterInstanceId,
    location: &LocationContext,
    object_instance_id: ObjectInstanceId,
    carry: Carry,
) -> Result<()> {
    let mut object =
        Repository::<ObjectInstance>::get_one(store, object_instance_id, Lock::ForUpdate)?;
    if object.dungeon_instance_id != location.location.dungeon_instance_id {
        return Err(Error::validation(format!(
            "object instance {object_instance_id} is outside dungeon instance {}",
            location.location.dungeon_instance_id
        )));
    }
    let holder = Holder::Character(character_instance_id);
    let on_floor = object.location_instance_id == Some(location.id());
    if !on_floor && object.holder() != Some(holder) {
        return Err(Error::validation(format!(
            "object instance {object_instance_id} is neither here nor held"
        )));
    }

    object.give_to(holder, carry);
    object.check_placement()?;
    Repository::<ObjectInstance>::update_one(store, &mut object)?;
    debug!(
        character = %character_instance_id,
        object = %object_instance_id,
        ?carry,
        "object_taken"
    );
    Ok(())
}

fn drop_object<S: InstanceStore + ?Sized>(
    store: &mut S,
    character_instance_id: CharacterInstanceId,
    location_instance_id: LocationInstanceId,
    object_instance_id: ObjectInstanceId,
) -> Result<()> {
    let mut object =
        Repository::<ObjectInstance>::get_one(store, object_instance_id, Lock::ForUpdate)?;
    if object.holder() != Some(Holder::Character(character_instance_id)) {
        return Err(Error::validation(format!(
            "object instance {object_instance_id} is not held by character instance {character_instance_id}"
        )));
    }

    object.place_at(location_instance_id);
    object.check_placement()?;
    Repository::<ObjectInstance>::update_one(store, &mut object)?;
    debug!(
        character = %character_instance_id,
        object = %object_instance_id,
        location = %location_instance_id,
        "object_dropped"
    );
    Ok(())
}
