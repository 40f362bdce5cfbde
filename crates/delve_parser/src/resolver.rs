//! Per-command target resolution.
//!
//! Each resolver checks the remainder of the sentence against what the actor
//! can see and hold, and produces the matching [`Command`] variant.

use delve_foundation::{CommandKind, Direction, Error, Result};
use delve_storage::{
    Action, Actor, AttackTarget, Command, LocationContext, LookTarget, ObjectInstanceView,
};
use tracing::trace;

use crate::matcher::find_named;
use crate::vocabulary::extract_command;

/// Everything a resolver may look at.
#[derive(Clone, Copy, Debug)]
pub struct ResolveArgs<'a> {
    /// The acting entity.
    pub actor: &'a Actor,
    /// The actor's current location and its occupants.
    pub location: &'a LocationContext,
    /// Objects the actor is holding.
    pub held_objects: &'a [ObjectInstanceView],
}

impl<'a> ResolveArgs<'a> {
    /// Bundles resolver inputs.
    #[must_use]
    pub fn new(
        actor: &'a Actor,
        location: &'a LocationContext,
        held_objects: &'a [ObjectInstanceView],
    ) -> Self {
        Self {
            actor,
            location,
            held_objects,
        }
    }

    fn stashed(&self) -> impl Iterator<Item = &'a ObjectInstanceView> + 'a {
        self.held_objects.iter().filter(|object| object.is_stashed)
    }

    fn equipped(&self) -> impl Iterator<Item = &'a ObjectInstanceView> + 'a {
        self.held_objects.iter().filter(|object| object.is_equipped)
    }
}

/// Resolves a sentence into an unsaved [`Action`].
///
/// # Errors
///
/// Returns `UnknownCommand` if no keyword matches and `UnresolvedTarget` if
/// the command's target cannot be found.
pub fn resolve_action(sentence: &str, args: &ResolveArgs<'_>) -> Result<Action> {
    let parsed = extract_command(sentence)?;
    let text = parsed.remainder.as_str();

    let command = match parsed.command {
        CommandKind::Move => resolve_move(text, args)?,
        CommandKind::Look => resolve_look(text, args),
        CommandKind::Stash => resolve_stash(text, args)?,
        CommandKind::Equip => resolve_equip(text, args)?,
        CommandKind::Drop => resolve_drop(text, args)?,
        CommandKind::Attack => resolve_attack(text, args)?,
    };
    trace!(?command, remainder = text, "sentence_resolved");

    Ok(Action::new(
        args.actor.dungeon_instance_id(),
        args.location.id(),
        args.actor.actor_ref(),
        command,
    ))
}

fn resolve_move(text: &str, args: &ResolveArgs<'_>) -> Result<Command> {
    let direction = Direction::find_in(text)
        .ok_or_else(|| Error::unresolved_target(CommandKind::Move, "no direction given"))?;
    let location_instance_id = args.location.neighbor(direction).ok_or_else(|| {
        Error::unresolved_target(CommandKind::Move, format!("there is no exit {direction}"))
    })?;
    Ok(Command::Move {
        direction,
        location_instance_id,
    })
}

fn resolve_look(text: &str, args: &ResolveArgs<'_>) -> Command {
    let location = args.location;

    if let Some((direction, neighbor)) = Direction::find_in(text)
        .and_then(|direction| location.neighbor(direction).map(|id| (direction, id)))
    {
        return Command::Look(LookTarget::Location {
            location_instance_id: neighbor,
            direction: Some(direction),
        });
    }
    if let Some(object) = find_named(text, &location.objects) {
        return Command::Look(LookTarget::Object(object.id));
    }
    if let Some(monster) = find_named(text, &location.monsters) {
        return Command::Look(LookTarget::Monster(monster.id));
    }
    if let Some(character) = find_named(text, &location.characters) {
        return Command::Look(LookTarget::Character(character.id));
    }

    Command::Look(LookTarget::Location {
        location_instance_id: location.id(),
        direction: None,
    })
}

fn resolve_attack(text: &str, args: &ResolveArgs<'_>) -> Result<Command> {
    let actor = args.actor.actor_ref();
    let monsters = args
        .location
        .monsters
        .iter()
        .filter(|monster| actor.monster() != Some(monster.id));
    let characters = args
        .location
        .characters
        .iter()
        .filter(|character| actor.character() != Some(character.id));

    let target = if let Some(monster) = find_named(text, monsters) {
        AttackTarget::Monster(monster.id)
    } else if let Some(character) = find_named(text, characters) {
        AttackTarget::Character(character.id)
    } else {
        return Err(Error::unresolved_target(
            CommandKind::Attack,
            "there is no one here by that name",
        ));
    };
    let weapon = find_named(text, args.equipped()).map(|object| object.id);

    Ok(Command::Attack { target, weapon })
}

fn resolve_stash(text: &str, args: &ResolveArgs<'_>) -> Result<Command> {
    let object = find_named(text, &args.location.objects)
        .or_else(|| find_named(text, args.equipped()))
        .ok_or_else(|| not_here(CommandKind::Stash))?;
    Ok(Command::Stash {
        object_instance_id: object.id,
    })
}

fn resolve_equip(text: &str, args: &ResolveArgs<'_>) -> Result<Command> {
    let object = find_named(text, &args.location.objects)
        .or_else(|| find_named(text, args.stashed()))
        .ok_or_else(|| not_here(CommandKind::Equip))?;
    Ok(Command::Equip {
        object_instance_id: object.id,
    })
}

fn resolve_drop(text: &str, args: &ResolveArgs<'_>) -> Result<Command> {
    let object = find_named(text, args.stashed())
        .or_else(|| find_named(text, args.equipped()))
        .ok_or_else(|| {
            Error::unresolved_target(CommandKind::Drop, "you are not holding that")
        })?;
    Ok(Command::Drop {
        object_instance_id: object.id,
    })
}

fn not_here(command: CommandKind) -> Error {
    Error::unresolved_target(command, "there is nothing here by that name")
}
