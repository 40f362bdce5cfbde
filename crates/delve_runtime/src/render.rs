//! Text rendering for REPL output.

use std::fmt::Write;

use delve_engine::{ActionRecordSet, LocationRecordSet};
use delve_foundation::{CharacterInstanceId, Error, RecordType};
use delve_storage::{Action, ActorRef, Attributes, Command, LocationContext, LookTarget};

/// Help text listing sentences and meta commands.
pub const HELP: &str = "\
\x1b[1mSENTENCES:\x1b[0m
    move <direction>            Walk through an exit
    look [direction|thing]      Look around, through an exit, or at something
    stash <object>              Pick up an object, or unequip one, into your pack
    equip <object>              Wear or wield an object
    drop <object>               Put a held object down
    attack <target> [weapon]    Attack a monster or character

\x1b[1mMETA COMMANDS:\x1b[0m
    :where                      Describe your surroundings
    :actions                    List this playthrough's actions
    :history <action-id>        Show the stored record of an action
    :save <path>                Save the game
    :load <path>                Load a saved game
    :help                       Show this help
    :quit                       Leave (Ctrl+D also works)";

/// Describes a location as seen by `viewer`.
#[must_use]
pub fn render_location(context: &LocationContext, viewer: CharacterInstanceId) -> String {
    let mut out = String::new();
    let location = &context.location;
    let _ = writeln!(out, "\x1b[1m{}\x1b[0m", location.name);
    if !location.description.is_empty() {
        let _ = writeln!(out, "{}", location.description);
    }

    let exits: Vec<_> = location
        .neighbors
        .iter()
        .map(|(direction, _)| direction.name())
        .collect();
    if exits.is_empty() {
        out.push_str("There are no exits.\n");
    } else {
        let _ = writeln!(out, "Exits: {}", exits.join(", "));
    }

    let objects: Vec<_> = context.objects.iter().map(|o| o.name.as_str()).collect();
    if !objects.is_empty() {
        let _ = writeln!(out, "On the floor: {}", objects.join(", "));
    }
    for monster in &context.monsters {
        let _ = writeln!(out, "{} is here.", monster.name);
    }
    for character in context.characters.iter().filter(|c| c.id != viewer) {
        let _ = writeln!(out, "{} is here.", character.name);
    }
    out.trim_end().to_string()
}

fn health(current: &Attributes, maximum: &Attributes) -> String {
    format!("health {}/{}", current.health, maximum.health)
}

fn occupants(set: &LocationRecordSet) -> Vec<&str> {
    set.characters
        .iter()
        .map(|c| c.name.as_str())
        .chain(set.monsters.iter().map(|m| m.name.as_str()))
        .chain(set.objects.iter().map(|o| o.name.as_str()))
        .collect()
}

/// Narrates a processed action from its record set.
#[must_use]
pub fn render_action(records: &ActionRecordSet) -> String {
    let object_name = |row: &Option<delve_storage::ActionObject>| {
        row.as_ref().map_or("it", |o| o.name.as_str()).to_string()
    };

    match records.action.command {
        Command::Move { direction, .. } => format!("You move {direction}."),
        Command::Look(LookTarget::Location {
            direction: Some(direction),
            ..
        }) => {
            let seen = records
                .target_location
                .as_ref()
                .map(occupants)
                .unwrap_or_default();
            if seen.is_empty() {
                format!("You look {direction} and see nothing of note.")
            } else {
                format!("You look {direction} and see: {}.", seen.join(", "))
            }
        }
        Command::Look(LookTarget::Location { direction: None, .. }) => {
            "You look around.".to_string()
        }
        Command::Look(LookTarget::Object(_)) => match &records.target_object {
            Some(object) => format!("{}: {}", object.name, object.description),
            None => "You see nothing special.".to_string(),
        },
        Command::Look(LookTarget::Monster(_)) => match &records.target_monster {
            Some(monster) => format!(
                "{}: {} ({})",
                monster.name,
                monster.description,
                health(&monster.current, &monster.maximum)
            ),
            None => "You see nothing special.".to_string(),
        },
        Command::Look(LookTarget::Character(_)) => match &records.target_character {
            Some(character) => format!(
                "{} ({})",
                character.name,
                health(&character.current, &character.maximum)
            ),
            None => "You see nothing special.".to_string(),
        },
        Command::Stash { .. } => {
            format!("You stash the {}.", object_name(&records.stashed_object))
        }
        Command::Equip { .. } => {
            format!("You equip the {}.", object_name(&records.equipped_object))
        }
        Command::Drop { .. } => {
            format!("You drop the {}.", object_name(&records.dropped_object))
        }
        Command::Attack { weapon, .. } => {
            let target = records
                .target_monster
                .as_ref()
                .map(|m| m.name.as_str())
                .or_else(|| records.target_character.as_ref().map(|c| c.name.as_str()))
                .unwrap_or("nothing");
            match weapon {
                Some(_) => format!(
                    "You attack {target} with the {}.",
                    object_name(&records.equipped_object)
                ),
                None => format!("You attack {target}."),
            }
        }
    }
}

/// Lists actions, one per line.
#[must_use]
pub fn render_actions(actions: &[Action]) -> String {
    if actions.is_empty() {
        return "No actions yet.".to_string();
    }
    let mut out = String::new();
    for action in actions {
        let actor = match action.actor {
            ActorRef::Character(_) => "character",
            ActorRef::Monster(_) => "monster",
        };
        let _ = writeln!(
            out,
            "{}  {}  {:<6}  {actor}",
            action.created_at.format("%H:%M:%S"),
            action.id,
            action.command.kind().keyword()
        );
    }
    out.trim_end().to_string()
}

/// Lists every snapshot row of a stored action.
#[must_use]
pub fn render_history(records: &ActionRecordSet) -> String {
    let mut out = String::new();
    let action = &records.action;
    let _ = writeln!(
        out,
        "\x1b[1maction {}\x1b[0m: {} by {} at {}",
        action.id,
        action.command.kind(),
        records.source.name(),
        action.created_at.to_rfc3339()
    );

    let mut row = |record_type: RecordType, kind: &str, name: &str| {
        let _ = writeln!(out, "  {:<24} {kind:<9} {name}", record_type.name());
    };
    for object in &records.source_objects {
        row(object.record_type, "object", &object.name);
    }
    let groups = std::iter::once(&records.current_location).chain(&records.target_location);
    for group in groups {
        for character in &group.characters {
            row(character.record_type, "character", &character.name);
        }
        for monster in &group.monsters {
            row(monster.record_type, "monster", &monster.name);
        }
        for object in &group.objects {
            row(object.record_type, "object", &object.name);
        }
    }
    if let Some(character) = &records.target_character {
        row(character.record_type, "character", &character.name);
    }
    if let Some(monster) = &records.target_monster {
        row(monster.record_type, "monster", &monster.name);
    }
    for object in [
        &records.target_object,
        &records.stashed_object,
        &records.equipped_object,
        &records.dropped_object,
    ]
    .into_iter()
    .flatten()
    {
        row(object.record_type, "object", &object.name);
    }
    let _ = write!(out, "  {} rows", records.row_count());
    out
}

/// Formats an error with its context.
#[must_use]
pub fn render_error(error: &Error) -> String {
    match &error.context {
        Some(context) => format!("Error: {error}\n{context}").trim_end().to_string(),
        None => format!("Error: {error}"),
    }
}
