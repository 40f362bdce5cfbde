//! Integration tests for target resolution over stored scenes

use delve_foundation::{Direction, ErrorKind};
use delve_parser::resolve_action;
use delve_storage::{ActorRef, AttackTarget, Command, LookTarget};
use proptest::prelude::*;

use crate::scene::scene;

// =============================================================================
// Move
// =============================================================================

#[test]
fn move_targets_the_stored_neighbor() {
    let mut scene = scene();
    let view = scene.hero_view();

    let action = resolve_action("move north", &view.args()).unwrap();
    assert_eq!(
        action.command,
        Command::Move {
            direction: Direction::North,
            location_instance_id: scene.north,
        }
    );
    assert_eq!(action.location_instance_id, scene.here);
    assert_eq!(action.actor, ActorRef::Character(scene.hero));

    // A bare keyword names no direction.
    let err = resolve_action("move", &view.args()).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnresolvedTarget { .. }));

    let action = resolve_action("move carefully down", &view.args()).unwrap();
    assert_eq!(action.command.target_location(), Some(scene.down));
}

proptest! {
    #[test]
    fn move_succeeds_exactly_for_existing_exits(
        direction in prop::sample::select(Direction::ALL.to_vec()),
    ) {
        let mut scene = scene();
        let view = scene.hero_view();
        let result = resolve_action(&format!("move {direction}"), &view.args());

        match view.location.neighbor(direction) {
            Some(neighbor) => {
                let action = result.unwrap();
                prop_assert_eq!(action.command.target_location(), Some(neighbor));
            }
            None => {
                let err = result.unwrap_err();
                prop_assert!(
                    matches!(err.kind, ErrorKind::UnresolvedTarget { .. }),
                    "unexpected error kind"
                );
            }
        }
    }
}

// =============================================================================
// Look
// =============================================================================

#[test]
fn look_resolution_order() {
    let mut scene = scene();
    let view = scene.hero_view();

    let look = |sentence: &str| resolve_action(sentence, &view.args()).unwrap().command;

    assert!(matches!(
        look("look north at the troll"),
        Command::Look(LookTarget::Location { direction: Some(Direction::North), .. })
    ));
    // No exit east, so names are tried next.
    assert!(matches!(look("look east at the troll"), Command::Look(LookTarget::Monster(id)) if id == scene.troll));
    assert!(matches!(look("look at the lantern"), Command::Look(LookTarget::Object(_))));
    assert!(matches!(
        look("look at rival"),
        Command::Look(LookTarget::Character(id)) if id == scene.rival
    ));
    assert_eq!(
        look("look"),
        Command::Look(LookTarget::Location {
            location_instance_id: scene.here,
            direction: None,
        })
    );
}

#[test]
fn look_ignores_carried_objects() {
    let mut scene = scene();
    let view = scene.hero_view();

    // The troll's club is held, not on the floor, so looking falls back to the troll.
    let action = resolve_action("look at the troll's club", &view.args()).unwrap();
    assert_eq!(action.command, Command::Look(LookTarget::Monster(scene.troll)));
}

// =============================================================================
// Objects
// =============================================================================

#[test]
fn object_commands_use_the_right_sources() {
    let mut scene = scene();
    let view = scene.hero_view();
    let resolve = |sentence: &str| resolve_action(sentence, &view.args());

    assert!(matches!(resolve("stash rope").unwrap().command, Command::Stash { .. }));
    assert!(matches!(resolve("stash iron sword").unwrap().command, Command::Stash { .. }));
    assert!(resolve("stash bread").is_err());

    assert!(matches!(resolve("equip bread").unwrap().command, Command::Equip { .. }));
    assert!(matches!(resolve("equip lantern").unwrap().command, Command::Equip { .. }));
    assert!(resolve("equip iron sword").is_err());

    assert!(matches!(resolve("drop bread").unwrap().command, Command::Drop { .. }));
    assert!(matches!(resolve("drop iron sword").unwrap().command, Command::Drop { .. }));
    assert!(resolve("drop lantern").is_err());
    assert!(resolve("drop club").is_err());
}

// =============================================================================
// Attack
// =============================================================================

#[test]
fn attack_with_equipped_weapon() {
    let mut scene = scene();
    let view = scene.hero_view();

    let action = resolve_action("attack the troll with my iron sword", &view.args()).unwrap();
    let Command::Attack { target, weapon } = action.command else {
        panic!("expected attack");
    };
    assert_eq!(target, AttackTarget::Monster(scene.troll));
    assert!(weapon.is_some());
    assert_eq!(action.command.equipped_object(), weapon);

    // Bread is stashed, not equipped, so it is no weapon.
    let action = resolve_action("attack rival with bread", &view.args()).unwrap();
    assert_eq!(
        action.command,
        Command::Attack {
            target: AttackTarget::Character(scene.rival),
            weapon: None,
        }
    );
}

#[test]
fn monsters_resolve_from_their_own_view() {
    let mut scene = scene();
    let view = scene.view(ActorRef::Monster(scene.troll));
    assert_eq!(view.held.len(), 1);

    let action = resolve_action("attack hero with club", &view.args()).unwrap();
    assert_eq!(action.actor, ActorRef::Monster(scene.troll));
    assert!(matches!(
        action.command,
        Command::Attack { target: AttackTarget::Character(id), weapon: Some(_) } if id == scene.hero
    ));

    // A monster never targets itself.
    assert!(resolve_action("attack troll", &view.args()).is_err());
}
