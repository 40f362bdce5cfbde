//! Integration tests for action processing
//!
//! Tests the state change each command makes and what a failure leaves behind.

use delve_engine::{Engine, EngineConfig, SourceSnapshot, perform_action};
use delve_foundation::{Direction, ErrorKind, RecordType};
use delve_storage::{
    Action, ActionCharacter, ActionObject, Actor, ActorRef, CharacterInstance,
    CharacterInstanceView, Command, Holder, LocationContext, Lock, MonsterInstanceView, Repository,
    ViewRepository,
};

use crate::fixture::world;

fn hero_location(world: &crate::fixture::World) -> delve_foundation::LocationInstanceId {
    let mut tx = world.begin();
    ViewRepository::<CharacterInstanceView>::get_view(&mut tx, world.hero, Lock::None)
        .unwrap()
        .location_instance_id
}

// =============================================================================
// Move
// =============================================================================

#[test]
fn move_relocates_the_character() {
    let world = world();
    let armory = world.location("Armory");

    let records = world.play("move north");

    assert_eq!(hero_location(&world), armory);
    assert_eq!(records.action.location_instance_id, armory);
    assert_eq!(
        records.action.command,
        Command::Move {
            direction: Direction::North,
            location_instance_id: armory,
        }
    );
    assert_eq!(records.source.location_instance_id(), armory);

    // Both groups show the armory as the hero found it: the hero and the ghoul.
    let current = &records.current_location;
    assert_eq!(current.location_instance_id, armory);
    assert_eq!(current.characters.len(), 1);
    assert_eq!(current.monsters[0].name, "Ghoul");
    assert!(current.objects.is_empty());
    assert_eq!(records.target_location.as_ref(), Some(current));

    let mut tx = world.begin();
    let stored = world
        .engine
        .get_action_record_set(&mut tx, records.action.id)
        .unwrap();
    assert_eq!(stored, records);
}

#[test]
fn performed_move_carries_the_destination() {
    let world = world();
    let hall = world.location("Hall");
    let armory = world.location("Armory");
    let mut tx = world.begin();

    let actor = Actor::load(&mut tx, ActorRef::Character(world.hero), Lock::None).unwrap();
    let location = LocationContext::load(&mut tx, hall).unwrap();
    let action = Action::new(
        world.dungeon,
        hall,
        actor.actor_ref(),
        Command::Move {
            direction: Direction::North,
            location_instance_id: armory,
        },
    );

    let performed = perform_action(&mut tx, &actor, &action, &location).unwrap();
    assert_eq!(performed.location_instance_id, armory);
    assert_eq!(performed.command, action.command);

    // Commands that stay put come back unchanged.
    let look = Action::new(
        world.dungeon,
        armory,
        actor.actor_ref(),
        Command::Look(delve_storage::LookTarget::Location {
            location_instance_id: armory,
            direction: None,
        }),
    );
    let location = LocationContext::load(&mut tx, armory).unwrap();
    assert_eq!(perform_action(&mut tx, &actor, &look, &location).unwrap(), look);
}

#[test]
fn move_without_exit_writes_nothing() {
    let world = world();
    let mut tx = world.begin();

    let err = world
        .engine
        .process_character_action(&mut tx, world.dungeon, world.hero, "move west")
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnresolvedTarget { .. }));
    assert_eq!(
        err.context.as_ref().and_then(|c| c.sentence.as_deref()),
        Some("move west")
    );
    assert_eq!(tx.write_count(), 0);
}

#[test]
fn stale_origin_is_rejected() {
    let world = world();
    let crypt = world.location("Crypt");
    let armory = world.location("Armory");
    let mut tx = world.begin();

    let actor = Actor::load(&mut tx, ActorRef::Character(world.hero), Lock::None).unwrap();
    let location = LocationContext::load(&mut tx, actor.location_instance_id()).unwrap();
    // Claims the hero set out from the crypt, which is not where the hero stands.
    let action = Action::new(
        world.dungeon,
        crypt,
        actor.actor_ref(),
        Command::Move {
            direction: Direction::North,
            location_instance_id: armory,
        },
    );

    let err = perform_action(&mut tx, &actor, &action, &location).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Validation(_)));
}

// =============================================================================
// Objects
// =============================================================================

#[test]
fn stash_then_equip_then_drop() {
    let world = world();
    let hall = world.location("Hall");

    let records = world.play("stash the lamp");
    let lamp = world.object("Lamp");
    assert_eq!(lamp.holder(), Some(Holder::Character(world.hero)));
    assert!(lamp.is_stashed);
    let row = records.stashed_object.as_ref().unwrap();
    assert_eq!(row.record_type, RecordType::Stashed);
    assert_eq!(row.location_instance_id, hall);
    assert!(row.is_stashed);

    let records = world.play("equip lamp");
    let lamp = world.object("Lamp");
    assert!(lamp.is_equipped && !lamp.is_stashed);
    assert!(records.equipped_object.as_ref().unwrap().is_equipped);

    let records = world.play("drop lamp");
    let lamp = world.object("Lamp");
    assert_eq!(lamp.location_instance_id, Some(hall));
    assert_eq!(lamp.holder(), None);
    let row = records.dropped_object.as_ref().unwrap();
    assert_eq!(row.record_type, RecordType::Dropped);
    assert_eq!(row.location_instance_id, hall);
    assert!(!row.is_stashed && !row.is_equipped);
}

#[test]
fn held_objects_are_source_rows() {
    let world = world();
    world.play("stash lamp");
    world.play("equip shield");

    let records = world.play("look");
    let mut names: Vec<_> = records.source_objects.iter().map(|o| o.name.as_str()).collect();
    names.sort_unstable();
    assert_eq!(names, vec!["Lamp", "Shield"]);
    assert!(
        records
            .source_objects
            .iter()
            .all(|o| o.record_type == RecordType::Source)
    );
    assert!(records.current_location.objects.is_empty());
}

#[test]
fn held_object_snapshots_can_be_disabled() {
    let mut world = world();
    world.play("stash lamp");
    world.engine = Engine::new(EngineConfig::new().with_snapshot_held_objects(false));

    let records = world.play("look");
    assert!(records.source_objects.is_empty());
}

// =============================================================================
// Look and Attack
// =============================================================================

#[test]
fn attack_changes_nothing_but_is_recorded() {
    let world = world();
    world.play("move north");
    let ghoul = world.monster("Ghoul");

    let records = world.play("attack the ghoul");
    assert_eq!(records.action.command.target_monster(), Some(ghoul));
    let target = records.target_monster.as_ref().unwrap();
    assert_eq!(target.record_type, RecordType::Target);

    let mut tx = world.begin();
    let view = ViewRepository::<MonsterInstanceView>::get_view(&mut tx, ghoul, Lock::None).unwrap();
    assert_eq!(view.current, view.maximum);
}

#[test]
fn look_into_neighbor_snapshots_its_occupants() {
    let world = world();
    let records = world.play("look down");

    assert_eq!(hero_location(&world), world.location("Hall"));
    let crypt = records.target_location.as_ref().unwrap();
    assert_eq!(crypt.monsters[0].name, "Skeleton");
    // The skeleton's club is carried, so it is not a floor occupant.
    assert!(crypt.objects.is_empty());
}

// =============================================================================
// Rejections
// =============================================================================

#[test]
fn overlong_sentence_is_rejected_before_resolution() {
    let world = world();
    let engine = Engine::new(EngineConfig::new().with_max_sentence_length(10));
    let mut tx = world.begin();

    let err = engine
        .process_character_action(&mut tx, world.dungeon, world.hero, "look at the lamp")
        .unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::SentenceTooLong { length: 16, limit: 10 }
    ));
    assert_eq!(tx.write_count(), 0);
}

#[test]
fn actor_must_belong_to_the_dungeon_instance() {
    let world = world();
    let mut tx = world.begin();
    let other = world
        .engine
        .create_dungeon_instance(&mut tx, world.dungeon_id)
        .unwrap();

    let err = world
        .engine
        .process_character_action(&mut tx, other.id, world.hero, "look")
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Validation(_)));
}

#[test]
fn rollback_leaves_no_rows() {
    let world = world();
    let mut tx = world.begin();
    world
        .engine
        .process_character_action(&mut tx, world.dungeon, world.hero, "stash lamp")
        .unwrap();
    assert!(tx.write_count() > 0);
    tx.rollback();

    let tables = world.store.snapshot().unwrap();
    assert!(tables.table::<Action>().is_empty());
    assert!(tables.table::<ActionCharacter>().is_empty());
    assert!(tables.table::<ActionObject>().is_empty());
    let hero = tables.table::<CharacterInstance>().get(world.hero).unwrap();
    assert_eq!(hero.location_instance_id, world.location("Hall"));
    assert_eq!(world.object("Lamp").location_instance_id, Some(world.location("Hall")));
}

#[test]
fn source_row_names_the_actor() {
    let world = world();
    let records = world.play("look");
    match &records.source {
        SourceSnapshot::Character(row) => {
            assert_eq!(row.character_instance_id, world.hero);
            assert_eq!(row.record_type, RecordType::Source);
            assert_eq!(row.name, "Hero");
        }
        SourceSnapshot::Monster(_) => panic!("hero should be a character source"),
    }
}
