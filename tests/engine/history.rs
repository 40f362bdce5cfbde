//! Integration tests for the action history
//!
//! Tests that stored rows rebuild the record set an action produced.

use delve_foundation::{ActionId, CommandKind, ErrorKind, RecordId, RecordType};
use delve_storage::{ActionObject, Lock, ObjectInstanceView, Repository, ViewRepository};

use crate::fixture::world;

#[test]
fn stored_rows_rebuild_the_record_set() {
    let world = world();
    for sentence in [
        "look down",
        "stash lamp",
        "look at the shield",
        "equip lamp",
        "move north",
        "attack ghoul with lamp",
        "drop lamp",
    ] {
        let records = world.play(sentence);

        let mut tx = world.begin();
        let first = world
            .engine
            .get_action_record_set(&mut tx, records.action.id)
            .unwrap();
        let second = world
            .engine
            .get_action_record_set(&mut tx, records.action.id)
            .unwrap();
        assert_eq!(first, records, "{sentence}");
        assert_eq!(second, first, "{sentence}");
        assert_eq!(tx.write_count(), 0);
    }
}

#[test]
fn weapon_is_recorded_as_equipped() {
    let world = world();
    world.play("equip lamp");
    world.play("move north");

    let records = world.play("attack ghoul with lamp");
    let weapon = records.equipped_object.as_ref().unwrap();
    assert_eq!(weapon.record_type, RecordType::Equipped);
    assert_eq!(weapon.name, "Lamp");
    assert_eq!(records.target_monster.as_ref().unwrap().name, "Ghoul");
    // Actor, ghoul occupant, hero occupant, lamp source, ghoul target, lamp weapon.
    assert_eq!(records.row_count(), 6);
}

#[test]
fn actions_are_listed_in_order() {
    let world = world();
    world.play("look");
    world.play("stash shield");
    world.play("move down");

    let mut tx = world.begin();
    let kinds: Vec<_> = world
        .engine
        .list_actions(&mut tx, world.dungeon)
        .unwrap()
        .iter()
        .map(|a| a.command.kind())
        .collect();
    assert_eq!(
        kinds,
        vec![CommandKind::Look, CommandKind::Stash, CommandKind::Move]
    );
}

#[test]
fn unknown_action_is_not_found() {
    let world = world();
    let mut tx = world.begin();
    let err = world
        .engine
        .get_action_record_set(&mut tx, ActionId::generate())
        .unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn unexpected_row_is_corruption() {
    let world = world();
    let records = world.play("look");
    let lamp = world.object_id("Lamp");

    let mut tx = world.begin();
    let view = ViewRepository::<ObjectInstanceView>::get_view(&mut tx, lamp, Lock::None).unwrap();
    // A look never drops anything.
    let mut row = ActionObject::snapshot(
        records.action.id,
        RecordType::Dropped,
        &view,
        records.action.location_instance_id,
    );
    Repository::<ActionObject>::create_one(&mut tx, &mut row).unwrap();

    let err = world
        .engine
        .get_action_record_set(&mut tx, records.action.id)
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Corruption(_)));
}
