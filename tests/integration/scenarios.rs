//! The core gameplay scenarios, played on the sample dungeon.

use delve_engine::EngineConfig;
use delve_foundation::{ErrorKind, RecordType};
use delve_runtime::Session;
use delve_storage::{
    Action, ActionObject, AttackTarget, Command, Lock, MonsterInstanceFilter, MonsterInstanceView,
    ObjectInstanceView, ViewRepository,
};

fn session() -> Session {
    Session::sample(EngineConfig::default()).unwrap()
}

fn monster_named(session: &Session, name: &str) -> MonsterInstanceView {
    let mut tx = session.store().begin().unwrap();
    ViewRepository::<MonsterInstanceView>::get_views(
        &mut tx,
        &MonsterInstanceFilter {
            dungeon_instance_id: Some(session.dungeon_instance_id()),
            ..MonsterInstanceFilter::default()
        },
        Lock::None,
    )
    .unwrap()
    .into_iter()
    .find(|m| m.name == name)
    .unwrap()
}

#[test]
fn move_north_then_attack_the_goblin() {
    let session = session();
    let entrance = session.location().unwrap();
    let guard_room = entrance.neighbor(delve_foundation::Direction::North).unwrap();

    let records = session.process("move north").unwrap();
    assert_eq!(records.action.command.target_location(), Some(guard_room));
    assert_eq!(records.action.location_instance_id, guard_room);
    assert_eq!(records.current_location.monsters[0].name, "Goblin");
    assert_eq!(session.location().unwrap().id(), guard_room);

    let goblin = monster_named(&session, "Goblin");
    let records = session.process("attack goblin").unwrap();
    assert_eq!(
        records.action.command,
        Command::Attack {
            target: AttackTarget::Monster(goblin.id),
            weapon: None,
        }
    );
    assert_eq!(records.action.location_instance_id, guard_room);
}

#[test]
fn dropping_an_equipped_sword() {
    let session = session();
    let here = session.location().unwrap().id();
    session.process("equip rusty sword").unwrap();

    let records = session.process("drop rusty sword").unwrap();
    let mut tx = session.store().begin().unwrap();
    let sword = ViewRepository::<ObjectInstanceView>::get_view(
        &mut tx,
        records.action.command.dropped_object().unwrap(),
        Lock::None,
    )
    .unwrap();
    assert_eq!(sword.holder(), None);
    assert_eq!(sword.location_instance_id, Some(here));
    assert!(!sword.is_stashed && !sword.is_equipped);

    let tables = session.store().snapshot().unwrap();
    let dropped: Vec<_> = tables
        .table::<ActionObject>()
        .iter()
        .filter(|row| row.action_id == records.action.id && row.record_type == RecordType::Dropped)
        .collect();
    assert_eq!(dropped.len(), 1);
    assert_eq!(dropped[0].name, "Rusty Sword");
}

#[test]
fn unknown_sentence_leaves_no_action() {
    let session = session();
    let err = session.process("xyzzy").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnknownCommand(_)));

    let tables = session.store().snapshot().unwrap();
    assert!(tables.table::<Action>().is_empty());
    assert!(tables.table::<ActionObject>().is_empty());
}
