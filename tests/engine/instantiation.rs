//! Integration tests for dungeon instantiation

use std::collections::HashMap;

use delve_engine::Engine;
use delve_foundation::{Direction, DungeonId, ErrorKind, LocationId, RecordId};
use delve_storage::{
    Character, CharacterInstance, Dungeon, Location, LocationFilter, LocationInstance,
    LocationInstanceFilter, Lock, MonsterInstance, Neighbors, Object, ObjectInstance, Repository,
    Store,
};
use proptest::prelude::*;

use crate::fixture::{install, world};

fn exits(n: usize) -> impl Strategy<Value = Vec<Vec<(usize, usize)>>> {
    prop::collection::vec(prop::collection::vec((0..Direction::ALL.len(), 0..n), 0..4), n)
}

proptest! {
    #[test]
    fn every_exit_stays_inside_the_instance(
        graph in (1usize..8).prop_flat_map(exits),
    ) {
        let store = Store::new();
        let mut tx = store.begin().unwrap();
        let mut dungeon = Dungeon::default();
        Repository::<Dungeon>::create_one(&mut tx, &mut dungeon).unwrap();

        let ids: Vec<LocationId> = graph.iter().map(|_| LocationId::generate()).collect();
        let mut templates = Vec::new();
        for (i, edges) in graph.iter().enumerate() {
            let neighbors = edges
                .iter()
                .fold(Neighbors::new(), |acc, &(d, j)| acc.with(Direction::ALL[d], ids[j]));
            let mut location = Location {
                id: ids[i],
                dungeon_id: dungeon.id,
                name: format!("Room {i}"),
                is_default: i == 0,
                neighbors,
                ..Location::default()
            };
            Repository::<Location>::create_one(&mut tx, &mut location).unwrap();
            templates.push(location);
        }

        let instance = Engine::default().create_dungeon_instance(&mut tx, dungeon.id).unwrap();
        let rows = Repository::<LocationInstance>::get_many(
            &mut tx,
            &LocationInstanceFilter {
                dungeon_instance_id: Some(instance.id),
                ..LocationInstanceFilter::default()
            },
            Lock::None,
        )
        .unwrap();
        prop_assert_eq!(rows.len(), templates.len());

        let by_template: HashMap<_, _> = rows.iter().map(|r| (r.location_id, r)).collect();
        for template in &templates {
            let row = by_template[&template.id];
            prop_assert_eq!(row.neighbors.len(), template.neighbors.len());
            for (direction, neighbor) in template.neighbors.iter() {
                let expected = by_template[&neighbor].id;
                prop_assert_eq!(row.neighbors.get(direction), Some(expected));
            }
        }
    }
}

#[test]
fn monsters_and_objects_are_copied() {
    let world = world();
    let skeleton = world.monster("Skeleton");
    let club = world.object("Bone Club");
    assert_eq!(club.monster_instance_id, Some(skeleton));
    assert!(club.is_equipped);
    assert_eq!(world.object("Lamp").location_instance_id, Some(world.location("Hall")));

    let mut tx = world.begin();
    let monster =
        Repository::<MonsterInstance>::get_one(&mut tx, skeleton, Lock::None).unwrap();
    assert_eq!(monster.location_instance_id, world.location("Crypt"));
    assert_eq!(monster.current, monster.maximum);
}

#[test]
fn two_playthroughs_share_no_rows() {
    let world = world();
    let mut tx = world.begin();
    let second = world
        .engine
        .create_dungeon_instance(&mut tx, world.dungeon_id)
        .unwrap();
    tx.commit().unwrap();
    assert_ne!(second.id, world.dungeon);

    let tables = world.store.snapshot().unwrap();
    assert_eq!(tables.table::<LocationInstance>().len(), 6);
    for row in tables.table::<LocationInstance>().iter() {
        for (_, neighbor) in row.neighbors.iter() {
            let target = tables.table::<LocationInstance>().get(neighbor).unwrap();
            assert_eq!(target.dungeon_instance_id, row.dungeon_instance_id);
        }
    }
    assert_eq!(tables.table::<ObjectInstance>().len(), 6);
}

#[test]
fn character_enters_at_the_default_location_once() {
    let world = world();
    let mut tx = world.begin();
    let hero = Repository::<CharacterInstance>::get_one(&mut tx, world.hero, Lock::None).unwrap();
    assert_eq!(hero.location_instance_id, world.location("Hall"));
    assert_eq!(hero.current, hero.maximum);

    let err = world
        .engine
        .create_character_instance(&mut tx, world.dungeon, hero.character_id)
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Validation(_)));
}

#[test]
fn unknown_dungeon_is_not_found() {
    let store = Store::new();
    let mut tx = store.begin().unwrap();
    let err = Engine::default()
        .create_dungeon_instance(&mut tx, DungeonId::generate())
        .unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn exit_outside_the_dungeon_is_invalid() {
    let store = Store::new();
    let mut tx = store.begin().unwrap();
    let mut dungeon = Dungeon::default();
    Repository::<Dungeon>::create_one(&mut tx, &mut dungeon).unwrap();
    let mut location = Location {
        dungeon_id: dungeon.id,
        name: "Edge".to_string(),
        is_default: true,
        neighbors: Neighbors::new().with(Direction::East, LocationId::generate()),
        ..Location::default()
    };
    Repository::<Location>::create_one(&mut tx, &mut location).unwrap();

    let err = Engine::default()
        .create_dungeon_instance(&mut tx, dungeon.id)
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Validation(_)));
}

#[test]
fn misplaced_object_template_is_invalid() {
    let store = Store::new();
    let mut tx = store.begin().unwrap();
    let (dungeon_id, _) = install(&mut tx);
    let entry = Repository::<Location>::get_many(
        &mut tx,
        &LocationFilter {
            dungeon_id: Some(dungeon_id),
            is_default: Some(true),
        },
        Lock::None,
    )
    .unwrap();
    // On the floor yet flagged as stashed.
    let mut object = Object {
        dungeon_id,
        name: "Ghost Ring".to_string(),
        location_id: Some(entry[0].id),
        is_stashed: true,
        ..Object::default()
    };
    Repository::<Object>::create_one(&mut tx, &mut object).unwrap();

    let err = Engine::default()
        .create_dungeon_instance(&mut tx, dungeon_id)
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Validation(_)));
}

#[test]
fn dungeon_without_entry_admits_no_characters() {
    let store = Store::new();
    let mut tx = store.begin().unwrap();
    let mut dungeon = Dungeon::default();
    Repository::<Dungeon>::create_one(&mut tx, &mut dungeon).unwrap();
    let mut location = Location {
        dungeon_id: dungeon.id,
        ..Location::default()
    };
    Repository::<Location>::create_one(&mut tx, &mut location).unwrap();
    let mut character = Character::default();
    Repository::<Character>::create_one(&mut tx, &mut character).unwrap();

    let engine = Engine::default();
    let instance = engine.create_dungeon_instance(&mut tx, dungeon.id).unwrap();
    let err = engine
        .create_character_instance(&mut tx, instance.id, character.id)
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Validation(_)));
}
