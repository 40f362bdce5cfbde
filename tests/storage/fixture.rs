//! A hand-built playthrough: two linked rooms, a hero, a goblin and a lamp.

use delve_foundation::{
    CharacterInstanceId, Direction, DungeonInstanceId, LocationInstanceId, MonsterInstanceId,
    ObjectInstanceId,
};
use delve_storage::{
    Carry, Character, CharacterInstance, Dungeon, DungeonInstance, Holder, Location,
    LocationInstance, Monster, MonsterInstance, Neighbors, Object, ObjectInstance, Repository,
    Store, Transaction,
};

pub struct Ids {
    pub dungeon: DungeonInstanceId,
    pub hall: LocationInstanceId,
    pub vault: LocationInstanceId,
    pub hero: CharacterInstanceId,
    pub goblin: MonsterInstanceId,
    pub lamp: ObjectInstanceId,
    pub coin: ObjectInstanceId,
}

fn location(
    tx: &mut Transaction,
    dungeon: &Dungeon,
    instance: &DungeonInstance,
    name: &str,
) -> (Location, LocationInstance) {
    let mut template = Location {
        dungeon_id: dungeon.id,
        name: name.to_string(),
        ..Location::default()
    };
    Repository::<Location>::create_one(tx, &mut template).unwrap();
    let mut row = LocationInstance {
        dungeon_instance_id: instance.id,
        location_id: template.id,
        ..LocationInstance::default()
    };
    Repository::<LocationInstance>::create_one(tx, &mut row).unwrap();
    (template, row)
}

pub fn seed(tx: &mut Transaction) -> Ids {
    let mut dungeon = Dungeon {
        name: "Test".to_string(),
        ..Dungeon::default()
    };
    Repository::<Dungeon>::create_one(tx, &mut dungeon).unwrap();
    let mut instance = DungeonInstance {
        dungeon_id: dungeon.id,
        ..DungeonInstance::default()
    };
    Repository::<DungeonInstance>::create_one(tx, &mut instance).unwrap();

    let (_, mut hall) = location(tx, &dungeon, &instance, "Hall");
    let (vault_template, mut vault) = location(tx, &dungeon, &instance, "Vault");
    hall.neighbors = Neighbors::new().with(Direction::East, vault.id);
    vault.neighbors = Neighbors::new().with(Direction::West, hall.id);
    Repository::<LocationInstance>::update_one(tx, &mut hall).unwrap();
    Repository::<LocationInstance>::update_one(tx, &mut vault).unwrap();

    let mut character = Character {
        name: "Hero".to_string(),
        ..Character::default()
    };
    Repository::<Character>::create_one(tx, &mut character).unwrap();
    let mut hero = CharacterInstance {
        dungeon_instance_id: instance.id,
        character_id: character.id,
        location_instance_id: hall.id,
        ..CharacterInstance::default()
    };
    Repository::<CharacterInstance>::create_one(tx, &mut hero).unwrap();

    let mut monster = Monster {
        dungeon_id: dungeon.id,
        location_id: vault_template.id,
        name: "Goblin".to_string(),
        ..Monster::default()
    };
    Repository::<Monster>::create_one(tx, &mut monster).unwrap();
    let mut goblin = MonsterInstance {
        dungeon_instance_id: instance.id,
        monster_id: monster.id,
        location_instance_id: vault.id,
        ..MonsterInstance::default()
    };
    Repository::<MonsterInstance>::create_one(tx, &mut goblin).unwrap();

    let mut object = |name: &str, place: &dyn Fn(&mut ObjectInstance)| {
        let mut template = Object {
            dungeon_id: dungeon.id,
            name: name.to_string(),
            ..Object::default()
        };
        Repository::<Object>::create_one(tx, &mut template).unwrap();
        let mut row = ObjectInstance {
            dungeon_instance_id: instance.id,
            object_id: template.id,
            ..ObjectInstance::default()
        };
        place(&mut row);
        Repository::<ObjectInstance>::create_one(tx, &mut row).unwrap();
        row.id
    };
    let lamp = object("Lamp", &|o| o.place_at(hall.id));
    let coin = object("Coin", &|o| {
        o.give_to(Holder::Character(hero.id), Carry::Stashed);
    });

    Ids {
        dungeon: instance.id,
        hall: hall.id,
        vault: vault.id,
        hero: hero.id,
        goblin: goblin.id,
        lamp,
        coin,
    }
}

pub fn seeded_store() -> (Store, Ids) {
    let store = Store::new();
    let mut tx = store.begin().unwrap();
    let ids = seed(&mut tx);
    tx.commit().unwrap();
    (store, ids)
}
