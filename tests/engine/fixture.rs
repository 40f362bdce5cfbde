//! A template dungeon instantiated through the engine.
//!
//! ```text
//!   Armory (ghoul)
//!     |
//!   Hall (lamp, shield)  <- entry
//!     |
//!   Crypt (skeleton with bone club)
//! ```

use delve_engine::Engine;
use delve_foundation::{
    CharacterInstanceId, Direction, DungeonId, DungeonInstanceId, LocationId, LocationInstanceId,
    MonsterId, MonsterInstanceId, ObjectInstanceId, RecordId,
};
use delve_storage::{
    Attributes, Character, Dungeon, Location, LocationInstanceFilter, LocationInstanceView, Lock,
    Monster, MonsterInstanceFilter, MonsterInstanceView, Neighbors, Object, ObjectInstanceFilter,
    ObjectInstanceView, Repository, Store, Transaction, ViewRepository,
};

pub struct World {
    pub store: Store,
    pub engine: Engine,
    pub dungeon_id: DungeonId,
    pub dungeon: DungeonInstanceId,
    pub hero: CharacterInstanceId,
}

impl World {
    pub fn begin(&self) -> Transaction {
        self.store.begin().unwrap()
    }

    /// Processes a hero sentence in its own committed transaction.
    pub fn play(&self, sentence: &str) -> delve_engine::ActionRecordSet {
        let mut tx = self.begin();
        let records = self
            .engine
            .process_character_action(&mut tx, self.dungeon, self.hero, sentence)
            .unwrap();
        tx.commit().unwrap();
        records
    }

    pub fn location(&self, name: &str) -> LocationInstanceId {
        let mut tx = self.begin();
        ViewRepository::<LocationInstanceView>::get_views(
            &mut tx,
            &LocationInstanceFilter {
                dungeon_instance_id: Some(self.dungeon),
                ..LocationInstanceFilter::default()
            },
            Lock::None,
        )
        .unwrap()
        .into_iter()
        .find(|l| l.name == name)
        .unwrap()
        .id
    }

    pub fn monster(&self, name: &str) -> MonsterInstanceId {
        let mut tx = self.begin();
        ViewRepository::<MonsterInstanceView>::get_views(
            &mut tx,
            &MonsterInstanceFilter {
                dungeon_instance_id: Some(self.dungeon),
                ..MonsterInstanceFilter::default()
            },
            Lock::None,
        )
        .unwrap()
        .into_iter()
        .find(|m| m.name == name)
        .unwrap()
        .id
    }

    pub fn object(&self, name: &str) -> ObjectInstanceView {
        let mut tx = self.begin();
        ViewRepository::<ObjectInstanceView>::get_views(
            &mut tx,
            &ObjectInstanceFilter {
                dungeon_instance_id: Some(self.dungeon),
                ..ObjectInstanceFilter::default()
            },
            Lock::None,
        )
        .unwrap()
        .into_iter()
        .find(|o| o.name == name)
        .unwrap()
    }

    pub fn object_id(&self, name: &str) -> ObjectInstanceId {
        self.object(name).id
    }
}

/// Writes the dungeon templates and returns the dungeon id and hero template.
pub fn install(tx: &mut Transaction) -> (DungeonId, Character) {
    let dungeon_id = DungeonId::generate();
    let hall = LocationId::generate();
    let armory = LocationId::generate();
    let crypt = LocationId::generate();
    let skeleton = MonsterId::generate();

    let mut dungeon = Dungeon {
        id: dungeon_id,
        name: "Barrow".to_string(),
        ..Dungeon::default()
    };
    Repository::<Dungeon>::create_one(tx, &mut dungeon).unwrap();

    for (id, name, is_default, neighbors) in [
        (
            hall,
            "Hall",
            true,
            Neighbors::new()
                .with(Direction::North, armory)
                .with(Direction::Down, crypt),
        ),
        (armory, "Armory", false, Neighbors::new().with(Direction::South, hall)),
        (crypt, "Crypt", false, Neighbors::new().with(Direction::Up, hall)),
    ] {
        let mut location = Location {
            id,
            dungeon_id,
            name: name.to_string(),
            is_default,
            neighbors,
            ..Location::default()
        };
        Repository::<Location>::create_one(tx, &mut location).unwrap();
    }

    for (id, location_id, name) in [
        (MonsterId::generate(), armory, "Ghoul"),
        (skeleton, crypt, "Skeleton"),
    ] {
        let mut monster = Monster {
            id,
            dungeon_id,
            location_id,
            name: name.to_string(),
            attributes: Attributes::new(5, 8, 5, 10, 10),
            ..Monster::default()
        };
        Repository::<Monster>::create_one(tx, &mut monster).unwrap();
    }

    for (name, location_id, monster_id) in [
        ("Lamp", Some(hall), None),
        ("Shield", Some(hall), None),
        ("Bone Club", None, Some(skeleton)),
    ] {
        let mut object = Object {
            dungeon_id,
            name: name.to_string(),
            location_id,
            monster_id,
            is_equipped: monster_id.is_some(),
            ..Object::default()
        };
        Repository::<Object>::create_one(tx, &mut object).unwrap();
    }

    let mut character = Character {
        name: "Hero".to_string(),
        attributes: Attributes::new(10, 10, 10, 20, 20),
        ..Character::default()
    };
    Repository::<Character>::create_one(tx, &mut character).unwrap();

    (dungeon_id, character)
}

pub fn world() -> World {
    let store = Store::new();
    let engine = Engine::default();
    let mut tx = store.begin().unwrap();
    let (dungeon_id, character) = install(&mut tx);
    let instance = engine.create_dungeon_instance(&mut tx, dungeon_id).unwrap();
    let hero = engine
        .create_character_instance(&mut tx, instance.id, character.id)
        .unwrap();
    tx.commit().unwrap();

    World {
        store,
        engine,
        dungeon_id,
        dungeon: instance.id,
        hero: hero.id,
    }
}
