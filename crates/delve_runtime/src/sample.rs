//! A small built-in dungeon for trying Delve out.
//!
//! ```text
//!   Guard Room (goblin, rusty dagger equipped, copper coin stashed)
//!       |
//!   Entrance (rusty sword, torch)  <- characters enter here
//!       |
//!    Cellar (giant rat)
//! ```

use delve_foundation::{
    CharacterId, Direction, DungeonId, LocationId, MonsterId, ObjectId, RecordId, Result,
};
use delve_storage::{
    Attributes, Character, Dungeon, InstanceStore, Location, Monster, Neighbors, Object,
    Repository,
};

/// Template identifiers of the installed sample.
#[derive(Clone, Copy, Debug)]
pub struct Sample {
    /// The sample dungeon.
    pub dungeon_id: DungeonId,
    /// The sample player character.
    pub character_id: CharacterId,
}

/// Writes the sample dungeon templates and one character into `store`.
///
/// # Errors
///
/// Returns any store error.
pub fn install<S: InstanceStore + ?Sized>(store: &mut S) -> Result<Sample> {
    let dungeon_id = DungeonId::generate();
    let entrance = LocationId::generate();
    let guard_room = LocationId::generate();
    let cellar = LocationId::generate();
    let goblin = MonsterId::generate();

    let mut dungeon = Dungeon {
        id: dungeon_id,
        name: "The Sunken Keep".to_string(),
        description: "A half-flooded ruin at the edge of the marsh.".to_string(),
        ..Dungeon::default()
    };
    Repository::<Dungeon>::create_one(store, &mut dungeon)?;

    let locations = [
        (
            entrance,
            "Entrance",
            "A crumbling archway opens onto a damp stone hall.",
            true,
            Neighbors::new()
                .with(Direction::North, guard_room)
                .with(Direction::Down, cellar),
        ),
        (
            guard_room,
            "Guard Room",
            "Broken racks line the walls. Something has been sleeping here.",
            false,
            Neighbors::new().with(Direction::South, entrance),
        ),
        (
            cellar,
            "Cellar",
            "Knee-deep black water. The walls drip.",
            false,
            Neighbors::new().with(Direction::Up, entrance),
        ),
    ];
    for (id, name, description, is_default, neighbors) in locations {
        let mut location = Location {
            id,
            dungeon_id,
            name: name.to_string(),
            description: description.to_string(),
            is_default,
            neighbors,
            ..Location::default()
        };
        Repository::<Location>::create_one(store, &mut location)?;
    }

    let monsters = [
        (
            goblin,
            guard_room,
            "Goblin",
            "A wiry goblin with yellow eyes.",
            Attributes::new(6, 12, 6, 12, 10),
        ),
        (
            MonsterId::generate(),
            cellar,
            "Giant Rat",
            "A rat the size of a dog.",
            Attributes::new(3, 14, 2, 6, 8),
        ),
    ];
    for (id, location_id, name, description, attributes) in monsters {
        let mut monster = Monster {
            id,
            dungeon_id,
            location_id,
            name: name.to_string(),
            description: description.to_string(),
            attributes,
            ..Monster::default()
        };
        Repository::<Monster>::create_one(store, &mut monster)?;
    }

    let objects = [
        (
            "Rusty Sword",
            "Pitted, but it still holds an edge.",
            Some(entrance),
            None,
            false,
            false,
        ),
        ("Torch", "A pitch-soaked torch.", Some(entrance), None, false, false),
        (
            "Rusty Dagger",
            "Short, notched and filthy.",
            None,
            Some(goblin),
            false,
            true,
        ),
        (
            "Copper Coin",
            "Stamped with a king nobody remembers.",
            None,
            Some(goblin),
            true,
            false,
        ),
    ];
    for (name, description, location_id, monster_id, is_stashed, is_equipped) in objects {
        let mut object = Object {
            id: ObjectId::generate(),
            dungeon_id,
            name: name.to_string(),
            description: description.to_string(),
            location_id,
            monster_id,
            is_stashed,
            is_equipped,
            ..Object::default()
        };
        Repository::<Object>::create_one(store, &mut object)?;
    }

    let mut character = Character {
        id: CharacterId::generate(),
        name: "Adventurer".to_string(),
        attributes: Attributes::new(10, 10, 10, 20, 20),
        ..Character::default()
    };
    Repository::<Character>::create_one(store, &mut character)?;

    Ok(Sample {
        dungeon_id,
        character_id: character.id,
    })
}
