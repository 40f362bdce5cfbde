//! A stored scene: a crossroads with exits, occupants and carried objects.

use delve_foundation::{CharacterInstanceId, Direction, LocationInstanceId, MonsterInstanceId};
use delve_parser::ResolveArgs;
use delve_storage::{
    Actor, ActorRef, Carry, Character, CharacterInstance, Dungeon, DungeonInstance, Holder,
    Location, LocationContext, LocationInstance, Lock, Monster, MonsterInstance, Neighbors,
    Object, ObjectInstance, ObjectInstanceView, Repository, Store, Transaction,
};

pub struct Scene {
    pub tx: Transaction,
    pub here: LocationInstanceId,
    pub north: LocationInstanceId,
    pub down: LocationInstanceId,
    pub hero: CharacterInstanceId,
    pub rival: CharacterInstanceId,
    pub troll: MonsterInstanceId,
}

/// What an actor sees and holds, loaded the way the engine loads it.
pub struct View {
    pub actor: Actor,
    pub location: LocationContext,
    pub held: Vec<ObjectInstanceView>,
}

impl View {
    pub fn args(&self) -> ResolveArgs<'_> {
        ResolveArgs::new(&self.actor, &self.location, &self.held)
    }
}

impl Scene {
    pub fn view(&mut self, actor: ActorRef) -> View {
        let actor = Actor::load(&mut self.tx, actor, Lock::None).unwrap();
        let location = LocationContext::load(&mut self.tx, actor.location_instance_id()).unwrap();
        let held = actor.held_objects(&mut self.tx).unwrap();
        View {
            actor,
            location,
            held,
        }
    }

    pub fn hero_view(&mut self) -> View {
        self.view(ActorRef::Character(self.hero))
    }
}

pub fn scene() -> Scene {
    let store = Store::new();
    let mut tx = store.begin().unwrap();

    let mut dungeon = Dungeon::default();
    Repository::<Dungeon>::create_one(&mut tx, &mut dungeon).unwrap();
    let mut instance = DungeonInstance {
        dungeon_id: dungeon.id,
        ..DungeonInstance::default()
    };
    Repository::<DungeonInstance>::create_one(&mut tx, &mut instance).unwrap();

    let mut rooms = Vec::new();
    for name in ["Crossroads", "Bridge", "Pit"] {
        let mut template = Location {
            dungeon_id: dungeon.id,
            name: name.to_string(),
            ..Location::default()
        };
        Repository::<Location>::create_one(&mut tx, &mut template).unwrap();
        let mut room = LocationInstance {
            dungeon_instance_id: instance.id,
            location_id: template.id,
            ..LocationInstance::default()
        };
        Repository::<LocationInstance>::create_one(&mut tx, &mut room).unwrap();
        rooms.push(room);
    }
    let (north, down) = (rooms[1].id, rooms[2].id);
    rooms[0].neighbors = Neighbors::new()
        .with(Direction::North, north)
        .with(Direction::Down, down);
    Repository::<LocationInstance>::update_one(&mut tx, &mut rooms[0]).unwrap();
    let here = rooms[0].id;

    let mut characters = Vec::new();
    for name in ["Hero", "Rival"] {
        let mut template = Character {
            name: name.to_string(),
            ..Character::default()
        };
        Repository::<Character>::create_one(&mut tx, &mut template).unwrap();
        let mut row = CharacterInstance {
            dungeon_instance_id: instance.id,
            character_id: template.id,
            location_instance_id: here,
            ..CharacterInstance::default()
        };
        Repository::<CharacterInstance>::create_one(&mut tx, &mut row).unwrap();
        characters.push(row.id);
    }
    let (hero, rival) = (characters[0], characters[1]);

    let mut template = Monster {
        dungeon_id: dungeon.id,
        location_id: rooms[0].location_id,
        name: "Troll".to_string(),
        ..Monster::default()
    };
    Repository::<Monster>::create_one(&mut tx, &mut template).unwrap();
    let mut troll = MonsterInstance {
        dungeon_instance_id: instance.id,
        monster_id: template.id,
        location_instance_id: here,
        ..MonsterInstance::default()
    };
    Repository::<MonsterInstance>::create_one(&mut tx, &mut troll).unwrap();

    let placements: [(&str, Option<(Holder, Carry)>); 5] = [
        ("Lantern", None),
        ("Rope", None),
        ("Iron Sword", Some((Holder::Character(hero), Carry::Equipped))),
        ("Bread", Some((Holder::Character(hero), Carry::Stashed))),
        ("Club", Some((Holder::Monster(troll.id), Carry::Equipped))),
    ];
    for (name, held) in placements {
        let mut template = Object {
            dungeon_id: dungeon.id,
            name: name.to_string(),
            ..Object::default()
        };
        Repository::<Object>::create_one(&mut tx, &mut template).unwrap();
        let mut row = ObjectInstance {
            dungeon_instance_id: instance.id,
            object_id: template.id,
            ..ObjectInstance::default()
        };
        match held {
            Some((holder, carry)) => row.give_to(holder, carry),
            None => row.place_at(here),
        }
        Repository::<ObjectInstance>::create_one(&mut tx, &mut row).unwrap();
    }

    Scene {
        tx,
        here,
        north,
        down,
        hero,
        rival,
        troll: troll.id,
    }
}
