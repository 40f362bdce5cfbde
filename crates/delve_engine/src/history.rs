//! The action history composer.
//!
//! After an action is performed, every entity it touched is snapshotted into
//! append-only rows tagged with a [`RecordType`]. An [`ActionRecordSet`]
//! bundles an action with those rows, grouped by the location they were
//! taken at. [`Engine::get_action_record_set`](crate::Engine::get_action_record_set)
//! rebuilds the same bundle from stored rows.

use delve_foundation::{ActionId, Error, LocationInstanceId, ObjectInstanceId, RecordType, Result};
use delve_storage::{
    Action, ActionCharacter, ActionCharacterFilter, ActionMonster, ActionMonsterFilter,
    ActionObject, ActionObjectFilter, Actor, ActorRef, CharacterInstanceView, Command, Holder,
    InstanceStore, LocationContext, Lock, LookTarget, MonsterInstanceView, ObjectInstanceView,
    Repository, ViewRepository,
};

/// The acting entity as it was right after the action.
#[derive(Clone, Debug, PartialEq)]
pub enum SourceSnapshot {
    /// A character actor.
    Character(ActionCharacter),
    /// A monster actor.
    Monster(ActionMonster),
}

impl SourceSnapshot {
    /// Returns where the actor was after the action.
    #[must_use]
    pub fn location_instance_id(&self) -> LocationInstanceId {
        match self {
            Self::Character(row) => row.location_instance_id,
            Self::Monster(row) => row.location_instance_id,
        }
    }

    /// Returns the actor's name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Character(row) => &row.name,
            Self::Monster(row) => &row.name,
        }
    }
}

/// Occupant snapshots of one location.
#[derive(Clone, Debug, PartialEq)]
pub struct LocationRecordSet {
    /// The location.
    pub location_instance_id: LocationInstanceId,
    /// Characters present.
    pub characters: Vec<ActionCharacter>,
    /// Monsters present.
    pub monsters: Vec<ActionMonster>,
    /// Objects on the floor.
    pub objects: Vec<ActionObject>,
}

impl LocationRecordSet {
    fn empty(location_instance_id: LocationInstanceId) -> Self {
        Self {
            location_instance_id,
            characters: Vec::new(),
            monsters: Vec::new(),
            objects: Vec::new(),
        }
    }

    /// Returns the total number of occupant rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.characters.len() + self.monsters.len() + self.objects.len()
    }

    /// Returns true if nothing was present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An action together with every snapshot written for it.
#[derive(Clone, Debug, PartialEq)]
pub struct ActionRecordSet {
    /// The action.
    pub action: Action,
    /// The acting entity.
    pub source: SourceSnapshot,
    /// Objects the acting entity held.
    pub source_objects: Vec<ActionObject>,
    /// Occupants of the actor's location after the action.
    pub current_location: LocationRecordSet,
    /// Occupants of the location moved to or looked into.
    pub target_location: Option<LocationRecordSet>,
    /// The targeted character.
    pub target_character: Option<ActionCharacter>,
    /// The targeted monster.
    pub target_monster: Option<ActionMonster>,
    /// The object looked at.
    pub target_object: Option<ActionObject>,
    /// The object stashed.
    pub stashed_object: Option<ActionObject>,
    /// The object equipped, or the weapon used.
    pub equipped_object: Option<ActionObject>,
    /// The object dropped.
    pub dropped_object: Option<ActionObject>,
}

impl ActionRecordSet {
    /// Returns the number of snapshot rows in this set.
    #[must_use]
    pub fn row_count(&self) -> usize {
        1 + self.source_objects.len()
            + self.current_location.len()
            + self.target_location.as_ref().map_or(0, LocationRecordSet::len)
            + usize::from(self.target_character.is_some())
            + usize::from(self.target_monster.is_some())
            + usize::from(self.target_object.is_some())
            + usize::from(self.stashed_object.is_some())
            + usize::from(self.equipped_object.is_some())
            + usize::from(self.dropped_object.is_some())
    }
}

/// Returns the location whose occupants form the "target location" group.
///
/// After a move this is the same location as the current group.
fn target_location_group(action: &Action) -> Option<LocationInstanceId> {
    match action.command {
        Command::Move {
            location_instance_id,
            ..
        }
        | Command::Look(LookTarget::Location {
            location_instance_id,
            direction: Some(_),
        }) => Some(location_instance_id),
        _ => None,
    }
}

/// Persists `action` and snapshots everything it touched.
///
/// `action` must be the one returned by
/// [`perform_action`](crate::perform_action). Only adds rows.
pub(crate) fn record_history<S: InstanceStore + ?Sized>(
    store: &mut S,
    mut action: Action,
    snapshot_held_objects: bool,
) -> Result<ActionRecordSet> {
    Repository::<Action>::create_one(store, &mut action)?;
    let action_id = action.id;

    let actor = Actor::load(store, action.actor, Lock::None)?;
    let actor_location = actor.location_instance_id();
    let source = match &actor {
        Actor::Character(view) => SourceSnapshot::Character(snapshot_character(
            store,
            action_id,
            RecordType::Source,
            view,
        )?),
        Actor::Monster(view) => SourceSnapshot::Monster(snapshot_monster(
            store,
            action_id,
            RecordType::Source,
            view,
        )?),
    };
    let source_objects = if snapshot_held_objects {
        actor
            .held_objects(store)?
            .iter()
            .map(|object| {
                snapshot_object(store, action_id, RecordType::Source, object, actor_location)
            })
            .collect::<Result<Vec<_>>>()?
    } else {
        Vec::new()
    };

    let current_location = snapshot_occupants(store, action_id, action.location_instance_id)?;
    let target_location = target_location_group(&action)
        .map(|target| snapshot_occupants(store, action_id, target))
        .transpose()?;

    let command = action.command;
    let target_character = command
        .target_character()
        .map(|id| {
            let view = ViewRepository::<CharacterInstanceView>::get_view(store, id, Lock::None)?;
            snapshot_character(store, action_id, RecordType::Target, &view)
        })
        .transpose()?;
    let target_monster = command
        .target_monster()
        .map(|id| {
            let view = ViewRepository::<MonsterInstanceView>::get_view(store, id, Lock::None)?;
            snapshot_monster(store, action_id, RecordType::Target, &view)
        })
        .transpose()?;
    let mut object_row = |id: Option<ObjectInstanceId>, record_type: RecordType| {
        id.map(|id| snapshot_object_by_id(store, action_id, record_type, id, actor_location))
            .transpose()
    };
    let target_object = object_row(command.target_object(), RecordType::Target)?;
    let stashed_object = object_row(command.stashed_object(), RecordType::Stashed)?;
    let equipped_object = object_row(command.equipped_object(), RecordType::Equipped)?;
    let dropped_object = object_row(command.dropped_object(), RecordType::Dropped)?;

    Ok(ActionRecordSet {
        action,
        source,
        source_objects,
        current_location,
        target_location,
        target_character,
        target_monster,
        target_object,
        stashed_object,
        equipped_object,
        dropped_object,
    })
}

fn snapshot_character<S: InstanceStore + ?Sized>(
    store: &mut S,
    action_id: ActionId,
    record_type: RecordType,
    view: &CharacterInstanceView,
) -> Result<ActionCharacter> {
    let mut row = ActionCharacter::snapshot(action_id, record_type, view);
    Repository::<ActionCharacter>::create_one(store, &mut row)?;
    Ok(row)
}

fn snapshot_monster<S: InstanceStore + ?Sized>(
    store: &mut S,
    action_id: ActionId,
    record_type: RecordType,
    view: &MonsterInstanceView,
) -> Result<ActionMonster> {
    let mut row = ActionMonster::snapshot(action_id, record_type, view);
    Repository::<ActionMonster>::create_one(store, &mut row)?;
    Ok(row)
}

fn snapshot_object<S: InstanceStore + ?Sized>(
    store: &mut S,
    action_id: ActionId,
    record_type: RecordType,
    view: &ObjectInstanceView,
    at: LocationInstanceId,
) -> Result<ActionObject> {
    let mut row = ActionObject::snapshot(action_id, record_type, view, at);
    Repository::<ActionObject>::create_one(store, &mut row)?;
    Ok(row)
}

/// Snapshots an object wherever it is now: its floor, or its holder's
/// location. An object that is nowhere is recorded at `fallback`.
fn snapshot_object_by_id<S: InstanceStore + ?Sized>(
    store: &mut S,
    action_id: ActionId,
    record_type: RecordType,
    id: ObjectInstanceId,
    fallback: LocationInstanceId,
) -> Result<ActionObject> {
    let view = ViewRepository::<ObjectInstanceView>::get_view(store, id, Lock::None)?;
    let at = match (view.location_instance_id, view.holder()) {
        (Some(location), _) => location,
        (None, Some(Holder::Character(holder))) => {
            ViewRepository::<CharacterInstanceView>::get_view(store, holder, Lock::None)?
                .location_instance_id
        }
        (None, Some(Holder::Monster(holder))) => {
            ViewRepository::<MonsterInstanceView>::get_view(store, holder, Lock::None)?
                .location_instance_id
        }
        (None, None) => fallback,
    };
    snapshot_object(store, action_id, record_type, &view, at)
}

fn snapshot_occupants<S: InstanceStore + ?Sized>(
    store: &mut S,
    action_id: ActionId,
    location_instance_id: LocationInstanceId,
) -> Result<LocationRecordSet> {
    let context = LocationContext::load(store, location_instance_id)?;
    let mut set = LocationRecordSet::empty(location_instance_id);
    for view in &context.characters {
        set.characters
            .push(snapshot_character(store, action_id, RecordType::Occupant, view)?);
    }
    for view in &context.monsters {
        set.monsters
            .push(snapshot_monster(store, action_id, RecordType::Occupant, view)?);
    }
    for view in &context.objects {
        set.objects.push(snapshot_object(
            store,
            action_id,
            RecordType::Occupant,
            view,
            location_instance_id,
        )?);
    }
    Ok(set)
}

/// Rebuilds the record set of a stored action. Never writes.
///
/// # Errors
///
/// Returns `NotFound` if the action does not exist and `Corruption` if its
/// snapshot rows are inconsistent with its command.
pub(crate) fn load_record_set<S: InstanceStore + ?Sized>(
    store: &mut S,
    action_id: ActionId,
) -> Result<ActionRecordSet> {
    let action = Repository::<Action>::get_one(store, action_id, Lock::None)?;
    let command = action.command;

    let characters = |record_type| ActionCharacterFilter {
        action_id: Some(action_id),
        record_type: Some(record_type),
    };
    let monsters = |record_type| ActionMonsterFilter {
        action_id: Some(action_id),
        record_type: Some(record_type),
    };
    let objects = |record_type| ActionObjectFilter {
        action_id: Some(action_id),
        record_type: Some(record_type),
    };

    let source_characters = Repository::<ActionCharacter>::get_many(
        store,
        &characters(RecordType::Source),
        Lock::None,
    )?;
    let source_monsters =
        Repository::<ActionMonster>::get_many(store, &monsters(RecordType::Source), Lock::None)?;
    let source = match (action.actor, source_characters.as_slice(), source_monsters.as_slice()) {
        (ActorRef::Character(id), [row], []) if row.character_instance_id == id => {
            SourceSnapshot::Character(row.clone())
        }
        (ActorRef::Monster(id), [], [row]) if row.monster_instance_id == id => {
            SourceSnapshot::Monster(row.clone())
        }
        _ => {
            return Err(Error::corruption(format!(
                "action {action_id} must have exactly one source row for its actor, found {} character and {} monster rows",
                source_characters.len(),
                source_monsters.len()
            )));
        }
    };
    let source_objects =
        Repository::<ActionObject>::get_many(store, &objects(RecordType::Source), Lock::None)?;

    let current_id = action.location_instance_id;
    let target_id = target_location_group(&action);
    let (current_characters, target_characters) = split_occupants(
        action_id,
        Repository::<ActionCharacter>::get_many(
            store,
            &characters(RecordType::Occupant),
            Lock::None,
        )?,
        |row| row.location_instance_id,
        current_id,
        target_id,
    )?;
    let (current_monsters, target_monsters) = split_occupants(
        action_id,
        Repository::<ActionMonster>::get_many(store, &monsters(RecordType::Occupant), Lock::None)?,
        |row| row.location_instance_id,
        current_id,
        target_id,
    )?;
    let (current_objects, target_objects) = split_occupants(
        action_id,
        Repository::<ActionObject>::get_many(store, &objects(RecordType::Occupant), Lock::None)?,
        |row| row.location_instance_id,
        current_id,
        target_id,
    )?;
    let current_location = LocationRecordSet {
        location_instance_id: current_id,
        characters: current_characters,
        monsters: current_monsters,
        objects: current_objects,
    };
    let target_location = target_id.map(|location_instance_id| LocationRecordSet {
        location_instance_id,
        characters: target_characters,
        monsters: target_monsters,
        objects: target_objects,
    });

    let target_character = singleton(
        action_id,
        "target character",
        command.target_character().is_some(),
        Repository::<ActionCharacter>::get_many(
            store,
            &characters(RecordType::Target),
            Lock::None,
        )?,
    )?;
    let target_monster = singleton(
        action_id,
        "target monster",
        command.target_monster().is_some(),
        Repository::<ActionMonster>::get_many(store, &monsters(RecordType::Target), Lock::None)?,
    )?;
    let mut object_row = |label: &'static str, expected: Option<ObjectInstanceId>, record_type| {
        let rows = Repository::<ActionObject>::get_many(store, &objects(record_type), Lock::None)?;
        singleton(action_id, label, expected.is_some(), rows)
    };
    let target_object = object_row("target object", command.target_object(), RecordType::Target)?;
    let stashed_object =
        object_row("stashed object", command.stashed_object(), RecordType::Stashed)?;
    let equipped_object =
        object_row("equipped object", command.equipped_object(), RecordType::Equipped)?;
    let dropped_object =
        object_row("dropped object", command.dropped_object(), RecordType::Dropped)?;

    Ok(ActionRecordSet {
        action,
        source,
        source_objects,
        current_location,
        target_location,
        target_character,
        target_monster,
        target_object,
        stashed_object,
        equipped_object,
        dropped_object,
    })
}

/// Splits occupant rows of one type into the current and target groups.
///
/// When both groups cover the same location the current group's rows come
/// first, and each group holds half of them.
fn split_occupants<T>(
    action_id: ActionId,
    rows: Vec<T>,
    at: impl Fn(&T) -> LocationInstanceId,
    current: LocationInstanceId,
    target: Option<LocationInstanceId>,
) -> Result<(Vec<T>, Vec<T>)> {
    if let Some(stray) = rows
        .iter()
        .map(&at)
        .find(|location| *location != current && Some(*location) != target)
    {
        return Err(Error::corruption(format!(
            "action {action_id} has an occupant row at unrelated location {stray}"
        )));
    }
    if target == Some(current) {
        if rows.len() % 2 != 0 {
            return Err(Error::corruption(format!(
                "action {action_id} has {} occupant rows for two snapshots of {current}",
                rows.len()
            )));
        }
        let mut current_rows = rows;
        let target_rows = current_rows.split_off(current_rows.len() / 2);
        return Ok((current_rows, target_rows));
    }
    Ok(rows.into_iter().partition(|row| at(row) == current))
}

/// Checks that a role has exactly one row when expected and none otherwise.
fn singleton<T>(
    action_id: ActionId,
    label: &str,
    expected: bool,
    mut rows: Vec<T>,
) -> Result<Option<T>> {
    match (expected, rows.len()) {
        (true, 1) => Ok(rows.pop()),
        (false, 0) => Ok(None),
        (true, found) => Err(Error::corruption(format!(
            "action {action_id} expects one {label} row, found {found}"
        ))),
        (false, found) => Err(Error::corruption(format!(
            "action {action_id} has {found} unexpected {label} rows"
        ))),
    }
}
