//! The engine facade.

use delve_foundation::{
    ActionId, CharacterId, CharacterInstanceId, DungeonId, DungeonInstanceId, Error, ErrorKind,
    MonsterInstanceId, Result,
};
use delve_parser::{ResolveArgs, resolve_action};
use delve_storage::{
    Action, ActionFilter, Actor, ActorRef, CharacterInstance, DungeonInstance, InstanceStore,
    LocationContext, Lock, Repository,
};
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::history::{ActionRecordSet, load_record_set, record_history};
use crate::instance;
use crate::perform::perform_action;

/// Processes sentences and manages playthroughs against an instance store.
///
/// The engine holds no state besides its configuration. Every method runs
/// inside the caller's transaction and never commits or rolls back.
#[derive(Clone, Debug, Default)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    /// Creates an engine with the given configuration.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Returns the engine configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Resolves, performs and records a character's sentence.
    ///
    /// # Errors
    ///
    /// Returns resolution errors before anything is written. Any later error
    /// leaves partial writes in the transaction, which the caller must roll
    /// back.
    pub fn process_character_action<S: InstanceStore + ?Sized>(
        &self,
        store: &mut S,
        dungeon_instance_id: DungeonInstanceId,
        character_instance_id: CharacterInstanceId,
        sentence: &str,
    ) -> Result<ActionRecordSet> {
        self.process_action(
            store,
            dungeon_instance_id,
            ActorRef::Character(character_instance_id),
            sentence,
        )
    }

    /// Resolves, performs and records a monster's sentence.
    ///
    /// # Errors
    ///
    /// As [`Engine::process_character_action`]. Monsters cannot move, stash,
    /// equip or drop.
    pub fn process_monster_action<S: InstanceStore + ?Sized>(
        &self,
        store: &mut S,
        dungeon_instance_id: DungeonInstanceId,
        monster_instance_id: MonsterInstanceId,
        sentence: &str,
    ) -> Result<ActionRecordSet> {
        self.process_action(
            store,
            dungeon_instance_id,
            ActorRef::Monster(monster_instance_id),
            sentence,
        )
    }

    fn process_action<S: InstanceStore + ?Sized>(
        &self,
        store: &mut S,
        dungeon_instance_id: DungeonInstanceId,
        actor_ref: ActorRef,
        sentence: &str,
    ) -> Result<ActionRecordSet> {
        self.run_action(store, dungeon_instance_id, actor_ref, sentence)
            .map_err(|mut err| {
                let context = err.context.take().unwrap_or_default().with_sentence(sentence);
                err.with_context(context)
            })
    }

    fn run_action<S: InstanceStore + ?Sized>(
        &self,
        store: &mut S,
        dungeon_instance_id: DungeonInstanceId,
        actor_ref: ActorRef,
        sentence: &str,
    ) -> Result<ActionRecordSet> {
        let length = sentence.chars().count();
        if length > self.config.max_sentence_length {
            return Err(Error::new(ErrorKind::SentenceTooLong {
                length,
                limit: self.config.max_sentence_length,
            }));
        }

        let actor = Actor::load(store, actor_ref, Lock::None)?;
        if actor.dungeon_instance_id() != dungeon_instance_id {
            return Err(Error::validation(format!(
                "{} is not in dungeon instance {dungeon_instance_id}",
                actor.name()
            )));
        }
        let location = LocationContext::load(store, actor.location_instance_id())?;
        let held_objects = actor.held_objects(store)?;

        let action = resolve_action(
            sentence,
            &ResolveArgs::new(&actor, &location, &held_objects),
        )?;
        debug!(
            actor = actor.name(),
            command = %action.command.kind(),
            location = %location.location.name,
            "action_resolved"
        );

        let action = perform_action(store, &actor, &action, &location)
            .map_err(|err| err.with_frame("perform_action"))?;
        let records = record_history(store, action, self.config.snapshot_held_objects)
            .map_err(|err| err.with_frame("record_history"))?;

        info!(
            action = %records.action.id,
            command = %records.action.command.kind(),
            actor = actor.name(),
            dungeon_instance = %dungeon_instance_id,
            rows = records.row_count(),
            "action_processed"
        );
        Ok(records)
    }

    /// Rebuilds the record set of a stored action from its rows alone.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown action and `Corruption` if its rows
    /// are inconsistent.
    pub fn get_action_record_set<S: InstanceStore + ?Sized>(
        &self,
        store: &mut S,
        action_id: ActionId,
    ) -> Result<ActionRecordSet> {
        load_record_set(store, action_id)
            .map_err(|err| err.with_frame(format!("get_action_record_set {action_id}")))
    }

    /// Lists the actions of a playthrough in the order they happened.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub fn list_actions<S: InstanceStore + ?Sized>(
        &self,
        store: &mut S,
        dungeon_instance_id: DungeonInstanceId,
    ) -> Result<Vec<Action>> {
        Repository::<Action>::get_many(
            store,
            &ActionFilter {
                dungeon_instance_id: Some(dungeon_instance_id),
                ..ActionFilter::default()
            },
            Lock::None,
        )
    }

    /// Creates a playable copy of a dungeon template.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown dungeon and `Validation` if its
    /// templates are inconsistent. Partial instances remain in the
    /// transaction until the caller rolls back.
    pub fn create_dungeon_instance<S: InstanceStore + ?Sized>(
        &self,
        store: &mut S,
        dungeon_id: DungeonId,
    ) -> Result<DungeonInstance> {
        instance::create_dungeon_instance(store, dungeon_id)
            .map_err(|err| err.with_frame(format!("create_dungeon_instance {dungeon_id}")))
    }

    /// Places a character at the entry location of a playthrough.
    ///
    /// # Errors
    ///
    /// Returns `Validation` if the character is already in the playthrough
    /// or the dungeon has no entry location.
    pub fn create_character_instance<S: InstanceStore + ?Sized>(
        &self,
        store: &mut S,
        dungeon_instance_id: DungeonInstanceId,
        character_id: CharacterId,
    ) -> Result<CharacterInstance> {
        instance::create_character_instance(store, dungeon_instance_id, character_id)
            .map_err(|err| err.with_frame(format!("create_character_instance {character_id}")))
    }
}
