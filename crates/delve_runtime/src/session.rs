//! Session state for the REPL.
//!
//! A session owns a [`Store`] and the engine, and plays one character in one
//! dungeon instance. Every line runs in its own transaction: it commits when
//! the line succeeds and rolls back when it fails, so a failed sentence never
//! leaves an action or a mutation behind.

use std::path::{Path, PathBuf};

use delve_engine::{ActionRecordSet, Engine, EngineConfig};
use delve_foundation::{ActionId, CharacterInstanceId, DungeonInstanceId, Error, Result};
use delve_storage::{
    Action, CharacterInstance, CharacterInstanceView, LocationContext, Lock, Store, Tables,
    Transaction, ViewRepository,
};
use tracing::{debug, info};

use crate::{sample, serialize};

/// A REPL meta command, written with a leading `:`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MetaCommand {
    /// Lists commands.
    Help,
    /// Describes the player's location.
    Where,
    /// Shows the stored record set of one action.
    History(ActionId),
    /// Lists the actions of the playthrough.
    Actions,
    /// Saves committed state to a file.
    Save(PathBuf),
    /// Replaces committed state with a file's contents.
    Load(PathBuf),
    /// Leaves the REPL.
    Quit,
}

impl MetaCommand {
    /// Names of all meta commands, for completion and help.
    pub const NAMES: [&'static str; 7] = [
        ":help",
        ":where",
        ":history",
        ":actions",
        ":save",
        ":load",
        ":quit",
    ];

    /// Parses a meta command. Returns `None` if `line` is a sentence.
    ///
    /// # Errors
    ///
    /// Returns `UnknownCommand` for an unknown name and `Validation` for a
    /// missing or malformed argument.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        let Some(rest) = line.strip_prefix(':') else {
            return Ok(None);
        };
        let (name, argument) = match rest.split_once(char::is_whitespace) {
            Some((name, argument)) => (name, argument.trim()),
            None => (rest, ""),
        };

        let command = match name {
            "help" | "h" | "?" => Self::Help,
            "where" | "w" => Self::Where,
            "actions" => Self::Actions,
            "quit" | "q" | "exit" => Self::Quit,
            "history" => Self::History(
                require(name, argument)?
                    .parse()
                    .map_err(|e| {
                        Error::validation(format!("invalid action id {argument:?}: {e}"))
                    })?,
            ),
            "save" => Self::Save(PathBuf::from(require(name, argument)?)),
            "load" => Self::Load(PathBuf::from(require(name, argument)?)),
            _ => return Err(Error::unknown_command(line)),
        };
        Ok(Some(command))
    }
}

fn require<'a>(name: &str, argument: &'a str) -> Result<&'a str> {
    if argument.is_empty() {
        Err(Error::validation(format!(":{name} requires an argument")))
    } else {
        Ok(argument)
    }
}

/// What executing one line produced.
#[derive(Debug)]
pub enum Outcome {
    /// The line was blank.
    Nothing,
    /// A sentence was processed.
    Action(ActionRecordSet),
    /// A stored action was loaded.
    History(ActionRecordSet),
    /// The player's surroundings.
    Location(LocationContext),
    /// The playthrough's actions, oldest first.
    Actions(Vec<Action>),
    /// Committed state was written to a file.
    Saved(PathBuf),
    /// Committed state was replaced from a file.
    Loaded(PathBuf),
    /// Help was requested.
    Help,
    /// The user asked to leave.
    Quit,
}

/// Session state for an interactive REPL session.
#[derive(Debug)]
pub struct Session {
    store: Store,
    engine: Engine,
    dungeon_instance_id: DungeonInstanceId,
    character_instance_id: CharacterInstanceId,
}

impl Session {
    /// Creates a session playing the built-in sample dungeon.
    ///
    /// # Errors
    ///
    /// Returns an error if instantiating the sample fails.
    pub fn sample(config: EngineConfig) -> Result<Self> {
        let store = Store::new();
        let engine = Engine::new(config);

        let mut tx = store.begin()?;
        let created = sample::install(&mut tx).and_then(|sample| {
            let dungeon = engine.create_dungeon_instance(&mut tx, sample.dungeon_id)?;
            let character =
                engine.create_character_instance(&mut tx, dungeon.id, sample.character_id)?;
            Ok((dungeon.id, character.id))
        });
        let (dungeon_instance_id, character_instance_id) = finish(tx, created)?;

        Ok(Self {
            store,
            engine,
            dungeon_instance_id,
            character_instance_id,
        })
    }

    /// Creates a session over previously saved tables.
    ///
    /// The first character instance in the tables becomes the player.
    ///
    /// # Errors
    ///
    /// Returns `Validation` if the tables hold no character instance.
    pub fn from_tables(tables: Tables, config: EngineConfig) -> Result<Self> {
        let (dungeon_instance_id, character_instance_id) = player(&tables)?;
        Ok(Self {
            store: Store::from_tables(tables),
            engine: Engine::new(config),
            dungeon_instance_id,
            character_instance_id,
        })
    }

    /// Creates a session from a save file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be loaded or holds no character
    /// instance.
    pub fn open<P: AsRef<Path>>(path: P, config: EngineConfig) -> Result<Self> {
        Self::from_tables(serialize::load_from_file(path)?, config)
    }

    /// Returns the store.
    #[must_use]
    pub const fn store(&self) -> &Store {
        &self.store
    }

    /// Returns the engine.
    #[must_use]
    pub const fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Returns the dungeon instance being played.
    #[must_use]
    pub const fn dungeon_instance_id(&self) -> DungeonInstanceId {
        self.dungeon_instance_id
    }

    /// Returns the character being played.
    #[must_use]
    pub const fn character_instance_id(&self) -> CharacterInstanceId {
        self.character_instance_id
    }

    /// Runs `f` in a fresh transaction, committing on success.
    fn within<T>(&self, f: impl FnOnce(&mut Transaction) -> Result<T>) -> Result<T> {
        let mut tx = self.store.begin()?;
        let result = f(&mut tx);
        finish(tx, result)
    }

    /// Processes a sentence for the player's character.
    ///
    /// # Errors
    ///
    /// Returns the engine's error. Nothing is committed in that case.
    pub fn process(&self, sentence: &str) -> Result<ActionRecordSet> {
        self.within(|tx| {
            self.engine.process_character_action(
                tx,
                self.dungeon_instance_id,
                self.character_instance_id,
                sentence,
            )
        })
    }

    /// Loads the player's surroundings.
    ///
    /// # Errors
    ///
    /// Returns an error if the player or their location is missing.
    pub fn location(&self) -> Result<LocationContext> {
        self.within(|tx| {
            let character = ViewRepository::<CharacterInstanceView>::get_view(
                tx,
                self.character_instance_id,
                Lock::None,
            )?;
            LocationContext::load(tx, character.location_instance_id)
        })
    }

    /// Lists the actions of the playthrough.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub fn actions(&self) -> Result<Vec<Action>> {
        self.within(|tx| self.engine.list_actions(tx, self.dungeon_instance_id))
    }

    /// Rebuilds the stored record set of an action.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or `Corruption` from the engine.
    pub fn record_set(&self, action_id: ActionId) -> Result<ActionRecordSet> {
        self.within(|tx| self.engine.get_action_record_set(tx, action_id))
    }

    /// Saves committed state to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        serialize::save_to_file(&self.store, path)
    }

    /// Replaces committed state with a save file and plays its first
    /// character.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be loaded or holds no character
    /// instance. The session is unchanged in that case.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let tables = serialize::load_from_file(path)?;
        let (dungeon_instance_id, character_instance_id) = player(&tables)?;
        self.store.restore(tables)?;
        self.dungeon_instance_id = dungeon_instance_id;
        self.character_instance_id = character_instance_id;
        Ok(())
    }

    /// Executes one REPL line: a meta command or a sentence.
    ///
    /// # Errors
    ///
    /// Returns whatever the command or sentence failed with.
    pub fn execute(&mut self, line: &str) -> Result<Outcome> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Outcome::Nothing);
        }
        let Some(command) = MetaCommand::parse(line)? else {
            return self.process(line).map(Outcome::Action);
        };

        debug!(?command, "meta_command");
        match command {
            MetaCommand::Help => Ok(Outcome::Help),
            MetaCommand::Quit => Ok(Outcome::Quit),
            MetaCommand::Where => self.location().map(Outcome::Location),
            MetaCommand::Actions => self.actions().map(Outcome::Actions),
            MetaCommand::History(action_id) => self.record_set(action_id).map(Outcome::History),
            MetaCommand::Save(path) => {
                self.save(&path)?;
                Ok(Outcome::Saved(path))
            }
            MetaCommand::Load(path) => {
                self.load(&path)?;
                Ok(Outcome::Loaded(path))
            }
        }
    }
}

/// Commits `tx` if `result` is a success and rolls it back otherwise.
fn finish<T>(tx: Transaction, result: Result<T>) -> Result<T> {
    match result {
        Ok(value) => {
            tx.commit()?;
            Ok(value)
        }
        Err(err) => {
            tx.rollback();
            Err(err)
        }
    }
}

fn player(tables: &Tables) -> Result<(DungeonInstanceId, CharacterInstanceId)> {
    let character = tables
        .table::<CharacterInstance>()
        .iter()
        .next()
        .ok_or_else(|| Error::validation("no character instance to play"))?;
    info!(
        character_instance = %character.id,
        dungeon_instance = %character.dungeon_instance_id,
        "player_selected"
    );
    Ok((character.dungeon_instance_id, character.id))
}
