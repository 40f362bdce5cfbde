//! An in-memory transactional store.
//!
//! Committed state lives in persistent `im` tables behind a mutex. Beginning
//! a transaction clones them in O(1); the transaction reads and writes its
//! private copy and records each write so that commit can replay exactly
//! those writes onto whatever is committed by then.
//!
//! Rows read with [`Lock::ForUpdate`] or updated in a transaction are locked.
//! Commit fails with a `Conflict` error if any locked row was committed by
//! another transaction after this one began.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use delve_foundation::{Error, ErrorKind, RecordId, Result};
use im::{OrdMap, Vector};
use tracing::debug;
use uuid::Uuid;

use crate::action::{Action, ActionCharacter, ActionMonster, ActionObject};
use crate::instance::{
    CharacterInstance, DungeonInstance, LocationInstance, MonsterInstance, ObjectInstance,
};
use crate::record::{Filter, Lock, Record, View};
use crate::repository::{Repository, ViewRepository};
use crate::template::{Character, Dungeon, Location, Monster, Object};
use crate::view::{CharacterInstanceView, LocationInstanceView, MonsterInstanceView, ObjectInstanceView};

#[cfg(feature = "serde")]
mod serde_support {
    use super::{Record, Table};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    // A table is stored as its rows in insertion order.
    impl<R: Record + Serialize> Serialize for Table<R> {
        fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.collect_seq(self.iter())
        }
    }

    impl<'de, R: Record + Deserialize<'de>> Deserialize<'de> for Table<R> {
        fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let rows = Vec::<R>::deserialize(deserializer)?;
            let mut table = Table::new();
            for row in rows {
                table.upsert(row);
            }
            Ok(table)
        }
    }
}

/// Rows of one record kind, keyed by identifier and kept in insertion order.
///
/// Clone is O(1) due to structural sharing.
#[derive(Clone, Debug)]
pub struct Table<R: Record> {
    rows: OrdMap<R::Id, R>,
    order: Vector<R::Id>,
}

impl<R: Record> Default for Table<R> {
    fn default() -> Self {
        Self {
            rows: OrdMap::new(),
            order: Vector::new(),
        }
    }
}

impl<R: Record> Table<R> {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the row with the given identifier.
    #[must_use]
    pub fn get(&self, id: R::Id) -> Option<&R> {
        self.rows.get(&id)
    }

    /// Returns true if a row with the given identifier exists.
    #[must_use]
    pub fn contains(&self, id: R::Id) -> bool {
        self.rows.contains_key(&id)
    }

    /// Iterates over rows in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &R> + '_ {
        self.order.iter().filter_map(|id| self.rows.get(id))
    }

    /// Inserts or replaces a row. New rows go to the end of the order.
    pub fn upsert(&mut self, row: R) {
        let id = row.id();
        if self.rows.insert(id, row).is_none() {
            self.order.push_back(id);
        }
    }
}

/// Every table of the store.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tables {
    dungeons: Table<Dungeon>,
    locations: Table<Location>,
    characters: Table<Character>,
    monsters: Table<Monster>,
    objects: Table<Object>,
    dungeon_instances: Table<DungeonInstance>,
    location_instances: Table<LocationInstance>,
    character_instances: Table<CharacterInstance>,
    monster_instances: Table<MonsterInstance>,
    object_instances: Table<ObjectInstance>,
    actions: Table<Action>,
    action_characters: Table<ActionCharacter>,
    action_monsters: Table<ActionMonster>,
    action_objects: Table<ActionObject>,
}

impl Tables {
    /// Returns the table holding records of kind `R`.
    #[must_use]
    pub fn table<R: Stored>(&self) -> &Table<R> {
        R::table(self)
    }
}

/// A record kind with a table in [`Tables`].
pub trait Stored: Record {
    /// Borrows this kind's table.
    fn table(tables: &Tables) -> &Table<Self>;

    /// Mutably borrows this kind's table.
    fn table_mut(tables: &mut Tables) -> &mut Table<Self>;
}

macro_rules! impl_stored {
    ($($ty:ty => $field:ident),* $(,)?) => {
        $(
            impl Stored for $ty {
                fn table(tables: &Tables) -> &Table<Self> {
                    &tables.$field
                }

                fn table_mut(tables: &mut Tables) -> &mut Table<Self> {
                    &mut tables.$field
                }
            }
        )*
    };
}

impl_stored!(
    Dungeon => dungeons,
    Location => locations,
    Character => characters,
    Monster => monsters,
    Object => objects,
    DungeonInstance => dungeon_instances,
    LocationInstance => location_instances,
    CharacterInstance => character_instances,
    MonsterInstance => monster_instances,
    ObjectInstance => object_instances,
    Action => actions,
    ActionCharacter => action_characters,
    ActionMonster => action_monsters,
    ActionObject => action_objects,
);

type RowKey = (&'static str, Uuid);

fn row_key<R: Record>(id: R::Id) -> RowKey {
    (R::KIND, id.as_uuid())
}

#[derive(Debug, Default)]
struct Shared {
    tables: Tables,
    generation: u64,
    restored_generation: u64,
    row_generations: HashMap<RowKey, u64>,
}

/// A shared handle to committed tables.
///
/// Clones share the same committed state.
#[derive(Clone, Debug, Default)]
pub struct Store {
    shared: Arc<Mutex<Shared>>,
}

impl Store {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store whose committed state is `tables`.
    #[must_use]
    pub fn from_tables(tables: Tables) -> Self {
        Self {
            shared: Arc::new(Mutex::new(Shared {
                tables,
                ..Shared::default()
            })),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Shared>> {
        self.shared
            .lock()
            .map_err(|_| Error::storage("store mutex poisoned"))
    }

    /// Returns a copy of the committed tables.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the store mutex is poisoned.
    pub fn snapshot(&self) -> Result<Tables> {
        Ok(self.lock()?.tables.clone())
    }

    /// Replaces the committed tables, e.g. after loading a save file.
    ///
    /// Transactions begun before the restore can no longer commit writes.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the store mutex is poisoned.
    pub fn restore(&self, tables: Tables) -> Result<()> {
        let mut shared = self.lock()?;
        shared.tables = tables;
        shared.generation += 1;
        shared.restored_generation = shared.generation;
        shared.row_generations.clear();
        debug!(generation = shared.generation, "store_restored");
        Ok(())
    }

    /// Begins a transaction over the current committed state.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the store mutex is poisoned.
    pub fn begin(&self) -> Result<Transaction> {
        let shared = self.lock()?;
        Ok(Transaction {
            store: self.clone(),
            base_generation: shared.generation,
            tables: shared.tables.clone(),
            locked: HashSet::new(),
            written: Vec::new(),
            writes: Vec::new(),
        })
    }
}

type Replay = Box<dyn FnOnce(&mut Tables) + Send>;

/// A unit of work over a private copy of the store.
///
/// Dropping a transaction without committing discards its writes.
pub struct Transaction {
    store: Store,
    base_generation: u64,
    tables: Tables,
    locked: HashSet<RowKey>,
    written: Vec<RowKey>,
    writes: Vec<Replay>,
}

impl fmt::Debug for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transaction")
            .field("base_generation", &self.base_generation)
            .field("locked", &self.locked.len())
            .field("writes", &self.writes.len())
            .finish_non_exhaustive()
    }
}

impl Transaction {
    /// Returns the tables as this transaction sees them.
    #[must_use]
    pub fn tables(&self) -> &Tables {
        &self.tables
    }

    /// Returns the number of writes made so far.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes.len()
    }

    /// Applies this transaction's writes to the committed state.
    ///
    /// # Errors
    ///
    /// Returns a `Conflict` error, and writes nothing, if another
    /// transaction committed a row this one locked, or if the store was
    /// restored after this transaction began and it has writes.
    pub fn commit(self) -> Result<()> {
        let Self {
            store,
            base_generation,
            locked,
            written,
            writes,
            ..
        } = self;
        let mut shared = store.lock()?;

        if base_generation < shared.restored_generation
            && let Some((kind, id)) = written.first()
        {
            debug!(record = *kind, %id, base_generation, "commit_after_restore");
            return Err(Error::new(ErrorKind::Conflict {
                record: *kind,
                id: id.to_string(),
            }));
        }

        for (kind, id) in &locked {
            if shared
                .row_generations
                .get(&(*kind, *id))
                .is_some_and(|generation| *generation > base_generation)
            {
                debug!(record = *kind, %id, "commit_conflict");
                return Err(Error::new(ErrorKind::Conflict {
                    record: *kind,
                    id: id.to_string(),
                }));
            }
        }

        if writes.is_empty() {
            return Ok(());
        }

        shared.generation += 1;
        let generation = shared.generation;
        for key in written {
            shared.row_generations.insert(key, generation);
        }
        let count = writes.len();
        for write in writes {
            write(&mut shared.tables);
        }
        debug!(generation, writes = count, "transaction_committed");
        Ok(())
    }

    /// Discards this transaction's writes.
    pub fn rollback(self) {
        debug!(writes = self.writes.len(), "transaction_rolled_back");
    }

    fn lock_row<R: Record>(&mut self, id: R::Id, lock: Lock) {
        if lock == Lock::ForUpdate {
            self.locked.insert(row_key::<R>(id));
        }
    }

    fn write<R: Stored>(&mut self, row: R) {
        self.written.push(row_key::<R>(row.id()));
        R::table_mut(&mut self.tables).upsert(row.clone());
        self.writes
            .push(Box::new(move |tables: &mut Tables| R::table_mut(tables).upsert(row)));
    }

    fn join_one<V: Joined>(&mut self, id: V::Id, lock: Lock) -> Result<V> {
        let instance = Repository::<V::Instance>::get_one(self, id, lock)?;
        let template =
            Repository::<V::Template>::get_one(self, V::template_id(&instance), Lock::None)?;
        Ok(V::join(&instance, &template))
    }

    fn join_many<V: Joined>(&mut self, filter: &V::Filter, lock: Lock) -> Result<Vec<V>> {
        let instances = Repository::<V::Instance>::get_many(self, filter, lock)?;
        instances
            .iter()
            .map(|instance| {
                let template = Repository::<V::Template>::get_one(
                    self,
                    V::template_id(instance),
                    Lock::None,
                )?;
                Ok(V::join(instance, &template))
            })
            .collect()
    }
}

impl<R: Stored> Repository<R> for Transaction {
    fn get_one(&mut self, id: R::Id, lock: Lock) -> Result<R> {
        let row = R::table(&self.tables)
            .get(id)
            .cloned()
            .ok_or_else(|| Error::not_found(R::KIND, id))?;
        self.lock_row::<R>(id, lock);
        Ok(row)
    }

    fn get_many(&mut self, filter: &R::Filter, lock: Lock) -> Result<Vec<R>> {
        let rows: Vec<R> = R::table(&self.tables)
            .iter()
            .filter(|row| filter.matches(row))
            .cloned()
            .collect();
        for row in &rows {
            self.lock_row::<R>(row.id(), lock);
        }
        Ok(rows)
    }

    fn create_one(&mut self, row: &mut R) -> Result<()> {
        if row.id().is_nil() {
            row.set_id(R::Id::generate());
        } else if R::table(&self.tables).contains(row.id()) {
            return Err(Error::storage(format!(
                "{} {} already exists",
                R::KIND,
                row.id()
            )));
        }
        row.set_created_at(Utc::now());
        self.write(row.clone());
        Ok(())
    }

    fn update_one(&mut self, row: &mut R) -> Result<()> {
        if R::APPEND_ONLY {
            return Err(Error::new(ErrorKind::AppendOnly { record: R::KIND }));
        }
        if !R::table(&self.tables).contains(row.id()) {
            return Err(Error::not_found(R::KIND, row.id()));
        }
        row.set_updated_at(Utc::now());
        self.lock_row::<R>(row.id(), Lock::ForUpdate);
        self.write(row.clone());
        Ok(())
    }
}

/// A view built by joining an instance row with its template row.
trait Joined: View {
    type Instance: Stored<Id = Self::Id, Filter = Self::Filter>;
    type Template: Stored;

    fn template_id(instance: &Self::Instance) -> <Self::Template as Record>::Id;

    fn join(instance: &Self::Instance, template: &Self::Template) -> Self;
}

macro_rules! impl_joined {
    ($($view:ty => $instance:ty, $template:ty, $field:ident);* $(;)?) => {
        $(
            impl Joined for $view {
                type Instance = $instance;
                type Template = $template;

                fn template_id(instance: &$instance) -> <$template as Record>::Id {
                    instance.$field
                }

                fn join(instance: &$instance, template: &$template) -> Self {
                    <$view>::join(instance, template)
                }
            }

            impl ViewRepository<$view> for Transaction {
                fn get_view(&mut self, id: <$view as View>::Id, lock: Lock) -> Result<$view> {
                    self.join_one(id, lock)
                }

                fn get_views(
                    &mut self,
                    filter: &<$view as View>::Filter,
                    lock: Lock,
                ) -> Result<Vec<$view>> {
                    self.join_many(filter, lock)
                }
            }
        )*
    };
}

impl_joined!(
    LocationInstanceView => LocationInstance, Location, location_id;
    CharacterInstanceView => CharacterInstance, Character, character_id;
    MonsterInstanceView => MonsterInstance, Monster, monster_id;
    ObjectInstanceView => ObjectInstance, Object, object_id;
);
