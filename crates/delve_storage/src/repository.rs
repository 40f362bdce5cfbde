//! The persistence contract.
//!
//! One [`Repository`] per record kind and one [`ViewRepository`] per view.
//! [`InstanceStore`] names the full set the engine needs; any type that
//! provides all of them is an instance store.
//!
//! Every method takes `&mut self`: implementations run inside a transaction
//! and record locks and writes as they go.

use delve_foundation::Result;

use crate::action::{Action, ActionCharacter, ActionMonster, ActionObject};
use crate::instance::{
    CharacterInstance, DungeonInstance, LocationInstance, MonsterInstance, ObjectInstance,
};
use crate::record::{Lock, Record, View};
use crate::template::{Character, Dungeon, Location, Monster, Object};
use crate::view::{CharacterInstanceView, LocationInstanceView, MonsterInstanceView, ObjectInstanceView};

/// CRUD access to one record kind.
pub trait Repository<R: Record> {
    /// Fetches one record by identifier.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no such record exists.
    fn get_one(&mut self, id: R::Id, lock: Lock) -> Result<R>;

    /// Fetches every record matching `filter`, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store fails.
    fn get_many(&mut self, filter: &R::Filter, lock: Lock) -> Result<Vec<R>>;

    /// Inserts a record, assigning its identifier if nil and its creation time.
    ///
    /// # Errors
    ///
    /// Returns an error if a record with the same identifier exists.
    fn create_one(&mut self, record: &mut R) -> Result<()>;

    /// Replaces a record, setting its update time.
    ///
    /// # Errors
    ///
    /// Returns `AppendOnly` for history records and `NotFound` if the record
    /// does not exist.
    fn update_one(&mut self, record: &mut R) -> Result<()>;
}

/// Read access to one view kind.
pub trait ViewRepository<V: View> {
    /// Fetches one view by identifier.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the instance or its template is missing.
    fn get_view(&mut self, id: V::Id, lock: Lock) -> Result<V>;

    /// Fetches every view matching `filter`, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if a matching instance's template is missing.
    fn get_views(&mut self, filter: &V::Filter, lock: Lock) -> Result<Vec<V>>;
}

/// Every repository the engine reads and writes.
pub trait InstanceStore:
    Repository<Dungeon>
    + Repository<Location>
    + Repository<Character>
    + Repository<Monster>
    + Repository<Object>
    + Repository<DungeonInstance>
    + Repository<LocationInstance>
    + Repository<CharacterInstance>
    + Repository<MonsterInstance>
    + Repository<ObjectInstance>
    + Repository<Action>
    + Repository<ActionCharacter>
    + Repository<ActionMonster>
    + Repository<ActionObject>
    + ViewRepository<LocationInstanceView>
    + ViewRepository<CharacterInstanceView>
    + ViewRepository<MonsterInstanceView>
    + ViewRepository<ObjectInstanceView>
{
}

impl<T> InstanceStore for T where
    T: ?Sized
        + Repository<Dungeon>
        + Repository<Location>
        + Repository<Character>
        + Repository<Monster>
        + Repository<Object>
        + Repository<DungeonInstance>
        + Repository<LocationInstance>
        + Repository<CharacterInstance>
        + Repository<MonsterInstance>
        + Repository<ObjectInstance>
        + Repository<Action>
        + Repository<ActionCharacter>
        + Repository<ActionMonster>
        + Repository<ActionObject>
        + ViewRepository<LocationInstanceView>
        + ViewRepository<CharacterInstanceView>
        + ViewRepository<MonsterInstanceView>
        + ViewRepository<ObjectInstanceView>
{
}
