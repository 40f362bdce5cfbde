//! Records, the instance store contract, and an in-memory transactional store.
//!
//! This crate provides:
//! - Template records ([`Dungeon`], [`Location`], [`Character`], [`Monster`], [`Object`])
//! - Instance records for one playthrough ([`LocationInstance`], [`ObjectInstance`], ...)
//! - Read-optimized views joining instances with their templates
//! - Append-only history records ([`Action`] and its snapshot rows)
//! - [`Repository`] / [`ViewRepository`] / [`InstanceStore`] - The persistence contract
//! - [`Store`] / [`Transaction`] - An in-memory store with snapshot transactions
//! - [`LocationContext`] - Occupants and exits of one location, loaded once per action

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod action;
pub mod attributes;
pub mod context;
pub mod instance;
pub mod neighbors;
pub mod record;
pub mod repository;
pub mod store;
pub mod template;
pub mod view;

pub use action::{
    Action, ActionCharacter, ActionCharacterFilter, ActionFilter, ActionMonster,
    ActionMonsterFilter, ActionObject, ActionObjectFilter, ActorRef, AttackTarget, Command,
    LookTarget,
};
pub use attributes::Attributes;
pub use context::{Actor, LocationContext};
pub use instance::{
    Carry, CharacterInstance, CharacterInstanceFilter, DungeonInstance, DungeonInstanceFilter,
    Holder, LocationInstance, LocationInstanceFilter, MonsterInstance, MonsterInstanceFilter,
    ObjectInstance, ObjectInstanceFilter,
};
pub use neighbors::Neighbors;
pub use record::{Filter, Lock, Record, View};
pub use repository::{InstanceStore, Repository, ViewRepository};
pub use store::{Store, Stored, Table, Tables, Transaction};
pub use template::{
    Character, CharacterFilter, Dungeon, DungeonFilter, Location, LocationFilter, Monster,
    MonsterFilter, Object, ObjectFilter,
};
pub use view::{CharacterInstanceView, LocationInstanceView, MonsterInstanceView, ObjectInstanceView};
