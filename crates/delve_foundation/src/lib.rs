//! Core identifiers, vocabulary enums, and error types for Delve.
//!
//! This crate provides:
//! - Typed record identifiers ([`LocationInstanceId`], [`ActionId`], ...)
//! - [`Direction`] - The ten compass/vertical exits of a location
//! - [`CommandKind`] - The fixed command vocabulary, in priority order
//! - [`RecordType`] - Role tags for action snapshot rows
//! - [`Error`] - Rich error types with context

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod command;
pub mod direction;
pub mod error;
pub mod id;
pub mod record_type;

pub use command::{ActorKind, CommandKind};
pub use direction::Direction;
pub use error::{Error, ErrorContext, ErrorKind};
pub use id::{
    ActionCharacterId, ActionId, ActionMonsterId, ActionObjectId, CharacterId,
    CharacterInstanceId, DungeonId, DungeonInstanceId, LocationId, LocationInstanceId, MonsterId,
    MonsterInstanceId, ObjectId, ObjectInstanceId, RecordId,
};
pub use record_type::RecordType;

/// Result type alias using Delve's Error type.
pub type Result<T> = std::result::Result<T, Error>;
