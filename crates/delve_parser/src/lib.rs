//! Command resolution for free-form dungeon sentences.
//!
//! This crate turns input like "move north" or "attack goblin with rusty
//! sword" into a fully resolved [`Action`](delve_storage::Action).
//!
//! # Architecture
//!
//! ```text
//! "Attack Goblin with Rusty Sword"
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ VOCABULARY      │  → attack, remainder "goblin with rusty sword"
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ TARGET          │  → monster goblin-instance (occupant of this location)
//! │ RESOLUTION      │  → weapon rusty-sword-instance (equipped by the actor)
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ ACTION          │  → Action { actor, location, Command::Attack { .. } }
//! └─────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`vocabulary`] - Keyword extraction in fixed priority order
//! - [`matcher`] - Case-insensitive substring name matching
//! - [`resolver`] - Per-command target resolution

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod matcher;
pub mod resolver;
pub mod vocabulary;

pub use matcher::{Named, find_named};
pub use resolver::{ResolveArgs, resolve_action};
pub use vocabulary::{Sentence, extract_command};
