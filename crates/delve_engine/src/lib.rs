//! Action processing and dungeon instantiation for Delve.
//!
//! This crate provides:
//! - [`Engine`] - The facade the surrounding system calls
//! - [`perform`] - Applies the state change a resolved command implies
//! - [`history`] - Snapshots everything an action touched, and reads it back
//! - Dungeon instantiation - Copies a dungeon template into a playthrough
//! - [`EngineConfig`] - Sentence limits and snapshot options
//!
//! # Processing an action
//!
//! ```text
//! sentence ──► resolve (delve_parser) ──► perform ──► record history ──► ActionRecordSet
//!                 │                           │              │
//!                 └── no writes on failure    └── one update └── append-only rows
//! ```
//!
//! Every operation runs inside a transaction owned by the caller. The engine
//! never commits or rolls back.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod engine;
pub mod history;
mod instance;
pub mod perform;

pub use config::EngineConfig;
pub use engine::Engine;
pub use history::{ActionRecordSet, LocationRecordSet, SourceSnapshot};
pub use perform::perform_action;
